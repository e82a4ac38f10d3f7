//! Sync session owned by the status state machine.

use serde::Serialize;

use crate::status::{Descriptor, Status};
use crate::util::unix_millis_now;

/// Document shown before the host has loaded any notes content.
pub const DEFAULT_CONTENT: &str = "<h2>Welcome to Notes!</h2>\
<p>This is a simple one-page notepad built in to your sidebar. \
Notes are saved locally and can be synced to your account.</p>\
<p>Use the footer to sign in, export your notes as HTML or send us feedback.</p>";

/// Mutable sync session.
///
/// Fields are only written by [`crate::StatusStateMachine`] transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncSession {
    pub(crate) status: Status,
    pub(crate) authenticated: bool,
    pub(crate) email: Option<String>,
    /// Unix ms of the last load or sync.
    pub(crate) last_modified: i64,
    pub(crate) content: String,
    pub(crate) loaded: bool,
}

impl SyncSession {
    /// Fresh session; `authenticated` comes from stored credential presence.
    #[must_use]
    pub fn new(authenticated: bool) -> Self {
        Self {
            status: Status::SignedOut,
            authenticated,
            email: None,
            last_modified: unix_millis_now(),
            content: DEFAULT_CONTENT.to_string(),
            loaded: false,
        }
    }

    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub fn descriptor(&self) -> &'static Descriptor {
        self.status.descriptor()
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    #[must_use]
    pub const fn last_modified(&self) -> i64 {
        self.last_modified
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Whether the host has delivered content at least once.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Replace the content, falling back to [`DEFAULT_CONTENT`].
    pub(crate) fn set_content(&mut self, content: Option<String>) {
        self.content = content.unwrap_or_else(|| DEFAULT_CONTENT.to_string());
    }
}

impl Default for SyncSession {
    fn default() -> Self {
        Self::new(false)
    }
}
