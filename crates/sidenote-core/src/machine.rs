//! Sync status state machine.

use std::time::{Duration, Instant};

use crate::bridge::{send_or_log, HostBridge, OutboundRequest};
use crate::config::DEFAULT_VERIFICATION_TIMEOUT_MS;
use crate::event::SyncEvent;
use crate::session::SyncSession;
use crate::status::{Descriptor, Status};
use crate::util::unix_millis_now;

/// Owns the [`SyncSession`] and drives it from host events and user actions.
///
/// The verification timer is a deadline rather than a spawned task: the
/// driver asks for [`Self::verification_deadline`] and calls
/// [`Self::fire_due_timers`] once it has passed. A deadline is armed only
/// while the status is [`Status::OpeningLogin`].
#[derive(Debug)]
pub struct StatusStateMachine<B: HostBridge> {
    session: SyncSession,
    verification_deadline: Option<Instant>,
    verification_timeout: Duration,
    bridge: B,
}

impl<B: HostBridge> StatusStateMachine<B> {
    pub fn new(bridge: B, session: SyncSession) -> Self {
        Self {
            session,
            verification_deadline: None,
            verification_timeout: Duration::from_millis(DEFAULT_VERIFICATION_TIMEOUT_MS),
            bridge,
        }
    }

    #[must_use]
    pub fn with_verification_timeout(mut self, timeout: Duration) -> Self {
        self.verification_timeout = timeout;
        self
    }

    #[must_use]
    pub const fn session(&self) -> &SyncSession {
        &self.session
    }

    #[must_use]
    pub const fn status(&self) -> Status {
        self.session.status
    }

    #[must_use]
    pub fn descriptor(&self) -> &'static Descriptor {
        self.session.descriptor()
    }

    #[must_use]
    pub const fn bridge(&self) -> &B {
        &self.bridge
    }

    /// Tear the machine down, cancelling any pending timer.
    pub fn into_bridge(mut self) -> B {
        self.cancel_verification_timer();
        self.bridge
    }

    /// Deadline of the pending verification timer, if armed.
    #[must_use]
    pub const fn verification_deadline(&self) -> Option<Instant> {
        self.verification_deadline
    }

    /// Parse and apply a host message record; unknown records are ignored.
    pub fn handle_message(&mut self, message: &serde_json::Value) {
        if let Some(event) = SyncEvent::from_message(message) {
            self.handle_event(event);
        }
    }

    pub fn handle_event(&mut self, event: SyncEvent) {
        tracing::debug!("Handling {} in {}", event.action(), self.status());

        match event {
            SyncEvent::Authenticated { email } => {
                self.cancel_verification_timer();
                self.session.authenticated = true;
                self.session.email = email;
                self.set_status(Status::Syncing);
                send_or_log(&self.bridge, OutboundRequest::KintoSync);
            }
            SyncEvent::DataLoaded { content } => {
                self.cancel_verification_timer();
                // Shows when content was pulled, not when it was last written.
                self.session.last_modified = unix_millis_now();
                self.session.set_content(content);
                self.session.loaded = true;
                self.resolve_idle_status();
            }
            SyncEvent::TextChanged => {
                send_or_log(&self.bridge, OutboundRequest::KintoLoad);
            }
            SyncEvent::SyncStarted => self.set_status(Status::Syncing),
            SyncEvent::EditingStarted => {
                let status = if self.session.authenticated {
                    Status::Syncing
                } else {
                    Status::SignedOut
                };
                self.set_status(status);
            }
            SyncEvent::TextSynced {
                last_modified,
                content,
            } => {
                self.session.last_modified = last_modified;
                self.session.set_content(content);
                self.resolve_idle_status();
            }
            SyncEvent::TextSaved => {
                if !self.descriptor().preserve && !self.session.authenticated {
                    self.set_status(Status::Saved);
                }
            }
            SyncEvent::ReconnectRequested => {
                self.cancel_verification_timer();
                self.set_status(Status::ReconnectRequired);
                send_or_log(&self.bridge, OutboundRequest::MetricsReconnectSync);
            }
            SyncEvent::Disconnected => {
                self.cancel_verification_timer();
                self.session.authenticated = false;
                self.resolve_idle_status();
            }
        }
    }

    /// Move to the idle status unless the current one must be preserved.
    ///
    /// Returns the status after recomputation.
    pub fn resolve_idle_status(&mut self) -> Status {
        if self.descriptor().preserve {
            return self.status();
        }

        let status = if self.session.authenticated {
            Status::Synced
        } else {
            Status::SignedOut
        };
        self.set_status(status);
        status
    }

    /// React to a click on the sync button.
    pub fn trigger_sync_action(&mut self, now: Instant) {
        if !self.descriptor().clickable {
            return;
        }

        if self.session.authenticated {
            tracing::info!("Manual sync requested");
            self.set_status(Status::Syncing);
            send_or_log(&self.bridge, OutboundRequest::KintoSync);
        } else {
            tracing::info!("Opening login");
            self.set_status(Status::OpeningLogin);
            self.verification_deadline = Some(now + self.verification_timeout);
            send_or_log(&self.bridge, OutboundRequest::Authenticate);
        }
    }

    /// Fire the verification timer if its deadline has passed.
    ///
    /// Returns `true` when the status changed.
    pub fn fire_due_timers(&mut self, now: Instant) -> bool {
        match self.verification_deadline {
            Some(deadline) if deadline <= now => {
                self.verification_deadline = None;
                tracing::info!("Login not completed, asking for account verification");
                self.set_status(Status::AwaitingVerification);
                true
            }
            _ => false,
        }
    }

    /// Ask the notes extension to turn sync off.
    ///
    /// Local state only changes once the `disconnected` event comes back.
    pub fn disconnect(&self, extension_id: &str) {
        tracing::info!("Disconnect requested");
        if let Err(error) =
            self.bridge
                .send_external_message(extension_id, OutboundRequest::Disconnected)
        {
            tracing::warn!("Failed to send disconnect to {}: {}", extension_id, error);
        }
    }

    /// Cancel a pending verification timer. Idempotent.
    pub fn cancel_verification_timer(&mut self) {
        if self.verification_deadline.take().is_some() {
            tracing::debug!("Cancelled verification timer");
        }
    }

    fn set_status(&mut self, status: Status) {
        if status != Status::OpeningLogin {
            self.cancel_verification_timer();
        }
        if self.session.status != status {
            tracing::debug!("Footer status {} -> {}", self.session.status, status);
        }
        self.session.status = status;
    }
}
