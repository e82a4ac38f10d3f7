//! Inbound host messages.
//!
//! The host delivers opaque key/value records tagged by an `action` field.
//! Records with an unknown action or an unexpected shape are dropped so newer
//! hosts can talk to older footers.

use serde::Deserialize;

/// Named event driving the status state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// The account finished signing in.
    Authenticated { email: Option<String> },
    /// The host loaded notes content from storage.
    DataLoaded { content: Option<String> },
    /// The editor changed; content must be reloaded.
    TextChanged,
    /// A sync round started.
    SyncStarted,
    /// The user started typing.
    EditingStarted,
    /// A sync round finished.
    TextSynced {
        last_modified: i64,
        content: Option<String>,
    },
    /// The editor saved locally.
    TextSaved,
    /// The sync connection must be re-established.
    ReconnectRequested,
    /// Sync was turned off.
    Disconnected,
}

impl SyncEvent {
    /// Parse a host message record.
    ///
    /// Returns `None` for unknown actions and malformed records.
    pub fn from_message(message: &serde_json::Value) -> Option<Self> {
        match WireMessage::deserialize(message) {
            Ok(wire) => Some(wire.into()),
            Err(error) => {
                tracing::debug!("Ignoring host message: {}", error);
                None
            }
        }
    }

    /// Wire action name of this event.
    #[must_use]
    pub const fn action(&self) -> &'static str {
        match self {
            Self::Authenticated { .. } => "sync-authenticated",
            Self::DataLoaded { .. } => "kinto-loaded",
            Self::TextChanged => "text-change",
            Self::SyncStarted => "text-syncing",
            Self::EditingStarted => "text-editing",
            Self::TextSynced { .. } => "text-synced",
            Self::TextSaved => "text-saved",
            Self::ReconnectRequested => "reconnect",
            Self::Disconnected => "disconnected",
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
enum WireMessage {
    SyncAuthenticated {
        #[serde(default)]
        profile: Option<WireProfile>,
    },
    KintoLoaded {
        #[serde(default)]
        data: Option<String>,
    },
    TextChange,
    TextSyncing,
    TextEditing,
    TextSynced {
        last_modified: i64,
        #[serde(default)]
        content: Option<String>,
    },
    TextSaved,
    Reconnect,
    Disconnected,
}

#[derive(Debug, Deserialize)]
struct WireProfile {
    #[serde(default)]
    email: Option<String>,
}

impl From<WireMessage> for SyncEvent {
    fn from(value: WireMessage) -> Self {
        match value {
            WireMessage::SyncAuthenticated { profile } => Self::Authenticated {
                email: profile.and_then(|profile| profile.email),
            },
            WireMessage::KintoLoaded { data } => Self::DataLoaded { content: data },
            WireMessage::TextChange => Self::TextChanged,
            WireMessage::TextSyncing => Self::SyncStarted,
            WireMessage::TextEditing => Self::EditingStarted,
            WireMessage::TextSynced {
                last_modified,
                content,
            } => Self::TextSynced {
                last_modified,
                content,
            },
            WireMessage::TextSaved => Self::TextSaved,
            WireMessage::Reconnect => Self::ReconnectRequested,
            WireMessage::Disconnected => Self::Disconnected,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_authenticated_profile_email() {
        let event = SyncEvent::from_message(&json!({
            "action": "sync-authenticated",
            "profile": { "email": "a@b.com", "uid": "123" },
        }));
        assert_eq!(
            event,
            Some(SyncEvent::Authenticated {
                email: Some("a@b.com".to_string())
            })
        );
    }

    #[test]
    fn authenticated_without_profile_has_no_email() {
        let event = SyncEvent::from_message(&json!({ "action": "sync-authenticated" }));
        assert_eq!(event, Some(SyncEvent::Authenticated { email: None }));
    }

    #[test]
    fn parses_text_synced() {
        let event = SyncEvent::from_message(&json!({
            "action": "text-synced",
            "last_modified": 1_500_000_000_000_i64,
            "content": "<p>hi</p>",
        }));
        assert_eq!(
            event,
            Some(SyncEvent::TextSynced {
                last_modified: 1_500_000_000_000,
                content: Some("<p>hi</p>".to_string()),
            })
        );
    }

    #[test]
    fn null_data_is_missing_content() {
        let event = SyncEvent::from_message(&json!({ "action": "kinto-loaded", "data": null }));
        assert_eq!(event, Some(SyncEvent::DataLoaded { content: None }));
    }

    #[test]
    fn unit_actions_map_to_events() {
        let cases = [
            ("text-change", SyncEvent::TextChanged),
            ("text-syncing", SyncEvent::SyncStarted),
            ("text-editing", SyncEvent::EditingStarted),
            ("text-saved", SyncEvent::TextSaved),
            ("reconnect", SyncEvent::ReconnectRequested),
            ("disconnected", SyncEvent::Disconnected),
        ];
        for (action, expected) in cases {
            let event = SyncEvent::from_message(&json!({ "action": action }));
            assert_eq!(event.as_ref(), Some(&expected));
            assert_eq!(expected.action(), action);
        }
    }

    #[test]
    fn unknown_and_malformed_messages_are_ignored() {
        assert_eq!(
            SyncEvent::from_message(&json!({ "action": "theme-changed" })),
            None
        );
        assert_eq!(SyncEvent::from_message(&json!({ "kind": "text-saved" })), None);
        assert_eq!(
            SyncEvent::from_message(&json!({ "action": "text-synced", "content": "x" })),
            None
        );
        assert_eq!(SyncEvent::from_message(&json!("text-saved")), None);
    }
}
