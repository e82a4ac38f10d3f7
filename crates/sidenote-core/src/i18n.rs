//! Message catalog and footer time formatting.
//!
//! Catalogs use the WebExtension `messages.json` layout so a host can hand
//! over its `_locales/<lang>/messages.json` unchanged.

use std::collections::HashMap;
use std::fmt::Display;
use std::path::Path;
use std::sync::OnceLock;

use chrono::{DateTime, TimeZone, Utc};
use regex::{Captures, Regex};
use serde::Deserialize;
use thiserror::Error;

use crate::status::TemplateId;

const ENGLISH_MESSAGES: [(&str, &str); 13] = [
    ("signInToSync", "Sign in to Sync"),
    ("syncNotes", "Sync your notes to other devices"),
    ("openingLoginWindow", "Opening login window\u{2026}"),
    ("pleaseLogin", "Please log in to your account"),
    ("reconnectSync", "Reconnect to Sync"),
    ("syncProgress", "Syncing\u{2026}"),
    ("syncToMail", "Syncing to $1"),
    ("syncComplete2", "Synced at $1"),
    ("savedComplete2", "Saved at $1"),
    ("cancelSetup", "Cancel setup"),
    ("disableSync", "Disable Sync"),
    ("exportAsHTML", "Export as HTML\u{2026}"),
    ("feedback", "Give feedback"),
];

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to parse message catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Failed to read message catalog: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Deserialize)]
struct RawMessage {
    message: String,
    #[serde(default)]
    placeholders: HashMap<String, RawPlaceholder>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawPlaceholder {
    content: String,
}

/// Resolved message catalog keyed by message name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    messages: HashMap<String, String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::english()
    }
}

impl Catalog {
    /// Built-in English messages.
    #[must_use]
    pub fn english() -> Self {
        Self {
            messages: ENGLISH_MESSAGES
                .iter()
                .map(|(key, message)| ((*key).to_string(), (*message).to_string()))
                .collect(),
        }
    }

    /// Parse a `messages.json` document, resolving named placeholders.
    pub fn from_messages_json(raw: &str) -> Result<Self, CatalogError> {
        let raw_messages = serde_json::from_str::<HashMap<String, RawMessage>>(raw)?;
        let messages = raw_messages
            .into_iter()
            .map(|(key, raw)| {
                let placeholders = raw
                    .placeholders
                    .into_iter()
                    .map(|(name, placeholder)| (name.to_lowercase(), placeholder.content))
                    .collect::<HashMap<_, _>>();
                (key, resolve_named_placeholders(&raw.message, &placeholders))
            })
            .collect();
        Ok(Self { messages })
    }

    pub fn load_from_path(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_messages_json(&raw)
    }

    /// Layer `other` on top of this catalog; keys in `other` win.
    #[must_use]
    pub fn merged_with(mut self, other: Self) -> Self {
        self.messages.extend(other.messages);
        self
    }

    /// Render a message with positional `$1..$9` substitutions.
    ///
    /// Missing keys render as an empty string.
    pub fn message(&self, id: TemplateId, args: &[&str]) -> String {
        let Some(template) = self.messages.get(id.key()) else {
            tracing::debug!("Missing catalog message {}", id.key());
            return String::new();
        };
        substitute_positional(template, args)
    }
}

fn named_placeholder_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\$([A-Za-z0-9_@]+)\$").expect("Invalid regex"))
}

fn positional_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\$(\$|[1-9])").expect("Invalid regex"))
}

fn resolve_named_placeholders(message: &str, placeholders: &HashMap<String, String>) -> String {
    named_placeholder_regex()
        .replace_all(message, |captures: &Captures<'_>| {
            placeholders
                .get(&captures[1].to_lowercase())
                .cloned()
                .unwrap_or_else(|| captures[0].to_string())
        })
        .into_owned()
}

fn substitute_positional(template: &str, args: &[&str]) -> String {
    positional_regex()
        .replace_all(template, |captures: &Captures<'_>| {
            let token = &captures[1];
            if token == "$" {
                return "$".to_string();
            }
            token
                .parse::<usize>()
                .ok()
                .and_then(|position| args.get(position - 1))
                .map(ToString::to_string)
                .unwrap_or_default()
        })
        .into_owned()
}

/// Format the footer's last-sync time relative to `now`.
///
/// Same calendar day renders the time of day (`3:04 PM`), anything else the
/// date (`Mar 5`). Out-of-range timestamps render empty.
pub fn format_footer_time<Tz>(last_modified_ms: i64, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let Some(timestamp) = DateTime::<Utc>::from_timestamp_millis(last_modified_ms) else {
        return String::new();
    };
    let local = timestamp.with_timezone(&now.timezone());

    if local.date_naive() == now.date_naive() {
        local.format("%-I:%M %p").to_string()
    } else {
        local.format("%b %-d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn english_catalog_covers_every_template() {
        let catalog = Catalog::english();
        for id in [
            TemplateId::SignInToSync,
            TemplateId::SyncNotes,
            TemplateId::OpeningLoginWindow,
            TemplateId::PleaseLogin,
            TemplateId::ReconnectSync,
            TemplateId::SyncProgress,
            TemplateId::SyncToMail,
            TemplateId::SyncComplete,
            TemplateId::SavedComplete,
            TemplateId::CancelSetup,
            TemplateId::DisableSync,
            TemplateId::ExportAsHtml,
            TemplateId::Feedback,
        ] {
            assert!(!catalog.message(id, &["x"]).is_empty(), "{}", id.key());
        }
    }

    #[test]
    fn positional_arguments_are_substituted() {
        let catalog = Catalog::english();
        assert_eq!(
            catalog.message(TemplateId::SyncToMail, &["a@b.com"]),
            "Syncing to a@b.com"
        );
        assert_eq!(catalog.message(TemplateId::SyncToMail, &[]), "Syncing to ");
    }

    #[test]
    fn messages_json_resolves_named_placeholders() {
        let raw = r#"{
            "syncComplete2": {
                "message": "Synced $TIME$ ($$)",
                "description": "Footer status after sync",
                "placeholders": { "time": { "content": "$1", "example": "3:04 PM" } }
            },
            "feedback": { "message": "Feedback" }
        }"#;
        let catalog = Catalog::from_messages_json(raw).unwrap();
        assert_eq!(
            catalog.message(TemplateId::SyncComplete, &["3:04 PM"]),
            "Synced 3:04 PM ($)"
        );
        assert_eq!(catalog.message(TemplateId::Feedback, &[]), "Feedback");
        assert_eq!(catalog.message(TemplateId::DisableSync, &[]), "");
    }

    #[test]
    fn arguments_are_not_expanded_twice() {
        let raw = r#"{ "syncToMail": { "message": "To $1" } }"#;
        let catalog = Catalog::from_messages_json(raw).unwrap();
        assert_eq!(catalog.message(TemplateId::SyncToMail, &["$1"]), "To $1");
    }

    #[test]
    fn merged_catalog_overrides_english() {
        let german = Catalog::from_messages_json(
            r#"{ "feedback": { "message": "Feedback geben" } }"#,
        )
        .unwrap();
        let catalog = Catalog::english().merged_with(german);
        assert_eq!(catalog.message(TemplateId::Feedback, &[]), "Feedback geben");
        assert_eq!(
            catalog.message(TemplateId::DisableSync, &[]),
            "Disable Sync"
        );
    }

    #[test]
    fn invalid_catalog_is_an_error() {
        assert!(Catalog::from_messages_json("{ \"feedback\": 3 }").is_err());
    }

    #[test]
    fn footer_time_uses_time_of_day_for_today() {
        let now = Utc.with_ymd_and_hms(2026, 3, 5, 18, 0, 0).unwrap();
        let synced = Utc.with_ymd_and_hms(2026, 3, 5, 15, 4, 0).unwrap();
        assert_eq!(
            format_footer_time(synced.timestamp_millis(), &now),
            "3:04 PM"
        );
    }

    #[test]
    fn footer_time_uses_date_for_earlier_days() {
        let now = Utc.with_ymd_and_hms(2026, 3, 6, 1, 0, 0).unwrap();
        let synced = Utc.with_ymd_and_hms(2026, 3, 5, 9, 30, 0).unwrap();
        assert_eq!(format_footer_time(synced.timestamp_millis(), &now), "Mar 5");
    }

    #[test]
    fn footer_time_follows_time_zone_of_now() {
        let offset = FixedOffset::west_opt(5 * 3600).unwrap();
        let now = offset.with_ymd_and_hms(2026, 3, 5, 20, 0, 0).unwrap();
        let synced = Utc.with_ymd_and_hms(2026, 3, 6, 0, 15, 0).unwrap();
        assert_eq!(
            format_footer_time(synced.timestamp_millis(), &now),
            "7:15 PM"
        );
    }

    #[test]
    fn footer_time_rejects_out_of_range_timestamps() {
        let now = Utc::now();
        assert_eq!(format_footer_time(i64::MAX, &now), "");
    }
}
