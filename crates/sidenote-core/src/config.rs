//! Footer configuration.
//!
//! Hosts ship a small JSON document next to the extension; every field is
//! optional and falls back to the built-in defaults.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::util::{is_web_url, trimmed_or};

/// Delay before an unfinished login asks the user to verify the account.
pub const DEFAULT_VERIFICATION_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_SURVEY_URL: &str = "https://qsurvey.mozilla.com/s3/notes?ref=sidebar";
pub const DEFAULT_NOTES_EXTENSION_ID: &str = "notes@mozilla.com";
pub const DEFAULT_EXPORT_FILE_NAME: &str = "notes.html";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct FooterConfig {
    pub verification_timeout_ms: u64,
    pub survey_url: String,
    /// Recipient of the disconnect notification.
    pub notes_extension_id: String,
    pub export_file_name: String,
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            verification_timeout_ms: DEFAULT_VERIFICATION_TIMEOUT_MS,
            survey_url: DEFAULT_SURVEY_URL.to_string(),
            notes_extension_id: DEFAULT_NOTES_EXTENSION_ID.to_string(),
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
        }
    }
}

impl FooterConfig {
    #[must_use]
    pub const fn verification_timeout(&self) -> Duration {
        Duration::from_millis(self.verification_timeout_ms)
    }

    /// Parse a JSON config document.
    pub fn from_json(raw: &str) -> Result<Self> {
        let mut config = serde_json::from_str::<Self>(raw)?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`; a missing file yields the defaults.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No footer config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw).map_err(|error| match error {
            Error::Serialization(error) => {
                Error::Config(format!("Failed to parse {}: {}", path.display(), error))
            }
            other => other,
        })
    }

    /// Blank strings fall back to their defaults.
    fn normalize(&mut self) {
        let defaults = Self::default();
        self.survey_url = trimmed_or(&self.survey_url, defaults.survey_url);
        self.notes_extension_id = trimmed_or(&self.notes_extension_id, defaults.notes_extension_id);
        self.export_file_name = trimmed_or(&self.export_file_name, defaults.export_file_name);
    }

    fn validate(&self) -> Result<()> {
        if !is_web_url(&self.survey_url) {
            return Err(Error::Config(
                "survey_url must include http:// or https://".to_string(),
            ));
        }
        if self.verification_timeout_ms == 0 {
            return Err(Error::Config(
                "verification_timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.export_file_name.contains(['/', '\\']) {
            return Err(Error::Config(
                "export_file_name must not contain path separators".to_string(),
            ));
        }
        Ok(())
    }
}
