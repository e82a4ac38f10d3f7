//! Footer config file resolution.

use std::env;
use std::path::{Path, PathBuf};

use sidenote_core::FooterConfig;

use crate::error::CliError;

const CONFIG_FILE_NAME: &str = "footer.json";
const CONFIG_ENV_VAR: &str = "SIDENOTE_CONFIG";

/// Resolve the config path: explicit flag, then `SIDENOTE_CONFIG`, then the
/// platform config directory.
pub fn resolve_config_path(explicit: Option<&Path>, env_value: Option<String>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Some(value) = env_value.map(|value| value.trim().to_string()) {
        if !value.is_empty() {
            return Some(PathBuf::from(value));
        }
    }

    default_config_path()
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sidenote").join(CONFIG_FILE_NAME))
}

pub fn load_footer_config(explicit: Option<&Path>) -> Result<FooterConfig, CliError> {
    let Some(path) = resolve_config_path(explicit, env::var(CONFIG_ENV_VAR).ok()) else {
        tracing::debug!("No config directory available, using defaults");
        return Ok(FooterConfig::default());
    };

    tracing::debug!("Loading footer config from {}", path.display());
    Ok(FooterConfig::load_from_path(&path)?)
}
