use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] sidenote_core::Error),
    #[error(transparent)]
    Catalog(#[from] sidenote_core::i18n::CatalogError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid script line {line}: {message}")]
    Script { line: usize, message: String },
    #[error("Footer input channel closed before the script finished")]
    ChannelClosed,
}
