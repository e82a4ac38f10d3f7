//! Host bridge: the capability surface the footer calls into.
//!
//! The browser host (runtime messaging, storage, tabs, downloads) is injected
//! as a [`HostBridge`] implementation so the core can run against a test
//! double or a CLI replay host.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fire-and-forget requests sent over the host messaging channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum OutboundRequest {
    /// Start a sync round.
    KintoSync,
    /// Reload content from storage.
    KintoLoad,
    /// Open the login flow.
    Authenticate,
    MetricsReconnectSync,
    MetricsExportHtml,
    /// Turn sync off; addressed to the notes extension.
    Disconnected,
}

impl OutboundRequest {
    #[must_use]
    pub const fn action(self) -> &'static str {
        match self {
            Self::KintoSync => "kinto-sync",
            Self::KintoLoad => "kinto-load",
            Self::Authenticate => "authenticate",
            Self::MetricsReconnectSync => "metrics-reconnect-sync",
            Self::MetricsExportHtml => "metrics-export-html",
            Self::Disconnected => "disconnected",
        }
    }
}

/// A file handed to the host download manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    pub mime_type: String,
    pub body: String,
}

/// Versions reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BrowserInfo {
    /// Version of the extension manifest.
    pub extension_version: String,
    /// Version of the browser release.
    pub browser_version: String,
}

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Message delivery failed: {0}")]
    Delivery(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Download failed: {0}")]
    Download(String),
    #[error("Tab could not be opened: {0}")]
    Tabs(String),
    #[error("Host capability unavailable: {0}")]
    Unavailable(&'static str),
}

pub type BridgeResult<T> = Result<T, BridgeError>;

/// Host capabilities used by the footer.
///
/// Every call is fire-and-forget from the footer's point of view: errors are
/// logged by the caller and never change local state.
pub trait HostBridge {
    /// Send a request over the runtime messaging channel.
    fn send_message(&self, request: OutboundRequest) -> BridgeResult<()>;

    /// Send a request to another extension.
    fn send_external_message(&self, extension_id: &str, request: OutboundRequest)
        -> BridgeResult<()>;

    /// Whether a `credentials` record is present in local storage.
    fn has_stored_credentials(&self) -> BridgeResult<bool>;

    /// Hand a generated file to the download manager.
    fn download(&self, download: Download) -> BridgeResult<()>;

    /// Open a new tab at `url`.
    fn open_tab(&self, url: &str) -> BridgeResult<()>;

    /// Extension and browser versions.
    fn browser_info(&self) -> BridgeResult<BrowserInfo>;
}

/// Send a request and log delivery failures.
pub(crate) fn send_or_log<B: HostBridge>(bridge: &B, request: OutboundRequest) {
    tracing::debug!("Sending {}", request.action());
    if let Err(error) = bridge.send_message(request) {
        tracing::warn!("Failed to send {}: {}", request.action(), error);
    }
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingBridge;
    use super::*;

    #[test]
    fn outbound_requests_serialize_with_action_tag() {
        let json = serde_json::to_value(OutboundRequest::MetricsReconnectSync).unwrap();
        assert_eq!(json, serde_json::json!({ "action": "metrics-reconnect-sync" }));

        for request in [
            OutboundRequest::KintoSync,
            OutboundRequest::KintoLoad,
            OutboundRequest::Authenticate,
            OutboundRequest::MetricsExportHtml,
            OutboundRequest::Disconnected,
        ] {
            let json = serde_json::to_value(request).unwrap();
            assert_eq!(json["action"], request.action());
        }
    }

    #[test]
    fn send_or_log_swallows_delivery_errors() {
        let bridge = RecordingBridge {
            fail_delivery: true,
            ..RecordingBridge::default()
        };
        send_or_log(&bridge, OutboundRequest::KintoLoad);
        assert!(bridge.sent().is_empty());
    }
}
