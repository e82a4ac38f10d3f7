//! File-backed host used by `sidenote replay`.
//!
//! Outbound messages and opened tabs are printed to stdout, exports land in a
//! download directory and stored credentials come from a storage document.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use sidenote_core::bridge::{BrowserInfo, Download};
use sidenote_core::{BridgeError, BridgeResult, HostBridge, OutboundRequest};

/// Storage key whose presence means the user has signed in before.
const CREDENTIALS_KEY: &str = "credentials";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEffect {
    Message(OutboundRequest),
    External {
        extension_id: String,
        request: OutboundRequest,
    },
    Download(PathBuf),
    Tab(String),
}

impl HostEffect {
    pub fn describe(&self) -> String {
        match self {
            Self::Message(request) => format!("-> message {}", request.action()),
            Self::External {
                extension_id,
                request,
            } => format!("-> message {} to {extension_id}", request.action()),
            Self::Download(path) => format!("-> download {}", path.display()),
            Self::Tab(url) => format!("-> open tab {url}"),
        }
    }
}

/// Effects shared between the bridge and the replay printer.
pub type EffectLog = Rc<RefCell<Vec<HostEffect>>>;

#[derive(Debug, Default)]
pub struct ReplayBridge {
    storage_path: Option<PathBuf>,
    download_dir: Option<PathBuf>,
    info: Option<BrowserInfo>,
    effects: EffectLog,
}

impl ReplayBridge {
    pub fn new(
        storage_path: Option<PathBuf>,
        download_dir: Option<PathBuf>,
        info: Option<BrowserInfo>,
    ) -> Self {
        Self {
            storage_path,
            download_dir,
            info,
            effects: EffectLog::default(),
        }
    }

    pub fn effects(&self) -> EffectLog {
        Rc::clone(&self.effects)
    }

    fn record(&self, effect: HostEffect) {
        self.effects.borrow_mut().push(effect);
    }
}

impl HostBridge for ReplayBridge {
    fn send_message(&self, request: OutboundRequest) -> BridgeResult<()> {
        self.record(HostEffect::Message(request));
        Ok(())
    }

    fn send_external_message(
        &self,
        extension_id: &str,
        request: OutboundRequest,
    ) -> BridgeResult<()> {
        self.record(HostEffect::External {
            extension_id: extension_id.to_string(),
            request,
        });
        Ok(())
    }

    fn has_stored_credentials(&self) -> BridgeResult<bool> {
        let Some(path) = &self.storage_path else {
            return Ok(false);
        };
        if !path.exists() {
            return Ok(false);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|error| BridgeError::Storage(error.to_string()))?;
        let storage = serde_json::from_str::<serde_json::Value>(&raw)
            .map_err(|error| BridgeError::Storage(error.to_string()))?;
        Ok(storage.get(CREDENTIALS_KEY).is_some())
    }

    fn download(&self, download: Download) -> BridgeResult<()> {
        let Some(dir) = &self.download_dir else {
            return Err(BridgeError::Unavailable("downloads"));
        };

        std::fs::create_dir_all(dir).map_err(|error| BridgeError::Download(error.to_string()))?;
        let path = dir.join(&download.file_name);
        std::fs::write(&path, download.body)
            .map_err(|error| BridgeError::Download(error.to_string()))?;
        self.record(HostEffect::Download(path));
        Ok(())
    }

    fn open_tab(&self, url: &str) -> BridgeResult<()> {
        self.record(HostEffect::Tab(url.to_string()));
        Ok(())
    }

    fn browser_info(&self) -> BridgeResult<BrowserInfo> {
        self.info
            .clone()
            .ok_or(BridgeError::Unavailable("browser info"))
    }
}
