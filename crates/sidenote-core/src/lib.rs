//! sidenote-core - Core library for the sidenote sync footer
//!
//! This crate contains the status state machine, the menu focus controller,
//! the host bridge seam and the render model used by every sidenote host
//! (browser sidebar, CLI replay).

pub mod bridge;
pub mod config;
pub mod error;
pub mod event;
pub mod export;
pub mod footer;
pub mod i18n;
pub mod machine;
pub mod menu;
pub mod runtime;
pub mod session;
pub mod status;
pub mod util;
pub mod view;

pub use bridge::{BridgeError, BridgeResult, HostBridge, OutboundRequest};
pub use config::FooterConfig;
pub use error::{Error, Result};
pub use event::SyncEvent;
pub use footer::Footer;
pub use i18n::Catalog;
pub use machine::StatusStateMachine;
pub use menu::{Key, MenuAction, MenuFocusController};
pub use runtime::{FooterInput, FooterRuntime};
pub use session::SyncSession;
pub use status::{Descriptor, Status, TemplateId};
pub use view::FooterView;
