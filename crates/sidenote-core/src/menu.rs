//! Footer dropdown menu: open/close lifecycle and roving keyboard focus.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::status::TemplateId;

/// Actions offered by the footer menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MenuAction {
    /// Abort a sign-in that has not completed yet.
    CancelSetup,
    DisableSync,
    ExportHtml,
    GiveFeedback,
}

impl MenuAction {
    #[must_use]
    pub const fn label_key(self) -> TemplateId {
        match self {
            Self::CancelSetup => TemplateId::CancelSetup,
            Self::DisableSync => TemplateId::DisableSync,
            Self::ExportHtml => TemplateId::ExportAsHtml,
            Self::GiveFeedback => TemplateId::Feedback,
        }
    }

    /// Menu entries for the current authentication state, in display order.
    #[must_use]
    pub fn for_session(authenticated: bool) -> Vec<Self> {
        let disconnect = if authenticated {
            Self::DisableSync
        } else {
            Self::CancelSetup
        };
        vec![disconnect, Self::ExportHtml, Self::GiveFeedback]
    }
}

/// Keyboard keys the menu reacts to, named after DOM `KeyboardEvent.key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    Escape,
    Other(String),
}

impl FromStr for Key {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            "Escape" | "Esc" => Self::Escape,
            other => Self::Other(other.to_string()),
        })
    }
}

/// Registration state of the window-level click listener that closes the
/// menu on a click outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutsideClickListener {
    #[default]
    None,
    /// Waiting for the opening click to finish propagating.
    Pending,
    /// Registered with fire-once semantics.
    Registered,
}

/// Open/closed state plus the index of the keyboard-focused item.
///
/// `focused_index` is always below `item_count`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuFocusController {
    open: bool,
    focused_index: Option<usize>,
    item_count: usize,
    listener: OutsideClickListener,
}

impl MenuFocusController {
    #[must_use]
    pub fn new(item_count: usize) -> Self {
        Self {
            item_count,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub const fn focused_index(&self) -> Option<usize> {
        self.focused_index
    }

    #[must_use]
    pub const fn item_count(&self) -> usize {
        self.item_count
    }

    #[must_use]
    pub const fn listener(&self) -> OutsideClickListener {
        self.listener
    }

    /// Update the number of items; drops a focus that fell out of range.
    pub fn set_item_count(&mut self, item_count: usize) {
        self.item_count = item_count;
        if self.focused_index.is_some_and(|index| index >= item_count) {
            self.focused_index = None;
        }
    }

    /// Open the menu. The outside-click listener stays pending until
    /// [`Self::arm_pending_listener`] runs after the opening click.
    pub fn open(&mut self) {
        self.open = true;
        self.focused_index = None;
        self.listener = OutsideClickListener::Pending;
    }

    /// Register the pending listener once the opening click has propagated.
    ///
    /// Returns `true` when the host must add a listener.
    pub fn arm_pending_listener(&mut self) -> bool {
        if self.open && self.listener == OutsideClickListener::Pending {
            self.listener = OutsideClickListener::Registered;
            true
        } else {
            false
        }
    }

    /// Close the menu.
    ///
    /// Returns `true` when a registered listener had to be removed; a second
    /// close returns `false`.
    pub fn close(&mut self) -> bool {
        self.open = false;
        self.focused_index = None;
        let registered = self.listener == OutsideClickListener::Registered;
        self.listener = OutsideClickListener::None;
        registered
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    /// A click landed outside the menu.
    ///
    /// Only a registered listener reacts; it fires once and closes the menu.
    /// Returns `true` when the menu was closed.
    pub fn on_outside_click(&mut self) -> bool {
        if self.listener != OutsideClickListener::Registered {
            return false;
        }
        // Fire-once listeners are dropped by the host after firing.
        self.listener = OutsideClickListener::None;
        self.open = false;
        self.focused_index = None;
        true
    }

    /// Move focus up, wrapping to the last item.
    pub fn on_arrow_up(&mut self) -> Option<usize> {
        if self.item_count == 0 {
            return None;
        }
        let index = match self.focused_index {
            None | Some(0) => self.item_count - 1,
            Some(index) => index - 1,
        };
        self.focused_index = Some(index);
        self.focused_index
    }

    /// Move focus down, wrapping to the first item.
    pub fn on_arrow_down(&mut self) -> Option<usize> {
        if self.item_count == 0 {
            return None;
        }
        let index = self
            .focused_index
            .map_or(0, |index| (index + 1) % self.item_count);
        self.focused_index = Some(index);
        self.focused_index
    }

    pub fn on_escape(&mut self) {
        if self.open {
            self.close();
        }
    }

    /// Dispatch a key press; returns the index to focus, if any.
    pub fn handle_key(&mut self, key: &Key) -> Option<usize> {
        match key {
            Key::ArrowUp => self.on_arrow_up(),
            Key::ArrowDown => self.on_arrow_down(),
            Key::Escape => {
                self.on_escape();
                None
            }
            Key::Other(_) => None,
        }
    }
}
