//! Footer sync status and its static descriptor table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Named footer status.
///
/// Every status owns exactly one [`Descriptor`] in a static table; the render
/// model and the state machine only ever read flags through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    /// Not signed in; the footer offers the sign-in banner.
    SignedOut,
    /// Login window requested, waiting for the host to authenticate.
    OpeningLogin,
    /// Login took too long; asks the user to finish verification.
    AwaitingVerification,
    /// The host lost the sync connection and needs a reconnect.
    ReconnectRequired,
    /// A sync round is in flight.
    Syncing,
    /// Idle and authenticated.
    Synced,
    /// Local save confirmation while signed out.
    Saved,
}

impl Status {
    /// Every status, in descriptor table order.
    pub const ALL: [Self; 7] = [
        Self::SignedOut,
        Self::OpeningLogin,
        Self::AwaitingVerification,
        Self::ReconnectRequired,
        Self::Syncing,
        Self::Synced,
        Self::Saved,
    ];

    /// Static descriptor for this status.
    #[must_use]
    pub fn descriptor(self) -> &'static Descriptor {
        &DESCRIPTORS[self as usize]
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SignedOut => "signed-out",
            Self::OpeningLogin => "opening-login",
            Self::AwaitingVerification => "awaiting-verification",
            Self::ReconnectRequired => "reconnect-required",
            Self::Syncing => "syncing",
            Self::Synced => "synced",
            Self::Saved => "saved",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message catalog keys used by the footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplateId {
    SignInToSync,
    SyncNotes,
    OpeningLoginWindow,
    PleaseLogin,
    ReconnectSync,
    SyncProgress,
    /// Takes the account email.
    SyncToMail,
    /// Takes the formatted sync time.
    SyncComplete,
    /// Takes the formatted save time.
    SavedComplete,
    CancelSetup,
    DisableSync,
    ExportAsHtml,
    Feedback,
}

impl TemplateId {
    /// Key of this template in a WebExtension `messages.json` catalog.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::SignInToSync => "signInToSync",
            Self::SyncNotes => "syncNotes",
            Self::OpeningLoginWindow => "openingLoginWindow",
            Self::PleaseLogin => "pleaseLogin",
            Self::ReconnectSync => "reconnectSync",
            Self::SyncProgress => "syncProgress",
            Self::SyncToMail => "syncToMail",
            Self::SyncComplete => "syncComplete2",
            Self::SavedComplete => "savedComplete2",
            Self::CancelSetup => "cancelSetup",
            Self::DisableSync => "disableSync",
            Self::ExportAsHtml => "exportAsHTML",
            Self::Feedback => "feedback",
        }
    }
}

/// Display and behavior flags attached to a [`Status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Descriptor {
    /// The sync button reacts to clicks.
    pub clickable: bool,
    /// The pending login can be cancelled from the menu.
    pub cancellable: bool,
    /// The sync icon spins.
    pub animate: bool,
    /// The footer uses the warning background.
    pub warn: bool,
    /// Idle recomputation must not overwrite this status.
    pub preserve: bool,
    /// Rendered as the full-width sign-in banner without a menu.
    pub sign_in: bool,
    pub text_key: TemplateId,
    pub tooltip_key: Option<TemplateId>,
}

impl Descriptor {
    const BASE: Self = Self {
        clickable: false,
        cancellable: false,
        animate: false,
        warn: false,
        preserve: false,
        sign_in: false,
        text_key: TemplateId::SignInToSync,
        tooltip_key: None,
    };
}

// Indexed by `Status as usize`; order must follow `Status::ALL`.
static DESCRIPTORS: [Descriptor; 7] = [
    Descriptor {
        clickable: true,
        sign_in: true,
        text_key: TemplateId::SignInToSync,
        tooltip_key: Some(TemplateId::SyncNotes),
        ..Descriptor::BASE
    },
    Descriptor {
        cancellable: true,
        animate: true,
        text_key: TemplateId::OpeningLoginWindow,
        ..Descriptor::BASE
    },
    Descriptor {
        warn: true,
        preserve: true,
        text_key: TemplateId::PleaseLogin,
        ..Descriptor::BASE
    },
    Descriptor {
        clickable: true,
        warn: true,
        text_key: TemplateId::ReconnectSync,
        ..Descriptor::BASE
    },
    Descriptor {
        animate: true,
        text_key: TemplateId::SyncProgress,
        tooltip_key: Some(TemplateId::SyncToMail),
        ..Descriptor::BASE
    },
    Descriptor {
        clickable: true,
        text_key: TemplateId::SyncComplete,
        tooltip_key: Some(TemplateId::SyncToMail),
        ..Descriptor::BASE
    },
    Descriptor {
        clickable: true,
        sign_in: true,
        text_key: TemplateId::SavedComplete,
        tooltip_key: Some(TemplateId::SyncNotes),
        ..Descriptor::BASE
    },
];
