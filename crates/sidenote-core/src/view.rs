//! Render model derived from the footer state.
//!
//! The host UI layer turns a [`FooterView`] into markup; nothing here touches
//! a DOM.

use std::fmt::Display;

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::i18n::{format_footer_time, Catalog};
use crate::menu::{MenuAction, MenuFocusController};
use crate::session::SyncSession;
use crate::status::{Status, TemplateId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Sync,
    Warning,
}

/// Main area of the footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FooterBody {
    /// Full-width button used for sign-in and warnings.
    Banner {
        icon: Icon,
        text: String,
        tooltip: String,
    },
    /// Sync button with account and status lines.
    Panel {
        sync_enabled: bool,
        account: String,
        text: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItemView {
    pub action: MenuAction,
    pub label: String,
    pub focused: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuView {
    pub open: bool,
    pub items: Vec<MenuItemView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FooterView {
    pub status: Status,
    /// `warning` footer class.
    pub warning: bool,
    /// `animateSyncIcon` footer class.
    pub animate_sync_icon: bool,
    pub body: FooterBody,
    pub menu: Option<MenuView>,
}

impl FooterView {
    /// Derive the view; `None` until the host has loaded content.
    pub fn derive<Tz>(
        session: &SyncSession,
        menu: &MenuFocusController,
        catalog: &Catalog,
        now: &DateTime<Tz>,
    ) -> Option<Self>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        if !session.is_loaded() {
            return None;
        }

        let descriptor = session.descriptor();
        let text = status_text(session, catalog, now);
        let tooltip = descriptor
            .tooltip_key
            .map(|key| tooltip_text(key, session, catalog))
            .unwrap_or_default();

        let body = if descriptor.sign_in || descriptor.warn {
            FooterBody::Banner {
                icon: if descriptor.warn {
                    Icon::Warning
                } else {
                    Icon::Sync
                },
                text,
                tooltip,
            }
        } else {
            FooterBody::Panel {
                sync_enabled: descriptor.clickable,
                account: catalog.message(
                    TemplateId::SyncToMail,
                    &[session.email().unwrap_or_default()],
                ),
                text,
            }
        };

        let menu_view = (!descriptor.sign_in).then(|| MenuView {
            open: menu.is_open(),
            items: MenuAction::for_session(session.is_authenticated())
                .into_iter()
                .enumerate()
                .map(|(index, action)| MenuItemView {
                    action,
                    label: catalog.message(action.label_key(), &[]),
                    focused: menu.focused_index() == Some(index),
                })
                .collect(),
        });

        Some(Self {
            status: session.status(),
            warning: descriptor.warn,
            animate_sync_icon: descriptor.animate,
            body,
            menu: menu_view,
        })
    }

    /// Space separated footer classes.
    #[must_use]
    pub fn class_names(&self) -> String {
        let mut classes = Vec::new();
        if self.warning {
            classes.push("warning");
        }
        if self.animate_sync_icon {
            classes.push("animateSyncIcon");
        }
        classes.join(" ")
    }
}

fn status_text<Tz>(session: &SyncSession, catalog: &Catalog, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let key = session.descriptor().text_key;
    match key {
        TemplateId::SyncComplete | TemplateId::SavedComplete => {
            let time = format_footer_time(session.last_modified(), now);
            catalog.message(key, &[time.as_str()])
        }
        _ => catalog.message(key, &[]),
    }
}

fn tooltip_text(key: TemplateId, session: &SyncSession, catalog: &Catalog) -> String {
    match key {
        TemplateId::SyncToMail => session
            .email()
            .map(|email| catalog.message(key, &[email]))
            .unwrap_or_default(),
        _ => catalog.message(key, &[]),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    use super::*;

    fn loaded_session(status: Status, authenticated: bool, email: Option<&str>) -> SyncSession {
        let mut session = SyncSession::new(authenticated);
        session.status = status;
        session.email = email.map(ToString::to_string);
        session.loaded = true;
        session.last_modified = Utc::now().timestamp_millis();
        session
    }

    fn derive(session: &SyncSession, menu: &MenuFocusController) -> Option<FooterView> {
        FooterView::derive(session, menu, &Catalog::english(), &Utc::now())
    }

    #[test]
    fn nothing_renders_before_load() {
        let session = SyncSession::new(false);
        assert_eq!(derive(&session, &MenuFocusController::new(3)), None);
    }

    #[test]
    fn signed_out_renders_sign_in_banner_without_menu() {
        let session = loaded_session(Status::SignedOut, false, None);
        let view = derive(&session, &MenuFocusController::new(3)).unwrap();

        assert_eq!(
            view.body,
            FooterBody::Banner {
                icon: Icon::Sync,
                text: "Sign in to Sync".to_string(),
                tooltip: "Sync your notes to other devices".to_string(),
            }
        );
        assert_eq!(view.menu, None);
        assert_eq!(view.class_names(), "");
    }

    #[test]
    fn reconnect_renders_warning_banner_with_menu() {
        let session = loaded_session(Status::ReconnectRequired, true, Some("a@b.com"));
        let view = derive(&session, &MenuFocusController::new(3)).unwrap();

        assert!(matches!(
            view.body,
            FooterBody::Banner {
                icon: Icon::Warning,
                ..
            }
        ));
        assert!(view.warning);
        assert_eq!(view.class_names(), "warning");
        let menu = view.menu.unwrap();
        assert_eq!(menu.items[0].action, MenuAction::DisableSync);
    }

    #[test]
    fn syncing_renders_disabled_panel() {
        let session = loaded_session(Status::Syncing, true, Some("a@b.com"));
        let view = derive(&session, &MenuFocusController::new(3)).unwrap();

        assert_eq!(
            view.body,
            FooterBody::Panel {
                sync_enabled: false,
                account: "Syncing to a@b.com".to_string(),
                text: "Syncing\u{2026}".to_string(),
            }
        );
        assert_eq!(view.class_names(), "animateSyncIcon");
    }

    #[test]
    fn synced_text_includes_time() {
        let session = loaded_session(Status::Synced, true, None);
        let view = derive(&session, &MenuFocusController::new(3)).unwrap();
        let FooterBody::Panel {
            sync_enabled, text, ..
        } = view.body
        else {
            panic!("expected panel");
        };
        assert!(sync_enabled);
        assert!(text.starts_with("Synced at "));
        assert!(text.len() > "Synced at ".len());
    }

    #[test]
    fn saved_renders_banner_with_saved_text() {
        let session = loaded_session(Status::Saved, false, None);
        let view = derive(&session, &MenuFocusController::new(3)).unwrap();
        let FooterBody::Banner { text, .. } = view.body else {
            panic!("expected banner");
        };
        assert!(text.starts_with("Saved at "));
    }

    #[test]
    fn menu_reflects_open_state_and_focus() {
        let session = loaded_session(Status::OpeningLogin, false, None);
        let mut menu = MenuFocusController::new(3);
        menu.open();
        menu.on_arrow_up();

        let view = derive(&session, &menu).unwrap().menu.unwrap();
        assert!(view.open);
        assert_eq!(
            view.items
                .iter()
                .map(|item| (item.action, item.focused))
                .collect::<Vec<_>>(),
            vec![
                (MenuAction::CancelSetup, false),
                (MenuAction::ExportHtml, false),
                (MenuAction::GiveFeedback, true),
            ]
        );
        assert_eq!(view.items[0].label, "Cancel setup");
    }
}
