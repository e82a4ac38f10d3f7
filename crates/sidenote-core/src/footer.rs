//! Footer component: status machine, menu and host actions wired together.

use std::fmt::Display;
use std::time::Instant;

use chrono::{DateTime, TimeZone};

use crate::bridge::{send_or_log, HostBridge, OutboundRequest};
use crate::config::FooterConfig;
use crate::event::SyncEvent;
use crate::export::html_export_download;
use crate::i18n::Catalog;
use crate::machine::StatusStateMachine;
use crate::menu::{Key, MenuAction, MenuFocusController};
use crate::session::SyncSession;
use crate::view::FooterView;

/// The sidebar footer.
///
/// Hosts feed it inbound messages and user input, then render
/// [`Footer::render`] after every step.
#[derive(Debug)]
pub struct Footer<B: HostBridge> {
    machine: StatusStateMachine<B>,
    menu: MenuFocusController,
    config: FooterConfig,
    catalog: Catalog,
}

impl<B: HostBridge> Footer<B> {
    /// Create the footer, resuming authentication from stored credentials.
    pub fn mount(bridge: B, config: FooterConfig, catalog: Catalog) -> Self {
        let authenticated = bridge.has_stored_credentials().unwrap_or_else(|error| {
            tracing::warn!("Failed to read stored credentials: {}", error);
            false
        });
        tracing::debug!("Mounting footer (authenticated: {})", authenticated);

        let mut machine = StatusStateMachine::new(bridge, SyncSession::new(authenticated))
            .with_verification_timeout(config.verification_timeout());
        machine.resolve_idle_status();

        let mut footer = Self {
            machine,
            menu: MenuFocusController::default(),
            config,
            catalog,
        };
        footer.sync_menu();
        footer
    }

    /// Tear down the footer, cancelling timers and listeners.
    pub fn unmount(mut self) -> B {
        if self.menu.close() {
            tracing::debug!("Removed outside-click listener on unmount");
        }
        self.machine.into_bridge()
    }

    #[must_use]
    pub const fn machine(&self) -> &StatusStateMachine<B> {
        &self.machine
    }

    #[must_use]
    pub const fn session(&self) -> &SyncSession {
        self.machine.session()
    }

    #[must_use]
    pub const fn menu(&self) -> &MenuFocusController {
        &self.menu
    }

    #[must_use]
    pub const fn config(&self) -> &FooterConfig {
        &self.config
    }

    /// Nearest deadline the driver must wake up for.
    #[must_use]
    pub const fn next_deadline(&self) -> Option<Instant> {
        self.machine.verification_deadline()
    }

    pub fn handle_message(&mut self, message: &serde_json::Value) {
        self.machine.handle_message(message);
        self.sync_menu();
    }

    pub fn handle_event(&mut self, event: SyncEvent) {
        self.machine.handle_event(event);
        self.sync_menu();
    }

    pub fn fire_due_timers(&mut self, now: Instant) -> bool {
        let fired = self.machine.fire_due_timers(now);
        if fired {
            self.sync_menu();
        }
        fired
    }

    /// Click on the sync button or sign-in banner.
    pub fn click_sync(&mut self, now: Instant) {
        self.machine.trigger_sync_action(now);
        self.sync_menu();
    }

    /// Click on the menu button.
    pub fn toggle_menu(&mut self) {
        if !self.menu_visible() {
            return;
        }
        self.menu.toggle();
    }

    /// The click that triggered the last input finished propagating.
    pub fn finish_click_dispatch(&mut self) -> bool {
        self.menu.arm_pending_listener()
    }

    /// Click anywhere outside the menu.
    pub fn outside_click(&mut self) -> bool {
        self.menu.on_outside_click()
    }

    /// Key press on the menu button or one of its items.
    pub fn handle_key(&mut self, key: &Key) -> Option<usize> {
        if !self.menu_visible() {
            return None;
        }
        self.menu.handle_key(key)
    }

    #[must_use]
    pub fn menu_actions(&self) -> Vec<MenuAction> {
        MenuAction::for_session(self.session().is_authenticated())
    }

    #[must_use]
    pub fn focused_action(&self) -> Option<MenuAction> {
        let index = self.menu.focused_index()?;
        self.menu_actions().get(index).copied()
    }

    /// Run the keyboard-focused menu item, if any.
    pub fn activate_focused(&mut self) -> Option<MenuAction> {
        if !self.menu_visible() {
            return None;
        }
        let action = self.focused_action()?;
        self.select(action);
        Some(action)
    }

    /// Run a menu action and close the menu.
    ///
    /// Ignored while the menu is hidden.
    pub fn select(&mut self, action: MenuAction) {
        if !self.menu_visible() {
            tracing::debug!("Ignoring {:?} while the menu is hidden", action);
            return;
        }
        match action {
            MenuAction::CancelSetup | MenuAction::DisableSync => {
                self.machine.disconnect(&self.config.notes_extension_id);
            }
            MenuAction::ExportHtml => self.export_as_html(),
            MenuAction::GiveFeedback => self.give_feedback(),
        }
        self.menu.close();
    }

    /// Download the current content as an HTML document.
    pub fn export_as_html(&self) {
        tracing::info!("Exporting notes as {}", self.config.export_file_name);
        let download =
            html_export_download(self.session().content(), &self.config.export_file_name);
        if let Err(error) = self.machine.bridge().download(download) {
            tracing::warn!("Failed to export notes: {}", error);
        }
        send_or_log(self.machine.bridge(), OutboundRequest::MetricsExportHtml);
    }

    /// Open the feedback survey in a new tab.
    pub fn give_feedback(&self) {
        let url = self.survey_url();
        tracing::info!("Opening feedback survey");
        if let Err(error) = self.machine.bridge().open_tab(&url) {
            tracing::warn!("Failed to open feedback survey: {}", error);
        }
    }

    /// Survey URL tagged with the extension and browser versions.
    #[must_use]
    pub fn survey_url(&self) -> String {
        let base = &self.config.survey_url;
        match self.machine.bridge().browser_info() {
            Ok(info) => {
                let separator = if base.contains('?') { '&' } else { '?' };
                format!(
                    "{base}{separator}ver={}&release={}",
                    info.extension_version, info.browser_version
                )
            }
            Err(error) => {
                tracing::debug!("Browser info unavailable: {}", error);
                base.clone()
            }
        }
    }

    pub fn render<Tz>(&self, now: &DateTime<Tz>) -> Option<FooterView>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        FooterView::derive(self.session(), &self.menu, &self.catalog, now)
    }

    fn menu_visible(&self) -> bool {
        !self.machine.descriptor().sign_in
    }

    // The menu is not rendered in sign-in states, so it cannot stay open there.
    fn sync_menu(&mut self) {
        self.menu.set_item_count(self.menu_actions().len());
        if !self.menu_visible() && self.menu.is_open() && self.menu.close() {
            tracing::debug!("Removed outside-click listener for hidden menu");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::bridge::testing::RecordingBridge;
    use crate::bridge::BrowserInfo;
    use crate::status::Status;
    use crate::view::FooterBody;

    fn mount(bridge: RecordingBridge) -> Footer<RecordingBridge> {
        let mut footer = Footer::mount(bridge, FooterConfig::default(), Catalog::english());
        footer.handle_message(&json!({ "action": "kinto-loaded", "data": "<p>my notes</p>" }));
        footer
    }

    #[test]
    fn mount_resumes_from_stored_credentials() {
        let footer = Footer::mount(
            RecordingBridge::signed_in(),
            FooterConfig::default(),
            Catalog::english(),
        );
        assert!(footer.session().is_authenticated());
        assert_eq!(footer.session().status(), Status::Synced);
        assert_eq!(footer.machine().bridge().credential_checks.get(), 1);
        assert!(footer.render(&Utc::now()).is_none());
    }

    #[test]
    fn mount_without_credentials_is_signed_out() {
        let footer = mount(RecordingBridge::default());
        assert_eq!(footer.session().status(), Status::SignedOut);
        let view = footer.render(&Utc::now()).unwrap();
        assert!(matches!(view.body, FooterBody::Banner { .. }));
    }

    #[test]
    fn verification_timeout_comes_from_config() {
        let config = FooterConfig {
            verification_timeout_ms: 250,
            ..FooterConfig::default()
        };
        let mut footer = Footer::mount(RecordingBridge::default(), config, Catalog::english());
        let now = Instant::now();
        footer.click_sync(now);
        assert_eq!(footer.next_deadline(), Some(now + Duration::from_millis(250)));

        assert!(footer.fire_due_timers(now + Duration::from_millis(250)));
        assert_eq!(footer.session().status(), Status::AwaitingVerification);
    }

    #[test]
    fn keyboard_selects_menu_items() {
        let mut footer = mount(RecordingBridge::signed_in());
        footer.toggle_menu();
        assert!(footer.finish_click_dispatch());

        assert_eq!(footer.handle_key(&Key::ArrowDown), Some(0));
        assert_eq!(footer.focused_action(), Some(MenuAction::DisableSync));
        assert_eq!(footer.handle_key(&Key::ArrowUp), Some(2));
        assert_eq!(footer.focused_action(), Some(MenuAction::GiveFeedback));
    }

    #[test]
    fn disable_sync_round_trips() {
        let mut footer = mount(RecordingBridge::signed_in());
        footer.toggle_menu();
        footer.finish_click_dispatch();
        footer.handle_key(&Key::ArrowDown);

        assert_eq!(footer.activate_focused(), Some(MenuAction::DisableSync));
        assert!(!footer.menu().is_open());
        assert!(footer.session().is_authenticated());
        assert_eq!(
            footer.machine().bridge().external.borrow()[0],
            ("notes@mozilla.com".to_string(), OutboundRequest::Disconnected)
        );

        footer.handle_message(&json!({ "action": "disconnected" }));
        assert_eq!(footer.session().status(), Status::SignedOut);
    }

    #[test]
    fn cancel_setup_while_opening_login() {
        let mut footer = mount(RecordingBridge::default());
        let now = Instant::now();
        footer.click_sync(now);
        assert_eq!(footer.session().status(), Status::OpeningLogin);

        footer.toggle_menu();
        footer.select(MenuAction::CancelSetup);
        footer.handle_event(SyncEvent::Disconnected);

        assert_eq!(footer.session().status(), Status::SignedOut);
        assert_eq!(footer.next_deadline(), None);
    }

    #[test]
    fn export_downloads_html_and_reports_metrics() {
        let mut footer = mount(RecordingBridge::signed_in());
        footer.machine().bridge().clear();
        footer.select(MenuAction::ExportHtml);

        let downloads = footer.machine().bridge().downloads.borrow().clone();
        assert_eq!(downloads.len(), 1);
        assert_eq!(downloads[0].file_name, "notes.html");
        assert!(downloads[0].body.contains("<body><p>my notes</p></body>"));
        assert_eq!(
            footer.machine().bridge().sent(),
            vec![OutboundRequest::MetricsExportHtml]
        );
    }

    #[test]
    fn feedback_opens_versioned_survey() {
        let bridge = RecordingBridge {
            credentials: true,
            info: Some(BrowserInfo {
                extension_version: "4.1.0".to_string(),
                browser_version: "62.0".to_string(),
            }),
            ..RecordingBridge::default()
        };
        let mut footer = mount(bridge);
        footer.select(MenuAction::GiveFeedback);

        assert_eq!(
            footer.machine().bridge().tabs.borrow().clone(),
            vec!["https://qsurvey.mozilla.com/s3/notes?ref=sidebar&ver=4.1.0&release=62.0".to_string()]
        );
    }

    #[test]
    fn feedback_falls_back_to_plain_survey_url() {
        let footer = mount(RecordingBridge::signed_in());
        assert_eq!(
            footer.survey_url(),
            "https://qsurvey.mozilla.com/s3/notes?ref=sidebar"
        );
    }

    #[test]
    fn menu_closes_when_footer_returns_to_sign_in() {
        let mut footer = mount(RecordingBridge::signed_in());
        footer.toggle_menu();
        footer.finish_click_dispatch();
        assert!(footer.menu().is_open());

        footer.handle_event(SyncEvent::Disconnected);
        assert!(!footer.menu().is_open());
        assert_eq!(footer.render(&Utc::now()).unwrap().menu, None);
    }

    #[test]
    fn menu_cannot_open_in_sign_in_state() {
        let mut footer = mount(RecordingBridge::default());
        footer.toggle_menu();
        assert!(!footer.menu().is_open());
    }

    #[test]
    fn hidden_menu_ignores_keys_and_actions() {
        let mut footer = mount(RecordingBridge::default());
        assert!(footer.render(&Utc::now()).unwrap().menu.is_none());

        assert_eq!(footer.handle_key(&Key::ArrowDown), None);
        assert_eq!(footer.menu().focused_index(), None);
        assert_eq!(footer.activate_focused(), None);

        footer.select(MenuAction::CancelSetup);
        footer.select(MenuAction::ExportHtml);
        footer.select(MenuAction::GiveFeedback);

        let bridge = footer.machine().bridge();
        assert!(bridge.external.borrow().is_empty());
        assert!(bridge.downloads.borrow().is_empty());
        assert!(bridge.tabs.borrow().is_empty());
        assert!(bridge.sent().is_empty());
    }

    #[test]
    fn outside_click_closes_menu_after_dispatch() {
        let mut footer = mount(RecordingBridge::signed_in());
        footer.toggle_menu();
        assert!(!footer.outside_click());
        footer.finish_click_dispatch();
        assert!(footer.outside_click());
        assert!(!footer.menu().is_open());
    }

    #[test]
    fn unmount_cancels_pending_timer() {
        let mut footer = mount(RecordingBridge::default());
        footer.click_sync(Instant::now());
        assert!(footer.next_deadline().is_some());

        let bridge = footer.unmount();
        assert_eq!(bridge.sent(), vec![OutboundRequest::Authenticate]);
    }
}
