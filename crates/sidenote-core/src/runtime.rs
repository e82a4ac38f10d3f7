//! Async driver for a mounted [`Footer`].
//!
//! The footer itself is synchronous; this loop feeds it host input from a
//! channel and wakes up for the verification deadline. Everything runs on a
//! single task, so transitions never interleave.

use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant as TokioInstant};

use crate::bridge::HostBridge;
use crate::footer::Footer;
use crate::menu::{Key, MenuAction};
use crate::view::FooterView;

/// Input delivered to the footer by its host.
#[derive(Debug, Clone, PartialEq)]
pub enum FooterInput {
    /// Message record from the host messaging channel.
    Message(serde_json::Value),
    SyncClicked,
    MenuToggled,
    OutsideClick,
    Key(Key),
    Select(MenuAction),
    ActivateFocused,
}

pub struct FooterRuntime<B: HostBridge> {
    footer: Footer<B>,
}

impl<B: HostBridge> FooterRuntime<B> {
    pub const fn new(footer: Footer<B>) -> Self {
        Self { footer }
    }

    #[must_use]
    pub const fn footer(&self) -> &Footer<B> {
        &self.footer
    }

    /// Run until the input channel closes, calling `on_render` after the
    /// initial mount and after every processed input or timer.
    ///
    /// Returns the bridge once the footer has been unmounted.
    pub async fn run<F>(mut self, mut inputs: mpsc::Receiver<FooterInput>, mut on_render: F) -> B
    where
        F: FnMut(Option<&FooterView>),
    {
        self.render(&mut on_render);

        loop {
            let deadline = self.footer.next_deadline().map(TokioInstant::from_std);

            tokio::select! {
                input = inputs.recv() => {
                    let Some(input) = input else {
                        break;
                    };
                    self.apply(input);
                }
                () = sleep_until(deadline.unwrap_or_else(TokioInstant::now)), if deadline.is_some() => {
                    if !self.footer.fire_due_timers(TokioInstant::now().into_std()) {
                        continue;
                    }
                }
            }

            self.render(&mut on_render);
        }

        tracing::debug!("Footer input channel closed, unmounting");
        self.footer.unmount()
    }

    /// Apply one input synchronously.
    pub fn apply(&mut self, input: FooterInput) {
        let now = TokioInstant::now().into_std();
        match input {
            FooterInput::Message(message) => self.footer.handle_message(&message),
            FooterInput::SyncClicked => self.footer.click_sync(now),
            FooterInput::MenuToggled => {
                self.footer.toggle_menu();
                // The toggle click has finished propagating once we get here.
                self.footer.finish_click_dispatch();
            }
            FooterInput::OutsideClick => {
                self.footer.outside_click();
            }
            FooterInput::Key(key) => {
                self.footer.handle_key(&key);
            }
            FooterInput::Select(action) => self.footer.select(action),
            FooterInput::ActivateFocused => {
                self.footer.activate_focused();
            }
        }
    }

    fn render<F>(&self, on_render: &mut F)
    where
        F: FnMut(Option<&FooterView>),
    {
        let view = self.footer.render(&chrono::Local::now());
        on_render(view.as_ref());
    }
}
