//! Shell-side implementations of the wizard's notifier and navigator.

use dialoguer::theme::ColorfulTheme;
use tracing::warn;

use crate::booking::wizard::ERROR_TITLE;
use crate::booking::{BlockingMessage, Navigator, Notifier};
use crate::cli::core::CliMode;
use crate::cli::io as cli_io;
use crate::cli::output;

/// Prints blocking messages as a framed block. Interactive sessions wait for
/// Enter before control returns to the wizard.
pub(crate) struct ShellNotifier<'a> {
    mode: CliMode,
    theme: &'a ColorfulTheme,
}

impl<'a> ShellNotifier<'a> {
    pub(crate) fn new(mode: CliMode, theme: &'a ColorfulTheme) -> Self {
        Self { mode, theme }
    }
}

impl Notifier for ShellNotifier<'_> {
    fn show_blocking_message(&mut self, message: &BlockingMessage) {
        output::section(&message.title);
        for line in message.body.lines() {
            if message.title == ERROR_TITLE {
                output::error(line);
            } else {
                output::info(line);
            }
        }
        if self.mode == CliMode::Interactive {
            if let Err(err) = cli_io::wait_for_enter(self.theme) {
                warn!(%err, "could not wait for acknowledgement");
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NavigationRequest {
    Back,
    Home,
}

/// Records navigation requests; the shell applies them once the wizard call
/// has returned.
#[derive(Debug, Default)]
pub(crate) struct ShellNavigator {
    requests: Vec<NavigationRequest>,
}

impl ShellNavigator {
    pub(crate) fn into_requests(self) -> Vec<NavigationRequest> {
        self.requests
    }
}

impl Navigator for ShellNavigator {
    fn go_back(&mut self) {
        self.requests.push(NavigationRequest::Back);
    }

    fn go_to_home(&mut self) {
        self.requests.push(NavigationRequest::Home);
    }
}
