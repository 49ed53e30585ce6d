//! Shell context, dispatch and error plumbing for the booking shell.

use std::io;

use dialoguer::theme::ColorfulTheme;
use rustyline::error::ReadlineError;
use strsim::levenshtein;
use tracing::debug;

use crate::booking::{BookingConfirmation, BookingWizard};
use crate::catalog::Catalog;
use crate::config::{Config, ConfigManager};
use crate::errors::BookingError;

use super::commands;
use super::host::{NavigationRequest, ShellNavigator};
use super::io as cli_io;
use super::output::{self, OutputPreferences};
use super::registry::{CommandEntry, CommandRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

/// Screen the shell is currently showing; drives the prompt and `back`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Home,
    Flights,
    Details(String),
    Booking,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("No booking in progress. Use `book <flight>` first.")]
    NoActiveBooking,
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Booking(#[from] BookingError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Booking(#[from] BookingError),
    #[error("Input error: {0}")]
    Input(String),
    #[error("{0}")]
    Command(String),
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Booking(BookingError::Io(err))
    }
}

impl From<ReadlineError> for CliError {
    fn from(err: ReadlineError) -> Self {
        CliError::Input(err.to_string())
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Booking(inner) => CliError::Booking(inner),
            other => CliError::Command(other.to_string()),
        }
    }
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub catalog: Catalog,
    pub screen: Screen,
    pub wizard: Option<BookingWizard>,
    /// Flight the active booking was started from, for `back` on step one.
    pub booking_origin: Option<String>,
    pub last_confirmation: Option<BookingConfirmation>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        Self::with_config_manager(mode, config_manager)
    }

    pub fn with_config_manager(
        mode: CliMode,
        config_manager: ConfigManager,
    ) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config = config_manager.load()?;
        let context = ShellContext {
            mode,
            registry,
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            catalog: Catalog::demo(),
            screen: Screen::Home,
            wizard: None,
            booking_origin: None,
            last_confirmation: None,
            running: true,
        };
        context.apply_output_preferences();
        Ok(context)
    }

    pub(crate) fn apply_output_preferences(&self) {
        let prefs = OutputPreferences::from_config(&self.config);
        if prefs.color_enabled && !prefs.screen_reader_mode {
            colored::control::unset_override();
        } else {
            colored::control::set_override(false);
        }
        output::set_preferences(prefs);
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn command_names(&self) -> Vec<String> {
        self.registry.names().map(str::to_string).collect()
    }

    pub(crate) fn prompt(&self) -> String {
        match (&self.screen, &self.wizard) {
            (Screen::Booking, Some(wizard)) => {
                format!("booking [{}]> ", wizard.step().label().to_lowercase())
            }
            (Screen::Details(id), _) => format!("flight {id}> "),
            (Screen::Flights, _) => "flights> ".to_string(),
            _ => "flight-booking> ".to_string(),
        }
    }

    pub(crate) fn wizard_mut(&mut self) -> Result<&mut BookingWizard, CommandError> {
        self.wizard.as_mut().ok_or(CommandError::NoActiveBooking)
    }

    /// Applies the screen changes the wizard requested through its navigator.
    pub(crate) fn apply_navigation(&mut self, navigator: ShellNavigator) {
        for request in navigator.into_requests() {
            debug!(?request, "navigation requested");
            match request {
                NavigationRequest::Back => {
                    self.wizard = None;
                    self.screen = match self.booking_origin.take() {
                        Some(id) => Screen::Details(id),
                        None => Screen::Flights,
                    };
                }
                NavigationRequest::Home => {
                    if let Some(wizard) = self.wizard.take() {
                        self.last_confirmation = wizard.confirmation().cloned();
                    }
                    self.booking_origin = None;
                    self.screen = Screen::Home;
                }
            }
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::info(format!("Suggestion: `{}`?", name));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        let prompt = if self.wizard.is_some() {
            "A booking is in progress. Exit anyway?"
        } else {
            "Exit shell?"
        };
        cli_io::confirm_action(&self.theme, prompt, false).map_err(CliError::from)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::NoActiveBooking => {
                output::error(CommandError::NoActiveBooking);
                output::hint("Try `flights` to browse, then `book 1` to get started.");
                Ok(())
            }
            CommandError::Io(err) => Err(CliError::from(err)),
            other => {
                output::error(other);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::WizardStep;
    use crate::cli::shell::handle_line;
    use tempfile::TempDir;

    fn context() -> (TempDir, ShellContext) {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let context = ShellContext::with_config_manager(CliMode::Script, manager).unwrap();
        (dir, context)
    }

    #[test]
    fn booking_commands_drive_the_wizard() {
        let (_dir, mut context) = context();
        handle_line(&mut context, "book 1 2A").unwrap();
        assert_eq!(context.screen, Screen::Booking);
        for line in [
            "set firstName John",
            "set lastName Doe",
            "set email john@example.com",
            "set phone 5551234567",
            "set dateOfBirth 12151990",
            "next",
        ] {
            handle_line(&mut context, line).unwrap();
        }
        assert_eq!(context.wizard.as_ref().unwrap().step(), WizardStep::Payment);
        assert_eq!(
            context.wizard.as_ref().unwrap().form().passenger.date_of_birth,
            "12/15/1990"
        );
    }

    #[test]
    fn blocked_step_keeps_the_wizard_in_place() {
        let (_dir, mut context) = context();
        handle_line(&mut context, "book 1").unwrap();
        handle_line(&mut context, "next").unwrap();
        assert_eq!(context.wizard.as_ref().unwrap().step(), WizardStep::Passenger);
    }

    #[test]
    fn back_from_first_step_returns_to_details() {
        let (_dir, mut context) = context();
        handle_line(&mut context, "book 3").unwrap();
        handle_line(&mut context, "back").unwrap();
        assert!(context.wizard.is_none());
        assert_eq!(context.screen, Screen::Details("3".into()));
    }

    #[test]
    fn unknown_commands_do_not_fail() {
        let (_dir, mut context) = context();
        let control = handle_line(&mut context, "flihgts").unwrap();
        assert_eq!(control, LoopControl::Continue);
    }

    #[test]
    fn exit_stops_the_loop() {
        let (_dir, mut context) = context();
        assert_eq!(handle_line(&mut context, "exit").unwrap(), LoopControl::Exit);
    }

    #[test]
    fn set_without_booking_reports_missing_wizard() {
        let (_dir, mut context) = context();
        let err = handle_line(&mut context, "set email a@b.co").unwrap_err();
        assert!(matches!(err, CommandError::NoActiveBooking));
    }
}
