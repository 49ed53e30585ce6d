use tracing::info;

use crate::booking::{BookingWizard, StepOutcome, WizardStep};
use crate::cli::core::{CliMode, CommandError, CommandResult, Screen, ShellContext};
use crate::cli::host::{ShellNavigator, ShellNotifier};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::render;
use crate::domain::{FormField, Section};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "book",
            "Start booking a flight, optionally with a seat",
            "book <id> [seat]",
            cmd_book,
        ),
        CommandEntry::new(
            "set",
            "Enter a value for a field on the current step",
            "set <field> <value>",
            cmd_set,
        ),
        CommandEntry::new(
            "fill",
            "Prompt for every field on the current step",
            "fill",
            cmd_fill,
        ),
        CommandEntry::new(
            "next",
            "Validate the current step and continue, or confirm the booking",
            "next",
            cmd_next,
        ),
        CommandEntry::new(
            "back",
            "Return to the previous step, or leave the booking from step one",
            "back",
            cmd_back,
        ),
        CommandEntry::new(
            "exit-booking",
            "Abandon the booking in progress",
            "exit-booking",
            cmd_exit_booking,
        ),
        CommandEntry::new(
            "show",
            "Show the current booking step or the last confirmation",
            "show",
            cmd_show,
        ),
    ]
}

fn editable_section(step: WizardStep) -> Option<Section> {
    match step {
        WizardStep::Passenger => Some(Section::Passenger),
        WizardStep::Payment => Some(Section::Payment),
        WizardStep::Confirm => None,
    }
}

fn cmd_book(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(id) = args.first() else {
        return Err(CommandError::InvalidArguments(
            "usage: book <id> [seat]".into(),
        ));
    };
    if context.wizard.is_some() {
        return Err(CommandError::InvalidArguments(
            "A booking is already in progress. Use `exit-booking` to abandon it first.".into(),
        ));
    }

    let snapshot = context.catalog.snapshot(id, args.get(1).copied())?;
    let flight_id = context.catalog.get(id)?.id.clone();
    info!(flight = %snapshot.flight_number, seat = snapshot.seat_label(), "booking started");

    let wizard = BookingWizard::new(snapshot);
    render::print_wizard(&wizard, &context.config.currency);
    context.wizard = Some(wizard);
    context.booking_origin = Some(flight_id);
    context.screen = Screen::Booking;
    Ok(())
}

fn cmd_set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 2 {
        return Err(CommandError::InvalidArguments(
            "usage: set <field> <value>".into(),
        ));
    }
    let field: FormField = args[0].parse()?;
    let value = args[1..].join(" ");

    let wizard = context.wizard_mut()?;
    match editable_section(wizard.step()) {
        Some(section) if section == field.section() => {}
        Some(section) => {
            return Err(CommandError::InvalidArguments(format!(
                "{} is not on this step. Fields here: {}",
                field.label(),
                section_keys(section)
            )))
        }
        None => {
            return Err(CommandError::InvalidArguments(
                "Nothing to edit on the confirm step. Use `back` to make changes.".into(),
            ))
        }
    }

    wizard.update_field(field, &value);
    let stored = wizard.form().value(field);
    if field.is_secret() {
        output::success(format!("{} updated", field.label()));
    } else {
        output::success(format!("{}: {}", field.label(), stored));
    }
    Ok(())
}

fn section_keys(section: Section) -> String {
    FormField::all()
        .filter(|field| field.section() == section)
        .map(|field| field.key())
        .collect::<Vec<_>>()
        .join(", ")
}

fn cmd_fill(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.mode != CliMode::Interactive {
        return Err(CommandError::InvalidArguments(
            "`fill` needs an interactive terminal. Use `set <field> <value>` instead.".into(),
        ));
    }
    let theme = &context.theme;
    let wizard = context.wizard.as_mut().ok_or(CommandError::NoActiveBooking)?;
    let Some(section) = editable_section(wizard.step()) else {
        return Err(CommandError::InvalidArguments(
            "Nothing to edit on the confirm step. Use `back` to make changes.".into(),
        ));
    };

    for field in FormField::all().filter(|field| field.section() == section) {
        let prompt = format!("{} ({})", field.label(), field.placeholder());
        let value = if field.is_secret() {
            io::prompt_secret(theme, &prompt)?
        } else {
            io::prompt_text(theme, &prompt, wizard.form().value(field))?
        };
        wizard.update_field(field, &value);
    }
    render::print_wizard(wizard, &context.config.currency);
    Ok(())
}

fn cmd_next(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let mut notifier = ShellNotifier::new(context.mode, &context.theme);
    let mut navigator = ShellNavigator::default();
    let wizard = context.wizard.as_mut().ok_or(CommandError::NoActiveBooking)?;
    let outcome = wizard.advance(&mut notifier, &mut navigator);

    match &outcome {
        StepOutcome::Moved { .. } => render::print_wizard(wizard, &context.config.currency),
        StepOutcome::Confirmed(confirmation) => render::print_lines(
            "Receipt",
            render::confirmation_lines(confirmation, &context.config.currency),
        ),
        StepOutcome::Blocked(_) | StepOutcome::Unchanged => {}
    }
    context.apply_navigation(navigator);
    Ok(())
}

fn cmd_back(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let wizard = context.wizard.as_mut().ok_or(CommandError::NoActiveBooking)?;
    if wizard.step() == WizardStep::FIRST {
        return leave_booking(context);
    }
    if let StepOutcome::Moved { .. } = wizard.retreat() {
        render::print_wizard(wizard, &context.config.currency);
    }
    Ok(())
}

fn cmd_exit_booking(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    leave_booking(context)
}

fn leave_booking(context: &mut ShellContext) -> CommandResult {
    let wizard = context.wizard.take().ok_or(CommandError::NoActiveBooking)?;
    let mut navigator = ShellNavigator::default();
    wizard.exit(&mut navigator);
    context.apply_navigation(navigator);
    output::info("Booking abandoned.");
    Ok(())
}

fn cmd_show(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let currency = &context.config.currency;
    match (&context.wizard, &context.last_confirmation) {
        (Some(wizard), _) => render::print_wizard(wizard, currency),
        (None, Some(confirmation)) => render::print_lines(
            "Last Booking",
            render::confirmation_lines(confirmation, currency),
        ),
        (None, None) => return Err(CommandError::NoActiveBooking),
    }
    Ok(())
}
