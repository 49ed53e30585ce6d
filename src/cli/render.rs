//! Text layouts for the shell screens.
//!
//! Each screen is built as plain lines first so layouts can be checked
//! without a terminal; the `print_*` helpers route them through the styled
//! output functions.

use crate::booking::{BookingConfirmation, BookingWizard, FareSummary, WizardStep};
use crate::catalog::{Flight, FlightFilter};
use crate::cli::output;
use crate::config::SeatPreference;
use crate::currency::CurrencyCode;
use crate::domain::common::{format_block_time, Displayable};
use crate::domain::{BookingForm, Endpoint, FormField, PassengerField, PaymentField, Section};

const PROGRESS_WIDTH: usize = 12;

pub fn flight_rows(flights: &[&Flight], currency: &CurrencyCode) -> Vec<String> {
    flights
        .iter()
        .map(|flight| {
            format!(
                "[{}] {:<9} {:<6} {} {} → {} {}  {:<7} {:<9} {}",
                flight.id,
                flight.airline,
                flight.flight_number,
                flight.departure.code,
                flight.departure.time_label(),
                flight.arrival.code,
                flight.arrival.time_label(),
                format_block_time(flight.duration_minutes),
                flight.stops_label(),
                flight.fare.total().format_with(currency),
            )
        })
        .collect()
}

pub fn flight_detail_lines(flight: &Flight, currency: &CurrencyCode) -> Vec<String> {
    let endpoint = |label: &str, endpoint: &Endpoint| {
        let mut line = format!(
            "{label:<10}: {} · {}",
            endpoint.display_label(),
            endpoint.date_label()
        );
        if let Some(terminal) = &endpoint.terminal {
            line.push_str(&format!(" · Terminal {terminal}"));
        }
        if let Some(gate) = &endpoint.gate {
            line.push_str(&format!(" · Gate {gate}"));
        }
        line
    };

    let stats = &flight.seat_stats;
    let mut lines = vec![
        format!("{} {}", flight.airline, flight.flight_number),
        endpoint("Departure", &flight.departure),
        endpoint("Arrival", &flight.arrival),
        format!(
            "Duration  : {} ({})",
            format_block_time(flight.duration_minutes),
            flight.stops_label()
        ),
        format!("Aircraft  : {}", flight.aircraft),
        format!("Price     : {}", flight.fare.total().format_with(currency)),
        format!("Carry-on  : {}", flight.baggage.carry_on),
        format!("Checked   : {}", flight.baggage.checked),
        format!(
            "Seats     : {}/{} available · {}\" pitch · {}\" width",
            stats.available_seats,
            stats.total_seats,
            stats.seat_pitch_inches,
            stats.seat_width_inches
        ),
    ];
    if !flight.amenities.is_empty() {
        lines.push(format!("Amenities : {}", flight.amenities.join(", ")));
    }
    lines
}

pub fn seat_map_lines(
    flight: &Flight,
    preference: SeatPreference,
    currency: &CurrencyCode,
) -> Vec<String> {
    flight
        .seats
        .iter()
        .map(|seat| {
            let status = if !seat.available {
                "taken".to_string()
            } else if seat.surcharge.is_zero() {
                "included".to_string()
            } else {
                format!("+{}", seat.surcharge.format_with(currency))
            };
            let marker = if seat.available && preference != SeatPreference::Any
                && preference.prefers(seat.kind)
            {
                " *"
            } else {
                ""
            };
            format!("{:<3} {:<7} {}{}", seat.id, seat.kind.label(), status, marker)
        })
        .collect()
}

pub fn progress_bar(step: WizardStep) -> String {
    let filled = (step.progress() * PROGRESS_WIDTH as f32).round() as usize;
    let filled = filled.min(PROGRESS_WIDTH);
    format!(
        "[{}{}] {}",
        "#".repeat(filled),
        "-".repeat(PROGRESS_WIDTH - filled),
        step
    )
}

fn field_value(form: &BookingForm, field: FormField) -> String {
    let value = form.value(field);
    if value.is_empty() {
        format!("({})", field.placeholder())
    } else if field.is_secret() {
        "•".repeat(value.chars().count())
    } else {
        value.to_string()
    }
}

fn section_fields(form: &BookingForm, section: Section) -> Vec<String> {
    FormField::all()
        .filter(|field| field.section() == section)
        .map(|field| {
            format!(
                "  {:<16} {:<16}: {}",
                field.label(),
                format!("[{}]", field.key()),
                field_value(form, field)
            )
        })
        .collect()
}

pub fn fare_summary_lines(summary: &FareSummary, currency: &CurrencyCode) -> Vec<String> {
    summary
        .lines(currency)
        .into_iter()
        .map(|(label, amount)| format!("  {label:<15} {amount:>8}"))
        .collect()
}

fn confirm_lines(form: &BookingForm, currency: &CurrencyCode) -> Vec<String> {
    let flight = form.flight();
    let passenger = &form.passenger;
    let card = match form.payment.card_last_four() {
        Some(last_four) => format!("•••• {last_four}"),
        None => String::from("(none)"),
    };

    let mut lines = vec![
        "Flight Details".to_string(),
        format!("  {}", flight.display_label()),
        format!(
            "  {} · {} → {} · {}",
            flight.departure.date_label(),
            flight.departure.time_label(),
            flight.arrival.time_label(),
            flight.duration_label()
        ),
        format!("  Seat: {}", flight.seat_label()),
        "Passenger".to_string(),
        format!("  {}", passenger.full_name()),
        format!("  {}", passenger.get(PassengerField::Email)),
        format!("  {}", passenger.get(PassengerField::Phone)),
        format!("  Born {}", passenger.get(PassengerField::DateOfBirth)),
        "Payment".to_string(),
        format!("  {card} · expires {}", form.payment.get(PaymentField::ExpiryDate)),
        format!("  {}", form.payment.get(PaymentField::CardholderName)),
        "Price Summary".to_string(),
    ];
    lines.extend(fare_summary_lines(&FareSummary::for_flight(flight), currency));
    lines
}

pub fn wizard_lines(wizard: &BookingWizard, currency: &CurrencyCode) -> Vec<String> {
    let step = wizard.step();
    let form = wizard.form();
    let mut lines = vec![
        format!("{}: {}", step, step.label()),
        progress_bar(step),
    ];
    match step {
        WizardStep::Passenger => {
            lines.push(Section::Passenger.title().to_string());
            lines.extend(section_fields(form, Section::Passenger));
        }
        WizardStep::Payment => {
            lines.push(Section::Payment.title().to_string());
            lines.extend(section_fields(form, Section::Payment));
        }
        WizardStep::Confirm => lines.extend(confirm_lines(form, currency)),
    }
    let back = if step == WizardStep::FIRST {
        "`back` leaves the booking"
    } else {
        "`back` returns to the previous step"
    };
    lines.push(format!("[{}] `next` · {back}", step.action_label()));
    lines
}

pub fn confirmation_lines(
    confirmation: &BookingConfirmation,
    currency: &CurrencyCode,
) -> Vec<String> {
    let mut lines = vec![
        format!("Reference : {}", confirmation.reference),
        format!("Flight    : {}", confirmation.flight_number),
        format!("Passenger : {}", confirmation.passenger_name),
        format!(
            "Seat      : {}",
            confirmation.seat.as_deref().unwrap_or("Not selected")
        ),
        format!("Total     : {}", confirmation.total.format_with(currency)),
    ];
    if let Some(last_four) = &confirmation.card_last_four {
        lines.push(format!("Card      : •••• {last_four}"));
    }
    lines.push(format!(
        "Booked at : {}",
        confirmation.confirmed_at.format("%Y-%m-%d %H:%M UTC")
    ));
    lines
}

pub fn print_flights(flights: &[&Flight], filter: FlightFilter, currency: &CurrencyCode) {
    output::section(format!("Flights · {}", filter.label()));
    if flights.is_empty() {
        output::warning("No flights match the current search.");
        return;
    }
    for line in flight_rows(flights, currency) {
        output::info(line);
    }
    output::hint("Use `details <id>` for more, or `book <id> [seat]` to start booking.");
}

pub fn print_lines(title: impl std::fmt::Display, lines: Vec<String>) {
    output::section(title);
    for line in lines {
        output::info(line);
    }
}

pub fn print_wizard(wizard: &BookingWizard, currency: &CurrencyCode) {
    print_lines("Book Flight", wizard_lines(wizard, currency));
}
