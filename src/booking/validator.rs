//! Step validation against static format rules.
//!
//! Checks run in categories and stop at the first failing category: missing
//! fields first, then each format rule in field order. Only the missing-field
//! category reports more than one message.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::booking::WizardStep;
use crate::domain::booking::{BookingForm, PassengerInfo, PaymentInfo};
use crate::domain::field::{PassengerField, PaymentField};
use crate::errors::FormatValidationError;

/// Outcome of validating one step.
pub type ValidationResult = Result<(), FormatValidationError>;

pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const DATE_OF_BIRTH_MESSAGE: &str = "Date of Birth must be in MM/DD/YYYY format";
pub const CARD_NUMBER_MESSAGE: &str = "Card Number must be 16 digits";
pub const EXPIRY_MESSAGE: &str = "Expiry Date must be in MM/YY format";
pub const CVV_MESSAGE: &str = "CVV must be 3 or 4 digits";

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));
static DATE_OF_BIRTH_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(0[1-9]|1[0-2])/(0[1-9]|[12][0-9]|3[01])/[0-9]{4}$")
        .expect("valid date of birth pattern")
});
static CARD_NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{16}$").expect("valid card number pattern"));
static EXPIRY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(0[1-9]|1[0-2])/[0-9]{2}$").expect("valid expiry pattern"));
static CVV_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{3,4}$").expect("valid cvv pattern"));

pub fn required_message(label: &str) -> String {
    format!("{label} is required")
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn require_all<'a, I>(fields: I) -> ValidationResult
where
    I: IntoIterator<Item = (&'static str, &'a str)>,
{
    let missing = fields
        .into_iter()
        .filter(|(_, value)| is_blank(value))
        .map(|(label, _)| required_message(label));
    match FormatValidationError::from_messages(missing) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn check(matches: bool, message: &str) -> ValidationResult {
    if matches {
        Ok(())
    } else {
        Err(FormatValidationError::single(message))
    }
}

/// Validates the passenger step: missing fields, then email, then date of
/// birth.
pub fn validate_passenger(passenger: &PassengerInfo) -> ValidationResult {
    require_all(
        PassengerField::ALL
            .iter()
            .map(|field| (field.label(), passenger.get(*field))),
    )?;
    check(
        EMAIL_PATTERN.is_match(passenger.email.trim()),
        EMAIL_MESSAGE,
    )?;
    check(
        DATE_OF_BIRTH_PATTERN.is_match(passenger.date_of_birth.trim()),
        DATE_OF_BIRTH_MESSAGE,
    )
}

/// Validates the payment step: missing fields, then card number, expiry and
/// CVV.
pub fn validate_payment(payment: &PaymentInfo) -> ValidationResult {
    require_all(
        PaymentField::ALL
            .iter()
            .map(|field| (field.label(), payment.get(*field))),
    )?;
    let card_digits: String = payment
        .card_number
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .collect();
    check(CARD_NUMBER_PATTERN.is_match(&card_digits), CARD_NUMBER_MESSAGE)?;
    check(
        EXPIRY_PATTERN.is_match(payment.expiry_date.trim()),
        EXPIRY_MESSAGE,
    )?;
    check(CVV_PATTERN.is_match(payment.cvv.trim()), CVV_MESSAGE)
}

/// Validates the section edited on `step`. The confirm step has nothing to
/// check.
pub fn validate_step(step: WizardStep, form: &BookingForm) -> ValidationResult {
    match step {
        WizardStep::Passenger => validate_passenger(&form.passenger),
        WizardStep::Payment => validate_payment(&form.payment),
        WizardStep::Confirm => Ok(()),
    }
}
