use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::BookingError;

/// Form section a field belongs to. Each section is validated by one wizard
/// step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Passenger,
    Payment,
}

impl Section {
    pub fn title(&self) -> &'static str {
        match self {
            Section::Passenger => "Passenger Information",
            Section::Payment => "Payment Information",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PassengerField {
    FirstName,
    LastName,
    Email,
    Phone,
    DateOfBirth,
}

impl PassengerField {
    /// Fields in display and validation order.
    pub const ALL: [PassengerField; 5] = [
        PassengerField::FirstName,
        PassengerField::LastName,
        PassengerField::Email,
        PassengerField::Phone,
        PassengerField::DateOfBirth,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            PassengerField::FirstName => "firstName",
            PassengerField::LastName => "lastName",
            PassengerField::Email => "email",
            PassengerField::Phone => "phone",
            PassengerField::DateOfBirth => "dateOfBirth",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PassengerField::FirstName => "First Name",
            PassengerField::LastName => "Last Name",
            PassengerField::Email => "Email Address",
            PassengerField::Phone => "Phone Number",
            PassengerField::DateOfBirth => "Date of Birth",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            PassengerField::FirstName => "Enter first name",
            PassengerField::LastName => "Enter last name",
            PassengerField::Email => "Enter email address",
            PassengerField::Phone => "Enter phone number",
            PassengerField::DateOfBirth => "MM/DD/YYYY",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentField {
    CardNumber,
    ExpiryDate,
    Cvv,
    CardholderName,
}

impl PaymentField {
    pub const ALL: [PaymentField; 4] = [
        PaymentField::CardNumber,
        PaymentField::ExpiryDate,
        PaymentField::Cvv,
        PaymentField::CardholderName,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            PaymentField::CardNumber => "cardNumber",
            PaymentField::ExpiryDate => "expiryDate",
            PaymentField::Cvv => "cvv",
            PaymentField::CardholderName => "cardholderName",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentField::CardNumber => "Card Number",
            PaymentField::ExpiryDate => "Expiry Date",
            PaymentField::Cvv => "CVV",
            PaymentField::CardholderName => "Cardholder Name",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            PaymentField::CardNumber => "1234 5678 9012 3456",
            PaymentField::ExpiryDate => "MM/YY",
            PaymentField::Cvv => "123",
            PaymentField::CardholderName => "Enter cardholder name",
        }
    }

    /// Whether renderers should mask the stored value.
    pub fn is_secret(&self) -> bool {
        matches!(self, PaymentField::Cvv)
    }
}

/// Any editable field of the booking form, tagged with its section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "section", content = "field", rename_all = "lowercase")]
pub enum FormField {
    Passenger(PassengerField),
    Payment(PaymentField),
}

impl FormField {
    pub fn all() -> impl Iterator<Item = FormField> {
        PassengerField::ALL
            .into_iter()
            .map(FormField::Passenger)
            .chain(PaymentField::ALL.into_iter().map(FormField::Payment))
    }

    pub fn section(&self) -> Section {
        match self {
            FormField::Passenger(_) => Section::Passenger,
            FormField::Payment(_) => Section::Payment,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            FormField::Passenger(field) => field.key(),
            FormField::Payment(field) => field.key(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Passenger(field) => field.label(),
            FormField::Payment(field) => field.label(),
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            FormField::Passenger(field) => field.placeholder(),
            FormField::Payment(field) => field.placeholder(),
        }
    }

    /// Longest formatted value the text box displays, in characters.
    pub fn max_length(&self) -> Option<usize> {
        match self {
            FormField::Passenger(PassengerField::DateOfBirth) => Some(10),
            FormField::Payment(PaymentField::CardNumber) => Some(19),
            FormField::Payment(PaymentField::ExpiryDate) => Some(5),
            FormField::Payment(PaymentField::Cvv) => Some(4),
            _ => None,
        }
    }

    pub fn is_secret(&self) -> bool {
        matches!(self, FormField::Payment(field) if field.is_secret())
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let section = match self.section() {
            Section::Passenger => "passenger",
            Section::Payment => "payment",
        };
        write!(f, "{}.{}", section, self.key())
    }
}

fn normalize_key(raw: &str) -> String {
    raw.chars()
        .filter(|ch| ch.is_ascii_alphanumeric())
        .map(|ch| ch.to_ascii_lowercase())
        .collect()
}

impl FromStr for FormField {
    type Err = BookingError;

    /// Accepts `firstName`, `first_name`, `first-name` and the
    /// section-qualified `passenger.firstName` spellings.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let (section, name) = match trimmed.split_once('.') {
            Some((section, name)) => (Some(normalize_key(section)), name),
            None => (None, trimmed),
        };
        let wanted = normalize_key(name);

        FormField::all()
            .find(|field| {
                let section_ok = match section.as_deref() {
                    None => true,
                    Some("passenger") => field.section() == Section::Passenger,
                    Some("payment") => field.section() == Section::Payment,
                    Some(_) => false,
                };
                section_ok && normalize_key(field.key()) == wanted
            })
            .ok_or_else(|| BookingError::UnknownField(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_spellings() {
        let expected = FormField::Passenger(PassengerField::DateOfBirth);
        for raw in ["dateOfBirth", "date_of_birth", "date-of-birth", "passenger.dateOfBirth"] {
            assert_eq!(raw.parse::<FormField>().unwrap(), expected, "{raw}");
        }
    }

    #[test]
    fn rejects_wrong_section() {
        assert!("payment.email".parse::<FormField>().is_err());
        assert!("seat".parse::<FormField>().is_err());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for field in FormField::all() {
            assert_eq!(field.to_string().parse::<FormField>().unwrap(), field);
        }
    }

    #[test]
    fn only_masked_fields_have_length_limits() {
        let limited: Vec<_> = FormField::all()
            .filter(|field| field.max_length().is_some())
            .map(|field| field.key())
            .collect();
        assert_eq!(limited, ["dateOfBirth", "cardNumber", "expiryDate", "cvv"]);
    }
}
