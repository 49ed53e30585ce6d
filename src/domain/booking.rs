use serde::{Deserialize, Serialize};

use crate::domain::field::{FormField, PassengerField, PaymentField};
use crate::domain::flight::FlightSnapshot;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PassengerInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: String,
}

impl PassengerInfo {
    pub fn get(&self, field: PassengerField) -> &str {
        match field {
            PassengerField::FirstName => &self.first_name,
            PassengerField::LastName => &self.last_name,
            PassengerField::Email => &self.email,
            PassengerField::Phone => &self.phone,
            PassengerField::DateOfBirth => &self.date_of_birth,
        }
    }

    pub fn set(&mut self, field: PassengerField, value: String) {
        let slot = match field {
            PassengerField::FirstName => &mut self.first_name,
            PassengerField::LastName => &mut self.last_name,
            PassengerField::Email => &mut self.email,
            PassengerField::Phone => &mut self.phone,
            PassengerField::DateOfBirth => &mut self.date_of_birth,
        };
        *slot = value;
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentInfo {
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
    pub cardholder_name: String,
}

impl PaymentInfo {
    pub fn get(&self, field: PaymentField) -> &str {
        match field {
            PaymentField::CardNumber => &self.card_number,
            PaymentField::ExpiryDate => &self.expiry_date,
            PaymentField::Cvv => &self.cvv,
            PaymentField::CardholderName => &self.cardholder_name,
        }
    }

    pub fn set(&mut self, field: PaymentField, value: String) {
        let slot = match field {
            PaymentField::CardNumber => &mut self.card_number,
            PaymentField::ExpiryDate => &mut self.expiry_date,
            PaymentField::Cvv => &mut self.cvv,
            PaymentField::CardholderName => &mut self.cardholder_name,
        };
        *slot = value;
    }

    /// Last four digits of the card, for summaries and logs.
    pub fn card_last_four(&self) -> Option<String> {
        let digits: Vec<char> = self.card_number.chars().filter(char::is_ascii_digit).collect();
        if digits.len() < 4 {
            return None;
        }
        Some(digits[digits.len() - 4..].iter().collect())
    }
}

/// Everything collected by one booking attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingForm {
    flight: FlightSnapshot,
    pub passenger: PassengerInfo,
    pub payment: PaymentInfo,
}

impl BookingForm {
    /// Starts an empty form for `flight`.
    pub fn new(flight: FlightSnapshot) -> Self {
        Self {
            flight,
            passenger: PassengerInfo::default(),
            payment: PaymentInfo::default(),
        }
    }

    pub fn flight(&self) -> &FlightSnapshot {
        &self.flight
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Passenger(field) => self.passenger.get(field),
            FormField::Payment(field) => self.payment.get(field),
        }
    }

    pub(crate) fn store(&mut self, field: FormField, value: String) {
        match field {
            FormField::Passenger(field) => self.passenger.set(field, value),
            FormField::Payment(field) => self.payment.set(field, value),
        }
    }
}
