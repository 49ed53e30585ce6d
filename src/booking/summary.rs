use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::currency::{CurrencyCode, Money};
use crate::domain::booking::BookingForm;
use crate::domain::flight::FlightSnapshot;

/// Price lines shown on the confirm step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FareSummary {
    pub base_fare: Money,
    pub taxes_and_fees: Money,
    pub seat_selection: Money,
}

impl FareSummary {
    pub fn for_flight(flight: &FlightSnapshot) -> Self {
        Self {
            base_fare: flight.fare.base,
            taxes_and_fees: flight.fare.taxes,
            seat_selection: flight
                .seat
                .as_ref()
                .map(|seat| seat.surcharge)
                .unwrap_or(Money::ZERO),
        }
    }

    pub fn total(&self) -> Money {
        [self.base_fare, self.taxes_and_fees, self.seat_selection]
            .into_iter()
            .sum()
    }

    /// `(label, amount)` rows in display order, total last.
    pub fn lines(&self, currency: &CurrencyCode) -> Vec<(&'static str, String)> {
        vec![
            ("Base Fare", self.base_fare.format_with(currency)),
            ("Taxes & Fees", self.taxes_and_fees.format_with(currency)),
            ("Seat Selection", self.seat_selection.format_with(currency)),
            ("Total", self.total().format_with(currency)),
        ]
    }
}

/// Receipt produced when the confirm step is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub reference: String,
    pub flight_number: String,
    pub passenger_name: String,
    pub seat: Option<String>,
    pub total: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_last_four: Option<String>,
    pub confirmed_at: DateTime<Utc>,
}

impl BookingConfirmation {
    pub fn issue(form: &BookingForm) -> Self {
        let flight = form.flight();
        Self {
            reference: booking_reference(),
            flight_number: flight.flight_number.clone(),
            passenger_name: form.passenger.full_name(),
            seat: flight.seat.as_ref().map(|seat| seat.id.clone()),
            total: FareSummary::for_flight(flight).total(),
            card_last_four: form.payment.card_last_four(),
            confirmed_at: Utc::now(),
        }
    }
}

/// Six-character record locator.
fn booking_reference() -> String {
    let mut reference = Uuid::new_v4().simple().to_string();
    reference.truncate(6);
    reference.to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn total_includes_seat_surcharge() {
        let catalog = Catalog::demo();
        let flight = catalog.snapshot("1", Some("2A")).unwrap();
        let summary = FareSummary::for_flight(&flight);
        assert_eq!(summary.total(), Money::from_dollars(324));
    }

    #[test]
    fn lines_end_with_total() {
        let catalog = Catalog::demo();
        let flight = catalog.snapshot("1", None).unwrap();
        let lines = FareSummary::for_flight(&flight).lines(&CurrencyCode::default());
        assert_eq!(
            lines,
            vec![
                ("Base Fare", "$250".to_string()),
                ("Taxes & Fees", "$49".to_string()),
                ("Seat Selection", "$0".to_string()),
                ("Total", "$299".to_string()),
            ]
        );
    }

    #[test]
    fn references_are_short_and_uppercase() {
        let reference = booking_reference();
        assert_eq!(reference.len(), 6);
        assert!(reference
            .chars()
            .all(|ch| ch.is_ascii_digit() || ch.is_ascii_uppercase()));
    }
}
