use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::currency::Money;
use crate::domain::common::{format_block_time, Displayable};

/// One end of a flight leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub city: String,
    pub code: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate: Option<String>,
}

impl Endpoint {
    /// `Dec 15, 2024`
    pub fn date_label(&self) -> String {
        self.date.format("%b %-d, %Y").to_string()
    }

    /// `08:30`
    pub fn time_label(&self) -> String {
        self.time.format("%H:%M").to_string()
    }
}

impl Displayable for Endpoint {
    fn display_label(&self) -> String {
        format!("{} ({}) {}", self.city, self.code, self.time_label())
    }
}

/// Fare split shown on the confirmation summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fare {
    pub base: Money,
    pub taxes: Money,
}

impl Fare {
    pub fn total(&self) -> Money {
        self.base + self.taxes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatKind {
    Window,
    Middle,
    Aisle,
}

impl SeatKind {
    pub fn label(&self) -> &'static str {
        match self {
            SeatKind::Window => "window",
            SeatKind::Middle => "middle",
            SeatKind::Aisle => "aisle",
        }
    }
}

/// Seat picked on the details screen before entering the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatChoice {
    pub id: String,
    pub kind: SeatKind,
    pub surcharge: Money,
}

/// Read-only view of the flight being booked. Copied into the wizard at
/// construction; the wizard never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightSnapshot {
    pub airline: String,
    pub flight_number: String,
    pub departure: Endpoint,
    pub arrival: Endpoint,
    pub duration_minutes: u32,
    pub fare: Fare,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seat: Option<SeatChoice>,
}

impl FlightSnapshot {
    /// Ticket price before seat surcharges.
    pub fn price(&self) -> Money {
        self.fare.total()
    }

    pub fn duration_label(&self) -> String {
        format_block_time(self.duration_minutes)
    }

    pub fn seat_label(&self) -> &str {
        self.seat.as_ref().map(|seat| seat.id.as_str()).unwrap_or("Not selected")
    }
}

impl Displayable for FlightSnapshot {
    fn display_label(&self) -> String {
        format!(
            "{} {} {} → {}",
            self.airline, self.flight_number, self.departure.code, self.arrival.code
        )
    }
}
