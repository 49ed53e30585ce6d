//! In-memory flight catalog standing in for the app's mock data source.
//!
//! Supplies the flight list with its search filters, per-flight details and
//! seat map, and builds the [`FlightSnapshot`] handed to the booking wizard.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::currency::Money;
use crate::domain::flight::{Endpoint, Fare, FlightSnapshot, SeatChoice, SeatKind};
use crate::errors::BookingError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaggageAllowance {
    pub carry_on: String,
    pub checked: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatMapStats {
    pub total_seats: u16,
    pub available_seats: u16,
    pub seat_pitch_inches: u8,
    pub seat_width_inches: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    pub id: String,
    pub kind: SeatKind,
    pub surcharge: Money,
    pub available: bool,
}

/// Catalog entry for one flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub id: String,
    pub airline: String,
    pub flight_number: String,
    pub departure: Endpoint,
    pub arrival: Endpoint,
    pub duration_minutes: u32,
    pub fare: Fare,
    pub stops: u8,
    pub aircraft: String,
    pub baggage: BaggageAllowance,
    pub amenities: Vec<String>,
    pub seat_stats: SeatMapStats,
    pub seats: Vec<Seat>,
}

impl Flight {
    pub fn is_non_stop(&self) -> bool {
        self.stops == 0
    }

    pub fn stops_label(&self) -> String {
        match self.stops {
            0 => "Non-stop".to_string(),
            1 => "1 stop".to_string(),
            n => format!("{n} stops"),
        }
    }

    pub fn seat(&self, seat_id: &str) -> Option<&Seat> {
        self.seats
            .iter()
            .find(|seat| seat.id.eq_ignore_ascii_case(seat_id.trim()))
    }

    /// Resolves a seat the passenger may pick.
    pub fn select_seat(&self, seat_id: &str) -> Result<SeatChoice, BookingError> {
        let seat = self
            .seat(seat_id)
            .ok_or_else(|| BookingError::UnknownSeat(seat_id.trim().to_string()))?;
        if !seat.available {
            return Err(BookingError::SeatUnavailable(seat.id.clone()));
        }
        Ok(SeatChoice {
            id: seat.id.clone(),
            kind: seat.kind,
            surcharge: seat.surcharge,
        })
    }
}

/// Quick filters offered above the flight list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlightFilter {
    #[default]
    All,
    NonStop,
    Morning,
    Afternoon,
    Evening,
}

impl FlightFilter {
    pub const ALL: [FlightFilter; 5] = [
        FlightFilter::All,
        FlightFilter::NonStop,
        FlightFilter::Morning,
        FlightFilter::Afternoon,
        FlightFilter::Evening,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            FlightFilter::All => "all",
            FlightFilter::NonStop => "nonstop",
            FlightFilter::Morning => "morning",
            FlightFilter::Afternoon => "afternoon",
            FlightFilter::Evening => "evening",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FlightFilter::All => "All Flights",
            FlightFilter::NonStop => "Non-stop",
            FlightFilter::Morning => "Morning",
            FlightFilter::Afternoon => "Afternoon",
            FlightFilter::Evening => "Evening",
        }
    }

    pub fn matches(&self, flight: &Flight) -> bool {
        let hour = flight.departure.time.hour();
        match self {
            FlightFilter::All => true,
            FlightFilter::NonStop => flight.is_non_stop(),
            FlightFilter::Morning => (6..12).contains(&hour),
            FlightFilter::Afternoon => (12..18).contains(&hour),
            FlightFilter::Evening => hour >= 18,
        }
    }
}

impl fmt::Display for FlightFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FlightFilter {
    type Err = BookingError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted: String = raw
            .chars()
            .filter(|ch| ch.is_ascii_alphanumeric())
            .map(|ch| ch.to_ascii_lowercase())
            .collect();
        FlightFilter::ALL
            .into_iter()
            .find(|filter| filter.key() == wanted)
            .ok_or_else(|| BookingError::UnknownFilter(raw.trim().to_string()))
    }
}

/// Read-only set of flights.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    flights: Vec<Flight>,
}

impl Catalog {
    pub fn new(flights: Vec<Flight>) -> Self {
        Self { flights }
    }

    /// The NYC → LAX departures used by the demo app.
    pub fn demo() -> Self {
        let rows: [(&str, &str, &str, (u32, u32), (u32, u32), u64, &str, &str, &str); 5] = [
            ("1", "AirFly", "AF123", (8, 30), (11, 45), 250, "Boeing 737", "A12", "Terminal 1"),
            ("2", "SkyJet", "SJ456", (14, 20), (17, 35), 300, "Airbus A320", "B8", "Terminal 2"),
            ("3", "CloudAir", "CA789", (19, 15), (22, 30), 230, "Boeing 737", "C15", "Terminal 1"),
            ("4", "JetBlue", "JB234", (6, 45), (10, 0), 276, "Airbus A321", "D22", "Terminal 3"),
            ("5", "Delta", "DL567", (12, 30), (15, 45), 350, "Boeing 757", "E5", "Terminal 2"),
        ];

        let flights = rows
            .into_iter()
            .map(
                |(id, airline, number, dep, arr, base, aircraft, gate, terminal)| Flight {
                    id: id.into(),
                    airline: airline.into(),
                    flight_number: number.into(),
                    departure: demo_endpoint("New York", "NYC", dep, Some(terminal), Some(gate)),
                    arrival: demo_endpoint("Los Angeles", "LAX", arr, None, None),
                    duration_minutes: 315,
                    fare: Fare {
                        base: Money::from_dollars(base),
                        taxes: Money::from_dollars(49),
                    },
                    stops: 0,
                    aircraft: aircraft.into(),
                    baggage: BaggageAllowance {
                        carry_on: "1 bag included".into(),
                        checked: "1 bag included (up to 50 lbs)".into(),
                    },
                    amenities: [
                        "WiFi Available",
                        "In-flight Entertainment",
                        "Complimentary Snacks",
                        "USB Power Outlets",
                    ]
                    .into_iter()
                    .map(String::from)
                    .collect(),
                    seat_stats: SeatMapStats {
                        total_seats: 180,
                        available_seats: 45,
                        seat_pitch_inches: 30,
                        seat_width_inches: 17,
                    },
                    seats: demo_seats(),
                },
            )
            .collect();
        Self { flights }
    }

    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    pub fn get(&self, id: &str) -> Result<&Flight, BookingError> {
        let wanted = id.trim();
        self.flights
            .iter()
            .find(|flight| flight.id == wanted || flight.flight_number.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| BookingError::FlightNotFound(wanted.to_string()))
    }

    /// Airline/flight-number substring search followed by a quick filter.
    pub fn search(&self, query: &str, filter: FlightFilter) -> Vec<&Flight> {
        let needle = query.trim().to_lowercase();
        self.flights
            .iter()
            .filter(|flight| {
                needle.is_empty()
                    || flight.airline.to_lowercase().contains(&needle)
                    || flight.flight_number.to_lowercase().contains(&needle)
            })
            .filter(|flight| filter.matches(flight))
            .collect()
    }

    /// Builds the wizard's read-only view of `flight_id` with an optional
    /// seat.
    pub fn snapshot(&self, flight_id: &str, seat: Option<&str>) -> Result<FlightSnapshot, BookingError> {
        let flight = self.get(flight_id)?;
        let seat = seat.map(|id| flight.select_seat(id)).transpose()?;
        Ok(FlightSnapshot {
            airline: flight.airline.clone(),
            flight_number: flight.flight_number.clone(),
            departure: flight.departure.clone(),
            arrival: flight.arrival.clone(),
            duration_minutes: flight.duration_minutes,
            fare: flight.fare,
            seat,
        })
    }
}

fn demo_endpoint(
    city: &str,
    code: &str,
    (hour, minute): (u32, u32),
    terminal: Option<&str>,
    gate: Option<&str>,
) -> Endpoint {
    Endpoint {
        city: city.into(),
        code: code.into(),
        date: NaiveDate::from_ymd_opt(2024, 12, 15).expect("valid demo date"),
        time: NaiveTime::from_hms_opt(hour, minute, 0).expect("valid demo time"),
        terminal: terminal.map(String::from),
        gate: gate.map(String::from),
    }
}

fn demo_seats() -> Vec<Seat> {
    [
        ("1A", SeatKind::Window, 0, true),
        ("1B", SeatKind::Middle, 0, true),
        ("1C", SeatKind::Aisle, 0, false),
        ("2A", SeatKind::Window, 25, true),
        ("2B", SeatKind::Middle, 0, true),
        ("2C", SeatKind::Aisle, 15, true),
    ]
    .into_iter()
    .map(|(id, kind, surcharge, available)| Seat {
        id: id.into(),
        kind,
        surcharge: Money::from_dollars(surcharge),
        available,
    })
    .collect()
}
