//! Plain data records shared by the wizard, the catalog and the shell.

pub mod booking;
pub mod common;
pub mod field;
pub mod flight;

pub use booking::{BookingForm, PassengerInfo, PaymentInfo};
pub use common::Displayable;
pub use field::{FormField, PassengerField, PaymentField, Section};
pub use flight::{Endpoint, Fare, FlightSnapshot, SeatChoice, SeatKind};
