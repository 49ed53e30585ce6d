#![doc(test(attr(deny(warnings))))]

//! Flight Booking Core holds the passenger/payment/confirm booking wizard,
//! its input masks and step validation, together with the demo flight
//! catalog and the interactive shell that drives them.

pub mod booking;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod currency;
pub mod domain;
pub mod errors;
#[cfg(feature = "ffi")]
pub mod ffi;
pub mod utils;

use std::sync::Once;

pub use booking::{BookingWizard, StepOutcome, WizardStep};
pub use errors::{BookingError, FormatValidationError};

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Flight Booking Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
