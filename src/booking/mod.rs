//! Booking wizard: step state machine, input masks and step validation.

pub mod formatter;
pub mod step;
pub mod summary;
pub mod validator;
pub mod wizard;

pub use formatter::{
    format_card_number, format_date_of_birth, format_expiry, format_field, FieldFormatter,
};
pub use step::WizardStep;
pub use summary::{BookingConfirmation, FareSummary};
pub use validator::{validate_passenger, validate_payment, validate_step, ValidationResult};
pub use wizard::{BlockingMessage, BookingWizard, Navigator, Notifier, StepOutcome, WizardState};
