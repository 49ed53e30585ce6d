//! Passenger → Payment → Confirm controller.
//!
//! The wizard owns the form and the current step for one booking attempt.
//! Hosts render from [`BookingWizard::state`] and mutate only through
//! [`BookingWizard::update_field`], [`BookingWizard::advance`] and
//! [`BookingWizard::retreat`].

use tracing::{debug, info, warn};

use crate::booking::formatter::format_field;
use crate::booking::step::WizardStep;
use crate::booking::summary::{BookingConfirmation, FareSummary};
use crate::booking::validator::validate_step;
use crate::domain::booking::BookingForm;
use crate::domain::field::FormField;
use crate::domain::flight::FlightSnapshot;
use crate::errors::FormatValidationError;

pub const ERROR_TITLE: &str = "Error";
pub const CONFIRMED_TITLE: &str = "Booking Confirmed!";
pub const CONFIRMED_BODY: &str =
    "Your flight has been successfully booked. You will receive a confirmation email shortly.";

/// Modal message shown to the user. The host returns from
/// [`Notifier::show_blocking_message`] once it has been dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockingMessage {
    pub title: String,
    pub body: String,
}

impl BlockingMessage {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

pub trait Notifier {
    fn show_blocking_message(&mut self, message: &BlockingMessage);
}

pub trait Navigator {
    /// Leave the wizard for the previous screen.
    fn go_back(&mut self);
    /// Return to the home screen once the booking is done.
    fn go_to_home(&mut self);
}

/// Step plus collected data, as seen by renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardState {
    pub step: WizardStep,
    pub form: BookingForm,
}

/// Result of a wizard operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Moved { from: WizardStep, to: WizardStep },
    Unchanged,
    /// Validation failed; the errors were already shown to the user.
    Blocked(FormatValidationError),
    Confirmed(BookingConfirmation),
}

#[derive(Debug, Clone)]
pub struct BookingWizard {
    state: WizardState,
    confirmation: Option<BookingConfirmation>,
}

impl BookingWizard {
    pub fn new(flight: FlightSnapshot) -> Self {
        info!(flight = %flight.flight_number, "booking wizard started");
        Self {
            state: WizardState {
                step: WizardStep::FIRST,
                form: BookingForm::new(flight),
            },
            confirmation: None,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn step(&self) -> WizardStep {
        self.state.step
    }

    pub fn form(&self) -> &BookingForm {
        &self.state.form
    }

    pub fn fare_summary(&self) -> FareSummary {
        FareSummary::for_flight(self.state.form.flight())
    }

    /// Confirmation receipt once the booking has been submitted.
    pub fn confirmation(&self) -> Option<&BookingConfirmation> {
        self.confirmation.as_ref()
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmation.is_some()
    }

    /// Applies the field's mask to `raw` and stores the result. Incomplete
    /// values are kept as typed.
    pub fn update_field(&mut self, field: FormField, raw: &str) {
        if self.is_confirmed() {
            debug!(%field, "ignoring edit after confirmation");
            return;
        }
        let formatted = format_field(field, raw);
        debug!(%field, length = formatted.chars().count(), "field updated");
        self.state.form.store(field, formatted);
    }

    /// Validates the current step and moves forward, or submits the booking
    /// from the confirm step.
    pub fn advance<N, R>(&mut self, notifier: &mut N, navigator: &mut R) -> StepOutcome
    where
        N: Notifier + ?Sized,
        R: Navigator + ?Sized,
    {
        if self.is_confirmed() {
            debug!("advance ignored: booking already confirmed");
            return StepOutcome::Unchanged;
        }

        let from = self.state.step;
        let Some(to) = from.next() else {
            return self.confirm(notifier, navigator);
        };

        match validate_step(from, &self.state.form) {
            Ok(()) => {
                self.state.step = to;
                info!(from = from.label(), to = to.label(), "wizard step advanced");
                StepOutcome::Moved { from, to }
            }
            Err(err) => {
                warn!(
                    step = from.label(),
                    errors = err.messages().len(),
                    "wizard step blocked by validation"
                );
                notifier.show_blocking_message(&BlockingMessage::new(ERROR_TITLE, err.bulleted()));
                StepOutcome::Blocked(err)
            }
        }
    }

    /// Moves one step back without validating. No-op on the first step.
    pub fn retreat(&mut self) -> StepOutcome {
        if self.is_confirmed() {
            return StepOutcome::Unchanged;
        }
        let from = self.state.step;
        match from.previous() {
            Some(to) => {
                self.state.step = to;
                info!(from = from.label(), to = to.label(), "wizard step retreated");
                StepOutcome::Moved { from, to }
            }
            None => StepOutcome::Unchanged,
        }
    }

    /// Abandons the booking and hands control back to the previous screen.
    pub fn exit<R: Navigator + ?Sized>(self, navigator: &mut R) {
        info!(
            step = self.state.step.label(),
            confirmed = self.is_confirmed(),
            "booking wizard closed"
        );
        navigator.go_back();
    }

    fn confirm<N, R>(&mut self, notifier: &mut N, navigator: &mut R) -> StepOutcome
    where
        N: Notifier + ?Sized,
        R: Navigator + ?Sized,
    {
        let confirmation = BookingConfirmation::issue(&self.state.form);
        info!(
            reference = %confirmation.reference,
            flight = %confirmation.flight_number,
            "booking confirmed"
        );
        self.confirmation = Some(confirmation.clone());

        let body = format!(
            "{CONFIRMED_BODY}\nBooking reference: {}",
            confirmation.reference
        );
        notifier.show_blocking_message(&BlockingMessage::new(CONFIRMED_TITLE, body));
        navigator.go_to_home();
        StepOutcome::Confirmed(confirmation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::domain::field::{PassengerField, PaymentField};

    #[derive(Default)]
    struct Recorder {
        messages: Vec<BlockingMessage>,
        backs: usize,
        homes: usize,
    }

    impl Notifier for Recorder {
        fn show_blocking_message(&mut self, message: &BlockingMessage) {
            self.messages.push(message.clone());
        }
    }

    impl Navigator for Recorder {
        fn go_back(&mut self) {
            self.backs += 1;
        }

        fn go_to_home(&mut self) {
            self.homes += 1;
        }
    }

    fn wizard() -> BookingWizard {
        let flight = Catalog::demo().snapshot("1", Some("2A")).unwrap();
        BookingWizard::new(flight)
    }

    fn advance(wizard: &mut BookingWizard, host: &mut Recorder) -> StepOutcome {
        let mut navigator = Recorder::default();
        let outcome = wizard.advance(host, &mut navigator);
        host.backs += navigator.backs;
        host.homes += navigator.homes;
        outcome
    }

    fn fill_passenger(wizard: &mut BookingWizard) {
        let values = [
            (PassengerField::FirstName, "Jane"),
            (PassengerField::LastName, "Doe"),
            (PassengerField::Email, "jane@x.com"),
            (PassengerField::Phone, "5551234567"),
            (PassengerField::DateOfBirth, "12151990"),
        ];
        for (field, value) in values {
            wizard.update_field(FormField::Passenger(field), value);
        }
    }

    fn fill_payment(wizard: &mut BookingWizard) {
        let values = [
            (PaymentField::CardNumber, "4111111111111111"),
            (PaymentField::ExpiryDate, "1227"),
            (PaymentField::Cvv, "123"),
            (PaymentField::CardholderName, "Jane Doe"),
        ];
        for (field, value) in values {
            wizard.update_field(FormField::Payment(field), value);
        }
    }

    #[test]
    fn update_field_applies_masks() {
        let mut wizard = wizard();
        fill_passenger(&mut wizard);
        fill_payment(&mut wizard);
        let form = wizard.form();
        assert_eq!(form.passenger.date_of_birth, "12/15/1990");
        assert_eq!(form.payment.card_number, "4111 1111 1111 1111");
        assert_eq!(form.payment.expiry_date, "12/27");
    }

    #[test]
    fn update_field_clips_to_display_length() {
        let mut wizard = wizard();
        wizard.update_field(FormField::Payment(PaymentField::Cvv), "123456");
        assert_eq!(wizard.form().payment.cvv, "1234");
    }

    #[test]
    fn overlong_card_number_is_cut_after_grouping() {
        let mut wizard = wizard();
        let card = FormField::Payment(PaymentField::CardNumber);
        wizard.update_field(card, "41111111111111111111");
        let stored = wizard.form().payment.card_number.clone();
        assert_eq!(stored, "4111 1111 1111 1111");

        wizard.update_field(card, &stored);
        assert_eq!(wizard.form().payment.card_number, stored);
    }

    #[test]
    fn pasted_date_of_birth_keeps_every_digit() {
        let mut wizard = wizard();
        let dob = FormField::Passenger(PassengerField::DateOfBirth);
        wizard.update_field(dob, "12 / 15 / 1990");
        assert_eq!(wizard.form().passenger.date_of_birth, "12/15/1990");

        wizard.update_field(FormField::Payment(PaymentField::ExpiryDate), "12 / 27");
        assert_eq!(wizard.form().payment.expiry_date, "12/27");
    }

    #[test]
    fn blocked_advance_notifies_and_keeps_values() {
        let mut wizard = wizard();
        let mut host = Recorder::default();
        wizard.update_field(FormField::Passenger(PassengerField::FirstName), "Jane");

        let outcome = advance(&mut wizard, &mut host);

        assert!(matches!(outcome, StepOutcome::Blocked(ref err) if err.messages().len() == 4));
        assert_eq!(wizard.step(), WizardStep::Passenger);
        assert_eq!(wizard.form().passenger.first_name, "Jane");
        assert_eq!(host.messages.len(), 1);
        assert_eq!(host.messages[0].title, ERROR_TITLE);
        assert!(host.messages[0].body.starts_with("• Last Name is required"));
    }

    #[test]
    fn full_flow_confirms_once() {
        let mut wizard = wizard();
        let mut host = Recorder::default();

        fill_passenger(&mut wizard);
        assert_eq!(
            advance(&mut wizard, &mut host),
            StepOutcome::Moved {
                from: WizardStep::Passenger,
                to: WizardStep::Payment
            }
        );
        fill_payment(&mut wizard);
        assert!(matches!(advance(&mut wizard, &mut host), StepOutcome::Moved { .. }));
        assert_eq!(wizard.step(), WizardStep::Confirm);

        let outcome = advance(&mut wizard, &mut host);
        let StepOutcome::Confirmed(confirmation) = outcome else {
            panic!("expected confirmation, got {outcome:?}");
        };
        assert_eq!(confirmation.flight_number, "AF123");
        assert_eq!(confirmation.passenger_name, "Jane Doe");
        assert_eq!(confirmation.card_last_four.as_deref(), Some("1111"));
        assert_eq!(wizard.step(), WizardStep::Confirm);
        assert_eq!(host.homes, 1);
        assert_eq!(host.messages.len(), 1);
        assert_eq!(host.messages[0].title, CONFIRMED_TITLE);

        assert_eq!(advance(&mut wizard, &mut host), StepOutcome::Unchanged);
        assert_eq!(host.messages.len(), 1);
        assert_eq!(host.homes, 1);
    }

    #[test]
    fn retreat_moves_back_without_validation() {
        let mut wizard = wizard();
        let mut host = Recorder::default();
        fill_passenger(&mut wizard);
        advance(&mut wizard, &mut host);

        assert_eq!(
            wizard.retreat(),
            StepOutcome::Moved {
                from: WizardStep::Payment,
                to: WizardStep::Passenger
            }
        );
        assert_eq!(wizard.retreat(), StepOutcome::Unchanged);
        assert_eq!(wizard.step(), WizardStep::Passenger);
        assert!(host.messages.is_empty());
    }

    #[test]
    fn exit_hands_control_back() {
        let wizard = wizard();
        let mut host = Recorder::default();
        wizard.exit(&mut host);
        assert_eq!(host.backs, 1);
        assert_eq!(host.homes, 0);
    }
}
