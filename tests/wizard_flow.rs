use flight_booking_core::{
    booking::{BlockingMessage, BookingWizard, Navigator, Notifier, StepOutcome, WizardStep},
    catalog::Catalog,
    domain::{FormField, PassengerField, PaymentField},
    init,
};

#[derive(Default)]
struct Host {
    messages: Vec<BlockingMessage>,
    backs: usize,
    homes: usize,
}

struct Nav<'a> {
    backs: &'a mut usize,
    homes: &'a mut usize,
}

impl Navigator for Nav<'_> {
    fn go_back(&mut self) {
        *self.backs += 1;
    }

    fn go_to_home(&mut self) {
        *self.homes += 1;
    }
}

impl Host {
    fn advance(&mut self, wizard: &mut BookingWizard) -> StepOutcome {
        let mut notifier = Vec::new();
        let outcome = {
            let mut nav = Nav {
                backs: &mut self.backs,
                homes: &mut self.homes,
            };
            let mut collector = Collector(&mut notifier);
            wizard.advance(&mut collector, &mut nav)
        };
        self.messages.extend(notifier);
        outcome
    }
}

struct Collector<'a>(&'a mut Vec<BlockingMessage>);

impl Notifier for Collector<'_> {
    fn show_blocking_message(&mut self, message: &BlockingMessage) {
        self.0.push(message.clone());
    }
}

fn new_wizard(seat: Option<&str>) -> BookingWizard {
    init();
    let snapshot = Catalog::demo().snapshot("1", seat).unwrap();
    BookingWizard::new(snapshot)
}

fn passenger(wizard: &mut BookingWizard, email: &str, dob: &str) {
    let values = [
        (PassengerField::FirstName, "John"),
        (PassengerField::LastName, "Doe"),
        (PassengerField::Email, email),
        (PassengerField::Phone, "555-123-4567"),
        (PassengerField::DateOfBirth, dob),
    ];
    for (field, value) in values {
        wizard.update_field(FormField::Passenger(field), value);
    }
}

fn payment(wizard: &mut BookingWizard, card: &str) {
    let values = [
        (PaymentField::CardNumber, card),
        (PaymentField::ExpiryDate, "1227"),
        (PaymentField::Cvv, "123"),
        (PaymentField::CardholderName, "John Doe"),
    ];
    for (field, value) in values {
        wizard.update_field(FormField::Payment(field), value);
    }
}

#[test]
fn full_booking_confirms_exactly_once() {
    let mut wizard = new_wizard(Some("2A"));
    let mut host = Host::default();

    passenger(&mut wizard, "john@example.com", "12151990");
    assert!(matches!(
        host.advance(&mut wizard),
        StepOutcome::Moved {
            from: WizardStep::Passenger,
            to: WizardStep::Payment
        }
    ));
    assert_eq!(wizard.form().passenger.first_name, "John");
    assert_eq!(wizard.form().passenger.date_of_birth, "12/15/1990");

    payment(&mut wizard, "4111111111111111");
    host.advance(&mut wizard);
    assert_eq!(wizard.step(), WizardStep::Confirm);
    assert!(host.messages.is_empty());

    let StepOutcome::Confirmed(receipt) = host.advance(&mut wizard) else {
        panic!("confirm step should confirm");
    };
    assert_eq!(receipt.flight_number, "AF123");
    assert_eq!(receipt.passenger_name, "John Doe");
    assert_eq!(receipt.total.cents(), 32_400);
    assert_eq!(receipt.card_last_four.as_deref(), Some("1111"));
    assert_eq!(receipt.reference.len(), 6);

    assert_eq!(host.advance(&mut wizard), StepOutcome::Unchanged);
    assert_eq!(wizard.step(), WizardStep::Confirm);
    assert_eq!(host.homes, 1);
    assert_eq!(host.messages.len(), 1);
    assert_eq!(host.messages[0].title, "Booking Confirmed!");
    assert!(host.messages[0].body.contains(&receipt.reference));
}

#[test]
fn blank_passenger_reports_every_missing_field_in_order() {
    let mut wizard = new_wizard(None);
    let mut host = Host::default();

    let StepOutcome::Blocked(err) = host.advance(&mut wizard) else {
        panic!("blank form must block");
    };
    assert_eq!(
        err.messages(),
        [
            "First Name is required",
            "Last Name is required",
            "Email Address is required",
            "Phone Number is required",
            "Date of Birth is required",
        ]
    );
    assert_eq!(wizard.step(), WizardStep::Passenger);
    assert_eq!(host.messages[0].title, "Error");
    assert_eq!(host.messages[0].body.lines().count(), 5);
    assert!(host.messages[0].body.starts_with("• First Name is required"));
}

#[test]
fn bad_email_with_good_date_gives_one_message() {
    let mut wizard = new_wizard(None);
    let mut host = Host::default();
    passenger(&mut wizard, "john.example.com", "12151990");

    let StepOutcome::Blocked(err) = host.advance(&mut wizard) else {
        panic!("bad email must block");
    };
    assert_eq!(err.messages(), ["Please enter a valid email address"]);
    assert_eq!(wizard.form().passenger.email, "john.example.com");
}

#[test]
fn short_card_number_is_rejected() {
    let mut wizard = new_wizard(None);
    let mut host = Host::default();
    passenger(&mut wizard, "john@example.com", "01011980");
    host.advance(&mut wizard);
    payment(&mut wizard, "411111111111111");

    let StepOutcome::Blocked(err) = host.advance(&mut wizard) else {
        panic!("15 digits must block");
    };
    assert_eq!(err.messages(), ["Card Number must be 16 digits"]);
    assert_eq!(wizard.step(), WizardStep::Payment);
}

#[test]
fn retreat_never_validates_and_stops_at_passenger() {
    let mut wizard = new_wizard(None);
    let mut host = Host::default();

    assert_eq!(wizard.retreat(), StepOutcome::Unchanged);
    assert_eq!(wizard.step(), WizardStep::Passenger);

    passenger(&mut wizard, "john@example.com", "12151990");
    host.advance(&mut wizard);
    wizard.update_field(FormField::Payment(PaymentField::Cvv), "12");
    assert!(matches!(
        wizard.retreat(),
        StepOutcome::Moved {
            from: WizardStep::Payment,
            to: WizardStep::Passenger
        }
    ));
    assert_eq!(wizard.form().payment.cvv, "12");
    assert!(host.messages.is_empty());
}

#[test]
fn exit_hands_control_back() {
    let wizard = new_wizard(None);
    let (mut backs, mut homes) = (0, 0);
    wizard.exit(&mut Nav {
        backs: &mut backs,
        homes: &mut homes,
    });
    assert_eq!((backs, homes), (1, 0));
}

#[test]
fn fare_summary_includes_seat_surcharge() {
    let wizard = new_wizard(Some("2C"));
    let summary = wizard.fare_summary();
    assert_eq!(summary.seat_selection.cents(), 1_500);
    assert_eq!(summary.total().cents(), 31_400);
}
