use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn shell(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("flight_booking_cli").unwrap();
    cmd.env("FLIGHT_BOOKING_CLI_SCRIPT", "1")
        .env("FLIGHT_BOOKING_HOME", home.path())
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn script_mode_books_a_flight() {
    let home = TempDir::new().unwrap();
    let input = "\
flights --filter morning
book 1 2A
set firstName John
set lastName Doe
set email john@example.com
set phone 5551234567
set dateOfBirth 12151990
next
set cardNumber 4111111111111111
set expiryDate 1227
set cvv 123
set cardholderName \"John Doe\"
next
next
exit
";

    shell(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("AF123"))
        .stdout(contains("Date of Birth: 12/15/1990"))
        .stdout(contains("Card Number: 4111 1111 1111 1111"))
        .stdout(contains("Total").and(contains("$324")))
        .stdout(contains("Booking Confirmed!"))
        .stdout(contains("Reference :"));
}

#[test]
fn blocked_step_prints_validation_errors() {
    let home = TempDir::new().unwrap();
    shell(&home)
        .write_stdin("book 2\nset firstName Ann\nnext\nexit\n")
        .assert()
        .success()
        .stdout(contains("Error"))
        .stdout(contains("• Last Name is required"))
        .stdout(contains("Booking Confirmed!").not());
}

#[test]
fn unknown_command_gets_a_suggestion() {
    let home = TempDir::new().unwrap();
    shell(&home)
        .write_stdin("flihgts\nexit\n")
        .assert()
        .success()
        .stdout(contains("Unknown command `flihgts`"))
        .stdout(contains("Suggestion: `flights`?"));
}

#[test]
fn config_changes_persist_between_runs() {
    let home = TempDir::new().unwrap();
    shell(&home)
        .write_stdin("config set seat_preference aisle\nexit\n")
        .assert()
        .success()
        .stdout(contains("Updated seat_preference."));

    shell(&home)
        .write_stdin("config show\nexit\n")
        .assert()
        .success()
        .stdout(contains("aisle"));
}
