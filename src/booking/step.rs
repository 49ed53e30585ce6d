use std::fmt;

use serde::{Deserialize, Serialize};

/// The three screens of the booking wizard, numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
    Passenger = 1,
    Payment = 2,
    Confirm = 3,
}

impl WizardStep {
    pub const FIRST: WizardStep = WizardStep::Passenger;
    pub const LAST: WizardStep = WizardStep::Confirm;
    pub const COUNT: u8 = 3;

    pub fn number(&self) -> u8 {
        *self as u8
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(WizardStep::Passenger),
            2 => Some(WizardStep::Payment),
            3 => Some(WizardStep::Confirm),
            _ => None,
        }
    }

    pub fn next(&self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn previous(&self) -> Option<Self> {
        self.number().checked_sub(1).and_then(Self::from_number)
    }

    /// Label shown under the step indicator.
    pub fn label(&self) -> &'static str {
        match self {
            WizardStep::Passenger => "Passenger",
            WizardStep::Payment => "Payment",
            WizardStep::Confirm => "Confirm",
        }
    }

    /// Caption of the primary button on this step.
    pub fn action_label(&self) -> &'static str {
        match self {
            WizardStep::Confirm => "Confirm Booking",
            _ => "Next",
        }
    }

    /// Fill ratio of the progress bar, in `(0, 1]`.
    pub fn progress(&self) -> f32 {
        f32::from(self.number()) / f32::from(Self::COUNT)
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {} of {}", self.number(), Self::COUNT)
    }
}

#[cfg(test)]
mod tests {
    use super::WizardStep;

    #[test]
    fn steps_chain_within_range() {
        assert_eq!(WizardStep::Passenger.previous(), None);
        assert_eq!(WizardStep::Passenger.next(), Some(WizardStep::Payment));
        assert_eq!(WizardStep::Payment.next(), Some(WizardStep::Confirm));
        assert_eq!(WizardStep::Confirm.next(), None);
        assert_eq!(WizardStep::Confirm.previous(), Some(WizardStep::Payment));
    }

    #[test]
    fn display_matches_header_caption() {
        assert_eq!(WizardStep::Payment.to_string(), "Step 2 of 3");
    }

    #[test]
    fn progress_reaches_one_on_last_step() {
        assert!((WizardStep::Confirm.progress() - 1.0).abs() < f32::EPSILON);
        assert!(WizardStep::Passenger.progress() < WizardStep::Payment.progress());
    }
}
