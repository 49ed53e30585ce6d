//! Format-on-change masks applied to raw keystrokes.
//!
//! Every mask is total, tolerates partial input and is idempotent: feeding a
//! mask its own output returns the same string.

use crate::domain::field::{FormField, PassengerField, PaymentField};

const CARD_GROUP: usize = 4;
const EXPIRY_DIGITS: usize = 4;
const BIRTH_DATE_DIGITS: usize = 8;

/// Mask attached to a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFormatter {
    Identity,
    CardNumber,
    Expiry,
    DateOfBirth,
}

impl FieldFormatter {
    pub fn for_field(field: FormField) -> Self {
        match field {
            FormField::Payment(PaymentField::CardNumber) => FieldFormatter::CardNumber,
            FormField::Payment(PaymentField::ExpiryDate) => FieldFormatter::Expiry,
            FormField::Passenger(PassengerField::DateOfBirth) => FieldFormatter::DateOfBirth,
            _ => FieldFormatter::Identity,
        }
    }

    pub fn apply(&self, raw: &str) -> String {
        match self {
            FieldFormatter::Identity => raw.to_string(),
            FieldFormatter::CardNumber => format_card_number(raw),
            FieldFormatter::Expiry => format_expiry(raw),
            FieldFormatter::DateOfBirth => format_date_of_birth(raw),
        }
    }
}

/// Formats `raw` the way the text box for `field` would: the mask runs on
/// the whole input and the result is cut to the field's display length.
pub fn format_field(field: FormField, raw: &str) -> String {
    let formatted = FieldFormatter::for_field(field).apply(raw);
    match field.max_length() {
        Some(limit) if formatted.chars().count() > limit => formatted
            .chars()
            .take(limit)
            .collect::<String>()
            .trim_end()
            .to_string(),
        _ => formatted,
    }
}

/// Strips whitespace and groups the remaining characters in fours.
pub fn format_card_number(raw: &str) -> String {
    let compact: Vec<char> = raw.chars().filter(|ch| !ch.is_whitespace()).collect();
    compact
        .chunks(CARD_GROUP)
        .map(|group| group.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Masks an expiry as `MM/YY`. The slash appears as soon as the month is
/// complete.
pub fn format_expiry(raw: &str) -> String {
    let digits = digits_only(raw, EXPIRY_DIGITS);
    if digits.len() < 2 {
        return digits;
    }
    let (month, year) = digits.split_at(2);
    format!("{month}/{year}")
}

/// Masks a birth date as `MM/DD/YYYY`. A slash is inserted after the month
/// and the day only once a following digit exists, unlike
/// [`format_expiry`], which shows its slash as soon as the month is complete.
pub fn format_date_of_birth(raw: &str) -> String {
    let digits = digits_only(raw, BIRTH_DATE_DIGITS);
    let mut out = String::with_capacity(digits.len() + 2);
    for (index, digit) in digits.chars().enumerate() {
        if index == 2 || index == 4 {
            out.push('/');
        }
        out.push(digit);
    }
    out
}

fn digits_only(raw: &str, limit: usize) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_number_groups_in_fours() {
        assert_eq!(format_card_number("4111111111111111"), "4111 1111 1111 1111");
        assert_eq!(format_card_number("41111111"), "4111 1111");
        assert_eq!(format_card_number("41111"), "4111 1");
        assert_eq!(format_card_number(""), "");
    }

    #[test]
    fn card_number_regroups_irregular_spacing() {
        assert_eq!(format_card_number(" 41 11 1111\t1111 "), "4111 1111 1111");
    }

    #[test]
    fn expiry_inserts_slash_after_month() {
        assert_eq!(format_expiry("1225"), "12/25");
        assert_eq!(format_expiry("1"), "1");
        assert_eq!(format_expiry("12"), "12/");
        assert_eq!(format_expiry("122"), "12/2");
        assert_eq!(format_expiry("12/25"), "12/25");
    }

    #[test]
    fn expiry_drops_extra_digits_and_noise() {
        assert_eq!(format_expiry("12-2599"), "12/25");
        assert_eq!(format_expiry("ab"), "");
    }

    #[test]
    fn date_of_birth_masks_progressively() {
        assert_eq!(format_date_of_birth("1"), "1");
        assert_eq!(format_date_of_birth("12"), "12");
        assert_eq!(format_date_of_birth("121"), "12/1");
        assert_eq!(format_date_of_birth("1215"), "12/15");
        assert_eq!(format_date_of_birth("12152"), "12/15/2");
        assert_eq!(format_date_of_birth("12152024"), "12/15/2024");
    }

    #[test]
    fn date_of_birth_truncates_after_year() {
        assert_eq!(format_date_of_birth("121520241"), "12/15/2024");
        assert_eq!(format_date_of_birth("12/15/2024"), "12/15/2024");
    }

    #[test]
    fn text_fields_pass_through() {
        let field = FormField::Passenger(PassengerField::FirstName);
        assert_eq!(format_field(field, " Jane "), " Jane ");
        let cvv = FormField::Payment(PaymentField::Cvv);
        assert_eq!(format_field(cvv, "12a"), "12a");
    }

    #[test]
    fn masks_are_idempotent() {
        let samples = ["", "4", "41111111111", "12/2", "1a2b3c4d5e6f7g8h9", "  9  "];
        for field in FormField::all() {
            for sample in samples {
                let once = format_field(field, sample);
                assert_eq!(format_field(field, &once), once, "{field} on {sample:?}");
            }
        }
    }
}
