//! Length section - rewards longer passwords.

use secrecy::{ExposeSecret, SecretString};
use super::SectionOutcome;
use crate::types::FeedbackItem;

const ADEQUATE_LENGTH: usize = 12;
const MIN_LENGTH: usize = 8;

/// Scores the password length in characters.
///
/// - 12 or more: +25
/// - 8 to 11: +15
/// - shorter: nothing, with a weakness
pub fn length_section(password: &SecretString) -> SectionOutcome {
    let len = password.expose_secret().chars().count();
    if len >= ADEQUATE_LENGTH {
        SectionOutcome::award_with(25, FeedbackItem::strength("Adequate length (12+)."))
    } else if len >= MIN_LENGTH {
        SectionOutcome::award_with(
            15,
            FeedbackItem::neutral("Medium length (8–11). Prefer 12+."),
        )
    } else {
        SectionOutcome::penalize(FeedbackItem::weakness("Too short (<8)."))
    }
}
