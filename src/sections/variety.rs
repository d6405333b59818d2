//! Character variety section - checks for uppercase, lowercase, digits, symbols.

use secrecy::{ExposeSecret, SecretString};
use super::SectionOutcome;
use crate::types::{CharacterClasses, FeedbackItem};

const CLASS_POINTS: u32 = 10;
const COMPLEXITY_BONUS: u32 = 15;

pub(crate) fn is_symbol(c: char) -> bool {
    c.is_ascii_punctuation()
}

/// Reports which character classes `password` uses and its length in characters.
pub fn character_classes(password: &str) -> CharacterClasses {
    CharacterClasses {
        lower: password.chars().any(|c| c.is_lowercase()),
        upper: password.chars().any(|c| c.is_uppercase()),
        digit: password.chars().any(|c| c.is_ascii_digit()),
        symbol: password.chars().any(is_symbol),
        length: password.chars().count(),
    }
}

fn class_section(present: bool, advice: &str) -> SectionOutcome {
    if present {
        SectionOutcome::award(CLASS_POINTS)
    } else {
        SectionOutcome::penalize(FeedbackItem::weakness(advice))
    }
}

pub fn uppercase_section(password: &SecretString) -> SectionOutcome {
    let classes = character_classes(password.expose_secret());
    class_section(classes.upper, "Add uppercase letters.")
}

pub fn lowercase_section(password: &SecretString) -> SectionOutcome {
    let classes = character_classes(password.expose_secret());
    class_section(classes.lower, "Add lowercase letters.")
}

pub fn digit_section(password: &SecretString) -> SectionOutcome {
    let classes = character_classes(password.expose_secret());
    class_section(classes.digit, "Add digits.")
}

pub fn symbol_section(password: &SecretString) -> SectionOutcome {
    let classes = character_classes(password.expose_secret());
    class_section(classes.symbol, "Add symbols.")
}

/// +15 when at least three classes are used and the password has 12+ characters.
pub fn complexity_bonus_section(password: &SecretString) -> SectionOutcome {
    let classes = character_classes(password.expose_secret());
    if classes.count() >= 3 && classes.length >= 12 {
        SectionOutcome::award(COMPLEXITY_BONUS)
    } else {
        SectionOutcome::default()
    }
}
