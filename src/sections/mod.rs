//! Password scoring sections
//!
//! Each section scores one structural aspect of a password and reports
//! the feedback it produced. Sections are independent and additive.

mod length;
mod pattern;
mod variety;

use crate::types::FeedbackItem;

pub use length::length_section;
pub use pattern::{repetition_section, sequential_section};
pub(crate) use variety::is_symbol;
pub use variety::{
    character_classes, complexity_bonus_section, digit_section, lowercase_section,
    symbol_section, uppercase_section,
};

/// Points awarded by a section and the feedback it emitted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SectionOutcome {
    pub points: u32,
    pub feedback: Option<FeedbackItem>,
}

impl SectionOutcome {
    pub fn award(points: u32) -> Self {
        Self { points, feedback: None }
    }

    pub fn award_with(points: u32, feedback: FeedbackItem) -> Self {
        Self { points, feedback: Some(feedback) }
    }

    pub fn penalize(feedback: FeedbackItem) -> Self {
        Self { points: 0, feedback: Some(feedback) }
    }
}
