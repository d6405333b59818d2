//! Result types shared by the scorer, the leakage detector and the suggestion builder.

use std::fmt;

use serde::{Serialize, Serializer};

/// Classification of a single feedback line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackKind {
    Strength,
    Neutral,
    Weakness,
}

impl fmt::Display for FeedbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedbackKind::Strength => write!(f, "Strength"),
            FeedbackKind::Neutral => write!(f, "Neutral"),
            FeedbackKind::Weakness => write!(f, "Weakness"),
        }
    }
}

/// A tagged feedback message, rendered as `"<Kind>: <message>"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackItem {
    pub kind: FeedbackKind,
    pub message: String,
}

impl FeedbackItem {
    pub fn strength(message: impl Into<String>) -> Self {
        Self { kind: FeedbackKind::Strength, message: message.into() }
    }

    pub fn neutral(message: impl Into<String>) -> Self {
        Self { kind: FeedbackKind::Neutral, message: message.into() }
    }

    pub fn weakness(message: impl Into<String>) -> Self {
        Self { kind: FeedbackKind::Weakness, message: message.into() }
    }

    pub fn is_weakness(&self) -> bool {
        self.kind == FeedbackKind::Weakness
    }
}

impl fmt::Display for FeedbackItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl Serialize for FeedbackItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Which character classes a password uses, plus its length in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CharacterClasses {
    pub lower: bool,
    pub upper: bool,
    pub digit: bool,
    pub symbol: bool,
    pub length: usize,
}

impl CharacterClasses {
    /// Number of the four classes present.
    pub fn count(&self) -> usize {
        [self.lower, self.upper, self.digit, self.symbol]
            .iter()
            .filter(|&&b| b)
            .count()
    }
}

/// Structural strength of a password, before any corpus or leakage penalty.
#[derive(Debug, Clone, PartialEq)]
pub struct StrengthResult {
    /// Always within `0..=100`.
    pub score: u32,
    pub feedback: Vec<FeedbackItem>,
    pub entropy_bits: f64,
    pub length: usize,
    pub classes: CharacterClasses,
}

/// Personal-information findings for one password.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LeakageReport {
    pub feedback: Vec<FeedbackItem>,
    pub used_personal: bool,
}

/// A hardened replacement password and the edits that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub password: String,
    pub changes: Vec<String>,
}
