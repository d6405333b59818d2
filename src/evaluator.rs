//! Password analyzer - runs every component and merges their results.

use std::fmt;

use rand::Rng;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use thiserror::Error;

use crate::corpus::Corpus;
use crate::leakage::detect_leakage;
use crate::personal::PersonalInfo;
use crate::scorer::score_password;
use crate::similarity::{similarity_percentage, EditDistance, Levenshtein};
use crate::suggestion::build_suggestion_with_rng;
use crate::types::{CharacterClasses, FeedbackItem, Suggestion};

/// Similarity at or above which a password counts as a near-copy of a common one.
pub const SIMILARITY_THRESHOLD: f64 = 85.0;
pub const SIMILARITY_PENALTY: u32 = 25;
pub const PERSONAL_INFO_PENALTY: u32 = 20;

/// General advice returned with every analysis.
pub const ADVICE: [&str; 4] = [
    "Use 14+ characters with at least 3 character classes.",
    "Avoid any personal information or predictable dates.",
    "Prefer passphrases of unrelated words, then add a number and a symbol.",
    "Use a unique password per site; enable a password manager and 2FA.",
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Password is required.")]
    EmptyPassword,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrengthSummary {
    pub entropy_bits: f64,
    pub length: usize,
    pub classes: CharacterClasses,
}

/// Everything known about one password.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub final_score: u32,
    pub similarity_percentage: f64,
    pub strength: StrengthSummary,
    /// Merge penalties first, then structural feedback, then leakage findings.
    pub feedback: Vec<FeedbackItem>,
    pub advice: Vec<String>,
    pub suggestion: Suggestion,
    #[serde(skip)]
    pub used_personal: bool,
}

/// Analyzes passwords against a read-only corpus.
///
/// # Example
///
/// ```rust,no_run
/// use pwd_insight::{Analyzer, Corpus, PersonalInfo};
/// use secrecy::SecretString;
///
/// let corpus = Corpus::load().expect("Failed to load corpus");
/// let analyzer = Analyzer::new(&corpus);
///
/// let password = SecretString::new("MyP@ssw0rd!".to_string().into());
/// let info = PersonalInfo::new().with_name("Alice");
/// let report = analyzer.analyze(&password, &info).expect("non-empty password");
///
/// println!("Score: {}", report.final_score);
/// println!("Try: {}", report.suggestion.password);
/// ```
#[derive(Clone, Copy)]
pub struct Analyzer<'a> {
    corpus: &'a Corpus,
    distance: Option<&'a dyn EditDistance>,
}

impl fmt::Debug for Analyzer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analyzer")
            .field("corpus_len", &self.corpus.len())
            .field("edit_distance", &self.distance.is_some())
            .finish()
    }
}

impl<'a> Analyzer<'a> {
    /// Analyzer using Levenshtein distance for similarity.
    pub fn new(corpus: &'a Corpus) -> Self {
        Self { corpus, distance: Some(&Levenshtein) }
    }

    /// Replaces the edit-distance capability. `None` limits similarity to exact matches.
    pub fn with_edit_distance(mut self, distance: Option<&'a dyn EditDistance>) -> Self {
        self.distance = distance;
        self
    }

    pub fn corpus(&self) -> &Corpus {
        self.corpus
    }

    /// Analyzes `password` with the thread-local RNG driving the suggestion.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::EmptyPassword`] before doing any work if the
    /// password is empty.
    pub fn analyze(
        &self,
        password: &SecretString,
        info: &PersonalInfo,
    ) -> Result<AnalysisReport, AnalysisError> {
        self.analyze_with_rng(password, info, &mut rand::thread_rng())
    }

    pub fn analyze_with_rng<R: Rng>(
        &self,
        password: &SecretString,
        info: &PersonalInfo,
        rng: &mut R,
    ) -> Result<AnalysisReport, AnalysisError> {
        let pwd = password.expose_secret();
        if pwd.is_empty() {
            return Err(AnalysisError::EmptyPassword);
        }

        let similarity = similarity_percentage(pwd, self.corpus, self.distance);
        let strength = score_password(password);
        let leakage = detect_leakage(password, info);

        let mut score = strength.score;
        let mut feedback = strength.feedback;

        if similarity >= SIMILARITY_THRESHOLD {
            score = score.saturating_sub(SIMILARITY_PENALTY);
            feedback.insert(0, FeedbackItem::weakness("Very similar to a common password."));
        }
        if leakage.used_personal {
            score = score.saturating_sub(PERSONAL_INFO_PENALTY);
            feedback.insert(0, FeedbackItem::weakness("Contains personal information."));
        }
        feedback.extend(leakage.feedback);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "analysis merged: base {} final {} similarity {} personal {}",
            strength.score,
            score,
            similarity,
            leakage.used_personal
        );

        Ok(AnalysisReport {
            final_score: score,
            similarity_percentage: similarity,
            strength: StrengthSummary {
                entropy_bits: strength.entropy_bits,
                length: strength.length,
                classes: strength.classes,
            },
            feedback,
            advice: ADVICE.iter().map(|a| a.to_string()).collect(),
            suggestion: build_suggestion_with_rng(password, info, rng),
            used_personal: leakage.used_personal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FeedbackKind;

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string().into())
    }

    #[test]
    fn test_analyzer_debug() {
        let corpus = Corpus::from_entries(["password", "123456"]);
        let debug = format!("{:?}", Analyzer::new(&corpus));
        assert_eq!(debug, "Analyzer { corpus_len: 2, edit_distance: true }");
        let exact_only = format!("{:?}", Analyzer::new(&corpus).with_edit_distance(None));
        assert!(exact_only.contains("edit_distance: false"));
    }

    #[test]
    fn test_empty_password_is_rejected() {
        let corpus = Corpus::from_entries(["password"]);
        let result = Analyzer::new(&corpus).analyze(&secret(""), &PersonalInfo::new());
        assert_eq!(result, Err(AnalysisError::EmptyPassword));
    }

    #[test]
    fn test_no_penalties() {
        let corpus = Corpus::from_entries(["password", "123456"]);
        let report = Analyzer::new(&corpus)
            .analyze(&secret("Zq7!mK#2"), &PersonalInfo::new())
            .unwrap();
        assert_eq!(report.final_score, 75);
        assert!(report.similarity_percentage < SIMILARITY_THRESHOLD);
        assert_eq!(report.feedback[0].kind, FeedbackKind::Neutral);
        // structural feedback, then one line per personal field
        assert_eq!(report.feedback.len(), 1 + 7);
        assert_eq!(report.advice.len(), 4);
    }

    #[test]
    fn test_similarity_penalty() {
        let corpus = Corpus::from_entries(["Zq7!mK#2"]);
        let report = Analyzer::new(&corpus)
            .analyze(&secret("Zq7!mK#2"), &PersonalInfo::new())
            .unwrap();
        assert_eq!(report.similarity_percentage, 100.0);
        assert_eq!(report.final_score, 50);
        assert_eq!(report.feedback[0], FeedbackItem::weakness("Very similar to a common password."));
    }

    #[test]
    fn test_exact_match_without_edit_distance() {
        let corpus = Corpus::from_entries(["Zq7!mK#2"]);
        let analyzer = Analyzer::new(&corpus).with_edit_distance(None);

        let exact = analyzer.analyze(&secret("Zq7!mK#2"), &PersonalInfo::new()).unwrap();
        assert_eq!(exact.similarity_percentage, 100.0);
        assert_eq!(exact.final_score, 50);

        let near = analyzer.analyze(&secret("Zq7!mK#3"), &PersonalInfo::new()).unwrap();
        assert_eq!(near.similarity_percentage, 0.0);
    }

    #[test]
    fn test_personal_info_penalty() {
        let corpus = Corpus::empty();
        let info = PersonalInfo::new().with_name("zq7");
        let report = Analyzer::new(&corpus).analyze(&secret("Zq7!mK#2"), &info).unwrap();
        assert!(report.used_personal);
        assert_eq!(report.final_score, 55);
        assert_eq!(report.feedback[0], FeedbackItem::weakness("Contains personal information."));
        assert!(report.feedback.contains(&FeedbackItem::weakness("Password contains your name.")));
    }

    #[test]
    fn test_penalties_compose() {
        let corpus = Corpus::from_entries(["Zq7!mK#2"]);
        let info = PersonalInfo::new().with_name("zq7");
        let report = Analyzer::new(&corpus).analyze(&secret("Zq7!mK#2"), &info).unwrap();
        assert_eq!(report.final_score, 75 - 25 - 20);
        assert_eq!(report.feedback[0], FeedbackItem::weakness("Contains personal information."));
        assert_eq!(report.feedback[1], FeedbackItem::weakness("Very similar to a common password."));
    }

    #[test]
    fn test_score_is_floored_at_zero() {
        let corpus = Corpus::from_entries(["abc"]);
        let info = PersonalInfo::new().with_name("abc");
        let report = Analyzer::new(&corpus).analyze(&secret("abc"), &info).unwrap();
        assert_eq!(report.final_score, 0);
    }

    #[test]
    fn test_score_boundaries() {
        let corpus = Corpus::from_entries(["password", "123456", "qwerty", "admin"]);
        let analyzer = Analyzer::new(&corpus);
        let info = PersonalInfo::new().with_name("Alice").with_date_of_birth("1990");
        for pwd in ["a", "password", "MyPass123!", "Alice1990", "VeryStrongPassword123!@#"] {
            let report = analyzer.analyze(&secret(pwd), &info).unwrap();
            assert!(report.final_score <= 100, "score out of bounds for {}", pwd);
            assert!(report.similarity_percentage >= 0.0);
            assert!(report.strength.entropy_bits >= 0.0);
            assert_eq!(report.strength.classes.length, pwd.chars().count());
        }
    }

    #[test]
    fn test_report_serialization_shape() {
        let corpus = Corpus::from_entries(["password"]);
        let report = Analyzer::new(&corpus)
            .analyze(&secret("password1"), &PersonalInfo::new())
            .unwrap();
        let json = serde_json::to_value(&report).unwrap();

        for key in ["final_score", "similarity_percentage", "strength", "feedback", "advice", "suggestion"] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
        assert!(json.get("used_personal").is_none());
        assert_eq!(json["strength"]["classes"]["length"], 9);
        assert_eq!(json["feedback"][0], "Weakness: Very similar to a common password.");
        assert!(json["suggestion"]["password"].is_string());
        assert!(json["suggestion"]["changes"].is_array());
    }
}
