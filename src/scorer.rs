//! Strength scorer - runs the scoring sections and estimates entropy.

use std::collections::HashMap;

use secrecy::{ExposeSecret, SecretString};

use crate::sections::{
    character_classes, complexity_bonus_section, digit_section, length_section,
    lowercase_section, repetition_section, sequential_section, symbol_section,
    uppercase_section, SectionOutcome,
};
use crate::similarity::round2;
use crate::types::StrengthResult;

const MAX_SCORE: u32 = 100;

/// Shannon entropy of the password's own character distribution, scaled by
/// its length and rounded to two decimals.
///
/// This is `H × len` with `H = −Σ p(c)·log2 p(c)`, an approximation of total
/// information rather than true guessing entropy. Empty input yields 0.0.
pub fn shannon_entropy_bits(password: &str) -> f64 {
    let len = password.chars().count();
    if len == 0 {
        return 0.0;
    }

    let mut counts: HashMap<char, usize> = HashMap::new();
    for c in password.chars() {
        *counts.entry(c).or_insert(0) += 1;
    }

    // summed in a fixed order so permutations give identical results
    let mut frequencies: Vec<usize> = counts.into_values().collect();
    frequencies.sort_unstable();

    let h: f64 = frequencies
        .into_iter()
        .map(|count| {
            let p = count as f64 / len as f64;
            -p * p.log2()
        })
        .sum();

    round2(h * len as f64).max(0.0)
}

/// Scores a password from its structure alone.
///
/// The score is the sum of every section's points, clamped to 100.
pub fn score_password(password: &SecretString) -> StrengthResult {
    let sections: [(&str, fn(&SecretString) -> SectionOutcome); 8] = [
        ("length", length_section),
        ("uppercase", uppercase_section),
        ("lowercase", lowercase_section),
        ("digit", digit_section),
        ("symbol", symbol_section),
        ("repetition", repetition_section),
        ("sequential", sequential_section),
        ("complexity", complexity_bonus_section),
    ];

    let mut score = 0;
    let mut feedback = Vec::new();

    for (_section_name, section_fn) in sections {
        let outcome = section_fn(password);
        #[cfg(feature = "tracing")]
        tracing::trace!("section {} awarded {} points", _section_name, outcome.points);
        score += outcome.points;
        feedback.extend(outcome.feedback);
    }

    let pwd = password.expose_secret();
    let classes = character_classes(pwd);

    StrengthResult {
        score: score.min(MAX_SCORE),
        feedback,
        entropy_bits: shannon_entropy_bits(pwd),
        length: classes.length,
        classes,
    }
}
