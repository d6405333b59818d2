//! Pattern analysis section - detects repeated and sequential characters.

use std::collections::HashSet;

use secrecy::{ExposeSecret, SecretString};
use super::SectionOutcome;
use crate::types::FeedbackItem;

const SEQUENCES: [&str; 3] = [
    "abcdefghijklmnopqrstuvwxyz",
    "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
    "0123456789",
];

/// +10 when no character appears twice anywhere in the password.
pub fn repetition_section(password: &SecretString) -> SectionOutcome {
    let pwd = password.expose_secret();
    let unique: HashSet<char> = pwd.chars().collect();
    if unique.len() == pwd.chars().count() {
        SectionOutcome::award(10)
    } else {
        SectionOutcome::penalize(FeedbackItem::weakness("Avoid repeating characters."))
    }
}

/// Whether `password` contains any three consecutive letters or digits, forwards or backwards.
pub(crate) fn has_sequential_run(password: &str) -> bool {
    SEQUENCES.iter().any(|seq| {
        seq.as_bytes().windows(3).any(|window| {
            let forward: String = window.iter().map(|&b| b as char).collect();
            let reverse: String = forward.chars().rev().collect();
            password.contains(&forward) || password.contains(&reverse)
        })
    })
}

/// +10 when the password has no sequential run of three.
pub fn sequential_section(password: &SecretString) -> SectionOutcome {
    if has_sequential_run(password.expose_secret()) {
        SectionOutcome::penalize(FeedbackItem::weakness("Avoid sequential characters."))
    } else {
        SectionOutcome::award(10)
    }
}
