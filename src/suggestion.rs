//! Suggestion builder - derives a hardened replacement password.
//!
//! The suggestion starts from a truncated copy of the original, drops any
//! personal token, fills in missing character classes, breaks up runs,
//! pads to a minimum length and is finally shuffled. Output is random.

use std::sync::LazyLock;

use rand::seq::SliceRandom;
use rand::Rng;
use regex::{Regex, RegexBuilder};
use secrecy::{ExposeSecret, SecretString};

use crate::personal::PersonalInfo;
use crate::sections::is_symbol;
use crate::types::Suggestion;

const SEED_LENGTH: usize = 8;
const MIN_SUGGESTION_LENGTH: usize = 14;
const MAX_SHUFFLE_ATTEMPTS: usize = 32;

/// Padding alphabet without the confusable `l`, `I`, `O` and `0`.
const PAD_POOL: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz23456789!@#$%*?";

static DIGIT_RUNS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"1234|2345|3456|4567|5678|6789").expect("invalid regex")
});
static KEYBOARD_RUNS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)abcd|bcde|cdef|qwerty|asdf").expect("invalid regex")
});
const DIGIT_RUN_REPLACEMENT: &str = "7x9";
const KEYBOARD_RUN_REPLACEMENT: &str = "AxZ!";

/// Case-insensitive literal matcher for a personal token.
fn token_pattern(token: &str) -> Option<Regex> {
    RegexBuilder::new(&regex::escape(token))
        .case_insensitive(true)
        .build()
        .ok()
}

/// Removes every match of `pattern` until none is left, including ones formed
/// by earlier removals.
fn strip_token(haystack: &str, pattern: &Regex) -> (String, bool) {
    let mut current = haystack.to_string();
    let mut stripped = false;
    while pattern.is_match(&current) {
        current = pattern.replace_all(&current, "").into_owned();
        stripped = true;
    }
    (current, stripped)
}

fn replace_runs(s: &str) -> String {
    let s = DIGIT_RUNS.replace_all(s, DIGIT_RUN_REPLACEMENT);
    KEYBOARD_RUNS
        .replace_all(&s, KEYBOARD_RUN_REPLACEMENT)
        .into_owned()
}

/// Inserts a filler after every second identical character so no run of three survives.
fn break_runs(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev: Option<char> = None;
    let mut run = 0;
    for c in s.chars() {
        if prev == Some(c) {
            run += 1;
        } else {
            run = 1;
        }
        if run == 3 {
            out.push(if c == 'x' { 'y' } else { 'x' });
            run = 1;
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

/// Builds a suggestion with the thread-local RNG.
pub fn build_suggestion(password: &SecretString, info: &PersonalInfo) -> Suggestion {
    build_suggestion_with_rng(password, info, &mut rand::thread_rng())
}

/// Builds a suggestion drawing padding and shuffle order from `rng`.
pub fn build_suggestion_with_rng<R: Rng>(
    password: &SecretString,
    info: &PersonalInfo,
    rng: &mut R,
) -> Suggestion {
    let mut pwd = password.expose_secret().to_string();
    let mut suggestion: String = pwd.chars().take(SEED_LENGTH).collect();
    let mut changes = Vec::new();

    let patterns: Vec<_> = info
        .tokens()
        .into_iter()
        .filter_map(|(field, token)| token_pattern(&token).map(|re| (field, re)))
        .collect();
    for (field, pattern) in &patterns {
        let (next_pwd, in_pwd) = strip_token(&pwd, pattern);
        let (next_suggestion, in_suggestion) = strip_token(&suggestion, pattern);
        if in_pwd || in_suggestion {
            pwd = next_pwd;
            suggestion = next_suggestion;
            changes.push(format!("Removed {field} token"));
        }
    }

    if !suggestion.chars().any(|c| c.is_uppercase()) {
        suggestion.push('A');
        changes.push("Added uppercase".to_string());
    }
    if !suggestion.chars().any(|c| c.is_lowercase()) {
        suggestion.push('a');
        changes.push("Added lowercase".to_string());
    }
    if !suggestion.chars().any(|c| c.is_ascii_digit()) {
        suggestion.push('7');
        changes.push("Added digit".to_string());
    }
    if !suggestion.chars().any(is_symbol) {
        suggestion.push('!');
        changes.push("Added symbol".to_string());
    }

    suggestion = break_runs(&replace_runs(&suggestion));

    let mut chars: Vec<char> = suggestion.chars().collect();
    while chars.len() < MIN_SUGGESTION_LENGTH {
        chars.push(PAD_POOL[rng.gen_range(0..PAD_POOL.len())] as char);
    }

    let mut shuffled = String::new();
    for _ in 0..MAX_SHUFFLE_ATTEMPTS {
        chars.shuffle(rng);
        shuffled = chars.iter().collect();
        if !patterns.iter().any(|(_, pattern)| pattern.is_match(&shuffled)) {
            break;
        }
    }

    Suggestion { password: shuffled, changes }
}
