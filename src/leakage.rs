//! Personal-information leakage detection.
//!
//! Every field is checked against the password in both raw lowercase form
//! and leet-normalized form. When the whole value is not present, every
//! fragment of three or more characters is tried, longest first, and each
//! match is reported.

use std::collections::BTreeSet;

use secrecy::{ExposeSecret, SecretString};

use crate::personal::{leet_normalize, PersonalField, PersonalInfo};
use crate::types::{FeedbackItem, LeakageReport};

const MIN_FRAGMENT_LEN: usize = 3;

fn appears_in(fragment: &str, pwd_lower: &str, pwd_norm: &str) -> bool {
    pwd_lower.contains(fragment) || pwd_norm.contains(&leet_normalize(fragment))
}

/// Distinct substrings of `value` with at least three characters that appear
/// in the password, longest first and alphabetical within a length.
///
/// Lengths beyond the password's are skipped; lowercasing and leet mapping
/// never shorten a fragment, so those cannot match.
fn matching_fragments(value: &str, pwd_lower: &str, pwd_norm: &str) -> Vec<String> {
    let chars: Vec<char> = value.chars().collect();
    let longest = chars
        .len()
        .min(pwd_lower.chars().count().max(pwd_norm.chars().count()));

    let mut matches = Vec::new();
    for len in (MIN_FRAGMENT_LEN..=longest).rev() {
        let found: BTreeSet<String> = chars
            .windows(len)
            .map(|window| window.iter().collect::<String>())
            .filter(|fragment| appears_in(fragment, pwd_lower, pwd_norm))
            .collect();
        matches.extend(found);
    }
    matches
}

/// Checks `password` for every personal-information field in `info`.
pub fn detect_leakage(password: &SecretString, info: &PersonalInfo) -> LeakageReport {
    let pwd_lower = password.expose_secret().to_lowercase();
    let pwd_norm = leet_normalize(&pwd_lower);
    let mut report = LeakageReport::default();

    for field in PersonalField::REPORT_ORDER {
        let value = info.normalized(field);
        if value.is_empty() {
            report
                .feedback
                .push(FeedbackItem::strength(format!("No {field} provided for analysis.")));
            continue;
        }

        if appears_in(&value, &pwd_lower, &pwd_norm) {
            report
                .feedback
                .push(FeedbackItem::weakness(format!("Password contains your {field}.")));
            report.used_personal = true;
            continue;
        }

        let fragments = matching_fragments(&value, &pwd_lower, &pwd_norm);
        for fragment in &fragments {
            report.feedback.push(FeedbackItem::weakness(format!(
                "Password contains part of your {field} ('{fragment}')."
            )));
        }

        if !fragments.is_empty() {
            report.used_personal = true;
        } else {
            report
                .feedback
                .push(FeedbackItem::strength(format!("Password does not contain your {field}.")));
        }
    }

    #[cfg(feature = "tracing")]
    tracing::debug!("leakage detection finished, personal data found: {}", report.used_personal);

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FeedbackKind;

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string().into())
    }

    #[test]
    fn test_fragments_longest_first() {
        let frags = matching_fragments("abcd", "xxabcdxx", "xxabcdxx");
        assert_eq!(frags, vec!["abcd", "abc", "bcd"]);
        assert!(matching_fragments("ab", "ab", "ab").is_empty());
    }

    #[test]
    fn test_fragments_are_distinct() {
        let frags = matching_fragments("abcabc", "xabcx", "xabcx");
        assert_eq!(frags, vec!["abc"]);
    }

    #[test]
    fn test_long_field_only_tries_password_sized_fragments() {
        let address = "springfield lane ".repeat(70);
        assert!(address.chars().count() > 1000);
        let info = PersonalInfo::new().with_address(address);
        let report = detect_leakage(&secret("Spring#2024"), &info);
        let partials = report
            .feedback
            .iter()
            .filter(|f| f.message.contains("part of your address"))
            .count();
        assert_eq!(partials, 10);
    }

    #[test]
    fn test_contains_name() {
        let info = PersonalInfo::new().with_name("alice123");
        let report = detect_leakage(&secret("alice123!X9"), &info);
        assert!(report.used_personal);
        assert!(report.feedback.contains(&FeedbackItem::weakness("Password contains your name.")));
    }

    #[test]
    fn test_empty_name_is_not_flagged() {
        let info = PersonalInfo::new().with_name("");
        let report = detect_leakage(&secret("alice123!X9"), &info);
        assert!(!report.used_personal);
        assert!(report.feedback.contains(&FeedbackItem::strength("No name provided for analysis.")));
        assert!(report.feedback.iter().all(|f| f.kind == FeedbackKind::Strength));
        assert_eq!(report.feedback.len(), 7);
    }

    #[test]
    fn test_leet_speak_matches() {
        let info = PersonalInfo::new().with_name("Alice");
        let report = detect_leakage(&secret("@l1c3"), &info);
        assert!(report.used_personal);
        assert!(report.feedback.contains(&FeedbackItem::weakness("Password contains your name.")));
    }

    #[test]
    fn test_case_insensitive_match() {
        let info = PersonalInfo::new().with_company("Acme");
        let report = detect_leakage(&secret("xxACMExx"), &info);
        assert!(report.feedback.contains(&FeedbackItem::weakness("Password contains your company.")));
    }

    #[test]
    fn test_partial_match_reports_every_fragment() {
        let info = PersonalInfo::new().with_location("springfield");
        let report = detect_leakage(&secret("Spring#2024"), &info);
        assert!(report.used_personal);
        let partials: Vec<&FeedbackItem> = report
            .feedback
            .iter()
            .filter(|f| f.message.contains("part of your location"))
            .collect();
        // "spring" and every fragment of it with 3+ chars
        assert_eq!(partials.len(), 10);
        assert_eq!(
            partials[0].message,
            "Password contains part of your location ('spring')."
        );
    }

    #[test]
    fn test_email_uses_username() {
        let info = PersonalInfo::new().with_email_address("jdoe@example.com");
        let report = detect_leakage(&secret("Jdoe!2024"), &info);
        assert!(report
            .feedback
            .contains(&FeedbackItem::weakness("Password contains your email username.")));
    }

    #[test]
    fn test_unrelated_field_reports_strength() {
        let info = PersonalInfo::new().with_address("42 Wallaby Way");
        let report = detect_leakage(&secret("Zq7!mK#2"), &info);
        assert!(!report.used_personal);
        assert!(report
            .feedback
            .contains(&FeedbackItem::strength("Password does not contain your address.")));
    }
}
