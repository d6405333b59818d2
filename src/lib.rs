//! Password insight library
//!
//! Scores password strength, compares passwords against a list of
//! known-common ones, detects personal information hidden in them (leet-speak
//! aware), suggests hardened replacements, and narrates a step-by-step
//! simulation of how a password could be recovered by someone who knows the
//! owner.
//!
//! The recovery simulation is a teaching aid: it is handed the real password
//! and compares against it directly. It is not a cracking tool.
//!
//! # Features
//!
//! - `async` (default): Enables streaming the recovery simulation into a
//!   channel with cancellation support
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `PWD_CORPUS_PATH`: Custom path to the common-password corpus
//!   (default: `./assets/common_passwords.csv`)
//!
//! # Example
//!
//! ```rust,no_run
//! use pwd_insight::{crack_password, Analyzer, Corpus, CrackOptions, PersonalInfo};
//! use secrecy::SecretString;
//!
//! // Load the corpus once at startup and share it
//! let corpus = Corpus::load().expect("Failed to load corpus");
//! let analyzer = Analyzer::new(&corpus);
//!
//! let info = PersonalInfo::new().with_name("Alice").with_date_of_birth("1990-04-12");
//! let password = SecretString::new("@lice1990!".to_string().into());
//!
//! let report = analyzer.analyze(&password, &info).expect("password is not empty");
//! println!("Score: {}", report.final_score);
//! for line in &report.feedback {
//!     println!("{line}");
//! }
//!
//! let options = CrackOptions { personal: info, ..Default::default() };
//! for event in crack_password(password, options) {
//!     println!("{event}");
//! }
//! ```

mod corpus;
mod crack;
mod evaluator;
mod generator;
mod leakage;
mod personal;
mod scorer;
mod sections;
mod similarity;
mod suggestion;
mod types;

// Public API
pub use corpus::{get_corpus_path, Corpus, CorpusError, CORPUS_PATH_ENV};
pub use crack::{
    crack_password, CrackEvent, CrackMethod, CrackOptions, CrackStream, DEFAULT_TIME_LIMIT,
};
pub use evaluator::{
    AnalysisError, AnalysisReport, Analyzer, StrengthSummary, ADVICE, PERSONAL_INFO_PENALTY,
    SIMILARITY_PENALTY, SIMILARITY_THRESHOLD,
};
pub use generator::{
    generate_password, generate_password_with_rng, GeneratorOptions, MAX_GENERATED_LENGTH,
    MIN_GENERATED_LENGTH,
};
pub use leakage::detect_leakage;
pub use personal::{email_username, leet_normalize, PersonalField, PersonalInfo, LEET_MAP};
pub use scorer::{score_password, shannon_entropy_bits};
pub use sections::character_classes;
pub use similarity::{similarity_percentage, EditDistance, Levenshtein};
pub use suggestion::{build_suggestion, build_suggestion_with_rng};
pub use types::{
    CharacterClasses, FeedbackItem, FeedbackKind, LeakageReport, StrengthResult, Suggestion,
};

#[cfg(feature = "async")]
pub use crack::stream_crack_events_tx;
