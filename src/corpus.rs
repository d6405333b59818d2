//! Corpus management module
//!
//! Loads the list of known-common passwords into a read-only handle that
//! is constructed once and passed to the analyzer.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable selecting the corpus file.
pub const CORPUS_PATH_ENV: &str = "PWD_CORPUS_PATH";

const DEFAULT_CORPUS_PATH: &str = "./assets/common_passwords.csv";

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("Corpus file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to read corpus file: {0}")]
    ReadError(#[from] std::io::Error),
}

/// Returns the corpus file path.
///
/// Priority:
/// 1. Environment variable `PWD_CORPUS_PATH`
/// 2. Default path `./assets/common_passwords.csv`
pub fn get_corpus_path() -> PathBuf {
    std::env::var(CORPUS_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CORPUS_PATH))
}

/// Immutable list of known-common passwords, in file order.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    entries: Vec<String>,
    lookup: HashSet<String>,
}

impl Corpus {
    /// A corpus with no entries. Similarity against it is always 0.0.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a corpus from in-memory entries. Blank entries are dropped.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries: Vec<String> = entries
            .into_iter()
            .map(Into::into)
            .filter(|e| !e.trim().is_empty())
            .collect();
        let lookup = entries.iter().cloned().collect();
        Self { entries, lookup }
    }

    /// Loads the corpus from the path given by `PWD_CORPUS_PATH`
    /// (default `./assets/common_passwords.csv`).
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// unsafe { std::env::set_var("PWD_CORPUS_PATH", "/etc/myapp/common.csv"); }
    /// let corpus = pwd_insight::Corpus::load()?;
    /// ```
    pub fn load() -> Result<Self, CorpusError> {
        Self::from_path(get_corpus_path())
    }

    /// Loads the corpus from a specific file.
    ///
    /// One password per line. A leading `password` header, as written by a
    /// CSV export, is skipped. An empty file yields an empty corpus.
    ///
    /// # Errors
    ///
    /// Returns error if the file does not exist or cannot be read.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CorpusError> {
        let path = path.as_ref();

        if !path.exists() {
            #[cfg(feature = "tracing")]
            tracing::error!("Corpus loading FAILED: FileNotFound {:?}", path);
            return Err(CorpusError::FileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        let corpus = Self::parse(&content);

        #[cfg(feature = "tracing")]
        {
            if corpus.is_empty() {
                tracing::warn!("Corpus file {:?} is empty, similarity will always be 0", path);
            } else {
                tracing::info!("Corpus loaded: {} passwords from {:?}", corpus.len(), path);
            }
        }

        Ok(corpus)
    }

    fn parse(content: &str) -> Self {
        let mut lines = content
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .filter(|l| !l.trim().is_empty())
            .peekable();
        if lines.peek().is_some_and(|first| first.trim() == "password") {
            lines.next();
        }
        Self::from_entries(lines)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact, case-sensitive membership.
    pub fn contains(&self, password: &str) -> bool {
        self.lookup.contains(password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper to safely set env var in tests
    fn set_env(key: &str, value: &str) {
        // SAFETY: This is only for testing purposes in single-threaded test context
        unsafe { std::env::set_var(key, value); }
    }

    /// Helper to safely remove env var in tests
    fn remove_env(key: &str) {
        // SAFETY: This is only for testing purposes in single-threaded test context
        unsafe { std::env::remove_var(key); }
    }

    fn setup_with_tempfile(lines: &[&str]) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        for line in lines {
            writeln!(temp_file, "{}", line).expect("Failed to write");
        }
        temp_file
    }

    #[test]
    #[serial]
    fn test_get_corpus_path_default() {
        remove_env(CORPUS_PATH_ENV);

        let path = get_corpus_path();
        assert_eq!(path, PathBuf::from("./assets/common_passwords.csv"));
    }

    #[test]
    #[serial]
    fn test_get_corpus_path_from_env() {
        let custom_path = "/custom/path/common.csv";
        set_env(CORPUS_PATH_ENV, custom_path);

        let path = get_corpus_path();
        assert_eq!(path, PathBuf::from(custom_path));

        remove_env(CORPUS_PATH_ENV);
    }

    #[test]
    #[serial]
    fn test_load_file_not_found() {
        set_env(CORPUS_PATH_ENV, "/nonexistent/path/common.csv");

        let result = Corpus::load();
        assert!(matches!(result, Err(CorpusError::FileNotFound(_))));

        remove_env(CORPUS_PATH_ENV);
    }

    #[test]
    #[serial]
    fn test_load_from_env() {
        let temp_file = setup_with_tempfile(&["password123", "qwerty"]);
        set_env(CORPUS_PATH_ENV, temp_file.path().to_str().unwrap());

        let corpus = Corpus::load().expect("corpus should load");
        assert_eq!(corpus.len(), 2);

        remove_env(CORPUS_PATH_ENV);
    }

    #[test]
    fn test_from_path_skips_header_and_blank_lines() {
        let temp_file = setup_with_tempfile(&["password", "123456", "", "letmein", "password"]);

        let corpus = Corpus::from_path(temp_file.path()).unwrap();
        assert_eq!(corpus.entries(), &["123456", "letmein", "password"]);
        assert!(corpus.contains("password"));
    }

    #[test]
    fn test_from_path_empty_file_is_empty_corpus() {
        let temp_file = setup_with_tempfile(&[]);

        let corpus = Corpus::from_path(temp_file.path()).unwrap();
        assert!(corpus.is_empty());
    }

    #[test]
    fn test_contains_is_case_sensitive() {
        let corpus = Corpus::from_entries(["Dragon"]);
        assert!(corpus.contains("Dragon"));
        assert!(!corpus.contains("dragon"));
        assert!(!Corpus::empty().contains("Dragon"));
    }
}
