//! Simulated password recovery.
//!
//! `CrackStream` narrates, one event at a time, how a password could be
//! rebuilt character by character: first from the personal information an
//! attacker might know, then from common leet substitutions of it, and
//! finally by walking a fixed charset.
//!
//! This is a visualization, not an attack. Every step compares directly
//! against the real target password, which the stream is given up front.

use std::collections::VecDeque;
use std::fmt;
use std::iter::FusedIterator;
use std::time::{Duration, Instant};

use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, Serializer};

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::personal::PersonalInfo;

/// Budget used when the caller does not pick one.
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(120);

/// Letters, then digits, then ASCII punctuation.
const CHARSET: &str = concat!(
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ",
    "0123456789",
    "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~",
);

const SUBSTITUTIONS: [(char, &[char]); 10] = [
    ('a', &['@', '4']),
    ('e', &['3']),
    ('i', &['1', '!']),
    ('o', &['0']),
    ('s', &['5', '$']),
    ('l', &['1']),
    ('t', &['7']),
    ('b', &['8']),
    ('g', &['9']),
    ('z', &['2']),
];

const PLACEHOLDER: char = '_';

fn substitutes_for(original: char) -> &'static [char] {
    SUBSTITUTIONS
        .iter()
        .find(|(from, _)| *from == original)
        .map(|(_, subs)| *subs)
        .unwrap_or(&[])
}

/// How a character was recovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrackMethod {
    PersonalInfo,
    /// Leet substitute of the personal-info character carried here.
    Substitution(char),
    BruteForce,
}

/// One step of the recovery narrative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrackEvent {
    /// `position` is zero-based.
    Found { character: char, position: usize, method: CrackMethod },
    /// Everything recovered so far, `_` for positions still unknown.
    Progress(String),
    TimeLimitExceeded,
    Cracked(String),
    Failed,
}

impl CrackEvent {
    /// Whether this event ends the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CrackEvent::TimeLimitExceeded | CrackEvent::Cracked(_) | CrackEvent::Failed
        )
    }
}

impl fmt::Display for CrackEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrackEvent::Found { character, position, method } => {
                write!(f, "Found character '{}' at position {} via ", character, position + 1)?;
                match method {
                    CrackMethod::PersonalInfo => write!(f, "personal info"),
                    CrackMethod::Substitution(original) => {
                        write!(f, "substitution of '{}'", original)
                    }
                    CrackMethod::BruteForce => write!(f, "brute-force"),
                }
            }
            CrackEvent::Progress(partial) => write!(f, "Cracked so far: {}", partial),
            CrackEvent::TimeLimitExceeded => {
                write!(f, "Time limit exceeded. Password could not be found.")
            }
            CrackEvent::Cracked(password) => {
                write!(f, "Password cracked successfully: {}", password)
            }
            CrackEvent::Failed => {
                write!(f, "Failed to crack the password within the given time limit.")
            }
        }
    }
}

impl Serialize for CrackEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone)]
pub struct CrackOptions {
    /// Wall-clock budget shared by every charset scan of the run.
    pub time_limit: Duration,
    pub personal: PersonalInfo,
}

impl Default for CrackOptions {
    fn default() -> Self {
        Self { time_limit: DEFAULT_TIME_LIMIT, personal: PersonalInfo::default() }
    }
}

/// Lazy, single-pass recovery narrative for one target password.
///
/// No work happens until the first event is pulled; the clock starts then.
/// Dropping the stream abandons the remaining positions.
pub struct CrackStream {
    target: SecretString,
    length: usize,
    components: Vec<Vec<char>>,
    found: Vec<Option<char>>,
    position: usize,
    time_limit: Duration,
    started: Option<Instant>,
    pending: VecDeque<CrackEvent>,
    finished: bool,
}

impl fmt::Debug for CrackStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrackStream")
            .field("length", &self.length)
            .field("position", &self.position)
            .field("time_limit", &self.time_limit)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

impl CrackStream {
    pub fn new(target: SecretString, options: CrackOptions) -> Self {
        let length = target.expose_secret().chars().count();
        let components = options
            .personal
            .tokens()
            .into_iter()
            .map(|(_, value)| value.chars().collect())
            .collect();
        Self {
            target,
            length,
            components,
            found: vec![None; length],
            position: 0,
            time_limit: options.time_limit,
            started: None,
            pending: VecDeque::new(),
            finished: false,
        }
    }

    fn partial(&self) -> String {
        self.found.iter().map(|c| c.unwrap_or(PLACEHOLDER)).collect()
    }

    fn from_personal_info(&self, i: usize, ch: char) -> Option<CrackMethod> {
        let direct = self.components.iter().any(|info| {
            info.get(i)
                .is_some_and(|&known| ch.to_lowercase().eq(std::iter::once(known)))
        });
        if direct {
            return Some(CrackMethod::PersonalInfo);
        }

        self.components.iter().find_map(|info| {
            let &original = info.get(i)?;
            substitutes_for(original)
                .contains(&ch)
                .then_some(CrackMethod::Substitution(original))
        })
    }

    /// Walks the charset for `ch`. `None` when the time budget ran out first.
    fn brute_force(&self, started: Instant, ch: char) -> Option<Option<char>> {
        for candidate in CHARSET.chars() {
            if started.elapsed() >= self.time_limit {
                return None;
            }
            if candidate == ch {
                return Some(Some(candidate));
            }
        }
        Some(None)
    }

    fn resolve_position(&mut self, started: Instant) {
        let i = self.position;
        let Some(ch) = self.target.expose_secret().chars().nth(i) else {
            return;
        };

        if let Some(method) = self.from_personal_info(i, ch) {
            self.found[i] = Some(ch);
            self.pending.push_back(CrackEvent::Found { character: ch, position: i, method });
        } else {
            match self.brute_force(started, ch) {
                None => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!("crack simulation hit its time limit at position {}", i + 1);
                    self.pending.push_back(CrackEvent::TimeLimitExceeded);
                    self.finished = true;
                    return;
                }
                Some(Some(c)) => {
                    self.found[i] = Some(c);
                    self.pending.push_back(CrackEvent::Found {
                        character: c,
                        position: i,
                        method: CrackMethod::BruteForce,
                    });
                }
                Some(None) => {}
            }
        }

        self.pending.push_back(CrackEvent::Progress(self.partial()));
    }

    fn conclude(&mut self) {
        let cracked = self.partial();
        let event = if cracked == *self.target.expose_secret() {
            CrackEvent::Cracked(cracked)
        } else {
            CrackEvent::Failed
        };
        #[cfg(feature = "tracing")]
        tracing::debug!("crack simulation finished: {}", event);
        self.pending.push_back(event);
        self.finished = true;
    }
}

impl Iterator for CrackStream {
    type Item = CrackEvent;

    fn next(&mut self) -> Option<CrackEvent> {
        if let Some(event) = self.pending.pop_front() {
            return Some(event);
        }
        if self.finished {
            return None;
        }

        let started = *self.started.get_or_insert_with(Instant::now);
        if self.position < self.length {
            self.resolve_position(started);
            self.position += 1;
        } else {
            self.conclude();
        }
        self.pending.pop_front()
    }
}

impl FusedIterator for CrackStream {}

/// Starts a recovery simulation of `target`.
pub fn crack_password(target: SecretString, options: CrackOptions) -> CrackStream {
    CrackStream::new(target, options)
}

/// Drives `stream` into `tx`, one event at a time.
///
/// Stops as soon as `token` is cancelled, even while blocked on a full
/// channel, or when the receiver is dropped; the
/// stream and any positions it has not reached are then discarded.
#[cfg(feature = "async")]
pub async fn stream_crack_events_tx(
    stream: CrackStream,
    token: CancellationToken,
    tx: mpsc::Sender<CrackEvent>,
) {
    #[cfg(feature = "tracing")]
    tracing::info!("crack simulation is about to start...");

    for event in stream {
        if token.is_cancelled() {
            #[cfg(feature = "tracing")]
            tracing::info!("crack simulation cancelled");
            return;
        }

        tokio::select! {
            _ = token.cancelled() => {
                #[cfg(feature = "tracing")]
                tracing::info!("crack simulation cancelled while waiting on the receiver");
                return;
            }
            sent = tx.send(event) => {
                if let Err(_e) = sent {
                    #[cfg(feature = "tracing")]
                    tracing::warn!("crack event receiver went away: {}", _e);
                    return;
                }
            }
        }

        tokio::task::yield_now().await;
    }
}
