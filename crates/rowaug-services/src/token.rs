//! Unique token issuance.
//!
//! Tokens are short random alphanumeric strings meant to be typed by
//! humans and pasted into spreadsheets, so visually confusable characters
//! are substituted away and purely numeric tokens are avoided.
//!
//! Under [`TokenCase::Mixed`], per-letter case randomization can produce
//! two tokens that differ only in case. They are distinct strings but look
//! identical to people and to case-insensitive software; Lower and Upper
//! do not have the problem.

use std::collections::{HashSet, VecDeque};
use std::path::Path;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::debug;

use rowaug_ingest::{CsvReader, ReadMode, is_empty_record};
use rowaug_model::{AugmentError, Result};

/// Token length used when the caller does not specify one.
pub const DEFAULT_TOKEN_LENGTH: usize = 12;

const MAX_TRIES: usize = 5;

/// Case policy applied to issued tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenCase {
    Lower,
    #[default]
    Upper,
    /// Randomize the case of each letter independently (~50% each).
    Mixed,
}

/// Issues tokens that are unique within the lifetime of one instance.
///
/// Tokens are either generated randomly or, after [`read_from_file`] was
/// called, replayed from a pre-supplied list in file order.
///
/// [`read_from_file`]: TokenIssuer::read_from_file
#[derive(Debug)]
pub struct TokenIssuer {
    length: usize,
    case: TokenCase,
    alphabet: Vec<char>,
    issued: HashSet<String>,
    supplied: Option<VecDeque<String>>,
}

impl TokenIssuer {
    /// Creates an issuer for tokens of exactly `length` characters.
    pub fn new(length: usize, case: TokenCase) -> Result<Self> {
        if length == 0 {
            return Err(AugmentError::Configuration(
                "token length must be a positive integer".to_string(),
            ));
        }
        let mut alphabet: Vec<char> = ('a'..='z').chain('A'..='Z').chain('0'..='9').collect();
        alphabet.shuffle(&mut rand::thread_rng());
        Ok(Self {
            length,
            case,
            alphabet,
            issued: HashSet::new(),
            supplied: None,
        })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn case(&self) -> TokenCase {
        self.case
    }

    /// Number of tokens issued so far.
    pub fn issued_count(&self) -> usize {
        self.issued.len()
    }

    /// Reads pre-supplied tokens from a delimited file, one per non-empty
    /// line, first column only. The file must not have a header row.
    ///
    /// While the supplied queue is non-empty, [`get_unique_token`] replays
    /// these tokens in file order instead of generating random ones.
    ///
    /// [`get_unique_token`]: TokenIssuer::get_unique_token
    pub fn read_from_file(&mut self, path: impl AsRef<Path>, delimiter: u8) -> Result<()> {
        let mut reader = CsvReader::open_headerless(path.as_ref(), delimiter)?;
        let mut queue = VecDeque::new();
        while let Some(record) = reader.next_record(ReadMode::ReturnEveryLine)? {
            if is_empty_record(&record, false) {
                continue;
            }
            // the second column may carry extra information; ignore it
            queue.push_back(record[0].clone());
        }
        debug!(
            path = %path.as_ref().display(),
            tokens = queue.len(),
            "read supplied tokens"
        );
        self.supplied = Some(queue);
        Ok(())
    }

    /// Returns a token this instance has never issued before.
    ///
    /// Collisions with previously issued tokens are retried a bounded
    /// number of times before giving up with
    /// [`AugmentError::TokenExhaustion`].
    pub fn get_unique_token(&mut self) -> Result<String> {
        let mut candidate = self.create_token()?;
        let mut tries = 0;
        while tries < MAX_TRIES && self.issued.contains(&candidate) {
            candidate = self.create_token()?;
            tries += 1;
        }
        if self.issued.contains(&candidate) {
            return Err(AugmentError::TokenExhaustion(
                "failed to create a new unique token".to_string(),
            ));
        }
        self.issued.insert(candidate.clone());
        Ok(candidate)
    }

    /// Produces one candidate token: dequeued from the supplied list when
    /// one was read from file, otherwise generated randomly.
    fn create_token(&mut self) -> Result<String> {
        if let Some(queue) = &mut self.supplied {
            let Some(token) = queue.pop_front() else {
                return Err(AugmentError::TokenExhaustion(
                    "you requested more tokens than were supplied".to_string(),
                ));
            };
            self.check_supplied(&token)?;
            return Ok(token);
        }
        Ok(self.generate_token())
    }

    /// Supplied tokens are replayed as-is but still have to satisfy the
    /// configured length and case policy.
    fn check_supplied(&self, token: &str) -> Result<()> {
        if token.chars().count() < self.length {
            return Err(AugmentError::Configuration(format!(
                "tokens read from file are too short (current length setting is {})",
                self.length
            )));
        }
        match self.case {
            TokenCase::Lower if token.chars().any(|c| c.is_ascii_uppercase()) => {
                Err(AugmentError::Configuration(
                    "you requested lowercase tokens but the token contains uppercase letters"
                        .to_string(),
                ))
            }
            TokenCase::Upper if token.chars().any(|c| c.is_ascii_lowercase()) => {
                Err(AugmentError::Configuration(
                    "you requested uppercase tokens but the token contains lowercase letters"
                        .to_string(),
                ))
            }
            _ => Ok(()),
        }
    }

    fn generate_token(&self) -> String {
        let mut rng = rand::thread_rng();

        let mut token: String = (0..self.length)
            .map(|_| *self.alphabet.choose(&mut rng).unwrap_or(&'x'))
            .collect();

        // substitute characters that are easily confused when typed:
        // i/I/l/1 look alike, o/0 look alike, and a leading-digit token
        // with an 'e' in it tempts spreadsheets into scientific notation
        token = token
            .chars()
            .map(|c| match c {
                'i' => 'a',
                'I' => 'b',
                'l' => 'c',
                '1' => 'd',
                'o' => 'f',
                '0' => 'g',
                'e' => 'h',
                other => other,
            })
            .collect();

        token.truncate(self.length);

        // never purely numeric, spreadsheets would treat it as a number
        if token.chars().all(|c| c.is_ascii_digit()) {
            token.replace_range(0..1, "x");
        }

        match self.case {
            TokenCase::Lower => token.to_lowercase(),
            TokenCase::Upper => token.to_uppercase(),
            TokenCase::Mixed => token
                .chars()
                .map(|c| {
                    if c.is_ascii_alphabetic() {
                        if rng.gen_bool(0.5) {
                            c.to_ascii_uppercase()
                        } else {
                            c.to_ascii_lowercase()
                        }
                    } else {
                        c
                    }
                })
                .collect(),
        }
    }
}
