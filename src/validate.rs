//! Alphabet validation for input sequences.
//!
//! Both sequences of a pair are checked against the alphabet of the declared
//! kind before any alignment work is done.

use std::collections::BTreeSet;

use log::warn;
use thiserror::Error;

use crate::model::SequenceKind;

/// Errors that can occur during validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error(
        "Your {kind} sequences contain unexpected characters ({}). Please ensure they only contain {}.",
        join_chars(.found),
        expected_alphabet(.kind)
    )]
    InvalidAlphabet { kind: SequenceKind, found: Vec<char> },
}

/// Result type for validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

fn join_chars(chars: &[char]) -> String {
    chars.iter().map(char::to_string).collect::<Vec<_>>().join(", ")
}

fn expected_alphabet(kind: &SequenceKind) -> &'static str {
    match kind {
        SequenceKind::Nucleotide => "the letters A, G, C, and T",
        SequenceKind::Protein => "single-letter amino acid codes",
    }
}

/// Returns the characters of `sequence`, upper-cased, outside the kind's alphabet.
fn disallowed(sequence: &str, kind: SequenceKind) -> BTreeSet<char> {
    sequence
        .chars()
        .map(|c| c.to_ascii_uppercase())
        .filter(|&c| !kind.allows(c))
        .collect()
}

/// Checks both sequences of a pair against the alphabet of `kind`.
///
/// Letters are compared case-insensitively. The error lists every offending
/// character of either sequence, upper-cased, sorted and without duplicates.
pub fn validate_pair(seq1: &str, seq2: &str, kind: SequenceKind) -> ValidationResult<()> {
    let mut found = disallowed(seq1, kind);
    found.extend(disallowed(seq2, kind));

    if found.is_empty() {
        return Ok(());
    }

    let found: Vec<char> = found.into_iter().collect();
    warn!("rejected {} input: unexpected characters {:?}", kind, found);
    Err(ValidationError::InvalidAlphabet { kind, found })
}
