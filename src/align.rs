//! Pairwise alignment.
//!
//! The layout engine only needs an [`AlignedTriple`]; producing one is the job
//! of an [`Aligner`]. The default implementation runs a global alignment with
//! rust-bio, scoring residue pairs from a substitution matrix and charging
//! nothing for gaps.

use std::fmt;

use bio::alignment::pairwise::Aligner as PairwiseAligner;
use bio::alignment::AlignmentOperation;
use bio::scores::{blosum62, pam200};
use log::debug;
use thiserror::Error;

use crate::model::{AlignedTriple, GAP_CHAR};

/// Errors that can occur during alignment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlignmentError {
    #[error("Cannot align an empty sequence")]
    EmptySequence,

    #[error("Residue '{residue}' cannot be scored with {matrix}")]
    UnscorableResidue { residue: char, matrix: ScoringMatrix },

    #[error("Malformed alignment: {0}")]
    MalformedTriple(String),
}

/// Result type for alignment operations.
pub type AlignmentResult<T> = Result<T, AlignmentError>;

/// Substitution matrix used to score residue pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringMatrix {
    Blosum62,
    Pam200,
}

impl ScoringMatrix {
    /// Selects the matrix for a declared sequence kind.
    ///
    /// Exactly `"Protein"` selects BLOSUM62; every other declaration,
    /// including unknown ones, selects PAM200.
    pub fn for_declared_kind(declared: &str) -> Self {
        if declared == "Protein" {
            ScoringMatrix::Blosum62
        } else {
            ScoringMatrix::Pam200
        }
    }

    /// Returns the scoring function for this matrix.
    pub fn score_fn(&self) -> fn(u8, u8) -> i32 {
        match self {
            ScoringMatrix::Blosum62 => blosum62,
            ScoringMatrix::Pam200 => pam200,
        }
    }

    /// Returns true if the matrix has a row for `residue`.
    pub fn can_score(&self, residue: u8) -> bool {
        residue.is_ascii_uppercase() || residue == b'*'
    }
}

impl fmt::Display for ScoringMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringMatrix::Blosum62 => write!(f, "BLOSUM62"),
            ScoringMatrix::Pam200 => write!(f, "PAM200"),
        }
    }
}

/// Produces a pairwise alignment of two residue sequences.
pub trait Aligner {
    fn align(&self, seq1: &str, seq2: &str, matrix: ScoringMatrix) -> AlignmentResult<AlignedTriple>;
}

const GAP_OPEN: i32 = 0;
const GAP_EXTEND: i32 = 0;

/// Global alignment with matrix scores and no gap penalties.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalAligner;

impl GlobalAligner {
    fn check_scorable(sequence: &str, matrix: ScoringMatrix) -> AlignmentResult<()> {
        match sequence
            .chars()
            .find(|&c| !c.is_ascii() || !matrix.can_score(c as u8))
        {
            Some(residue) => Err(AlignmentError::UnscorableResidue { residue, matrix }),
            None => Ok(()),
        }
    }
}

impl Aligner for GlobalAligner {
    fn align(&self, seq1: &str, seq2: &str, matrix: ScoringMatrix) -> AlignmentResult<AlignedTriple> {
        if seq1.is_empty() || seq2.is_empty() {
            return Err(AlignmentError::EmptySequence);
        }
        Self::check_scorable(seq1, matrix)?;
        Self::check_scorable(seq2, matrix)?;

        let x = seq1.as_bytes();
        let y = seq2.as_bytes();
        debug!("aligning {} x {} residues with {}", x.len(), y.len(), matrix);

        let mut aligner =
            PairwiseAligner::with_capacity(x.len(), y.len(), GAP_OPEN, GAP_EXTEND, matrix.score_fn());
        let alignment = aligner.global(x, y);

        let mut top = String::with_capacity(alignment.operations.len());
        let mut bottom = String::with_capacity(alignment.operations.len());
        let (mut i, mut j) = (alignment.xstart, alignment.ystart);

        for op in &alignment.operations {
            match op {
                AlignmentOperation::Match | AlignmentOperation::Subst => {
                    top.push(x[i] as char);
                    bottom.push(y[j] as char);
                    i += 1;
                    j += 1;
                }
                AlignmentOperation::Del => {
                    top.push(GAP_CHAR);
                    bottom.push(y[j] as char);
                    j += 1;
                }
                AlignmentOperation::Ins => {
                    top.push(x[i] as char);
                    bottom.push(GAP_CHAR);
                    i += 1;
                }
                AlignmentOperation::Xclip(_) | AlignmentOperation::Yclip(_) => {
                    return Err(AlignmentError::MalformedTriple(
                        "clipping in a global alignment".to_string(),
                    ));
                }
            }
        }

        debug!("alignment score {} over {} columns", alignment.score, top.len());
        AlignedTriple::from_rows(&top, &bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Column;

    fn ungapped(row: &[char]) -> String {
        row.iter().filter(|&&c| c != GAP_CHAR).collect()
    }

    #[test]
    fn test_matrix_dispatch() {
        assert_eq!(ScoringMatrix::for_declared_kind("Protein"), ScoringMatrix::Blosum62);
        assert_eq!(ScoringMatrix::for_declared_kind("DNA"), ScoringMatrix::Pam200);
        assert_eq!(ScoringMatrix::for_declared_kind("protein"), ScoringMatrix::Pam200);
        assert_eq!(ScoringMatrix::for_declared_kind("RNA"), ScoringMatrix::Pam200);
    }

    #[test]
    fn test_identical_protein() {
        let triple = GlobalAligner
            .align("MKT", "MKT", ScoringMatrix::Blosum62)
            .unwrap();
        assert_eq!(triple.symbols(), "|||");
        assert_eq!(ungapped(triple.top()), "MKT");
    }

    #[test]
    fn test_identical_dna() {
        let triple = GlobalAligner
            .align("ACGTACGT", "ACGTACGT", ScoringMatrix::Pam200)
            .unwrap();
        assert_eq!(triple.symbols(), "||||||||");
    }

    #[test]
    fn test_rows_keep_all_residues() {
        let triple = GlobalAligner
            .align("MKTAYIAKQR", "MKAYIAKQ", ScoringMatrix::Blosum62)
            .unwrap();
        assert_eq!(triple.top().len(), triple.bottom().len());
        assert_eq!(ungapped(triple.top()), "MKTAYIAKQR");
        assert_eq!(ungapped(triple.bottom()), "MKAYIAKQ");
        assert!(triple.columns().contains(&Column::Gap));
    }

    #[test]
    fn test_empty_sequence() {
        let result = GlobalAligner.align("", "MKT", ScoringMatrix::Blosum62);
        assert_eq!(result, Err(AlignmentError::EmptySequence));
    }

    #[test]
    fn test_unscorable_residue() {
        let result = GlobalAligner.align("AC1T", "ACGT", ScoringMatrix::Pam200);
        assert_eq!(
            result,
            Err(AlignmentError::UnscorableResidue {
                residue: '1',
                matrix: ScoringMatrix::Pam200,
            })
        );
    }
}
