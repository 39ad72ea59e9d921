//! Request-to-layout pipeline.
//!
//! `PairRequest` → alphabet check → upper-case → name normalization →
//! alignment → layout. Failures become an `{"error": ...}` response.

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::align::{Aligner, AlignmentError, ScoringMatrix};
use crate::layout::{build_layout, LayoutResult};
use crate::model::{normalize_name, SequenceKind};
use crate::validate::{validate_pair, ValidationError};

pub const DEFAULT_SEQTYPE: &str = "Protein";
pub const DEFAULT_SEQ1_NAME: &str = "Sequence_1";
pub const DEFAULT_SEQ2_NAME: &str = "Sequence_2";

/// Errors that can occur while aligning a pair.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PairError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Alignment(#[from] AlignmentError),

    #[error("Invalid alignment request: {0}")]
    InvalidRequest(String),

    #[error("Failed to serialize response: {0}")]
    Serialization(String),
}

/// Result type for pair alignment.
pub type PairResult<T> = Result<T, PairError>;

fn default_seqtype() -> String {
    DEFAULT_SEQTYPE.to_string()
}

fn default_seq1_name() -> String {
    DEFAULT_SEQ1_NAME.to_string()
}

fn default_seq2_name() -> String {
    DEFAULT_SEQ2_NAME.to_string()
}

/// Two raw sequences with their declared kind and display names.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PairRequest {
    pub seq1: String,
    pub seq2: String,
    #[serde(default = "default_seqtype")]
    pub seqtype: String,
    #[serde(default = "default_seq1_name")]
    pub seq1name: String,
    #[serde(default = "default_seq2_name")]
    pub seq2name: String,
}

impl PairRequest {
    /// Creates a protein request with default names.
    pub fn new(seq1: impl Into<String>, seq2: impl Into<String>) -> Self {
        Self {
            seq1: seq1.into(),
            seq2: seq2.into(),
            seqtype: default_seqtype(),
            seq1name: default_seq1_name(),
            seq2name: default_seq2_name(),
        }
    }

    /// Parses a JSON request.
    pub fn from_json(content: &str) -> PairResult<Self> {
        serde_json::from_str(content).map_err(|e| PairError::InvalidRequest(e.to_string()))
    }

    /// Sets the declared sequence kind.
    pub fn with_seqtype(mut self, seqtype: impl Into<String>) -> Self {
        self.seqtype = seqtype.into();
        self
    }

    /// Sets both display names.
    pub fn with_names(mut self, seq1name: impl Into<String>, seq2name: impl Into<String>) -> Self {
        self.seq1name = seq1name.into();
        self.seq2name = seq2name.into();
        self
    }
}

/// Aligns a request and lays out the result.
///
/// The aligner is not called when validation fails.
pub fn align_pair<A: Aligner>(request: &PairRequest, aligner: &A) -> PairResult<LayoutResult> {
    if let Some(kind) = SequenceKind::from_declared(&request.seqtype) {
        validate_pair(&request.seq1, &request.seq2, kind)?;
    } else {
        debug!("no alphabet check for declared kind {:?}", request.seqtype);
    }

    let seq1 = request.seq1.to_uppercase();
    let seq2 = request.seq2.to_uppercase();

    let name1 = normalize_name(&request.seq1name);
    let name2 = normalize_name(&request.seq2name);

    let matrix = ScoringMatrix::for_declared_kind(&request.seqtype);
    let triple = aligner.align(&seq1, &seq2, matrix)?;

    Ok(build_layout(&triple, &name1, &name2))
}

/// Wire shape of a pair alignment: an error message or the full layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Error { error: String },
    Layout(LayoutResult),
}

impl From<PairResult<LayoutResult>> for Response {
    fn from(result: PairResult<LayoutResult>) -> Self {
        match result {
            Ok(layout) => Response::Layout(layout),
            Err(e) => Response::Error {
                error: e.to_string(),
            },
        }
    }
}

/// Aligns a request and wraps the outcome as a [`Response`].
pub fn respond<A: Aligner>(request: &PairRequest, aligner: &A) -> Response {
    align_pair(request, aligner).into()
}

/// Aligns a request and writes the [`Response`] as pretty JSON.
///
/// Validation and alignment failures are part of the JSON, not errors.
pub fn respond_json<A: Aligner>(request: &PairRequest, aligner: &A) -> PairResult<String> {
    let mut json = serde_json::to_string_pretty(&respond(request, aligner))
        .map_err(|e| PairError::Serialization(e.to_string()))?;
    json.push('\n');
    Ok(json)
}

/// What batch mode writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// CLUSTAL W report; failures are returned as errors
    #[default]
    Clustal,
    /// JSON response; failures become `{"error": ...}`
    Json,
}

/// Renders one request in the given batch format.
pub fn render_batch<A: Aligner>(
    request: &PairRequest,
    aligner: &A,
    format: OutputFormat,
) -> PairResult<String> {
    match format {
        OutputFormat::Clustal => Ok(align_pair(request, aligner)?.clustal),
        OutputFormat::Json => respond_json(request, aligner),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::align::AlignmentResult;
    use crate::model::AlignedTriple;

    /// Returns a fixed triple and records what it was asked.
    struct FixedAligner {
        triple: (&'static str, &'static str, &'static str),
        calls: Cell<usize>,
        matrix: Cell<Option<ScoringMatrix>>,
    }

    impl FixedAligner {
        fn new(top: &'static str, symbols: &'static str, bottom: &'static str) -> Self {
            Self {
                triple: (top, symbols, bottom),
                calls: Cell::new(0),
                matrix: Cell::new(None),
            }
        }
    }

    impl Aligner for FixedAligner {
        fn align(&self, _: &str, _: &str, matrix: ScoringMatrix) -> AlignmentResult<AlignedTriple> {
            self.calls.set(self.calls.get() + 1);
            self.matrix.set(Some(matrix));
            let (top, symbols, bottom) = self.triple;
            AlignedTriple::new(top, symbols, bottom)
        }
    }

    #[test]
    fn test_all_match_round_trip() {
        let aligner = FixedAligner::new("MKT", "|||", "MKT");
        let layout = align_pair(&PairRequest::new("MKT", "MKT"), &aligner).unwrap();
        assert_eq!(&layout.alignment_symbols[16..], ["|", "|", "|"]);
        assert!(layout.mismatch.is_empty());
        assert!(layout.gap.is_empty());
    }

    #[test]
    fn test_mismatch_detection() {
        let aligner = FixedAligner::new("MKT", "||.", "MKV");
        let layout = align_pair(&PairRequest::new("MKT", "MKV"), &aligner).unwrap();
        assert_eq!(layout.spacer, 16);
        assert_eq!(layout.alignment_symbols[18], ".");
        assert_eq!(layout.mismatch, vec![18]);
        assert!(layout.gap.is_empty());
    }

    #[test]
    fn test_alphabet_rejection_skips_aligner() {
        let aligner = FixedAligner::new("AGCT", "||||", "AGCT");
        let request = PairRequest::new("AGCX", "AGCT").with_seqtype("DNA");
        let result = align_pair(&request, &aligner);

        assert!(matches!(
            result,
            Err(PairError::Validation(ValidationError::InvalidAlphabet { .. }))
        ));
        assert_eq!(aligner.calls.get(), 0);
    }

    #[test]
    fn test_lowercase_input_is_accepted() {
        let aligner = FixedAligner::new("AGCT", "||||", "AGCT");
        let request = PairRequest::new("agct", "AGct").with_seqtype("DNA");
        assert!(align_pair(&request, &aligner).is_ok());
        assert_eq!(aligner.calls.get(), 1);
    }

    #[test]
    fn test_matrix_follows_declared_kind() {
        let aligner = FixedAligner::new("MKT", "|||", "MKT");

        align_pair(&PairRequest::new("MKT", "MKT"), &aligner).unwrap();
        assert_eq!(aligner.matrix.get(), Some(ScoringMatrix::Blosum62));

        let request = PairRequest::new("MKT", "MKT").with_seqtype("Peptide");
        align_pair(&request, &aligner).unwrap();
        assert_eq!(aligner.matrix.get(), Some(ScoringMatrix::Pam200));
    }

    #[test]
    fn test_unknown_kind_skips_validation() {
        let aligner = FixedAligner::new("MKT", "|||", "MKT");
        let request = PairRequest::new("MK?", "MKT").with_seqtype("other");
        assert!(align_pair(&request, &aligner).is_ok());
    }

    #[test]
    fn test_names_are_normalized() {
        let aligner = FixedAligner::new("MKT", "|||", "MKT");
        let request = PairRequest::new("MKT", "MKT").with_names("human  insulin", "mouse insulin");
        let layout = align_pair(&request, &aligner).unwrap();

        assert_eq!(layout.alignment_top[0], "human_insulin");
        assert_eq!(layout.alignment_bottom[0], "mouse_insulin");
        assert!(layout.clustal.contains("human_insulin      MKT 3\n"));
    }

    #[test]
    fn test_malformed_triple_surfaces() {
        let aligner = FixedAligner::new("MKT", "||", "MKT");
        let result = align_pair(&PairRequest::new("MKT", "MKT"), &aligner);
        assert!(matches!(
            result,
            Err(PairError::Alignment(AlignmentError::MalformedTriple(_)))
        ));
    }

    #[test]
    fn test_error_response_shape() {
        let aligner = FixedAligner::new("MKT", "|||", "MKT");
        let request = PairRequest::new("MKB", "MKT");
        let json = serde_json::to_value(respond(&request, &aligner)).unwrap();

        assert_eq!(json.as_object().map(|o| o.len()), Some(1));
        let message = json["error"].as_str().unwrap();
        assert!(message.starts_with("Your protein sequences contain unexpected characters (B)"));
    }

    #[test]
    fn test_layout_response_is_flat() {
        let aligner = FixedAligner::new("MKT", "||.", "MKV");
        let json = serde_json::to_value(respond(&PairRequest::new("MKT", "MKV"), &aligner)).unwrap();
        assert!(json.get("error").is_none());
        assert_eq!(json["spacer"], serde_json::json!(16));
        assert_eq!(json["gap"], serde_json::json!([]));
    }

    #[test]
    fn test_request_defaults() {
        let request: PairRequest = serde_json::from_str(r#"{"seq1": "MKT", "seq2": "MKV"}"#).unwrap();
        assert_eq!(request, PairRequest::new("MKT", "MKV"));

        let request: PairRequest = serde_json::from_str(
            r#"{"seq1": "ACGT", "seq2": "ACGA", "seqtype": "DNA", "seq1name": "a b", "seq2name": "c"}"#,
        )
        .unwrap();
        assert_eq!(request.seqtype, "DNA");
        assert_eq!(request.seq1name, "a b");
    }

    #[test]
    fn test_request_from_json() {
        let request = PairRequest::from_json(r#"{"seq1": "MKT", "seq2": "MKV"}"#).unwrap();
        assert_eq!(request, PairRequest::new("MKT", "MKV"));

        let result = PairRequest::from_json(r#"{"seq1": "MKT"}"#);
        assert!(matches!(result, Err(PairError::InvalidRequest(_))));
        let result = PairRequest::from_json("not json");
        assert!(matches!(result, Err(PairError::InvalidRequest(_))));
    }

    #[test]
    fn test_render_batch_formats() {
        let aligner = FixedAligner::new("MKT", "||.", "MKV");
        let request = PairRequest::new("MKT", "MKV");

        let clustal = render_batch(&request, &aligner, OutputFormat::Clustal).unwrap();
        assert!(clustal.starts_with("CLUSTAL W\n\n"));

        let json = render_batch(&request, &aligner, OutputFormat::Json).unwrap();
        assert!(json.ends_with("}\n"));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["mismatch"], serde_json::json!([18]));
    }

    #[test]
    fn test_render_batch_rejection() {
        let aligner = FixedAligner::new("AGCT", "||||", "AGCT");
        let request = PairRequest::new("AGCX", "AGCT").with_seqtype("DNA");

        let result = render_batch(&request, &aligner, OutputFormat::Clustal);
        assert!(matches!(result, Err(PairError::Validation(_))));

        let json = render_batch(&request, &aligner, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["error"].as_str().unwrap().contains("(X)"));
        assert_eq!(aligner.calls.get(), 0);
    }
}
