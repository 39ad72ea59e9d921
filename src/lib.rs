//! # seqpair - Pairwise Alignment Layout
//!
//! Aligns two sequences and renders the alignment two ways: a CLUSTAL W text
//! report wrapped at 60 columns, and character arrays with position rulers
//! and mismatch/gap offsets for highlighted display.
//!
//! ## Architecture
//!
//! - `model`: Sequence kinds, the aligned triple, name normalization, viewer state
//! - `validate`: Alphabet checks for declared sequence kinds
//! - `align`: The `Aligner` seam and the default global aligner
//! - `layout`: Spacers, rulers, CLUSTAL wrapping and highlight offsets
//! - `pipeline`: Request → layout (or error) assembly
//! - `fasta`: FASTA input for the CLI
//! - `event`, `ui`, `controller`: Terminal viewer
//!
//! ## Example
//!
//! ```
//! use seqpair::align::GlobalAligner;
//! use seqpair::pipeline::{align_pair, PairRequest};
//!
//! let layout = align_pair(&PairRequest::new("MKT", "MKT"), &GlobalAligner).unwrap();
//! assert!(layout.clustal.starts_with("CLUSTAL W"));
//! assert!(layout.mismatch.is_empty());
//! ```

pub mod align;
pub mod controller;
pub mod event;
pub mod fasta;
pub mod layout;
pub mod model;
pub mod pipeline;
pub mod ui;
pub mod validate;
