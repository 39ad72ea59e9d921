//! Alignment layout engine.
//!
//! Turns an [`AlignedTriple`] into two presentations that share one spacer:
//! - a CLUSTAL W text report wrapped at 60 columns (`clustal`)
//! - per-character arrays, position rulers and highlight offsets for an
//!   interactive renderer (`ruler`, `indices`)
//!
//! ## Column arithmetic
//!
//! ```text
//! Sequence_1      MK-T      name + s1 blanks + row
//! Sequence_2      MKAV      name + s2 blanks + row
//!                 || .      s3 blanks + symbols
//! ```
//!
//! Every highlight offset is a symbol-line column plus `s3`.

pub mod clustal;
pub mod indices;
pub mod ruler;

use log::debug;
use serde::Serialize;

use crate::model::AlignedTriple;

/// Number of alignment columns per CLUSTAL line group.
pub const LINE_WIDTH: usize = 60;
/// Minimum gap between the longest name and the sequence start.
pub const SPACER_PAD: usize = 6;
/// Placeholder cell for a visible blank in rendered arrays and rulers.
pub const NBSP: &str = "&nbsp;";

/// Column padding that lines both names up against a shared start column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpacerSet {
    /// Blanks after the first name
    pub top: usize,
    /// Blanks after the second name
    pub bottom: usize,
    /// Blanks before the symbol line (full name column width)
    pub symbols: usize,
}

impl SpacerSet {
    /// Computes the spacers for two normalized names.
    pub fn new(name1: &str, name2: &str) -> Self {
        let len1 = name1.chars().count();
        let len2 = name2.chars().count();
        let max_len = len1.max(len2);
        Self {
            top: max_len - len1 + SPACER_PAD,
            bottom: max_len - len2 + SPACER_PAD,
            symbols: max_len + SPACER_PAD,
        }
    }
}

/// Everything a consumer needs to display one pairwise alignment.
///
/// Field names are serialized verbatim for interop with existing clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutResult {
    /// `[name1] + s1 × NBSP + top row`
    #[serde(rename = "alignment-top")]
    pub alignment_top: Vec<String>,
    /// `s3 × NBSP + symbol cells`
    #[serde(rename = "alignment-symbols")]
    pub alignment_symbols: Vec<String>,
    /// `[name2] + s2 × NBSP + bottom row`
    #[serde(rename = "alignment-bottom")]
    pub alignment_bottom: Vec<String>,
    #[serde(rename = "top-index")]
    pub top_index: String,
    #[serde(rename = "bottom-index")]
    pub bottom_index: String,
    /// Mismatch columns, offset by `spacer`
    pub mismatch: Vec<usize>,
    /// Gap columns, offset by `spacer`
    pub gap: Vec<usize>,
    /// CLUSTAL W text report
    pub clustal: String,
    /// `s3`, needed to map highlight offsets back to alignment columns
    pub spacer: usize,
}

fn blanks(count: usize) -> impl Iterator<Item = String> {
    std::iter::repeat(NBSP.to_string()).take(count)
}

fn rendered_row(name: &str, spacer: usize, row: &[char]) -> Vec<String> {
    std::iter::once(name.to_string())
        .chain(blanks(spacer))
        .chain(row.iter().map(char::to_string))
        .collect()
}

/// Lays out an aligned triple.
///
/// `name1` and `name2` must already be normalized (see
/// [`crate::model::normalize_name`]). The output depends only on the inputs.
pub fn build_layout(triple: &AlignedTriple, name1: &str, name2: &str) -> LayoutResult {
    let spacers = SpacerSet::new(name1, name2);
    debug!(
        "layout of {} columns, spacers {}/{}/{}",
        triple.len(),
        spacers.top,
        spacers.bottom,
        spacers.symbols
    );

    let indices = indices::extract(triple, spacers.symbols);

    LayoutResult {
        alignment_top: rendered_row(name1, spacers.top, triple.top()),
        alignment_symbols: blanks(spacers.symbols).chain(indices.symbol_cells).collect(),
        alignment_bottom: rendered_row(name2, spacers.bottom, triple.bottom()),
        top_index: ruler::ruler_string(triple.top(), spacers.symbols),
        bottom_index: ruler::ruler_string(triple.bottom(), spacers.symbols),
        mismatch: indices.mismatch,
        gap: indices.gap,
        clustal: clustal::write_clustal(triple, name1, name2, &spacers),
        spacer: spacers.symbols,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spacers_equal_names() {
        let spacers = SpacerSet::new("Sequence_1", "Sequence_2");
        assert_eq!(spacers, SpacerSet { top: 6, bottom: 6, symbols: 16 });
    }

    #[test]
    fn test_spacers_unequal_names() {
        let spacers = SpacerSet::new("a", "longer_name");
        assert_eq!(spacers.top, 16);
        assert_eq!(spacers.bottom, 6);
        assert_eq!(spacers.symbols, 17);
        assert!(spacers.symbols >= spacers.top);
        assert!(spacers.symbols >= spacers.bottom);
    }

    #[test]
    fn test_spacers_empty_name() {
        let spacers = SpacerSet::new("", "");
        assert_eq!(spacers, SpacerSet { top: 6, bottom: 6, symbols: 6 });
    }

    #[test]
    fn test_rendered_array_lengths() {
        let triple = AlignedTriple::new("MK-TA", "|| .|", "MKAVA").unwrap();
        let layout = build_layout(&triple, "short", "much_longer");

        assert_eq!(layout.spacer, 17);
        assert_eq!(layout.alignment_top.len(), 1 + 12 + 5);
        assert_eq!(layout.alignment_bottom.len(), 1 + 6 + 5);
        assert_eq!(layout.alignment_symbols.len(), 17 + 5);
        assert_eq!(layout.alignment_top[0], "short");
        assert_eq!(layout.alignment_top[1], NBSP);
        assert_eq!(&layout.alignment_top[13..], ["M", "K", "-", "T", "A"]);
        assert_eq!(&layout.alignment_symbols[17..], ["|", "|", NBSP, ".", "|"]);
    }

    #[test]
    fn test_offsets_share_spacer() {
        let triple = AlignedTriple::new("MK-TA", "|| .|", "MKAVA").unwrap();
        let layout = build_layout(&triple, "short", "much_longer");

        assert_eq!(layout.mismatch, vec![3 + 17]);
        assert_eq!(layout.gap, vec![2 + 17]);
        for &i in layout.mismatch.iter().chain(&layout.gap) {
            assert_ne!(layout.alignment_symbols[i], "|");
        }
        assert!(layout.top_index.starts_with(&NBSP.repeat(17)));
        assert!(layout.clustal.contains(&format!("{}** .*\n", " ".repeat(17))));
    }

    #[test]
    fn test_layout_is_deterministic() {
        let triple = AlignedTriple::from_rows("MKTAYIAK-QRQISFVKSHFSRQ", "MKTAYIAKAQRQ-SFVKSHFSRQ").unwrap();
        let first = build_layout(&triple, "Sequence_1", "Sequence_2");
        let second = build_layout(&triple, "Sequence_1", "Sequence_2");
        assert_eq!(first, second);
    }

    #[test]
    fn test_serialized_field_names() {
        let triple = AlignedTriple::new("MKT", "||.", "MKV").unwrap();
        let layout = build_layout(&triple, "Sequence_1", "Sequence_2");
        let value = serde_json::to_value(&layout).unwrap();

        for key in [
            "alignment-top",
            "alignment-symbols",
            "alignment-bottom",
            "top-index",
            "bottom-index",
            "mismatch",
            "gap",
            "clustal",
            "spacer",
        ] {
            assert!(value.get(key).is_some(), "missing key {}", key);
        }
        assert_eq!(value["mismatch"], serde_json::json!([18]));
        assert_eq!(value["spacer"], serde_json::json!(16));
    }
}
