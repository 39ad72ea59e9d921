//! Highlight offsets and symbol cells for interactive rendering.

use crate::layout::NBSP;
use crate::model::{AlignedTriple, Column};

/// Mismatch and gap offsets plus the rendered symbol cells of one alignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnIndices {
    /// Mismatch columns + spacer, ascending
    pub mismatch: Vec<usize>,
    /// Gap columns + spacer, ascending
    pub gap: Vec<usize>,
    /// One cell per column; gaps are [`NBSP`] so they stay visible
    pub symbol_cells: Vec<String>,
}

/// Symbol cell for a column. Match markers are kept as `|`.
fn symbol_cell(column: Column) -> String {
    match column {
        Column::Gap => NBSP.to_string(),
        other => other.symbol().to_string(),
    }
}

/// Scans the columns once, offsetting every index by `spacer`.
pub fn extract(triple: &AlignedTriple, spacer: usize) -> ColumnIndices {
    let mut mismatch = Vec::new();
    let mut gap = Vec::new();
    let mut symbol_cells = Vec::with_capacity(triple.len());

    for (col, &column) in triple.columns().iter().enumerate() {
        match column {
            Column::Mismatch => mismatch.push(col + spacer),
            Column::Gap => gap.push(col + spacer),
            Column::Match => {}
        }
        symbol_cells.push(symbol_cell(column));
    }

    ColumnIndices {
        mismatch,
        gap,
        symbol_cells,
    }
}
