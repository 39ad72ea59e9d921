//! Position rulers for aligned rows.
//!
//! Every 10th residue of a row is labeled with its position, counting
//! residues only (gaps are skipped). A label of `k` digits swallows the `k - 1`
//! cells that follow it so the joined ruler does not drift to the right; near
//! the end of the row fewer cells may be swallowed.

use std::collections::BTreeMap;

use crate::layout::NBSP;
use crate::model::GAP_CHAR;

/// Residue count between two labels.
pub const LABEL_INTERVAL: usize = 10;

/// Returns `column -> label` for every 10th residue of `row`.
pub fn ruler_labels(row: &[char]) -> BTreeMap<usize, String> {
    let mut labels = BTreeMap::new();
    let mut residues = 0usize;

    for (col, &c) in row.iter().enumerate() {
        if c != GAP_CHAR {
            residues += 1;
            if residues % LABEL_INTERVAL == 0 {
                labels.insert(col, residues.to_string());
            }
        }
    }

    labels
}

/// Returns the ruler cells of `row`: labels and [`NBSP`] placeholders.
///
/// The result is shorter than `row` by the number of swallowed cells.
pub fn ruler_cells(row: &[char]) -> Vec<String> {
    let labels = ruler_labels(row);
    let mut cells = Vec::with_capacity(row.len());
    let mut col = 0;

    while col < row.len() {
        match labels.get(&col) {
            Some(label) => {
                cells.push(label.clone());
                col += label.len();
            }
            None => {
                cells.push(NBSP.to_string());
                col += 1;
            }
        }
    }

    cells
}

/// Joins the ruler of `row` into one string behind `spacer` placeholders.
pub fn ruler_string(row: &[char], spacer: usize) -> String {
    let mut ruler = NBSP.repeat(spacer);
    for cell in ruler_cells(row) {
        ruler.push_str(&cell);
    }
    ruler
}
