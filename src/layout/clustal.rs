//! CLUSTAL W text report.
//!
//! ```text
//! CLUSTAL W
//!
//! Sequence_1      MKTAYIAK-Q 10
//! Sequence_2      MKTAYIAKAQ 10
//!                 ******** *
//! ```
//!
//! The trailing number on each sequence line is the count of alignment
//! columns up to the end of the line, gaps included, not the residue count
//! other CLUSTAL writers print.

use crate::layout::{SpacerSet, LINE_WIDTH};
use crate::model::{AlignedTriple, Column};

pub const CLUSTAL_HEADER: &str = "CLUSTAL W\n\n";

/// Symbol used in the text report for a column.
fn report_symbol(column: Column) -> char {
    match column {
        Column::Match => '*',
        other => other.symbol(),
    }
}

/// Writes the text report, one line group per 60 alignment columns.
///
/// Each group is followed by a blank line. A final short group is written
/// only when the length is not a multiple of 60.
pub fn write_clustal(
    triple: &AlignedTriple,
    name1: &str,
    name2: &str,
    spacers: &SpacerSet,
) -> String {
    let mut out = String::from(CLUSTAL_HEADER);
    let top_pad = " ".repeat(spacers.top);
    let bottom_pad = " ".repeat(spacers.bottom);
    let symbol_pad = " ".repeat(spacers.symbols);

    let mut start = 0;
    while start < triple.len() {
        let end = (start + LINE_WIDTH).min(triple.len());

        let top: String = triple.top()[start..end].iter().collect();
        let bottom: String = triple.bottom()[start..end].iter().collect();
        let symbols: String = triple.columns()[start..end]
            .iter()
            .map(|&c| report_symbol(c))
            .collect();

        out.push_str(&format!("{}{}{} {}\n", name1, top_pad, top, end));
        out.push_str(&format!("{}{}{} {}\n", name2, bottom_pad, bottom, end));
        out.push_str(&format!("{}{}\n\n", symbol_pad, symbols));

        start = end;
    }

    out
}
