//! Data model for pairwise alignment layout and the viewer.
//!
//! This module contains:
//! - Sequence kinds and display-name normalization
//! - The aligned triple (top row, per-column classification, bottom row)
//! - Viewer state (viewport, cursor, mode)

use std::fmt;

use crate::align::{AlignmentError, AlignmentResult};
use crate::layout::{LayoutResult, NBSP};

/// Gap marker used in aligned rows.
pub const GAP_CHAR: char = '-';

/// Declared kind of the two input sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceKind {
    /// Nucleotides (A, G, C, T)
    Nucleotide,
    /// The 20 standard amino acids
    Protein,
}

impl SequenceKind {
    /// Maps a declared kind to the alphabet it is validated against.
    ///
    /// Only the exact strings `"DNA"` and `"Protein"` are recognized. Any other
    /// declaration is aligned without alphabet validation.
    pub fn from_declared(declared: &str) -> Option<Self> {
        match declared {
            "DNA" => Some(SequenceKind::Nucleotide),
            "Protein" => Some(SequenceKind::Protein),
            _ => None,
        }
    }

    /// Returns the allowed residues (upper case).
    pub fn alphabet(&self) -> &'static str {
        match self {
            SequenceKind::Nucleotide => "AGCT",
            SequenceKind::Protein => "ACDEFGHIKLMNPQRSTVWY",
        }
    }

    /// Returns true if `c` belongs to this kind's alphabet.
    pub fn allows(&self, c: char) -> bool {
        self.alphabet().contains(c)
    }
}

impl fmt::Display for SequenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceKind::Nucleotide => write!(f, "DNA"),
            SequenceKind::Protein => write!(f, "protein"),
        }
    }
}

/// Classification of one alignment column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    /// Identical residues
    Match,
    /// Two different residues
    Mismatch,
    /// One of the rows holds a gap
    Gap,
}

impl Column {
    pub const MATCH_SYMBOL: char = '|';
    pub const MISMATCH_SYMBOL: char = '.';
    pub const GAP_SYMBOL: char = ' ';

    /// Parses a symbol-line character.
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            Self::MATCH_SYMBOL => Some(Column::Match),
            Self::MISMATCH_SYMBOL => Some(Column::Mismatch),
            Self::GAP_SYMBOL => Some(Column::Gap),
            _ => None,
        }
    }

    /// Classifies a pair of aligned residues.
    pub fn classify(top: char, bottom: char) -> Self {
        if top == bottom {
            Column::Match
        } else if top == GAP_CHAR || bottom == GAP_CHAR {
            Column::Gap
        } else {
            Column::Mismatch
        }
    }

    /// Returns the symbol-line character for this column.
    pub fn symbol(self) -> char {
        match self {
            Column::Match => Self::MATCH_SYMBOL,
            Column::Mismatch => Self::MISMATCH_SYMBOL,
            Column::Gap => Self::GAP_SYMBOL,
        }
    }
}

/// A pairwise alignment: two gapped rows and one classification per column.
///
/// All three parts always have the same length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedTriple {
    top: Vec<char>,
    columns: Vec<Column>,
    bottom: Vec<char>,
}

impl AlignedTriple {
    /// Builds a triple from the three strings an aligner reports.
    pub fn new(top: &str, symbols: &str, bottom: &str) -> AlignmentResult<Self> {
        let top: Vec<char> = top.chars().collect();
        let bottom: Vec<char> = bottom.chars().collect();
        let columns = symbols
            .chars()
            .map(|c| {
                Column::from_symbol(c).ok_or_else(|| {
                    AlignmentError::MalformedTriple(format!("unknown symbol {:?}", c))
                })
            })
            .collect::<AlignmentResult<Vec<_>>>()?;

        if top.len() != columns.len() || bottom.len() != columns.len() {
            return Err(AlignmentError::MalformedTriple(format!(
                "row lengths differ (top: {}, symbols: {}, bottom: {})",
                top.len(),
                columns.len(),
                bottom.len()
            )));
        }

        Ok(Self {
            top,
            columns,
            bottom,
        })
    }

    /// Builds a triple from two gapped rows, classifying each column.
    pub fn from_rows(top: &str, bottom: &str) -> AlignmentResult<Self> {
        let top: Vec<char> = top.chars().collect();
        let bottom: Vec<char> = bottom.chars().collect();
        if top.len() != bottom.len() {
            return Err(AlignmentError::MalformedTriple(format!(
                "row lengths differ (top: {}, bottom: {})",
                top.len(),
                bottom.len()
            )));
        }
        let columns = top
            .iter()
            .zip(&bottom)
            .map(|(&a, &b)| Column::classify(a, b))
            .collect();
        Ok(Self {
            top,
            columns,
            bottom,
        })
    }

    /// Returns the number of alignment columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the alignment has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn top(&self) -> &[char] {
        &self.top
    }

    pub fn bottom(&self) -> &[char] {
        &self.bottom
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the symbol line (`|`, `.` or space per column).
    pub fn symbols(&self) -> String {
        self.columns.iter().map(|c| c.symbol()).collect()
    }
}

/// Replaces every run of whitespace in a display name with one underscore.
///
/// CLUSTAL names are whitespace-delimited tokens.
pub fn normalize_name(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    let mut in_whitespace = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                normalized.push('_');
            }
            in_whitespace = true;
        } else {
            normalized.push(c);
            in_whitespace = false;
        }
    }
    normalized
}

/// What a viewer row displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowRole {
    Ruler,
    Residues,
    Symbols,
}

/// One viewer line, split at the spacer into a sticky label and the
/// scrolling alignment cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRow {
    pub role: RowRole,
    pub label: String,
    pub cells: Vec<char>,
}

impl ViewRow {
    fn from_text(role: RowRole, text: &str, spacer: usize) -> Self {
        let chars: Vec<char> = text.replace(NBSP, " ").chars().collect();
        let split = spacer.min(chars.len());
        Self {
            role,
            label: chars[..split].iter().collect::<String>().trim_end().to_string(),
            cells: chars[split..].to_vec(),
        }
    }

    /// Gets the cell at an alignment column.
    pub fn cell(&self, col: usize) -> char {
        self.cells.get(col).copied().unwrap_or(' ')
    }
}

/// The visible window over the alignment columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Index of the first visible column
    pub first_col: usize,
    /// Number of visible columns
    pub visible_cols: usize,
}

impl Viewport {
    /// Creates a new viewport.
    pub fn new(visible_cols: usize) -> Self {
        Self {
            first_col: 0,
            visible_cols,
        }
    }

    /// Checks if a column is visible.
    pub fn is_col_visible(&self, col: usize) -> bool {
        col >= self.first_col && col < self.first_col + self.visible_cols
    }
}

/// Application mode for handling different input states.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Command input mode (after pressing ':')
    Command(String),
}

/// The complete viewer state.
#[derive(Debug)]
pub struct AppState {
    /// The rendered layout being viewed
    pub layout: LayoutResult,
    /// Declared kind, if recognized (drives residue colors)
    pub kind: Option<SequenceKind>,
    /// Rows in display order: ruler, top, symbols, bottom, ruler
    pub rows: Vec<ViewRow>,
    /// Highlight class per alignment column
    highlights: Vec<Option<Column>>,
    /// Number of alignment columns
    alignment_length: usize,
    /// Current viewport
    pub viewport: Viewport,
    /// Cursor column
    pub cursor: usize,
    /// Current application mode
    pub mode: AppMode,
    /// Whether the application should quit
    pub should_quit: bool,
    /// Status message to display
    pub status_message: Option<String>,
}

impl AppState {
    /// Creates the viewer state for a layout.
    ///
    /// Highlighted columns are recovered from the layout's index lists by
    /// subtracting its spacer.
    pub fn new(layout: LayoutResult, kind: Option<SequenceKind>) -> Self {
        let spacer = layout.spacer;
        let alignment_length = layout.alignment_symbols.len().saturating_sub(spacer);

        let mut highlights = vec![None; alignment_length];
        for (indices, class) in [(&layout.mismatch, Column::Mismatch), (&layout.gap, Column::Gap)] {
            for col in indices.iter().filter_map(|&i| i.checked_sub(spacer)) {
                if let Some(slot) = highlights.get_mut(col) {
                    *slot = Some(class);
                }
            }
        }

        let rows = vec![
            ViewRow::from_text(RowRole::Ruler, &layout.top_index, spacer),
            ViewRow::from_text(RowRole::Residues, &layout.alignment_top.concat(), spacer),
            ViewRow::from_text(RowRole::Symbols, &layout.alignment_symbols.concat(), spacer),
            ViewRow::from_text(RowRole::Residues, &layout.alignment_bottom.concat(), spacer),
            ViewRow::from_text(RowRole::Ruler, &layout.bottom_index, spacer),
        ];

        let status_message = Some(format!(
            "{} mismatches, {} gaps",
            layout.mismatch.len(),
            layout.gap.len()
        ));

        Self {
            layout,
            kind,
            rows,
            highlights,
            alignment_length,
            viewport: Viewport::new(0),
            cursor: 0,
            mode: AppMode::Normal,
            should_quit: false,
            status_message,
        }
    }

    /// Returns the number of alignment columns.
    pub fn alignment_length(&self) -> usize {
        self.alignment_length
    }

    /// Returns the highlight class of a column, if it is a mismatch or gap.
    pub fn highlight(&self, col: usize) -> Option<Column> {
        self.highlights.get(col).copied().flatten()
    }

    /// Updates the viewport width based on terminal dimensions.
    pub fn update_viewport_size(&mut self, cols: usize) {
        self.viewport.visible_cols = cols;
        self.ensure_cursor_visible();
    }

    /// Moves the cursor left by one column.
    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.ensure_cursor_visible();
        }
    }

    /// Moves the cursor right by one column.
    pub fn move_right(&mut self) {
        if self.cursor + 1 < self.alignment_length {
            self.cursor += 1;
            self.ensure_cursor_visible();
        }
    }

    /// Scrolls one screen to the left.
    pub fn page_left(&mut self) {
        let step = self.viewport.visible_cols.max(1);
        self.cursor = self.cursor.saturating_sub(step);
        self.viewport.first_col = self.viewport.first_col.saturating_sub(step);
        self.ensure_cursor_visible();
    }

    /// Scrolls one screen to the right.
    pub fn page_right(&mut self) {
        let step = self.viewport.visible_cols.max(1);
        self.cursor = (self.cursor + step).min(self.alignment_length.saturating_sub(1));
        self.viewport.first_col += step;
        self.ensure_cursor_visible();
    }

    pub fn goto_first_column(&mut self) {
        self.cursor = 0;
        self.ensure_cursor_visible();
    }

    pub fn goto_last_column(&mut self) {
        self.cursor = self.alignment_length.saturating_sub(1);
        self.ensure_cursor_visible();
    }

    /// Moves to a 1-indexed column.
    pub fn goto_column(&mut self, col: usize) {
        if col > 0 && col <= self.alignment_length {
            self.cursor = col - 1;
            self.ensure_cursor_visible();
        } else {
            self.status_message = Some(format!("Invalid column: {}", col));
        }
    }

    /// Jumps to the next mismatch or gap column after the cursor.
    pub fn next_difference(&mut self) {
        let found = (self.cursor + 1..self.alignment_length).find(|&c| self.highlight(c).is_some());
        self.jump_to_difference(found);
    }

    /// Jumps to the previous mismatch or gap column before the cursor.
    pub fn previous_difference(&mut self) {
        let found = (0..self.cursor).rev().find(|&c| self.highlight(c).is_some());
        self.jump_to_difference(found);
    }

    fn jump_to_difference(&mut self, found: Option<usize>) {
        match found {
            Some(col) => {
                self.cursor = col;
                self.status_message = self.highlight(col).map(|class| match class {
                    Column::Mismatch => format!("Mismatch at column {}", col + 1),
                    _ => format!("Gap at column {}", col + 1),
                });
                self.ensure_cursor_visible();
            }
            None => {
                self.status_message = Some("No further mismatches or gaps".to_string());
            }
        }
    }

    /// Ensures the cursor is visible in the viewport, with centering behavior.
    fn ensure_cursor_visible(&mut self) {
        if !self.viewport.is_col_visible(self.cursor) {
            self.center_column();
        }
        self.clamp_viewport();
    }

    /// Centers the current column in the viewport.
    fn center_column(&mut self) {
        if self.viewport.visible_cols > 0 {
            let half = self.viewport.visible_cols / 2;
            self.viewport.first_col = self.cursor.saturating_sub(half);
        }
    }

    /// Clamps the viewport to valid alignment bounds.
    fn clamp_viewport(&mut self) {
        if self.viewport.first_col + self.viewport.visible_cols > self.alignment_length {
            self.viewport.first_col = self
                .alignment_length
                .saturating_sub(self.viewport.visible_cols);
        }
        self.cursor = self.cursor.min(self.alignment_length.saturating_sub(1));
    }

    /// Enters command mode.
    pub fn enter_command_mode(&mut self) {
        self.mode = AppMode::Command(String::new());
    }

    /// Handles a character input in command mode.
    pub fn command_input(&mut self, c: char) {
        if let AppMode::Command(ref mut cmd) = self.mode {
            cmd.push(c);
        }
    }

    /// Handles backspace in command mode.
    pub fn command_backspace(&mut self) {
        if let AppMode::Command(ref mut cmd) = self.mode {
            cmd.pop();
            if cmd.is_empty() {
                self.mode = AppMode::Normal;
            }
        }
    }

    /// Executes the current command.
    pub fn execute_command(&mut self) {
        if let AppMode::Command(ref cmd) = self.mode.clone() {
            match cmd.as_str() {
                "q" | "quit" => self.should_quit = true,
                _ => {
                    if let Ok(col) = cmd.parse::<usize>() {
                        self.goto_column(col);
                    } else {
                        self.status_message = Some(format!("Unknown command: {}", cmd));
                    }
                }
            }
        }
        self.mode = AppMode::Normal;
    }

    /// Cancels command mode and returns to normal mode.
    pub fn cancel_command(&mut self) {
        self.mode = AppMode::Normal;
    }
}
