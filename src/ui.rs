//! TUI rendering module.
//!
//! This module handles all visual rendering using ratatui:
//! - Sticky label panel with the sequence names on the left
//! - Scrolling alignment panel: rulers, both rows and the symbol line
//! - Mismatch and gap columns highlighted from the layout's index lists
//! - Status bar with position and mode info

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::model::{AppMode, AppState, Column, RowRole, SequenceKind};

/// Upper bound for the label panel width (including borders).
const MAX_LABEL_PANEL_WIDTH: u16 = 40;
/// Minimum width for the alignment panel.
const MIN_SEQ_PANEL_WIDTH: u16 = 10;
/// Height of the status bar.
const STATUS_BAR_HEIGHT: u16 = 1;

/// Residue color scheme.
pub trait ColorScheme {
    fn get_color(&self, c: char) -> Color;
}

/// DNA nucleotide color scheme.
pub struct DnaColorScheme;

impl ColorScheme for DnaColorScheme {
    fn get_color(&self, c: char) -> Color {
        match c.to_ascii_uppercase() {
            'A' => Color::Red,
            'C' => Color::Green,
            'G' => Color::Yellow,
            'T' => Color::Blue,
            _ => Color::DarkGray,
        }
    }
}

/// Amino acid color scheme, grouped by physicochemical class.
pub struct AminoAcidColorScheme;

impl ColorScheme for AminoAcidColorScheme {
    fn get_color(&self, c: char) -> Color {
        match c.to_ascii_uppercase() {
            // Hydrophobic
            'A' | 'V' | 'I' | 'L' | 'M' | 'F' | 'W' | 'P' => Color::Yellow,
            // Polar
            'S' | 'T' | 'N' | 'Q' | 'C' | 'G' | 'Y' => Color::Green,
            // Charged positive
            'K' | 'R' | 'H' => Color::Blue,
            // Charged negative
            'D' | 'E' => Color::Red,
            // Gap or unknown
            _ => Color::DarkGray,
        }
    }
}

fn color_scheme(kind: Option<SequenceKind>) -> &'static dyn ColorScheme {
    match kind {
        Some(SequenceKind::Nucleotide) => &DnaColorScheme,
        _ => &AminoAcidColorScheme,
    }
}

/// Width of the label panel for a layout spacer (including borders).
pub fn label_panel_width(spacer: usize) -> u16 {
    u16::try_from(spacer)
        .unwrap_or(u16::MAX)
        .saturating_add(2)
        .min(MAX_LABEL_PANEL_WIDTH)
}

/// Renders the complete UI.
pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let rows_height = state.rows.len() as u16 + 2;

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(rows_height),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);

    let content_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(label_panel_width(state.layout.spacer)),
            Constraint::Min(MIN_SEQ_PANEL_WIDTH),
        ])
        .split(main_layout[0]);

    render_labels_panel(frame, state, content_layout[0]);
    render_alignment_panel(frame, state, content_layout[1]);
    render_legend(frame, main_layout[1]);
    render_status_bar(frame, state, main_layout[2]);
}

/// Renders the sticky label panel.
fn render_labels_panel(frame: &mut Frame, state: &AppState, area: Rect) {
    let max_label_len = area.width.saturating_sub(2) as usize;

    let lines: Vec<Line> = state
        .rows
        .iter()
        .map(|row| {
            let label = if row.label.chars().count() > max_label_len && max_label_len > 0 {
                let kept: String = row.label.chars().take(max_label_len - 1).collect();
                format!("{}…", kept)
            } else {
                row.label.clone()
            };
            Line::from(Span::styled(label, Style::default().fg(Color::White)))
        })
        .collect();

    let block = Block::default().borders(Borders::ALL).title("Sequences");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Style of one alignment cell.
fn cell_style(state: &AppState, role: RowRole, col: usize, c: char) -> Style {
    if col == state.cursor {
        return Style::default()
            .fg(Color::Black)
            .bg(Color::White)
            .add_modifier(Modifier::BOLD);
    }

    let base = match role {
        RowRole::Ruler => Style::default().fg(Color::DarkGray),
        RowRole::Residues => Style::default().fg(color_scheme(state.kind).get_color(c)),
        RowRole::Symbols => Style::default().fg(Color::White),
    };

    if role == RowRole::Ruler {
        return base;
    }
    match state.highlight(col) {
        Some(Column::Mismatch) => base.bg(Color::Yellow).fg(Color::Black),
        Some(Column::Gap) => base.bg(Color::Red).fg(Color::White),
        _ => base,
    }
}

/// Renders the scrolling alignment panel.
fn render_alignment_panel(frame: &mut Frame, state: &AppState, area: Rect) {
    let start_col = state.viewport.first_col;
    let end_col = (start_col + state.viewport.visible_cols).min(state.alignment_length());

    let lines: Vec<Line> = state
        .rows
        .iter()
        .map(|row| {
            let spans: Vec<Span> = (start_col..end_col)
                .map(|col| {
                    let c = row.cell(col);
                    Span::styled(c.to_string(), cell_style(state, row.role, col, c))
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let title = format!(
        "Alignment [Col: {} | View: {}-{}/{}]",
        state.cursor + 1,
        start_col + 1,
        end_col,
        state.alignment_length()
    );

    let block = Block::default().borders(Borders::ALL).title(title);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Renders the highlight legend and key hints.
fn render_legend(frame: &mut Frame, area: Rect) {
    let legend = Line::from(vec![
        Span::raw(" "),
        Span::styled(" mismatch ", Style::default().fg(Color::Black).bg(Color::Yellow)),
        Span::raw(" "),
        Span::styled(" gap ", Style::default().fg(Color::White).bg(Color::Red)),
        Span::styled(
            "   h/l move  n/N next/prev difference  :<col> go to column  :q quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(legend), area);
}

/// Renders the status bar at the bottom.
fn render_status_bar(frame: &mut Frame, state: &AppState, area: Rect) {
    let (mode_str, command_str) = match &state.mode {
        AppMode::Normal => ("NORMAL", String::new()),
        AppMode::Command(cmd) => ("COMMAND", format!(":{}", cmd)),
    };

    let position_info = format!(
        "Col {}/{} | {} mismatches, {} gaps ",
        state.cursor + 1,
        state.alignment_length(),
        state.layout.mismatch.len(),
        state.layout.gap.len()
    );

    let message = state.status_message.as_deref().unwrap_or("");

    let left_content = if command_str.is_empty() {
        format!(" {} | {} ", mode_str, message)
    } else {
        format!(" {} | {} ", mode_str, command_str)
    };

    let left_len = left_content.len();
    let status_line = Line::from(vec![
        Span::styled(left_content, Style::default().fg(Color::Black).bg(Color::Cyan)),
        Span::styled(
            " ".repeat((area.width as usize).saturating_sub(left_len + position_info.len())),
            Style::default().bg(Color::Cyan),
        ),
        Span::styled(
            position_info,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    frame.render_widget(Paragraph::new(status_line), area);
}

/// Calculates the number of visible alignment columns.
pub fn calculate_visible_columns(terminal_width: u16, spacer: usize) -> usize {
    // Account for both panels' borders
    terminal_width.saturating_sub(label_panel_width(spacer) + 2) as usize
}
