use crate::core::message::Message;
use crate::ui::theme::Theme;
use ratatui::{style::Style, text::Line, text::Span};
use std::collections::VecDeque;
use unicode_width::UnicodeWidthChar;

/// Handles transcript line building and the scroll math that depends on it
pub struct ScrollCalculator;

impl ScrollCalculator {
    /// Build unwrapped display lines for the transcript. When `loading` is
    /// set, a pending bot entry showing that indicator is appended.
    pub fn build_display_lines(
        messages: &VecDeque<Message>,
        theme: &Theme,
        loading: Option<&str>,
    ) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        for msg in messages {
            let (label, prefix_style, text_style) = theme.sender_styles(msg.sender());
            let mut text_lines = msg.text().split('\n');
            let first = text_lines.next().unwrap_or_default();
            lines.push(Line::from(vec![
                Span::styled(label, prefix_style),
                Span::styled(first.to_string(), text_style),
            ]));
            for rest in text_lines {
                if rest.is_empty() {
                    lines.push(Line::from(""));
                } else {
                    lines.push(Line::from(Span::styled(rest.to_string(), text_style)));
                }
            }
            lines.push(Line::from(""));
        }

        if let Some(indicator) = loading {
            let (label, prefix_style, _) = theme.sender_styles(crate::core::message::Sender::Bot);
            lines.push(Line::from(vec![
                Span::styled(label, prefix_style),
                Span::styled(indicator.to_string(), theme.loading_indicator_style),
            ]));
        }

        lines
    }

    /// Pre-wrap the given lines to `terminal_width`, preserving styles and
    /// breaking at spaces where possible (overlong words are split). Rendering
    /// the result without ratatui's own wrapping keeps line counts exact.
    pub fn prewrap_lines(lines: &[Line], terminal_width: u16) -> Vec<Line<'static>> {
        let width = terminal_width as usize;
        let mut out: Vec<Line<'static>> = Vec::with_capacity(lines.len());

        for line in lines {
            let cells: Vec<(char, Style)> = line
                .spans
                .iter()
                .flat_map(|span| span.content.chars().map(move |ch| (ch, span.style)))
                .collect();

            if width == 0 {
                out.push(Self::cells_to_line(&cells));
                continue;
            }

            for row in Self::wrap_cells(&cells, width) {
                out.push(Self::cells_to_line(&row));
            }
        }

        out
    }

    fn wrap_cells(cells: &[(char, Style)], width: usize) -> Vec<Vec<(char, Style)>> {
        let mut rows = Vec::new();
        let mut row: Vec<(char, Style)> = Vec::new();
        let mut row_width = 0usize;

        for &(ch, style) in cells {
            let ch_width = cell_width(ch);
            if row_width + ch_width > width && !row.is_empty() {
                if ch == ' ' {
                    // A space at the break point is swallowed
                    rows.push(std::mem::take(&mut row));
                    row_width = 0;
                    continue;
                }
                match row.iter().rposition(|(c, _)| *c == ' ') {
                    Some(space) if space > 0 => {
                        let carried = row.split_off(space + 1);
                        row.pop();
                        rows.push(std::mem::replace(&mut row, carried));
                        row_width = row.iter().map(|(c, _)| cell_width(*c)).sum();
                    }
                    _ => {
                        rows.push(std::mem::take(&mut row));
                        row_width = 0;
                    }
                }
            }
            row.push((ch, style));
            row_width += ch_width;
        }

        rows.push(row);
        rows
    }

    fn cells_to_line(cells: &[(char, Style)]) -> Line<'static> {
        let mut spans: Vec<Span<'static>> = Vec::new();
        let mut run = String::new();
        let mut run_style: Option<Style> = None;

        for &(ch, style) in cells {
            if run_style != Some(style) {
                if let Some(prev) = run_style {
                    spans.push(Span::styled(std::mem::take(&mut run), prev));
                }
                run_style = Some(style);
            }
            run.push(ch);
        }
        if let Some(style) = run_style {
            spans.push(Span::styled(run, style));
        }

        if spans.is_empty() {
            Line::from("")
        } else {
            Line::from(spans)
        }
    }

    /// Lines are expected to be pre-wrapped; this is the single source of
    /// truth for visual line counts used by scroll calculations.
    pub fn calculate_wrapped_line_count(lines: &[Line]) -> u16 {
        lines.len().min(u16::MAX as usize) as u16
    }

    /// Offset that shows the last `available_height` lines.
    pub fn calculate_max_scroll_offset(total_lines: u16, available_height: u16) -> u16 {
        total_lines.saturating_sub(available_height)
    }
}

fn cell_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(0)
}
