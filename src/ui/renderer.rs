use crate::core::app::App;
use crate::ui::layout::{help_button_text, ChatLayout, SEND_BUTTON_LABEL};
use crate::utils::scroll::ScrollCalculator;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

const INPUT_PLACEHOLDER: &str = "Type your message...";

pub fn ui(f: &mut Frame, app: &App) {
    let area = f.area();
    let theme = &app.ui.theme;

    f.render_widget(
        Block::default().style(Style::default().bg(theme.background_color)),
        area,
    );

    let layout = app.ui.layout(area);
    render_header(f, app, &layout);
    if layout.help_panel.height > 0 {
        render_help_panel(f, app, layout.help_panel);
    }
    render_transcript(f, app, layout.transcript);
    render_input(f, app, &layout);
}

fn render_header(f: &mut Frame, app: &App, layout: &ChatLayout) {
    let theme = &app.ui.theme;
    let title = Paragraph::new(Span::styled(format!(" {}", app.ui.title), theme.title_style));
    f.render_widget(title, layout.header);

    let button = Paragraph::new(Span::styled(
        help_button_text(app.ui.help.button_label()),
        theme.button_style,
    ))
    .alignment(Alignment::Right);
    f.render_widget(button, layout.help_button);
}

fn render_help_panel(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.ui.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.help_border_style);
    let inner_width = block.inner(area).width;
    let lines = ScrollCalculator::prewrap_lines(&app.ui.help_panel_lines(), inner_width);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_transcript(f: &mut Frame, app: &App, area: Rect) {
    let lines = app.ui.get_prewrapped_lines(area.width);
    let total = ScrollCalculator::calculate_wrapped_line_count(&lines);
    let max_offset = ScrollCalculator::calculate_max_scroll_offset(total, area.height);
    // Lines are pre-wrapped, so no Wrap here
    let scroll_offset = app.ui.scroll_offset.min(max_offset);
    f.render_widget(Paragraph::new(lines).scroll((scroll_offset, 0)), area);
}

fn render_input(f: &mut Frame, app: &App, layout: &ChatLayout) {
    let theme = &app.ui.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.input_border_style)
        .title(Span::styled(" Message ", theme.input_title_style));
    let inner = block.inner(layout.input);

    let text = app.ui.get_input_text();
    let (visible, cursor_x) =
        visible_input_window(text, app.ui.get_input_cursor_position(), inner.width);
    let content = if text.is_empty() {
        Line::from(Span::styled(INPUT_PLACEHOLDER, theme.input_disabled_style))
    } else {
        Line::from(Span::styled(visible, theme.input_text_style))
    };
    f.render_widget(Paragraph::new(content).block(block), layout.input);

    let button_style = if app.ui.can_submit() {
        theme.button_style
    } else {
        theme.button_disabled_style
    };
    let button = Paragraph::new(Span::styled(SEND_BUTTON_LABEL, button_style))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.input_border_style),
        );
    f.render_widget(button, layout.send_button);

    if inner.width > 0 && inner.height > 0 {
        f.set_cursor_position((inner.x + cursor_x, inner.y));
    }
}

/// Slice of the single-line draft that keeps the cursor on screen, along
/// with the cursor's column within that slice.
fn visible_input_window(text: &str, cursor: usize, width: u16) -> (String, u16) {
    let width = width as usize;
    if width == 0 {
        return (String::new(), 0);
    }

    let chars: Vec<char> = text.chars().collect();
    let cursor = cursor.min(chars.len());
    let char_width = |ch: char| UnicodeWidthChar::width(ch).unwrap_or(0);

    // Walk back from the cursor while the prefix still leaves a cell for it
    let mut start = cursor;
    let mut before = 0usize;
    while start > 0 {
        let w = char_width(chars[start - 1]);
        if before + w >= width {
            break;
        }
        before += w;
        start -= 1;
    }

    let mut visible = String::new();
    let mut used = 0usize;
    for &ch in &chars[start..] {
        let w = char_width(ch);
        if used + w > width {
            break;
        }
        used += w;
        visible.push(ch);
    }

    (visible, before as u16)
}
