use crate::core::help::{HelpLoader, HelpPanel};
use crate::core::message::Message;
use crate::ui::layout::{self, ChatLayout};
use crate::ui::theme::Theme;
use crate::utils::scroll::ScrollCalculator;
use ratatui::layout::Rect;
use ratatui::prelude::Size;
use ratatui::text::{Line, Span};
use std::collections::VecDeque;
use std::time::Instant;

/// The help panel never takes more than this share of the screen.
const HELP_PANEL_MAX_DIVISOR: u16 = 2;

#[derive(Debug)]
pub struct UiState {
    pub messages: VecDeque<Message>,
    input: String,
    input_cursor_position: usize,
    pub is_loading: bool,
    pub help: HelpLoader,
    pub scroll_offset: u16,
    pub auto_scroll: bool,
    pub pulse_start: Instant,
    pub theme: Theme,
    pub title: String,
    pub exit_requested: bool,
    pub last_term_size: Size,
}

impl UiState {
    pub(crate) fn new_basic(theme: Theme, title: String) -> Self {
        Self {
            messages: VecDeque::new(),
            input: String::new(),
            input_cursor_position: 0,
            is_loading: false,
            help: HelpLoader::new(),
            scroll_offset: 0,
            auto_scroll: true,
            pulse_start: Instant::now(),
            theme,
            title,
            exit_requested: false,
            last_term_size: Size::default(),
        }
    }

    pub fn begin_loading(&mut self) {
        self.is_loading = true;
        self.pulse_start = Instant::now();
    }

    pub fn end_loading(&mut self) {
        self.is_loading = false;
    }

    /// The send affordance is live only while idle with a non-blank draft.
    pub fn can_submit(&self) -> bool {
        !self.is_loading && !self.input.trim().is_empty()
    }

    /// Animated dots shown in the pending bot entry, cycling every 1.2s.
    pub fn loading_indicator(&self) -> Option<&'static str> {
        if !self.is_loading {
            return None;
        }
        let phase = (self.pulse_start.elapsed().as_millis() / 400) % 3;
        Some(match phase {
            0 => ".",
            1 => "..",
            _ => "...",
        })
    }

    // Draft editing. The cursor is a char index into `input`.

    pub fn get_input_text(&self) -> &str {
        &self.input
    }

    pub fn get_input_cursor_position(&self) -> usize {
        self.input_cursor_position
    }

    pub fn set_input_text(&mut self, text: String) {
        self.input_cursor_position = text.chars().count();
        self.input = text;
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.input_cursor_position = 0;
    }

    pub fn insert_into_input(&mut self, text: &str) {
        let byte_index = self.cursor_byte_index();
        self.input.insert_str(byte_index, text);
        self.input_cursor_position += text.chars().count();
    }

    pub fn delete_backward(&mut self) {
        if self.input_cursor_position == 0 {
            return;
        }
        self.input_cursor_position -= 1;
        let byte_index = self.cursor_byte_index();
        self.input.remove(byte_index);
    }

    pub fn delete_forward(&mut self) {
        if self.input_cursor_position >= self.input.chars().count() {
            return;
        }
        let byte_index = self.cursor_byte_index();
        self.input.remove(byte_index);
    }

    pub fn move_cursor_left(&mut self) {
        self.input_cursor_position = self.input_cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        let len = self.input.chars().count();
        self.input_cursor_position = (self.input_cursor_position + 1).min(len);
    }

    pub fn move_cursor_to_start(&mut self) {
        self.input_cursor_position = 0;
    }

    pub fn move_cursor_to_end(&mut self) {
        self.input_cursor_position = self.input.chars().count();
    }

    fn cursor_byte_index(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.input_cursor_position)
            .map(|(index, _)| index)
            .unwrap_or(self.input.len())
    }

    // Transcript

    pub fn build_display_lines(&self) -> Vec<Line<'static>> {
        ScrollCalculator::build_display_lines(
            &self.messages,
            &self.theme,
            self.loading_indicator(),
        )
    }

    pub fn get_prewrapped_lines(&self, terminal_width: u16) -> Vec<Line<'static>> {
        ScrollCalculator::prewrap_lines(&self.build_display_lines(), terminal_width)
    }

    pub fn calculate_wrapped_line_count(&self, terminal_width: u16) -> u16 {
        ScrollCalculator::calculate_wrapped_line_count(&self.get_prewrapped_lines(terminal_width))
    }

    pub fn calculate_max_scroll_offset(&self, available_height: u16, terminal_width: u16) -> u16 {
        ScrollCalculator::calculate_max_scroll_offset(
            self.calculate_wrapped_line_count(terminal_width),
            available_height,
        )
    }

    /// Scroll up by `lines`. Leaving the bottom unpins auto-scroll.
    pub fn scroll_up(&mut self, lines: u16) {
        self.auto_scroll = false;
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    /// Scroll down by `lines`, re-pinning when the bottom is reached.
    pub fn scroll_down(&mut self, lines: u16, available_height: u16, terminal_width: u16) {
        let max_scroll = self.calculate_max_scroll_offset(available_height, terminal_width);
        self.scroll_offset = self.scroll_offset.saturating_add(lines).min(max_scroll);
        self.auto_scroll = self.scroll_offset >= max_scroll;
    }

    /// Page up by one transcript height minus one line of overlap.
    pub fn page_up(&mut self, available_height: u16) {
        self.scroll_up(available_height.saturating_sub(1).max(1));
    }

    pub fn page_down(&mut self, available_height: u16, terminal_width: u16) {
        self.scroll_down(
            available_height.saturating_sub(1).max(1),
            available_height,
            terminal_width,
        );
    }

    pub fn scroll_to_bottom_view(&mut self, available_height: u16, terminal_width: u16) {
        self.scroll_offset = self.calculate_max_scroll_offset(available_height, terminal_width);
        self.auto_scroll = true;
    }

    // Help panel

    pub fn help_panel_lines(&self) -> Vec<Line<'static>> {
        match self.help.panel() {
            HelpPanel::Hidden => Vec::new(),
            HelpPanel::Loading { .. } => vec![Line::from(Span::styled(
                "Loading help...",
                self.theme.help_text_style,
            ))],
            HelpPanel::Visible(content) => {
                let mut lines = vec![Line::from(Span::styled(
                    content.heading.clone(),
                    self.theme.help_heading_style,
                ))];
                for paragraph in &content.paragraphs {
                    lines.push(Line::from(""));
                    lines.push(Line::from(Span::styled(
                        paragraph.clone(),
                        self.theme.help_text_style,
                    )));
                }
                lines
            }
        }
    }

    /// Rows taken by the help panel including its border; zero when hidden.
    pub fn help_panel_height(&self, term_width: u16, term_height: u16) -> u16 {
        if !self.help.is_shown() {
            return 0;
        }
        let inner_width = term_width.saturating_sub(2);
        let wrapped = ScrollCalculator::prewrap_lines(&self.help_panel_lines(), inner_width);
        let wanted = ScrollCalculator::calculate_wrapped_line_count(&wrapped).saturating_add(2);
        wanted.min(term_height / HELP_PANEL_MAX_DIVISOR)
    }

    pub fn layout(&self, area: Rect) -> ChatLayout {
        ChatLayout::compute(area, self.help_panel_height(area.width, area.height))
    }

    pub fn transcript_height(&self, term_width: u16, term_height: u16) -> u16 {
        layout::transcript_height(term_height, self.help_panel_height(term_width, term_height))
    }
}
