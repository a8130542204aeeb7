use ratatui::style::{Color, Modifier, Style};

use crate::core::message::Sender;

#[derive(Debug, Clone)]
pub struct Theme {
    // Overall background color to paint the full frame
    pub background_color: Color,
    // Transcript styles
    pub user_prefix_style: Style,
    pub user_text_style: Style,
    pub bot_prefix_style: Style,
    pub bot_text_style: Style,
    pub error_prefix_style: Style,
    pub error_text_style: Style,
    pub loading_indicator_style: Style,

    // Chrome
    pub title_style: Style,
    pub button_style: Style,
    pub button_disabled_style: Style,
    pub help_border_style: Style,
    pub help_heading_style: Style,
    pub help_text_style: Style,

    // Input area
    pub input_border_style: Style,
    pub input_title_style: Style,
    pub input_text_style: Style,
    pub input_disabled_style: Style,
}

impl Theme {
    pub const NAMES: [&'static str; 2] = ["dark", "light"];

    pub fn dark_default() -> Self {
        Theme {
            background_color: Color::Black,
            user_prefix_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Cyan),
            bot_prefix_style: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            bot_text_style: Style::default().fg(Color::White),
            error_prefix_style: Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
            error_text_style: Style::default().fg(Color::LightRed),
            loading_indicator_style: Style::default().fg(Color::Gray),

            title_style: Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::BOLD),
            button_style: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            button_disabled_style: Style::default().fg(Color::DarkGray),
            help_border_style: Style::default().fg(Color::Gray),
            help_heading_style: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            help_text_style: Style::default().fg(Color::Gray),

            input_border_style: Style::default().fg(Color::Gray),
            input_title_style: Style::default().fg(Color::Gray),
            input_text_style: Style::default().fg(Color::White),
            input_disabled_style: Style::default().fg(Color::DarkGray),
        }
    }

    pub fn light() -> Self {
        Theme {
            background_color: Color::White,
            user_prefix_style: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Blue),
            bot_prefix_style: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            bot_text_style: Style::default().fg(Color::Black),
            error_prefix_style: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            error_text_style: Style::default().fg(Color::Red),
            loading_indicator_style: Style::default().fg(Color::DarkGray),

            title_style: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
            button_style: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            button_disabled_style: Style::default().fg(Color::Gray),
            help_border_style: Style::default().fg(Color::DarkGray),
            help_heading_style: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            help_text_style: Style::default().fg(Color::DarkGray),

            input_border_style: Style::default().fg(Color::Black),
            input_title_style: Style::default().fg(Color::DarkGray),
            input_text_style: Style::default().fg(Color::Black),
            input_disabled_style: Style::default().fg(Color::Gray),
        }
    }

    pub fn is_known(name: &str) -> bool {
        Self::NAMES
            .iter()
            .any(|known| known.eq_ignore_ascii_case(name))
    }

    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "light" => Self::light(),
            // Fallback
            _ => Self::dark_default(),
        }
    }

    /// Label and styles used for one sender's transcript entries.
    pub fn sender_styles(&self, sender: Sender) -> (&'static str, Style, Style) {
        match sender {
            Sender::User => ("You: ", self.user_prefix_style, self.user_text_style),
            Sender::Bot => ("Bot: ", self.bot_prefix_style, self.bot_text_style),
            Sender::Error => ("Error: ", self.error_prefix_style, self.error_text_style),
        }
    }
}
