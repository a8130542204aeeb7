use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};

pub const HEADER_HEIGHT: u16 = 1;
/// One line of draft text plus borders.
pub const INPUT_HEIGHT: u16 = 3;
pub const SEND_BUTTON_LABEL: &str = "[ Send ]";
const SEND_BUTTON_WIDTH: u16 = 10;

/// Screen regions for one frame. Computed from the terminal area and the
/// help panel height so that drawing and mouse hit-testing agree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChatLayout {
    pub header: Rect,
    pub help_button: Rect,
    pub help_panel: Rect,
    pub transcript: Rect,
    pub input: Rect,
    pub send_button: Rect,
}

impl ChatLayout {
    pub fn compute(area: Rect, help_panel_height: u16) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Length(help_panel_height),
                Constraint::Min(0),
                Constraint::Length(INPUT_HEIGHT),
            ])
            .split(area);

        let header = rows[0];
        let button_width = help_button_width().min(header.width);
        let help_button = Rect {
            x: header.x + header.width - button_width,
            y: header.y,
            width: button_width,
            height: header.height,
        };

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(SEND_BUTTON_WIDTH)])
            .split(rows[3]);

        Self {
            header,
            help_button,
            help_panel: rows[1],
            transcript: rows[2],
            input: bottom[0],
            send_button: bottom[1],
        }
    }
}

/// Width reserved for "[ Hide Help ]", the longer of the two labels.
fn help_button_width() -> u16 {
    "[ Hide Help ]".len() as u16
}

pub fn help_button_text(label: &str) -> String {
    format!("[ {label} ]")
}

pub fn hit(rect: Rect, column: u16, row: u16) -> bool {
    rect.contains(Position { x: column, y: row })
}

/// Height available to the transcript for a terminal of the given height.
pub fn transcript_height(term_height: u16, help_panel_height: u16) -> u16 {
    term_height
        .saturating_sub(HEADER_HEIGHT)
        .saturating_sub(help_panel_height)
        .saturating_sub(INPUT_HEIGHT)
}
