mod quiz;
mod result;
mod welcome;

use ratatui::{prelude::*, widgets::Block};

use crate::app::{App, Screen};

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.screen() {
        Screen::Welcome => welcome::render(frame, area, app.definition()),
        Screen::Taking => quiz::render(frame, area, app),
        Screen::Result => result::render(frame, area, app),
    }
}

/// `m:ss`, as shown on the countdown.
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Option letter for display: A, B, C, ...
fn option_label(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .filter(|i| *i < 26)
        .map_or('?', |i| char::from(b'A' + i))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(20 * 60), "20:00");
        assert_eq!(format_time(61), "1:01");
        assert_eq!(format_time(9), "0:09");
        assert_eq!(format_time(0), "0:00");
    }

    #[test]
    fn test_option_label() {
        assert_eq!(option_label(0), 'A');
        assert_eq!(option_label(5), 'F');
        assert_eq!(option_label(26), '?');
    }
}
