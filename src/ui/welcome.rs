use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::models::AssessmentDefinition;

use super::format_time;

pub fn render(frame: &mut Frame, area: Rect, definition: &AssessmentDefinition) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(11),
        Constraint::Fill(1),
    ])
    .split(area);

    let details = format!(
        "{} Questions · {} · Pass at {}%",
        definition.question_count(),
        format_time(definition.time_limit_seconds),
        definition.pass_threshold_percent
    );

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            definition.title.to_uppercase(),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(definition.course.as_str().fg(Color::Gray)),
        Line::from(""),
        Line::from(Span::styled(details, Style::default().fg(Color::DarkGray))),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "ENTER",
            Style::default().fg(Color::Green).bold(),
        )),
        Line::from("to start · q to quit".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, chunks[1]);
}
