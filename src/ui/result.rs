use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::engine::{AssessmentResult, CompletionReason};
use crate::models::AssessmentDefinition;

const QUESTION_PREVIEW_LENGTH: usize = 55;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(result) = app.result() else {
        return;
    };
    let timed_out = app.completion_reason() == Some(CompletionReason::TimedOut);

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(9),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[1], &result, timed_out);
    render_question_breakdown(frame, chunks[2], app.definition(), &result, app.result_scroll());
    render_controls(frame, chunks[3], app.can_retake());
}

fn get_grade_color(result: &AssessmentResult) -> Color {
    if result.passed {
        Color::Green
    } else {
        Color::Yellow
    }
}

fn render_score_summary(frame: &mut Frame, area: Rect, result: &AssessmentResult, timed_out: bool) {
    let color = get_grade_color(result);
    let (headline, message) = if result.passed {
        ("Congratulations!", "You've successfully completed the quiz!")
    } else {
        (
            "Keep Learning!",
            "You can review and try again to improve your score.",
        )
    };

    let mut content = vec![Line::from("")];
    if timed_out {
        content.push(Line::from(Span::styled(
            "Time's up! Your answers were submitted automatically.",
            Style::default().fg(Color::Red),
        )));
    } else {
        content.push(Line::from(""));
    }
    content.extend([
        Line::from(Span::styled(headline, Style::default().fg(color).bold())),
        Line::from(message.fg(Color::DarkGray)),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "{}%  ({} / {})",
                result.score_percent, result.correct_count, result.total
            ),
            Style::default().fg(color).bold(),
        )),
        Line::from(""),
    ]);

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_question_breakdown(
    frame: &mut Frame,
    area: Rect,
    definition: &AssessmentDefinition,
    result: &AssessmentResult,
    scroll: usize,
) {
    let lines: Vec<Line> = result
        .per_question_correctness
        .iter()
        .zip(definition.questions.iter())
        .enumerate()
        .map(|(index, (is_correct, question))| {
            let (symbol, color) = if *is_correct {
                ("✓", Color::Green)
            } else {
                ("✗", Color::Red)
            };

            Line::from(vec![
                Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
                Span::styled(
                    format!("{:2}. ", index + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    truncate_question(&question.prompt),
                    Style::default().fg(Color::Gray),
                ),
            ])
        })
        .collect();

    let scroll = u16::try_from(scroll).unwrap_or(u16::MAX);
    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((scroll, 0));
    frame.render_widget(widget, area);
}

fn truncate_question(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count > QUESTION_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(QUESTION_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

fn render_controls(frame: &mut Frame, area: Rect, can_retake: bool) {
    let text = if can_retake {
        "j/k scroll  ·  r try again  ·  q quit"
    } else {
        "j/k scroll  ·  q quit"
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_question() {
        assert_eq!(truncate_question("short"), "short");
        let long = "x".repeat(QUESTION_PREVIEW_LENGTH + 5);
        let truncated = truncate_question(&long);
        assert_eq!(truncated.chars().count(), QUESTION_PREVIEW_LENGTH + 3);
        assert!(truncated.ends_with("..."));
    }
}
