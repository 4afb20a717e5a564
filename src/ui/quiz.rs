use ratatui::{
    prelude::*,
    widgets::{Gauge, Paragraph, Wrap},
};

use crate::app::App;
use crate::engine::Attempt;
use crate::models::Question;

use super::{format_time, option_label};

/// Below this many seconds the countdown turns red.
const LOW_TIME_SECONDS: u32 = 60;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(attempt) = app.attempt() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_header(frame, chunks[0], attempt);
    render_progress(frame, chunks[1], attempt);
    render_gauge(frame, chunks[2], attempt);
    render_dots(frame, chunks[3], attempt);

    let question = attempt.current_question();
    render_question_text(frame, chunks[4], &question.prompt);
    render_options(
        frame,
        chunks[5],
        question,
        app.highlighted_option(),
        attempt.answer(attempt.current_index()),
    );
    render_controls(frame, chunks[6], app.can_submit());
}

fn render_header(frame: &mut Frame, area: Rect, attempt: &Attempt) {
    let [title_area, clock_area] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(10)]).areas(area);

    let definition = attempt.definition();
    let title = vec![
        Line::from(Span::styled(
            definition.title.as_str(),
            Style::default().fg(Color::White).bold(),
        )),
        Line::from(definition.course.as_str().fg(Color::DarkGray)),
    ];
    frame.render_widget(Paragraph::new(title), title_area);

    let remaining = attempt.remaining_seconds();
    let clock_style = if remaining < LOW_TIME_SECONDS {
        Style::default().fg(Color::Red).bold()
    } else {
        Style::default().fg(Color::Cyan)
    };
    let clock = Paragraph::new(Span::styled(format_time(remaining), clock_style))
        .alignment(Alignment::Right);
    frame.render_widget(clock, clock_area);
}

fn render_progress(frame: &mut Frame, area: Rect, attempt: &Attempt) {
    let [left, right] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(area);

    let position = format!(
        "Question {} of {}",
        attempt.current_index() + 1,
        attempt.question_count()
    );
    let answered = format!("{} answered", attempt.answered_count());

    frame.render_widget(Paragraph::new(position).fg(Color::DarkGray), left);
    frame.render_widget(
        Paragraph::new(answered)
            .alignment(Alignment::Right)
            .fg(Color::DarkGray),
        right,
    );
}

fn render_gauge(frame: &mut Frame, area: Rect, attempt: &Attempt) {
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
        .percent(attempt.progress_percent().min(100))
        .label("");
    frame.render_widget(gauge, area);
}

fn render_dots(frame: &mut Frame, area: Rect, attempt: &Attempt) {
    let spans: Vec<Span> = (0..attempt.question_count())
        .map(|index| {
            let style = if index == attempt.current_index() {
                Style::default().fg(Color::Black).bg(Color::Cyan).bold()
            } else if attempt.answer(index).is_some() {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Span::styled(format!(" {} ", index + 1), style)
        })
        .collect();

    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    highlighted: usize,
    chosen: Option<usize>,
) {
    let mut lines: Vec<Line> = Vec::with_capacity(question.options.len() * 2);

    for (index, option) in question.options.iter().enumerate() {
        let is_highlighted = index == highlighted;
        let is_chosen = chosen == Some(index);
        let style = match (is_highlighted, is_chosen) {
            (true, _) => Style::default().fg(Color::Cyan).bold(),
            (false, true) => Style::default().fg(Color::Green),
            (false, false) => Style::default().fg(Color::Gray),
        };
        let marker = if is_highlighted { ">" } else { " " };
        let check = if is_chosen { "  ✓" } else { "" };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", option_label(index)), style),
            Span::styled(option.text.as_str(), style),
            Span::styled(check, Style::default().fg(Color::Green)),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_controls(frame: &mut Frame, area: Rect, can_submit: bool) {
    let text = if can_submit {
        "j/k option  ·  enter select  ·  h/l question  ·  1-9 jump  ·  s submit  ·  q quit"
    } else {
        "j/k option  ·  enter select  ·  h/l question  ·  1-9 jump  ·  q quit"
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
