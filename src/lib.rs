//! # timed-quiz
//!
//! A timed, multiple-choice assessment engine with a terminal front end.
//!
//! The engine ([`Attempt`], [`evaluate`], [`Countdown`]) is usable on its
//! own; [`Quiz`] wires it to a ratatui interface.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use timed_quiz::{Quiz, QuizError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     // Load an assessment from a JSON file
//!     let quiz = Quiz::from_json("quiz.json")?;
//!
//!     // Take it in the terminal
//!     if let Some(result) = quiz.run().await? {
//!         println!("scored {}%", result.score_percent);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod app;
pub mod config;
mod data;
mod engine;
mod error;
pub mod logging;
mod models;
pub mod terminal;
mod ui;

use std::path::Path;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind};
use futures_util::StreamExt;
use log::{info, warn};

pub use app::{App, Screen};
pub use config::{Args, Config};
pub use data::{load_definition_from_json, sample_definition};
pub use engine::{
    evaluate, AssessmentResult, Attempt, AttemptStatus, CompletionReason, Countdown, DEFAULT_TICK,
};
pub use error::{LoadError, PreconditionError, QuizError, ValidationError};
pub use models::{validate, AnswerOption, AssessmentDefinition, Question, MAX_AUTHORED_OPTIONS};
pub use ui::format_time;

/// A quiz that can be taken in the terminal.
pub struct Quiz {
    app: App,
    tick_period: Duration,
}

impl Quiz {
    /// Create a quiz for a definition. Invalid definitions are refused.
    pub fn new(definition: AssessmentDefinition) -> Result<Self, ValidationError> {
        Ok(Self {
            app: App::new(definition)?,
            tick_period: DEFAULT_TICK,
        })
    }

    /// Load a quiz from a JSON file.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use timed_quiz::Quiz;
    ///
    /// let quiz = Quiz::from_json("quiz.json").expect("Failed to load quiz");
    /// ```
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self, QuizError> {
        let definition = load_definition_from_json(path)?;
        Ok(Self::new(definition)?)
    }

    /// Build a quiz from command-line configuration, falling back to the
    /// bundled sample when no file is given.
    pub fn from_config(config: &Config) -> Result<Self, QuizError> {
        let mut definition = match &config.quiz_path {
            Some(path) => load_definition_from_json(path)?,
            None => sample_definition()?,
        };
        config.apply(&mut definition);

        Ok(Self::new(definition)?.with_tick_period(config.tick_period))
    }

    pub fn with_tick_period(mut self, period: Duration) -> Self {
        self.tick_period = period;
        self
    }

    /// Take over the terminal and run until the user quits.
    ///
    /// Returns the result of the last completed attempt, if any.
    pub async fn run(mut self) -> Result<Option<AssessmentResult>, QuizError> {
        let mut terminal = terminal::TerminalSession::acquire()?;
        run_event_loop(&mut terminal, &mut self.app, self.tick_period).await?;
        drop(terminal);
        Ok(self.app.result())
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

async fn run_event_loop(
    terminal: &mut terminal::TerminalSession,
    app: &mut App,
    tick_period: Duration,
) -> Result<(), QuizError> {
    let mut events = EventStream::new();
    let mut countdown: Option<Countdown> = None;

    loop {
        sync_countdown(app, &mut countdown, tick_period);
        terminal.draw(|frame| ui::render(frame, app))?;

        tokio::select! {
            Some(()) = next_tick(&mut countdown) => {
                match app.tick(1) {
                    Ok(AttemptStatus::Completed(_)) => log_result(app),
                    Ok(AttemptStatus::InProgress) => {}
                    Err(e) => warn!("late countdown tick ignored: {}", e),
                }
            }
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    if handle_input(app, key.code) {
                        break;
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
        }
    }

    Ok(())
}

/// Keep exactly one countdown running for the in-progress attempt and none
/// otherwise. Runs before every draw, so a finished attempt's timer is gone
/// by the time its result is shown.
fn sync_countdown(app: &App, countdown: &mut Option<Countdown>, period: Duration) {
    let running = app
        .attempt()
        .filter(|attempt| !attempt.is_completed())
        .map(Attempt::id);

    if countdown.as_ref().map(Countdown::attempt_id) != running {
        if let Some(stale) = countdown.take() {
            stale.cancel();
        }
        *countdown = running.map(|id| Countdown::start(id, period));
    }
}

async fn next_tick(countdown: &mut Option<Countdown>) -> Option<()> {
    match countdown {
        Some(countdown) => countdown.tick().await,
        None => std::future::pending().await,
    }
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode) -> bool {
    match app.screen() {
        Screen::Welcome => handle_welcome_input(app, key),
        Screen::Taking => handle_quiz_input(app, key),
        Screen::Result => handle_result_input(app, key),
    }
}

fn handle_welcome_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Enter => {
            if let Err(e) = app.start_quiz() {
                warn!("could not start attempt: {}", e);
            }
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_quiz_input(app: &mut App, key: KeyCode) -> bool {
    let outcome = match key {
        KeyCode::Up | KeyCode::Char('k') => {
            app.highlight_previous_option();
            Ok(())
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.highlight_next_option();
            Ok(())
        }
        KeyCode::Enter | KeyCode::Char(' ') => app.choose_highlighted(),
        KeyCode::Left | KeyCode::Char('h') => app.previous_question(),
        KeyCode::Right | KeyCode::Char('l') => app.next_question(),
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            if index < app.definition().question_count() {
                app.go_to_question(index)
            } else {
                Ok(())
            }
        }
        KeyCode::Char('s') | KeyCode::Char('S') => app.submit().map(|submitted| {
            if submitted {
                log_result(app);
            }
        }),
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        _ => Ok(()),
    };

    if let Err(e) = outcome {
        warn!("ignored input {:?}: {}", key, e);
    }
    false
}

fn handle_result_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Down | KeyCode::Char('j') => {
            app.scroll_results_down();
            false
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.scroll_results_up();
            false
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.retake();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn log_result(app: &App) {
    if let Some(result) = app.result() {
        info!(
            "result: {}% ({}/{}), passed = {}",
            result.score_percent, result.correct_count, result.total, result.passed
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::definition;

    fn press(app: &mut App, keys: &[KeyCode]) {
        for key in keys {
            assert!(!handle_input(app, *key));
        }
    }

    #[test]
    fn test_keyboard_flow_to_result() {
        let mut app = App::new(definition(2)).unwrap();
        press(&mut app, &[KeyCode::Enter]);
        assert_eq!(app.screen(), Screen::Taking);

        // q0: option 0 is correct. q1: option 1 is correct.
        press(
            &mut app,
            &[
                KeyCode::Enter,
                KeyCode::Char('s'),
                KeyCode::Char('2'),
                KeyCode::Char('j'),
                KeyCode::Char(' '),
            ],
        );
        assert_eq!(app.screen(), Screen::Taking);
        assert_eq!(app.attempt().unwrap().answers(), &[Some(0), Some(1)]);

        press(&mut app, &[KeyCode::Char('9'), KeyCode::Char('s')]);
        assert_eq!(app.screen(), Screen::Result);
        assert_eq!(app.result().unwrap().score_percent, 100);

        assert!(handle_input(&mut app, KeyCode::Char('q')));
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_follows_attempt() {
        let mut app = App::new(definition(2)).unwrap();
        let mut countdown = None;
        let period = Duration::from_secs(1);

        sync_countdown(&app, &mut countdown, period);
        assert!(countdown.is_none());

        let first = app.start_quiz().unwrap().id();
        sync_countdown(&app, &mut countdown, period);
        assert_eq!(countdown.as_ref().map(Countdown::attempt_id), Some(first));

        assert_eq!(next_tick(&mut countdown).await, Some(()));
        app.tick(20 * 60).unwrap();
        sync_countdown(&app, &mut countdown, period);
        assert!(countdown.is_none());

        let second = app.retake().unwrap().id();
        sync_countdown(&app, &mut countdown, period);
        assert_eq!(countdown.as_ref().map(Countdown::attempt_id), Some(second));
    }
}
