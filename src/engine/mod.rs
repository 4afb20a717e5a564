//! Timed assessment engine: attempt state, scoring and the countdown.

mod attempt;
mod scoring;
mod timer;

pub use attempt::{Attempt, AttemptStatus, CompletionReason};
pub use scoring::{evaluate, AssessmentResult};
pub use timer::{Countdown, DEFAULT_TICK};
