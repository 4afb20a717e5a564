//! Command-line configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::engine::DEFAULT_TICK;
use crate::models::AssessmentDefinition;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Take a timed quiz in the terminal", long_about = None)]
pub struct Args {
    /// JSON file to load the assessment from (defaults to the bundled sample)
    #[arg(short, long, env = "TIMED_QUIZ_FILE")]
    pub quiz: Option<PathBuf>,

    /// Override the assessment's time limit, in seconds
    #[arg(short, long, value_name = "SECONDS")]
    pub time_limit: Option<u32>,

    /// Override the assessment's pass threshold, in percent
    #[arg(short, long, value_name = "PERCENT")]
    pub pass_threshold: Option<u32>,

    /// Milliseconds between countdown ticks
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_TICK.as_millis() as u64)]
    pub tick_ms: u64,

    /// Write logs here while the quiz is on screen
    #[arg(long, env = "TIMED_QUIZ_LOG")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub quiz_path: Option<PathBuf>,
    pub time_limit_seconds: Option<u32>,
    pub pass_threshold_percent: Option<u32>,
    pub tick_period: Duration,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quiz_path: None,
            time_limit_seconds: None,
            pass_threshold_percent: None,
            tick_period: DEFAULT_TICK,
            log_file: None,
        }
    }
}

impl Config {
    pub fn from_args(args: Args) -> Self {
        Self {
            quiz_path: args.quiz,
            time_limit_seconds: args.time_limit,
            pass_threshold_percent: args.pass_threshold,
            // A zero period would spin the interval.
            tick_period: Duration::from_millis(args.tick_ms.max(1)),
            log_file: args.log_file,
        }
    }

    /// Apply overrides to a loaded definition. The caller validates afterwards.
    pub fn apply(&self, definition: &mut AssessmentDefinition) {
        if let Some(seconds) = self.time_limit_seconds {
            definition.time_limit_seconds = seconds;
        }
        if let Some(percent) = self.pass_threshold_percent {
            definition.pass_threshold_percent = percent;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::models::fixtures::definition;

    #[test]
    fn test_parse_defaults() {
        let args = Args::try_parse_from(["timed-quiz"]).unwrap();
        let config = Config::from_args(args);
        assert_eq!(config.tick_period, Duration::from_secs(1));
        assert!(config.time_limit_seconds.is_none());
    }

    #[test]
    fn test_parse_overrides() {
        let args = Args::try_parse_from([
            "timed-quiz",
            "--quiz",
            "rust.json",
            "-t",
            "90",
            "--pass-threshold",
            "50",
            "--tick-ms",
            "0",
        ])
        .unwrap();
        let config = Config::from_args(args);
        assert_eq!(config.quiz_path, Some(PathBuf::from("rust.json")));
        assert_eq!(config.tick_period, Duration::from_millis(1));

        let mut def = definition(2);
        config.apply(&mut def);
        assert_eq!(def.time_limit_seconds, 90);
        assert_eq!(def.pass_threshold_percent, 50);
    }

    #[test]
    fn test_invalid_override_fails_validation() {
        let config = Config {
            pass_threshold_percent: Some(150),
            ..Config::default()
        };
        let mut def = definition(2);
        config.apply(&mut def);
        assert_eq!(
            def.validate(),
            Err(ValidationError::PassThresholdOutOfRange(150))
        );
    }
}
