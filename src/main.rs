use clap::Parser;
use timed_quiz::{logging, Args, Config, Quiz};

#[tokio::main]
async fn main() {
    let config = Config::from_args(Args::parse());

    if let Err(e) = logging::init(config.log_file.as_deref()) {
        eprintln!("Error opening log file: {}", e);
        std::process::exit(1);
    }

    let quiz = match Quiz::from_config(&config) {
        Ok(quiz) => quiz,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    match quiz.run().await {
        Ok(Some(result)) => {
            let verdict = if result.passed { "passed" } else { "not passed" };
            println!(
                "Scored {}% ({}/{} correct), {}",
                result.score_percent, result.correct_count, result.total, verdict
            );
        }
        Ok(None) => {}
        Err(e) => {
            eprintln!("Error running quiz: {}", e);
            std::process::exit(1);
        }
    }
}
