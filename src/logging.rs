use std::fs::OpenOptions;
use std::io;
use std::path::Path;

use env_logger::{Builder, Env, Target};

/// Install the global logger. `RUST_LOG` sets the filter (default `info`).
///
/// The quiz owns the terminal while it runs, so records go to `log_file`
/// when one is given and are dropped otherwise.
pub fn init(log_file: Option<&Path>) -> io::Result<()> {
    let target = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Target::Pipe(Box::new(file))
        }
        None => Target::Pipe(Box::new(io::sink())),
    };

    // A second init (e.g. from tests) keeps the first logger.
    let _ = Builder::from_env(Env::default().default_filter_or("info"))
        .target(target)
        .format_timestamp_millis()
        .try_init();
    Ok(())
}
