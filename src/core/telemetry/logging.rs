use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use time::macros::format_description;
use time::OffsetDateTime;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber. `RUST_LOG` wins over `default_level`.
///
/// With a `log_dir` the output goes to a fresh timestamped file inside it
/// instead of stderr; the returned path points at that file.
pub fn init_logging(default_level: &str, log_dir: Option<&Path>) -> io::Result<Option<PathBuf>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let path = dir.join(log_file_name(now()));
            let file = File::create(&path)?;
            let _ = fmt()
                .with_env_filter(env_filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
            Ok(Some(path))
        }
        None => {
            let _ = fmt()
                .with_env_filter(env_filter)
                .with_writer(io::stderr)
                .try_init();
            Ok(None)
        }
    }
}

fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

pub fn log_file_name(at: OffsetDateTime) -> String {
    let stamp = at
        .format(format_description!(
            "[year][month][day]_[hour][minute][second]"
        ))
        .unwrap_or_else(|_| at.unix_timestamp().to_string());
    format!("log_{stamp}.txt")
}
