use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{ExpenseError, Result};
use crate::settings::Settings;

pub const LOG_ENV: &str = "DESPESAS_LOG";
const LOG_FILE: &str = "despesas.log";

pub fn log_file_path(settings: &Settings) -> PathBuf {
    PathBuf::from(&settings.log_dir).join(LOG_FILE)
}

/// `DESPESAS_LOG` wins over the configured level.
fn build_filter(level: &str) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return Ok(filter);
    }
    EnvFilter::try_new(level)
        .map_err(|e| ExpenseError::Settings(format!("invalid log level {level:?}: {e}")))
}

/// Send tracing output to the log file. The terminal belongs to the widget
/// while it runs, so nothing is written to stdout or stderr.
pub fn init(settings: &Settings) -> Result<()> {
    let path = log_file_path(settings);
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(build_filter(&settings.log_level)?)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| ExpenseError::Settings(format!("cannot start logger: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_lives_in_log_dir() {
        let settings = Settings {
            log_dir: "/tmp/despesas-logs".to_string(),
            ..Settings::default()
        };
        assert_eq!(
            log_file_path(&settings),
            PathBuf::from("/tmp/despesas-logs/despesas.log")
        );
    }

    #[test]
    fn test_build_filter_accepts_levels() {
        assert!(build_filter("debug").is_ok());
        assert!(build_filter("despesas=trace,warn").is_ok());
    }
}
