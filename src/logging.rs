use std::fs::{self, File};
use std::path::{Path, PathBuf};

use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};

use crate::error::AppError;

const LOG_FILE_NAME: &str = "grid-snake.log";

/// Default log location next to the score file.
#[must_use]
pub fn default_log_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push("grid-snake");
    base.push(LOG_FILE_NAME);
    base
}

/// Routes the `log` facade into `path`.
///
/// The terminal is in raw mode on the alternate screen while playing, so
/// nothing may log to stdout or stderr.
pub fn init_file_logger(path: &Path, level: LevelFilter) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .set_thread_level(LevelFilter::Off)
        .build();
    WriteLogger::init(level, config, File::create(path)?)?;
    Ok(())
}
