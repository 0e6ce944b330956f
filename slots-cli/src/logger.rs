//! Configures logging for the command line tool.
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use env_logger::{Builder, Target};
use log::{trace, LevelFilter};
use time::OffsetDateTime;

/// Maps the number of `-v` flags to a level filter.
fn level_for(verbosity: u8) -> Result<LevelFilter, String> {
    match verbosity {
        0 => Ok(LevelFilter::Error),
        1 => Ok(LevelFilter::Warn),
        2 => Ok(LevelFilter::Info),
        3 => Ok(LevelFilter::Debug),
        4 => Ok(LevelFilter::Trace),
        n => Err(format!("Verbosity {n} is above the maximum of 4")),
    }
}

/// Installs the global logger.
///
/// Records go to stderr unless `log_file` is given, in which case the file
/// is created (or truncated) and receives every record instead.
pub fn configure(verbosity: u8, log_file: Option<PathBuf>) -> Result<(), String> {
    let level = level_for(verbosity)?;

    let mut builder = Builder::new();
    if let Some(path) = log_file {
        let file = File::create(&path)
            .map_err(|e| format!("Unable to create log file {}: {e}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    builder
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}:{} {:?}] {}",
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                OffsetDateTime::now_utc(),
                record.args()
            )
        })
        .filter_level(level)
        .try_init()
        .map_err(|e| format!("Unable to install logger: {e}"))?;

    trace!("Logger verbosity {level}");
    Ok(())
}
