use ansi_term::Color;
use chrono::Local;
use err_derive::Error;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::{fmt::Display, process};

#[derive(Debug, Error)]
pub enum LoggerInitError {
    #[error(display = "A logger is already installed: {}", err)]
    AlreadyInstalled { err: SetLoggerError },
}

pub struct Logger {
    color: bool,
    level: LevelFilter,
}

impl Logger {
    pub fn init(color: bool, level: LevelFilter) -> Result<(), LoggerInitError> {
        log::set_boxed_logger(Box::new(Logger { color, level }))
            .map_err(|err| LoggerInitError::AlreadyInstalled { err })?;
        log::set_max_level(level);

        Ok(())
    }

    fn format(&self, record: &Record) -> String {
        let level = if self.color {
            let color = match record.level() {
                Level::Error => Color::Red,
                Level::Warn => Color::Yellow,
                Level::Info => Color::Green,
                Level::Debug => Color::Cyan,
                Level::Trace => Color::Purple,
            };
            color.bold().paint(record.level().to_string()).to_string()
        } else {
            record.level().to_string()
        };

        format!(
            "[{} {} {}] {}",
            Local::now().format("%H:%M:%S"),
            level,
            record.target(),
            record.args()
        )
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = self.format(record);
        if record.level() <= Level::Warn {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }

    fn flush(&self) {}
}

/// Logs the error together with `context` and exits the process.
///
/// Meant for binaries; library code returns its errors instead.
pub trait UnwrapOrLog<T> {
    fn unwrap_or_log(self, context: &str) -> T;
}

impl<T, E: Display> UnwrapOrLog<T> for Result<T, E> {
    fn unwrap_or_log(self, context: &str) -> T {
        match self {
            Ok(val) => val,
            Err(err) => {
                log::error!("{}: {}", context, err);
                log::logger().flush();
                process::exit(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_line(logger: &Logger, level: Level) -> String {
        logger.format(
            &Record::builder()
                .args(format_args!("program linked"))
                .level(level)
                .target("lumen_gl::rendering")
                .build(),
        )
    }

    #[test]
    fn plain_format() {
        let logger = Logger {
            color: false,
            level: LevelFilter::Info,
        };

        let line = record_line(&logger, Level::Info);
        assert!(line.ends_with(" INFO lumen_gl::rendering] program linked"));
        assert!(line.starts_with('['));
    }

    #[test]
    fn colored_format() {
        let logger = Logger {
            color: true,
            level: LevelFilter::Info,
        };

        let line = record_line(&logger, Level::Error);
        assert!(line.contains("\u{1b}["));
        assert!(line.contains("ERROR"));
    }

    #[test]
    fn level_filter() {
        let logger = Logger {
            color: false,
            level: LevelFilter::Info,
        };

        let info = Metadata::builder().level(Level::Info).build();
        let debug = Metadata::builder().level(Level::Debug).build();
        assert!(logger.enabled(&info));
        assert!(!logger.enabled(&debug));
    }
}
