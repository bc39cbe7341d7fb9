use std::error::Error;
use std::fmt::{Display, Formatter};

use slog::{Drain, Level};
use slog_async::AsyncGuard;
use slog_scope::GlobalLoggerGuard;
use slog_term::ThreadSafeTimestampFn;

/// Env var holding the log level, e.g. `MASS_LOG=debug`
pub const LOG_ENV_VAR: &str = "MASS_LOG";

pub struct LoggerBuilder {
    level: Level,
    thread_name: &'static str,
}

/// Keeps the global logger installed until dropped, then flushes pending records
pub struct Logger(Level, GlobalLoggerGuard, AsyncGuard);

#[derive(Debug, Eq, PartialEq)]
pub enum LogError {
    BadLevel(String),
}

impl LoggerBuilder {
    /// Level from [LOG_ENV_VAR] if set, otherwise the default
    pub fn with_env() -> Result<Self, LogError> {
        match std::env::var(LOG_ENV_VAR) {
            Ok(env) => Self::default().level_str(&env),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn level(mut self, s: Level) -> Self {
        self.level = s;
        self
    }

    /// Accepts full or short slog level names, case insensitive
    pub fn level_str(self, s: &str) -> Result<Self, LogError> {
        let level = parse_level(s)?;
        Ok(self.level(level))
    }

    pub fn thread_name(mut self, name: &'static str) -> Self {
        self.thread_name = name;
        self
    }

    pub fn init(self, timestamp_fn: impl ThreadSafeTimestampFn) -> Result<Logger, LogError> {
        let decorator = slog_term::TermDecorator::new().stderr().build();
        let drain = slog_term::CompactFormat::new(decorator)
            .use_custom_timestamp(timestamp_fn)
            .build()
            .fuse();
        let drain = drain.filter_level(self.level).fuse();
        let (drain, flush) = slog_async::Async::new(drain)
            .thread_name(self.thread_name.to_owned())
            .chan_size(1024)
            .build_with_guard();
        let logger = slog::Logger::root(drain.fuse(), slog::o!());

        let global = slog_scope::set_global_logger(logger);
        Ok(Logger(self.level, global, flush))
    }
}

fn parse_level(s: &str) -> Result<Level, LogError> {
    s.trim()
        .parse()
        .map_err(|_| LogError::BadLevel(s.to_owned()))
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self {
            level: Level::Info,
            thread_name: "logging",
        }
    }
}

impl Logger {
    pub fn level(&self) -> Level {
        self.0
    }
}

impl Display for LogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogError::BadLevel(s) => write!(f, "Invalid level {:?}", s),
        }
    }
}

impl Error for LogError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels() {
        assert_eq!(parse_level("debug"), Ok(Level::Debug));
        assert_eq!(parse_level("TRACE"), Ok(Level::Trace));
        assert_eq!(parse_level(" info "), Ok(Level::Info));
        assert_eq!(
            parse_level("loud"),
            Err(LogError::BadLevel("loud".to_owned()))
        );
    }

    #[test]
    fn builder_level() {
        let builder = LoggerBuilder::default().level_str("error").unwrap();
        assert_eq!(builder.level, Level::Error);

        assert!(LoggerBuilder::default().level_str("").is_err());
    }
}
