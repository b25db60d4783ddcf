//! A thin logging sink. Deliberately not bound to any logging ecosystem
//! crate: hosts can adapt [`Logger`] to `tracing`, `log`, or their own
//! pipeline without this crate pulling one in as a dependency (§6, §9).

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
        };
        f.write_str(name)
    }
}

/// A structured log sink. Debug logs are optional: the packer never
/// branches on whether a logger is attached, only calls it unconditionally,
/// so attaching one can never change a packing result.
pub trait Logger: Send + Sync {
    fn log(&self, level: LogLevel, message: &str, context: &[(&str, String)]);
}

/// The default sink: discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn log(&self, _level: LogLevel, _message: &str, _context: &[(&str, String)]) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingLogger {
        messages: Mutex<Vec<String>>,
    }

    impl Logger for RecordingLogger {
        fn log(&self, _level: LogLevel, message: &str, _context: &[(&str, String)]) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }

    #[test]
    fn noop_logger_accepts_any_call_without_panicking() {
        let logger = NoopLogger;
        logger.log(LogLevel::Warn, "hello", &[("key", "value".to_string())]);
    }

    #[test]
    fn custom_logger_receives_messages() {
        let logger = RecordingLogger::default();
        logger.log(LogLevel::Info, "packed box", &[]);
        assert_eq!(logger.messages.lock().unwrap().as_slice(), ["packed box"]);
    }
}
