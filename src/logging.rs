//! Logging context handed to the codec, store and renderer.
//!
//! Messages go through the `log` facade under a fixed target. The debug flag
//! comes from the GENERAL section of the config file and gates only
//! debug-level output; everything else is forwarded as-is.

use std::fmt;

use log::Level;

use crate::constants::LOG_TARGET;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LogContext {
    debug: bool,
    target: &'static str,
}

impl Default for LogContext {
    fn default() -> Self {
        Self::new(false)
    }
}

impl LogContext {
    pub fn new(debug: bool) -> Self {
        Self {
            debug,
            target: LOG_TARGET,
        }
    }

    #[inline]
    pub fn debug_enabled(&self) -> bool {
        self.debug
    }

    pub fn with_debug(self, debug: bool) -> Self {
        Self { debug, ..self }
    }

    fn emit(&self, level: Level, args: fmt::Arguments<'_>) {
        log::log!(target: self.target, level, "{}", args);
    }

    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Info, args);
    }

    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Warn, args);
    }

    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Error, args);
    }

    pub fn debug(&self, args: fmt::Arguments<'_>) {
        if self.debug {
            self.emit(Level::Debug, args);
        }
    }
}
