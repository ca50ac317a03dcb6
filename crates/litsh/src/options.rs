//! Parser configuration
//!
//! A RUN: line is always parsed against a small set of switches chosen by the
//! test runner: how to treat backslashes, whether pipelines report the first
//! failure, and whether the lexer should verify its own fast path.

/// Options controlling how a line is lexed and parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Treat a bare `\` outside quotes as a literal character
    /// (Windows path separators). Default: false
    pub win32_escapes: bool,

    /// Value of `Pipeline::pipefail` for every pipeline produced.
    /// Default: false
    pub pipefail: bool,

    /// Run both argument lexers and panic if they disagree.
    /// Testing only. Default: false
    pub checked: bool,

    /// What parse events may include
    #[cfg(feature = "logging")]
    pub log: crate::logging_impl::LogConfig,
}

impl ParseOptions {
    /// Create new options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set backslash handling outside quotes
    pub fn win32_escapes(mut self, enabled: bool) -> Self {
        self.win32_escapes = enabled;
        self
    }

    /// Set the pipefail flag stamped on pipelines
    pub fn pipefail(mut self, enabled: bool) -> Self {
        self.pipefail = enabled;
        self
    }

    /// Enable fast/slow path self-checking in the lexer
    pub fn checked(mut self, enabled: bool) -> Self {
        self.checked = enabled;
        self
    }

    /// Set the logging configuration for parse events
    #[cfg(feature = "logging")]
    pub fn log_config(mut self, config: crate::logging_impl::LogConfig) -> Self {
        self.log = config;
        self
    }
}
