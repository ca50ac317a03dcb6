//! Logging support for litsh
//!
//! Events are emitted through `tracing` when the `logging` feature is on.
//!
//! # Log Levels
//!
//! - **WARN**: Lenient lexer recoveries (unterminated quote, trailing escape)
//! - **DEBUG**: One summary per parsed line
//! - **TRACE**: Fast-path declines in the lexer
//!
//! RUN: lines routinely embed paths, environment assignments and sometimes
//! credentials for the system under test, so the raw input is only logged
//! when [`LogConfig::log_input_content`] is set.

use std::borrow::Cow;

/// Configuration for what parse events may include.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogConfig {
    /// Whether to include the input line in log events (default: false)
    pub log_input_content: bool,

    /// Maximum length of logged values before truncation (default: 200)
    pub max_value_length: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_input_content: false,
            max_value_length: 200,
        }
    }
}

impl LogConfig {
    /// Create a new log configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Include input lines in log events
    pub fn log_input_content(mut self, enabled: bool) -> Self {
        self.log_input_content = enabled;
        self
    }

    /// Set maximum length for logged values
    pub fn max_value_length(mut self, len: usize) -> Self {
        self.max_value_length = len;
        self
    }

    /// Truncate value if it exceeds max length
    ///
    /// Handles UTF-8 char boundaries properly to avoid panics on multi-byte chars.
    fn truncate<'a>(&self, value: &'a str) -> Cow<'a, str> {
        if value.len() <= self.max_value_length {
            Cow::Borrowed(value)
        } else {
            let mut end = self.max_value_length;
            while end > 0 && !value.is_char_boundary(end) {
                end -= 1;
            }
            Cow::Owned(format!(
                "{}...[truncated {} bytes]",
                &value[..end],
                value.len() - end
            ))
        }
    }
}

/// Escape control characters so one input line stays one log line.
pub fn sanitize_for_log(input: &str) -> String {
    input
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
        .chars()
        .filter(|c| !c.is_control() || *c == ' ')
        .collect()
}

/// Format an input line for logging, or only its size when content logging
/// is off.
pub fn format_input_for_log(input: &str, config: &LogConfig) -> String {
    if !config.log_input_content {
        return format!("[input: {} bytes]", input.len());
    }

    let sanitized = sanitize_for_log(input);
    config.truncate(&sanitized).into_owned()
}
