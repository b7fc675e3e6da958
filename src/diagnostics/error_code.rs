//! Error code registry

use super::runtime_errors::{INDEX_OUT_OF_RANGE, NULL_HANDLE, TYPE_ERROR};

/// Error code with message template and optional hint.
///
/// `message` uses `{}` placeholders, filled in order by
/// [`format_message`](super::format_message).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCode {
    pub code: &'static str,
    pub title: &'static str,
    pub message: &'static str,
    pub hint: Option<&'static str>,
}

impl ErrorCode {
    /// Number of `{}` placeholders in the message template.
    pub fn arity(&self) -> usize {
        self.message.matches("{}").count()
    }
}

pub static ERROR_CODES: &[&ErrorCode] = &[&NULL_HANDLE, &TYPE_ERROR, &INDEX_OUT_OF_RANGE];

pub fn lookup_error_code(code: &str) -> Option<&'static ErrorCode> {
    ERROR_CODES.iter().copied().find(|c| c.code == code)
}
