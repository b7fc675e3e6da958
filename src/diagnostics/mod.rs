//! Runtime diagnostics.
//!
//! Error codes, the [`RuntimeError`] type, and the raise-format hook through
//! which values (including owning handles) are interpolated into error
//! messages.

pub mod error_code;
pub mod format;
pub mod raise;
pub mod runtime_errors;


pub use error_code::{ERROR_CODES, ErrorCode, lookup_error_code};
pub use format::format_message;
pub use raise::{RaiseArg, RaiseBuilder, RaiseFormat, RuntimeError, format_raise, raise};

pub use runtime_errors::*;
