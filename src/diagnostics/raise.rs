use std::fmt;

use super::{error_code::ErrorCode, format::format_message};
use crate::{
    runtime::object::{ObjectLayout, ObjectRef},
    scoped_ref::ScopedRef,
};

/// A value prepared for interpolation into an error message.
#[derive(Debug, Clone, Copy)]
pub enum RaiseArg<'a> {
    /// Rendered with the object's `repr`; `None` renders as `<NULL>`.
    Object(Option<ObjectRef<'a>>),
    Str(&'a str),
    Int(i64),
    Float(f64),
}

impl RaiseArg<'_> {
    /// Format spec character for this argument kind.
    pub fn spec(&self) -> char {
        match self {
            RaiseArg::Object(_) => 'R',
            RaiseArg::Str(_) => 's',
            RaiseArg::Int(_) => 'd',
            RaiseArg::Float(_) => 'f',
        }
    }

    pub fn render(&self) -> String {
        match self {
            RaiseArg::Object(Some(ob)) => ob.repr(),
            RaiseArg::Object(None) => String::from("<NULL>"),
            RaiseArg::Str(s) => (*s).to_string(),
            RaiseArg::Int(v) => v.to_string(),
            RaiseArg::Float(v) => v.to_string(),
        }
    }
}

/// Hook for values that can appear in a raised error message.
///
/// `prepare` borrows the value; it must not change any ownership.
pub trait RaiseFormat {
    const SPEC: char;

    fn prepare(&self) -> RaiseArg<'_>;
}

impl<T: ObjectLayout> RaiseFormat for ScopedRef<T> {
    const SPEC: char = 'R';

    fn prepare(&self) -> RaiseArg<'_> {
        RaiseArg::Object(self.as_object())
    }
}

impl RaiseFormat for ObjectRef<'_> {
    const SPEC: char = 'R';

    fn prepare(&self) -> RaiseArg<'_> {
        RaiseArg::Object(Some(*self))
    }
}

impl RaiseFormat for str {
    const SPEC: char = 's';

    fn prepare(&self) -> RaiseArg<'_> {
        RaiseArg::Str(self)
    }
}

impl RaiseFormat for String {
    const SPEC: char = 's';

    fn prepare(&self) -> RaiseArg<'_> {
        RaiseArg::Str(self)
    }
}

impl RaiseFormat for i64 {
    const SPEC: char = 'd';

    fn prepare(&self) -> RaiseArg<'_> {
        RaiseArg::Int(*self)
    }
}

impl RaiseFormat for usize {
    const SPEC: char = 'd';

    fn prepare(&self) -> RaiseArg<'_> {
        RaiseArg::Int(i64::try_from(*self).unwrap_or(i64::MAX))
    }
}

impl RaiseFormat for f64 {
    const SPEC: char = 'f';

    fn prepare(&self) -> RaiseArg<'_> {
        RaiseArg::Float(*self)
    }
}

/// Render `args` into the `{}` placeholders of `template`.
pub fn format_raise(template: &str, args: &[RaiseArg<'_>]) -> String {
    let rendered: Vec<String> = args.iter().map(RaiseArg::render).collect();
    format_message(template, &rendered)
}

/// A recoverable error raised by host-side operations.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeError {
    pub code: ErrorCode,
    pub message: String,
    pub hint: Option<String>,
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error[{}]: {}\n{}", self.code.code, self.code.title, self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, "\nhint: {}", hint)?;
        }
        Ok(())
    }
}

impl std::error::Error for RuntimeError {}

/// Builder for a [`RuntimeError`] from a registered code.
///
/// Arguments are rendered as soon as they are added, so borrowed objects only
/// need to live for the `arg` call.
#[must_use]
pub struct RaiseBuilder {
    code: ErrorCode,
    args: Vec<String>,
    hint: Option<String>,
}

pub fn raise(code: &ErrorCode) -> RaiseBuilder {
    RaiseBuilder {
        code: *code,
        args: Vec::with_capacity(code.arity()),
        hint: code.hint.map(str::to_string),
    }
}

impl RaiseBuilder {
    pub fn arg<A: RaiseFormat + ?Sized>(mut self, value: &A) -> Self {
        self.args.push(value.prepare().render());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn finish(self) -> RuntimeError {
        debug_assert_eq!(
            self.args.len(),
            self.code.arity(),
            "wrong number of arguments for {}",
            self.code.code
        );
        RuntimeError {
            message: format_message(self.code.message, &self.args),
            code: self.code,
            hint: self.hint,
        }
    }
}
