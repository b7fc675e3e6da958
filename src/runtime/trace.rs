//! Optional refcount tracing to stderr.
//!
//! Enabled for the whole process by setting `HOSTREF_TRACE_REFS` to anything
//! other than `0` or the empty string. The variable is read once; tests and
//! embedders can override it with [`set_enabled`].

use std::{
    cell::RefCell,
    env,
    sync::{
        OnceLock,
        atomic::{AtomicU8, Ordering},
    },
};

use super::object::Object;

pub const TRACE_ENV_VAR: &str = "HOSTREF_TRACE_REFS";

const UNSET: u8 = 0;
const OFF: u8 = 1;
const ON: u8 = 2;

static OVERRIDE: AtomicU8 = AtomicU8::new(UNSET);
static FROM_ENV: OnceLock<bool> = OnceLock::new();

thread_local! {
    static SINK: RefCell<Option<Vec<String>>> = const { RefCell::new(None) };
}

/// Forces tracing on or off, ignoring the environment.
pub fn set_enabled(enabled: bool) {
    OVERRIDE.store(if enabled { ON } else { OFF }, Ordering::Relaxed);
}

/// Drops any override set by [`set_enabled`].
pub fn clear_override() {
    OVERRIDE.store(UNSET, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    match OVERRIDE.load(Ordering::Relaxed) {
        ON => true,
        OFF => false,
        _ => *FROM_ENV.get_or_init(|| env_flag(env::var(TRACE_ENV_VAR).ok().as_deref())),
    }
}

fn env_flag(value: Option<&str>) -> bool {
    !matches!(value, None | Some("") | Some("0"))
}

pub(crate) fn format_event(op: &str, type_name: &str, addr: *const Object, count: isize) -> String {
    format!("[refs] {op} {type_name}@{addr:p} -> {count}")
}

/// Runs `f` with tracing on for the current thread and returns the lines it
/// produced instead of writing them to stderr.
pub fn capture(f: impl FnOnce()) -> Vec<String> {
    struct Restore(Option<Vec<String>>);

    impl Drop for Restore {
        fn drop(&mut self) {
            let outer = self.0.take();
            SINK.with(|sink| *sink.borrow_mut() = outer);
        }
    }

    let restore = Restore(SINK.with(|sink| sink.borrow_mut().replace(Vec::new())));
    f();
    let lines = SINK.with(|sink| sink.borrow_mut().take()).unwrap_or_default();
    drop(restore);
    lines
}

fn capturing() -> bool {
    SINK.with(|sink| sink.borrow().is_some())
}

fn emit(line: String) {
    let unsent = SINK.with(|sink| match sink.borrow_mut().as_mut() {
        Some(lines) => {
            lines.push(line);
            None
        }
        None => Some(line),
    });
    if let Some(line) = unsent {
        eprintln!("{line}");
    }
}

#[inline]
pub(crate) fn refcount_event(op: &str, ob: &Object, count: isize) {
    if is_enabled() || capturing() {
        emit(format_event(op, ob.type_name(), ob, count));
    }
}

#[inline]
pub(crate) fn dealloc_event(type_name: &str, ob: *const Object) {
    if is_enabled() || capturing() {
        emit(format!("[refs] dealloc {type_name}@{ob:p}"));
    }
}
