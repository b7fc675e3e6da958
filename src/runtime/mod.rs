//! Minimal reference-counted host object runtime.
//!
//! Every object starts with an [`Object`] header holding its count and type.
//! Counts are changed only through [`refcount::incref`] and
//! [`refcount::decref`]; the latter deallocates at zero.
//!
//! # Threading
//! The runtime is single-threaded. Counts are plain `Cell`s and nothing here
//! is `Send` or `Sync`; embedders serialize access the way the host's own
//! interpreter lock would.
//!
//! # Cycles
//! There is no cycle collector. A list that (transitively) contains itself
//! is never deallocated.

pub mod alloc;
pub mod leak_detector;
pub mod object;
pub mod refcount;
pub mod trace;
pub mod types;


pub use alloc::alloc;
pub use object::{NativeType, Object, ObjectLayout, ObjectRef, ObjectType};
pub use types::{IntObject, ListObject, StrObject};
