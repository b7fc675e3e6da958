//! Owning handles for objects of a reference-counted host runtime.
//!
//! [`ScopedRef`] ties one unit of a host object's reference count to a Rust
//! value, so clones, moves, drops and early returns keep the host count
//! correct. The [`runtime`] module supplies the host side: object headers,
//! the `incref`/`decref` primitives, builtin types and leak accounting.
//! [`diagnostics`] renders handles into error messages.

pub mod diagnostics;
pub mod runtime;
pub mod scoped_ref;

pub use diagnostics::RuntimeError;
pub use scoped_ref::ScopedRef;
