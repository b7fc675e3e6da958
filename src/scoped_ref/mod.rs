//! Owning handle for host objects.
//!
//! A [`ScopedRef`] holds exactly one unit of a host object's reference count,
//! or nothing. The handle keeps the host count equal to the number of live
//! owning handles on every path out of a scope, including early returns and
//! `?` propagation:
//!
//! - `Clone` adds a unit (one `incref`).
//! - A Rust move transfers the unit with no refcount traffic. [`take`]
//!   does the same through a `&mut` and leaves a null handle behind.
//! - `Drop` releases the unit (one `decref`).
//! - [`escape`] hands the unit back to the caller as a raw pointer.
//!
//! Null handles never touch the count.
//!
//! [`take`]: ScopedRef::take
//! [`escape`]: ScopedRef::escape

mod traits;

#[cfg(test)]
mod scoped_ref_test;

use std::{marker::PhantomData, mem::ManuallyDrop, ptr::NonNull};

use crate::{
    diagnostics::{RuntimeError, raise, runtime_errors::{NULL_HANDLE, TYPE_ERROR}},
    runtime::{
        object::{NativeType, Object, ObjectLayout, ObjectRef},
        refcount,
    },
};

/// An owning, reference-counted handle to a host object of type `T`.
///
/// Not `Send` or `Sync`: the host count is only ever touched from the thread
/// that owns the runtime.
pub struct ScopedRef<T: ObjectLayout = Object> {
    ptr: *mut T,
    _owns: PhantomData<T>,
}

impl<T: ObjectLayout> ScopedRef<T> {
    /// A handle that holds nothing.
    pub const fn null() -> Self {
        Self {
            ptr: std::ptr::null_mut(),
            _owns: PhantomData,
        }
    }

    /// Adopts a reference the caller already owns. The count is not changed.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or a live host object of type `T`, and the caller
    /// must hold one reference to it which is transferred to the handle. The
    /// caller must not release that reference itself afterwards.
    pub unsafe fn new(ptr: *mut T) -> Self {
        Self {
            ptr,
            _owns: PhantomData,
        }
    }

    /// Takes a new reference to a borrowed pointer.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or a live host object of type `T`.
    pub unsafe fn from_borrowed(ptr: *mut T) -> Self {
        unsafe {
            refcount::incref(ptr.cast());
            Self::new(ptr)
        }
    }

    /// Releases the handle without touching the count, returning the raw
    /// pointer. The caller now owns the reference and must release it.
    #[must_use = "the escaped reference leaks unless it is released"]
    pub fn escape(self) -> *mut T {
        ManuallyDrop::new(self).ptr
    }

    /// Moves the reference out, leaving this handle null.
    pub fn take(&mut self) -> Self {
        std::mem::replace(self, Self::null())
    }

    /// Releases the held reference, if any, and leaves this handle null.
    pub fn reset(&mut self) {
        *self = Self::null();
    }

    pub fn as_ptr(&self) -> *const T {
        self.ptr
    }

    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr
    }

    /// The held pointer viewed through the common object header.
    pub fn as_object_ptr(&self) -> *const Object {
        self.ptr.cast_const().cast()
    }

    pub fn as_object_mut_ptr(&mut self) -> *mut Object {
        self.ptr.cast()
    }

    pub fn is_null(&self) -> bool {
        self.ptr.is_null()
    }

    /// `true` when the handle holds a reference.
    pub fn is_some(&self) -> bool {
        !self.ptr.is_null()
    }

    pub fn as_ref(&self) -> Option<&T> {
        // SAFETY: a non-null handle owns a unit, so the object is alive.
        unsafe { self.ptr.as_ref() }
    }

    /// The held object viewed through the common base type.
    pub fn as_object(&self) -> Option<ObjectRef<'_>> {
        let ptr = NonNull::new(self.ptr.cast::<Object>())?;
        // SAFETY: `ObjectLayout` puts the header at offset 0, and the handle's
        // unit keeps the object alive while `self` is borrowed.
        Some(unsafe { ObjectRef::new(ptr) })
    }

    /// Current host count of the held object, or 0 for a null handle.
    pub fn refcount(&self) -> isize {
        // SAFETY: null or owned by this handle.
        unsafe { refcount::refcount(self.as_object_ptr()) }
    }

    /// Converts to a handle on the common base type, keeping the same unit.
    pub fn upcast(self) -> ScopedRef<Object> {
        let ptr = self.escape().cast::<Object>();
        // SAFETY: the unit released by `escape` moves into the new handle.
        unsafe { ScopedRef::new(ptr) }
    }
}

impl ScopedRef<Object> {
    /// Borrows the held object as a `U` if it is one.
    pub fn downcast_ref<U: NativeType>(&self) -> Option<&U> {
        self.as_object().and_then(ObjectRef::downcast_ref::<U>)
    }

    /// Converts to a handle on the concrete type `U`, keeping the same unit.
    ///
    /// On failure the handle is released and the error names the expected
    /// type and renders the object that was found instead.
    pub fn downcast<U: NativeType>(self) -> Result<ScopedRef<U>, RuntimeError> {
        let Some(ob) = self.as_ref() else {
            return Err(raise(&NULL_HANDLE).arg(U::TYPE.name).finish());
        };
        if !ob.is::<U>() {
            return Err(raise(&TYPE_ERROR).arg(U::TYPE.name).arg(&self).finish());
        }
        let ptr = self.escape().cast::<U>();
        // SAFETY: type checked above; the unit moves into the new handle.
        Ok(unsafe { ScopedRef::new(ptr) })
    }
}
