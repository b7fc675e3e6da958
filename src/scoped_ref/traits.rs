use std::{
    fmt,
    hash::{Hash, Hasher},
    ops::Deref,
};

use super::ScopedRef;
use crate::runtime::{object::ObjectLayout, refcount};

impl<T: ObjectLayout> Default for ScopedRef<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T: ObjectLayout> Clone for ScopedRef<T> {
    fn clone(&self) -> Self {
        // SAFETY: the pointer is null or kept alive by `self`.
        unsafe { Self::from_borrowed(self.ptr) }
    }

    fn clone_from(&mut self, source: &Self) {
        // Increment first: `self` and `source` may hold the same object, and
        // releasing it first could drop the count to zero.
        // SAFETY: `source.ptr` is null or kept alive by `source`.
        unsafe { refcount::incref(source.ptr.cast()) };
        let old = std::mem::replace(&mut self.ptr, source.ptr);
        // SAFETY: `old` is null or the unit `self` owned until the replace.
        unsafe { refcount::decref(old.cast()) };
    }
}

impl<T: ObjectLayout> Drop for ScopedRef<T> {
    fn drop(&mut self) {
        // SAFETY: a non-null handle owns exactly one unit.
        unsafe { refcount::decref(self.ptr.cast()) };
    }
}

impl<T: ObjectLayout> Deref for ScopedRef<T> {
    type Target = T;

    /// # Panics
    ///
    /// Panics if the handle is null.
    fn deref(&self) -> &T {
        match self.as_ref() {
            Some(value) => value,
            None => panic!(
                "dereferenced a null ScopedRef<{}>",
                std::any::type_name::<T>()
            ),
        }
    }
}

impl<T: ObjectLayout> PartialEq for ScopedRef<T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.ptr, other.ptr)
    }
}

impl<T: ObjectLayout> Eq for ScopedRef<T> {}

impl<T: ObjectLayout> PartialEq<*mut T> for ScopedRef<T> {
    fn eq(&self, other: &*mut T) -> bool {
        std::ptr::eq(self.ptr, *other)
    }
}

impl<T: ObjectLayout> PartialEq<*const T> for ScopedRef<T> {
    fn eq(&self, other: &*const T) -> bool {
        std::ptr::eq(self.ptr, *other)
    }
}

impl<T: ObjectLayout> Hash for ScopedRef<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ptr.hash(state);
    }
}

impl<T: ObjectLayout> fmt::Debug for ScopedRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ScopedRef").field(&self.ptr).finish()
    }
}

impl<T: ObjectLayout> fmt::Pointer for ScopedRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Pointer::fmt(&self.ptr, f)
    }
}
