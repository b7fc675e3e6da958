use super::{
    leak_detector,
    object::{NativeType, Object},
};
use crate::scoped_ref::ScopedRef;

/// Allocates a new host object and returns the creator's reference.
///
/// `init` receives the header (count 1, type `T::TYPE`) and builds the full
/// object around it.
pub fn alloc<T: NativeType>(init: impl FnOnce(Object) -> T) -> ScopedRef<T> {
    let object = init(Object::new(T::TYPE));
    debug_assert!(object.header().is::<T>(), "header type does not match {}", T::TYPE.name);

    leak_detector::record_alloc();
    let raw = Box::into_raw(Box::new(object));
    // SAFETY: `raw` is a fresh allocation whose single reference we hand over.
    unsafe { ScopedRef::new(raw) }
}

/// `dealloc` slot for objects created by [`alloc`].
///
/// # Safety
///
/// `ob` must have been returned by `alloc::<T>` and its count must be zero.
pub unsafe fn dealloc_boxed<T: NativeType>(ob: *mut Object) {
    drop(unsafe { Box::from_raw(ob.cast::<T>()) });
}
