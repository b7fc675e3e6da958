//! Reference counting primitives of the host runtime.
//!
//! These are the two operations every owner of a host object goes through.
//! Both are null-safe. Callers normally reach them through
//! [`ScopedRef`](crate::scoped_ref::ScopedRef) rather than directly.

use super::{leak_detector, object::Object, trace};

/// Adds one reference to `ob`.
///
/// # Safety
///
/// `ob` must be null or point to a live host object.
#[inline]
pub unsafe fn incref(ob: *mut Object) {
    if ob.is_null() {
        return;
    }
    let ob = unsafe { &*ob };
    let count = ob.refcnt().get() + 1;
    ob.refcnt().set(count);

    leak_detector::record_incref();
    trace::refcount_event("incref", ob, count);
}

/// Drops one reference from `ob`, deallocating it when the count hits zero.
///
/// # Safety
///
/// `ob` must be null or point to a live host object, and the caller must own
/// the reference being released. `ob` may dangle after this call.
#[inline]
pub unsafe fn decref(ob: *mut Object) {
    if ob.is_null() {
        return;
    }
    let header = unsafe { &*ob };
    let count = header.refcnt().get() - 1;
    debug_assert!(count >= 0, "refcount underflow on {}", header.type_name());
    header.refcnt().set(count);

    leak_detector::record_decref();
    trace::refcount_event("decref", header, count);

    if count == 0 {
        unsafe { destroy(ob) };
    }
}

/// Returns the current count of `ob`, or 0 for null.
///
/// # Safety
///
/// `ob` must be null or point to a live host object.
pub unsafe fn refcount(ob: *const Object) -> isize {
    if ob.is_null() {
        return 0;
    }
    unsafe { &*ob }.refcnt().get()
}

#[cold]
#[inline(never)]
unsafe fn destroy(ob: *mut Object) {
    let ty = unsafe { &*ob }.ty();
    trace::dealloc_event(ty.name, ob);
    leak_detector::record_dealloc();
    unsafe { (ty.dealloc)(ob) };
}
