use std::collections::HashSet;

use crate::{
    runtime::{
        leak_detector::{self, LeakStats},
        object::{Object, ObjectRef},
        refcount,
        types::{IntObject, ListObject, StrObject},
    },
    scoped_ref::ScopedRef,
};

#[test]
fn null_handle_tests_false() {
    let null: ScopedRef<IntObject> = ScopedRef::null();
    let default: ScopedRef<IntObject> = ScopedRef::default();

    assert!(null.is_null());
    assert!(!default.is_some());
    assert!(null == std::ptr::null_mut::<IntObject>());
    assert!(default == std::ptr::null::<IntObject>());
    assert_eq!(null, default);
    assert_eq!(null.refcount(), 0);
    assert!(null.as_ref().is_none());
}

#[test]
fn clone_shares_pointer_and_adds_unit() {
    let a = IntObject::new(3);
    let b = a.clone();

    assert_eq!(a, b);
    assert!(a == b.as_ptr());
    assert_eq!(a.refcount(), 2);

    drop(b);
    assert_eq!(a.refcount(), 1);
}

#[test]
fn distinct_objects_compare_unequal() {
    let a = IntObject::new(1);
    let b = IntObject::new(1);
    assert_ne!(a, b);
}

#[test]
fn rust_move_keeps_count() {
    let before = leak_detector::snapshot();
    let a = IntObject::new(5);
    let moved = a;

    let delta = leak_detector::snapshot().since(&before);
    assert_eq!(delta.increfs, 0);
    assert_eq!(delta.decrefs, 0);
    assert_eq!(moved.refcount(), 1);
}

#[test]
fn take_leaves_source_null() {
    let mut a = StrObject::new("owned");
    let b = a.take();

    assert!(a.is_null());
    assert_eq!(b.refcount(), 1);
    assert_eq!(b.as_str(), "owned");
}

#[test]
fn move_assign_releases_destination_only() {
    let mut dst = IntObject::new(1);
    let src = IntObject::new(2);
    let src_ptr = src.as_ptr();
    assert_eq!(dst.value(), 1);

    let before = leak_detector::snapshot();
    dst = src;
    let delta = leak_detector::snapshot().since(&before);

    assert_eq!(delta.decrefs, 1);
    assert_eq!(delta.increfs, 0);
    assert_eq!(delta.deallocations, 1);
    assert!(dst == src_ptr);
    assert_eq!(dst.value(), 2);
}

#[test]
fn clone_from_same_object_never_drops_to_zero() {
    let a = ListObject::new();
    let mut b = a.clone();

    let before = leak_detector::snapshot();
    b.clone_from(&a);
    let delta = leak_detector::snapshot().since(&before);

    assert_eq!(delta.increfs, 1);
    assert_eq!(delta.decrefs, 1);
    assert_eq!(delta.deallocations, 0);
    assert_eq!(a.refcount(), 2);
    assert_eq!(a, b);
}

#[test]
fn clone_from_releases_previous_value() {
    let src = IntObject::new(10);
    let mut dst = IntObject::new(20);

    let before = leak_detector::snapshot();
    dst.clone_from(&src);
    let delta = leak_detector::snapshot().since(&before);

    assert_eq!(delta.deallocations, 1);
    assert_eq!(src.refcount(), 2);
    assert_eq!(dst.value(), 10);
}

#[test]
fn escape_returns_pointer_without_decref() {
    let a = IntObject::new(9);
    let expected = a.as_ptr();

    let before = leak_detector::snapshot();
    let raw = a.escape();
    assert_eq!(leak_detector::snapshot().since(&before).decrefs, 0);
    assert_eq!(raw.cast_const(), expected);

    // Hand the unit back so the object is released.
    let back = unsafe { ScopedRef::new(raw) };
    assert_eq!(back.refcount(), 1);
}

#[test]
fn adopt_copy_drop_escape_scenario() {
    let before = leak_detector::snapshot();
    let raw = IntObject::new(42).escape();

    let a = unsafe { ScopedRef::new(raw) };
    assert_eq!(a.refcount(), 1);
    let b = a.clone();
    assert_eq!(b.refcount(), 2);
    drop(a);
    assert_eq!(b.refcount(), 1);

    let escaped = b.escape();
    assert_eq!(escaped, raw);
    assert_eq!(unsafe { refcount::refcount(escaped.cast()) }, 1);

    unsafe { refcount::decref(escaped.cast()) };
    assert_eq!(leak_detector::snapshot().since(&before).live_objects(), 0);
}

#[test]
fn null_copy_drop_scenario() {
    let before = leak_detector::snapshot();
    let a: ScopedRef<ListObject> = ScopedRef::null();
    let b = a.clone();

    assert!(a.is_null() && b.is_null());
    drop(a);
    drop(b);

    let delta = leak_detector::snapshot().since(&before);
    assert_eq!(delta.increfs, 0);
    assert_eq!(delta.decrefs, 0);
}

#[test]
fn from_borrowed_adds_unit() {
    let owner = IntObject::new(4);
    let borrowed = owner.as_ptr().cast_mut();

    let extra = unsafe { ScopedRef::from_borrowed(borrowed) };
    assert_eq!(owner.refcount(), 2);
    drop(extra);
    assert_eq!(owner.refcount(), 1);
}

#[test]
fn reset_releases_and_nulls() {
    let mut a = IntObject::new(1);
    let keep = a.clone();
    a.reset();

    assert!(a.is_null());
    assert_eq!(keep.refcount(), 1);
}

#[test]
fn upcast_and_downcast_keep_the_unit() {
    let int = IntObject::new(77);
    let ptr = int.as_object_ptr();

    let ob: ScopedRef<Object> = int.upcast();
    assert!(ob == ptr);
    assert_eq!(ob.refcount(), 1);
    assert_eq!(ob.downcast_ref::<IntObject>().map(IntObject::value), Some(77));
    assert!(ob.downcast_ref::<StrObject>().is_none());

    let int = ob.downcast::<IntObject>().unwrap();
    assert_eq!(int.refcount(), 1);
    assert_eq!(int.value(), 77);
}

#[test]
fn downcast_ref_reads_fields_past_the_header() {
    let ob: ScopedRef<Object> = StrObject::new("tail").upcast();
    assert_eq!(ob.downcast_ref::<StrObject>().map(StrObject::as_str), Some("tail"));

    let view = ob.as_object().unwrap();
    assert_eq!(view.as_ptr(), ob.as_ptr());
    assert_eq!(view.downcast_ref::<StrObject>().map(StrObject::as_str), Some("tail"));
    assert_eq!(view.repr(), "'tail'");

    let list = ListObject::new();
    list.push(ob);
    list.push(IntObject::new(-3));
    assert_eq!(list.as_object().map(ObjectRef::repr).as_deref(), Some("['tail', -3]"));
}

#[test]
fn failed_downcast_releases_the_object() {
    let before = leak_detector::snapshot();
    let ob = StrObject::new("nope").upcast();

    let err = ob.downcast::<IntObject>().unwrap_err();
    assert_eq!(err.code.code, "E2001");
    assert_eq!(err.message, "Expected int object, got 'nope'.");
    assert_eq!(leak_detector::snapshot().since(&before).live_objects(), 0);
}

#[test]
fn downcast_of_null_reports_null_handle() {
    let err = ScopedRef::<Object>::null()
        .downcast::<ListObject>()
        .unwrap_err();
    assert_eq!(err.code.code, "E2000");
    assert_eq!(err.message, "Expected list object, got a null handle.");
}

#[test]
fn base_pointer_view_matches_handle() {
    let mut s = StrObject::new("x");
    let typed = s.as_mut_ptr();
    let base = s.as_object_mut_ptr();

    assert_eq!(typed.cast::<Object>(), base);
    assert_eq!(s.as_object().map(ObjectRef::type_name), Some("str"));
}

#[test]
fn hash_follows_identity() {
    let a = IntObject::new(1);
    let b = a.clone();
    let c = IntObject::new(1);

    let set: HashSet<_> = [a, b, c].into_iter().collect();
    assert_eq!(set.len(), 2);
}

#[test]
#[should_panic(expected = "dereferenced a null ScopedRef")]
fn deref_of_null_panics() {
    let null: ScopedRef<IntObject> = ScopedRef::null();
    let _ = null.value();
}

#[test]
fn debug_and_pointer_formatting_do_not_touch_count() {
    let a = IntObject::new(1);
    let before = leak_detector::snapshot();

    let debug = format!("{:?}", a);
    let pointer = format!("{:p}", a);

    assert!(debug.starts_with("ScopedRef(0x"), "got {debug}");
    assert_eq!(pointer, format!("{:p}", a.as_ptr()));
    assert_eq!(leak_detector::snapshot().since(&before), LeakStats::default());
}
