//! Builtin host object types.

use std::cell::RefCell;

use super::{
    alloc::{alloc, dealloc_boxed},
    object::{NativeType, Object, ObjectLayout, ObjectRef, ObjectType},
};
use crate::{
    diagnostics::{RuntimeError, raise, runtime_errors::INDEX_OUT_OF_RANGE},
    scoped_ref::ScopedRef,
};

// ---------------------------------------------------------------------------
// int
// ---------------------------------------------------------------------------

#[repr(C)]
pub struct IntObject {
    base: Object,
    value: i64,
}

pub static INT_TYPE: ObjectType = ObjectType {
    name: "int",
    dealloc: dealloc_boxed::<IntObject>,
    repr: int_repr,
};

unsafe impl ObjectLayout for IntObject {}

impl NativeType for IntObject {
    const TYPE: &'static ObjectType = &INT_TYPE;

    fn header(&self) -> &Object {
        &self.base
    }
}

impl IntObject {
    pub fn new(value: i64) -> ScopedRef<IntObject> {
        alloc(|base| IntObject { base, value })
    }

    pub fn value(&self) -> i64 {
        self.value
    }
}

fn int_repr(ob: ObjectRef<'_>) -> String {
    ob.downcast_ref::<IntObject>()
        .map(|int| int.value.to_string())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// str
// ---------------------------------------------------------------------------

#[repr(C)]
pub struct StrObject {
    base: Object,
    value: Box<str>,
}

pub static STR_TYPE: ObjectType = ObjectType {
    name: "str",
    dealloc: dealloc_boxed::<StrObject>,
    repr: str_repr,
};

unsafe impl ObjectLayout for StrObject {}

impl NativeType for StrObject {
    const TYPE: &'static ObjectType = &STR_TYPE;

    fn header(&self) -> &Object {
        &self.base
    }
}

impl StrObject {
    pub fn new(value: &str) -> ScopedRef<StrObject> {
        alloc(|base| StrObject {
            base,
            value: value.into(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

fn str_repr(ob: ObjectRef<'_>) -> String {
    let Some(s) = ob.downcast_ref::<StrObject>() else {
        return String::new();
    };
    let mut out = String::with_capacity(s.value.len() + 2);
    out.push('\'');
    for ch in s.value.chars() {
        if matches!(ch, '\'' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('\'');
    out
}

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

/// A mutable sequence owning one reference per item.
#[repr(C)]
pub struct ListObject {
    base: Object,
    items: RefCell<Vec<ScopedRef<Object>>>,
}

pub static LIST_TYPE: ObjectType = ObjectType {
    name: "list",
    dealloc: dealloc_boxed::<ListObject>,
    repr: list_repr,
};

unsafe impl ObjectLayout for ListObject {}

impl NativeType for ListObject {
    const TYPE: &'static ObjectType = &LIST_TYPE;

    fn header(&self) -> &Object {
        &self.base
    }
}

impl ListObject {
    pub fn new() -> ScopedRef<ListObject> {
        Self::from_items(Vec::new())
    }

    pub fn from_items(items: Vec<ScopedRef<Object>>) -> ScopedRef<ListObject> {
        alloc(|base| ListObject {
            base,
            items: RefCell::new(items),
        })
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// Moves `item` into the list; its reference becomes the list's.
    pub fn push<U: ObjectLayout>(&self, item: ScopedRef<U>) {
        self.items.borrow_mut().push(item.upcast());
    }

    /// Stores a new reference to `item`, leaving the caller's handle intact.
    pub fn append<U: ObjectLayout>(&self, item: &ScopedRef<U>) {
        self.push(item.clone());
    }

    /// Returns a new reference to the item at `index`.
    pub fn get(&self, index: usize) -> Result<ScopedRef<Object>, RuntimeError> {
        let items = self.items.borrow();
        items.get(index).cloned().ok_or_else(|| {
            raise(&INDEX_OUT_OF_RANGE)
                .arg(&index)
                .arg(&items.len())
                .finish()
        })
    }

    /// Removes the last item and hands its reference to the caller.
    pub fn pop(&self) -> Option<ScopedRef<Object>> {
        self.items.borrow_mut().pop()
    }

    /// Releases every item.
    pub fn clear(&self) {
        let items = std::mem::take(&mut *self.items.borrow_mut());
        // Release outside the borrow; an item's dealloc may reach this list.
        drop(items);
    }
}

thread_local! {
    static REPR_STACK: RefCell<Vec<*const Object>> = const { RefCell::new(Vec::new()) };
}

fn list_repr(ob: ObjectRef<'_>) -> String {
    let Some(list) = ob.downcast_ref::<ListObject>() else {
        return String::new();
    };
    let Some(_guard) = ReprGuard::enter(ob.as_ptr()) else {
        return String::from("[...]");
    };

    let parts: Vec<String> = list
        .items
        .borrow()
        .iter()
        .map(|item| item.as_object().map_or_else(|| String::from("<NULL>"), ObjectRef::repr))
        .collect();

    format!("[{}]", parts.join(", "))
}

/// Marks a list as being rendered on this thread until dropped, unwinding
/// included.
struct ReprGuard;

impl ReprGuard {
    /// Returns `None` if `addr` is already being rendered.
    fn enter(addr: *const Object) -> Option<ReprGuard> {
        REPR_STACK.with(|stack| {
            let mut stack = stack.borrow_mut();
            if stack.contains(&addr) {
                return None;
            }
            stack.push(addr);
            Some(ReprGuard)
        })
    }
}

impl Drop for ReprGuard {
    fn drop(&mut self) {
        REPR_STACK.with(|stack| stack.borrow_mut().pop());
    }
}

#[cfg(test)]
pub(crate) fn repr_depth() -> usize {
    REPR_STACK.with(|stack| stack.borrow().len())
}
