use std::{cell::Cell, fmt, marker::PhantomData, ptr::NonNull};

/// Common header shared by every object on the host heap.
///
/// Native object types are `#[repr(C)]` structs whose first field is an
/// `Object`, so a pointer to any of them can be reinterpreted as a pointer to
/// this header. The embedded count is authoritative for the object's
/// lifetime: when it reaches zero the type's `dealloc` slot runs.
#[repr(C)]
pub struct Object {
    refcnt: Cell<isize>,
    ty: &'static ObjectType,
}

impl Object {
    /// Creates a header for a freshly allocated object.
    ///
    /// The count starts at 1: the creator owns the first reference.
    pub(crate) fn new(ty: &'static ObjectType) -> Self {
        Self {
            refcnt: Cell::new(1),
            ty,
        }
    }

    /// Returns the type descriptor of this object.
    pub fn ty(&self) -> &'static ObjectType {
        self.ty
    }

    pub fn type_name(&self) -> &'static str {
        self.ty.name
    }

    /// Returns `true` if this object's type is exactly `T`.
    pub fn is<T: NativeType>(&self) -> bool {
        std::ptr::eq(self.ty, T::TYPE)
    }

    pub(crate) fn refcnt(&self) -> &Cell<isize> {
        &self.refcnt
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("type", &self.ty.name)
            .field("refcnt", &self.refcnt.get())
            .finish()
    }
}

/// A borrowed pointer to a live host object.
///
/// Unlike `&Object`, this keeps the provenance of the whole allocation, so it
/// can be narrowed to the concrete type and read past the header.
#[derive(Clone, Copy)]
pub struct ObjectRef<'a> {
    ptr: NonNull<Object>,
    _borrow: PhantomData<&'a Object>,
}

impl<'a> ObjectRef<'a> {
    /// # Safety
    ///
    /// `ptr` must point to a live host object for `'a`, with provenance over
    /// the whole allocation.
    pub unsafe fn new(ptr: NonNull<Object>) -> Self {
        Self {
            ptr,
            _borrow: PhantomData,
        }
    }

    pub fn as_ptr(self) -> *const Object {
        self.ptr.as_ptr().cast_const()
    }

    pub fn header(self) -> &'a Object {
        // SAFETY: live for `'a`; only the header is reachable through this.
        unsafe { self.ptr.as_ref() }
    }

    pub fn type_name(self) -> &'static str {
        self.header().type_name()
    }

    pub fn is<T: NativeType>(self) -> bool {
        self.header().is::<T>()
    }

    /// Views the object as a `T` if that is its exact type.
    pub fn downcast_ref<T: NativeType>(self) -> Option<&'a T> {
        if self.is::<T>() {
            // SAFETY: type checked, and `ptr` covers the whole `T`.
            Some(unsafe { self.ptr.cast::<T>().as_ref() })
        } else {
            None
        }
    }

    /// Renders the object with its type's `repr` slot.
    ///
    /// Rendering only reads the object and never changes its count.
    pub fn repr(self) -> String {
        (self.header().ty().repr)(self)
    }
}

impl fmt::Debug for ObjectRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ObjectRef").field(&self.ptr).finish()
    }
}

/// Type descriptor for a family of host objects.
pub struct ObjectType {
    pub name: &'static str,
    /// Releases the object's storage. Called exactly once, when the count
    /// drops to zero.
    pub dealloc: unsafe fn(*mut Object),
    pub repr: fn(ObjectRef<'_>) -> String,
}

impl fmt::Debug for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectType").field("name", &self.name).finish()
    }
}

/// Types that can be viewed through the common `Object` header.
///
/// # Safety
///
/// Implementors must be `#[repr(C)]` with an [`Object`] as their first field
/// (or be `Object` itself), so that `*mut Self` cast to `*mut Object` points
/// at a valid header.
pub unsafe trait ObjectLayout: Sized {}

unsafe impl ObjectLayout for Object {}

/// A concrete object type with its own descriptor.
///
/// Only concrete types implement this; `Object` itself does not, which keeps
/// downcasts unambiguous.
pub trait NativeType: ObjectLayout {
    const TYPE: &'static ObjectType;

    /// Returns the header of this object.
    fn header(&self) -> &Object;
}
