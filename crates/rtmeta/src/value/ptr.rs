// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Non-owning object handle.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ptr::NonNull;

use crate::reflect::Reflect;
use crate::types::{Type, TypeKind};

/// Address of a `T` owned elsewhere.
///
/// This is how a reference travels through an [`Any`](crate::Any): base
/// conversions return an `ObjectPtr<Base>` pointing into the derived value.
/// Holding the handle does not keep the object alive; dereferencing is
/// `unsafe` and the caller guarantees the object still exists.
pub struct ObjectPtr<T> {
    ptr: NonNull<T>,
}

impl<T> ObjectPtr<T> {
    pub fn new(target: &mut T) -> Self {
        Self {
            ptr: NonNull::from(target),
        }
    }

    /// Wrap a raw pointer. Returns `None` for null.
    pub fn from_raw(ptr: *mut T) -> Option<Self> {
        NonNull::new(ptr).map(|ptr| Self { ptr })
    }

    pub fn as_ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    pub fn addr(&self) -> usize {
        self.ptr.as_ptr() as usize
    }

    /// # Safety
    ///
    /// The pointed-to object must be alive and not mutably borrowed for `'a`.
    pub unsafe fn as_ref<'a>(&self) -> &'a T {
        // SAFETY: guaranteed by the caller.
        unsafe { self.ptr.as_ref() }
    }

    /// # Safety
    ///
    /// The pointed-to object must be alive and not otherwise borrowed for `'a`.
    pub unsafe fn as_mut<'a>(&mut self) -> &'a mut T {
        // SAFETY: guaranteed by the caller.
        unsafe { &mut *self.ptr.as_ptr() }
    }
}

impl<T> Clone for ObjectPtr<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ObjectPtr<T> {}

impl<T> PartialEq for ObjectPtr<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr == other.ptr
    }
}

impl<T> Eq for ObjectPtr<T> {}

impl<T> Hash for ObjectPtr<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ptr.hash(state);
    }
}

impl<T> fmt::Debug for ObjectPtr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectPtr({:p})", self.ptr)
    }
}

// SAFETY: the handle is an address; access to the target goes through
// `unsafe` methods whose callers uphold aliasing. `T: Sync` is required
// so shared handles never expose a non-thread-safe object.
unsafe impl<T: Sync> Send for ObjectPtr<T> {}
// SAFETY: see above.
unsafe impl<T: Sync> Sync for ObjectPtr<T> {}

impl<T: Reflect> Reflect for ObjectPtr<T> {
    const KIND: TypeKind = TypeKind::Pointer;

    fn to_text(&self) -> Option<String> {
        Some(format!("{:p}", self.ptr))
    }

    fn pointee() -> Option<Type> {
        Some(Type::of::<T>())
    }
}
