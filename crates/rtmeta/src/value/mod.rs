// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type-erased values.
//!
//! [`Any`] owns at most one boxed [`Reflect`] value. Recovery is by exact
//! type only: there is no numeric promotion and no implicit conversion, so
//! an `Any` holding an `i32` cannot be read as an `i64`.
//!
//! # Example
//!
//! ```
//! use rtmeta::Any;
//!
//! let mut v = Any::new(41i32);
//! *v.get_mut::<i32>()? += 1;
//! assert_eq!(v.get::<i32>()?, 42);
//! assert!(v.get::<i64>().is_err());
//! assert_eq!(v.to_string()?, "42");
//! # Ok::<(), rtmeta::Error>(())
//! ```

mod elements;
mod ptr;

pub use elements::Elements;
pub use ptr::ObjectPtr;

use std::fmt;

use crate::error::{Error, Result};
use crate::reflect::Reflect;
use crate::types::Type;
use crate::upcast;

/// Object-safe view of a stored value.
pub(crate) trait ErasedValue: Send + Sync {
    fn value_type(&self) -> Type;
    fn as_std(&self) -> &dyn std::any::Any;
    fn as_std_mut(&mut self) -> &mut dyn std::any::Any;
    fn into_std(self: Box<Self>) -> Box<dyn std::any::Any + Send + Sync>;
    fn clone_boxed(&self) -> Box<dyn ErasedValue>;
    fn erased_text(&self) -> Option<String>;
    fn erased_elements(&self) -> Option<Box<dyn Iterator<Item = Any> + '_>>;
    fn data_ptr(&self) -> *const u8;
    fn data_ptr_mut(&mut self) -> *mut u8;
}

impl<T: Reflect> ErasedValue for T {
    fn value_type(&self) -> Type {
        Type::of::<T>()
    }

    fn as_std(&self) -> &dyn std::any::Any {
        self
    }

    fn as_std_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }

    fn into_std(self: Box<Self>) -> Box<dyn std::any::Any + Send + Sync> {
        self
    }

    fn clone_boxed(&self) -> Box<dyn ErasedValue> {
        Box::new(self.clone())
    }

    fn erased_text(&self) -> Option<String> {
        Reflect::to_text(self)
    }

    fn erased_elements(&self) -> Option<Box<dyn Iterator<Item = Any> + '_>> {
        Reflect::elements(self)
    }

    fn data_ptr(&self) -> *const u8 {
        (self as *const T).cast()
    }

    fn data_ptr_mut(&mut self) -> *mut u8 {
        (self as *mut T).cast()
    }
}

/// Container for a single value of any [`Reflect`] type.
#[derive(Default)]
pub struct Any {
    value: Option<Box<dyn ErasedValue>>,
    is_const: bool,
}

impl Any {
    pub fn new<T: Reflect>(value: T) -> Self {
        Self {
            value: Some(Box::new(value)),
            is_const: false,
        }
    }

    /// Const-qualified value: readable, but [`get_mut`](Self::get_mut) and
    /// non-const methods are refused.
    pub fn new_const<T: Reflect>(value: T) -> Self {
        Self::new(value).into_const()
    }

    pub const fn empty() -> Self {
        Self {
            value: None,
            is_const: false,
        }
    }

    #[must_use]
    pub fn into_const(mut self) -> Self {
        self.is_const = true;
        self
    }

    pub fn is_valid(&self) -> bool {
        self.value.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    pub fn is_const(&self) -> bool {
        self.is_const
    }

    /// Descriptor of the stored value, const-qualified if this `Any` is.
    pub fn type_info(&self) -> Result<Type> {
        let ty = self.erased("type_info")?.value_type();
        Ok(if self.is_const { ty.as_const() } else { ty })
    }

    /// Unqualified name of the stored type, `None` when empty.
    pub fn type_name(&self) -> Option<&'static str> {
        self.value.as_deref().map(|v| v.value_type().name())
    }

    /// `true` if a `T` is stored.
    pub fn is<T: Reflect>(&self) -> bool {
        self.value
            .as_deref()
            .is_some_and(|v| v.as_std().is::<T>())
    }

    pub(crate) fn value_type(&self) -> Option<Type> {
        self.value.as_deref().map(|v| v.value_type())
    }

    fn erased(&self, operation: &str) -> Result<&(dyn ErasedValue + 'static)> {
        self.value
            .as_deref()
            .ok_or_else(|| Error::empty_value(operation))
    }

    fn erased_mut(&mut self, operation: &str) -> Result<&mut (dyn ErasedValue + 'static)> {
        if self.is_const {
            let name = self.type_name().unwrap_or("<empty>");
            return Err(Error::ConstViolation(format!(
                "{} on const {}",
                operation, name
            )));
        }
        match self.value.as_deref_mut() {
            Some(value) => Ok(value),
            None => Err(Error::empty_value(operation)),
        }
    }

    // ---- exact-type recovery ----

    /// Clone the stored `T` out.
    pub fn get<T: Reflect>(&self) -> Result<T> {
        self.get_ref::<T>().cloned()
    }

    pub fn get_ref<T: Reflect>(&self) -> Result<&T> {
        let value = self.erased("get")?;
        value
            .as_std()
            .downcast_ref::<T>()
            .ok_or_else(|| Error::mismatch(Type::of::<T>(), value.value_type()))
    }

    /// Mutable access. Fails with `ConstViolation` on a const value.
    pub fn get_mut<T: Reflect>(&mut self) -> Result<&mut T> {
        if self.is_empty() {
            return Err(Error::empty_value("get_mut"));
        }
        let value = self.erased_mut("get_mut")?;
        let actual = value.value_type();
        value
            .as_std_mut()
            .downcast_mut::<T>()
            .ok_or_else(|| Error::mismatch(Type::of::<T>(), actual))
    }

    /// Move the stored `T` out. On mismatch the value is dropped.
    pub fn take<T: Reflect>(self) -> Result<T> {
        let value = self.value.ok_or_else(|| Error::empty_value("take"))?;
        let actual = value.value_type();
        value
            .into_std()
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| Error::mismatch(Type::of::<T>(), actual))
    }

    /// Deep copy, keeping the const qualifier.
    pub fn clone_value(&self) -> Result<Any> {
        let value = self.erased("clone")?;
        Ok(Any {
            value: Some(value.clone_boxed()),
            is_const: self.is_const,
        })
    }

    /// String form of the stored value.
    #[allow(clippy::inherent_to_string)]
    pub fn to_string(&self) -> Result<String> {
        let value = self.erased("to_string")?;
        value
            .erased_text()
            .ok_or_else(|| Error::unsupported("to_string", value.value_type()))
    }

    /// Iterate the elements of a sequence or array.
    pub fn iterate(&self) -> Result<Elements<'_>> {
        let value = self.erased("iterate")?;
        value
            .erased_elements()
            .map(Elements::new)
            .ok_or_else(|| Error::unsupported("iterate", value.value_type()))
    }

    // ---- upcasts ----

    fn class_offset(from: Type, to: Type) -> Result<Option<usize>> {
        if !from.is_class() {
            return Err(Error::unsupported("upcast", from));
        }
        upcast::base_offset(&from, &to)
    }

    /// View the stored class value as one of its declared bases.
    ///
    /// `Ok(None)` when `B` is not reachable. Fails with `Unsupported` unless
    /// the stored type is a class.
    pub fn upcast<B: Reflect>(&self) -> Result<Option<&B>> {
        let value = self.erased("upcast")?;
        let Some(offset) = Self::class_offset(value.value_type(), Type::of::<B>())? else {
            return Ok(None);
        };
        // SAFETY: `base_offset` only returns offsets taken from declared
        // base links, checked to lie inside the value and to be aligned for
        // the base. Each link guarantees a `B` lives at that position.
        Ok(Some(unsafe { &*value.data_ptr().add(offset).cast::<B>() }))
    }

    /// Mutable form of [`upcast`](Self::upcast). Refused on const values.
    pub fn upcast_mut<B: Reflect>(&mut self) -> Result<Option<&mut B>> {
        if self.is_empty() {
            return Err(Error::empty_value("upcast_mut"));
        }
        let value = self.erased_mut("upcast_mut")?;
        let Some(offset) = Self::class_offset(value.value_type(), Type::of::<B>())? else {
            return Ok(None);
        };
        // SAFETY: as in `upcast`; the exclusive borrow of `self` covers the
        // returned reference.
        Ok(Some(unsafe { &mut *value.data_ptr_mut().add(offset).cast::<B>() }))
    }

    /// Address of the `target` sub-object, if reachable.
    pub fn upcast_ptr(&self, target: Type) -> Result<Option<*const u8>> {
        let value = self.erased("upcast")?;
        let offset = Self::class_offset(value.value_type(), target)?;
        // SAFETY: offset validated by `base_offset`, see `upcast`.
        Ok(offset.map(|offset| unsafe { value.data_ptr().add(offset) }))
    }

    /// Raw address of the stored value, ignoring the const qualifier.
    pub(crate) fn data_ptr_mut(&mut self) -> Option<*mut u8> {
        self.value.as_deref_mut().map(|v| v.data_ptr_mut())
    }

    // ---- assignment ----

    /// Store `value`, returning the previous content.
    ///
    /// Fails with `ConstViolation` on a const value, like
    /// [`get_mut`](Self::get_mut). Plain assignment or [`reset`](Self::reset)
    /// discard the whole container instead.
    pub fn replace<T: Reflect>(&mut self, value: T) -> Result<Any> {
        if self.is_const {
            return Err(Error::ConstViolation(format!(
                "replace on const {}",
                self.type_name().unwrap_or("<empty>")
            )));
        }
        Ok(std::mem::replace(self, Any::new(value)))
    }

    /// Drop the stored value and clear the const qualifier.
    pub fn reset(&mut self) {
        self.value = None;
        self.is_const = false;
    }

    /// Convert to a std `Box<dyn Any>`.
    pub fn into_boxed(self) -> Result<Box<dyn std::any::Any + Send + Sync>> {
        self.value
            .map(|v| v.into_std())
            .ok_or_else(|| Error::empty_value("into_boxed"))
    }
}

impl Clone for Any {
    fn clone(&self) -> Self {
        self.clone_value().unwrap_or_default()
    }
}

impl<T: Reflect> From<T> for Any {
    fn from(value: T) -> Self {
        Any::new(value)
    }
}

impl fmt::Debug for Any {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(value) = self.value.as_deref() else {
            return f.write_str("Any(<empty>)");
        };
        let mut ty = value.value_type();
        if self.is_const {
            ty = ty.as_const();
        }
        match value.erased_text() {
            Some(text) => write!(f, "Any({} = {})", ty, text),
            None => write!(f, "Any({})", ty),
        }
    }
}
