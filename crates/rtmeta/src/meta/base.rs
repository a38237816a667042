// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use std::fmt;
use std::sync::{Arc, Weak};

use super::ClassInfo;
use crate::error::{Error, Result};
use crate::reflect::Reflect;
use crate::types::Type;
use crate::upcast;
use crate::value::{Any, ObjectPtr};

/// Registered base of a class.
pub struct BaseInfo {
    class: Weak<ClassInfo>,
    base: Type,
    derived: Type,
    convert: fn(&mut Any) -> Result<Any>,
}

/// Upcast a `D` (held by value or as `ObjectPtr<D>`) to `ObjectPtr<B>`.
///
/// The result hands out a writable address, so const instances are refused.
fn convert_to_base<D: Reflect, B: Reflect>(instance: &mut Any) -> Result<Any> {
    let derived = Type::of::<D>();
    if instance.is_const() {
        return Err(Error::ConstViolation(format!(
            "base conversion of const {}",
            instance.type_name().unwrap_or("<empty>")
        )));
    }
    let address: *mut u8 = if instance.is::<D>() {
        instance
            .data_ptr_mut()
            .ok_or_else(|| Error::empty_value("base conversion"))?
    } else if let Ok(ptr) = instance.get_ref::<ObjectPtr<D>>() {
        ptr.as_ptr().cast()
    } else {
        let actual = instance
            .type_name()
            .ok_or_else(|| Error::empty_value("base conversion"))?;
        return Err(Error::mismatch(derived, actual));
    };

    let base = Type::of::<B>();
    let offset = upcast::base_offset(&derived, &base)?.ok_or_else(|| {
        Error::MalformedHierarchy(format!("{} is not a base of {}", base, derived))
    })?;
    // SAFETY: the offset comes from the validated base table of `D` and
    // `address` points at a live `D`, so the result points inside it.
    let target = unsafe { address.add(offset) }.cast::<B>();
    ObjectPtr::from_raw(target)
        .map(Any::new)
        .ok_or_else(|| Error::InvalidState("null base address".into()))
}

impl BaseInfo {
    pub(crate) fn new<D: Reflect, B: Reflect>() -> Self {
        Self {
            class: Weak::new(),
            base: Type::of::<B>(),
            derived: Type::of::<D>(),
            convert: convert_to_base::<D, B>,
        }
    }

    pub(crate) fn attach(&mut self, class: &Weak<ClassInfo>) {
        self.class = class.clone();
    }

    pub fn declaring_class(&self) -> Option<Arc<ClassInfo>> {
        self.class.upgrade()
    }

    pub fn base_type(&self) -> Type {
        self.base
    }

    pub fn derived_type(&self) -> Type {
        self.derived
    }

    /// Byte offset of the base inside the derived type.
    pub fn offset(&self) -> Result<usize> {
        upcast::base_offset(&self.derived, &self.base)?.ok_or_else(|| {
            Error::MalformedHierarchy(format!("{} is not a base of {}", self.base, self.derived))
        })
    }

    /// Convert `instance` (the derived value, or an `ObjectPtr` to it) to an
    /// `Any` holding `ObjectPtr<Base>`.
    ///
    /// The returned handle points into `instance`'s storage. Const instances
    /// fail with `ConstViolation`; use [`Any::upcast`] for a read-only view.
    pub fn convert(&self, instance: &mut Any) -> Result<Any> {
        (self.convert)(instance)
    }
}

impl fmt::Debug for BaseInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseInfo")
            .field("base", &self.base.name())
            .field("derived", &self.derived.name())
            .finish()
    }
}
