// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field descriptors.
//!
//! Instance fields are reached through a pair of accessor functions
//! (`fn(&T) -> &F`, `fn(&mut T) -> &mut F`). Static fields live in a
//! `&'static parking_lot::RwLock<F>`.

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use super::{find_attribute, ClassInfo};
use crate::error::{Error, Result};
use crate::reflect::Reflect;
use crate::types::Type;
use crate::value::Any;

pub(crate) trait FieldAccess: Send + Sync {
    fn is_static(&self) -> bool;
    fn is_readonly(&self) -> bool;
    fn get(&self, instance: Option<&Any>) -> Result<Any>;
    fn set(&self, instance: Option<&mut Any>, value: Any) -> Result<()>;
}

pub(crate) struct InstanceField<T, F> {
    name: String,
    get: fn(&T) -> &F,
    get_mut: Option<fn(&mut T) -> &mut F>,
}

impl<T, F> InstanceField<T, F> {
    pub(crate) fn new(
        name: String,
        get: fn(&T) -> &F,
        get_mut: Option<fn(&mut T) -> &mut F>,
    ) -> Self {
        Self { name, get, get_mut }
    }

    fn missing_instance(&self) -> Error {
        Error::InvalidState(format!("field {} needs an instance", self.name))
    }
}

impl<T: Reflect, F: Reflect> FieldAccess for InstanceField<T, F> {
    fn is_static(&self) -> bool {
        false
    }

    fn is_readonly(&self) -> bool {
        self.get_mut.is_none()
    }

    fn get(&self, instance: Option<&Any>) -> Result<Any> {
        let instance = instance.ok_or_else(|| self.missing_instance())?;
        let object = instance.get_ref::<T>()?;
        Ok(Any::new((self.get)(object).clone()))
    }

    fn set(&self, instance: Option<&mut Any>, value: Any) -> Result<()> {
        let instance = instance.ok_or_else(|| self.missing_instance())?;
        let get_mut = self
            .get_mut
            .ok_or_else(|| Error::unsupported("set on read-only field", &self.name))?;
        let value = value.take::<F>()?;
        let object = instance.get_mut::<T>()?;
        *get_mut(object) = value;
        Ok(())
    }
}

pub(crate) struct StaticField<F: 'static> {
    cell: &'static RwLock<F>,
}

impl<F> StaticField<F> {
    pub(crate) fn new(cell: &'static RwLock<F>) -> Self {
        Self { cell }
    }
}

impl<F: Reflect> FieldAccess for StaticField<F> {
    fn is_static(&self) -> bool {
        true
    }

    fn is_readonly(&self) -> bool {
        false
    }

    fn get(&self, _instance: Option<&Any>) -> Result<Any> {
        Ok(Any::new(self.cell.read().clone()))
    }

    fn set(&self, _instance: Option<&mut Any>, value: Any) -> Result<()> {
        let value = value.take::<F>()?;
        *self.cell.write() = value;
        Ok(())
    }
}

/// Registered field of a class.
pub struct FieldInfo {
    class: Weak<ClassInfo>,
    name: String,
    ty: Type,
    access: Box<dyn FieldAccess>,
    attributes: Vec<Any>,
}

impl FieldInfo {
    pub(crate) fn new(name: String, ty: Type, access: Box<dyn FieldAccess>) -> Self {
        Self {
            class: Weak::new(),
            name,
            ty,
            access,
            attributes: Vec::new(),
        }
    }

    pub(crate) fn attach(&mut self, class: &Weak<ClassInfo>) {
        self.class = class.clone();
    }

    pub(crate) fn push_attribute(&mut self, value: Any) {
        self.attributes.push(value);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_info(&self) -> Type {
        self.ty
    }

    pub fn declaring_class(&self) -> Option<Arc<ClassInfo>> {
        self.class.upgrade()
    }

    pub fn attributes(&self) -> &[Any] {
        &self.attributes
    }

    pub fn attribute<A: Reflect>(&self) -> Option<&A> {
        find_attribute(&self.attributes)
    }

    pub fn is_static(&self) -> bool {
        self.access.is_static()
    }

    pub fn is_readonly(&self) -> bool {
        self.access.is_readonly()
    }

    /// Read the field of `instance` (ignored for static fields).
    pub fn get(&self, instance: &Any) -> Result<Any> {
        self.access.get(Some(instance))
    }

    /// Write the field of `instance` (ignored for static fields).
    pub fn set(&self, instance: &mut Any, value: impl Into<Any>) -> Result<()> {
        self.access.set(Some(instance), value.into())
    }

    /// Read a static field.
    pub fn get_static(&self) -> Result<Any> {
        self.access.get(None)
    }

    /// Write a static field.
    pub fn set_static(&self, value: impl Into<Any>) -> Result<()> {
        self.access.set(None, value.into())
    }
}

impl fmt::Debug for FieldInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldInfo")
            .field("name", &self.name)
            .field("type", &self.ty)
            .field("static", &self.is_static())
            .finish()
    }
}
