// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use std::fmt;
use std::sync::Arc;

use super::{find_attribute, BaseInfo, ConstructorInfo, FieldInfo, MethodInfo};
use crate::error::{Error, Result};
use crate::reflect::Reflect;
use crate::types::Type;
use crate::value::Any;

/// Members collected by a builder, before they are tied to their class.
#[derive(Default)]
pub(crate) struct ClassMembers {
    pub constructors: Vec<ConstructorInfo>,
    pub methods: Vec<MethodInfo>,
    pub fields: Vec<FieldInfo>,
    pub bases: Vec<BaseInfo>,
    pub attributes: Vec<Any>,
}

/// Registered class descriptor.
///
/// Immutable once built; shared as `Arc<ClassInfo>`. Every member keeps a
/// weak back-reference to it.
pub struct ClassInfo {
    name: String,
    ty: Type,
    constructors: Vec<ConstructorInfo>,
    methods: Vec<MethodInfo>,
    fields: Vec<FieldInfo>,
    bases: Vec<BaseInfo>,
    attributes: Vec<Any>,
}

impl ClassInfo {
    pub(crate) fn build(name: String, ty: Type, members: ClassMembers) -> Arc<ClassInfo> {
        let ClassMembers {
            mut constructors,
            mut methods,
            mut fields,
            mut bases,
            attributes,
        } = members;

        Arc::new_cyclic(|class| {
            constructors.iter_mut().for_each(|c| c.attach(class));
            methods.iter_mut().for_each(|m| m.attach(class));
            fields.iter_mut().for_each(|f| f.attach(class));
            bases.iter_mut().for_each(|b| b.attach(class));
            ClassInfo {
                name,
                ty,
                constructors,
                methods,
                fields,
                bases,
                attributes,
            }
        })
    }

    /// Registered name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_info(&self) -> Type {
        self.ty
    }

    pub fn constructors(&self) -> &[ConstructorInfo] {
        &self.constructors
    }

    pub fn methods(&self) -> &[MethodInfo] {
        &self.methods
    }

    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    pub fn bases(&self) -> &[BaseInfo] {
        &self.bases
    }

    pub fn attributes(&self) -> &[Any] {
        &self.attributes
    }

    pub fn attribute<A: Reflect>(&self) -> Option<&A> {
        find_attribute(&self.attributes)
    }

    /// First method registered under `name`.
    pub fn method(&self, name: &str) -> Option<&MethodInfo> {
        self.methods.iter().find(|m| m.name() == name)
    }

    /// All overloads registered under `name`.
    pub fn methods_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a MethodInfo> + 'a {
        self.methods.iter().filter(move |m| m.name() == name)
    }

    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Registered base with the given (unqualified) type.
    pub fn base(&self, ty: Type) -> Option<&BaseInfo> {
        self.bases.iter().find(|b| b.base_type().same_type(&ty))
    }

    /// Construct through the first constructor that accepts `args`.
    ///
    /// When none does, the error comes from the constructor whose arity is
    /// closest to `args.len()` (the first one on a tie). `Unsupported` is
    /// only returned for a class without constructors.
    pub fn construct(&self, args: &[Any]) -> Result<Any> {
        if let Some(ctor) = self.constructors.iter().find(|c| c.accepts(args)) {
            return ctor.invoke(args);
        }
        let closest = self
            .constructors
            .iter()
            .min_by_key(|c| c.parameters().len().abs_diff(args.len()))
            .ok_or_else(|| Error::unsupported("construct", &self.name))?;
        closest.invoke(args)
    }
}

impl fmt::Debug for ClassInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassInfo")
            .field("name", &self.name)
            .field("type", &self.ty)
            .field("constructors", &self.constructors)
            .field("methods", &self.methods)
            .field("fields", &self.fields)
            .field("bases", &self.bases)
            .finish()
    }
}
