// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builder API for class descriptors.
//!
//! Everything is validated when the class is built, not on first use: a bad
//! default value or an unreachable base fails registration immediately.
//!
//! ```
//! use rtmeta::{Any, Function, MemberSpec, Reflect, Registry};
//!
//! #[derive(Clone, Default)]
//! struct Point { x: i32, y: i32 }
//! impl Reflect for Point {
//!     const DEFAULT: Option<fn() -> Self> = Some(Self::default);
//! }
//!
//! let registry = Registry::new();
//! registry
//!     .class_named::<Point>("Point")
//!     .default_constructor()
//!     .field("x", |p| &p.x, |p| &mut p.x)
//!     .method_with(
//!         "shift",
//!         Function::method(|p: &mut Point, dx: i32| p.x += dx),
//!         MemberSpec::new().names(["dx"]).default_value(1),
//!     )
//!     .register()?;
//!
//! let class = registry.get_class("Point").expect("registered");
//! let mut p = class.construct(&[])?;
//! class.method("shift").expect("shift").invoke_on(&mut p, &[])?;
//! assert_eq!(class.field("x").expect("x").get(&p)?.get::<i32>()?, 1);
//! # Ok::<(), rtmeta::Error>(())
//! ```

use std::collections::HashSet;
use std::marker::PhantomData;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::RegistryConfig;
use crate::error::{Error, Result};
use crate::function::Function;
use crate::meta::{
    build_parameters, BaseInfo, ClassInfo, ClassMembers, ConstructorInfo, FieldInfo,
    InstanceField, MemberSpec, MethodInfo, StaticField,
};
use crate::reflect::Reflect;
use crate::registry::Registry;
use crate::types::Type;
use crate::upcast;
use crate::value::Any;

/// Builder for one class descriptor.
pub struct ClassBuilder<T: Reflect> {
    name: String,
    constructors: Vec<(Function, MemberSpec)>,
    methods: Vec<(String, Function, MemberSpec)>,
    fields: Vec<FieldInfo>,
    bases: Vec<BaseInfo>,
    attributes: Vec<Any>,
    errors: Vec<String>,
    _class: PhantomData<fn() -> T>,
}

impl<T: Reflect> Default for ClassBuilder<T> {
    fn default() -> Self {
        Self::named(Type::of::<T>().name())
    }
}

impl<T: Reflect> ClassBuilder<T> {
    /// Builder named after `T`'s type name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder with an explicit class name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constructors: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
            bases: Vec::new(),
            attributes: Vec::new(),
            errors: Vec::new(),
            _class: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // ---- constructors ----

    /// Add a constructor. Its return type must be `T`.
    pub fn constructor(self, function: Function) -> Self {
        self.constructor_with(function, MemberSpec::new())
    }

    pub fn constructor_with(mut self, function: Function, spec: MemberSpec) -> Self {
        self.constructors.push((function, spec));
        self
    }

    /// Add a constructor from [`Reflect::DEFAULT`].
    pub fn default_constructor(mut self) -> Self {
        match T::DEFAULT {
            Some(make) => self.constructors.push((Function::free(make), MemberSpec::new())),
            None => self
                .errors
                .push(format!("{} is not default-constructible", self.name)),
        }
        self
    }

    // ---- methods ----

    pub fn method(self, name: impl Into<String>, function: Function) -> Self {
        self.method_with(name, function, MemberSpec::new())
    }

    /// Add a method with parameter names, defaults or attributes.
    ///
    /// Overloads share a name; lookups return them in registration order.
    pub fn method_with(mut self, name: impl Into<String>, mut function: Function, spec: MemberSpec) -> Self {
        function.set_owner(Type::of::<T>());
        self.methods.push((name.into(), function, spec));
        self
    }

    // ---- fields ----

    /// Add a read-write instance field.
    pub fn field<F: Reflect>(
        mut self,
        name: impl Into<String>,
        get: fn(&T) -> &F,
        get_mut: fn(&mut T) -> &mut F,
    ) -> Self {
        let name = name.into();
        let access = InstanceField::new(name.clone(), get, Some(get_mut));
        self.fields
            .push(FieldInfo::new(name, Type::of::<F>(), Box::new(access)));
        self
    }

    /// Add an instance field that cannot be set.
    pub fn readonly_field<F: Reflect>(mut self, name: impl Into<String>, get: fn(&T) -> &F) -> Self {
        let name = name.into();
        let access = InstanceField::new(name.clone(), get, None);
        self.fields
            .push(FieldInfo::new(name, Type::of::<F>(), Box::new(access)));
        self
    }

    /// Add a static field backed by a process-wide lock.
    pub fn static_field<F: Reflect>(mut self, name: impl Into<String>, cell: &'static RwLock<F>) -> Self {
        self.fields.push(FieldInfo::new(
            name.into(),
            Type::of::<F>(),
            Box::new(StaticField::new(cell)),
        ));
        self
    }

    /// Attach an attribute to the most recently added field.
    pub fn field_attribute(mut self, value: impl Into<Any>) -> Self {
        match self.fields.last_mut() {
            Some(field) => field.push_attribute(value.into()),
            None => self
                .errors
                .push(format!("{}: field attribute before any field", self.name)),
        }
        self
    }

    // ---- bases & attributes ----

    /// Declare `B` as a base. It must be reachable through `T::BASES`.
    pub fn base<B: Reflect>(mut self) -> Self {
        self.bases.push(BaseInfo::new::<T, B>());
        self
    }

    pub fn attribute(mut self, value: impl Into<Any>) -> Self {
        self.attributes.push(value.into());
        self
    }

    pub fn attributes<I: IntoIterator<Item = Any>>(mut self, values: I) -> Self {
        self.attributes.extend(values);
        self
    }

    // ---- build ----

    /// Validate everything and freeze the descriptor.
    pub fn build(self, config: &RegistryConfig) -> Result<Arc<ClassInfo>> {
        if let Some(first) = self.errors.into_iter().next() {
            return Err(Error::InvalidRegistration(first));
        }

        let class_type = Type::of::<T>();
        let validate = config.validate_default_types;
        let mut members = ClassMembers {
            attributes: self.attributes,
            ..ClassMembers::default()
        };

        for (function, spec) in self.constructors {
            let owner = format!("{}::<constructor>", self.name);
            if function.requires_instance() || !function.return_type().same_type(&class_type) {
                return Err(Error::InvalidRegistration(format!(
                    "{}: {} does not construct {}",
                    owner, function, class_type
                )));
            }
            let (names, defaults, attributes) = spec.into_parts();
            let params = build_parameters(&owner, function.parameter_types(), names, defaults, validate)?;
            members
                .constructors
                .push(ConstructorInfo::new(function, params, attributes));
        }

        for (name, function, spec) in self.methods {
            let owner = format!("{}::{}", self.name, name);
            if let Some(instance) = function.instance_type() {
                if !instance.same_type(&class_type) {
                    return Err(Error::InvalidRegistration(format!(
                        "{}: receiver is {}, expected {}",
                        owner, instance, class_type
                    )));
                }
            }
            let (names, defaults, attributes) = spec.into_parts();
            let params = build_parameters(&owner, function.parameter_types(), names, defaults, validate)?;
            members
                .methods
                .push(MethodInfo::new(name, function, params, attributes));
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name()) {
                return Err(Error::InvalidRegistration(format!(
                    "{}: duplicate field {}",
                    self.name,
                    field.name()
                )));
            }
        }
        members.fields = self.fields;

        for base in self.bases {
            let ty = base.base_type();
            if ty.same_type(&class_type) || upcast::base_offset(&class_type, &ty)?.is_none() {
                return Err(Error::InvalidRegistration(format!(
                    "{}: {} is not a declared base",
                    self.name, ty
                )));
            }
            members.bases.push(base);
        }

        Ok(ClassInfo::build(self.name, class_type, members))
    }
}

/// Pending class registration.
///
/// Dropping it registers the class; failures are logged because `Drop`
/// cannot return them. Use [`register`](Self::register) to get the result,
/// or [`discard`](Self::discard) to cancel.
pub struct Registration<'r, T: Reflect> {
    registry: &'r Registry,
    builder: Option<ClassBuilder<T>>,
}

impl<'r, T: Reflect> Registration<'r, T> {
    pub(crate) fn new(registry: &'r Registry, builder: ClassBuilder<T>) -> Self {
        Self {
            registry,
            builder: Some(builder),
        }
    }

    fn map(mut self, f: impl FnOnce(ClassBuilder<T>) -> ClassBuilder<T>) -> Self {
        self.builder = self.builder.take().map(f);
        self
    }

    pub fn constructor(self, function: Function) -> Self {
        self.map(|b| b.constructor(function))
    }

    pub fn constructor_with(self, function: Function, spec: MemberSpec) -> Self {
        self.map(|b| b.constructor_with(function, spec))
    }

    pub fn default_constructor(self) -> Self {
        self.map(ClassBuilder::default_constructor)
    }

    pub fn method(self, name: impl Into<String>, function: Function) -> Self {
        self.map(|b| b.method(name, function))
    }

    pub fn method_with(self, name: impl Into<String>, function: Function, spec: MemberSpec) -> Self {
        self.map(|b| b.method_with(name, function, spec))
    }

    pub fn field<F: Reflect>(
        self,
        name: impl Into<String>,
        get: fn(&T) -> &F,
        get_mut: fn(&mut T) -> &mut F,
    ) -> Self {
        self.map(|b| b.field(name, get, get_mut))
    }

    pub fn readonly_field<F: Reflect>(self, name: impl Into<String>, get: fn(&T) -> &F) -> Self {
        self.map(|b| b.readonly_field(name, get))
    }

    pub fn static_field<F: Reflect>(self, name: impl Into<String>, cell: &'static RwLock<F>) -> Self {
        self.map(|b| b.static_field(name, cell))
    }

    pub fn field_attribute(self, value: impl Into<Any>) -> Self {
        self.map(|b| b.field_attribute(value))
    }

    pub fn base<B: Reflect>(self) -> Self {
        self.map(ClassBuilder::base::<B>)
    }

    pub fn attribute(self, value: impl Into<Any>) -> Self {
        self.map(|b| b.attribute(value))
    }

    pub fn attributes<I: IntoIterator<Item = Any>>(self, values: I) -> Self {
        self.map(|b| b.attributes(values))
    }

    /// Register now and return the descriptor.
    pub fn register(mut self) -> Result<Arc<ClassInfo>> {
        match self.builder.take() {
            Some(builder) => self.registry.register(builder),
            None => Err(Error::InvalidState("registration already consumed".into())),
        }
    }

    /// Drop the pending class without registering it.
    pub fn discard(mut self) {
        self.builder = None;
    }
}

impl<T: Reflect> Drop for Registration<'_, T> {
    fn drop(&mut self) {
        if let Some(builder) = self.builder.take() {
            let name = builder.name().to_string();
            if let Err(e) = self.registry.register(builder) {
                log::error!("[Registration] class {} not registered: {}", name, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BaseLink;
    use crate::{base_link, ErrorCategory};

    #[derive(Clone, Default)]
    struct Base {
        id: u32,
    }
    impl Reflect for Base {}

    #[derive(Clone, Default)]
    struct Widget {
        base: Base,
        size: u16,
    }
    impl Reflect for Widget {
        const BASES: &'static [BaseLink] = &[base_link!(Widget, base: Base)];
        const DEFAULT: Option<fn() -> Self> = Some(Self::default);
    }

    impl Widget {
        fn grow(&mut self, by: u16) -> u16 {
            self.size += by;
            self.size
        }
    }

    fn build(builder: ClassBuilder<Widget>) -> Result<Arc<ClassInfo>> {
        builder.build(&RegistryConfig::default())
    }

    fn shape_error(result: Result<Arc<ClassInfo>>) -> bool {
        matches!(result, Err(Error::InvalidRegistration(_)))
    }

    #[test]
    fn test_build_full_class() {
        let class = build(
            ClassBuilder::<Widget>::named("Widget")
                .default_constructor()
                .constructor(Function::free(|size: u16| Widget {
                    size,
                    ..Widget::default()
                }))
                .method("grow", Function::method(Widget::grow))
                .field("size", |w| &w.size, |w| &mut w.size)
                .field_attribute("px")
                .readonly_field("id", |w| &w.base.id)
                .base::<Base>()
                .attribute(7u8),
        )
        .expect("valid class");

        assert_eq!(class.name(), "Widget");
        assert_eq!(class.constructors().len(), 2);
        assert_eq!(class.attribute::<u8>(), Some(&7));
        assert_eq!(class.field("size").and_then(|f| f.attribute::<&str>()), Some(&"px"));
        assert!(class.base(Type::of::<Base>()).is_some());

        let method = class.method("grow").expect("grow");
        let owner = method.declaring_class().expect("class alive");
        assert!(Arc::ptr_eq(&owner, &class));
    }

    #[test]
    fn test_eager_validation() {
        #[derive(Clone)]
        struct Other;
        impl Reflect for Other {}

        assert!(shape_error(build(
            ClassBuilder::new().constructor(Function::free(|| Other))
        )));
        assert!(shape_error(build(
            ClassBuilder::new().method("x", Function::method(|_: &mut Other| ()))
        )));
        assert!(shape_error(build(ClassBuilder::new().base::<Other>())));
        assert!(shape_error(build(ClassBuilder::new().base::<Widget>())));
        assert!(shape_error(build(ClassBuilder::new().method_with(
            "grow",
            Function::method(Widget::grow),
            MemberSpec::new().default_value(1u32),
        ))));
        assert!(shape_error(build(ClassBuilder::new().method_with(
            "grow",
            Function::method(Widget::grow),
            MemberSpec::new().names(["a", "b"]),
        ))));
        assert!(shape_error(build(
            ClassBuilder::new()
                .field("size", |w: &Widget| &w.size, |w: &mut Widget| &mut w.size)
                .readonly_field("size", |w: &Widget| &w.size)
        )));
        assert!(shape_error(build(ClassBuilder::new().field_attribute(1u8))));
    }

    #[test]
    fn test_default_type_check_can_be_disabled() {
        let config = RegistryConfig {
            validate_default_types: false,
            ..RegistryConfig::default()
        };
        let class = ClassBuilder::<Widget>::new()
            .method_with(
                "grow",
                Function::method(Widget::grow),
                MemberSpec::new().default_value(1u32),
            )
            .build(&config)
            .expect("unchecked default");
        let err = class
            .method("grow")
            .map(|m| m.invoke_on(&mut Any::new(Widget::default()), &[]))
            .expect("grow")
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::TypeMismatch);
    }

    #[test]
    fn test_not_default_constructible() {
        #[derive(Clone)]
        struct Bare;
        impl Reflect for Bare {}

        let result = ClassBuilder::<Bare>::new()
            .default_constructor()
            .build(&RegistryConfig::default());
        assert!(shape_error(result));
    }
}
