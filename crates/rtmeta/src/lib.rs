// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # rtmeta - runtime type erasure and reflection
//!
//! Hold a value of any type, remember enough about that type to recover it
//! safely, view it through its declared bases, call functions on it with
//! dynamically typed arguments, and inspect its constructors, methods and
//! fields from code that has no static knowledge of it.
//!
//! ## Quick Start
//!
//! ```rust
//! use rtmeta::{Any, Function, Reflect, Registry, Result};
//!
//! #[derive(Clone)]
//! struct Point { x: i32, y: i32 }
//! impl Reflect for Point {}
//!
//! impl Point {
//!     fn sum(&self) -> i32 { self.x + self.y }
//! }
//!
//! fn main() -> Result<()> {
//!     let registry = Registry::new();
//!     registry
//!         .class_named::<Point>("Point")
//!         .constructor(Function::free(|x: i32, y: i32| Point { x, y }))
//!         .method("sum", Function::const_method(Point::sum))
//!         .field("x", |p| &p.x, |p| &mut p.x)
//!         .register()?;
//!
//!     let point = registry.get_class("Point").expect("registered");
//!     let mut p = point.construct(&[Any::new(3), Any::new(4)])?;
//!     let sum = point.method("sum").expect("sum").invoke_on(&mut p, &[])?;
//!     assert_eq!(sum.map(|v| v.get::<i32>()), Some(Ok(7)));
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------+
//! |  Registry        name -> ClassInfo, name -> [MethodInfo]      |
//! +---------------------------------------------------------------+
//! |  Builder         ClassBuilder / Registration (eager checks)   |
//! +---------------------------------------------------------------+
//! |  Metadata        Class/Constructor/Method/Field/Base/Param    |
//! +---------------------------------------------------------------+
//! |  Function        erased signature + arity bindings 0..=8      |
//! +---------------------------------------------------------------+
//! |  Any / upcast    boxed value, base offsets via BaseLink       |
//! +---------------------------------------------------------------+
//! |  Type / Reflect  descriptor built from compile-time info      |
//! +---------------------------------------------------------------+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Reflect`] | Capability trait every reflected type implements |
//! | [`Type`] | Copyable runtime type descriptor |
//! | [`Any`] | Owning container for one value of any `Reflect` type |
//! | [`Function`] | Callable with an erased, checked signature |
//! | [`ClassInfo`] | Registered class: constructors, methods, fields, bases |
//! | [`Registry`] | Name-keyed store of classes and free functions |
//!
//! ## Inheritance
//!
//! Rust has no implementation inheritance. A derived type embeds its bases
//! as fields and lists them in [`Reflect::BASES`] with [`base_link!`]; upcasts
//! only ever follow those links.

/// Class builder and pending registrations.
pub mod builder;
/// Static limits and runtime registry configuration.
pub mod config;
/// Error type and result alias.
pub mod error;
/// Dynamically invocable functions.
pub mod function;
/// Reflection metadata descriptors.
pub mod meta;
/// The `Reflect` capability trait.
pub mod reflect;
/// Class and function registry.
pub mod registry;
/// Runtime type descriptors.
pub mod types;
/// Base sub-object offsets.
pub mod upcast;
/// Type-erased values.
pub mod value;

pub use builder::{ClassBuilder, Registration};
pub use config::{DuplicatePolicy, RegistryConfig};
pub use error::{Error, ErrorCategory, Result};
pub use function::{Function, FunctionKind};
pub use meta::{
    BaseInfo, ClassInfo, ConstructorInfo, FieldInfo, MemberSpec, MethodInfo, ParameterInfo,
};
pub use reflect::Reflect;
pub use registry::Registry;
pub use types::{BaseLink, PrimitiveKind, Type, TypeKind};
pub use value::{Any, Elements, ObjectPtr};
