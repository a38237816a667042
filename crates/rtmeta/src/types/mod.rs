// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Runtime type descriptors.
//!
//! A [`Type`] is a small `Copy` record built from compile-time information
//! about a [`Reflect`] type: identity, name, category, layout, and the hooks
//! needed to default-construct a value or walk its declared bases.
//!
//! # Example
//!
//! ```
//! use rtmeta::Type;
//!
//! let t = Type::of::<i32>();
//! assert!(t.is_integral() && t.is_signed());
//! assert_eq!(t, Type::of::<i32>());
//! assert_ne!(t, t.as_const());
//! ```

mod base;
mod kind;

pub use base::BaseLink;
pub use kind::{PrimitiveKind, TypeKind};

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::config::CONST_SUFFIX;
use crate::reflect::Reflect;
use crate::value::Any;

/// Runtime type descriptor.
#[derive(Clone, Copy)]
pub struct Type {
    id: TypeId,
    name: &'static str,
    kind: TypeKind,
    size: usize,
    align: usize,
    needs_drop: bool,
    is_const: bool,
    default_constructible: bool,
    construct: fn() -> Option<Any>,
    pointee: fn() -> Option<Type>,
    element: fn() -> Option<Type>,
    bases: &'static [BaseLink],
}

fn construct_default<T: Reflect>() -> Option<Any> {
    T::DEFAULT.map(|make| Any::new(make()))
}

impl Type {
    /// Descriptor of `T`.
    pub fn of<T: Reflect>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: T::type_name(),
            kind: T::KIND,
            size: std::mem::size_of::<T>(),
            align: std::mem::align_of::<T>(),
            needs_drop: std::mem::needs_drop::<T>(),
            is_const: false,
            default_constructible: T::DEFAULT.is_some(),
            construct: construct_default::<T>,
            pointee: T::pointee,
            element: T::element_type,
            bases: T::BASES,
        }
    }

    // ---- qualifiers ----

    /// Same type, const-qualified.
    #[must_use]
    pub fn as_const(mut self) -> Self {
        self.is_const = true;
        self
    }

    /// Same type without the const qualifier.
    #[must_use]
    pub fn unqualified(mut self) -> Self {
        self.is_const = false;
        self
    }

    /// Compare identities, ignoring the const qualifier.
    pub fn same_type(&self, other: &Type) -> bool {
        self.id == other.id
    }

    /// Strip pointer and const qualification.
    ///
    /// `ObjectPtr<T>` gives `T`, `T const` gives `T`; anything else gives
    /// itself unqualified.
    pub fn base_type(&self) -> Type {
        match (self.pointee)() {
            Some(inner) => inner.base_type(),
            None => self.unqualified(),
        }
    }

    // ---- identity ----

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Unqualified type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Name including the const suffix when qualified.
    pub fn qualified_name(&self) -> String {
        if self.is_const {
            format!("{}{}", self.name, CONST_SUFFIX)
        } else {
            self.name.to_string()
        }
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn alignment(&self) -> usize {
        self.align
    }

    /// Pointed-to type of a pointer type.
    pub fn pointee(&self) -> Option<Type> {
        (self.pointee)()
    }

    /// Element type of a sequence or array.
    pub fn element_type(&self) -> Option<Type> {
        (self.element)()
    }

    /// Declared base table.
    pub fn bases(&self) -> &'static [BaseLink] {
        self.bases
    }

    /// Default-construct a value of this type.
    ///
    /// Returns `None` when the type has no default constructor.
    pub fn create_object(&self) -> Option<Any> {
        let value = (self.construct)()?;
        Some(if self.is_const {
            value.into_const()
        } else {
            value
        })
    }

    // ---- trait queries ----

    fn primitive(&self) -> Option<PrimitiveKind> {
        self.kind.primitive()
    }

    pub fn is_void(&self) -> bool {
        self.primitive() == Some(PrimitiveKind::Unit)
    }

    pub fn is_bool(&self) -> bool {
        self.primitive() == Some(PrimitiveKind::Bool)
    }

    pub fn is_char(&self) -> bool {
        self.primitive() == Some(PrimitiveKind::Char)
    }

    pub fn is_integral(&self) -> bool {
        self.primitive().is_some_and(PrimitiveKind::is_integral)
    }

    pub fn is_floating_point(&self) -> bool {
        self.primitive().is_some_and(PrimitiveKind::is_floating_point)
    }

    pub fn is_arithmetic(&self) -> bool {
        self.primitive().is_some_and(PrimitiveKind::is_arithmetic)
    }

    pub fn is_signed(&self) -> bool {
        self.primitive().is_some_and(PrimitiveKind::is_signed)
    }

    pub fn is_unsigned(&self) -> bool {
        self.primitive().is_some_and(PrimitiveKind::is_unsigned)
    }

    pub fn is_fundamental(&self) -> bool {
        self.kind.is_fundamental()
    }

    pub fn is_compound(&self) -> bool {
        self.kind.is_compound()
    }

    /// Arithmetic, char, bool, enum or pointer.
    pub fn is_scalar(&self) -> bool {
        self.is_arithmetic()
            || self.is_bool()
            || self.is_char()
            || matches!(self.kind, TypeKind::Enum | TypeKind::Pointer)
    }

    pub fn is_string(&self) -> bool {
        self.kind == TypeKind::String
    }

    pub fn is_class(&self) -> bool {
        self.kind == TypeKind::Class
    }

    pub fn is_enum(&self) -> bool {
        self.kind == TypeKind::Enum
    }

    pub fn is_union(&self) -> bool {
        self.kind == TypeKind::Union
    }

    pub fn is_pointer(&self) -> bool {
        self.kind == TypeKind::Pointer
    }

    pub fn is_function(&self) -> bool {
        self.kind == TypeKind::Function
    }

    pub fn is_sequence(&self) -> bool {
        self.kind == TypeKind::Sequence
    }

    pub fn is_array(&self) -> bool {
        matches!(self.kind, TypeKind::Array(_))
    }

    pub fn is_iterable(&self) -> bool {
        self.kind.is_iterable()
    }

    pub fn is_const(&self) -> bool {
        self.is_const
    }

    /// Always `false`: there is no volatile qualifier.
    pub fn is_volatile(&self) -> bool {
        false
    }

    /// Always `false`: references are carried as [`ObjectPtr`](crate::ObjectPtr).
    pub fn is_reference(&self) -> bool {
        false
    }

    /// Class with a declared base table (takes part in upcasts).
    pub fn is_polymorphic(&self) -> bool {
        self.is_class() && self.has_bases()
    }

    pub fn has_bases(&self) -> bool {
        !self.bases.is_empty()
    }

    /// Zero-sized.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// No drop glue.
    pub fn is_trivially_destructible(&self) -> bool {
        !self.needs_drop
    }

    pub fn is_default_constructible(&self) -> bool {
        self.default_constructible
    }

    /// Number of array dimensions (0 for non-arrays).
    pub fn rank(&self) -> usize {
        match self.kind {
            TypeKind::Array(_) => 1 + self.element_type().map_or(0, |e| e.rank()),
            _ => 0,
        }
    }

    /// Length of dimension `dim` (0 when out of range or not an array).
    pub fn extent(&self, dim: usize) -> usize {
        match (self.kind, dim) {
            (TypeKind::Array(len), 0) => len,
            (TypeKind::Array(_), _) => self.element_type().map_or(0, |e| e.extent(dim - 1)),
            _ => 0,
        }
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.is_const == other.is_const
    }
}

impl Eq for Type {}

impl Hash for Type {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.is_const.hash(state);
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)?;
        if self.is_const {
            f.write_str(CONST_SUFFIX)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Type")
            .field("name", &self.qualified_name())
            .field("kind", &self.kind)
            .finish()
    }
}
