// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The [`Reflect`] capability trait and its impls for std types.
//!
//! Every type that can be stored in an [`Any`], passed to a [`Function`],
//! or described by a [`Type`] implements `Reflect`. All items have
//! defaults, so a plain class only needs `impl Reflect for MyType {}`.
//! Optional capabilities (default construction, string conversion,
//! iteration, base embeddings) are opted into by overriding the matching
//! item.
//!
//! [`Function`]: crate::Function

use std::collections::VecDeque;

use crate::types::{BaseLink, PrimitiveKind, Type, TypeKind};
use crate::value::Any;

/// Runtime-reflectable type.
pub trait Reflect: Clone + Send + Sync + 'static {
    /// Category reported by [`Type::kind`].
    const KIND: TypeKind = TypeKind::Class;

    /// Embedded bases, in declaration order. See [`base_link!`](crate::base_link).
    const BASES: &'static [BaseLink] = &[];

    /// Default constructor, used by [`Type::create_object`].
    const DEFAULT: Option<fn() -> Self> = None;

    /// Name reported by [`Type::name`].
    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// String conversion used by [`Any::to_string`].
    fn to_text(&self) -> Option<String> {
        None
    }

    /// Element iterator used by [`Any::iterate`].
    fn elements(&self) -> Option<Box<dyn Iterator<Item = Any> + '_>> {
        None
    }

    /// Pointed-to type, for pointer types.
    fn pointee() -> Option<Type> {
        None
    }

    /// Element type, for sequences and arrays.
    fn element_type() -> Option<Type> {
        None
    }
}

macro_rules! impl_reflect_primitive {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Reflect for $ty {
                const KIND: TypeKind = TypeKind::Primitive(PrimitiveKind::$kind);
                const DEFAULT: Option<fn() -> Self> = Some(<$ty as Default>::default);

                fn to_text(&self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )*
    };
}

impl_reflect_primitive! {
    bool => Bool,
    char => Char,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    usize => Usize,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    isize => Isize,
    f32 => F32,
    f64 => F64,
}

impl Reflect for () {
    const KIND: TypeKind = TypeKind::Primitive(PrimitiveKind::Unit);
    const DEFAULT: Option<fn() -> Self> = Some(<() as Default>::default);
}

impl Reflect for String {
    const KIND: TypeKind = TypeKind::String;
    const DEFAULT: Option<fn() -> Self> = Some(String::new);

    fn to_text(&self) -> Option<String> {
        Some(self.clone())
    }
}

impl Reflect for &'static str {
    const KIND: TypeKind = TypeKind::String;
    const DEFAULT: Option<fn() -> Self> = Some(<&'static str as Default>::default);

    fn to_text(&self) -> Option<String> {
        Some((*self).to_string())
    }
}

impl<T: Reflect> Reflect for Option<T> {
    const KIND: TypeKind = TypeKind::Enum;
    const DEFAULT: Option<fn() -> Self> = Some(<Option<T> as Default>::default);
}

impl<T: Reflect> Reflect for Vec<T> {
    const KIND: TypeKind = TypeKind::Sequence;
    const DEFAULT: Option<fn() -> Self> = Some(Vec::new);

    fn elements(&self) -> Option<Box<dyn Iterator<Item = Any> + '_>> {
        Some(Box::new(self.iter().cloned().map(Any::new)))
    }

    fn element_type() -> Option<Type> {
        Some(Type::of::<T>())
    }
}

impl<T: Reflect> Reflect for VecDeque<T> {
    const KIND: TypeKind = TypeKind::Sequence;
    const DEFAULT: Option<fn() -> Self> = Some(VecDeque::new);

    fn elements(&self) -> Option<Box<dyn Iterator<Item = Any> + '_>> {
        Some(Box::new(self.iter().cloned().map(Any::new)))
    }

    fn element_type() -> Option<Type> {
        Some(Type::of::<T>())
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    const KIND: TypeKind = TypeKind::Array(N);

    fn elements(&self) -> Option<Box<dyn Iterator<Item = Any> + '_>> {
        Some(Box::new(self.iter().cloned().map(Any::new)))
    }

    fn element_type() -> Option<Type> {
        Some(Type::of::<T>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_text() {
        assert_eq!(42i32.to_text().as_deref(), Some("42"));
        assert_eq!(true.to_text().as_deref(), Some("true"));
        assert_eq!(1.5f64.to_text().as_deref(), Some("1.5"));
        assert_eq!(String::from("x").to_text().as_deref(), Some("x"));
        assert_eq!(().to_text(), None);
    }

    #[test]
    fn test_sequences_yield_elements() {
        let v = vec![1u8, 2, 3];
        let items: Vec<u8> = v
            .elements()
            .into_iter()
            .flatten()
            .filter_map(|a| a.get::<u8>().ok())
            .collect();
        assert_eq!(items, vec![1, 2, 3]);
        assert!(42i32.elements().is_none());
        assert!(<[u16; 2] as Reflect>::DEFAULT.is_none());
    }
}
