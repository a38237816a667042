// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Declared base embeddings.
//!
//! A "derived" type embeds each of its bases as a field. The embedding is
//! described by a [`BaseLink`]: the base's descriptor and the byte offset of
//! the field inside the derived type. Upcasts only ever follow these links.

use std::fmt;

use super::Type;
use crate::reflect::Reflect;

/// One entry of a type's base table.
#[derive(Clone, Copy)]
pub struct BaseLink {
    base: fn() -> Type,
    offset: usize,
}

impl BaseLink {
    /// Declare that a `B` lives `offset` bytes into the derived type.
    ///
    /// # Safety
    ///
    /// For every value of the derived type, the bytes at `offset` must hold a
    /// valid, properly aligned `B` for as long as the derived value lives.
    /// Prefer the [`base_link!`](crate::base_link) macro, which derives the
    /// offset from a field of type `B`.
    pub const unsafe fn new_unchecked<B: Reflect>(offset: usize) -> Self {
        Self {
            base: Type::of::<B> as fn() -> Type,
            offset,
        }
    }

    /// Descriptor of the embedded base.
    pub fn base_type(&self) -> Type {
        (self.base)()
    }

    /// Byte offset of the base inside the derived type.
    pub const fn offset(&self) -> usize {
        self.offset
    }
}

impl fmt::Debug for BaseLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseLink")
            .field("base", &self.base_type().name())
            .field("offset", &self.offset)
            .finish()
    }
}

/// Build a [`BaseLink`] from a field of the derived type.
///
/// ```
/// use rtmeta::{base_link, BaseLink, Reflect};
///
/// #[derive(Clone)]
/// struct Shape { id: u32 }
/// impl Reflect for Shape {}
///
/// #[derive(Clone)]
/// struct Circle { shape: Shape, radius: f64 }
/// impl Reflect for Circle {
///     const BASES: &'static [BaseLink] = &[base_link!(Circle, shape: Shape)];
/// }
/// ```
///
/// The field must have exactly the base type; anything else fails to
/// compile, including fields that only deref to it:
///
/// ```compile_fail
/// use rtmeta::{base_link, BaseLink, Reflect};
///
/// #[derive(Clone)]
/// struct Shape { id: u32 }
/// impl Reflect for Shape {}
///
/// #[derive(Clone)]
/// struct Boxed { pad: u64, inner: Box<Shape> }
/// impl Reflect for Boxed {
///     const BASES: &'static [BaseLink] = &[base_link!(Boxed, inner: Shape)];
/// }
/// ```
#[macro_export]
macro_rules! base_link {
    ($derived:ty, $field:ident : $base:ty) => {{
        // Raw pointers never coerce, so this only type-checks when the
        // field is exactly `$base`.
        #[allow(dead_code)]
        fn _field_has_base_type(derived: &$derived) -> *const $base {
            ::core::ptr::addr_of!(derived.$field)
        }
        // SAFETY: the field is checked to be a `$base` above, and
        // `offset_of!` gives its position inside `$derived`.
        unsafe {
            $crate::BaseLink::new_unchecked::<$base>(::core::mem::offset_of!($derived, $field))
        }
    }};
}
