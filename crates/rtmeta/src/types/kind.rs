// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type categories.

/// Primitive type kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// `()`, the type of a call that returns nothing.
    Unit,
    Bool,
    Char,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    F32,
    F64,
}

impl PrimitiveKind {
    /// Integer types, signed or unsigned.
    pub const fn is_integral(self) -> bool {
        self.is_signed_integer() || self.is_unsigned()
    }

    /// `f32` and `f64`.
    pub const fn is_floating_point(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    /// Integers and floats.
    pub const fn is_arithmetic(self) -> bool {
        self.is_integral() || self.is_floating_point()
    }

    /// Signed integers and floats.
    pub const fn is_signed(self) -> bool {
        self.is_signed_integer() || self.is_floating_point()
    }

    /// Unsigned integers.
    pub const fn is_unsigned(self) -> bool {
        matches!(
            self,
            Self::U8 | Self::U16 | Self::U32 | Self::U64 | Self::U128 | Self::Usize
        )
    }

    const fn is_signed_integer(self) -> bool {
        matches!(
            self,
            Self::I8 | Self::I16 | Self::I32 | Self::I64 | Self::I128 | Self::Isize
        )
    }
}

/// Type kind enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Primitive type (including unit).
    Primitive(PrimitiveKind),
    /// Owned or static string.
    String,
    /// Struct with named members. The default for user types.
    Class,
    /// Enumeration (including `Option`).
    Enum,
    /// Untagged union.
    Union,
    /// Address-carrying handle ([`ObjectPtr`](crate::ObjectPtr)).
    Pointer,
    /// Dynamic-length sequence.
    Sequence,
    /// Fixed-length array.
    Array(usize),
    /// Callable value.
    Function,
}

impl TypeKind {
    /// Primitive kind, if this is a primitive.
    pub const fn primitive(self) -> Option<PrimitiveKind> {
        match self {
            Self::Primitive(p) => Some(p),
            _ => None,
        }
    }

    /// Built-in scalar or unit (no inner structure).
    pub const fn is_fundamental(self) -> bool {
        matches!(self, Self::Primitive(_))
    }

    /// Kinds built from other types.
    pub const fn is_compound(self) -> bool {
        !self.is_fundamental()
    }

    /// Kinds whose values can be iterated element by element.
    pub const fn is_iterable(self) -> bool {
        matches!(self, Self::Sequence | Self::Array(_))
    }
}
