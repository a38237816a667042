// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Static-to-dynamic call binding.
//!
//! One impl per arity (0 to [`MAX_ARITY`](crate::config::MAX_ARITY)) of
//! [`FreeFn`], [`MethodFn`] and [`ConstMethodFn`] is generated below. The
//! `Args` tuple parameter only disambiguates the impls; callers never name
//! it.

use crate::error::{Error, Result};
use crate::reflect::Reflect;
use crate::types::Type;
use crate::value::Any;

/// Pops dynamic arguments one at a time, in order.
pub struct ArgCursor<'a> {
    args: &'a [Any],
    index: usize,
}

impl<'a> ArgCursor<'a> {
    pub(crate) fn new(args: &'a [Any]) -> Self {
        Self { args, index: 0 }
    }

    /// Clone the next argument out as a `T`.
    pub fn next<T: Reflect>(&mut self) -> Result<T> {
        let index = self.index;
        let arg = self.args.get(index).ok_or_else(|| Error::ParameterCount {
            expected: index + 1,
            actual: self.args.len(),
        })?;
        self.index += 1;
        arg.get::<T>().map_err(|_| Error::ArgumentType {
            index,
            expected: Type::of::<T>().to_string(),
            actual: arg.type_name().unwrap_or("<empty>").to_string(),
        })
    }

    /// Number of arguments consumed so far.
    pub fn position(&self) -> usize {
        self.index
    }
}

/// Callable without an instance: free functions, static methods,
/// constructors.
pub trait FreeFn<Args, R>: Clone + Send + Sync + 'static {
    fn parameter_types() -> Vec<Type>;
    fn call_with(&self, args: &mut ArgCursor<'_>) -> Result<R>;
}

/// Callable taking `&mut C` as its receiver.
pub trait MethodFn<C, Args, R>: Clone + Send + Sync + 'static {
    fn parameter_types() -> Vec<Type>;
    fn call_with(&self, instance: &mut C, args: &mut ArgCursor<'_>) -> Result<R>;
}

/// Callable taking `&C` as its receiver.
pub trait ConstMethodFn<C, Args, R>: Clone + Send + Sync + 'static {
    fn parameter_types() -> Vec<Type>;
    fn call_with(&self, instance: &C, args: &mut ArgCursor<'_>) -> Result<R>;
}

macro_rules! impl_bindings {
    ($($ty:ident $arg:ident),*) => {
        impl<Func, Ret, $($ty,)*> FreeFn<($($ty,)*), Ret> for Func
        where
            Func: Fn($($ty),*) -> Ret + Clone + Send + Sync + 'static,
            Ret: Reflect,
            $($ty: Reflect,)*
        {
            fn parameter_types() -> Vec<Type> {
                vec![$(Type::of::<$ty>()),*]
            }

            #[allow(unused_variables)]
            fn call_with(&self, args: &mut ArgCursor<'_>) -> Result<Ret> {
                $(let $arg = args.next::<$ty>()?;)*
                Ok((self)($($arg),*))
            }
        }

        impl<Func, Class, Ret, $($ty,)*> MethodFn<Class, ($($ty,)*), Ret> for Func
        where
            Func: Fn(&mut Class, $($ty),*) -> Ret + Clone + Send + Sync + 'static,
            Class: Reflect,
            Ret: Reflect,
            $($ty: Reflect,)*
        {
            fn parameter_types() -> Vec<Type> {
                vec![$(Type::of::<$ty>()),*]
            }

            #[allow(unused_variables)]
            fn call_with(&self, instance: &mut Class, args: &mut ArgCursor<'_>) -> Result<Ret> {
                $(let $arg = args.next::<$ty>()?;)*
                Ok((self)(instance, $($arg),*))
            }
        }

        impl<Func, Class, Ret, $($ty,)*> ConstMethodFn<Class, ($($ty,)*), Ret> for Func
        where
            Func: Fn(&Class, $($ty),*) -> Ret + Clone + Send + Sync + 'static,
            Class: Reflect,
            Ret: Reflect,
            $($ty: Reflect,)*
        {
            fn parameter_types() -> Vec<Type> {
                vec![$(Type::of::<$ty>()),*]
            }

            #[allow(unused_variables)]
            fn call_with(&self, instance: &Class, args: &mut ArgCursor<'_>) -> Result<Ret> {
                $(let $arg = args.next::<$ty>()?;)*
                Ok((self)(instance, $($arg),*))
            }
        }
    };
}

impl_bindings!();
impl_bindings!(A0 a0);
impl_bindings!(A0 a0, A1 a1);
impl_bindings!(A0 a0, A1 a1, A2 a2);
impl_bindings!(A0 a0, A1 a1, A2 a2, A3 a3);
impl_bindings!(A0 a0, A1 a1, A2 a2, A3 a3, A4 a4);
impl_bindings!(A0 a0, A1 a1, A2 a2, A3 a3, A4 a4, A5 a5);
impl_bindings!(A0 a0, A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6);
impl_bindings!(A0 a0, A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6, A7 a7);
