// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Dynamically invocable functions.
//!
//! A [`Function`] wraps a free function, static method, `&mut self` method
//! or `&self` method behind one erased signature. Dynamic calls are checked
//! against that signature before the real call:
//!
//! 1. argument count
//! 2. instance presence, type and const-ness (methods only)
//! 3. argument types, position by position
//!
//! ```
//! use rtmeta::{Any, Function};
//!
//! let add = Function::free(|a: i32, b: i32| a + b);
//! let sum = add.invoke(&[Any::new(3), Any::new(4)])?;
//! assert_eq!(sum.map(|v| v.get::<i32>()), Some(Ok(7)));
//! # Ok::<(), rtmeta::Error>(())
//! ```

mod bind;

pub use bind::{ArgCursor, ConstMethodFn, FreeFn, MethodFn};

use std::any::TypeId;
use std::fmt;
use std::marker::PhantomData;

use crate::error::{Error, Result};
use crate::reflect::Reflect;
use crate::types::Type;
use crate::value::Any;

/// Receiver category of a [`Function`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    Free,
    Static,
    /// Takes `&mut self`.
    Method,
    /// Takes `&self`.
    ConstMethod,
}

pub(crate) trait Callable: Send + Sync {
    fn call(&self, instance: &mut Any, args: &mut ArgCursor<'_>) -> Result<Option<Any>>;
    fn clone_boxed(&self) -> Box<dyn Callable>;
}

/// `()` returns are reported as "no value".
fn box_return<R: Reflect>(value: R) -> Option<Any> {
    if TypeId::of::<R>() == TypeId::of::<()>() {
        None
    } else {
        Some(Any::new(value))
    }
}

struct FreeCall<F, Args, R> {
    f: F,
    _sig: PhantomData<fn() -> (Args, R)>,
}

impl<F, Args, R> Callable for FreeCall<F, Args, R>
where
    F: FreeFn<Args, R>,
    Args: 'static,
    R: Reflect,
{
    fn call(&self, _instance: &mut Any, args: &mut ArgCursor<'_>) -> Result<Option<Any>> {
        FreeFn::call_with(&self.f, args).map(box_return)
    }

    fn clone_boxed(&self) -> Box<dyn Callable> {
        Box::new(FreeCall {
            f: self.f.clone(),
            _sig: PhantomData,
        })
    }
}

struct MethodCall<F, C, Args, R> {
    f: F,
    _sig: PhantomData<fn() -> (C, Args, R)>,
}

impl<F, C, Args, R> Callable for MethodCall<F, C, Args, R>
where
    F: MethodFn<C, Args, R>,
    C: Reflect,
    Args: 'static,
    R: Reflect,
{
    fn call(&self, instance: &mut Any, args: &mut ArgCursor<'_>) -> Result<Option<Any>> {
        let this = instance.get_mut::<C>()?;
        MethodFn::call_with(&self.f, this, args).map(box_return)
    }

    fn clone_boxed(&self) -> Box<dyn Callable> {
        Box::new(MethodCall {
            f: self.f.clone(),
            _sig: PhantomData,
        })
    }
}

struct ConstMethodCall<F, C, Args, R> {
    f: F,
    _sig: PhantomData<fn() -> (C, Args, R)>,
}

impl<F, C, Args, R> Callable for ConstMethodCall<F, C, Args, R>
where
    F: ConstMethodFn<C, Args, R>,
    C: Reflect,
    Args: 'static,
    R: Reflect,
{
    fn call(&self, instance: &mut Any, args: &mut ArgCursor<'_>) -> Result<Option<Any>> {
        let this = instance.get_ref::<C>()?;
        ConstMethodFn::call_with(&self.f, this, args).map(box_return)
    }

    fn clone_boxed(&self) -> Box<dyn Callable> {
        Box::new(ConstMethodCall {
            f: self.f.clone(),
            _sig: PhantomData,
        })
    }
}

/// Type-erased callable with a cached signature.
pub struct Function {
    kind: FunctionKind,
    owner: Option<Type>,
    return_type: Type,
    parameter_types: Vec<Type>,
    callable: Box<dyn Callable>,
}

impl Function {
    /// Wrap a free function or closure.
    pub fn free<Args, R, F>(f: F) -> Self
    where
        F: FreeFn<Args, R>,
        Args: 'static,
        R: Reflect,
    {
        Self {
            kind: FunctionKind::Free,
            owner: None,
            return_type: Type::of::<R>(),
            parameter_types: F::parameter_types(),
            callable: Box::new(FreeCall {
                f,
                _sig: PhantomData,
            }),
        }
    }

    /// Wrap an associated function without receiver.
    ///
    /// The declaring type is filled in when the function is added to a
    /// class builder.
    pub fn static_method<Args, R, F>(f: F) -> Self
    where
        F: FreeFn<Args, R>,
        Args: 'static,
        R: Reflect,
    {
        Self {
            kind: FunctionKind::Static,
            ..Self::free(f)
        }
    }

    /// Wrap a `&mut self` method (or a closure taking `&mut C` first).
    pub fn method<C, Args, R, F>(f: F) -> Self
    where
        F: MethodFn<C, Args, R>,
        C: Reflect,
        Args: 'static,
        R: Reflect,
    {
        Self {
            kind: FunctionKind::Method,
            owner: Some(Type::of::<C>()),
            return_type: Type::of::<R>(),
            parameter_types: F::parameter_types(),
            callable: Box::new(MethodCall {
                f,
                _sig: PhantomData,
            }),
        }
    }

    /// Wrap a `&self` method (or a closure taking `&C` first).
    pub fn const_method<C, Args, R, F>(f: F) -> Self
    where
        F: ConstMethodFn<C, Args, R>,
        C: Reflect,
        Args: 'static,
        R: Reflect,
    {
        Self {
            kind: FunctionKind::ConstMethod,
            owner: Some(Type::of::<C>()),
            return_type: Type::of::<R>(),
            parameter_types: F::parameter_types(),
            callable: Box::new(ConstMethodCall {
                f,
                _sig: PhantomData,
            }),
        }
    }

    pub(crate) fn set_owner(&mut self, owner: Type) {
        if self.kind == FunctionKind::Static {
            self.owner = Some(owner);
        }
    }

    // ---- signature ----

    pub fn kind(&self) -> FunctionKind {
        self.kind
    }

    pub fn requires_instance(&self) -> bool {
        matches!(self.kind, FunctionKind::Method | FunctionKind::ConstMethod)
    }

    pub fn requires_mutable_instance(&self) -> bool {
        self.kind == FunctionKind::Method
    }

    /// Receiver type for methods, `None` otherwise.
    pub fn instance_type(&self) -> Option<Type> {
        if self.requires_instance() {
            self.owner
        } else {
            None
        }
    }

    /// Receiver type for methods, declaring type for registered statics.
    pub fn declaring_type(&self) -> Option<Type> {
        self.owner
    }

    pub fn return_type(&self) -> Type {
        self.return_type
    }

    pub fn parameter_types(&self) -> &[Type] {
        &self.parameter_types
    }

    pub fn arity(&self) -> usize {
        self.parameter_types.len()
    }

    /// Human-readable signature, e.g. `fn(&mut Point, i32) -> ()`.
    pub fn signature(&self) -> String {
        let mut params: Vec<String> = Vec::with_capacity(self.arity() + 1);
        match (self.kind, self.owner) {
            (FunctionKind::Method, Some(owner)) => params.push(format!("&mut {}", owner)),
            (FunctionKind::ConstMethod, Some(owner)) => params.push(format!("&{}", owner)),
            _ => {}
        }
        params.extend(self.parameter_types.iter().map(Type::to_string));
        format!("fn({}) -> {}", params.join(", "), self.return_type)
    }

    // ---- invocation ----

    /// Call with an instance and positional arguments.
    ///
    /// The instance is ignored by free and static functions. Returns
    /// `Ok(None)` when the function returns `()`.
    pub fn invoke_dynamic(&self, instance: &mut Any, args: &[Any]) -> Result<Option<Any>> {
        if args.len() != self.parameter_types.len() {
            return Err(Error::ParameterCount {
                expected: self.parameter_types.len(),
                actual: args.len(),
            });
        }

        if let Some(expected) = self.instance_type() {
            let actual = instance.value_type().ok_or_else(|| {
                Error::InvalidState(format!("{} called without an instance", self.signature()))
            })?;
            if !actual.same_type(&expected) {
                return Err(Error::mismatch(expected, actual));
            }
            if self.requires_mutable_instance() && instance.is_const() {
                return Err(Error::ConstViolation(format!(
                    "{} called on const {}",
                    self.signature(),
                    actual
                )));
            }
        }

        for (index, (arg, expected)) in args.iter().zip(&self.parameter_types).enumerate() {
            match arg.value_type() {
                Some(actual) if actual.same_type(expected) => {}
                actual => {
                    return Err(Error::ArgumentType {
                        index,
                        expected: expected.to_string(),
                        actual: actual.map_or_else(|| "<empty>".to_string(), |t| t.to_string()),
                    })
                }
            }
        }

        self.callable.call(instance, &mut ArgCursor::new(args))
    }

    /// Call without an instance.
    pub fn invoke(&self, args: &[Any]) -> Result<Option<Any>> {
        self.invoke_dynamic(&mut Any::empty(), args)
    }
}

impl Clone for Function {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            owner: self.owner,
            return_type: self.return_type,
            parameter_types: self.parameter_types.clone(),
            callable: self.callable.clone_boxed(),
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.signature())
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("kind", &self.kind)
            .field("signature", &self.signature())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;

    #[derive(Clone, Debug, PartialEq)]
    struct Counter {
        n: i64,
    }

    impl Reflect for Counter {}

    impl Counter {
        fn bump(&mut self, by: i64) -> i64 {
            self.n += by;
            self.n
        }

        fn get(&self) -> i64 {
            self.n
        }

        fn reset(&mut self) {
            self.n = 0;
        }
    }

    #[test]
    fn test_free_function() {
        let f = Function::free(|a: i32, b: i32| a * b);
        assert_eq!(f.kind(), FunctionKind::Free);
        assert_eq!(f.arity(), 2);
        assert_eq!(f.return_type(), Type::of::<i32>());
        assert!(!f.requires_instance());
        let out = f.invoke(&[Any::new(6), Any::new(7)]).ok().flatten();
        assert_eq!(out.and_then(|v| v.get::<i32>().ok()), Some(42));
    }

    #[test]
    fn test_unit_return_is_none() {
        let f = Function::method(Counter::reset);
        let mut c = Any::new(Counter { n: 5 });
        assert_eq!(f.invoke_dynamic(&mut c, &[]).map(|v| v.is_none()), Ok(true));
        assert_eq!(c.get::<Counter>(), Ok(Counter { n: 0 }));
    }

    #[test]
    fn test_methods_mutate_instance() {
        let bump = Function::method(Counter::bump);
        assert!(bump.requires_mutable_instance());
        assert_eq!(bump.instance_type(), Some(Type::of::<Counter>()));

        let mut c = Any::new(Counter { n: 1 });
        let out = bump.invoke_dynamic(&mut c, &[Any::new(2i64)]);
        assert_eq!(out.ok().flatten().map(|v| v.get::<i64>()), Some(Ok(3)));
        assert_eq!(c.get::<Counter>(), Ok(Counter { n: 3 }));
    }

    #[test]
    fn test_check_order() {
        let bump = Function::method(Counter::bump);
        let mut c = Any::new(Counter { n: 0 });

        let err = bump.invoke_dynamic(&mut c, &[]).unwrap_err();
        assert!(matches!(err, Error::ParameterCount { expected: 1, actual: 0 }));

        let err = bump.invoke_dynamic(&mut Any::empty(), &[Any::new(1i64)]).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::State);

        let err = bump.invoke_dynamic(&mut Any::new(1u8), &[Any::new(1i64)]).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));

        let mut frozen = Any::new_const(Counter { n: 0 });
        let err = bump.invoke_dynamic(&mut frozen, &[Any::new(1i64)]).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Const);

        let err = bump.invoke_dynamic(&mut c, &[Any::new(1i32)]).unwrap_err();
        assert!(matches!(err, Error::ArgumentType { index: 0, .. }));
    }

    #[test]
    fn test_const_method_on_const_instance() {
        let get = Function::const_method(Counter::get);
        assert_eq!(get.kind(), FunctionKind::ConstMethod);
        assert!(!get.requires_mutable_instance());
        let mut frozen = Any::new_const(Counter { n: 9 });
        let out = get.invoke_dynamic(&mut frozen, &[]).ok().flatten();
        assert_eq!(out.map(|v| v.get::<i64>()), Some(Ok(9)));
    }

    #[test]
    fn test_const_arguments_bind_by_value() {
        let f = Function::free(|s: String| s.len());
        let out = f.invoke(&[Any::new_const(String::from("abc"))]);
        assert_eq!(out.ok().flatten().map(|v| v.get::<usize>()), Some(Ok(3)));
    }

    #[test]
    fn test_clone_and_signature() {
        let f = Function::method(Counter::bump);
        let g = f.clone();
        assert_eq!(g.signature(), f.signature());
        assert!(g.signature().starts_with("fn(&mut "));
        assert!(g.signature().ends_with(", i64) -> i64"));

        let s = Function::static_method(|| Counter { n: 0 });
        assert_eq!(s.kind(), FunctionKind::Static);
        assert_eq!(s.instance_type(), None);
        assert_eq!(s.arity(), 0);
    }

    #[test]
    fn test_max_arity() {
        let f = Function::free(
            |a: u8, b: u8, c: u8, d: u8, e: u8, g: u8, h: u8, i: u8| {
                u32::from(a) + u32::from(b) + u32::from(c) + u32::from(d)
                    + u32::from(e) + u32::from(g) + u32::from(h) + u32::from(i)
            },
        );
        assert_eq!(f.arity(), crate::config::MAX_ARITY);
        let args: Vec<Any> = (1..=8u8).map(Any::new).collect();
        let out = f.invoke(&args).ok().flatten();
        assert_eq!(out.map(|v| v.get::<u32>()), Some(Ok(36)));
    }
}
