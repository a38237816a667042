// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use std::fmt;
use std::sync::{Arc, Weak};

use super::parameter::{bind_arguments, ParameterInfo};
use super::{find_attribute, ClassInfo};
use crate::error::{Error, Result};
use crate::function::Function;
use crate::reflect::Reflect;
use crate::value::Any;

/// Registered constructor of a class.
pub struct ConstructorInfo {
    class: Weak<ClassInfo>,
    function: Function,
    parameters: Vec<ParameterInfo>,
    attributes: Vec<Any>,
}

impl ConstructorInfo {
    pub(crate) fn new(function: Function, parameters: Vec<ParameterInfo>, attributes: Vec<Any>) -> Self {
        Self {
            class: Weak::new(),
            function,
            parameters,
            attributes,
        }
    }

    pub(crate) fn attach(&mut self, class: &Weak<ClassInfo>) {
        self.class = class.clone();
    }

    pub fn declaring_class(&self) -> Option<Arc<ClassInfo>> {
        self.class.upgrade()
    }

    pub fn function(&self) -> &Function {
        &self.function
    }

    pub fn parameters(&self) -> &[ParameterInfo] {
        &self.parameters
    }

    pub fn attributes(&self) -> &[Any] {
        &self.attributes
    }

    pub fn attribute<A: Reflect>(&self) -> Option<&A> {
        find_attribute(&self.attributes)
    }

    /// `true` if `args` bind to the parameters, counting defaults.
    pub fn accepts(&self, args: &[Any]) -> bool {
        args.len() <= self.parameters.len()
            && args
                .iter()
                .zip(&self.parameters)
                .all(|(arg, param)| arg.value_type().is_some_and(|t| t.same_type(&param.type_info())))
            && self.parameters[args.len()..]
                .iter()
                .all(ParameterInfo::has_default_value)
    }

    /// Construct a new value, filling missing trailing arguments from
    /// defaults.
    pub fn invoke(&self, args: &[Any]) -> Result<Any> {
        let args = bind_arguments(&self.parameters, args)?;
        self.function.invoke(&args)?.ok_or_else(|| {
            Error::InvalidState(format!("constructor {} produced no value", self.function))
        })
    }
}

impl fmt::Debug for ConstructorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorInfo")
            .field("signature", &self.function.signature())
            .field("parameters", &self.parameters.len())
            .finish()
    }
}
