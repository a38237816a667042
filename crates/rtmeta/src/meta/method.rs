// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use std::fmt;
use std::sync::{Arc, Weak};

use super::parameter::{bind_arguments, ParameterInfo};
use super::{find_attribute, ClassInfo};
use crate::error::Result;
use crate::function::Function;
use crate::reflect::Reflect;
use crate::value::Any;

/// Registered method, or free function when it has no declaring class.
pub struct MethodInfo {
    class: Weak<ClassInfo>,
    name: String,
    function: Function,
    parameters: Vec<ParameterInfo>,
    attributes: Vec<Any>,
}

impl MethodInfo {
    pub(crate) fn new(
        name: String,
        function: Function,
        parameters: Vec<ParameterInfo>,
        attributes: Vec<Any>,
    ) -> Self {
        Self {
            class: Weak::new(),
            name,
            function,
            parameters,
            attributes,
        }
    }

    pub(crate) fn attach(&mut self, class: &Weak<ClassInfo>) {
        self.class = class.clone();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declaring class; `None` for free functions.
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

    /// No instance needed (free function or static method).
    pub fn is_static(&self) -> bool {
        !self.function.requires_instance()
    }

    /// Call without an instance.
    pub fn invoke(&self, args: &[Any]) -> Result<Option<Any>> {
        self.invoke_on(&mut Any::empty(), args)
    }

    /// Call on `instance`, filling missing trailing arguments from defaults.
    pub fn invoke_on(&self, instance: &mut Any, args: &[Any]) -> Result<Option<Any>> {
        let args = bind_arguments(&self.parameters, args)?;
        self.function.invoke_dynamic(instance, &args)
    }
}

impl fmt::Debug for MethodInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodInfo")
            .field("name", &self.name)
            .field("signature", &self.function.signature())
            .finish()
    }
}
