// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Reflection metadata: class, constructor, method, field, base and
//! parameter descriptors.
//!
//! Descriptors are created by a [`ClassBuilder`](crate::ClassBuilder) and
//! frozen when the class is registered. Members point back to their class
//! with a `Weak`, so dropping the registry frees the whole graph.

mod base;
mod class;
mod constructor;
mod field;
mod method;
mod parameter;

pub use base::BaseInfo;
pub use class::ClassInfo;
pub use constructor::ConstructorInfo;
pub use field::FieldInfo;
pub use method::MethodInfo;
pub use parameter::{MemberSpec, ParameterInfo};

pub(crate) use class::ClassMembers;
pub(crate) use field::{InstanceField, StaticField};
pub(crate) use parameter::build_parameters;

use crate::reflect::Reflect;
use crate::value::Any;

/// First attribute of type `A`.
fn find_attribute<A: Reflect>(attributes: &[Any]) -> Option<&A> {
    attributes.iter().find_map(|a| a.get_ref::<A>().ok())
}
