// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Parameter descriptors and default-argument binding.

use std::borrow::Cow;

use crate::error::{Error, Result};
use crate::types::Type;
use crate::value::Any;

/// One parameter of a constructor or method.
#[derive(Debug, Clone)]
pub struct ParameterInfo {
    index: usize,
    name: String,
    ty: Type,
    default: Option<Any>,
}

impl ParameterInfo {
    /// Zero-based position.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Declared name, empty when unnamed.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }

    pub fn type_info(&self) -> Type {
        self.ty
    }

    pub fn has_default_value(&self) -> bool {
        self.default.is_some()
    }

    pub fn default_value(&self) -> Option<&Any> {
        self.default.as_ref()
    }
}

/// Optional metadata attached to a constructor, method or free function.
///
/// Defaults apply to the *trailing* parameters: with three parameters and
/// two defaults, the defaults belong to parameters 1 and 2, in order.
///
/// ```
/// use rtmeta::MemberSpec;
///
/// let spec = MemberSpec::new()
///     .names(["a", "b"])
///     .default_value(10)
///     .default_value(20);
/// # let _ = spec;
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemberSpec {
    names: Vec<String>,
    defaults: Vec<Any>,
    attributes: Vec<Any>,
}

impl MemberSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameter names, leading parameters first.
    #[must_use]
    pub fn names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names.extend(names.into_iter().map(Into::into));
        self
    }

    /// Append one trailing default value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<Any>) -> Self {
        self.defaults.push(value.into());
        self
    }

    /// Append one attribute.
    #[must_use]
    pub fn attribute(mut self, value: impl Into<Any>) -> Self {
        self.attributes.push(value.into());
        self
    }

    pub(crate) fn into_parts(self) -> (Vec<String>, Vec<Any>, Vec<Any>) {
        (self.names, self.defaults, self.attributes)
    }
}

/// Build parameter descriptors, rejecting inconsistent names or defaults.
pub(crate) fn build_parameters(
    owner: &str,
    types: &[Type],
    names: Vec<String>,
    defaults: Vec<Any>,
    validate_types: bool,
) -> Result<Vec<ParameterInfo>> {
    if names.len() > types.len() {
        return Err(Error::InvalidRegistration(format!(
            "{}: {} names for {} parameters",
            owner,
            names.len(),
            types.len()
        )));
    }
    if defaults.len() > types.len() {
        return Err(Error::InvalidRegistration(format!(
            "{}: {} default values for {} parameters",
            owner,
            defaults.len(),
            types.len()
        )));
    }

    let first_default = types.len() - defaults.len();
    let mut names = names.into_iter();
    let mut defaults = defaults.into_iter();
    let mut params = Vec::with_capacity(types.len());

    for (index, ty) in types.iter().enumerate() {
        let default = if index >= first_default {
            defaults.next()
        } else {
            None
        };
        if let Some(value) = &default {
            let matches = value.value_type().is_some_and(|t| t.same_type(ty));
            if validate_types && !matches {
                return Err(Error::InvalidRegistration(format!(
                    "{}: default for parameter {} is {}, expected {}",
                    owner,
                    index,
                    value.type_name().unwrap_or("<empty>"),
                    ty
                )));
            }
        }
        params.push(ParameterInfo {
            index,
            name: names.next().unwrap_or_default(),
            ty: *ty,
            default,
        });
    }

    Ok(params)
}

/// Fill missing trailing arguments from parameter defaults.
///
/// Extra arguments are passed through untouched; the call itself reports
/// the count mismatch.
pub(crate) fn bind_arguments<'a>(
    params: &[ParameterInfo],
    args: &'a [Any],
) -> Result<Cow<'a, [Any]>> {
    if args.len() >= params.len() {
        return Ok(Cow::Borrowed(args));
    }

    let mut full = args.to_vec();
    for param in &params[args.len()..] {
        match &param.default {
            Some(value) => full.push(value.clone()),
            None => {
                return Err(Error::MissingArgument {
                    index: param.index,
                    name: param.name.clone(),
                })
            }
        }
    }
    Ok(Cow::Owned(full))
}
