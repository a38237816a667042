// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! rtmeta configuration - single source of truth.
//!
//! - **Level 1 (Static)**: compile-time limits used by the call binder and
//!   the upcast walk.
//! - **Level 2 (Dynamic)**: [`RegistryConfig`], held by each
//!   [`Registry`](crate::Registry) behind an `ArcSwap` so it can be read
//!   without locking and replaced before the registry is sealed.

// =======================================================================
// Static limits
// =======================================================================

/// Highest arity bound by [`Function`](crate::Function) constructors.
///
/// Parameter lists longer than this have no binding impl and fail to compile.
pub const MAX_ARITY: usize = 8;

/// Maximum number of base levels walked by an upcast.
///
/// A deeper walk means the declared base tables form a cycle.
pub const MAX_HIERARCHY_DEPTH: usize = 64;

/// Suffix appended to the name of a const-qualified type descriptor.
pub const CONST_SUFFIX: &str = " const";

// =======================================================================
// Runtime configuration
// =======================================================================

/// What a registry does when a class name is registered twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Keep the first descriptor and fail the second registration.
    #[default]
    Reject,
    /// Replace the previous descriptor (readers holding the old `Arc` keep it).
    Replace,
}

/// Registry behaviour knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Handling of duplicate class names.
    pub duplicate_policy: DuplicatePolicy,
    /// Reject default values whose type differs from the parameter type.
    pub validate_default_types: bool,
    /// Emit a `debug` log line per registered class and function.
    pub log_registrations: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::Reject,
            validate_default_types: true,
            log_registrations: true,
        }
    }
}

impl RegistryConfig {
    /// Config that replaces duplicates instead of rejecting them.
    #[must_use]
    pub fn replacing() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::Replace,
            ..Self::default()
        }
    }

    /// Disable per-registration logging.
    #[must_use]
    pub fn quiet(mut self) -> Self {
        self.log_registrations = false;
        self
    }
}
