// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Class and free-function registry.
//!
//! # Architecture
//!
//! ```text
//! Registry
//! +-- classes:   DashMap<String, Arc<ClassInfo>>        (one per name)
//! +-- functions: DashMap<String, Vec<Arc<MethodInfo>>>  (overloads)
//! +-- config:    ArcSwap<RegistryConfig>
//! +-- sealed:    AtomicBool
//!
//! GLOBAL: OnceLock<Registry>  (populated + sealed by init_global)
//! ```
//!
//! # Lifecycle
//!
//! Registration happens during start-up. Sealing freezes the registry:
//! further registrations fail with [`Error::InvalidState`], and lookups can
//! run from any thread. The process-wide registry is filled inside
//! `OnceLock::get_or_init`, so every reader observes the finished maps.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::builder::{ClassBuilder, Registration};
use crate::config::{DuplicatePolicy, RegistryConfig};
use crate::error::{Error, Result};
use crate::function::Function;
use crate::meta::{build_parameters, ClassInfo, MemberSpec, MethodInfo};
use crate::reflect::Reflect;
use crate::types::Type;

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// Name-keyed store of class descriptors and free functions.
pub struct Registry {
    classes: DashMap<String, Arc<ClassInfo>>,
    functions: DashMap<String, Vec<Arc<MethodInfo>>>,
    config: ArcSwap<RegistryConfig>,
    sealed: AtomicBool,
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_config(RegistryConfig::default())
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            classes: DashMap::new(),
            functions: DashMap::new(),
            config: ArcSwap::from_pointee(config),
            sealed: AtomicBool::new(false),
        }
    }

    // ---- process-wide instance ----

    /// Populate and seal the process-wide registry.
    ///
    /// `init` runs at most once per process. Later calls log a warning and
    /// return the existing registry untouched.
    pub fn init_global(init: impl FnOnce(&Registry)) -> &'static Registry {
        let mut ran = false;
        let registry = GLOBAL.get_or_init(|| {
            ran = true;
            let registry = Registry::new();
            init(&registry);
            registry.seal();
            log::info!(
                "[Registry] global registry ready: {} classes, {} functions",
                registry.len(),
                registry.functions.len()
            );
            registry
        });
        if !ran {
            log::warn!("[Registry] init_global called again; keeping existing registry");
        }
        registry
    }

    /// Process-wide registry.
    ///
    /// Before [`init_global`](Self::init_global) this is an empty, sealed
    /// registry, and `init_global` will no longer run.
    pub fn global() -> &'static Registry {
        GLOBAL.get_or_init(|| {
            log::warn!("[Registry] global registry used before init_global; it stays empty and sealed");
            let registry = Registry::new();
            registry.seal();
            registry
        })
    }

    // ---- configuration ----

    pub fn config(&self) -> Arc<RegistryConfig> {
        self.config.load_full()
    }

    pub fn set_config(&self, config: RegistryConfig) {
        self.config.store(Arc::new(config));
    }

    /// Refuse further registrations.
    pub fn seal(&self) {
        self.sealed.store(true, Ordering::Release);
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed.load(Ordering::Acquire)
    }

    fn check_open(&self, what: &str) -> Result<()> {
        if self.is_sealed() {
            log::warn!("[Registry] rejected {}: registry is sealed", what);
            return Err(Error::InvalidState(format!(
                "cannot register {}: registry is sealed",
                what
            )));
        }
        Ok(())
    }

    // ---- registration ----

    /// Start registering `T` under its type name.
    pub fn class<T: Reflect>(&self) -> Registration<'_, T> {
        Registration::new(self, ClassBuilder::new())
    }

    /// Start registering `T` under `name`.
    pub fn class_named<T: Reflect>(&self, name: impl Into<String>) -> Registration<'_, T> {
        Registration::new(self, ClassBuilder::named(name))
    }

    /// Build `builder` and store the result.
    pub fn register<T: Reflect>(&self, builder: ClassBuilder<T>) -> Result<Arc<ClassInfo>> {
        let name = builder.name().to_string();
        self.check_open(&format!("class {}", name))?;

        let config = self.config.load();
        let class = builder.build(&config).inspect_err(|e| {
            log::warn!("[Registry] rejected class {}: {}", name, e);
        })?;

        match self.classes.entry(name.clone()) {
            Entry::Occupied(mut slot) => match config.duplicate_policy {
                DuplicatePolicy::Reject => {
                    log::warn!("[Registry] rejected class {}: already registered", name);
                    return Err(Error::InvalidRegistration(format!(
                        "class {} is already registered",
                        name
                    )));
                }
                DuplicatePolicy::Replace => {
                    log::debug!("[Registry] replacing class {}", name);
                    slot.insert(Arc::clone(&class));
                }
            },
            Entry::Vacant(slot) => {
                slot.insert(Arc::clone(&class));
            }
        }

        if config.log_registrations {
            log::debug!(
                "[Registry] registered class {} ({} constructors, {} methods, {} fields, {} bases)",
                name,
                class.constructors().len(),
                class.methods().len(),
                class.fields().len(),
                class.bases().len()
            );
        }
        Ok(class)
    }

    /// Register a free function. Several functions may share a name.
    pub fn register_function(
        &self,
        name: impl Into<String>,
        function: Function,
        spec: MemberSpec,
    ) -> Result<Arc<MethodInfo>> {
        let name = name.into();
        self.check_open(&format!("function {}", name))?;

        let config = self.config.load();
        let (names, defaults, attributes) = spec.into_parts();
        let params = build_parameters(
            &name,
            function.parameter_types(),
            names,
            defaults,
            config.validate_default_types,
        )
        .inspect_err(|e| log::warn!("[Registry] rejected function {}: {}", name, e))?;

        let info = Arc::new(MethodInfo::new(name.clone(), function, params, attributes));
        self.functions
            .entry(name.clone())
            .or_default()
            .push(Arc::clone(&info));

        if config.log_registrations {
            log::debug!(
                "[Registry] registered function {}: {}",
                name,
                info.function()
            );
        }
        Ok(info)
    }

    // ---- lookup ----

    pub fn get_class(&self, name: &str) -> Option<Arc<ClassInfo>> {
        self.classes.get(name).map(|entry| Arc::clone(entry.value()))
    }

    /// Class registered for `T`, under its type name or any other name.
    pub fn get_class_of<T: Reflect>(&self) -> Option<Arc<ClassInfo>> {
        let ty = Type::of::<T>();
        self.get_class(ty.name()).or_else(|| {
            self.classes
                .iter()
                .find(|entry| entry.value().type_info().same_type(&ty))
                .map(|entry| Arc::clone(entry.value()))
        })
    }

    /// Every free function registered under `name`, in registration order.
    pub fn get_method(&self, name: &str) -> Vec<Arc<MethodInfo>> {
        self.functions
            .get(name)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    pub fn contains_class(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Registered class names, sorted.
    pub fn class_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.classes.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Registered free-function names, sorted.
    pub fn function_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.functions.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Number of registered classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("classes", &self.class_names())
            .field("functions", &self.function_names())
            .field("sealed", &self.is_sealed())
            .finish()
    }
}
