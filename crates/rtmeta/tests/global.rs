// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::missing_panics_doc)] // Tests/examples panic on failure
#![allow(clippy::cast_possible_truncation)] // Test data generation

//! Process-wide registry. Kept in its own test binary because the global
//! can only be initialised once per process.

use std::thread;

use rtmeta::{Any, ErrorCategory, Function, MemberSpec, Reflect, Registry};

#[derive(Clone, Default)]
struct Counter {
    value: u64,
}

impl Reflect for Counter {
    const DEFAULT: Option<fn() -> Self> = Some(Self::default);
}

impl Counter {
    fn bump(&mut self, by: u64) -> u64 {
        self.value += by;
        self.value
    }
}

#[test]
fn test_global_lifecycle() {
    let _ = env_logger::builder().is_test(true).try_init();

    let registry = Registry::init_global(|r| {
        r.class::<Counter>()
            .default_constructor()
            .method("bump", Function::method(Counter::bump));
        r.register_function(
            "double",
            Function::free(|v: u64| v * 2),
            MemberSpec::new().names(["value"]),
        )
        .expect("double");
    });
    assert!(registry.is_sealed());
    assert!(std::ptr::eq(registry, Registry::global()));

    let again = Registry::init_global(|r| {
        r.class_named::<Counter>("never");
    });
    assert!(std::ptr::eq(registry, again));
    assert!(!registry.contains_class("never"));

    let err = registry.class_named::<Counter>("late").register().unwrap_err();
    assert_eq!(err.category(), ErrorCategory::State);

    let handles: Vec<_> = (0..4u64)
        .map(|n| {
            thread::spawn(move || {
                let class = Registry::global()
                    .get_class_of::<Counter>()
                    .expect("Counter");
                let mut obj = class.construct(&[]).expect("default");
                let bump = class.method("bump").expect("bump");
                let out = bump.invoke_on(&mut obj, &[Any::new(n)]).expect("bump");
                out.and_then(|v| v.get::<u64>().ok())
            })
        })
        .collect();
    for (n, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().expect("thread"), Some(n as u64));
    }

    let double = &Registry::global().get_method("double")[0];
    let out = double.invoke(&[Any::new(21u64)]).expect("double");
    assert_eq!(out.map(|v| v.get::<u64>()), Some(Ok(42)));
}
