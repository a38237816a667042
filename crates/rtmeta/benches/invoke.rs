// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Dynamic Invocation Benchmark
//!
//! Measures the cost of going through the reflection layer compared to a
//! direct call:
//! - direct method call vs `Function::invoke_dynamic`
//! - `MethodInfo::invoke_on` with and without default-argument filling
//! - `Any` construction, recovery and upcast

#![allow(clippy::uninlined_format_args)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rtmeta::{base_link, Any, BaseLink, Function, MemberSpec, Reflect, Registry};

#[derive(Clone, Default)]
struct Base {
    id: u64,
}

impl Reflect for Base {}

#[derive(Clone, Default)]
struct Accumulator {
    base: Base,
    total: i64,
}

impl Reflect for Accumulator {
    const BASES: &'static [BaseLink] = &[base_link!(Accumulator, base: Base)];
    const DEFAULT: Option<fn() -> Self> = Some(Self::default);
}

impl Accumulator {
    fn add(&mut self, a: i64, b: i64) -> i64 {
        self.total += a + b;
        self.total
    }
}

fn bench_call_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("call_path");

    group.bench_function("direct", |b| {
        let mut acc = Accumulator::default();
        b.iter(|| black_box(acc.add(black_box(1), black_box(2))));
    });

    group.bench_function("invoke_dynamic", |b| {
        let function = Function::method(Accumulator::add);
        let mut instance = Any::new(Accumulator::default());
        let args = [Any::new(1i64), Any::new(2i64)];
        b.iter(|| black_box(function.invoke_dynamic(&mut instance, black_box(&args))));
    });

    let registry = Registry::new();
    registry
        .class::<Accumulator>()
        .default_constructor()
        .method_with(
            "add",
            Function::method(Accumulator::add),
            MemberSpec::new().names(["a", "b"]).default_value(2i64),
        )
        .register()
        .expect("register Accumulator");
    let class = registry.get_class_of::<Accumulator>().expect("Accumulator");
    let method = class.method("add").expect("add");

    for supplied in [1usize, 2] {
        group.bench_with_input(
            BenchmarkId::new("invoke_on", supplied),
            &supplied,
            |b, &supplied| {
                let mut instance = class.construct(&[]).expect("default");
                let args: Vec<Any> = (0..supplied).map(|_| Any::new(1i64)).collect();
                b.iter(|| black_box(method.invoke_on(&mut instance, black_box(&args))));
            },
        );
    }

    group.finish();
}

fn bench_any(c: &mut Criterion) {
    let mut group = c.benchmark_group("any");

    group.bench_function("new_drop", |b| {
        b.iter(|| black_box(Any::new(black_box(42u64))));
    });

    group.bench_function("get_ref", |b| {
        let value = Any::new(String::from("reflect"));
        b.iter(|| black_box(value.get_ref::<String>().map(String::len)));
    });

    group.bench_function("upcast", |b| {
        let value = Any::new(Accumulator::default());
        b.iter(|| black_box(value.upcast::<Base>().map(|base| base.map(|b| b.id))));
    });

    group.bench_function("clone_large", |b| {
        let value = Any::new(vec![0u8; 4096]);
        b.iter(|| black_box(value.clone()));
    });

    group.finish();
}

criterion_group!(invoke_benches, bench_call_paths);
criterion_group!(any_benches, bench_any);
criterion_main!(invoke_benches, any_benches);
