// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Example readability over pedantic
#![allow(clippy::missing_panics_doc)] // Tests/examples panic on failure

/// Reflection walkthrough for rtmeta
///
/// Demonstrates:
/// - Implementing Reflect and declaring an embedded base
/// - Registering constructors, methods (with defaults), fields and a base
/// - Constructing, calling and editing an object knowing only its class name
/// - Listing the members of a class
///
/// Run with `RUST_LOG=debug` to see registration logs.
use rtmeta::{base_link, Any, BaseLink, Function, MemberSpec, Reflect, Registry};

#[derive(Debug, Clone, Default)]
struct Named {
    label: String,
}

impl Reflect for Named {}

#[derive(Debug, Clone, Default)]
struct Point {
    named: Named,
    x: i32,
    y: i32,
}

impl Reflect for Point {
    const BASES: &'static [BaseLink] = &[base_link!(Point, named: Named)];
    const DEFAULT: Option<fn() -> Self> = Some(Self::default);
}

impl Point {
    fn new(x: i32, y: i32) -> Self {
        Self {
            named: Named {
                label: "p".into(),
            },
            x,
            y,
        }
    }

    fn sum(&self) -> i32 {
        self.x + self.y
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    println!("=== rtmeta Point Example ===\n");

    let registry = Registry::init_global(|r| {
        r.class_named::<Point>("Point")
            .default_constructor()
            .constructor_with(Function::free(Point::new), MemberSpec::new().names(["x", "y"]))
            .method("sum", Function::const_method(Point::sum))
            .method_with(
                "translate",
                Function::method(Point::translate),
                MemberSpec::new().names(["dx", "dy"]).default_value(0),
            )
            .field("x", |p| &p.x, |p| &mut p.x)
            .field("y", |p| &p.y, |p| &mut p.y)
            .base::<Named>();
    });
    println!("[OK] Registered classes: {:?}", registry.class_names());

    let class = registry.get_class("Point").ok_or("Point not registered")?;
    for method in class.methods() {
        println!("  method {} : {}", method.name(), method.function());
    }
    for field in class.fields() {
        println!("  field  {} : {}", field.name(), field.type_info());
    }

    let mut p = class.construct(&[Any::new(3), Any::new(4)])?;
    let sum = class.method("sum").ok_or("no sum")?;
    println!("[OK] sum() = {:?}", sum.invoke_on(&mut p, &[])?);

    class.field("x").ok_or("no x")?.set(&mut p, 10)?;
    println!("[OK] after x = 10, sum() = {:?}", sum.invoke_on(&mut p, &[])?);

    let translate = class.method("translate").ok_or("no translate")?;
    translate.invoke_on(&mut p, &[Any::new(1)])?;
    println!("[OK] after translate(1), point = {:?}", p.get_ref::<Point>()?);

    let named = p.upcast::<Named>()?.ok_or("Named not reachable")?;
    println!("[OK] base Named label = {:?}", named.label);

    println!("\n=== Example complete ===");
    Ok(())
}
