// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Test/bench code readability over pedantic
#![allow(clippy::missing_panics_doc)] // Tests/examples panic on failure
#![allow(clippy::items_after_statements)] // Test helpers
#![allow(clippy::redundant_closure_for_method_calls)] // Test code clarity

//! End-to-end reflection: register classes, then drive them purely through
//! their descriptors.

use parking_lot::RwLock;
use rtmeta::{
    base_link, Any, BaseLink, Error, ErrorCategory, Function, MemberSpec, ObjectPtr, Reflect,
    Registry, Type,
};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
struct Point {
    x: i32,
    y: i32,
}

impl Reflect for Point {}

impl Point {
    fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    fn sum(&self) -> i32 {
        self.x + self.y
    }
}

fn point_registry() -> Registry {
    let registry = Registry::new();
    registry
        .class_named::<Point>("Point")
        .constructor_with(Function::free(Point::new), MemberSpec::new().names(["x", "y"]))
        .method("sum", Function::const_method(Point::sum))
        .field("x", |p| &p.x, |p| &mut p.x)
        .field("y", |p| &p.y, |p| &mut p.y)
        .register()
        .expect("Point registers");
    registry
}

#[test]
fn test_point_scenario() {
    let registry = point_registry();
    let class = registry.get_class("Point").expect("Point");

    let ctor = &class.constructors()[0];
    assert_eq!(ctor.parameters()[1].name(), "y");
    let mut p = ctor.invoke(&[Any::new(3), Any::new(4)]).expect("construct");

    let sum = class.method("sum").expect("sum");
    let result = sum.invoke_on(&mut p, &[]).expect("sum").expect("value");
    assert_eq!(result.get::<i32>(), Ok(7));

    class.field("x").expect("x").set(&mut p, 10).expect("set x");
    let result = sum.invoke_on(&mut p, &[]).expect("sum").expect("value");
    assert_eq!(result.get::<i32>(), Ok(14));
    assert_eq!(p.get::<Point>(), Ok(Point { x: 10, y: 4 }));
}

#[test]
fn test_point_field_errors() {
    let registry = point_registry();
    let class = registry.get_class("Point").expect("Point");
    let x = class.field("x").expect("x");

    let mut p = Any::new(Point::new(1, 2));
    let err = x.set(&mut p, 1.5f64).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::TypeMismatch);
    let err = x.get(&Any::new(5i32)).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::TypeMismatch);
    let err = x.get_static().unwrap_err();
    assert_eq!(err.category(), ErrorCategory::State);
    assert_eq!(x.declaring_class().map(|c| c.name().to_string()), Some("Point".into()));
}

// ---------------------------------------------------------------------------
// Class with a base, defaults, statics and attributes
// ---------------------------------------------------------------------------

#[derive(Clone, Default, Debug)]
struct Shape {
    id: u32,
}

impl Reflect for Shape {}

#[derive(Clone, Default, Debug)]
struct Labelled {
    shape: Shape,
    value: i32,
    label: String,
}

impl Reflect for Labelled {
    const BASES: &'static [BaseLink] = &[base_link!(Labelled, shape: Shape)];
    const DEFAULT: Option<fn() -> Self> = Some(Self::default);
}

impl Labelled {
    fn add(&self, a: i32, b: i32) -> i32 {
        self.value + a + b
    }

    fn set_value(&mut self, value: i32) {
        self.value = value;
    }

    fn describe(prefix: String) -> String {
        format!("{}:labelled", prefix)
    }
}

static INSTANCES: RwLock<u64> = parking_lot::const_rwlock(0);

fn labelled_registry() -> Registry {
    let registry = Registry::new();
    registry
        .class_named::<Labelled>("Labelled")
        .default_constructor()
        .constructor_with(
            Function::free(|value: i32| Labelled {
                value,
                ..Labelled::default()
            }),
            MemberSpec::new().names(["value"]),
        )
        .method_with(
            "add",
            Function::const_method(Labelled::add),
            MemberSpec::new()
                .names(["a", "b"])
                .default_value(10)
                .default_value(20)
                .attribute("pure"),
        )
        .method("set_value", Function::method(Labelled::set_value))
        .method("describe", Function::static_method(Labelled::describe))
        .field("value", |l| &l.value, |l| &mut l.value)
        .field("label", |l| &l.label, |l| &mut l.label)
        .readonly_field("id", |l| &l.shape.id)
        .static_field("instances", &INSTANCES)
        .base::<Shape>()
        .attribute("demo");
    registry
}

#[test]
fn test_default_arguments() {
    let registry = labelled_registry();
    let class = registry.get_class("Labelled").expect("registered on drop");
    let add = class.method("add").expect("add");
    let mut obj = class.construct(&[Any::new(1)]).expect("construct");

    let call = |obj: &mut Any, args: &[Any]| {
        add.invoke_on(obj, args)
            .ok()
            .flatten()
            .and_then(|v| v.get::<i32>().ok())
    };

    let explicit = call(&mut obj, &[Any::new(10), Any::new(20)]);
    assert_eq!(explicit, Some(31));
    assert_eq!(call(&mut obj, &[]), explicit);
    assert_eq!(call(&mut obj, &[Any::new(10)]), explicit);
    assert_eq!(call(&mut obj, &[Any::new(5)]), Some(26));
    assert_eq!(call(&mut obj, &[Any::new(5), Any::new(6)]), Some(12));

    let params = add.parameters();
    assert_eq!(params[0].name(), "a");
    assert_eq!(params[1].default_value().map(|v| v.get::<i32>()), Some(Ok(20)));
    assert_eq!(add.attribute::<&str>(), Some(&"pure"));
}

#[test]
fn test_missing_argument_and_count() {
    let registry = labelled_registry();
    let class = registry.get_class("Labelled").expect("Labelled");
    let mut obj = class.construct(&[]).expect("default");

    let set_value = class.method("set_value").expect("set_value");
    let err = set_value.invoke_on(&mut obj, &[]).unwrap_err();
    assert_eq!(
        err,
        Error::MissingArgument {
            index: 0,
            name: String::new()
        }
    );

    let add = class.method("add").expect("add");
    let err = add
        .invoke_on(&mut obj, &[Any::new(1), Any::new(2), Any::new(3)])
        .unwrap_err();
    assert!(matches!(err, Error::ParameterCount { expected: 2, actual: 3 }));
}

#[test]
fn test_const_instances() {
    let registry = labelled_registry();
    let class = registry.get_class("Labelled").expect("Labelled");
    let mut frozen = Any::new_const(Labelled {
        value: 2,
        ..Labelled::default()
    });

    let add = class.method("add").expect("add");
    let out = add.invoke_on(&mut frozen, &[]).ok().flatten();
    assert_eq!(out.map(|v| v.get::<i32>()), Some(Ok(32)));

    let set_value = class.method("set_value").expect("set_value");
    let err = set_value.invoke_on(&mut frozen, &[Any::new(1)]).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Const);
}

#[test]
fn test_static_members() {
    let registry = labelled_registry();
    let class = registry.get_class("Labelled").expect("Labelled");

    let describe = class.method("describe").expect("describe");
    assert!(describe.is_static());
    assert_eq!(
        describe.function().declaring_type(),
        Some(Type::of::<Labelled>())
    );
    let out = describe.invoke(&[Any::new(String::from("x"))]).ok().flatten();
    assert_eq!(out.map(|v| v.get::<String>()), Some(Ok("x:labelled".to_string())));

    let instances = class.field("instances").expect("instances");
    assert!(instances.is_static());
    instances.set_static(3u64).expect("set");
    assert_eq!(instances.get_static().map(|v| v.get::<u64>()), Ok(Ok(3)));
    assert_eq!(*INSTANCES.read(), 3);
}

#[test]
fn test_readonly_and_attributes() {
    let registry = labelled_registry();
    let class = registry.get_class("Labelled").expect("Labelled");
    assert_eq!(class.attribute::<&str>(), Some(&"demo"));

    let id = class.field("id").expect("id");
    assert!(id.is_readonly());
    let mut obj = class.construct(&[]).expect("default");
    assert_eq!(id.get(&obj).map(|v| v.get::<u32>()), Ok(Ok(0)));
    let err = id.set(&mut obj, 5u32).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Capability);
}

#[test]
fn test_base_conversion() {
    let registry = labelled_registry();
    let class = registry.get_class("Labelled").expect("Labelled");
    let base = class.base(Type::of::<Shape>()).expect("Shape base");
    assert_eq!(base.derived_type(), Type::of::<Labelled>());

    let mut obj = Any::new(Labelled {
        shape: Shape { id: 77 },
        ..Labelled::default()
    });
    let expected = obj
        .get_ref::<Labelled>()
        .map(|l| &l.shape as *const Shape as usize)
        .expect("Labelled");

    let converted = base.convert(&mut obj).expect("convert");
    let ptr = converted.get::<ObjectPtr<Shape>>().expect("pointer");
    assert_eq!(ptr.addr(), expected);
    // SAFETY: `obj` is alive and not borrowed elsewhere.
    assert_eq!(unsafe { ptr.as_ref() }.id, 77);

    let err = base.convert(&mut Any::new(Shape::default())).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::TypeMismatch);

    let mut frozen = Any::new_const(Labelled {
        shape: Shape { id: 1 },
        ..Labelled::default()
    });
    let err = base.convert(&mut frozen).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Const);
    assert_eq!(frozen.get_ref::<Labelled>().map(|l| l.shape.id), Ok(1));
}

#[test]
fn test_construct_dispatch() {
    let registry = labelled_registry();
    let class = registry.get_class("Labelled").expect("Labelled");

    let obj = class.construct(&[Any::new(9)]).expect("value constructor");
    assert_eq!(obj.get_ref::<Labelled>().map(|l| l.value), Ok(9));
    let obj = class.construct(&[]).expect("default constructor");
    assert_eq!(obj.get_ref::<Labelled>().map(|l| l.value), Ok(0));

    let err = class.construct(&[Any::new("nope")]).unwrap_err();
    assert!(matches!(err, Error::ArgumentType { index: 0, .. }));
    let err = class.construct(&[Any::new(1), Any::new(2)]).unwrap_err();
    assert_eq!(
        err,
        Error::ParameterCount {
            expected: 1,
            actual: 2
        }
    );
}

#[test]
fn test_construct_reports_call_errors() {
    let registry = point_registry();
    let class = registry.get_class("Point").expect("Point");

    let err = class.construct(&[Any::new(3)]).unwrap_err();
    assert_eq!(
        err,
        Error::MissingArgument {
            index: 1,
            name: "y".into()
        }
    );
    let err = class.construct(&[Any::new(3), Any::new(4u8)]).unwrap_err();
    assert!(matches!(err, Error::ArgumentType { index: 1, .. }));

    registry.class_named::<Shape>("Shape").register().expect("Shape");
    let shape = registry.get_class("Shape").expect("Shape");
    let err = shape.construct(&[]).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Capability);
}

#[test]
fn test_free_functions() {
    let registry = labelled_registry();
    registry
        .register_function(
            "to_string",
            Function::free(|v: i32| v.to_string()),
            MemberSpec::new().names(["value"]),
        )
        .expect("register");

    let overloads = registry.get_method("to_string");
    assert_eq!(overloads.len(), 1);
    let out = overloads[0].invoke(&[Any::new(42)]).ok().flatten();
    assert_eq!(out.map(|v| v.get::<String>()), Some(Ok("42".to_string())));

    let err = overloads[0].invoke(&[Any::new(1u8)]).unwrap_err();
    assert!(matches!(err, Error::ArgumentType { index: 0, .. }));
}
