use activator_core::{ActivationError, Activator, CompiledFactory, Invoke};
use activator_types::{DateTime, ObjectRef, RuntimeType, TypeBuilder, TypeDescription, Value};
use std::sync::{Arc, Barrier};

pub struct TestTypes {
    pub parameterless: TypeDescription,
    pub one_param: TypeDescription,
    pub two_param: TypeDescription,
    pub multi: TypeDescription,
    pub multi_two_param: TypeDescription,
}

impl TestTypes {
    fn new() -> Self {
        let parameterless = TypeBuilder::class("Tests", "Parameterless")
            .default_constructor()
            .build()
            .unwrap();
        let one_param = TypeBuilder::class("Tests", "OneParamCtor")
            .field("Value", RuntimeType::String)
            .constructor([("value", RuntimeType::String)])
            .build()
            .unwrap();
        let two_param = TypeBuilder::class("Tests", "TwoParamCtor")
            .field("StringValue", RuntimeType::String)
            .field("IntValue", RuntimeType::Int32)
            .constructor([
                ("stringValue", RuntimeType::String),
                ("intValue", RuntimeType::Int32),
            ])
            .build()
            .unwrap();
        let multi = TypeBuilder::class("Tests", "MultiCtor")
            .field("StringValue", RuntimeType::String)
            .field("IntValue", RuntimeType::Int32)
            .field("DateValue", RuntimeType::DateTime)
            .constructor([("stringValue", RuntimeType::String)])
            .constructor([
                ("stringValue", RuntimeType::String),
                ("intValue", RuntimeType::Int32),
            ])
            .constructor([
                ("stringValue", RuntimeType::String),
                ("intValue", RuntimeType::Int32),
                ("dateValue", RuntimeType::DateTime),
            ])
            .build()
            .unwrap();
        let multi_two_param = TypeBuilder::class("Tests", "MultiTwoParamCtor")
            .field("IntValue", RuntimeType::Int32)
            .field("StringValue", RuntimeType::String)
            .field("NullableIntValue", RuntimeType::nullable(RuntimeType::Int32))
            .constructor([
                ("intValue", RuntimeType::Int32),
                ("stringValue", RuntimeType::String),
            ])
            .constructor([
                ("intValue", RuntimeType::Int32),
                ("nullableIntValue", RuntimeType::nullable(RuntimeType::Int32)),
            ])
            .build()
            .unwrap();

        Self {
            parameterless,
            one_param,
            two_param,
            multi,
            multi_two_param,
        }
    }
}

fn field(obj: &ObjectRef, name: &str) -> Value {
    obj.field(name).cloned().unwrap()
}

#[test]
fn parameterless() {
    let t = TestTypes::new();
    let activator = Activator::new();
    let obj = activator.construct(&t.parameterless, &[]).unwrap();
    assert_eq!(obj.description, t.parameterless);
}

#[test]
fn exact_types_fill_fields() {
    let t = TestTypes::new();
    let activator = Activator::new();

    let one = activator.construct(&t.one_param, &["hello".into()]).unwrap();
    assert_eq!(field(&one, "Value"), Value::from("hello"));

    let two = activator
        .construct(&t.two_param, &["hello".into(), 42.into()])
        .unwrap();
    assert_eq!(field(&two, "StringValue"), Value::from("hello"));
    assert_eq!(field(&two, "IntValue"), Value::Int32(42));
}

#[test]
fn overload_selection_by_arity() {
    let t = TestTypes::new();
    let activator = Activator::new();
    let date = DateTime::from_ticks(630_822_816_000_000_000).unwrap();

    let one = activator.construct(&t.multi, &["a".into()]).unwrap();
    assert_eq!(field(&one, "StringValue"), Value::from("a"));
    assert_eq!(field(&one, "IntValue"), Value::Int32(0));
    assert_eq!(field(&one, "DateValue"), Value::DateTime(DateTime::MIN));

    let two = activator.construct(&t.multi, &["a".into(), 7.into()]).unwrap();
    assert_eq!(field(&two, "IntValue"), Value::Int32(7));
    assert_eq!(field(&two, "DateValue"), Value::DateTime(DateTime::MIN));

    let three = activator
        .construct(&t.multi, &["a".into(), 7.into(), date.into()])
        .unwrap();
    assert_eq!(field(&three, "DateValue"), Value::DateTime(date));
}

#[test]
fn null_with_unique_candidate() {
    let t = TestTypes::new();
    let activator = Activator::new();

    let obj = activator.construct(&t.one_param, &[Value::Null]).unwrap();
    assert_eq!(field(&obj, "Value"), Value::Null);

    let obj = activator
        .construct(&t.multi, &[Value::Null, 456.into(), DateTime::MAX.into()])
        .unwrap();
    assert_eq!(field(&obj, "StringValue"), Value::Null);
    assert_eq!(field(&obj, "IntValue"), Value::Int32(456));
    assert_eq!(field(&obj, "DateValue"), Value::DateTime(DateTime::MAX));
}

#[test]
fn typed_null_arguments_select_by_declared_type() {
    let t = TestTypes::new();
    let activator = Activator::new();

    let obj = activator
        .construct_with(&t.multi_two_param, (1, None::<&str>))
        .unwrap();
    assert_eq!(field(&obj, "IntValue"), Value::Int32(1));
    assert_eq!(field(&obj, "StringValue"), Value::Null);
    assert_eq!(field(&obj, "NullableIntValue"), Value::Null);

    let obj = activator
        .construct_with(&t.multi_two_param, (2, None::<i32>))
        .unwrap();
    assert_eq!(field(&obj, "IntValue"), Value::Int32(2));
    assert_eq!(field(&obj, "StringValue"), Value::Null);

    let obj = activator
        .construct_with(&t.multi_two_param, (3, Some(4)))
        .unwrap();
    assert_eq!(field(&obj, "NullableIntValue"), Value::Int32(4));
    assert_eq!(activator.cache_stats().builds, 2);

    let err = activator
        .construct_with(&t.two_param, ("a", None::<i32>))
        .unwrap_err();
    assert!(matches!(err, ActivationError::ConstructorNotFound { .. }));
}

#[test]
fn null_with_several_candidates_is_ambiguous() {
    let t = TestTypes::new();
    let activator = Activator::new();

    let err = activator
        .construct(&t.multi_two_param, &[123.into(), Value::Null])
        .unwrap_err();
    assert!(matches!(err, ActivationError::AmbiguousConstructor { .. }));
    assert!(err.caused_by_null_arguments());
    assert!(err.to_string().contains("null arguments"));
}

#[test]
fn no_matching_constructor() {
    let t = TestTypes::new();
    let activator = Activator::new();

    let err = activator
        .construct(&t.two_param, &[DateTime::MAX.into(), DateTime::MAX.into()])
        .unwrap_err();
    assert!(matches!(
        err,
        ActivationError::ConstructorNotFound {
            null_arguments: false,
            ..
        }
    ));
    assert!(err.to_string().starts_with("Failed to find a matching constructor"));

    let err = activator
        .construct(&t.multi_two_param, &[DateTime::MAX.into(), Value::Null])
        .unwrap_err();
    assert!(err.caused_by_null_arguments());
    assert!(err.to_string().contains("null arguments"));

    let err = activator
        .construct(&t.parameterless, &["extra".into()])
        .unwrap_err();
    assert!(err.is_resolution_failure());
}

#[test]
fn repeated_shapes_build_once() {
    let t = TestTypes::new();
    let activator = Activator::new();

    for i in 0..10 {
        let obj = activator
            .construct(&t.two_param, &[format!("s{}", i).into(), i.into()])
            .unwrap();
        assert_eq!(field(&obj, "IntValue"), Value::Int32(i));
    }
    let stat = activator.cache_stats();
    assert_eq!(stat.builds, 1);
    assert_eq!(stat.misses, 1);
    assert_eq!(stat.hits, 9);

    activator.construct(&t.two_param, &[Value::Null, 1.into()]).unwrap();
    assert_eq!(activator.cache_stats().builds, 2);
    assert_eq!(activator.cache_stats().size, 2);
}

#[test]
fn failed_builds_are_retried() {
    let t = TestTypes::new();
    let activator = Activator::new();

    for _ in 0..3 {
        assert!(activator
            .construct(&t.multi_two_param, &[1.into(), Value::Null])
            .is_err());
    }
    let stat = activator.cache_stats();
    assert_eq!(stat.build_failures, 3);
    assert_eq!(stat.size, 0);

    activator
        .construct(&t.multi_two_param, &[1.into(), "s".into()])
        .unwrap();
    assert_eq!(activator.cache_stats().builds, 1);
}

#[test]
fn factory_for_reuses_the_cached_factory() {
    let t = TestTypes::new();
    let activator = Activator::new();

    let a: Arc<CompiledFactory> = activator.factory_for(&t.one_param, &["x".into()]).unwrap();
    let b = activator.factory_for(&t.one_param, &["y".into()]).unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(a.arity(), 1);

    let obj = a.invoke(&["z".into()]).unwrap();
    assert_eq!(field(&obj, "Value"), Value::from("z"));
}

#[test]
fn concurrent_first_calls_build_once() {
    const THREADS: usize = 32;
    let t = TestTypes::new();
    let activator = Activator::new();
    let barrier = Barrier::new(THREADS);

    let results: Vec<ObjectRef> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|i| {
                let (activator, barrier, ty) = (&activator, &barrier, &t.two_param);
                s.spawn(move || {
                    barrier.wait();
                    activator
                        .construct(ty, &[format!("t{}", i).into(), (i as i32).into()])
                        .unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(activator.cache_stats().builds, 1);
    for (i, obj) in results.iter().enumerate() {
        assert_eq!(field(obj, "StringValue"), Value::from(format!("t{}", i)));
        assert_eq!(field(obj, "IntValue"), Value::Int32(i as i32));
    }
}

#[test]
fn subtype_arguments_select_ancestor_constructors() {
    let animal = TypeBuilder::class("Zoo", "Animal")
        .abstract_type()
        .field("Name", RuntimeType::String)
        .build()
        .unwrap();
    let cat = TypeBuilder::class("Zoo", "Cat")
        .extends(&animal)
        .constructor([("name", RuntimeType::String)])
        .build()
        .unwrap();
    let enclosure = TypeBuilder::class("Zoo", "Enclosure")
        .field("Resident", RuntimeType::Type(animal.clone()))
        .constructor([("resident", RuntimeType::Type(animal.clone()))])
        .build()
        .unwrap();

    let activator = Activator::new();
    let tom = activator.construct(&cat, &["Tom".into()]).unwrap();
    assert_eq!(field(&tom, "Name"), Value::from("Tom"));
    assert!(tom.description.is_a(&animal));

    let home = activator
        .construct(&enclosure, &[tom.clone().into()])
        .unwrap();
    assert_eq!(field(&home, "Resident"), Value::Object(tom));

    let err = activator.construct(&animal, &[]).unwrap_err();
    assert!(matches!(err, ActivationError::ConstructorNotFound { .. }));
}

#[test]
fn value_types_are_boxed() {
    let point = TypeBuilder::value_type("Geometry", "Vector")
        .field("X", RuntimeType::Int32)
        .field("Y", RuntimeType::Int32)
        .constructor([("x", RuntimeType::Int32), ("y", RuntimeType::Int32)])
        .build()
        .unwrap();

    let activator = Activator::new();
    let origin = activator.construct(&point, &[]).unwrap();
    assert!(origin.is_boxed());
    assert_eq!(field(&origin, "X"), Value::Int32(0));

    let v = activator.construct_with(&point, (3, 4)).unwrap();
    assert_eq!(field(&v, "Y"), Value::Int32(4));
}

#[test]
fn null_into_value_type_parameter_is_rejected() {
    let t = TestTypes::new();
    let activator = Activator::new();
    let err = activator
        .construct(&t.two_param, &["a".into(), Value::Null])
        .unwrap_err();
    assert!(matches!(err, ActivationError::InvalidArgument { .. }));
    assert!(err.caused_by_null_arguments());
}
