use super::*;
use pretty_assertions::assert_eq;
use rivet_ir::TypeId;
use rivet_value::InvokeErrorKind;

use crate::test_fixtures::{fixture, Fixture};
use crate::{compile, CompileOptions, ConversionMode};

fn compiled(fx: &Fixture, ty: TypeId, name: &str, params: &[TypeId]) -> CompiledInvoker {
    compile(&fx.table, &fx.method(ty, name, params), CompileOptions::default()).unwrap()
}

#[test]
fn test_reference_receiver_method() {
    let fx = fixture();
    let add_one = compiled(&fx, fx.calculator, "AddOne", &[TypeId::INT]);
    let calc = fx.calculator_instance();

    let result = add_one.invoke(Receiver::Shared(&calc), &[Value::int(5)]);
    assert_eq!(result, Ok(Value::int(6)));
}

#[test]
fn test_arity_checked_first() {
    let fx = fixture();
    let add_one = compiled(&fx, fx.calculator, "AddOne", &[TypeId::INT]);

    // the receiver is also wrong, but arity wins
    let err = add_one.invoke(Receiver::Absent, &[]).unwrap_err();
    assert_eq!(
        err.kind,
        InvokeErrorKind::ArityMismatch {
            member: "Calculator::AddOne".to_string(),
            expected: 1,
            got: 0,
        }
    );
    assert_eq!(err.message, "Calculator::AddOne expects 1 argument, got 0");
}

#[test]
fn test_value_receiver_mutates_slot() {
    let fx = fixture();
    let increment = compiled(&fx, fx.counter, "Increment", &[]);
    let mut slot = Value::new_struct(fx.counter, vec![Value::int(3)]);

    let result = increment.invoke(Receiver::Slot(&mut slot), &[]);

    assert_eq!(result, Ok(Value::Void));
    assert_eq!(slot, Value::new_struct(fx.counter, vec![Value::int(4)]));
}

#[test]
fn test_value_receiver_requires_slot() {
    let fx = fixture();
    let increment = compiled(&fx, fx.counter, "Increment", &[]);
    let value = Value::new_struct(fx.counter, vec![Value::int(3)]);

    let err = increment.invoke(Receiver::Shared(&value), &[]).unwrap_err();
    assert_eq!(
        err.kind,
        InvokeErrorKind::TypeMismatch {
            site: MismatchSite::Receiver,
            expected: "Counter".to_string(),
            got: "Counter (not a storage slot)".to_string(),
        }
    );
}

#[test]
fn test_value_receiver_wrong_type_untouched() {
    let fx = fixture();
    let increment = compiled(&fx, fx.counter, "Increment", &[]);
    let mut slot = Value::int(3);

    let err = increment.invoke(Receiver::Slot(&mut slot), &[]).unwrap_err();
    assert!(matches!(
        err.kind,
        InvokeErrorKind::TypeMismatch {
            site: MismatchSite::Receiver,
            ..
        }
    ));
    assert_eq!(slot, Value::int(3));
}

#[test]
fn test_reference_receiver_mismatches() {
    let fx = fixture();
    let add_one = compiled(&fx, fx.calculator, "AddOne", &[TypeId::INT]);
    let dog = Value::new_object(fx.dog, vec![]);
    let null = Value::Null;

    for receiver in [Receiver::Absent, Receiver::Shared(&null), Receiver::Shared(&dog)] {
        let err = add_one.invoke(receiver, &[Value::int(1)]).unwrap_err();
        assert!(matches!(
            err.kind,
            InvokeErrorKind::TypeMismatch {
                site: MismatchSite::Receiver,
                ..
            }
        ));
    }
}

#[test]
fn test_reference_receiver_through_slot() {
    let fx = fixture();
    let accumulate = compiled(&fx, fx.calculator, "Accumulate", &[TypeId::INT]);
    let mut calc = fx.calculator_instance();

    accumulate
        .invoke(Receiver::Slot(&mut calc), &[Value::int(7)])
        .unwrap();
    assert_eq!(calc.as_object().unwrap().get::<i64>(0).unwrap(), 7);
}

#[test]
fn test_argument_mismatch_skips_body() {
    let fx = fixture();
    let accumulate = compiled(&fx, fx.calculator, "Accumulate", &[TypeId::INT]);
    let calc = fx.calculator_instance();

    let err = accumulate
        .invoke(Receiver::Shared(&calc), &[Value::string("7")])
        .unwrap_err();
    assert_eq!(
        err.kind,
        InvokeErrorKind::TypeMismatch {
            site: MismatchSite::Argument(0),
            expected: "int".to_string(),
            got: "str".to_string(),
        }
    );
    assert_eq!(calc.as_object().unwrap().get::<i64>(0).unwrap(), 0);
}

#[test]
fn test_static_ignores_receiver() {
    let fx = fixture();
    let twice = compiled(&fx, fx.calculator, "Twice", &[TypeId::INT]);
    let junk = Value::string("ignored");

    assert_eq!(twice.invoke(Receiver::Absent, &[Value::int(4)]), Ok(Value::int(8)));
    assert_eq!(
        twice.invoke(Receiver::Shared(&junk), &[Value::int(4)]),
        Ok(Value::int(8))
    );
}

#[test]
fn test_body_error_propagates_unchanged() {
    let fx = fixture();
    let fail = compiled(&fx, fx.calculator, "Fail", &[TypeId::STR]);
    let calc = fx.calculator_instance();

    let err = fail
        .invoke(Receiver::Shared(&calc), &[Value::string("boom")])
        .unwrap_err();
    assert_eq!(
        err.kind,
        InvokeErrorKind::Raised {
            message: "boom".to_string()
        }
    );
    assert_eq!(err.payload, Some(Value::int(42)));
    assert!(!err.is_caller_error());
}

#[test]
fn test_virtual_dispatch_reaches_override() {
    let fx = fixture();
    let speak = compiled(&fx, fx.animal, "Speak", &[]);
    assert!(speak.is_virtual());

    let animal = Value::new_object(fx.animal, vec![]);
    let dog = Value::new_object(fx.dog, vec![]);
    let leaf = Value::new_object(fx.leaf, vec![]);

    assert_eq!(speak.invoke(Receiver::Shared(&animal), &[]), Ok(Value::string("...")));
    assert_eq!(speak.invoke(Receiver::Shared(&dog), &[]), Ok(Value::string("woof")));
    assert_eq!(speak.invoke(Receiver::Shared(&leaf), &[]), Ok(Value::string("rustle")));
}

#[test]
fn test_sealed_devirtualized() {
    let fx = fixture();
    let leaf_speak = compiled(&fx, fx.leaf, "Speak", &[]);
    assert!(!leaf_speak.is_virtual());

    let options = CompileOptions::default().with_devirtualize_sealed(false);
    let descriptor = fx.method(fx.leaf, "Speak", &[]);
    let still_virtual = compile(&fx.table, &descriptor, options).unwrap();
    assert!(still_virtual.is_virtual());

    let leaf = Value::new_object(fx.leaf, vec![]);
    assert_eq!(
        leaf_speak.invoke(Receiver::Shared(&leaf), &[]),
        still_virtual.invoke(Receiver::Shared(&leaf), &[])
    );
}

#[test]
fn test_constructor_fresh_instances() {
    let fx = fixture();
    let ctor = compile(
        &fx.table,
        &fx.table.find_constructor(fx.calculator, &[]).unwrap(),
        CompileOptions::default(),
    )
    .unwrap();

    let a = ctor.invoke(Receiver::Absent, &[]).unwrap();
    let b = ctor.invoke(Receiver::Absent, &[]).unwrap();
    assert!(!a.as_object().unwrap().ptr_eq(b.as_object().unwrap()));
    assert_eq!(
        ctor.result_step(),
        &ResultStep::Construct {
            ty: fx.calculator,
            kind: TypeKind::Reference
        }
    );
}

#[test]
fn test_value_constructor() {
    let fx = fixture();
    let ctor = compile(
        &fx.table,
        &fx.table.find_constructor(fx.counter, &[TypeId::INT]).unwrap(),
        CompileOptions::default(),
    )
    .unwrap();

    assert_eq!(
        ctor.invoke(Receiver::Absent, &[Value::int(9)]),
        Ok(Value::new_struct(fx.counter, vec![Value::int(9)]))
    );
}

#[test]
fn test_widening_is_opt_in() {
    let fx = fixture();
    let descriptor = fx.method(fx.calculator, "Twice", &[TypeId::INT]);
    let exact = compile(&fx.table, &descriptor, CompileOptions::default()).unwrap();
    let widening = compile(
        &fx.table,
        &descriptor,
        CompileOptions::default().with_conversion(ConversionMode::Widening),
    )
    .unwrap();

    assert!(exact.invoke(Receiver::Absent, &[Value::Byte(3)]).is_err());
    assert_eq!(
        widening.invoke(Receiver::Absent, &[Value::Byte(3)]),
        Ok(Value::int(6))
    );
}

#[test]
fn test_debug_output() {
    let fx = fixture();
    let add = compiled(&fx, fx.counter, "Add", &[TypeId::INT]);
    let debug = format!("{add:?}");

    assert!(debug.contains("Counter::Add"));
    assert!(debug.contains("ValueSlot"));
    assert_eq!(add.arity(), 1);
    assert_eq!(add.arg_steps(), &[ArgStep::Int]);
    assert_eq!(add.receiver_step(), &ReceiverStep::ValueSlot { ty: fx.counter });
    assert_eq!(add.descriptor().name(), fx.table.intern("Add"));
}
