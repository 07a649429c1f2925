use super::*;
use pretty_assertions::assert_eq;
use rivet_ir::TypeId;
use rivet_meta::{DescriptorParts, MemberBody};
use rivet_value::{InvokeErrorKind, Value};

use crate::test_fixtures::fixture;
use crate::Receiver;

fn parts(declaring_type: TypeId, receiver_kind: TypeKind, body: MemberBody) -> DescriptorParts {
    DescriptorParts {
        kind: MemberKind::Method,
        name: rivet_ir::Name::EMPTY,
        declaring_type,
        receiver_kind,
        is_static: false,
        params: SmallVec::new(),
        return_type: TypeId::VOID,
        body,
    }
}

fn invalid_message(err: InvokeError) -> String {
    match err.kind {
        InvokeErrorKind::InvalidOperation { message } => message,
        other => panic!("expected InvalidOperation, got {other:?}"),
    }
}

#[test]
fn test_plan_for_value_method() {
    let fx = fixture();
    let descriptor = fx.method(fx.counter, "Add", &[TypeId::INT]);
    let invoker = compile(&fx.table, &descriptor, CompileOptions::default()).unwrap();

    assert_eq!(invoker.receiver_step(), &ReceiverStep::ValueSlot { ty: fx.counter });
    assert_eq!(invoker.arg_steps(), &[ArgStep::Int]);
    assert_eq!(invoker.result_step(), &ResultStep::Value);
    assert!(!invoker.is_virtual());
}

#[test]
fn test_plan_for_static_and_void() {
    let fx = fixture();
    let twice = compile(
        &fx.table,
        &fx.method(fx.calculator, "Twice", &[TypeId::INT]),
        CompileOptions::default(),
    )
    .unwrap();
    assert_eq!(twice.receiver_step(), &ReceiverStep::None);
    assert!(!twice.is_virtual());

    let accumulate = compile(
        &fx.table,
        &fx.method(fx.calculator, "Accumulate", &[TypeId::INT]),
        CompileOptions::default(),
    )
    .unwrap();
    assert_eq!(accumulate.result_step(), &ResultStep::Void);
    assert!(accumulate.is_virtual());
}

#[test]
fn test_unknown_declaring_type() {
    let fx = fixture();
    let ghost = TypeId::new(777);
    let descriptor = MemberDescriptor::from_parts(parts(
        ghost,
        TypeKind::Reference,
        MemberBody::reference(|_, _| Ok(Value::Void)),
    ));

    let err = compile(&fx.table, &descriptor, CompileOptions::default()).unwrap_err();
    assert_eq!(
        err.kind,
        InvokeErrorKind::MissingMember {
            type_name: "<unknown>".to_string(),
            member: "()".to_string(),
        }
    );
}

#[test]
fn test_unknown_parameter_type() {
    let fx = fixture();
    let mut p = parts(
        fx.calculator,
        TypeKind::Reference,
        MemberBody::reference(|_, _| Ok(Value::Void)),
    );
    p.name = fx.table.intern("Take");
    p.params.push(TypeId::new(778));
    let descriptor = MemberDescriptor::from_parts(p);

    let err = compile(&fx.table, &descriptor, CompileOptions::default()).unwrap_err();
    assert_eq!(err.message, "cannot find Calculator::Take(<unknown>)");
}

#[test]
fn test_void_parameter_rejected() {
    let fx = fixture();
    let mut p = parts(
        fx.calculator,
        TypeKind::Reference,
        MemberBody::reference(|_, _| Ok(Value::Void)),
    );
    p.params.push(TypeId::VOID);
    let descriptor = MemberDescriptor::from_parts(p);

    let err = compile(&fx.table, &descriptor, CompileOptions::default()).unwrap_err();
    assert!(invalid_message(err).ends_with("parameter 0 cannot be void"));
}

#[test]
fn test_body_must_match_receiver_kind() {
    let fx = fixture();
    let mut p = parts(
        fx.counter,
        TypeKind::Value,
        MemberBody::reference(|_, _| Ok(Value::Void)),
    );
    p.name = fx.table.intern("Poke");
    let descriptor = MemberDescriptor::from_parts(p);

    let err = compile(&fx.table, &descriptor, CompileOptions::default()).unwrap_err();
    assert_eq!(
        invalid_message(err),
        "malformed descriptor for Counter::Poke: expected a value-receiver body, found reference-receiver"
    );
}

#[test]
fn test_receiver_kind_must_match_table() {
    let fx = fixture();
    let descriptor = MemberDescriptor::from_parts(parts(
        fx.counter,
        TypeKind::Reference,
        MemberBody::reference(|_, _| Ok(Value::Void)),
    ));

    let err = compile(&fx.table, &descriptor, CompileOptions::default()).unwrap_err();
    assert!(invalid_message(err).contains("declared as a reference type member"));
}

#[test]
fn test_static_flag_must_match_body() {
    let fx = fixture();
    let mut p = parts(
        fx.calculator,
        TypeKind::Reference,
        MemberBody::reference(|_, _| Ok(Value::Void)),
    );
    p.is_static = true;
    let descriptor = MemberDescriptor::from_parts(p);

    let err = compile(&fx.table, &descriptor, CompileOptions::default()).unwrap_err();
    assert!(invalid_message(err).contains("expected a static body"));
}

#[test]
fn test_constructor_needs_constructor_body() {
    let fx = fixture();
    let mut p = parts(
        fx.calculator,
        TypeKind::Reference,
        MemberBody::new_static(|_| Ok(Value::Null)),
    );
    p.kind = MemberKind::Constructor;
    p.return_type = fx.calculator;
    let descriptor = MemberDescriptor::from_parts(p);

    let err = compile(&fx.table, &descriptor, CompileOptions::default()).unwrap_err();
    assert!(invalid_message(err).contains("expected a constructor body, found static"));
}

#[test]
fn test_instance_member_on_primitive_rejected() {
    let fx = fixture();
    let descriptor = MemberDescriptor::from_parts(parts(
        TypeId::STR,
        TypeKind::Reference,
        MemberBody::reference(|_, _| Ok(Value::Void)),
    ));

    let err = compile(&fx.table, &descriptor, CompileOptions::default()).unwrap_err();
    assert!(invalid_message(err).contains("require a user-defined type"));
}

#[test]
fn test_constructor_result_checked() {
    let fx = fixture();
    let mut p = parts(
        fx.calculator,
        TypeKind::Reference,
        MemberBody::constructor(|_| Ok(Value::int(1))),
    );
    p.kind = MemberKind::Constructor;
    p.return_type = fx.calculator;
    let descriptor = MemberDescriptor::from_parts(p);

    let ctor = compile(&fx.table, &descriptor, CompileOptions::default()).unwrap();
    let err = ctor.invoke(Receiver::Absent, &[]).unwrap_err();
    assert_eq!(
        invalid_message(err),
        "constructor of Calculator returned int"
    );
}

#[test]
fn test_unregistered_descriptor_falls_back_to_own_body() {
    let fx = fixture();
    let mut p = parts(
        fx.animal,
        TypeKind::Reference,
        MemberBody::reference(|_, _| Ok(Value::string("detached"))),
    );
    p.name = fx.table.intern("Detached");
    p.return_type = TypeId::STR;
    let descriptor = MemberDescriptor::from_parts(p);

    let invoker = compile(&fx.table, &descriptor, CompileOptions::default()).unwrap();
    assert!(invoker.is_virtual());

    let dog = Value::new_object(fx.dog, vec![]);
    assert_eq!(
        invoker.invoke(Receiver::Shared(&dog), &[]),
        Ok(Value::string("detached"))
    );
}

#[test]
fn test_recompiling_is_equivalent() {
    let fx = fixture();
    let descriptor = fx.method(fx.calculator, "AddOne", &[TypeId::INT]);
    let first = compile(&fx.table, &descriptor, CompileOptions::default()).unwrap();
    let second = compile(&fx.table, &descriptor, CompileOptions::default()).unwrap();
    let calc = fx.calculator_instance();

    for n in [-1, 0, 41] {
        assert_eq!(
            first.invoke(Receiver::Shared(&calc), &[Value::int(n)]),
            second.invoke(Receiver::Shared(&calc), &[Value::int(n)])
        );
    }
    assert_eq!(first.arg_steps(), second.arg_steps());
}
