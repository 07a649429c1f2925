use super::*;
use crate::InvokeErrorKind;

const POINT: TypeId = TypeId::new(TypeId::FIRST_USER);
const NODE: TypeId = TypeId::new(TypeId::FIRST_USER + 1);

#[test]
fn test_struct_clone_is_a_copy() {
    let original = StructValue::new(POINT, vec![Value::int(1), Value::int(2)]);
    let mut copy = original.clone();
    assert!(copy.set_field(0, 10i64));

    assert_eq!(original.get::<i64>(0).unwrap(), 1);
    assert_eq!(copy.get::<i64>(0).unwrap(), 10);
}

#[test]
fn test_struct_set_field_out_of_range() {
    let mut point = StructValue::new(POINT, vec![Value::int(1)]);
    assert!(!point.set_field(3, 0i64));
    assert_eq!(point.fields().len(), 1);
}

#[test]
fn test_struct_typed_get_mismatch() {
    let point = StructValue::new(POINT, vec![Value::string("x")]);
    let err = point.get::<i64>(0).unwrap_err();
    assert!(matches!(err.kind, InvokeErrorKind::InvalidOperation { .. }));
    assert!(err.message.contains("field 0"), "{}", err.message);
}

#[test]
fn test_object_clone_aliases() {
    let node = ObjectRef::new(NODE, vec![Value::int(0)]);
    let alias = node.clone();
    assert!(alias.set_field(0, 7i64));

    assert_eq!(node.get::<i64>(0).unwrap(), 7);
    assert!(node.ptr_eq(&alias));
}

#[test]
fn test_object_identity_not_structure() {
    let a = ObjectRef::new(NODE, vec![Value::int(1)]);
    let b = ObjectRef::new(NODE, vec![Value::int(1)]);
    assert!(!a.ptr_eq(&b));
    assert_ne!(Value::Object(a), Value::Object(b));
}

#[test]
fn test_object_field_helpers() {
    let node = ObjectRef::new(NODE, vec![Value::int(1), Value::Null]);
    assert_eq!(node.field_count(), 2);
    assert_eq!(node.field(1), Some(Value::Null));
    assert_eq!(node.field(2), None);

    node.write_fields(|fields| fields[1] = Value::string("next"));
    let next = node.read_fields(|fields| fields[1].clone());
    assert_eq!(next, Value::string("next"));
}
