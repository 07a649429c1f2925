use super::*;
use rivet_value::InvokeErrorKind;

#[test]
fn test_args_typed_access() {
    let values = [Value::int(5), Value::string("x")];
    let args = Args::new(&values);

    assert_eq!(args.len(), 2);
    assert_eq!(args.get::<i64>(0).unwrap(), 5);
    assert_eq!(args.get::<String>(1).unwrap(), "x");
}

#[test]
fn test_args_mismatch_names_position() {
    let values = [Value::int(5)];
    let args = Args::new(&values);

    let err = args.get::<bool>(0).unwrap_err();
    assert_eq!(
        err.kind,
        InvokeErrorKind::TypeMismatch {
            site: MismatchSite::Argument(0),
            expected: "bool".to_string(),
            got: "int".to_string(),
        }
    );
    assert!(args.get::<i64>(3).is_err());
}

#[test]
fn test_body_shapes() {
    let body = MemberBody::new_static(|_| Ok(Value::Void));
    assert!(body.is_static());
    assert_eq!(format!("{body:?}"), "MemberBody::static");

    let body = MemberBody::value(|this, _| {
        this.set_field(0, 1i64);
        Ok(Value::Void)
    });
    assert!(!body.is_static());
    assert_eq!(body.as_str(), "value-receiver");
}
