//! Shared member fixtures for unit tests.
#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use rivet_ir::TypeId;
use rivet_meta::{MemberBody, MemberDescriptor, TypeTable};
use rivet_value::{InvokeError, Value};

use crate::Reflector;

pub(crate) struct Fixture {
    pub table: Arc<TypeTable>,
    /// Value type `{ count: int }`.
    pub counter: TypeId,
    /// Reference type `{ total: int }`.
    pub calculator: TypeId,
    pub animal: TypeId,
    pub dog: TypeId,
    /// Sealed subclass of `Animal`.
    pub leaf: TypeId,
}

impl Fixture {
    pub fn reflector(&self) -> Reflector {
        Reflector::new(Arc::clone(&self.table))
    }

    pub fn method(&self, ty: TypeId, name: &str, params: &[TypeId]) -> Arc<MemberDescriptor> {
        self.table.find_method(ty, name, params).unwrap()
    }

    pub fn calculator_instance(&self) -> Value {
        Value::new_object(self.calculator, vec![Value::int(0)])
    }
}

pub(crate) fn fixture() -> Fixture {
    let table = TypeTable::new();

    let builder = table.value_type("Counter");
    let counter = builder.id();
    builder
        .constructor(&[TypeId::INT], move |args| {
            Ok(Value::new_struct(counter, vec![Value::int(args.get(0)?)]))
        })
        .value_method("Increment", &[], TypeId::VOID, |this, _| {
            let count = this.get::<i64>(0)? + 1;
            this.set_field(0, count);
            // discarded: void members always yield Void
            Ok(Value::int(count))
        })
        .value_method("Add", &[TypeId::INT], TypeId::INT, |this, args| {
            let count = this.get::<i64>(0)? + args.get::<i64>(0)?;
            this.set_field(0, count);
            Ok(Value::int(count))
        })
        .static_method("Zero", &[], counter, move |_| {
            Ok(Value::new_struct(counter, vec![Value::int(0)]))
        })
        .getter("Count", TypeId::INT, MemberBody::value(|this, _| this.get::<Value>(0)))
        .setter(
            "Count",
            TypeId::INT,
            MemberBody::value(|this, args| {
                this.set_field(0, args.get::<i64>(0)?);
                Ok(Value::Void)
            }),
        )
        .finish()
        .unwrap();

    let builder = table.reference_type("Calculator");
    let calculator = builder.id();
    builder
        .constructor(&[], move |_| {
            Ok(Value::new_object(calculator, vec![Value::int(0)]))
        })
        .ref_method("AddOne", &[TypeId::INT], TypeId::INT, |_, args| {
            Ok(Value::int(args.get::<i64>(0)? + 1))
        })
        .ref_method("Accumulate", &[TypeId::INT], TypeId::VOID, |this, args| {
            let total = this.get::<i64>(0)? + args.get::<i64>(0)?;
            this.set_field(0, total);
            Ok(Value::Void)
        })
        .ref_method("Fail", &[TypeId::STR], TypeId::INT, |_, args| {
            Err(InvokeError::raise_with(args.get::<String>(0)?, Value::int(42)))
        })
        .static_method("Twice", &[TypeId::INT], TypeId::INT, |args| {
            Ok(Value::int(args.get::<i64>(0)? * 2))
        })
        .getter("Total", TypeId::INT, MemberBody::reference(|this, _| this.get::<Value>(0)))
        .setter(
            "Secret",
            TypeId::INT,
            MemberBody::reference(|this, args| {
                this.set_field(0, args.get::<i64>(0)?);
                Ok(Value::Void)
            }),
        )
        .finish()
        .unwrap();

    let animal = table
        .reference_type("Animal")
        .ref_method("Speak", &[], TypeId::STR, |_, _| Ok(Value::string("...")))
        .finish()
        .unwrap();
    let dog = table
        .reference_type("Dog")
        .base(animal)
        .ref_method("Speak", &[], TypeId::STR, |_, _| Ok(Value::string("woof")))
        .finish()
        .unwrap();
    let leaf = table
        .reference_type("Leaf")
        .base(animal)
        .sealed()
        .ref_method("Speak", &[], TypeId::STR, |_, _| Ok(Value::string("rustle")))
        .finish()
        .unwrap();

    Fixture {
        table: Arc::new(table),
        counter,
        calculator,
        animal,
        dog,
        leaf,
    }
}
