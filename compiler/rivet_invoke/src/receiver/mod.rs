//! Receiver handles.

use rivet_value::Value;

/// The instance an invocation runs against.
///
/// Value-type receivers must be passed as `Slot` so that members mutating
/// `self` write through to the caller's storage instead of a copy.
#[derive(Debug)]
pub enum Receiver<'a> {
    /// Static members and constructors.
    Absent,
    /// A reference-type instance.
    Shared(&'a Value),
    /// The storage location holding the receiver.
    Slot(&'a mut Value),
}

impl<'a> Receiver<'a> {
    #[inline]
    pub fn is_absent(&self) -> bool {
        matches!(self, Receiver::Absent)
    }

    /// Read access to the receiver value, if any.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Receiver::Absent => None,
            Receiver::Shared(value) => Some(*value),
            Receiver::Slot(value) => Some(&**value),
        }
    }

    /// Reborrow, so one handle can drive several invocations.
    pub fn reborrow(&mut self) -> Receiver<'_> {
        match self {
            Receiver::Absent => Receiver::Absent,
            Receiver::Shared(value) => Receiver::Shared(*value),
            Receiver::Slot(value) => Receiver::Slot(&mut **value),
        }
    }
}

impl<'a> From<&'a Value> for Receiver<'a> {
    fn from(value: &'a Value) -> Self {
        Receiver::Shared(value)
    }
}

impl<'a> From<&'a mut Value> for Receiver<'a> {
    fn from(value: &'a mut Value) -> Self {
        Receiver::Slot(value)
    }
}
