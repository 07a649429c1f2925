//! The four callable member shapes.

use std::fmt;

/// Kind of a callable member.
///
/// Property accessors are modeled as 0- or 1-argument methods; constructors
/// are "static-shaped" and never take a receiver.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum MemberKind {
    Method,
    Constructor,
    PropertyGet,
    PropertySet,
}

impl MemberKind {
    /// Whether a member of this kind consumes a receiver.
    #[inline]
    pub const fn takes_receiver(self, is_static: bool) -> bool {
        !is_static && !matches!(self, Self::Constructor)
    }

    #[inline]
    pub const fn is_accessor(self) -> bool {
        matches!(self, Self::PropertyGet | Self::PropertySet)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Method => "method",
            Self::Constructor => "constructor",
            Self::PropertyGet => "property getter",
            Self::PropertySet => "property setter",
        }
    }
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
