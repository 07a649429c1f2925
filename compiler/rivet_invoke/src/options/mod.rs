//! Compile-time options baked into every invoker.
//!
//! Invokers have no configuration surface of their own: options are read
//! once by `compile` and fixed into the plan.

/// How arguments are matched against declared parameter types.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ConversionMode {
    /// The argument's runtime type must match the parameter type.
    #[default]
    Exact,
    /// Additionally accept lossless numeric widening:
    /// `byte -> int`, `byte -> float`, and `int -> float` when the integer
    /// is exactly representable.
    Widening,
}

impl ConversionMode {
    #[inline]
    pub fn allows_widening(self) -> bool {
        matches!(self, ConversionMode::Widening)
    }
}

/// Options for `compile`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CompileOptions {
    pub conversion: ConversionMode,
    /// Bind instance members of sealed reference types directly instead of
    /// resolving the override on every call.
    pub devirtualize_sealed: bool,
}

impl CompileOptions {
    #[must_use]
    pub fn with_conversion(mut self, conversion: ConversionMode) -> Self {
        self.conversion = conversion;
        self
    }

    #[must_use]
    pub fn with_devirtualize_sealed(mut self, enabled: bool) -> Self {
        self.devirtualize_sealed = enabled;
        self
    }
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            conversion: ConversionMode::Exact,
            devirtualize_sealed: true,
        }
    }
}
