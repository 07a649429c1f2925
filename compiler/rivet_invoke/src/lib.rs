#![allow(
    clippy::result_large_err,
    reason = "InvokeError is returned on every call path; boxing it would add an allocation per error"
)]
//! Rivet Invoke - compiled invokers for runtime-described members.
//!
//! Given a `MemberDescriptor`, `compile` produces a `CompiledInvoker` with
//! one fixed call shape for every member kind:
//!
//! ```text
//! invoke(receiver, args) -> result
//! ```
//!
//! # Architecture
//!
//! - `plan`: receiver / argument / dispatch / result steps, selected once per
//!   descriptor
//! - `compile`: descriptor → plan, with all checks that do not depend on the
//!   call's values
//! - `CompiledInvoker`: executes a plan; immutable, shareable, re-entrant
//! - `InvokerCache` / `Reflector`: at most one live invoker per member
//! - `MethodInvoker`, `ConstructorInvoker`, `PropertyInvoker`: per-kind call
//!   shapes
//!
//! # Tracing
//!
//! Set `RUST_LOG=rivet_invoke=debug` and call `init_tracing()` to see
//! compilation and cache activity; `trace` adds virtual dispatch decisions.

use std::sync::Once;

mod cache;
mod compile;
mod facade;
mod invoker;
mod options;
mod plan;
mod receiver;
mod reflector;

#[cfg(test)]
mod test_fixtures;

pub use cache::{CacheStats, InvokerCache};
pub use compile::compile;
pub use facade::{ConstructorInvoker, MethodInvoker, PropertyInvoker};
pub use invoker::CompiledInvoker;
pub use options::{CompileOptions, ConversionMode};
pub use plan::{ArgStep, DispatchStep, ReceiverStep, ResultStep};
pub use receiver::Receiver;
pub use reflector::{Reflector, ReflectorBuilder};

static TRACING_INIT: Once = Once::new();

/// Initialize the tracing subscriber.
///
/// Only installs a subscriber when `RUST_LOG` is set; calling it more than
/// once is a no-op.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
