//! # activator-core
//!
//! Cached dynamic construction. Given a [`TypeDescription`] and a list of
//! runtime [`Value`]s, the engine finds the matching public constructor,
//! compiles a reusable factory for it and caches that factory under a
//! [`SignatureKey`] made of the type and the argument types. Later calls
//! with the same shape skip resolution and compilation entirely.
//!
//! ## Architecture
//!
//! - **[`key`]**: [`SignatureKey`] from a type and argument shape; null
//!   arguments are recorded as unknown positions.
//! - **[`resolver`]**: [`ResolverService`](resolver::ResolverService) picks a
//!   constructor and compiles a [`CompiledFactory`].
//! - **[`cache`]**: [`FactoryCache`](cache::FactoryCache), at most one build
//!   per key under concurrent first access.
//! - **[`Activator`]**: the facade tying the three together, with
//!   [`ActivatorMetrics`](metrics::ActivatorMetrics) counters.
//!
//! ## Example
//!
//! ```
//! use activator_core::Activator;
//! use activator_types::{RuntimeType, TypeBuilder, Value};
//!
//! let point = TypeBuilder::class("Geometry", "Point")
//!     .field("Name", RuntimeType::String)
//!     .field("X", RuntimeType::Int32)
//!     .constructor([("name", RuntimeType::String), ("x", RuntimeType::Int32)])
//!     .build()
//!     .unwrap();
//!
//! let activator = Activator::new();
//! let p = activator.construct(&point, &["x".into(), 5.into()]).unwrap();
//! assert_eq!(p.field("X"), Some(&Value::Int32(5)));
//! ```
use activator_types::{ObjectRef, TypeDescription, Value};
use once_cell::sync::Lazy;

pub mod activator;
pub mod cache;
pub mod config;
pub mod error;
pub mod key;
pub mod metrics;
pub mod resolver;

pub use activator::{Activator, IntoArguments};
pub use config::ActivatorConfig;
pub use error::ActivationError;
pub use key::SignatureKey;
pub use metrics::CacheStat;
pub use resolver::{CompiledFactory, Invoke};

static GLOBAL: Lazy<Activator> = Lazy::new(|| Activator::with_config(ActivatorConfig::from_env()));

/// The process-wide activator, configured from the environment on first use.
pub fn global() -> &'static Activator {
    &GLOBAL
}

/// Constructs through the process-wide activator.
pub fn create_instance(ty: &TypeDescription, args: &[Value]) -> Result<ObjectRef, ActivationError> {
    global().construct(ty, args)
}

pub trait CreateInstanceExt {
    fn create_instance(&self, args: &[Value]) -> Result<ObjectRef, ActivationError>;
}

impl CreateInstanceExt for TypeDescription {
    fn create_instance(&self, args: &[Value]) -> Result<ObjectRef, ActivationError> {
        create_instance(self, args)
    }
}
