//! Constructor resolution and factory compilation.
//!
//! This module provides the [`ResolverService`], which turns a
//! [`SignatureKey`] into a [`CompiledFactory`]. It runs only on factory cache
//! misses; everything it produces is cached by the caller.
//!
//! # Resolution Process
//!
//! 1. **Candidate selection**: public constructors whose arity equals the
//!    key's arity and whose parameters accept every known argument type.
//! 2. **Disambiguation**: without null arguments, an exact match wins, then
//!    the single most specific candidate. With null arguments exactly one
//!    candidate must remain, since a null carries no type to choose by.
//! 3. **Compilation**: the chosen constructor is bound into a factory with a
//!    pre-allocated default instance and a per-position conversion plan.
//!
//! Failures at any step are returned to the caller and never cached.
use crate::{error::ActivationError, key::SignatureKey, metrics::ActivatorMetrics};
use std::time::Instant;

mod constructors;
mod factory;

pub use constructors::ResolvedConstructor;
pub use factory::{
    ArgumentStep, CoercingFactory, CompiledFactory, DirectFactory, FactoryCore, Invoke,
    NullaryFactory,
};

/// Service for resolving constructors and compiling factories.
pub struct ResolverService<'a> {
    metrics: Option<&'a ActivatorMetrics>,
}

impl<'a> ResolverService<'a> {
    pub fn new(metrics: Option<&'a ActivatorMetrics>) -> Self {
        Self { metrics }
    }

    /// Resolve then compile; the unit of work the factory cache runs once
    /// per key.
    pub fn build_factory(&self, key: &SignatureKey) -> Result<CompiledFactory, ActivationError> {
        let started = Instant::now();
        let result = self
            .resolve_constructor(key)
            .and_then(|resolved| self.compile(&resolved));

        match &result {
            Ok(factory) => {
                tracing::debug!(
                    "built factory for {} using {:?} in {:?}",
                    key,
                    factory.constructor(),
                    started.elapsed()
                );
                if let Some(metrics) = self.metrics {
                    metrics.record_factory_build(started.elapsed());
                }
            }
            Err(e) => {
                tracing::warn!("failed to build factory for {}: {}", key, e);
                if let Some(metrics) = self.metrics {
                    metrics.record_factory_build_failure();
                }
            }
        }
        result
    }
}
