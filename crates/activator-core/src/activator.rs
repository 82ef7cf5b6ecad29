use crate::{
    cache::FactoryCache,
    config::ActivatorConfig,
    error::ActivationError,
    key::{ArgumentSlot, SignatureKey, Slots},
    metrics::{ActivatorMetrics, CacheStat},
    resolver::{CompiledFactory, Invoke, ResolverService},
};
use activator_types::{ObjectRef, StaticType, TypeDescription, Value};
use activator_utils::sync::Arc;
use smallvec::SmallVec;

/// Inline argument storage for the fixed-arity path.
pub type Arguments = SmallVec<[Value; 4]>;

/// Fixed-size, statically typed argument lists accepted by
/// [`Activator::construct_with`].
///
/// Each position is keyed by its Rust type rather than by its value, so a
/// `None::<&str>` still selects a `String` parameter.
pub trait IntoArguments {
    fn argument_slots() -> Slots;

    fn into_arguments(self) -> Arguments;
}

impl IntoArguments for () {
    fn argument_slots() -> Slots {
        SmallVec::new()
    }

    fn into_arguments(self) -> Arguments {
        SmallVec::new()
    }
}

macro_rules! tuple_arguments {
    ($($name:ident),+) => {
        impl<$($name: Into<Value> + StaticType),+> IntoArguments for ($($name,)+) {
            fn argument_slots() -> Slots {
                let mut slots = Slots::new();
                $(slots.push(ArgumentSlot::Known($name::static_type()));)+
                slots
            }

            #[allow(non_snake_case)]
            fn into_arguments(self) -> Arguments {
                let ($($name,)+) = self;
                let mut args = Arguments::new();
                $(args.push($name.into());)+
                args
            }
        }
    };
}

tuple_arguments!(A);
tuple_arguments!(A, B);
tuple_arguments!(A, B, C);

/// Entry point for dynamic construction.
///
/// Every surface computes a [`SignatureKey`] from the target type and the
/// argument shape, then reuses the factory cached for that key, resolving
/// and compiling one only on the first call with a given shape.
pub struct Activator {
    config: ActivatorConfig,
    cache: FactoryCache,
    metrics: ActivatorMetrics,
}

impl Activator {
    pub fn new() -> Self {
        Self::with_config(ActivatorConfig::default())
    }

    pub fn with_config(config: ActivatorConfig) -> Self {
        Self {
            config,
            cache: FactoryCache::new(),
            metrics: ActivatorMetrics::new(),
        }
    }

    pub fn config(&self) -> &ActivatorConfig {
        &self.config
    }

    /// `None` when metrics collection is disabled.
    pub fn metrics(&self) -> Option<&ActivatorMetrics> {
        self.config.collect_metrics.then_some(&self.metrics)
    }

    pub fn cache(&self) -> &FactoryCache {
        &self.cache
    }

    pub fn resolver(&self) -> ResolverService<'_> {
        ResolverService::new(self.metrics())
    }

    pub fn factory_for_key(
        &self,
        key: &SignatureKey,
    ) -> Result<Arc<CompiledFactory>, ActivationError> {
        let resolver = self.resolver();
        self.cache
            .get_or_create(key, self.metrics(), |k| resolver.build_factory(k))
    }

    /// The factory for this call shape, for callers that construct many
    /// instances of one shape.
    pub fn factory_for(
        &self,
        ty: &TypeDescription,
        args: &[Value],
    ) -> Result<Arc<CompiledFactory>, ActivationError> {
        self.factory_for_key(&SignatureKey::new(ty, args))
    }

    pub fn construct(
        &self,
        ty: &TypeDescription,
        args: &[Value],
    ) -> Result<ObjectRef, ActivationError> {
        self.factory_for(ty, args)?.invoke(args)
    }

    /// Like [`construct`](Self::construct) for up to three arguments given
    /// as a tuple, e.g. `activator.construct_with(&ty, ("x", 5))`. The
    /// constructor is chosen by the tuple's element types, so null arguments
    /// written as `None::<T>` keep the type `T`.
    pub fn construct_with<A: IntoArguments>(
        &self,
        ty: &TypeDescription,
        args: A,
    ) -> Result<ObjectRef, ActivationError> {
        let key = SignatureKey::from_slots(ty, A::argument_slots());
        let factory = self.factory_for_key(&key)?;
        factory.invoke(&args.into_arguments())
    }

    /// Counters are zero when metrics collection is disabled.
    pub fn cache_stats(&self) -> CacheStat {
        self.metrics.cache_statistics(self.cache.len())
    }
}

impl Default for Activator {
    fn default() -> Self {
        Self::new()
    }
}
