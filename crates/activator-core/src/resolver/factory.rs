use crate::{
    error::ActivationError,
    key::ArgumentSlot,
    resolver::{ResolvedConstructor, ResolverService},
};
use activator_types::{
    comparer::{Conversion, TypeComparer},
    members::ConstructorDescription,
    Object, ObjectRef, RuntimeType, Value,
};
use activator_utils::ArgumentIndex;
use enum_dispatch::enum_dispatch;
use smallvec::SmallVec;

/// What the factory does with one argument before handing it to the
/// constructor body. Planned once per factory.
#[derive(Clone, Debug, PartialEq)]
pub enum ArgumentStep {
    Convert(Conversion),
    /// Null into a slot that accepts null.
    PassNull,
    /// Null into a non-nullable value-type slot; every invocation fails.
    RejectNull { expected: RuntimeType },
}

impl ArgumentStep {
    fn plan(declared: &RuntimeType, slot: &ArgumentSlot) -> Option<Self> {
        match slot {
            ArgumentSlot::Known(actual) => {
                TypeComparer::conversion(declared, actual).map(ArgumentStep::Convert)
            }
            ArgumentSlot::Unknown if declared.accepts_null() => Some(ArgumentStep::PassNull),
            ArgumentSlot::Unknown => Some(ArgumentStep::RejectNull {
                expected: declared.clone(),
            }),
        }
    }

    /// Steps that leave the argument untouched.
    fn is_pass_through(&self) -> bool {
        matches!(
            self,
            ArgumentStep::Convert(Conversion::Identity | Conversion::Upcast | Conversion::WrapNullable)
                | ArgumentStep::PassNull
        )
    }
}

/// State shared by every factory variant: the bound constructor, a
/// default-initialised instance to copy from, and the argument plan.
#[derive(Debug)]
pub struct FactoryCore {
    constructor: ConstructorDescription,
    template: Object,
    resolved_types: Box<[RuntimeType]>,
    plan: Box<[ArgumentStep]>,
}

impl FactoryCore {
    pub fn constructor(&self) -> &ConstructorDescription {
        &self.constructor
    }

    pub fn arity(&self) -> usize {
        self.plan.len()
    }

    pub fn plan(&self) -> &[ArgumentStep] {
        &self.plan
    }

    pub fn resolved_types(&self) -> &[RuntimeType] {
        &self.resolved_types
    }

    fn check_arity(&self, args: &[Value]) -> Result<(), ActivationError> {
        if args.len() != self.arity() {
            return Err(ActivationError::ArityMismatch {
                constructor: format!("{:?}", self.constructor),
                expected: self.arity(),
                actual: args.len(),
            });
        }
        Ok(())
    }

    #[inline]
    fn instantiate(&self, args: &[Value]) -> ObjectRef {
        let mut instance = self.template.clone();
        self.constructor.definition().body.apply(&mut instance, args);
        ObjectRef::new(instance)
    }
}

#[enum_dispatch]
pub trait Invoke {
    fn core(&self) -> &FactoryCore;

    /// Creates a new instance from arguments of the shape this factory was
    /// built for.
    fn invoke(&self, args: &[Value]) -> Result<ObjectRef, ActivationError>;
}

/// Parameterless constructors.
#[derive(Debug)]
pub struct NullaryFactory(FactoryCore);

impl Invoke for NullaryFactory {
    fn core(&self) -> &FactoryCore {
        &self.0
    }

    fn invoke(&self, args: &[Value]) -> Result<ObjectRef, ActivationError> {
        self.0.check_arity(args)?;
        Ok(self.0.instantiate(&[]))
    }
}

/// Every argument is passed through unchanged.
#[derive(Debug)]
pub struct DirectFactory(FactoryCore);

impl Invoke for DirectFactory {
    fn core(&self) -> &FactoryCore {
        &self.0
    }

    fn invoke(&self, args: &[Value]) -> Result<ObjectRef, ActivationError> {
        self.0.check_arity(args)?;
        Ok(self.0.instantiate(args))
    }
}

/// At least one argument needs work: boxing copies a value-type instance
/// into a fresh handle, and a rejected null fails the call.
#[derive(Debug)]
pub struct CoercingFactory(FactoryCore);

impl Invoke for CoercingFactory {
    fn core(&self) -> &FactoryCore {
        &self.0
    }

    fn invoke(&self, args: &[Value]) -> Result<ObjectRef, ActivationError> {
        self.0.check_arity(args)?;
        let mut coerced: SmallVec<[Value; 4]> = SmallVec::with_capacity(args.len());
        for (i, (step, arg)) in self.0.plan.iter().zip(args).enumerate() {
            let value = match step {
                ArgumentStep::Convert(Conversion::Box) => match arg {
                    Value::Object(boxed) => Value::Object(ObjectRef::new(Object::clone(boxed))),
                    other => other.clone(),
                },
                ArgumentStep::RejectNull { expected } => {
                    return Err(ActivationError::InvalidArgument {
                        constructor: format!("{:?}", self.0.constructor),
                        position: ArgumentIndex::new(i),
                        expected: expected.to_string(),
                        actual: "null".to_string(),
                    });
                }
                _ => arg.clone(),
            };
            coerced.push(value);
        }
        Ok(self.0.instantiate(&coerced))
    }
}

/// A reusable construction path bound to one resolved constructor.
#[enum_dispatch(Invoke)]
#[derive(Debug)]
pub enum CompiledFactory {
    NullaryFactory,
    DirectFactory,
    CoercingFactory,
}

impl CompiledFactory {
    pub fn constructor(&self) -> &ConstructorDescription {
        self.core().constructor()
    }

    pub fn arity(&self) -> usize {
        self.core().arity()
    }

    pub fn kind(&self) -> &'static str {
        match self {
            CompiledFactory::NullaryFactory(_) => "nullary",
            CompiledFactory::DirectFactory(_) => "direct",
            CompiledFactory::CoercingFactory(_) => "coercing",
        }
    }
}

impl<'a> ResolverService<'a> {
    pub fn compile(&self, resolved: &ResolvedConstructor) -> Result<CompiledFactory, ActivationError> {
        let constructor = resolved.constructor.clone();
        let td = &constructor.parent;
        if td.is_abstract() {
            return Err(ActivationError::NotConstructible {
                type_name: td.type_name(),
                reason: "type is abstract".to_string(),
            });
        }

        let plan = constructor
            .parameter_types()
            .zip(&resolved.arguments)
            .enumerate()
            .map(|(i, (declared, slot))| {
                ArgumentStep::plan(declared, slot).ok_or_else(|| ActivationError::InvalidArgument {
                    constructor: format!("{:?}", constructor),
                    position: ArgumentIndex::new(i),
                    expected: declared.to_string(),
                    actual: format!("{:?}", slot),
                })
            })
            .collect::<Result<Box<[_]>, _>>()?;

        let core = FactoryCore {
            template: Object::new(td.clone()),
            resolved_types: resolved.resolved_types.clone().into_boxed_slice(),
            constructor,
            plan,
        };

        let factory: CompiledFactory = if core.plan.is_empty() {
            NullaryFactory(core).into()
        } else if core.plan.iter().all(ArgumentStep::is_pass_through) {
            DirectFactory(core).into()
        } else {
            CoercingFactory(core).into()
        };
        tracing::trace!("compiled {} factory for {:?}", factory.kind(), factory.constructor());
        Ok(factory)
    }
}
