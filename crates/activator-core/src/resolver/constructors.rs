use crate::{
    error::ActivationError,
    key::{ArgumentSlot, SignatureKey},
    resolver::ResolverService,
};
use activator_types::{
    comparer::TypeComparer, members::ConstructorDescription, RuntimeType,
};

/// The constructor chosen for one [`SignatureKey`].
#[derive(Clone, Debug)]
pub struct ResolvedConstructor {
    pub constructor: ConstructorDescription,
    /// Argument slots as recorded in the key.
    pub arguments: Vec<ArgumentSlot>,
    /// The type at each position: the argument's own type where known, the
    /// declared parameter type where the argument was null.
    pub resolved_types: Vec<RuntimeType>,
}

impl ResolvedConstructor {
    fn new(constructor: ConstructorDescription, key: &SignatureKey) -> Self {
        let resolved_types = key
            .slots()
            .iter()
            .zip(constructor.parameter_types())
            .map(|(slot, declared)| match slot {
                ArgumentSlot::Known(t) => t.clone(),
                ArgumentSlot::Unknown => declared.clone(),
            })
            .collect();
        Self {
            arguments: key.slots().to_vec(),
            resolved_types,
            constructor,
        }
    }
}

impl<'a> ResolverService<'a> {
    pub fn resolve_constructor(
        &self,
        key: &SignatureKey,
    ) -> Result<ResolvedConstructor, ActivationError> {
        let td = key.type_description();
        let candidates: Vec<ConstructorDescription> = td
            .constructors()
            .filter(|c| c.definition().is_public() && c.arity() == key.arity())
            .filter(|c| accepts_known_arguments(c, key.slots()))
            .collect();

        tracing::trace!(
            "{} candidate constructor(s) for {}: {:?}",
            candidates.len(),
            key,
            candidates
        );

        let null_arguments = key.has_unknown();
        let chosen = match candidates.len() {
            0 => None,
            1 => candidates.first().cloned(),
            // A null argument has no type to rank candidates by.
            _ if null_arguments => None,
            _ => select_best(&candidates, key.slots()),
        };

        match chosen {
            Some(ctor) => Ok(ResolvedConstructor::new(ctor, key)),
            None if candidates.is_empty() => Err(ActivationError::ConstructorNotFound {
                type_name: td.type_name(),
                signature: key.signature(),
                null_arguments,
            }),
            None => Err(ActivationError::AmbiguousConstructor {
                type_name: td.type_name(),
                signature: key.signature(),
                candidates: candidates.len(),
                null_arguments,
            }),
        }
    }
}

/// Every known argument type must be assignable to its parameter; unknown
/// positions accept any parameter type.
fn accepts_known_arguments(ctor: &ConstructorDescription, slots: &[ArgumentSlot]) -> bool {
    ctor.parameter_types()
        .zip(slots)
        .all(|(declared, slot)| match slot {
            ArgumentSlot::Known(actual) => TypeComparer::is_assignable(declared, actual),
            ArgumentSlot::Unknown => true,
        })
}

/// Picks among several fully-typed candidates: an exact match first, then
/// the unique candidate at least as specific as every other.
fn select_best(
    candidates: &[ConstructorDescription],
    slots: &[ArgumentSlot],
) -> Option<ConstructorDescription> {
    let exact = candidates.iter().find(|c| {
        c.parameter_types()
            .zip(slots)
            .all(|(declared, slot)| slot.known_type() == Some(declared))
    });
    if exact.is_some() {
        return exact.cloned();
    }

    let parameter_lists: Vec<Vec<RuntimeType>> = candidates
        .iter()
        .map(|c| c.parameter_types().cloned().collect())
        .collect();
    let mut most_specific = parameter_lists.iter().enumerate().filter(|(i, params)| {
        parameter_lists
            .iter()
            .enumerate()
            .all(|(j, other)| *i == j || TypeComparer::at_least_as_specific(params, other))
    });

    match (most_specific.next(), most_specific.next()) {
        (Some((i, _)), None) => Some(candidates[i].clone()),
        _ => None,
    }
}
