use crate::{error::TypeResolutionError, TypeDescription, TypeResolver};
use dashmap::{mapref::entry::Entry, DashMap};

/// Name-indexed set of registered types.
#[derive(Default)]
pub struct TypeRegistry {
    types: DashMap<String, TypeDescription>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, td: TypeDescription) -> Result<TypeDescription, TypeResolutionError> {
        match self.types.entry(td.type_name()) {
            Entry::Occupied(e) => Err(TypeResolutionError::DuplicateType(e.key().clone())),
            Entry::Vacant(e) => Ok(e.insert(td).clone()),
        }
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Full names of every registered type, sorted.
    pub fn type_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.types.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }
}

impl TypeResolver for TypeRegistry {
    fn locate_type(&self, full_name: &str) -> Result<TypeDescription, TypeResolutionError> {
        self.types
            .get(full_name)
            .map(|e| e.value().clone())
            .ok_or_else(|| TypeResolutionError::TypeNotFound(full_name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TypeBuilder;

    #[test]
    fn test_register_and_locate() {
        let registry = TypeRegistry::new();
        let td = registry
            .register(TypeBuilder::class("Tests", "Widget").build().unwrap())
            .unwrap();
        assert_eq!(registry.locate_type("Tests.Widget"), Ok(td));
        assert_eq!(
            registry.locate_type("Tests.Gadget"),
            Err(TypeResolutionError::TypeNotFound("Tests.Gadget".to_string()))
        );
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let registry = TypeRegistry::new();
        registry
            .register(TypeBuilder::class("Tests", "Widget").build().unwrap())
            .unwrap();
        let err = registry
            .register(TypeBuilder::class("Tests", "Widget").build().unwrap())
            .err();
        assert_eq!(
            err,
            Some(TypeResolutionError::DuplicateType("Tests.Widget".to_string()))
        );
    }
}
