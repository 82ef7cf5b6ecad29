//! # activator-types
//!
//! Runtime representation of constructible types, their constructors and
//! fields, and the dynamic values passed to and produced by construction.
//!
//! ## Core Types
//!
//! - **[`TypeDescription`]**: Identity of a registered type.
//! - **[`ConstructorDescription`](members::ConstructorDescription)**: One declared constructor.
//! - **[`RuntimeType`](runtime::RuntimeType)**: The type of a value, parameter or field.
//! - **[`Value`](value::Value)**: A dynamically-typed argument or field value.
//! - **[`ObjectRef`](object::ObjectRef)**: Handle to a constructed instance.
//! - **[`TypeComparer`](comparer::TypeComparer)**: Handles type equality and assignability.
use crate::members::{ConstructorDefinition, ConstructorDescription, FieldDefinition};
use activator_utils::FieldIndex;
use std::{
    fmt::{self, Debug, Formatter},
    hash::{Hash, Hasher},
    sync::Arc,
};

#[macro_use]
mod macros;

pub mod builder;
pub mod comparer;
pub mod error;
pub mod members;
pub mod object;
pub mod registry;
pub mod runtime;
pub mod storage;
pub mod value;

pub use builder::TypeBuilder;
pub use object::{Object, ObjectRef};
pub use runtime::RuntimeType;
pub use value::{DateTime, StaticType, Value};

pub trait TypeResolver {
    fn locate_type(&self, full_name: &str) -> Result<TypeDescription, error::TypeResolutionError>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    ValueType,
}

pub struct TypeDefinition {
    pub namespace: Option<String>,
    pub name: String,
    pub kind: TypeKind,
    pub is_abstract: bool,
    pub extends: Option<TypeDescription>,
    /// All instance fields, inherited ones first.
    pub fields: Vec<FieldDefinition>,
    pub constructors: Vec<ConstructorDefinition>,
}

impl TypeDefinition {
    pub fn full_name(&self) -> String {
        match self.namespace.as_deref() {
            Some(ns) if !ns.is_empty() => format!("{}.{}", ns, self.name),
            _ => self.name.clone(),
        }
    }
}

/// Shared, immutable handle to a [`TypeDefinition`]. Two descriptions are
/// equal only if they refer to the same definition.
#[derive(Clone)]
pub struct TypeDescription(Arc<TypeDefinition>);

impl TypeDescription {
    pub(crate) fn new(definition: TypeDefinition) -> Self {
        Self(Arc::new(definition))
    }

    pub fn definition(&self) -> &TypeDefinition {
        &self.0
    }

    pub fn type_name(&self) -> String {
        self.0.full_name()
    }

    pub fn is_value_type(&self) -> bool {
        self.0.kind == TypeKind::ValueType
    }

    pub fn is_abstract(&self) -> bool {
        self.0.is_abstract
    }

    pub fn field_index(&self, name: &str) -> Option<FieldIndex> {
        self.0
            .fields
            .iter()
            .position(|f| f.name == name)
            .map(FieldIndex::new)
    }

    pub fn constructors(&self) -> impl Iterator<Item = ConstructorDescription> + '_ {
        (0..self.0.constructors.len()).map(move |index| ConstructorDescription {
            parent: self.clone(),
            index,
        })
    }

    /// This type followed by each base type, most derived first.
    pub fn ancestors(&self) -> impl Iterator<Item = &TypeDescription> {
        std::iter::successors(Some(self), |td| td.0.extends.as_ref())
    }

    pub fn is_a(&self, ancestor: &TypeDescription) -> bool {
        self.ancestors().any(|a| a == ancestor)
    }
}

impl Debug for TypeDescription {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

impl PartialEq for TypeDescription {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for TypeDescription {}

impl Hash for TypeDescription {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.0) as *const () as usize).hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_equality() {
        let a = TypeBuilder::class("Tests", "Same").build().unwrap();
        let b = TypeBuilder::class("Tests", "Same").build().unwrap();
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert_eq!(a.type_name(), "Tests.Same");
    }

    #[test]
    fn test_ancestors() {
        let animal = TypeBuilder::class("Tests", "Animal").build().unwrap();
        let dog = TypeBuilder::class("Tests", "Dog")
            .extends(&animal)
            .build()
            .unwrap();
        let names: Vec<_> = dog.ancestors().map(|t| t.type_name()).collect();
        assert_eq!(names, ["Tests.Dog", "Tests.Animal"]);
        assert!(dog.is_a(&animal));
        assert!(!animal.is_a(&dog));
    }
}
