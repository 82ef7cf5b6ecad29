use crate::{storage::FieldStorage, value::Value, TypeDescription};
use activator_utils::FieldIndex;
use std::{
    fmt::{self, Debug, Formatter},
    ops::Deref,
    sync::Arc,
};

/// An instance of a registered type.
#[derive(Clone, PartialEq)]
pub struct Object {
    pub description: TypeDescription,
    pub instance_storage: FieldStorage,
}

impl Object {
    /// Allocates an instance with every field at its default value.
    pub fn new(description: TypeDescription) -> Self {
        let instance_storage = FieldStorage::new(&description.definition().fields);
        Self {
            description,
            instance_storage,
        }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        let index = self.description.field_index(name)?;
        self.instance_storage.get(index)
    }

    pub fn field_at(&self, index: FieldIndex) -> Option<&Value> {
        self.instance_storage.get(index)
    }

    pub fn set_field(&mut self, name: &str, value: Value) -> Option<Value> {
        let index = self.description.field_index(name)?;
        self.instance_storage.set(index, value)
    }

    pub fn set_field_at(&mut self, index: FieldIndex, value: Value) -> Option<Value> {
        self.instance_storage.set(index, value)
    }
}

impl Debug for Object {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(&self.description.type_name());
        for (def, value) in self
            .description
            .definition()
            .fields
            .iter()
            .zip(self.instance_storage.iter())
        {
            s.field(&def.name, value);
        }
        s.finish()
    }
}

/// Shared handle to a constructed instance.
///
/// Value-type instances are boxed into the same handle, so every
/// construction returns an `ObjectRef` regardless of the type's kind.
/// Equality is identity.
#[derive(Clone)]
pub struct ObjectRef(Arc<Object>);

impl ObjectRef {
    pub fn new(object: Object) -> Self {
        Self(Arc::new(object))
    }

    pub fn is_boxed(&self) -> bool {
        self.0.description.is_value_type()
    }

    /// Returns the object if this is the only handle to it.
    pub fn try_unwrap(self) -> Result<Object, Self> {
        Arc::try_unwrap(self.0).map_err(Self)
    }
}

impl Deref for ObjectRef {
    type Target = Object;
    fn deref(&self) -> &Object {
        &self.0
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for ObjectRef {}

impl Debug for ObjectRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&*self.0, f)
    }
}
