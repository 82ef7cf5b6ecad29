use crate::{members::FieldDefinition, value::Value};
use activator_utils::FieldIndex;

/// Instance field values of one object, laid out in declaration order with
/// inherited fields first.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldStorage {
    values: Vec<Value>,
}

impl FieldStorage {
    pub fn new(fields: &[FieldDefinition]) -> Self {
        Self {
            values: fields.iter().map(|f| f.ty.default_value()).collect(),
        }
    }

    pub fn get(&self, index: FieldIndex) -> Option<&Value> {
        self.values.get(index.as_usize())
    }

    /// Returns the value previously held by the slot, or `None` if `index` is
    /// out of range.
    pub fn set(&mut self, index: FieldIndex, value: Value) -> Option<Value> {
        self.values
            .get_mut(index.as_usize())
            .map(|slot| std::mem::replace(slot, value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.values.iter()
    }
}
