use crate::{object::Object, runtime::RuntimeType, value::Value, TypeDescription};
use activator_utils::FieldIndex;
use std::{
    fmt::{self, Debug, Formatter},
    hash::{Hash, Hasher},
    sync::Arc,
};

#[derive(Clone, Debug, PartialEq)]
pub struct FieldDefinition {
    pub name: String,
    pub ty: RuntimeType,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub ty: RuntimeType,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: RuntimeType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Accessibility {
    #[default]
    Public,
    NonPublic,
}

pub type CustomBody = Arc<dyn Fn(&mut Object, &[Value]) + Send + Sync>;

/// What a constructor does with its arguments once the instance has been
/// allocated with default field values.
#[derive(Clone)]
pub enum ConstructorBody {
    /// Argument `i` is stored into field `assignments[i]`.
    Assign(Arc<[FieldIndex]>),
    Custom(CustomBody),
}

impl ConstructorBody {
    #[inline]
    pub fn apply(&self, this: &mut Object, args: &[Value]) {
        match self {
            ConstructorBody::Assign(assignments) => {
                for (field, arg) in assignments.iter().zip(args) {
                    this.set_field_at(*field, arg.clone());
                }
            }
            ConstructorBody::Custom(body) => body(this, args),
        }
    }
}

impl Debug for ConstructorBody {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ConstructorBody::Assign(a) => f.debug_tuple("Assign").field(a).finish(),
            ConstructorBody::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ConstructorDefinition {
    pub parameters: Vec<Parameter>,
    pub accessibility: Accessibility,
    pub body: ConstructorBody,
}

impl ConstructorDefinition {
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_public(&self) -> bool {
        self.accessibility == Accessibility::Public
    }
}

/// A constructor identified by its declaring type and declaration index.
#[derive(Clone)]
pub struct ConstructorDescription {
    pub parent: TypeDescription,
    pub index: usize,
}

impl ConstructorDescription {
    pub fn definition(&self) -> &ConstructorDefinition {
        &self.parent.definition().constructors[self.index]
    }

    pub fn parameter_types(&self) -> impl ExactSizeIterator<Item = &RuntimeType> {
        self.definition().parameters.iter().map(|p| &p.ty)
    }

    pub fn arity(&self) -> usize {
        self.definition().arity()
    }
}

impl Debug for ConstructorDescription {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}::.ctor(", self.parent.type_name())?;
        for (i, ty) in self.parameter_types().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", ty)?;
        }
        write!(f, ")")
    }
}

impl PartialEq for ConstructorDescription {
    fn eq(&self, other: &Self) -> bool {
        self.parent == other.parent && self.index == other.index
    }
}

impl Eq for ConstructorDescription {}

impl Hash for ConstructorDescription {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.parent.hash(state);
        self.index.hash(state);
    }
}
