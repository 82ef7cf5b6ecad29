use crate::{
    object::{Object, ObjectRef},
    value::{DateTime, Value},
    TypeDescription,
};
use std::fmt::{self, Debug, Display, Formatter};

runtime_type_impls! {
    simple_types: {
        Boolean => "Boolean", value_type: true, default: Value::Boolean(false),
        Char => "Char", value_type: true, default: Value::Char('\0'),
        Int8 => "SByte", value_type: true, default: Value::Int8(0),
        UInt8 => "Byte", value_type: true, default: Value::UInt8(0),
        Int16 => "Int16", value_type: true, default: Value::Int16(0),
        UInt16 => "UInt16", value_type: true, default: Value::UInt16(0),
        Int32 => "Int32", value_type: true, default: Value::Int32(0),
        UInt32 => "UInt32", value_type: true, default: Value::UInt32(0),
        Int64 => "Int64", value_type: true, default: Value::Int64(0),
        UInt64 => "UInt64", value_type: true, default: Value::UInt64(0),
        Float32 => "Single", value_type: true, default: Value::Float32(0.0),
        Float64 => "Double", value_type: true, default: Value::Float64(0.0),
        DateTime => "DateTime", value_type: true, default: Value::DateTime(DateTime::MIN),
        String => "String", value_type: false, default: Value::Null,
        Object => "Object", value_type: false, default: Value::Null,
    },
    complex_types: {
        Nullable(Box<RuntimeType>),
        Type(TypeDescription),
    },
    get_name: {
        RuntimeType::Nullable(inner) => format!("{}?", inner.get_name()),
        RuntimeType::Type(td) => td.type_name(),
    },
    is_value_type: {
        RuntimeType::Nullable(_) => true,
        RuntimeType::Type(td) => td.is_value_type(),
    },
    default_value: {
        RuntimeType::Nullable(_) => Value::Null,
        RuntimeType::Type(td) => {
            if td.is_value_type() {
                Value::Object(ObjectRef::new(Object::new(td.clone())))
            } else {
                Value::Null
            }
        },
    }
}

impl RuntimeType {
    pub fn nullable(inner: RuntimeType) -> Self {
        RuntimeType::Nullable(Box::new(inner))
    }

    /// Whether a slot of this type can hold a null value.
    pub fn accepts_null(&self) -> bool {
        match self {
            RuntimeType::String | RuntimeType::Object | RuntimeType::Nullable(_) => true,
            RuntimeType::Type(td) => !td.is_value_type(),
            _ => false,
        }
    }

    pub fn as_type_description(&self) -> Option<&TypeDescription> {
        match self {
            RuntimeType::Type(td) => Some(td),
            _ => None,
        }
    }
}

impl From<TypeDescription> for RuntimeType {
    fn from(td: TypeDescription) -> Self {
        RuntimeType::Type(td)
    }
}

impl Debug for RuntimeType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get_name())
    }
}

impl Display for RuntimeType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get_name())
    }
}
