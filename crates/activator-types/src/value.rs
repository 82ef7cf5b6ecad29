use crate::{object::ObjectRef, runtime::RuntimeType};
use std::{
    fmt::{self, Debug, Display, Formatter},
    sync::Arc,
};

/// A point in time, stored as 100-nanosecond ticks since 0001-01-01.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct DateTime {
    ticks: i64,
}

impl DateTime {
    pub const MIN: Self = Self { ticks: 0 };
    pub const MAX: Self = Self {
        ticks: 3_155_378_975_999_999_999,
    };

    /// Returns `None` when `ticks` falls outside `MIN..=MAX`.
    pub const fn from_ticks(ticks: i64) -> Option<Self> {
        if ticks < Self::MIN.ticks || ticks > Self::MAX.ticks {
            None
        } else {
            Some(Self { ticks })
        }
    }

    pub const fn ticks(self) -> i64 {
        self.ticks
    }
}

impl Display for DateTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.ticks)
    }
}

/// A dynamically-typed argument or field value.
///
/// `Null` carries no runtime type; every other variant reports one through
/// [`Value::runtime_type`].
#[derive(Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Char(char),
    Int8(i8),
    UInt8(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    DateTime(DateTime),
    String(Arc<str>),
    Object(ObjectRef),
}

impl Value {
    pub fn runtime_type(&self) -> Option<RuntimeType> {
        Some(match self {
            Value::Null => return None,
            Value::Boolean(_) => RuntimeType::Boolean,
            Value::Char(_) => RuntimeType::Char,
            Value::Int8(_) => RuntimeType::Int8,
            Value::UInt8(_) => RuntimeType::UInt8,
            Value::Int16(_) => RuntimeType::Int16,
            Value::UInt16(_) => RuntimeType::UInt16,
            Value::Int32(_) => RuntimeType::Int32,
            Value::UInt32(_) => RuntimeType::UInt32,
            Value::Int64(_) => RuntimeType::Int64,
            Value::UInt64(_) => RuntimeType::UInt64,
            Value::Float32(_) => RuntimeType::Float32,
            Value::Float64(_) => RuntimeType::Float64,
            Value::DateTime(_) => RuntimeType::DateTime,
            Value::String(_) => RuntimeType::String,
            Value::Object(o) => RuntimeType::Type(o.description.clone()),
        })
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int32(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_date_time(&self) -> Option<DateTime> {
        match self {
            Value::DateTime(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Char(c) => write!(f, "{:?}", c),
            Value::Int8(i) => write!(f, "{}i8", i),
            Value::UInt8(i) => write!(f, "{}u8", i),
            Value::Int16(i) => write!(f, "{}i16", i),
            Value::UInt16(i) => write!(f, "{}u16", i),
            Value::Int32(i) => write!(f, "{}", i),
            Value::UInt32(i) => write!(f, "{}u32", i),
            Value::Int64(i) => write!(f, "{}L", i),
            Value::UInt64(i) => write!(f, "{}u64", i),
            Value::Float32(x) => write!(f, "{}f", x),
            Value::Float64(x) => write!(f, "{}", x),
            Value::DateTime(d) => write!(f, "{}", d),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Object(o) => write!(f, "{:?}", o),
        }
    }
}

/// The declared type of a Rust value used as a typed constructor argument.
///
/// Unlike [`Value::runtime_type`], this is known even when the value is
/// `None`: `Option<&str>` is `String` and `Option<i32>` is `Int32?`.
pub trait StaticType {
    fn static_type() -> RuntimeType;
}

// `Value` and `RuntimeType` share variant names for every primitive.
macro_rules! value_from {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::$variant(v)
                }
            }

            impl StaticType for $t {
                fn static_type() -> RuntimeType {
                    RuntimeType::$variant
                }
            }
        )*
    };
}

value_from! {
    bool => Boolean,
    char => Char,
    i8 => Int8,
    u8 => UInt8,
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    i64 => Int64,
    u64 => UInt64,
    f32 => Float32,
    f64 => Float64,
    DateTime => DateTime,
    Arc<str> => String,
    ObjectRef => Object,
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(Arc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(Arc::from(s))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl StaticType for &str {
    fn static_type() -> RuntimeType {
        RuntimeType::String
    }
}

impl StaticType for String {
    fn static_type() -> RuntimeType {
        RuntimeType::String
    }
}

impl<T: StaticType> StaticType for Option<T> {
    fn static_type() -> RuntimeType {
        match T::static_type() {
            RuntimeType::Nullable(inner) => RuntimeType::Nullable(inner),
            inner if inner.is_value_type() => RuntimeType::nullable(inner),
            inner => inner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_has_no_runtime_type() {
        assert_eq!(Value::Null.runtime_type(), None);
        assert_eq!(Value::from(None::<&str>), Value::Null);
    }

    #[test]
    fn test_runtime_types() {
        assert_eq!(Value::from("x").runtime_type(), Some(RuntimeType::String));
        assert_eq!(Value::from(5).runtime_type(), Some(RuntimeType::Int32));
        assert_eq!(Value::from(5i64).runtime_type(), Some(RuntimeType::Int64));
        assert_eq!(
            Value::from(DateTime::MAX).runtime_type(),
            Some(RuntimeType::DateTime)
        );
    }

    #[test]
    fn test_static_types_survive_none() {
        assert_eq!(<Option<&str>>::static_type(), RuntimeType::String);
        assert_eq!(
            <Option<i32>>::static_type(),
            RuntimeType::nullable(RuntimeType::Int32)
        );
        assert_eq!(<Option<Option<i32>>>::static_type(), <Option<i32>>::static_type());
        assert_eq!(ObjectRef::static_type(), RuntimeType::Object);
        assert_eq!(DateTime::static_type(), RuntimeType::DateTime);
    }

    #[test]
    fn test_date_time_bounds() {
        assert_eq!(DateTime::from_ticks(0), Some(DateTime::MIN));
        assert_eq!(DateTime::from_ticks(-1), None);
        assert_eq!(DateTime::from_ticks(DateTime::MAX.ticks() + 1), None);
    }
}
