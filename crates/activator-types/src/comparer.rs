use crate::runtime::RuntimeType;

/// How a value of one type is passed into a slot of another.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Conversion {
    Identity,
    /// Value type into an `Object` slot.
    Box,
    /// `T` into a `T?` slot.
    WrapNullable,
    /// Reference type into a slot of one of its ancestors.
    Upcast,
}

pub struct TypeComparer;

impl TypeComparer {
    pub fn types_equal(a: &RuntimeType, b: &RuntimeType) -> bool {
        a == b
    }

    pub fn type_slices_equal(a: &[RuntimeType], b: &[RuntimeType]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(a, b)| Self::types_equal(a, b))
    }

    /// The conversion that lets a value of type `source` be stored into a
    /// slot of type `target`, if there is one.
    pub fn conversion(target: &RuntimeType, source: &RuntimeType) -> Option<Conversion> {
        if Self::types_equal(target, source) {
            return Some(Conversion::Identity);
        }
        match (target, source) {
            (RuntimeType::Object, s) if s.is_value_type() => Some(Conversion::Box),
            (RuntimeType::Object, _) => Some(Conversion::Upcast),
            (RuntimeType::Nullable(inner), s) if **inner == *s => Some(Conversion::WrapNullable),
            (RuntimeType::Type(t), RuntimeType::Type(s)) if !t.is_value_type() && s.is_a(t) => {
                Some(Conversion::Upcast)
            }
            _ => None,
        }
    }

    pub fn is_assignable(target: &RuntimeType, source: &RuntimeType) -> bool {
        Self::conversion(target, source).is_some()
    }

    /// Whether every parameter in `a` is assignable to the parameter at the
    /// same position in `b`.
    pub fn at_least_as_specific(a: &[RuntimeType], b: &[RuntimeType]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(a, b)| Self::is_assignable(b, a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TypeBuilder;

    #[test]
    fn test_types_equal_primitive() {
        assert!(TypeComparer::types_equal(
            &RuntimeType::Int32,
            &RuntimeType::Int32
        ));
        assert!(!TypeComparer::types_equal(
            &RuntimeType::Int32,
            &RuntimeType::Int64
        ));
    }

    #[test]
    fn test_no_numeric_widening() {
        assert_eq!(
            TypeComparer::conversion(&RuntimeType::Int64, &RuntimeType::Int32),
            None
        );
    }

    #[test]
    fn test_object_accepts_everything() {
        assert_eq!(
            TypeComparer::conversion(&RuntimeType::Object, &RuntimeType::Int32),
            Some(Conversion::Box)
        );
        assert_eq!(
            TypeComparer::conversion(&RuntimeType::Object, &RuntimeType::String),
            Some(Conversion::Upcast)
        );
    }

    #[test]
    fn test_nullable_wraps_its_underlying_type() {
        let nullable_int = RuntimeType::nullable(RuntimeType::Int32);
        assert_eq!(
            TypeComparer::conversion(&nullable_int, &RuntimeType::Int32),
            Some(Conversion::WrapNullable)
        );
        assert!(!TypeComparer::is_assignable(
            &nullable_int,
            &RuntimeType::Int16
        ));
        assert!(!TypeComparer::is_assignable(
            &RuntimeType::Int32,
            &nullable_int
        ));
    }

    #[test]
    fn test_subclass_upcast() {
        let animal = TypeBuilder::class("Tests", "Animal").build().unwrap();
        let dog = TypeBuilder::class("Tests", "Dog")
            .extends(&animal)
            .build()
            .unwrap();
        let animal_t = RuntimeType::Type(animal);
        let dog_t = RuntimeType::Type(dog);
        assert_eq!(
            TypeComparer::conversion(&animal_t, &dog_t),
            Some(Conversion::Upcast)
        );
        assert!(!TypeComparer::is_assignable(&dog_t, &animal_t));
        assert!(TypeComparer::at_least_as_specific(
            std::slice::from_ref(&dog_t),
            std::slice::from_ref(&animal_t)
        ));
    }
}
