//! Cache keys derived from a call's target type and argument shape.
use activator_types::{RuntimeType, TypeDescription, Value};
use smallvec::SmallVec;
use std::{
    fmt::{self, Debug, Display, Formatter},
    hash::{DefaultHasher, Hash, Hasher},
};

/// The recorded type of one argument position.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum ArgumentSlot {
    Known(RuntimeType),
    /// The argument was null, so its type could not be observed.
    Unknown,
}

impl ArgumentSlot {
    pub fn of(value: &Value) -> Self {
        value
            .runtime_type()
            .map_or(ArgumentSlot::Unknown, ArgumentSlot::Known)
    }

    pub fn known_type(&self) -> Option<&RuntimeType> {
        match self {
            ArgumentSlot::Known(t) => Some(t),
            ArgumentSlot::Unknown => None,
        }
    }
}

impl Debug for ArgumentSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentSlot::Known(t) => write!(f, "{}", t),
            ArgumentSlot::Unknown => write!(f, "null"),
        }
    }
}

pub type Slots = SmallVec<[ArgumentSlot; 4]>;

/// Identifies one call shape: the target type plus the per-position argument
/// types, with null arguments recorded as [`ArgumentSlot::Unknown`].
///
/// The hash is computed once at construction. Equality compares the hash
/// first only to reject quickly; two keys are equal only if their types and
/// every slot are equal.
#[derive(Clone)]
pub struct SignatureKey {
    ty: TypeDescription,
    slots: Slots,
    has_unknown: bool,
    hash: u64,
}

impl SignatureKey {
    pub fn new(ty: &TypeDescription, args: &[Value]) -> Self {
        Self::from_slots(ty, args.iter().map(ArgumentSlot::of))
    }

    pub fn from_slots(ty: &TypeDescription, slots: impl IntoIterator<Item = ArgumentSlot>) -> Self {
        let slots: Slots = slots.into_iter().collect();
        let has_unknown = slots.iter().any(|s| matches!(s, ArgumentSlot::Unknown));

        let mut hasher = DefaultHasher::new();
        ty.hash(&mut hasher);
        slots.len().hash(&mut hasher);
        for slot in &slots {
            slot.hash(&mut hasher);
        }

        Self {
            ty: ty.clone(),
            slots,
            has_unknown,
            hash: hasher.finish(),
        }
    }

    pub fn type_description(&self) -> &TypeDescription {
        &self.ty
    }

    pub fn slots(&self) -> &[ArgumentSlot] {
        &self.slots
    }

    pub fn arity(&self) -> usize {
        self.slots.len()
    }

    pub fn has_unknown(&self) -> bool {
        self.has_unknown
    }

    pub fn hash_value(&self) -> u64 {
        self.hash
    }

    /// The argument list rendered as `String, null, Int32`.
    pub fn signature(&self) -> String {
        self.slots
            .iter()
            .map(|s| format!("{:?}", s))
            .collect::<Vec<_>>()
            .join(", ")
    }

    #[cfg(test)]
    pub(crate) fn with_forced_hash(mut self, hash: u64) -> Self {
        self.hash = hash;
        self
    }
}

impl PartialEq for SignatureKey {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.ty == other.ty && self.slots == other.slots
    }
}

impl Eq for SignatureKey {}

impl Hash for SignatureKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl Debug for SignatureKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self.ty, self.signature())
    }
}

impl Display for SignatureKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use activator_types::TypeBuilder;

    fn widget() -> TypeDescription {
        TypeBuilder::class("Tests", "Widget").build().unwrap()
    }

    #[test]
    fn test_same_shape_same_key() {
        let td = widget();
        let a = SignatureKey::new(&td, &["x".into(), 5.into()]);
        let b = SignatureKey::new(&td, &["y".into(), 99.into()]);
        assert_eq!(a, b);
        assert_eq!(a.hash_value(), b.hash_value());
    }

    #[test]
    fn test_empty_key() {
        let key = SignatureKey::new(&widget(), &[]);
        assert_eq!(key.arity(), 0);
        assert!(!key.has_unknown());
        assert_eq!(key.signature(), "");
    }

    #[test]
    fn test_position_type_and_arity_distinguish_keys() {
        let td = widget();
        let base = SignatureKey::new(&td, &["x".into(), 5.into()]);
        assert_ne!(base, SignatureKey::new(&td, &[5.into(), "x".into()]));
        assert_ne!(base, SignatureKey::new(&td, &["x".into(), 5i64.into()]));
        assert_ne!(base, SignatureKey::new(&td, &["x".into()]));
        assert_ne!(base, SignatureKey::new(&widget(), &["x".into(), 5.into()]));
    }

    #[test]
    fn test_null_positions_are_recorded() {
        let td = widget();
        let key = SignatureKey::new(&td, &[Value::Null, 5.into()]);
        assert!(key.has_unknown());
        assert_eq!(key.slots()[0], ArgumentSlot::Unknown);
        assert_eq!(key.signature(), "null, Int32");

        let other = SignatureKey::new(&td, &["x".into(), 5.into()]);
        assert_ne!(key, other);
        assert_eq!(key, SignatureKey::new(&td, &[Value::Null, 7.into()]));
    }

    #[test]
    fn test_colliding_hashes_do_not_make_keys_equal() {
        let td = widget();
        let a = SignatureKey::new(&td, &["x".into()]).with_forced_hash(42);
        let b = SignatureKey::new(&td, &[1.into()]).with_forced_hash(42);
        assert_eq!(a.hash_value(), b.hash_value());
        assert_ne!(a, b);
    }
}
