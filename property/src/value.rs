// SPDX-License-Identifier: Apache-2.0
// Copyright Vouch Project Authors

//! Closed dynamic value model.
//!
//! The engine moves property values between generators, targets and assertions without
//! knowing the target type's fields. Rather than an open `Any`-style bag, the value
//! space is a closed tagged union: every value the engine can generate, apply or
//! compare is a [`ScalarValue`], possibly wrapped in a [`CollectionValue`] of a
//! declared shape.

use std::fmt;

use crate::collection::CollectionType;

/// The element types the engine can generate and compare.
///
/// For collection-shaped properties this is the *element* type, never the container
/// type; the container shape lives in [`CollectionType`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScalarKind {
    /// UTF-8 text.
    Text,
    /// Signed 64-bit integer.
    Int,
    /// Unsigned 64-bit integer.
    Uint,
    /// Boolean.
    Bool,
    /// Opaque byte string.
    Bytes,
    /// UUID (version 4 when generated).
    Uuid,
}

impl ScalarKind {
    /// True for kinds with an implicit zero value.
    ///
    /// A property of such a kind can never be observed as "missing" on a target: an
    /// unset `Int` field reads back as `0`, not as an absent value. Required-ness
    /// proofs must skip these kinds.
    #[must_use]
    pub fn is_primitive(self) -> bool {
        matches!(self, ScalarKind::Int | ScalarKind::Uint | ScalarKind::Bool)
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarKind::Text => "text",
            ScalarKind::Int => "int",
            ScalarKind::Uint => "uint",
            ScalarKind::Bool => "bool",
            ScalarKind::Bytes => "bytes",
            ScalarKind::Uuid => "uuid",
        };
        write!(f, "{name}")
    }
}

/// One concrete value of a [`ScalarKind`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScalarValue {
    Text(String),
    Int(i64),
    Uint(u64),
    Bool(bool),
    Bytes(Vec<u8>),
    Uuid(uuid::Uuid),
}

impl ScalarValue {
    /// The kind this value belongs to.
    #[must_use]
    pub fn kind(&self) -> ScalarKind {
        match self {
            ScalarValue::Text(_) => ScalarKind::Text,
            ScalarValue::Int(_) => ScalarKind::Int,
            ScalarValue::Uint(_) => ScalarKind::Uint,
            ScalarValue::Bool(_) => ScalarKind::Bool,
            ScalarValue::Bytes(_) => ScalarKind::Bytes,
            ScalarValue::Uuid(_) => ScalarKind::Uuid,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ScalarValue::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ScalarValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_uint(&self) -> Option<u64> {
        match self {
            ScalarValue::Uint(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ScalarValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            ScalarValue::Bytes(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_uuid(&self) -> Option<uuid::Uuid> {
        match self {
            ScalarValue::Uuid(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Text(s) => write!(f, "{s:?}"),
            ScalarValue::Int(v) => write!(f, "{v}"),
            ScalarValue::Uint(v) => write!(f, "{v}"),
            ScalarValue::Bool(v) => write!(f, "{v}"),
            ScalarValue::Bytes(v) => write!(f, "bytes[{}]", v.len()),
            ScalarValue::Uuid(v) => write!(f, "{v}"),
        }
    }
}

/// An ordered sequence of scalar elements carried in a declared container shape.
///
/// The shape governs the normalization already applied to `elements` (see
/// [`CollectionType::wrap_to_iterable`]): sets are deduplicated, sorted sets are
/// deduplicated and ordered. Derived equality is therefore ordered equality;
/// order-independent comparison is a separate operation ([`Self::eq_unordered`]).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CollectionValue {
    shape: CollectionType,
    elements: Vec<ScalarValue>,
}

impl CollectionValue {
    #[must_use]
    pub fn new(shape: CollectionType, elements: Vec<ScalarValue>) -> Self {
        Self { shape, elements }
    }

    #[must_use]
    pub fn shape(&self) -> CollectionType {
        self.shape
    }

    #[must_use]
    pub fn elements(&self) -> &[ScalarValue] {
        &self.elements
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Multiset equality: same elements with the same multiplicities, any order.
    #[must_use]
    pub fn eq_unordered(&self, other: &CollectionValue) -> bool {
        if self.elements.len() != other.elements.len() {
            return false;
        }
        let mut lhs = self.elements.clone();
        let mut rhs = other.elements.clone();
        lhs.sort();
        rhs.sort();
        lhs == rhs
    }
}

impl fmt::Display for CollectionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", self.shape)?;
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{element}")?;
        }
        write!(f, "]")
    }
}

/// A property value: a scalar, or a container of scalars.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PropertyValue {
    Scalar(ScalarValue),
    Collection(CollectionValue),
}

impl PropertyValue {
    #[must_use]
    pub fn as_scalar(&self) -> Option<&ScalarValue> {
        match self {
            PropertyValue::Scalar(s) => Some(s),
            PropertyValue::Collection(_) => None,
        }
    }

    #[must_use]
    pub fn as_collection(&self) -> Option<&CollectionValue> {
        match self {
            PropertyValue::Scalar(_) => None,
            PropertyValue::Collection(c) => Some(c),
        }
    }

    /// Empty means an empty container; scalars are never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            PropertyValue::Scalar(_) => false,
            PropertyValue::Collection(c) => c.is_empty(),
        }
    }
}

impl From<ScalarValue> for PropertyValue {
    fn from(value: ScalarValue) -> Self {
        PropertyValue::Scalar(value)
    }
}

impl From<CollectionValue> for PropertyValue {
    fn from(value: CollectionValue) -> Self {
        PropertyValue::Collection(value)
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Scalar(s) => write!(f, "{s}"),
            PropertyValue::Collection(c) => write!(f, "{c}"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scalar_kind_roundtrip() {
        assert_eq!(ScalarValue::Text("x".into()).kind(), ScalarKind::Text);
        assert_eq!(ScalarValue::Int(-3).kind(), ScalarKind::Int);
        assert_eq!(ScalarValue::Uint(3).kind(), ScalarKind::Uint);
        assert_eq!(ScalarValue::Bool(true).kind(), ScalarKind::Bool);
        assert_eq!(ScalarValue::Bytes(vec![1]).kind(), ScalarKind::Bytes);
        assert_eq!(ScalarValue::Uuid(uuid::Uuid::new_v4()).kind(), ScalarKind::Uuid);
    }

    #[test]
    fn primitive_kinds() {
        assert!(ScalarKind::Int.is_primitive());
        assert!(ScalarKind::Uint.is_primitive());
        assert!(ScalarKind::Bool.is_primitive());
        assert!(!ScalarKind::Text.is_primitive());
        assert!(!ScalarKind::Bytes.is_primitive());
        assert!(!ScalarKind::Uuid.is_primitive());
    }

    #[test]
    fn unordered_equality_is_multiset_equality() {
        let a = CollectionValue::new(
            CollectionType::List,
            vec![ScalarValue::Int(1), ScalarValue::Int(2), ScalarValue::Int(2)],
        );
        let b = CollectionValue::new(
            CollectionType::List,
            vec![ScalarValue::Int(2), ScalarValue::Int(1), ScalarValue::Int(2)],
        );
        let c = CollectionValue::new(
            CollectionType::List,
            vec![ScalarValue::Int(2), ScalarValue::Int(1), ScalarValue::Int(1)],
        );
        assert_ne!(a, b);
        assert!(a.eq_unordered(&b));
        // same length, different multiplicities
        assert!(!a.eq_unordered(&c));
        // different length
        let d = CollectionValue::new(CollectionType::List, vec![ScalarValue::Int(1)]);
        assert!(!a.eq_unordered(&d));
    }

    #[test]
    fn unordered_equality_fuzz() {
        bolero::check!().with_type().for_each(|values: &Vec<u8>| {
            let forward: Vec<ScalarValue> =
                values.iter().map(|v| ScalarValue::Uint(u64::from(*v))).collect();
            let mut backward = forward.clone();
            backward.reverse();
            let a = CollectionValue::new(CollectionType::List, forward);
            let b = CollectionValue::new(CollectionType::List, backward);
            assert!(a.eq_unordered(&b));
        });
    }
}
