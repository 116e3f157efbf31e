// SPDX-License-Identifier: Apache-2.0
// Copyright Vouch Project Authors

//! Container shapes and shape resolution.
//!
//! [`CollectionType`] enumerates the container shapes a property value can take and
//! owns the three container operations (empty, wrap, generate). A single `match` per
//! operation keeps the dispatch table in one place.

use std::collections::BTreeSet;
use std::fmt;

use ordermap::OrderSet;
use rand::RngExt;

use crate::error::PropertyError;
use crate::generator::ValueGenerator;
use crate::value::{CollectionValue, ScalarKind, ScalarValue};

/// Bounds for randomly sized generated containers.
const MIN_GENERATED_LEN: usize = 4;
const MAX_GENERATED_LEN: usize = 12;

/// The supported container shapes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CollectionType {
    /// A generic collection. Wrapping preserves order; generation yields a list.
    Collection,
    /// An ordered list.
    List,
    /// An insertion-ordered set: wrapping deduplicates, keeping first occurrences.
    Set,
    /// A sorted set: wrapping deduplicates and orders by natural ordering.
    SortedSet,
    /// Marker for array-typed properties. Container operations fail loudly; callers
    /// must unwrap arrays to their element type before reaching this enum.
    ArrayMarker,
    /// Marker for non-container properties. Container operations fail loudly.
    #[default]
    NoIterable,
}

impl CollectionType {
    /// Whether this shape supports the container operations.
    #[must_use]
    pub fn is_container(self) -> bool {
        !matches!(self, CollectionType::ArrayMarker | CollectionType::NoIterable)
    }

    /// An empty container of this shape.
    pub fn empty_collection(self) -> Result<CollectionValue, PropertyError> {
        if !self.is_container() {
            return Err(PropertyError::UnsupportedCollectionOperation { shape: self });
        }
        Ok(CollectionValue::new(self, Vec::new()))
    }

    /// Copy an arbitrary sequence into this shape.
    ///
    /// Lists and generic collections keep the given order. Sets deduplicate while
    /// preserving first-occurrence order. Sorted sets deduplicate and sort by natural
    /// ordering.
    pub fn wrap_to_iterable(
        self,
        values: impl IntoIterator<Item = ScalarValue>,
    ) -> Result<CollectionValue, PropertyError> {
        let elements = match self {
            CollectionType::Collection | CollectionType::List => values.into_iter().collect(),
            CollectionType::Set => {
                let set: OrderSet<ScalarValue> = values.into_iter().collect();
                set.into_iter().collect()
            }
            CollectionType::SortedSet => {
                let set: BTreeSet<ScalarValue> = values.into_iter().collect();
                set.into_iter().collect()
            }
            CollectionType::ArrayMarker | CollectionType::NoIterable => {
                return Err(PropertyError::UnsupportedCollectionOperation { shape: self });
            }
        };
        Ok(CollectionValue::new(self, elements))
    }

    /// A freshly generated container of this shape with a random element count
    /// between 4 and 12.
    ///
    /// Set shapes may end up smaller after deduplication.
    pub fn next_iterable(
        self,
        generator: &dyn ValueGenerator,
    ) -> Result<CollectionValue, PropertyError> {
        if !self.is_container() {
            return Err(PropertyError::UnsupportedCollectionOperation { shape: self });
        }
        let len = rand::rng().random_range(MIN_GENERATED_LEN..=MAX_GENERATED_LEN);
        self.wrap_to_iterable((0..len).map(|_| generator.next_value()))
    }

    /// Resolve the shape responsible for a declared type.
    ///
    /// Arrays map to the array marker. Concrete scalar types are no match. Container
    /// interfaces are tested in the fixed precedence order sorted-set, set, list,
    /// generic collection; the first shape the declared interface satisfies wins, so a
    /// declared sorted-set resolves to [`CollectionType::SortedSet`] even though it
    /// also satisfies the plain set contract.
    #[must_use]
    pub fn find_responsible_collection_type(declared: &DeclaredType) -> Option<CollectionType> {
        match declared {
            DeclaredType::Array(_) => Some(CollectionType::ArrayMarker),
            DeclaredType::Scalar(_) => None,
            DeclaredType::Container { interface, .. } => SEARCH_ORDER
                .iter()
                .copied()
                .find(|shape| interface.satisfies(*shape)),
        }
    }
}

/// Most specific shape first.
const SEARCH_ORDER: [CollectionType; 4] = [
    CollectionType::SortedSet,
    CollectionType::Set,
    CollectionType::List,
    CollectionType::Collection,
];

impl fmt::Display for CollectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CollectionType::Collection => "collection",
            CollectionType::List => "list",
            CollectionType::Set => "set",
            CollectionType::SortedSet => "sorted-set",
            CollectionType::ArrayMarker => "array-marker",
            CollectionType::NoIterable => "no-iterable",
        };
        write!(f, "{name}")
    }
}

/// Container interfaces a property can be declared against.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ContainerInterface {
    Collection,
    List,
    Set,
    SortedSet,
}

impl ContainerInterface {
    /// Whether a value declared against this interface is assignable to the given
    /// shape's interface. Mirrors the interface hierarchy: every interface satisfies
    /// the generic collection, a sorted set additionally satisfies the plain set.
    #[must_use]
    pub fn satisfies(self, shape: CollectionType) -> bool {
        match shape {
            CollectionType::Collection => true,
            CollectionType::List => matches!(self, ContainerInterface::List),
            CollectionType::Set => {
                matches!(self, ContainerInterface::Set | ContainerInterface::SortedSet)
            }
            CollectionType::SortedSet => matches!(self, ContainerInterface::SortedSet),
            CollectionType::ArrayMarker | CollectionType::NoIterable => false,
        }
    }
}

/// The declared surface of a property, as seen by shape resolution.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DeclaredType {
    /// A plain scalar type. Never a container.
    Scalar(ScalarKind),
    /// An array of scalars. Resolves to the array marker.
    Array(ScalarKind),
    /// A container interface over scalar elements.
    Container {
        interface: ContainerInterface,
        element: ScalarKind,
    },
}

impl DeclaredType {
    /// The element kind for arrays and containers, the scalar kind otherwise.
    #[must_use]
    pub fn element_kind(&self) -> ScalarKind {
        match self {
            DeclaredType::Scalar(kind) | DeclaredType::Array(kind) => *kind,
            DeclaredType::Container { element, .. } => *element,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::generator::{IntGenerator, UintGenerator};
    use pretty_assertions::assert_eq;

    fn ints(values: &[i64]) -> Vec<ScalarValue> {
        values.iter().map(|v| ScalarValue::Int(*v)).collect()
    }

    #[test]
    fn list_wrap_preserves_order_and_duplicates() {
        let wrapped = CollectionType::List.wrap_to_iterable(ints(&[3, 1, 3, 2])).unwrap();
        assert_eq!(wrapped.elements(), ints(&[3, 1, 3, 2]).as_slice());
    }

    #[test]
    fn set_wrap_deduplicates_preserving_first_occurrence() {
        let wrapped = CollectionType::Set.wrap_to_iterable(ints(&[3, 1, 3, 2, 1])).unwrap();
        assert_eq!(wrapped.elements(), ints(&[3, 1, 2]).as_slice());
    }

    #[test]
    fn sorted_set_wrap_deduplicates_and_orders() {
        let wrapped = CollectionType::SortedSet
            .wrap_to_iterable(ints(&[3, 1, 3, 2]))
            .unwrap();
        assert_eq!(wrapped.elements(), ints(&[1, 2, 3]).as_slice());
    }

    #[test]
    fn markers_fail_loudly() {
        for shape in [CollectionType::ArrayMarker, CollectionType::NoIterable] {
            assert!(matches!(
                shape.empty_collection(),
                Err(PropertyError::UnsupportedCollectionOperation { .. })
            ));
            assert!(matches!(
                shape.wrap_to_iterable(ints(&[1])),
                Err(PropertyError::UnsupportedCollectionOperation { .. })
            ));
            assert!(matches!(
                shape.next_iterable(&IntGenerator),
                Err(PropertyError::UnsupportedCollectionOperation { .. })
            ));
        }
    }

    #[test]
    fn generated_lists_respect_size_bounds() {
        for _ in 0..32 {
            let generated = CollectionType::List.next_iterable(&UintGenerator).unwrap();
            assert!(generated.len() >= 4);
            assert!(generated.len() <= 12);
        }
    }

    #[test]
    fn resolution_prefers_sorted_set_over_set() {
        let declared = DeclaredType::Container {
            interface: ContainerInterface::SortedSet,
            element: ScalarKind::Int,
        };
        assert_eq!(
            CollectionType::find_responsible_collection_type(&declared),
            Some(CollectionType::SortedSet)
        );
    }

    #[test]
    fn resolution_for_plain_interfaces() {
        let cases = [
            (ContainerInterface::Set, CollectionType::Set),
            (ContainerInterface::List, CollectionType::List),
            (ContainerInterface::Collection, CollectionType::Collection),
        ];
        for (interface, expected) in cases {
            let declared = DeclaredType::Container {
                interface,
                element: ScalarKind::Text,
            };
            assert_eq!(
                CollectionType::find_responsible_collection_type(&declared),
                Some(expected)
            );
        }
    }

    #[test]
    fn arrays_resolve_to_marker_and_scalars_to_nothing() {
        assert_eq!(
            CollectionType::find_responsible_collection_type(&DeclaredType::Array(
                ScalarKind::Bytes
            )),
            Some(CollectionType::ArrayMarker)
        );
        assert_eq!(
            CollectionType::find_responsible_collection_type(&DeclaredType::Scalar(
                ScalarKind::Text
            )),
            None
        );
    }
}
