// SPDX-License-Identifier: Apache-2.0
// Copyright Vouch Project Authors

//! The per-assertion working unit.
//!
//! A [`PropertySupport`] binds one [`PropertyMetadata`] to a lazily generated test
//! value. The protocol is deliberately two-phase: generate once, then apply and
//! assert against the *same* cached value across any number of read-back checks.

use tracing::trace;

use crate::collection::CollectionType;
use crate::error::PropertyError;
use crate::metadata::{AccessStrategy, AssertionStrategy, PropertyMetadata};
use crate::value::PropertyValue;

/// A mutable unit of work bound to one property.
pub struct PropertySupport<T, B = T> {
    metadata: PropertyMetadata<T, B>,
    generated: Option<PropertyValue>,
}

// manual impls: derives would bound T and B
impl<T, B> Clone for PropertySupport<T, B> {
    fn clone(&self) -> Self {
        Self {
            metadata: self.metadata.clone(),
            generated: self.generated.clone(),
        }
    }
}

impl<T, B> std::fmt::Debug for PropertySupport<T, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertySupport")
            .field("metadata", &self.metadata)
            .field("generated", &self.generated)
            .finish()
    }
}

impl<T, B> PropertySupport<T, B> {
    #[must_use]
    pub fn new(metadata: PropertyMetadata<T, B>) -> Self {
        Self {
            metadata,
            generated: None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.metadata.name()
    }

    #[must_use]
    pub fn metadata(&self) -> &PropertyMetadata<T, B> {
        &self.metadata
    }

    /// The currently cached test value, if one has been generated.
    #[must_use]
    pub fn test_value(&self) -> Option<&PropertyValue> {
        self.generated.as_ref()
    }

    /// Synthesize and cache a test value.
    ///
    /// Scalar properties get one generator call; collection-shaped properties get a
    /// freshly sized random container. Calling this again replaces the cached value
    /// (re-randomization between contract passes).
    pub fn generate_test_value(&mut self) -> Result<(), PropertyError> {
        let value = match self.metadata.collection_type() {
            CollectionType::NoIterable => {
                PropertyValue::Scalar(self.metadata.generator().next_value())
            }
            shape => PropertyValue::Collection(
                shape.next_iterable(self.metadata.generator().as_ref())?,
            ),
        };
        trace!(property = self.name(), value = %value, "generated test value");
        self.generated = Some(value);
        Ok(())
    }

    fn cached_value(&self) -> Result<&PropertyValue, PropertyError> {
        self.generated.as_ref().ok_or_else(|| PropertyError::ValueNotGenerated {
            name: self.name().to_string(),
        })
    }

    /// Write the cached value onto a target through the bean accessor.
    pub fn apply(&self, target: &mut T) -> Result<(), PropertyError> {
        let value = self.cached_value()?;
        match self.metadata.access() {
            AccessStrategy::BeanAccessor { set: Some(set), .. } => {
                set(target, value);
                Ok(())
            }
            _ => Err(PropertyError::NoWritePath {
                name: self.name().to_string(),
            }),
        }
    }

    /// Write the cached value onto a builder through the builder-side strategy.
    ///
    /// The bulk/singular duality applies non-empty collection values through the
    /// singular add method, one element at a time; everything else goes through the
    /// bulk setter.
    pub fn apply_to_builder(&self, builder: &mut B) -> Result<(), PropertyError> {
        let value = self.cached_value()?;
        match self.metadata.access() {
            AccessStrategy::BuilderMethod { set, .. } => {
                set(builder, value);
                Ok(())
            }
            AccessStrategy::BuilderCollectionAndElement { set_all, add_one, .. } => {
                match value {
                    PropertyValue::Collection(collection) if !collection.is_empty() => {
                        for element in collection.elements() {
                            add_one(builder, element);
                        }
                    }
                    _ => set_all(builder, value),
                }
                Ok(())
            }
            _ => Err(PropertyError::NoWritePath {
                name: self.name().to_string(),
            }),
        }
    }

    /// Whether read-back assertions are legal for this property.
    #[must_use]
    pub fn is_readable(&self) -> bool {
        self.metadata.property_read_write().is_readable()
    }

    /// See [`PropertyMetadata::is_primitive`].
    #[must_use]
    pub fn is_primitive(&self) -> bool {
        self.metadata.is_primitive()
    }

    #[must_use]
    pub fn is_default_value(&self) -> bool {
        self.metadata.is_default_value()
    }

    fn read_back(&self, target: &T) -> Result<Option<PropertyValue>, PropertyError> {
        match self.metadata.access().getter() {
            Some(get) => Ok(get(target)),
            None => Err(PropertyError::NoReadPath {
                name: self.name().to_string(),
            }),
        }
    }

    /// Assert the target exposes the cached value.
    ///
    /// Write-only properties are exempt and always considered satisfied. Comparison
    /// follows the configured assertion strategy: ordered equality by default,
    /// multiset equality when the property opts into unordered collection comparison.
    pub fn assert_value_set(&self, target: &T) -> Result<(), PropertyError> {
        if !self.is_readable() {
            return Ok(());
        }
        let expected = self.cached_value()?;
        let actual = self.read_back(target)?;
        let matches = match (&actual, expected, self.metadata.assertion()) {
            (
                Some(PropertyValue::Collection(actual)),
                PropertyValue::Collection(expected),
                AssertionStrategy::CollectionIgnoreOrder,
            ) => actual.eq_unordered(expected),
            (Some(actual), expected, _) => actual == expected,
            (None, _, _) => false,
        };
        if matches {
            Ok(())
        } else {
            Err(PropertyError::ValueMismatch {
                name: self.name().to_string(),
                expected: expected.to_string(),
                actual: actual.map_or_else(|| "no value".to_string(), |v| v.to_string()),
            })
        }
    }

    /// Assert the target exposes no value for this property.
    ///
    /// Used after constructing with a property subset: a readable property that was
    /// neither passed nor default-valued must read back unset. An empty container
    /// counts as unset. Not meaningful for primitive-kinded properties, which always
    /// carry an implicit zero value.
    pub fn assert_value_absent(&self, target: &T) -> Result<(), PropertyError> {
        match self.read_back(target)? {
            None => Ok(()),
            Some(value) if value.is_empty() => Ok(()),
            Some(value) => Err(PropertyError::ValueMismatch {
                name: self.name().to_string(),
                expected: "no value".to_string(),
                actual: value.to_string(),
            }),
        }
    }

    /// Assert the target exposes a sane default before any value was applied:
    /// a non-null value, non-empty for collection shapes.
    pub fn assert_default_value(&self, target: &T) -> Result<(), PropertyError> {
        match self.read_back(target)? {
            None => Err(PropertyError::MissingDefault {
                name: self.name().to_string(),
                actual: "no value".to_string(),
            }),
            Some(value) if value.is_empty() => Err(PropertyError::MissingDefault {
                name: self.name().to_string(),
                actual: "an empty collection".to_string(),
            }),
            Some(_) => Ok(()),
        }
    }

    /// An independent support sharing the same metadata.
    ///
    /// With `generate_value` false the copy carries no cached value: it stands in for
    /// a deliberately absent property during required-ness proofs.
    pub fn create_copy(&self, generate_value: bool) -> Result<Self, PropertyError> {
        let mut copy = Self::new(self.metadata.clone());
        if generate_value {
            copy.generate_test_value()?;
        }
        Ok(copy)
    }
}
