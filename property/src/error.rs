// SPDX-License-Identifier: Apache-2.0
// Copyright Vouch Project Authors

use crate::collection::CollectionType;

/// Errors raised by the property model.
///
/// Variants fall into two classes. Misconfiguration (marker-shape misuse, a missing
/// write path, a duplicate name) means the metadata handed to the engine is wrong and
/// is reported before any target is touched where possible. Assertion failures
/// (`ValueMismatch`, `MissingDefault`) mean the target under test misbehaved; they are
/// the observable result of a contract run.
#[must_use]
#[derive(Debug, thiserror::Error)]
pub enum PropertyError {
    /// A container operation was invoked on a marker shape.
    ///
    /// `ArrayMarker` and `NoIterable` exist only so that shape resolution has a result
    /// for arrays and non-containers; callers must unwrap array-typed properties to
    /// their element type before requesting container operations.
    #[error("collection operation is not supported for shape '{shape}'")]
    UnsupportedCollectionOperation { shape: CollectionType },

    /// The property's access strategy offers no way to write a value.
    #[error("property '{name}' has no write path for the given target")]
    NoWritePath { name: String },

    /// The property is declared readable but the access strategy has no getter.
    #[error("property '{name}' is declared readable but has no read path")]
    NoReadPath { name: String },

    /// `apply` or an assertion ran before `generate_test_value`.
    #[error("no test value has been generated for property '{name}'")]
    ValueNotGenerated { name: String },

    /// Round-trip failure: the target did not expose the value that was applied.
    #[error("property '{name}' did not round-trip: expected {expected}, actual {actual}")]
    ValueMismatch {
        name: String,
        expected: String,
        actual: String,
    },

    /// A property flagged as default-valued exposed no value (or an empty container)
    /// before any assignment.
    #[error("property '{name}' is flagged as default-valued but exposed {actual}")]
    MissingDefault { name: String, actual: String },

    /// Two properties in one set share a name.
    #[error("duplicate property name '{name}' in property set")]
    DuplicateName { name: String },
}
