// SPDX-License-Identifier: Apache-2.0
// Copyright Vouch Project Authors

use property::PropertyError;

/// Setup-time configuration failures.
///
/// Raised while an instantiator is being constructed, before any target instance is
/// built. Never retried: the configuration is wrong, not the target.
#[must_use]
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// A declared parameter name has no matching property in the given set.
    #[error("parameter '{name}' has no matching property in the configured set")]
    UnknownParameter { name: String },

    /// The declared parameter list does not match the property set.
    #[error("parameter list [{given}] does not match the configured properties [{expected}]")]
    ParameterMismatch { expected: String, given: String },

    /// The property set itself is malformed.
    #[error(transparent)]
    Property(#[from] PropertyError),
}

/// Per-instance construction failures.
///
/// During required-ness proofs a `BuildRejected`/`ConstructionRejected` outcome is the
/// *expected* result; the contract algorithms decide whether a failure here proves a
/// withheld required property or flags a genuine defect.
#[must_use]
#[derive(Debug, thiserror::Error)]
pub enum InstantiationError {
    /// The builder's build method rejected the accumulated state.
    #[error("builder for {type_name} rejected construction: {reason}")]
    BuildRejected {
        type_name: &'static str,
        reason: String,
    },

    /// A constructor or factory rejected its arguments.
    #[error("{entry_point} rejected construction: {reason}")]
    ConstructionRejected {
        entry_point: String,
        reason: String,
    },

    /// Applying a property onto the target or builder failed.
    #[error(transparent)]
    Apply(#[from] PropertyError),

    /// The strategy cannot produce a minimal instance.
    #[error("instantiator for {type_name} cannot produce a minimal instance")]
    MinimalUnsupported { type_name: &'static str },
}
