// SPDX-License-Identifier: Apache-2.0
// Copyright Vouch Project Authors

use instantiate::{InstantiationError, ResolveError};
use property::PropertyError;

/// The single error surface of `assert_contract`.
///
/// Configuration problems (`Resolve`) mean the contract was set up wrong and nothing
/// was proven. Everything else is a test result: the target under test misbehaved.
#[must_use]
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    /// Setup-time configuration failure; no instance was built.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Construction failed where it was expected to succeed.
    #[error(transparent)]
    Instantiation(#[from] InstantiationError),

    /// A property assertion failed (round-trip mismatch, missing default) or the
    /// property set is malformed.
    #[error(transparent)]
    Property(#[from] PropertyError),

    /// The required-ness proof found a property whose absence went unnoticed.
    #[error(
        "property '{name}' is marked as required but construction accepted it missing"
    )]
    AcceptedMissingRequired { name: String },
}
