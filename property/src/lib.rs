// SPDX-License-Identifier: Apache-2.0
// Copyright Vouch Project Authors

//! Property model for object-contract verification.
//!
//! A *property* is a named, typed attribute of some target type, reachable through a
//! declared access strategy. This crate holds everything the contract algorithms in
//! `vouch-contract` need to reason about properties without knowing the target type's
//! construction protocol:
//!
//! - [`ScalarValue`] / [`PropertyValue`]: the closed dynamic value model.
//! - [`ValueGenerator`] and stock generators: randomized, type-valid value synthesis.
//! - [`CollectionType`]: the supported container shapes and their wrap/empty/generate
//!   operations.
//! - [`PropertyMetadata`]: the immutable per-property descriptor.
//! - [`PropertySupport`]: the generate-then-apply-then-assert working unit.
//! - [`RuntimeProperties`]: filtered views over a full property set.

#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod collection;
pub mod error;
pub mod generator;
pub mod metadata;
pub mod runtime;
pub mod support;
pub mod value;

pub use collection::{CollectionType, ContainerInterface, DeclaredType};
pub use error::PropertyError;
pub use generator::ValueGenerator;
pub use metadata::{
    AccessStrategy, AssertionStrategy, PropertyMemberInfo, PropertyMetadata,
    PropertyMetadataBuilder, PropertyReadWrite,
};
pub use runtime::RuntimeProperties;
pub use support::PropertySupport;
pub use value::{CollectionValue, PropertyValue, ScalarKind, ScalarValue};
