// SPDX-License-Identifier: Apache-2.0
// Copyright Vouch Project Authors

//! Contract algorithms.
//!
//! A contract proves a class of correctness properties about a target type by driving
//! an instantiation strategy with generated property values and asserting the
//! outcomes:
//!
//! - [`BeanPropertyContract`]: setter/getter round-trips and default values on
//!   mutable bean-style types.
//! - [`BuilderContract`]: round-trips through a builder, with the build method as the
//!   required-ness oracle.
//! - [`ObjectCreatorContract`]: constructor/factory wiring, defaults, and
//!   required-ness for creation-time construction protocols.
//!
//! All contracts are fail-fast: `assert_contract` reports the first violation it
//! finds and stops. Success is silent (`Ok(())`).

#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod bean;
pub mod builder;
pub mod creator;
pub mod error;

pub use bean::BeanPropertyContract;
pub use builder::BuilderContract;
pub use creator::ObjectCreatorContract;
pub use error::ContractError;

/// One verification run against a target type.
pub trait TestContract<T, B = T> {
    /// Perform all checks eagerly, signalling the first violation found.
    fn assert_contract(&self) -> Result<(), ContractError>;
}
