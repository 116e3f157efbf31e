// SPDX-License-Identifier: Apache-2.0
// Copyright Vouch Project Authors

//! Instantiation strategies.
//!
//! An [`Instantiator`] produces fresh target instances from a set of
//! [`PropertySupport`]s. Four strategies cover the supported construction protocols:
//!
//! - [`BeanInstantiator`]: no-arg construction followed by setter application.
//! - [`BuilderInstantiator`]: a builder entry point (constructor- or
//!   factory-obtained), property application on the builder, then the build method.
//! - [`ConstructorInstantiator`]: positional construction over the full parameter
//!   list.
//! - [`FactoryInstantiator`]: the same discipline applied to a named static factory,
//!   optionally hosted on a type distinct from the produced one.
//!
//! All instantiators are stateless aside from their configuration and safe to reuse;
//! every `new_instance` call constructs a fresh target.

#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod bean;
pub mod builder;
pub mod creator;
pub mod error;

use property::{PropertySupport, RuntimeProperties};

pub use bean::BeanInstantiator;
pub use builder::{BuilderInstantiator, BuilderParameterizedInstantiator};
pub use creator::{ConstructorInstantiator, FactoryInstantiator, FactoryRef};
pub use error::{InstantiationError, ResolveError};

/// Uniform construction contract over the four instantiation strategies.
///
/// `T` is the produced type, `B` the builder type for the builder strategy (`B = T`
/// everywhere else).
pub trait Instantiator<T, B = T> {
    /// The property set this instantiator was configured with.
    fn runtime_properties(&self) -> &RuntimeProperties<T, B>;

    /// Build a target using exactly the given supports.
    ///
    /// Order is construction order for constructor/factory strategies, application
    /// order otherwise. With `generate_values` set, supports lacking a cached test
    /// value get one generated first; supports left without a value are treated as
    /// deliberately absent (the negative-testing path).
    fn new_instance(
        &self,
        properties: &[PropertySupport<T, B>],
        generate_values: bool,
    ) -> Result<T, InstantiationError>;

    /// Whether [`Self::new_instance_minimal`] is available.
    fn supports_minimal(&self) -> bool {
        false
    }

    /// Build a minimal instance with no properties applied, relying on the type's own
    /// defaults. Only the bean strategy supports this.
    fn new_instance_minimal(&self) -> Result<T, InstantiationError> {
        Err(InstantiationError::MinimalUnsupported {
            type_name: std::any::type_name::<T>(),
        })
    }
}

/// Clone the given supports, generating test values for those lacking one when
/// requested. Valueless supports stay valueless when `generate_values` is false.
pub(crate) fn prepare_supports<T, B>(
    properties: &[PropertySupport<T, B>],
    generate_values: bool,
) -> Result<Vec<PropertySupport<T, B>>, InstantiationError> {
    let mut prepared: Vec<PropertySupport<T, B>> = properties.to_vec();
    if generate_values {
        for support in &mut prepared {
            if support.test_value().is_none() {
                support.generate_test_value()?;
            }
        }
    }
    Ok(prepared)
}
