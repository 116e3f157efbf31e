// SPDX-License-Identifier: Apache-2.0
// Copyright Vouch Project Authors

//! Constructor- and factory-mediated instantiation.
//!
//! Both strategies marshal property values into a positional argument list matching
//! the configured property order and hand it to a construction closure. The closure
//! receives `None` for deliberately absent properties and decides for itself whether
//! to reject the call; that decision is what the creator contract's required-ness
//! proof observes.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use property::{PropertySupport, PropertyValue, RuntimeProperties};

use crate::error::{InstantiationError, ResolveError};
use crate::{Instantiator, prepare_supports};

/// Positional construction closure: one `Option<PropertyValue>` per configured
/// property, in property order.
pub type ConstructFn<T> =
    Arc<dyn Fn(&[Option<PropertyValue>]) -> Result<T, String> + Send + Sync>;

/// Validate that the declared parameter names match the configured property list,
/// name for name, in order. A mismatch is a configuration error, not a per-instance
/// one.
fn resolve_parameters<T>(
    parameter_names: &[&str],
    runtime_properties: &RuntimeProperties<T>,
) -> Result<(), ResolveError> {
    let configured: Vec<&str> = runtime_properties
        .all_properties()
        .iter()
        .map(property::PropertyMetadata::name)
        .collect();
    for name in parameter_names {
        if !configured.contains(name) {
            return Err(ResolveError::UnknownParameter {
                name: (*name).to_string(),
            });
        }
    }
    if parameter_names != configured.as_slice() {
        return Err(ResolveError::ParameterMismatch {
            expected: configured.join(", "),
            given: parameter_names.join(", "),
        });
    }
    Ok(())
}

/// Marshal the given supports into the positional argument list. Properties without a
/// support, and supports without a cached value, become `None`.
fn marshal_arguments<T>(
    runtime_properties: &RuntimeProperties<T>,
    supports: &[PropertySupport<T>],
) -> Vec<Option<PropertyValue>> {
    runtime_properties
        .all_properties()
        .iter()
        .map(|metadata| {
            supports
                .iter()
                .find(|support| support.name() == metadata.name())
                .and_then(|support| support.test_value().cloned())
        })
        .collect()
}

/// Invokes a constructor whose parameter list matches the configured properties.
pub struct ConstructorInstantiator<T> {
    construct: ConstructFn<T>,
    runtime_properties: RuntimeProperties<T>,
}

impl<T> ConstructorInstantiator<T> {
    /// Resolve the constructor against the property set.
    ///
    /// `parameter_names` declares the constructor's formal parameters; it must match
    /// the configured property names in order.
    pub fn new(
        construct: impl Fn(&[Option<PropertyValue>]) -> Result<T, String> + Send + Sync + 'static,
        parameter_names: &[&str],
        runtime_properties: RuntimeProperties<T>,
    ) -> Result<Self, ResolveError> {
        resolve_parameters(parameter_names, &runtime_properties)?;
        Ok(Self {
            construct: Arc::new(construct),
            runtime_properties,
        })
    }

    fn entry_point(&self) -> String {
        format!("constructor of {}", std::any::type_name::<T>())
    }
}

impl<T> Instantiator<T> for ConstructorInstantiator<T> {
    fn runtime_properties(&self) -> &RuntimeProperties<T> {
        &self.runtime_properties
    }

    fn new_instance(
        &self,
        properties: &[PropertySupport<T>],
        generate_values: bool,
    ) -> Result<T, InstantiationError> {
        let prepared = prepare_supports(properties, generate_values)?;
        let arguments = marshal_arguments(&self.runtime_properties, &prepared);
        debug!(entry_point = %self.entry_point(), "constructing instance");
        (self.construct)(&arguments).map_err(|reason| InstantiationError::ConstructionRejected {
            entry_point: self.entry_point(),
            reason,
        })
    }
}

/// Names the static factory method an instance comes from, for diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FactoryRef {
    /// The hosting type, when distinct from the produced type.
    pub enclosing_type: Option<String>,
    pub method_name: String,
}

impl fmt::Display for FactoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.enclosing_type {
            Some(enclosing) => write!(f, "{}::{}", enclosing, self.method_name),
            None => write!(f, "{}", self.method_name),
        }
    }
}

/// Invokes a named static factory method whose parameter list matches the configured
/// properties. The factory may be hosted on a type distinct from the produced type
/// (deferred/indirect factories).
pub struct FactoryInstantiator<T> {
    construct: ConstructFn<T>,
    factory: FactoryRef,
    runtime_properties: RuntimeProperties<T>,
}

impl<T> FactoryInstantiator<T> {
    pub fn new(
        construct: impl Fn(&[Option<PropertyValue>]) -> Result<T, String> + Send + Sync + 'static,
        factory: FactoryRef,
        parameter_names: &[&str],
        runtime_properties: RuntimeProperties<T>,
    ) -> Result<Self, ResolveError> {
        resolve_parameters(parameter_names, &runtime_properties)?;
        Ok(Self {
            construct: Arc::new(construct),
            factory,
            runtime_properties,
        })
    }

    #[must_use]
    pub fn factory(&self) -> &FactoryRef {
        &self.factory
    }

    fn entry_point(&self) -> String {
        format!("factory {} of {}", self.factory, std::any::type_name::<T>())
    }
}

impl<T> Instantiator<T> for FactoryInstantiator<T> {
    fn runtime_properties(&self) -> &RuntimeProperties<T> {
        &self.runtime_properties
    }

    fn new_instance(
        &self,
        properties: &[PropertySupport<T>],
        generate_values: bool,
    ) -> Result<T, InstantiationError> {
        let prepared = prepare_supports(properties, generate_values)?;
        let arguments = marshal_arguments(&self.runtime_properties, &prepared);
        debug!(entry_point = %self.entry_point(), "constructing instance");
        (self.construct)(&arguments).map_err(|reason| InstantiationError::ConstructionRejected {
            entry_point: self.entry_point(),
            reason,
        })
    }
}
