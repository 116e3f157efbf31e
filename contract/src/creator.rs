// SPDX-License-Identifier: Apache-2.0
// Copyright Vouch Project Authors

//! Constructor/factory contract: parameter wiring, defaults, required-ness.

use tracing::{debug, info};

use instantiate::{
    ConstructorInstantiator, FactoryInstantiator, FactoryRef, Instantiator,
};
use property::{PropertyMetadata, PropertyValue, RuntimeProperties};

use crate::error::ContractError;
use crate::TestContract;

/// Verifies a creation-time construction protocol (constructor or static factory).
///
/// Check 1 constructs with every property and asserts each readable one round-trips,
/// which catches parameter/accessor transposition. Check 2 constructs with required
/// properties only and asserts required round-trips, defaults, and that the remaining
/// additional properties read back unset. Check 3 proves required-ness for every
/// non-primitive required property.
pub struct ObjectCreatorContract<T> {
    instantiator: Box<dyn Instantiator<T>>,
}

impl<T: 'static> ObjectCreatorContract<T> {
    pub fn new(instantiator: impl Instantiator<T> + 'static) -> Self {
        Self {
            instantiator: Box::new(instantiator),
        }
    }

    /// Contract over a constructor whose parameters match the given properties.
    pub fn for_constructor(
        construct: impl Fn(&[Option<PropertyValue>]) -> Result<T, String> + Send + Sync + 'static,
        parameter_names: &[&str],
        properties: Vec<PropertyMetadata<T>>,
    ) -> Result<Self, ContractError> {
        RuntimeProperties::assert_unique_names(&properties)?;
        let instantiator = ConstructorInstantiator::new(
            construct,
            parameter_names,
            RuntimeProperties::new(properties),
        )?;
        Ok(Self::new(instantiator))
    }

    /// Contract over a named static factory method.
    pub fn for_factory(
        construct: impl Fn(&[Option<PropertyValue>]) -> Result<T, String> + Send + Sync + 'static,
        factory: FactoryRef,
        parameter_names: &[&str],
        properties: Vec<PropertyMetadata<T>>,
    ) -> Result<Self, ContractError> {
        RuntimeProperties::assert_unique_names(&properties)?;
        let instantiator = FactoryInstantiator::new(
            construct,
            factory,
            parameter_names,
            RuntimeProperties::new(properties),
        )?;
        Ok(Self::new(instantiator))
    }

    fn runtime_properties(&self) -> &RuntimeProperties<T> {
        self.instantiator.runtime_properties()
    }

    /// Construct with every property and assert each readable one round-trips.
    fn should_persist_all_parameters(&self) -> Result<(), ContractError> {
        let supports = self.runtime_properties().all_as_support(true)?;
        let instance = self.instantiator.new_instance(&supports, false)?;
        for support in &supports {
            if support.is_readable() {
                support.assert_value_set(&instance)?;
            }
        }
        Ok(())
    }

    /// Construct with required properties only; required properties must round-trip,
    /// default-valued properties must show their default, and non-default additional
    /// properties must read back unset.
    fn should_handle_required_and_defaults(&self) -> Result<(), ContractError> {
        let required = self.runtime_properties().required_as_support(true)?;
        let instance = self.instantiator.new_instance(&required, false)?;

        for support in &required {
            if support.is_readable() {
                support.assert_value_set(&instance)?;
            }
        }
        for support in &self.runtime_properties().default_as_support(false)? {
            if support.is_readable() {
                support.assert_default_value(&instance)?;
            }
        }
        for support in &self.runtime_properties().additional_as_support(false)? {
            // primitives always read back as their implicit zero value and can
            // never be observed as unset
            if support.is_readable() && !support.is_default_value() && !support.is_primitive() {
                support.assert_value_absent(&instance)?;
            }
        }
        Ok(())
    }

    /// For each non-primitive required property, construct with that property's
    /// valueless copy in place and expect construction to fail.
    fn should_fail_on_missing_required(&self) -> Result<(), ContractError> {
        let required = self.runtime_properties().required_as_support(true)?;
        for support in &required {
            if support.is_primitive() {
                continue;
            }
            let mut trial: Vec<_> = required
                .iter()
                .filter(|s| s.name() != support.name())
                .cloned()
                .collect();
            trial.push(support.create_copy(false)?);
            match self.instantiator.new_instance(&trial, false) {
                Err(error) => {
                    debug!(
                        property = support.name(),
                        %error,
                        "construction failed as expected with property withheld"
                    );
                }
                Ok(_) => {
                    return Err(ContractError::AcceptedMissingRequired {
                        name: support.name().to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl<T: 'static> TestContract<T> for ObjectCreatorContract<T> {
    fn assert_contract(&self) -> Result<(), ContractError> {
        info!(
            "verifying object-creator contract\n{}",
            self.runtime_properties()
        );
        self.should_persist_all_parameters()?;
        self.should_handle_required_and_defaults()?;
        self.should_fail_on_missing_required()
    }
}
