// SPDX-License-Identifier: Apache-2.0
// Copyright Vouch Project Authors

//! Builder contract: round-trips through a builder and the required-ness proof.

use tracing::{debug, info};

use instantiate::{BuilderInstantiator, BuilderParameterizedInstantiator};
use property::{PropertyMetadata, RuntimeProperties};

use crate::error::ContractError;
use crate::TestContract;

/// Verifies a builder-mediated type: a minimal (required-only) build, a full build,
/// and the proof that the build method rejects every withheld required property.
pub struct BuilderContract<T, B> {
    builder_instantiator: BuilderInstantiator<T, B>,
    runtime_properties: RuntimeProperties<T, B>,
}

impl<T, B> BuilderContract<T, B> {
    /// Rejects property sets with duplicate names before anything is built.
    pub fn new(
        builder_instantiator: BuilderInstantiator<T, B>,
        runtime_properties: RuntimeProperties<T, B>,
    ) -> Result<Self, ContractError> {
        RuntimeProperties::assert_unique_names(runtime_properties.all_properties())?;
        Ok(Self {
            builder_instantiator,
            runtime_properties,
        })
    }

    #[must_use]
    pub fn runtime_properties(&self) -> &RuntimeProperties<T, B> {
        &self.runtime_properties
    }

    /// The builder exposed through the uniform instantiator contract.
    #[must_use]
    pub fn parameterized_instantiator(&self) -> BuilderParameterizedInstantiator<T, B> {
        BuilderParameterizedInstantiator::new(
            self.builder_instantiator.clone(),
            self.runtime_properties.clone(),
        )
    }

    /// Apply the given properties to a fresh builder, build, and assert every
    /// readable property round-tripped.
    fn set_and_verify(
        &self,
        properties: &[PropertyMetadata<T, B>],
    ) -> Result<(), ContractError> {
        let supports = RuntimeProperties::map_to_support(properties, true)?;
        let mut builder = self.builder_instantiator.new_builder_instance();
        for support in &supports {
            support.apply_to_builder(&mut builder)?;
        }
        let built = self.builder_instantiator.build(builder)?;
        for support in &supports {
            if support.is_readable() {
                support.assert_value_set(&built)?;
            }
        }
        Ok(())
    }

    /// For each required property, rebuild with that property withheld and expect the
    /// build step to fail. Each trial restores the full required set: trials are
    /// independent, not cumulative.
    fn should_fail_on_missing_required(&self) -> Result<(), ContractError> {
        let required = self.runtime_properties.required_properties();
        if required.is_empty() {
            return Ok(());
        }
        for property in required {
            let withheld: Vec<PropertyMetadata<T, B>> = required
                .iter()
                .filter(|p| p.name() != property.name())
                .cloned()
                .collect();
            match self.set_and_verify(&withheld) {
                // the build (or a subsequent assertion) failed, which is the expected
                // outcome for a missing required property
                Err(error) => {
                    debug!(
                        property = property.name(),
                        %error,
                        "build failed as expected with property withheld"
                    );
                }
                Ok(()) => {
                    return Err(ContractError::AcceptedMissingRequired {
                        name: property.name().to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl<T, B> TestContract<T, B> for BuilderContract<T, B> {
    fn assert_contract(&self) -> Result<(), ContractError> {
        info!("verifying builder contract\n{}", self.runtime_properties);
        self.set_and_verify(self.runtime_properties.required_properties())?;
        self.set_and_verify(self.runtime_properties.all_properties())?;
        self.should_fail_on_missing_required()
    }
}
