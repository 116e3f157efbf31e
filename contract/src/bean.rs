// SPDX-License-Identifier: Apache-2.0
// Copyright Vouch Project Authors

//! Bean-property contract: setter/getter round-trips and default values.

use tracing::{debug, info, warn};

use instantiate::{BeanInstantiator, Instantiator};
use property::{PropertyMetadata, PropertyReadWrite, RuntimeProperties};

use crate::error::ContractError;
use crate::TestContract;

/// Verifies that every read-write property of a bean-style type round-trips through
/// its accessor pair, and that default-valued properties hold their default on a
/// freshly constructed instance.
///
/// The bean strategy cannot prove rejection of missing required properties (a no-arg
/// constructor always succeeds), so this contract performs no required-ness proof.
pub struct BeanPropertyContract<T> {
    instantiator: BeanInstantiator<T>,
}

impl<T> BeanPropertyContract<T> {
    /// Rejects property sets with duplicate names before anything is built.
    pub fn new(instantiator: BeanInstantiator<T>) -> Result<Self, ContractError> {
        RuntimeProperties::assert_unique_names(
            instantiator.runtime_properties().all_properties(),
        )?;
        Ok(Self { instantiator })
    }

    #[must_use]
    pub fn instantiator(&self) -> &BeanInstantiator<T> {
        &self.instantiator
    }

    fn check_getter_and_setter(&self) -> Result<(), ContractError> {
        let read_write: Vec<PropertyMetadata<T>> = self
            .instantiator
            .runtime_properties()
            .all_properties()
            .iter()
            .filter(|p| p.property_read_write() == PropertyReadWrite::ReadWrite)
            .cloned()
            .collect();

        if read_write.is_empty() {
            warn!(
                "there are no properties that are both readable and writable, skipping \
                 getter/setter verification; check the property configuration"
            );
            return Ok(());
        }

        info!(
            properties = ?RuntimeProperties::extract_names(&read_write),
            "verifying read-write properties"
        );

        let mut supports = RuntimeProperties::map_to_support(&read_write, false)?;
        let mut target = self.instantiator.new_instance_minimal()?;
        for support in &mut supports {
            support.generate_test_value()?;
            support.apply(&mut target)?;
            support.assert_value_set(&target)?;
        }
        Ok(())
    }

    fn check_defaults(&self) -> Result<(), ContractError> {
        let defaults = self.instantiator.runtime_properties().default_properties();
        if defaults.is_empty() {
            debug!("no default-valued properties configured");
            return Ok(());
        }
        let supports = RuntimeProperties::map_to_support(defaults, false)?;
        // fresh instance: defaults must hold before any value was applied
        let target = self.instantiator.new_instance_minimal()?;
        for support in &supports {
            support.assert_default_value(&target)?;
        }
        Ok(())
    }
}

impl<T> TestContract<T> for BeanPropertyContract<T> {
    fn assert_contract(&self) -> Result<(), ContractError> {
        info!(
            "verifying bean-property contract\n{}",
            self.instantiator.runtime_properties()
        );
        self.check_getter_and_setter()?;
        self.check_defaults()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use property::generator::TextGenerator;
    use property::{AccessStrategy, PropertyValue, ScalarKind, ScalarValue};
    use std::sync::Arc;
    use tracing_test::traced_test;

    struct Plain {
        id: String,
    }

    #[test]
    #[traced_test]
    fn no_read_write_properties_is_a_warning_not_a_failure() {
        let metadata = PropertyMetadata::builder()
            .name("id")
            .kind(ScalarKind::Text)
            .generator(Arc::new(TextGenerator))
            .property_read_write(PropertyReadWrite::ReadOnly)
            .access(AccessStrategy::bean_read_only(|p: &Plain| {
                Some(PropertyValue::Scalar(ScalarValue::Text(p.id.clone())))
            }))
            .build()
            .unwrap();
        let instantiator = BeanInstantiator::new(
            || Plain { id: "fixed".to_string() },
            RuntimeProperties::new(vec![metadata]),
        );
        BeanPropertyContract::new(instantiator)
            .unwrap()
            .assert_contract()
            .unwrap();
        assert!(logs_contain("no properties that are both readable and writable"));
    }
}
