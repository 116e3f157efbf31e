// SPDX-License-Identifier: Apache-2.0
// Copyright Vouch Project Authors

//! Bean-style instantiation: no-arg construction, then setter application.

use std::sync::Arc;

use tracing::debug;

use property::{PropertySupport, RuntimeProperties};

use crate::error::InstantiationError;
use crate::{Instantiator, prepare_supports};

/// Constructs targets through a no-arg constructor and mutates them via their bean
/// accessors.
///
/// This strategy has no failure path for a withheld required property: construction
/// always succeeds and simply leaves the property unset. Required-ness enforcement is
/// therefore entirely the calling contract's concern.
pub struct BeanInstantiator<T> {
    constructor: Arc<dyn Fn() -> T + Send + Sync>,
    runtime_properties: RuntimeProperties<T>,
}

impl<T> BeanInstantiator<T> {
    pub fn new(
        constructor: impl Fn() -> T + Send + Sync + 'static,
        runtime_properties: RuntimeProperties<T>,
    ) -> Self {
        Self {
            constructor: Arc::new(constructor),
            runtime_properties,
        }
    }
}

impl<T> Instantiator<T> for BeanInstantiator<T> {
    fn runtime_properties(&self) -> &RuntimeProperties<T> {
        &self.runtime_properties
    }

    fn new_instance(
        &self,
        properties: &[PropertySupport<T>],
        generate_values: bool,
    ) -> Result<T, InstantiationError> {
        let prepared = prepare_supports(properties, generate_values)?;
        let mut target = (self.constructor)();
        for support in &prepared {
            debug!(property = support.name(), "applying property");
            support.apply(&mut target)?;
        }
        Ok(target)
    }

    fn supports_minimal(&self) -> bool {
        true
    }

    fn new_instance_minimal(&self) -> Result<T, InstantiationError> {
        Ok((self.constructor)())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use property::generator::TextGenerator;
    use property::{AccessStrategy, PropertyMetadata, PropertyValue, ScalarKind, ScalarValue};
    use std::sync::Arc as StdArc;

    #[derive(Default)]
    struct Widget {
        label: Option<String>,
    }

    fn runtime() -> RuntimeProperties<Widget> {
        let metadata = PropertyMetadata::builder()
            .name("label")
            .kind(ScalarKind::Text)
            .generator(StdArc::new(TextGenerator))
            .access(AccessStrategy::bean(
                |w: &Widget| {
                    w.label
                        .clone()
                        .map(|v| PropertyValue::Scalar(ScalarValue::Text(v)))
                },
                |w: &mut Widget, value: &PropertyValue| {
                    w.label = value.as_scalar().and_then(|s| s.as_text()).map(str::to_string);
                },
            ))
            .build()
            .unwrap();
        RuntimeProperties::new(vec![metadata])
    }

    #[test]
    fn minimal_instance_has_no_properties_applied() {
        let instantiator = BeanInstantiator::new(Widget::default, runtime());
        assert!(instantiator.supports_minimal());
        let widget = instantiator.new_instance_minimal().unwrap();
        assert!(widget.label.is_none());
    }

    #[test]
    fn new_instance_applies_all_given_properties() {
        let instantiator = BeanInstantiator::new(Widget::default, runtime());
        let supports = instantiator.runtime_properties().all_as_support(true).unwrap();
        let widget = instantiator.new_instance(&supports, false).unwrap();
        assert!(widget.label.is_some());
    }

    #[test]
    fn new_instance_generates_missing_values_on_request() {
        let instantiator = BeanInstantiator::new(Widget::default, runtime());
        let supports = instantiator.runtime_properties().all_as_support(false).unwrap();
        let widget = instantiator.new_instance(&supports, true).unwrap();
        assert!(widget.label.is_some());
    }
}
