// SPDX-License-Identifier: Apache-2.0
// Copyright Vouch Project Authors

//! Builder-mediated instantiation.

use std::sync::Arc;

use tracing::debug;

use property::{PropertySupport, RuntimeProperties};

use crate::error::InstantiationError;
use crate::{Instantiator, prepare_supports};

/// Drives a builder type `B` to produce targets of type `T`.
///
/// The builder-producing entry point is resolved once at construction; every
/// [`Self::new_builder_instance`] call invokes it fresh. The build closure returns
/// `Result`, and a rejection there is the strategy's main value: the build method is
/// the required-ness oracle.
pub struct BuilderInstantiator<T, B> {
    new_builder: Arc<dyn Fn() -> B + Send + Sync>,
    build_fn: Arc<dyn Fn(B) -> Result<T, String> + Send + Sync>,
}

impl<T, B> BuilderInstantiator<T, B> {
    /// Entry point obtained from the builder type's own constructor.
    pub fn from_constructor(
        new_builder: impl Fn() -> B + Send + Sync + 'static,
        build_fn: impl Fn(B) -> Result<T, String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            new_builder: Arc::new(new_builder),
            build_fn: Arc::new(build_fn),
        }
    }

    /// Entry point obtained from a static factory method, possibly hosted on the
    /// produced type or on a separate enclosing type.
    pub fn from_factory(
        factory: impl Fn() -> B + Send + Sync + 'static,
        build_fn: impl Fn(B) -> Result<T, String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            new_builder: Arc::new(factory),
            build_fn: Arc::new(build_fn),
        }
    }

    /// A fresh builder from the resolved entry point.
    #[must_use]
    pub fn new_builder_instance(&self) -> B {
        (self.new_builder)()
    }

    /// Invoke the build method.
    pub fn build(&self, builder: B) -> Result<T, InstantiationError> {
        (self.build_fn)(builder).map_err(|reason| InstantiationError::BuildRejected {
            type_name: std::any::type_name::<T>(),
            reason,
        })
    }
}

impl<T, B> Clone for BuilderInstantiator<T, B> {
    fn clone(&self) -> Self {
        Self {
            new_builder: Arc::clone(&self.new_builder),
            build_fn: Arc::clone(&self.build_fn),
        }
    }
}

/// Adapter exposing a [`BuilderInstantiator`] through the uniform [`Instantiator`]
/// contract: apply the given supports to a fresh builder, then build.
pub struct BuilderParameterizedInstantiator<T, B> {
    inner: BuilderInstantiator<T, B>,
    runtime_properties: RuntimeProperties<T, B>,
}

impl<T, B> BuilderParameterizedInstantiator<T, B> {
    pub fn new(
        inner: BuilderInstantiator<T, B>,
        runtime_properties: RuntimeProperties<T, B>,
    ) -> Self {
        Self {
            inner,
            runtime_properties,
        }
    }
}

impl<T, B> Instantiator<T, B> for BuilderParameterizedInstantiator<T, B> {
    fn runtime_properties(&self) -> &RuntimeProperties<T, B> {
        &self.runtime_properties
    }

    fn new_instance(
        &self,
        properties: &[PropertySupport<T, B>],
        generate_values: bool,
    ) -> Result<T, InstantiationError> {
        let prepared = prepare_supports(properties, generate_values)?;
        let mut builder = self.inner.new_builder_instance();
        for support in &prepared {
            if support.test_value().is_some() {
                debug!(property = support.name(), "applying property to builder");
                support.apply_to_builder(&mut builder)?;
            }
        }
        self.inner.build(builder)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use property::generator::UintGenerator;
    use property::{AccessStrategy, PropertyMetadata, PropertyValue, ScalarKind, ScalarValue};
    use std::sync::Arc as StdArc;

    struct Token {
        seq: u64,
    }

    #[derive(Default)]
    struct TokenBuilder {
        seq: Option<u64>,
    }

    fn instantiator() -> BuilderInstantiator<Token, TokenBuilder> {
        BuilderInstantiator::from_constructor(TokenBuilder::default, |builder: TokenBuilder| {
            builder
                .seq
                .map(|seq| Token { seq })
                .ok_or_else(|| "seq is required".to_string())
        })
    }

    fn runtime() -> RuntimeProperties<Token, TokenBuilder> {
        let metadata = PropertyMetadata::builder()
            .name("seq")
            .kind(ScalarKind::Uint)
            .generator(StdArc::new(UintGenerator))
            .required(true)
            .access(AccessStrategy::builder_method(
                |builder: &mut TokenBuilder, value: &PropertyValue| {
                    builder.seq = value.as_scalar().and_then(ScalarValue::as_uint);
                },
                |token: &Token| Some(PropertyValue::Scalar(ScalarValue::Uint(token.seq))),
            ))
            .build()
            .unwrap();
        RuntimeProperties::new(vec![metadata])
    }

    #[test]
    fn build_surfaces_rejection() {
        let instantiator = instantiator();
        let builder = instantiator.new_builder_instance();
        assert!(matches!(
            instantiator.build(builder),
            Err(InstantiationError::BuildRejected { .. })
        ));
    }

    #[test]
    fn parameterized_adapter_applies_then_builds() {
        let adapter = BuilderParameterizedInstantiator::new(instantiator(), runtime());
        let supports = adapter.runtime_properties().all_as_support(true).unwrap();
        let token = adapter.new_instance(&supports, false).unwrap();
        supports[0].assert_value_set(&token).unwrap();
    }

    #[test]
    fn valueless_supports_are_treated_as_absent() {
        let adapter = BuilderParameterizedInstantiator::new(instantiator(), runtime());
        let supports = adapter.runtime_properties().all_as_support(false).unwrap();
        assert!(matches!(
            adapter.new_instance(&supports, false),
            Err(InstantiationError::BuildRejected { .. })
        ));
    }
}
