// SPDX-License-Identifier: Apache-2.0
// Copyright Vouch Project Authors

//! Builder-mediated sample targets.
//!
//! [`Endpoint`] stores its aliases sorted, while the builders accept them in insertion
//! order; the alias property therefore needs order-independent assertion and exercises
//! the bulk/singular builder duality.

use std::sync::Arc;

use instantiate::BuilderInstantiator;
use property::generator::{TextGenerator, UintGenerator};
use property::{
    AccessStrategy, AssertionStrategy, CollectionType, CollectionValue, PropertyMetadata,
    PropertyValue, ScalarKind, ScalarValue,
};

pub struct Endpoint {
    pub host: String,
    pub port: u64,
    pub aliases: Vec<String>,
}

impl Endpoint {
    fn new(host: String, port: u64, mut aliases: Vec<String>) -> Self {
        aliases.sort();
        Self {
            host,
            port,
            aliases,
        }
    }
}

/// A well-behaved builder: `build` rejects a missing host or port.
#[derive(Default)]
pub struct EndpointBuilder {
    pub host: Option<String>,
    pub port: Option<u64>,
    pub aliases: Vec<String>,
}

impl EndpointBuilder {
    pub fn build(self) -> Result<Endpoint, String> {
        let host = self.host.ok_or_else(|| "host is required".to_string())?;
        let port = self.port.ok_or_else(|| "port is required".to_string())?;
        Ok(Endpoint::new(host, port, self.aliases))
    }
}

/// A broken builder: a missing host is silently replaced instead of rejected.
#[derive(Default)]
pub struct CarelessEndpointBuilder {
    pub host: Option<String>,
    pub port: Option<u64>,
    pub aliases: Vec<String>,
}

impl CarelessEndpointBuilder {
    pub fn build(self) -> Result<Endpoint, String> {
        let host = self.host.unwrap_or_default();
        let port = self.port.ok_or_else(|| "port is required".to_string())?;
        Ok(Endpoint::new(host, port, self.aliases))
    }
}

fn read_host(endpoint: &Endpoint) -> Option<PropertyValue> {
    Some(PropertyValue::Scalar(ScalarValue::Text(
        endpoint.host.clone(),
    )))
}

fn read_port(endpoint: &Endpoint) -> Option<PropertyValue> {
    Some(PropertyValue::Scalar(ScalarValue::Uint(endpoint.port)))
}

fn read_aliases(endpoint: &Endpoint) -> Option<PropertyValue> {
    Some(PropertyValue::Collection(CollectionValue::new(
        CollectionType::List,
        endpoint
            .aliases
            .iter()
            .map(|a| ScalarValue::Text(a.clone()))
            .collect(),
    )))
}

fn write_text(slot: &mut Option<String>, value: &PropertyValue) {
    *slot = value
        .as_scalar()
        .and_then(|s| s.as_text())
        .map(str::to_string);
}

fn write_aliases(slot: &mut Vec<String>, value: &PropertyValue) {
    if let Some(collection) = value.as_collection() {
        *slot = collection
            .elements()
            .iter()
            .filter_map(|e| e.as_text().map(str::to_string))
            .collect();
    }
}

#[must_use]
pub fn endpoint_properties() -> Vec<PropertyMetadata<Endpoint, EndpointBuilder>> {
    vec![
        PropertyMetadata::builder()
            .name("host")
            .kind(ScalarKind::Text)
            .generator(Arc::new(TextGenerator))
            .required(true)
            .access(AccessStrategy::builder_method(
                |builder: &mut EndpointBuilder, value: &PropertyValue| {
                    write_text(&mut builder.host, value);
                },
                read_host,
            ))
            .build()
            .unwrap(),
        PropertyMetadata::builder()
            .name("port")
            .kind(ScalarKind::Uint)
            .generator(Arc::new(UintGenerator))
            .required(true)
            .access(AccessStrategy::builder_method(
                |builder: &mut EndpointBuilder, value: &PropertyValue| {
                    builder.port = value.as_scalar().and_then(ScalarValue::as_uint);
                },
                read_port,
            ))
            .build()
            .unwrap(),
        PropertyMetadata::builder()
            .name("aliases")
            .kind(ScalarKind::Text)
            .generator(Arc::new(TextGenerator))
            .collection_type(CollectionType::List)
            .assertion(AssertionStrategy::CollectionIgnoreOrder)
            .access(AccessStrategy::builder_collection_and_element(
                |builder: &mut EndpointBuilder, value: &PropertyValue| {
                    write_aliases(&mut builder.aliases, value);
                },
                |builder: &mut EndpointBuilder, element: &ScalarValue| {
                    if let Some(alias) = element.as_text() {
                        builder.aliases.push(alias.to_string());
                    }
                },
                read_aliases,
            ))
            .build()
            .unwrap(),
    ]
}

#[must_use]
pub fn careless_endpoint_properties() -> Vec<PropertyMetadata<Endpoint, CarelessEndpointBuilder>> {
    vec![
        PropertyMetadata::builder()
            .name("host")
            .kind(ScalarKind::Text)
            .generator(Arc::new(TextGenerator))
            .required(true)
            .access(AccessStrategy::builder_method(
                |builder: &mut CarelessEndpointBuilder, value: &PropertyValue| {
                    write_text(&mut builder.host, value);
                },
                read_host,
            ))
            .build()
            .unwrap(),
        PropertyMetadata::builder()
            .name("port")
            .kind(ScalarKind::Uint)
            .generator(Arc::new(UintGenerator))
            .required(true)
            .access(AccessStrategy::builder_method(
                |builder: &mut CarelessEndpointBuilder, value: &PropertyValue| {
                    builder.port = value.as_scalar().and_then(ScalarValue::as_uint);
                },
                read_port,
            ))
            .build()
            .unwrap(),
    ]
}

#[must_use]
pub fn endpoint_instantiator() -> BuilderInstantiator<Endpoint, EndpointBuilder> {
    BuilderInstantiator::from_constructor(EndpointBuilder::default, EndpointBuilder::build)
}

#[must_use]
pub fn careless_endpoint_instantiator() -> BuilderInstantiator<Endpoint, CarelessEndpointBuilder> {
    BuilderInstantiator::from_constructor(
        CarelessEndpointBuilder::default,
        CarelessEndpointBuilder::build,
    )
}
