// SPDX-License-Identifier: Apache-2.0
// Copyright Vouch Project Authors

//! Bean-style sample targets: a no-arg constructor plus accessor pairs.

use std::sync::Arc;

use instantiate::BeanInstantiator;
use property::generator::{TextGenerator, UintGenerator, UuidGenerator};
use property::{
    AccessStrategy, CollectionType, CollectionValue, PropertyMetadata, PropertyReadWrite,
    PropertyValue, RuntimeProperties, ScalarKind, ScalarValue,
};

/// A well-behaved bean: every accessor pair round-trips, `mode` carries a
/// constructor-supplied default, and `id` is read-only.
pub struct Probe {
    pub name: Option<String>,
    pub attempts: u64,
    pub tags: Vec<String>,
    pub mode: String,
    pub id: uuid::Uuid,
}

impl Default for Probe {
    fn default() -> Self {
        Self {
            name: None,
            attempts: 0,
            tags: Vec::new(),
            mode: "standard".to_string(),
            id: uuid::Uuid::new_v4(),
        }
    }
}

#[must_use]
pub fn probe_properties() -> Vec<PropertyMetadata<Probe>> {
    vec![
        PropertyMetadata::builder()
            .name("name")
            .kind(ScalarKind::Text)
            .generator(Arc::new(TextGenerator))
            .access(AccessStrategy::bean(
                |probe: &Probe| {
                    probe
                        .name
                        .clone()
                        .map(|v| PropertyValue::Scalar(ScalarValue::Text(v)))
                },
                |probe: &mut Probe, value: &PropertyValue| {
                    probe.name = value
                        .as_scalar()
                        .and_then(|s| s.as_text())
                        .map(str::to_string);
                },
            ))
            .build()
            .unwrap(),
        PropertyMetadata::builder()
            .name("attempts")
            .kind(ScalarKind::Uint)
            .generator(Arc::new(UintGenerator))
            .access(AccessStrategy::bean(
                |probe: &Probe| Some(PropertyValue::Scalar(ScalarValue::Uint(probe.attempts))),
                |probe: &mut Probe, value: &PropertyValue| {
                    if let Some(v) = value.as_scalar().and_then(ScalarValue::as_uint) {
                        probe.attempts = v;
                    }
                },
            ))
            .build()
            .unwrap(),
        PropertyMetadata::builder()
            .name("tags")
            .kind(ScalarKind::Text)
            .generator(Arc::new(TextGenerator))
            .collection_type(CollectionType::List)
            .access(AccessStrategy::bean(
                |probe: &Probe| {
                    Some(PropertyValue::Collection(CollectionValue::new(
                        CollectionType::List,
                        probe
                            .tags
                            .iter()
                            .map(|t| ScalarValue::Text(t.clone()))
                            .collect(),
                    )))
                },
                |probe: &mut Probe, value: &PropertyValue| {
                    if let Some(collection) = value.as_collection() {
                        probe.tags = collection
                            .elements()
                            .iter()
                            .filter_map(|e| e.as_text().map(str::to_string))
                            .collect();
                    }
                },
            ))
            .build()
            .unwrap(),
        PropertyMetadata::builder()
            .name("mode")
            .kind(ScalarKind::Text)
            .generator(Arc::new(TextGenerator))
            .default_value(true)
            .access(AccessStrategy::bean(
                |probe: &Probe| Some(PropertyValue::Scalar(ScalarValue::Text(probe.mode.clone()))),
                |probe: &mut Probe, value: &PropertyValue| {
                    if let Some(v) = value.as_scalar().and_then(|s| s.as_text()) {
                        probe.mode = v.to_string();
                    }
                },
            ))
            .build()
            .unwrap(),
        PropertyMetadata::builder()
            .name("id")
            .kind(ScalarKind::Uuid)
            .generator(Arc::new(UuidGenerator))
            .property_read_write(PropertyReadWrite::ReadOnly)
            .access(AccessStrategy::bean_read_only(|probe: &Probe| {
                Some(PropertyValue::Scalar(ScalarValue::Uuid(probe.id)))
            }))
            .build()
            .unwrap(),
    ]
}

/// [`Probe`] behind the uniform instantiation contract.
#[must_use]
pub fn probe_instantiator() -> BeanInstantiator<Probe> {
    BeanInstantiator::new(Probe::default, RuntimeProperties::new(probe_properties()))
}

/// A broken bean: the `note` getter drops the first character of whatever the setter
/// stored, so the round-trip never matches.
#[derive(Default)]
pub struct LossyProbe {
    pub note: Option<String>,
}

#[must_use]
pub fn lossy_probe_properties() -> Vec<PropertyMetadata<LossyProbe>> {
    vec![
        PropertyMetadata::builder()
            .name("note")
            .kind(ScalarKind::Text)
            .generator(Arc::new(TextGenerator))
            .access(AccessStrategy::bean(
                |probe: &LossyProbe| {
                    probe.note.as_ref().map(|v| {
                        PropertyValue::Scalar(ScalarValue::Text(v.chars().skip(1).collect()))
                    })
                },
                |probe: &mut LossyProbe, value: &PropertyValue| {
                    probe.note = value
                        .as_scalar()
                        .and_then(|s| s.as_text())
                        .map(str::to_string);
                },
            ))
            .build()
            .unwrap(),
    ]
}

#[must_use]
pub fn lossy_probe_instantiator() -> BeanInstantiator<LossyProbe> {
    BeanInstantiator::new(
        LossyProbe::default,
        RuntimeProperties::new(lossy_probe_properties()),
    )
}

/// A broken bean: `mode` is declared default-valued but a fresh instance exposes no
/// value for it.
#[derive(Default)]
pub struct UninitializedProbe {
    pub mode: Option<String>,
}

#[must_use]
pub fn uninitialized_probe_properties() -> Vec<PropertyMetadata<UninitializedProbe>> {
    vec![
        PropertyMetadata::builder()
            .name("mode")
            .kind(ScalarKind::Text)
            .generator(Arc::new(TextGenerator))
            .default_value(true)
            .access(AccessStrategy::bean(
                |probe: &UninitializedProbe| {
                    probe
                        .mode
                        .clone()
                        .map(|v| PropertyValue::Scalar(ScalarValue::Text(v)))
                },
                |probe: &mut UninitializedProbe, value: &PropertyValue| {
                    probe.mode = value
                        .as_scalar()
                        .and_then(|s| s.as_text())
                        .map(str::to_string);
                },
            ))
            .build()
            .unwrap(),
    ]
}

#[must_use]
pub fn uninitialized_probe_instantiator() -> BeanInstantiator<UninitializedProbe> {
    BeanInstantiator::new(
        UninitializedProbe::default,
        RuntimeProperties::new(uninitialized_probe_properties()),
    )
}
