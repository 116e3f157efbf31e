// SPDX-License-Identifier: Apache-2.0
// Copyright Vouch Project Authors

//! Aggregated property views.
//!
//! [`RuntimeProperties`] holds the full ordered property set for one contract run and
//! the derived filtered views the instantiators and contract algorithms work from.

use std::collections::BTreeSet;
use std::fmt;

use ordermap::OrderMap;

use crate::error::PropertyError;
use crate::metadata::PropertyMetadata;
use crate::support::PropertySupport;

/// Immutable aggregate of a full property set plus filtered views.
///
/// Equality is defined over the full property list.
pub struct RuntimeProperties<T, B = T> {
    all_properties: Vec<PropertyMetadata<T, B>>,
    required_properties: Vec<PropertyMetadata<T, B>>,
    additional_properties: Vec<PropertyMetadata<T, B>>,
    default_properties: Vec<PropertyMetadata<T, B>>,
    writable_properties: Vec<PropertyMetadata<T, B>>,
}

impl<T, B> RuntimeProperties<T, B> {
    /// Aggregate a property set into its filtered views.
    #[must_use]
    pub fn new(properties: Vec<PropertyMetadata<T, B>>) -> Self {
        let required_properties = properties
            .iter()
            .filter(|p| p.is_required())
            .cloned()
            .collect();
        let additional_properties = properties
            .iter()
            .filter(|p| !p.is_required())
            .cloned()
            .collect();
        let default_properties = properties
            .iter()
            .filter(|p| p.is_default_value())
            .cloned()
            .collect();
        let writable_properties = properties
            .iter()
            .filter(|p| p.property_read_write().is_writeable())
            .cloned()
            .collect();
        Self {
            all_properties: properties,
            required_properties,
            additional_properties,
            default_properties,
            writable_properties,
        }
    }

    /// Reject property sets containing duplicate names.
    ///
    /// Name uniqueness is an invariant of every property set consumed by a contract;
    /// contract factories call this before building anything.
    pub fn assert_unique_names(
        properties: &[PropertyMetadata<T, B>],
    ) -> Result<(), PropertyError> {
        let mut seen = BTreeSet::new();
        for property in properties {
            if !seen.insert(property.name()) {
                return Err(PropertyError::DuplicateName {
                    name: property.name().to_string(),
                });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn all_properties(&self) -> &[PropertyMetadata<T, B>] {
        &self.all_properties
    }

    #[must_use]
    pub fn required_properties(&self) -> &[PropertyMetadata<T, B>] {
        &self.required_properties
    }

    /// All non-required properties.
    #[must_use]
    pub fn additional_properties(&self) -> &[PropertyMetadata<T, B>] {
        &self.additional_properties
    }

    #[must_use]
    pub fn default_properties(&self) -> &[PropertyMetadata<T, B>] {
        &self.default_properties
    }

    #[must_use]
    pub fn writable_properties(&self) -> &[PropertyMetadata<T, B>] {
        &self.writable_properties
    }

    /// Wrap a slice of metadata into fresh supports, optionally pre-generating test
    /// values.
    pub fn map_to_support(
        properties: &[PropertyMetadata<T, B>],
        generate_test_value: bool,
    ) -> Result<Vec<PropertySupport<T, B>>, PropertyError> {
        let mut supports: Vec<PropertySupport<T, B>> = properties
            .iter()
            .cloned()
            .map(PropertySupport::new)
            .collect();
        if generate_test_value {
            for support in &mut supports {
                support.generate_test_value()?;
            }
        }
        Ok(supports)
    }

    pub fn all_as_support(
        &self,
        generate_test_value: bool,
    ) -> Result<Vec<PropertySupport<T, B>>, PropertyError> {
        Self::map_to_support(&self.all_properties, generate_test_value)
    }

    pub fn required_as_support(
        &self,
        generate_test_value: bool,
    ) -> Result<Vec<PropertySupport<T, B>>, PropertyError> {
        Self::map_to_support(&self.required_properties, generate_test_value)
    }

    pub fn additional_as_support(
        &self,
        generate_test_value: bool,
    ) -> Result<Vec<PropertySupport<T, B>>, PropertyError> {
        Self::map_to_support(&self.additional_properties, generate_test_value)
    }

    pub fn default_as_support(
        &self,
        generate_test_value: bool,
    ) -> Result<Vec<PropertySupport<T, B>>, PropertyError> {
        Self::map_to_support(&self.default_properties, generate_test_value)
    }

    pub fn writable_as_support(
        &self,
        generate_test_value: bool,
    ) -> Result<Vec<PropertySupport<T, B>>, PropertyError> {
        Self::map_to_support(&self.writable_properties, generate_test_value)
    }

    /// Like [`Self::all_as_support`], restricted to the named properties.
    pub fn all_as_support_filtered(
        &self,
        generate_test_value: bool,
        names: &[&str],
    ) -> Result<Vec<PropertySupport<T, B>>, PropertyError> {
        let filtered: Vec<PropertyMetadata<T, B>> = self
            .all_properties
            .iter()
            .filter(|p| names.contains(&p.name()))
            .cloned()
            .collect();
        Self::map_to_support(&filtered, generate_test_value)
    }

    /// A name-keyed view over all properties as supports, in property order.
    pub fn as_map_view(
        &self,
        generate_test_value: bool,
    ) -> Result<OrderMap<String, PropertySupport<T, B>>, PropertyError> {
        let supports = self.all_as_support(generate_test_value)?;
        Ok(supports
            .into_iter()
            .map(|support| (support.name().to_string(), support))
            .collect())
    }

    /// The names of the given properties.
    #[must_use]
    pub fn extract_names(properties: &[PropertyMetadata<T, B>]) -> BTreeSet<String> {
        properties.iter().map(|p| p.name().to_string()).collect()
    }
}

// manual impls: derives would bound T and B
impl<T, B> Clone for RuntimeProperties<T, B> {
    fn clone(&self) -> Self {
        Self {
            all_properties: self.all_properties.clone(),
            required_properties: self.required_properties.clone(),
            additional_properties: self.additional_properties.clone(),
            default_properties: self.default_properties.clone(),
            writable_properties: self.writable_properties.clone(),
        }
    }
}

impl<T, B> fmt::Debug for RuntimeProperties<T, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeProperties")
            .field("all_properties", &self.all_properties)
            .finish_non_exhaustive()
    }
}

impl<T, B> PartialEq for RuntimeProperties<T, B> {
    fn eq(&self, other: &Self) -> bool {
        self.all_properties == other.all_properties
    }
}

fn join_names<T, B>(properties: &[PropertyMetadata<T, B>]) -> String {
    if properties.is_empty() {
        return "-".to_string();
    }
    properties
        .iter()
        .map(PropertyMetadata::name)
        .collect::<Vec<_>>()
        .join(", ")
}

impl<T, B> fmt::Display for RuntimeProperties<T, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Required properties: {}", join_names(&self.required_properties))?;
        writeln!(
            f,
            "Additional properties: {}",
            join_names(&self.additional_properties)
        )?;
        writeln!(
            f,
            "Default valued properties: {}",
            join_names(&self.default_properties)
        )?;
        write!(f, "Writable properties: {}", join_names(&self.writable_properties))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::generator::TextGenerator;
    use crate::metadata::{AccessStrategy, PropertyReadWrite};
    use crate::value::ScalarKind;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    struct Widget;

    fn metadata(
        name: &str,
        required: bool,
        default_value: bool,
        rw: PropertyReadWrite,
    ) -> PropertyMetadata<Widget> {
        PropertyMetadata::builder()
            .name(name)
            .kind(ScalarKind::Text)
            .generator(Arc::new(TextGenerator))
            .required(required)
            .default_value(default_value)
            .property_read_write(rw)
            .access(AccessStrategy::NoAccess)
            .build()
            .unwrap()
    }

    fn sample_set() -> Vec<PropertyMetadata<Widget>> {
        vec![
            metadata("alpha", true, false, PropertyReadWrite::ReadWrite),
            metadata("beta", false, true, PropertyReadWrite::ReadWrite),
            metadata("gamma", false, false, PropertyReadWrite::ReadOnly),
            metadata("delta", true, false, PropertyReadWrite::WriteOnly),
        ]
    }

    #[test]
    fn views_partition_the_property_set() {
        let runtime = RuntimeProperties::new(sample_set());
        let names = |properties: &[PropertyMetadata<Widget>]| {
            properties.iter().map(|p| p.name().to_string()).collect::<Vec<_>>()
        };
        assert_eq!(names(runtime.all_properties()), ["alpha", "beta", "gamma", "delta"]);
        assert_eq!(names(runtime.required_properties()), ["alpha", "delta"]);
        assert_eq!(names(runtime.additional_properties()), ["beta", "gamma"]);
        assert_eq!(names(runtime.default_properties()), ["beta"]);
        assert_eq!(names(runtime.writable_properties()), ["alpha", "beta", "delta"]);
    }

    #[test]
    fn equality_is_over_the_full_list() {
        let a = RuntimeProperties::new(sample_set());
        let b = RuntimeProperties::new(sample_set());
        assert_eq!(a, b);
        let c = RuntimeProperties::new(vec![metadata(
            "alpha",
            true,
            false,
            PropertyReadWrite::ReadWrite,
        )]);
        assert_ne!(a, c);
    }

    #[test]
    fn support_conversion_pre_generates_on_request() {
        let runtime = RuntimeProperties::new(sample_set());
        for support in runtime.all_as_support(false).unwrap() {
            assert!(support.test_value().is_none());
        }
        for support in runtime.all_as_support(true).unwrap() {
            assert!(support.test_value().is_some());
        }
    }

    #[test]
    fn writable_conversion_covers_write_capable_properties() {
        let runtime = RuntimeProperties::new(sample_set());
        let supports = runtime.writable_as_support(true).unwrap();
        let names: Vec<&str> = supports.iter().map(PropertySupport::name).collect();
        assert_eq!(names, ["alpha", "beta", "delta"]);
        for support in &supports {
            assert!(support.test_value().is_some());
        }
    }

    #[test]
    fn filtered_conversion_keeps_only_named_properties() {
        let runtime = RuntimeProperties::new(sample_set());
        let filtered = runtime.all_as_support_filtered(false, &["beta", "delta"]).unwrap();
        let names: Vec<&str> = filtered.iter().map(PropertySupport::name).collect();
        assert_eq!(names, ["beta", "delta"]);
    }

    #[test]
    fn map_view_preserves_property_order() {
        let runtime = RuntimeProperties::new(sample_set());
        let view = runtime.as_map_view(false).unwrap();
        let keys: Vec<&str> = view.keys().map(String::as_str).collect();
        assert_eq!(keys, ["alpha", "beta", "gamma", "delta"]);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut properties = sample_set();
        properties.push(metadata("alpha", false, false, PropertyReadWrite::ReadWrite));
        assert!(matches!(
            RuntimeProperties::assert_unique_names(&properties),
            Err(PropertyError::DuplicateName { name }) if name == "alpha"
        ));
    }

    #[test]
    fn display_lists_the_views() {
        let runtime = RuntimeProperties::new(sample_set());
        let rendered = runtime.to_string();
        assert!(rendered.contains("Required properties: alpha, delta"));
        assert!(rendered.contains("Default valued properties: beta"));
    }
}
