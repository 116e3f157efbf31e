// SPDX-License-Identifier: Apache-2.0
// Copyright Vouch Project Authors

//! Per-property descriptors.
//!
//! [`PropertyMetadata`] describes one property of a target type `T` (and, for
//! builder-mediated properties, of its builder type `B`). The access strategy is
//! resolved once, at metadata-construction time, into closures bound to the concrete
//! types; no name-based lookup happens on the access path.

use std::fmt;
use std::sync::Arc;

use derive_builder::Builder;

use crate::collection::CollectionType;
use crate::generator::ValueGenerator;
use crate::value::{PropertyValue, ScalarKind, ScalarValue};

/// Read a property value from a target. `None` means the target exposes no value.
pub type Getter<T> = Arc<dyn Fn(&T) -> Option<PropertyValue> + Send + Sync>;

/// Write a property value onto a target or builder.
pub type Setter<T> = Arc<dyn Fn(&mut T, &PropertyValue) + Send + Sync>;

/// Add one element through a builder's singular add method.
pub type ElementSetter<B> = Arc<dyn Fn(&mut B, &ScalarValue) + Send + Sync>;

/// Which read/write operations are legal for a property.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PropertyReadWrite {
    #[default]
    ReadWrite,
    ReadOnly,
    WriteOnly,
}

impl PropertyReadWrite {
    #[must_use]
    pub fn is_readable(self) -> bool {
        matches!(self, PropertyReadWrite::ReadWrite | PropertyReadWrite::ReadOnly)
    }

    #[must_use]
    pub fn is_writeable(self) -> bool {
        matches!(self, PropertyReadWrite::ReadWrite | PropertyReadWrite::WriteOnly)
    }
}

/// Member-level classification.
///
/// Transient properties are excluded from certain contracts (copy construction,
/// serialization) by convention of the calling contract; the core carries the flag
/// without enforcing anything.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PropertyMemberInfo {
    #[default]
    Default,
    Transient,
}

impl PropertyMemberInfo {
    #[must_use]
    pub fn is_transient(self) -> bool {
        matches!(self, PropertyMemberInfo::Transient)
    }
}

/// How two property values are compared during assertions.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum AssertionStrategy {
    /// Ordered equality.
    #[default]
    Default,
    /// Order-independent multiset equality for collection values.
    CollectionIgnoreOrder,
}

/// How a property is read from and written to its target.
///
/// `T` is the finished target type, `B` the builder type for builder-mediated
/// properties (`B = T` everywhere else).
pub enum AccessStrategy<T, B = T> {
    /// Direct accessor pair on the target. Either side may be absent; absence is
    /// reported as a missing read/write path when the operation is attempted.
    BeanAccessor {
        get: Option<Getter<T>>,
        set: Option<Setter<T>>,
    },
    /// A builder method writes the value; the finished target reads it back.
    BuilderMethod {
        set: Setter<B>,
        get: Option<Getter<T>>,
    },
    /// A builder exposing both a bulk setter and a singular add method for the same
    /// logical property. Collection values are applied element by element through
    /// `add_one`; scalar values and empty collections go through `set_all`.
    BuilderCollectionAndElement {
        set_all: Setter<B>,
        add_one: ElementSetter<B>,
        get: Option<Getter<T>>,
    },
    /// Compute-only: no read or write path (constructor parameters without a
    /// readable accessor).
    NoAccess,
}

impl<T, B> AccessStrategy<T, B> {
    /// Accessor pair on the target.
    pub fn bean(
        get: impl Fn(&T) -> Option<PropertyValue> + Send + Sync + 'static,
        set: impl Fn(&mut T, &PropertyValue) + Send + Sync + 'static,
    ) -> Self {
        AccessStrategy::BeanAccessor {
            get: Some(Arc::new(get)),
            set: Some(Arc::new(set)),
        }
    }

    /// Getter-only accessor (read-only properties, constructor parameters with a
    /// readable accessor).
    pub fn bean_read_only(
        get: impl Fn(&T) -> Option<PropertyValue> + Send + Sync + 'static,
    ) -> Self {
        AccessStrategy::BeanAccessor {
            get: Some(Arc::new(get)),
            set: None,
        }
    }

    /// Setter-only accessor (write-only properties).
    pub fn bean_write_only(
        set: impl Fn(&mut T, &PropertyValue) + Send + Sync + 'static,
    ) -> Self {
        AccessStrategy::BeanAccessor {
            get: None,
            set: Some(Arc::new(set)),
        }
    }

    /// Builder method plus read-back accessor on the finished target.
    pub fn builder_method(
        set: impl Fn(&mut B, &PropertyValue) + Send + Sync + 'static,
        get: impl Fn(&T) -> Option<PropertyValue> + Send + Sync + 'static,
    ) -> Self {
        AccessStrategy::BuilderMethod {
            set: Arc::new(set),
            get: Some(Arc::new(get)),
        }
    }

    /// Builder bulk/singular duality plus read-back accessor.
    pub fn builder_collection_and_element(
        set_all: impl Fn(&mut B, &PropertyValue) + Send + Sync + 'static,
        add_one: impl Fn(&mut B, &ScalarValue) + Send + Sync + 'static,
        get: impl Fn(&T) -> Option<PropertyValue> + Send + Sync + 'static,
    ) -> Self {
        AccessStrategy::BuilderCollectionAndElement {
            set_all: Arc::new(set_all),
            add_one: Arc::new(add_one),
            get: Some(Arc::new(get)),
        }
    }

    /// The read-back getter, whichever variant carries one.
    #[must_use]
    pub(crate) fn getter(&self) -> Option<&Getter<T>> {
        match self {
            AccessStrategy::BeanAccessor { get, .. }
            | AccessStrategy::BuilderMethod { get, .. }
            | AccessStrategy::BuilderCollectionAndElement { get, .. } => get.as_ref(),
            AccessStrategy::NoAccess => None,
        }
    }

    fn variant_name(&self) -> &'static str {
        match self {
            AccessStrategy::BeanAccessor { .. } => "bean-accessor",
            AccessStrategy::BuilderMethod { .. } => "builder-method",
            AccessStrategy::BuilderCollectionAndElement { .. } => {
                "builder-collection-and-element"
            }
            AccessStrategy::NoAccess => "no-access",
        }
    }
}

impl<T, B> Clone for AccessStrategy<T, B> {
    fn clone(&self) -> Self {
        match self {
            AccessStrategy::BeanAccessor { get, set } => AccessStrategy::BeanAccessor {
                get: get.clone(),
                set: set.clone(),
            },
            AccessStrategy::BuilderMethod { set, get } => AccessStrategy::BuilderMethod {
                set: set.clone(),
                get: get.clone(),
            },
            AccessStrategy::BuilderCollectionAndElement { set_all, add_one, get } => {
                AccessStrategy::BuilderCollectionAndElement {
                    set_all: set_all.clone(),
                    add_one: add_one.clone(),
                    get: get.clone(),
                }
            }
            AccessStrategy::NoAccess => AccessStrategy::NoAccess,
        }
    }
}

impl<T, B> fmt::Debug for AccessStrategy<T, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessStrategy::{}", self.variant_name())
    }
}

/// Immutable descriptor of one property.
///
/// Built through [`PropertyMetadataBuilder`]; `name` and closure-bearing fields are
/// fixed at construction time. Equality and `Debug` cover the descriptive fields only,
/// closures and generators are opaque.
#[derive(Builder)]
#[builder(pattern = "owned", build_fn(validate = "Self::validate"))]
pub struct PropertyMetadata<T, B = T> {
    /// Non-empty identifier, unique within a property set used by one contract.
    #[builder(setter(into))]
    name: String,
    /// The semantic element type (for collection-shaped properties: the element type,
    /// not the container type).
    kind: ScalarKind,
    /// Produces test values of `kind`.
    generator: Arc<dyn ValueGenerator>,
    /// Container shape, [`CollectionType::NoIterable`] for scalar properties.
    #[builder(default)]
    collection_type: CollectionType,
    /// Whether omitting this property must cause construction/validation to fail.
    #[builder(default)]
    required: bool,
    /// Whether the target exposes a non-null, generator-independent value before any
    /// value is set.
    #[builder(default)]
    default_value: bool,
    #[builder(default)]
    property_read_write: PropertyReadWrite,
    #[builder(default)]
    member_info: PropertyMemberInfo,
    /// Read/write closures bound to the target (and builder) type.
    access: AccessStrategy<T, B>,
    #[builder(default)]
    assertion: AssertionStrategy,
}

impl<T, B> PropertyMetadata<T, B> {
    /// A fresh builder.
    #[must_use]
    pub fn builder() -> PropertyMetadataBuilder<T, B> {
        PropertyMetadataBuilder::default()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> ScalarKind {
        self.kind
    }

    #[must_use]
    pub fn generator(&self) -> &Arc<dyn ValueGenerator> {
        &self.generator
    }

    #[must_use]
    pub fn collection_type(&self) -> CollectionType {
        self.collection_type
    }

    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    #[must_use]
    pub fn is_default_value(&self) -> bool {
        self.default_value
    }

    #[must_use]
    pub fn property_read_write(&self) -> PropertyReadWrite {
        self.property_read_write
    }

    #[must_use]
    pub fn member_info(&self) -> PropertyMemberInfo {
        self.member_info
    }

    #[must_use]
    pub fn access(&self) -> &AccessStrategy<T, B> {
        &self.access
    }

    #[must_use]
    pub fn assertion(&self) -> AssertionStrategy {
        self.assertion
    }

    /// Primitive-kinded scalar property: carries an implicit zero value and can never
    /// be observed as missing.
    #[must_use]
    pub fn is_primitive(&self) -> bool {
        self.collection_type == CollectionType::NoIterable && self.kind.is_primitive()
    }
}

impl<T, B> PropertyMetadataBuilder<T, B> {
    fn validate(&self) -> Result<(), String> {
        match &self.name {
            Some(name) if name.is_empty() => Err("property name must not be empty".to_string()),
            _ => Ok(()),
        }
    }
}

impl<T, B> Clone for PropertyMetadata<T, B> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            kind: self.kind,
            generator: Arc::clone(&self.generator),
            collection_type: self.collection_type,
            required: self.required,
            default_value: self.default_value,
            property_read_write: self.property_read_write,
            member_info: self.member_info,
            access: self.access.clone(),
            assertion: self.assertion,
        }
    }
}

impl<T, B> PartialEq for PropertyMetadata<T, B> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.kind == other.kind
            && self.collection_type == other.collection_type
            && self.required == other.required
            && self.default_value == other.default_value
            && self.property_read_write == other.property_read_write
            && self.member_info == other.member_info
            && self.assertion == other.assertion
    }
}

impl<T, B> fmt::Debug for PropertyMetadata<T, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyMetadata")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("collection_type", &self.collection_type)
            .field("required", &self.required)
            .field("default_value", &self.default_value)
            .field("property_read_write", &self.property_read_write)
            .field("member_info", &self.member_info)
            .field("access", &self.access)
            .field("assertion", &self.assertion)
            .finish()
    }
}

impl<T, B> fmt::Display for PropertyMetadata<T, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.kind)?;
        if self.collection_type != CollectionType::NoIterable {
            write!(f, " ({})", self.collection_type)?;
        }
        if self.required {
            write!(f, " [required]")?;
        }
        if self.default_value {
            write!(f, " [default]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::generator::{IntGenerator, TextGenerator};

    #[derive(Default)]
    struct Sample {
        label: Option<String>,
    }

    fn label_metadata() -> PropertyMetadata<Sample> {
        PropertyMetadata::builder()
            .name("label")
            .kind(ScalarKind::Text)
            .generator(Arc::new(TextGenerator))
            .access(AccessStrategy::bean(
                |target: &Sample| {
                    target
                        .label
                        .clone()
                        .map(|v| PropertyValue::Scalar(ScalarValue::Text(v)))
                },
                |target: &mut Sample, value: &PropertyValue| {
                    target.label =
                        value.as_scalar().and_then(|s| s.as_text()).map(str::to_string);
                },
            ))
            .build()
            .unwrap()
    }

    #[test]
    fn builder_rejects_empty_name() {
        let result = PropertyMetadata::<Sample>::builder()
            .name("")
            .kind(ScalarKind::Int)
            .generator(Arc::new(IntGenerator))
            .access(AccessStrategy::NoAccess)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn builder_defaults() {
        let metadata = label_metadata();
        assert_eq!(metadata.collection_type(), CollectionType::NoIterable);
        assert!(!metadata.is_required());
        assert!(!metadata.is_default_value());
        assert_eq!(metadata.property_read_write(), PropertyReadWrite::ReadWrite);
        assert_eq!(metadata.member_info(), PropertyMemberInfo::Default);
        assert_eq!(metadata.assertion(), AssertionStrategy::Default);
    }

    #[test]
    fn equality_ignores_closures() {
        assert_eq!(label_metadata(), label_metadata());
    }

    #[test]
    fn primitive_detection() {
        let metadata = PropertyMetadata::<Sample>::builder()
            .name("count")
            .kind(ScalarKind::Int)
            .generator(Arc::new(IntGenerator))
            .access(AccessStrategy::NoAccess)
            .build()
            .unwrap();
        assert!(metadata.is_primitive());
        // collection-shaped properties are never primitive
        let metadata = PropertyMetadata::<Sample>::builder()
            .name("counts")
            .kind(ScalarKind::Int)
            .generator(Arc::new(IntGenerator))
            .collection_type(CollectionType::List)
            .access(AccessStrategy::NoAccess)
            .build()
            .unwrap();
        assert!(!metadata.is_primitive());
    }
}
