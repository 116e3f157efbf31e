// SPDX-License-Identifier: Apache-2.0
// Copyright Vouch Project Authors

//! Value generators.
//!
//! A generator produces one type-valid [`ScalarValue`] per call, independent of
//! previous calls. The engine never inspects *how* a value is produced; randomized and
//! constant generators are interchangeable. Generators are held behind
//! `Arc<dyn ValueGenerator>` inside [`crate::PropertyMetadata`] so metadata stays
//! cheaply cloneable.

use rand::RngExt;
use rand::distr::{Alphanumeric, SampleString};

use crate::value::{ScalarKind, ScalarValue};

/// Produce one value of a declared scalar kind.
pub trait ValueGenerator: Send + Sync {
    /// The kind every produced value belongs to.
    fn kind(&self) -> ScalarKind;

    /// Produce the next value. May be random or constant, but must match [`Self::kind`].
    fn next_value(&self) -> ScalarValue;
}

/// Random alphanumeric strings of length 1..=32.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextGenerator;

impl ValueGenerator for TextGenerator {
    fn kind(&self) -> ScalarKind {
        ScalarKind::Text
    }

    fn next_value(&self) -> ScalarValue {
        let mut rng = rand::rng();
        let len = rng.random_range(1..=32);
        ScalarValue::Text(Alphanumeric.sample_string(&mut rng, len))
    }
}

/// Uniformly random `i64` values.
#[derive(Debug, Default, Clone, Copy)]
pub struct IntGenerator;

impl ValueGenerator for IntGenerator {
    fn kind(&self) -> ScalarKind {
        ScalarKind::Int
    }

    fn next_value(&self) -> ScalarValue {
        ScalarValue::Int(rand::rng().random())
    }
}

/// Uniformly random `u64` values.
#[derive(Debug, Default, Clone, Copy)]
pub struct UintGenerator;

impl ValueGenerator for UintGenerator {
    fn kind(&self) -> ScalarKind {
        ScalarKind::Uint
    }

    fn next_value(&self) -> ScalarValue {
        ScalarValue::Uint(rand::rng().random())
    }
}

/// Fair coin flips.
#[derive(Debug, Default, Clone, Copy)]
pub struct BoolGenerator;

impl ValueGenerator for BoolGenerator {
    fn kind(&self) -> ScalarKind {
        ScalarKind::Bool
    }

    fn next_value(&self) -> ScalarValue {
        ScalarValue::Bool(rand::rng().random())
    }
}

/// Random byte strings of length 1..=64.
#[derive(Debug, Default, Clone, Copy)]
pub struct BytesGenerator;

impl ValueGenerator for BytesGenerator {
    fn kind(&self) -> ScalarKind {
        ScalarKind::Bytes
    }

    fn next_value(&self) -> ScalarValue {
        let mut rng = rand::rng();
        let len = rng.random_range(1..=64);
        ScalarValue::Bytes((0..len).map(|_| rng.random()).collect())
    }
}

/// Fresh v4 UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl ValueGenerator for UuidGenerator {
    fn kind(&self) -> ScalarKind {
        ScalarKind::Uuid
    }

    fn next_value(&self) -> ScalarValue {
        ScalarValue::Uuid(uuid::Uuid::new_v4())
    }
}

/// Deterministic generator returning the same value on every call.
///
/// For types that cannot be randomized meaningfully, and for tests that need a known
/// value.
#[derive(Debug, Clone)]
pub struct FixedGenerator {
    value: ScalarValue,
}

impl FixedGenerator {
    #[must_use]
    pub fn new(value: ScalarValue) -> Self {
        Self { value }
    }
}

impl ValueGenerator for FixedGenerator {
    fn kind(&self) -> ScalarKind {
        self.value.kind()
    }

    fn next_value(&self) -> ScalarValue {
        self.value.clone()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn generators_produce_their_declared_kind() {
        let generators: Vec<Box<dyn ValueGenerator>> = vec![
            Box::new(TextGenerator),
            Box::new(IntGenerator),
            Box::new(UintGenerator),
            Box::new(BoolGenerator),
            Box::new(BytesGenerator),
            Box::new(UuidGenerator),
            Box::new(FixedGenerator::new(ScalarValue::Int(42))),
        ];
        for generator in &generators {
            for _ in 0..16 {
                assert_eq!(generator.next_value().kind(), generator.kind());
            }
        }
    }

    #[test]
    fn fixed_generator_is_constant() {
        let generator = FixedGenerator::new(ScalarValue::Text("pinned".into()));
        assert_eq!(generator.next_value(), generator.next_value());
    }

    #[test]
    fn text_generator_respects_length_bounds() {
        for _ in 0..64 {
            let value = TextGenerator.next_value();
            let text = value.as_text().unwrap();
            assert!(!text.is_empty());
            assert!(text.len() <= 32);
        }
    }
}
