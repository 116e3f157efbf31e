// SPDX-License-Identifier: Apache-2.0
// Copyright Vouch Project Authors

//! Constructor/factory sample target with deliberately broken construction variants.

use std::sync::Arc;

use property::generator::{TextGenerator, UintGenerator};
use property::{
    AccessStrategy, PropertyMetadata, PropertyReadWrite, PropertyValue, ScalarKind, ScalarValue,
};

/// Positionally constructed target: `user` is required, `token` is optional, and
/// `attempts` is a required primitive (so its absence is unobservable).
pub struct Credentials {
    pub user: String,
    pub token: Option<String>,
    pub attempts: u64,
}

/// Parameter names in construction order; matches [`credentials_properties`].
pub const CREDENTIALS_PARAMETERS: [&str; 3] = ["user", "token", "attempts"];

#[must_use]
pub fn credentials_properties() -> Vec<PropertyMetadata<Credentials>> {
    vec![
        PropertyMetadata::builder()
            .name("user")
            .kind(ScalarKind::Text)
            .generator(Arc::new(TextGenerator))
            .required(true)
            .property_read_write(PropertyReadWrite::ReadOnly)
            .access(AccessStrategy::bean_read_only(|c: &Credentials| {
                Some(PropertyValue::Scalar(ScalarValue::Text(c.user.clone())))
            }))
            .build()
            .unwrap(),
        PropertyMetadata::builder()
            .name("token")
            .kind(ScalarKind::Text)
            .generator(Arc::new(TextGenerator))
            .property_read_write(PropertyReadWrite::ReadOnly)
            .access(AccessStrategy::bean_read_only(|c: &Credentials| {
                c.token
                    .clone()
                    .map(|v| PropertyValue::Scalar(ScalarValue::Text(v)))
            }))
            .build()
            .unwrap(),
        PropertyMetadata::builder()
            .name("attempts")
            .kind(ScalarKind::Uint)
            .generator(Arc::new(UintGenerator))
            .required(true)
            .property_read_write(PropertyReadWrite::ReadOnly)
            .access(AccessStrategy::bean_read_only(|c: &Credentials| {
                Some(PropertyValue::Scalar(ScalarValue::Uint(c.attempts)))
            }))
            .build()
            .unwrap(),
    ]
}

fn text_argument(arguments: &[Option<PropertyValue>], index: usize) -> Option<String> {
    arguments
        .get(index)
        .and_then(Option::as_ref)
        .and_then(PropertyValue::as_scalar)
        .and_then(|s| s.as_text())
        .map(str::to_string)
}

fn uint_argument(arguments: &[Option<PropertyValue>], index: usize) -> Option<u64> {
    arguments
        .get(index)
        .and_then(Option::as_ref)
        .and_then(PropertyValue::as_scalar)
        .and_then(ScalarValue::as_uint)
}

/// Well-behaved construction: rejects a missing `user`, treats a missing `attempts`
/// as zero (the primitive's implicit value).
pub fn credentials_construct(
    arguments: &[Option<PropertyValue>],
) -> Result<Credentials, String> {
    let user = text_argument(arguments, 0).ok_or_else(|| "user is required".to_string())?;
    Ok(Credentials {
        user,
        token: text_argument(arguments, 1),
        attempts: uint_argument(arguments, 2).unwrap_or(0),
    })
}

/// Broken construction: `user` and `token` arguments land in each other's fields.
pub fn credentials_construct_transposed(
    arguments: &[Option<PropertyValue>],
) -> Result<Credentials, String> {
    let user = text_argument(arguments, 0).ok_or_else(|| "user is required".to_string())?;
    Ok(Credentials {
        user: text_argument(arguments, 1).unwrap_or_default(),
        token: Some(user),
        attempts: uint_argument(arguments, 2).unwrap_or(0),
    })
}

/// Broken construction: a missing `user` is silently replaced instead of rejected.
pub fn credentials_construct_permissive(
    arguments: &[Option<PropertyValue>],
) -> Result<Credentials, String> {
    Ok(Credentials {
        user: text_argument(arguments, 0).unwrap_or_else(|| "anonymous".to_string()),
        token: text_argument(arguments, 1),
        attempts: uint_argument(arguments, 2).unwrap_or(0),
    })
}
