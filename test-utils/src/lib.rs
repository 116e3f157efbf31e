// SPDX-License-Identifier: Apache-2.0
// Copyright Vouch Project Authors

//! Sample target types for contract tests.
//!
//! Well-behaved and deliberately broken targets for each construction protocol, with
//! ready-made property metadata. The broken variants exist so the contract tests can
//! prove that violations are detected, not just that clean targets pass.

#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_panics_doc)]

pub mod bean;
pub mod builder;
pub mod creator;

pub use bean::{
    LossyProbe, Probe, UninitializedProbe, lossy_probe_instantiator, lossy_probe_properties,
    probe_instantiator, probe_properties, uninitialized_probe_instantiator,
    uninitialized_probe_properties,
};
pub use builder::{
    CarelessEndpointBuilder, Endpoint, EndpointBuilder, careless_endpoint_instantiator,
    careless_endpoint_properties, endpoint_instantiator, endpoint_properties,
};
pub use creator::{
    CREDENTIALS_PARAMETERS, Credentials, credentials_construct,
    credentials_construct_permissive, credentials_construct_transposed, credentials_properties,
};
