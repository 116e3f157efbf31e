// SPDX-License-Identifier: Apache-2.0
// Copyright Vouch Project Authors

//! Object-creator contract, end to end against sample targets.

use contract::{ContractError, ObjectCreatorContract, TestContract};
use instantiate::{FactoryRef, ResolveError};
use property::PropertyError;
use test_utils::{
    CREDENTIALS_PARAMETERS, credentials_construct, credentials_construct_permissive,
    credentials_construct_transposed, credentials_properties,
};

#[test]
fn well_behaved_constructor_passes() {
    ObjectCreatorContract::for_constructor(
        credentials_construct,
        &CREDENTIALS_PARAMETERS,
        credentials_properties(),
    )
    .unwrap()
    .assert_contract()
    .unwrap();
}

#[test]
fn well_behaved_factory_passes() {
    let factory = FactoryRef {
        enclosing_type: Some("Credentials".to_string()),
        method_name: "login".to_string(),
    };
    ObjectCreatorContract::for_factory(
        credentials_construct,
        factory,
        &CREDENTIALS_PARAMETERS,
        credentials_properties(),
    )
    .unwrap()
    .assert_contract()
    .unwrap();
}

#[test]
fn transposed_parameters_are_reported_as_mismatch() {
    let result = ObjectCreatorContract::for_constructor(
        credentials_construct_transposed,
        &CREDENTIALS_PARAMETERS,
        credentials_properties(),
    )
    .unwrap()
    .assert_contract();
    match result {
        Err(ContractError::Property(PropertyError::ValueMismatch { name, .. })) => {
            assert_eq!(name, "user");
        }
        other => panic!("expected a value mismatch on 'user', got {other:?}"),
    }
}

#[test]
fn constructor_accepting_a_missing_required_property_fails_the_proof() {
    let result = ObjectCreatorContract::for_constructor(
        credentials_construct_permissive,
        &CREDENTIALS_PARAMETERS,
        credentials_properties(),
    )
    .unwrap()
    .assert_contract();
    match result {
        Err(ContractError::AcceptedMissingRequired { name }) => assert_eq!(name, "user"),
        other => panic!("expected the required-ness proof to flag 'user', got {other:?}"),
    }
}

#[test]
fn misdeclared_parameter_list_is_a_setup_failure() {
    let result = ObjectCreatorContract::for_constructor(
        credentials_construct,
        &["token", "user", "attempts"],
        credentials_properties(),
    );
    assert!(matches!(
        result,
        Err(ContractError::Resolve(ResolveError::ParameterMismatch { .. }))
    ));
}

#[test]
fn unknown_parameter_is_a_setup_failure() {
    let result = ObjectCreatorContract::for_constructor(
        credentials_construct,
        &["user", "password", "attempts"],
        credentials_properties(),
    );
    assert!(matches!(
        result,
        Err(ContractError::Resolve(ResolveError::UnknownParameter { name })) if name == "password"
    ));
}
