// SPDX-License-Identifier: Apache-2.0
// Copyright Vouch Project Authors

//! Bean-property contract, end to end against sample targets.

use contract::{BeanPropertyContract, ContractError, TestContract};
use instantiate::BeanInstantiator;
use property::{PropertyError, RuntimeProperties};
use test_utils::{
    Probe, lossy_probe_instantiator, probe_instantiator, probe_properties,
    uninitialized_probe_instantiator,
};

#[test]
fn well_behaved_bean_passes() {
    BeanPropertyContract::new(probe_instantiator())
        .unwrap()
        .assert_contract()
        .unwrap();
}

#[test]
fn lossy_accessor_pair_is_reported_as_mismatch() {
    let result = BeanPropertyContract::new(lossy_probe_instantiator())
        .unwrap()
        .assert_contract();
    match result {
        Err(ContractError::Property(PropertyError::ValueMismatch { name, .. })) => {
            assert_eq!(name, "note");
        }
        other => panic!("expected a value mismatch on 'note', got {other:?}"),
    }
}

#[test]
fn missing_default_is_reported() {
    let result = BeanPropertyContract::new(uninitialized_probe_instantiator())
        .unwrap()
        .assert_contract();
    match result {
        Err(ContractError::Property(PropertyError::MissingDefault { name, .. })) => {
            assert_eq!(name, "mode");
        }
        other => panic!("expected a missing default on 'mode', got {other:?}"),
    }
}

#[test]
fn duplicate_property_names_are_a_setup_failure() {
    let mut properties = probe_properties();
    properties.push(properties[0].clone());
    let instantiator = BeanInstantiator::new(Probe::default, RuntimeProperties::new(properties));
    let result = BeanPropertyContract::new(instantiator);
    assert!(matches!(
        result,
        Err(ContractError::Property(PropertyError::DuplicateName { name })) if name == "name"
    ));
}

#[test]
fn contract_is_repeatable_on_the_same_instantiator() {
    let contract = BeanPropertyContract::new(probe_instantiator()).unwrap();
    contract.assert_contract().unwrap();
    contract.assert_contract().unwrap();
}
