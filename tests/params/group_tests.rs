//! Integration tests for the ParamGroup collection
//!
//! These tests verify that the group behaves correctly in various scenarios.

use approx::assert_relative_eq;
use bip_params::{Constraints, ParamGroup, ParamInfo, ParamType, ParamsError, Shape, Value};

use crate::test_helpers::{categorical_info, float_info, int_info};

#[test]
fn test_group_basic_operations() {
    // Create an empty group
    let mut group = ParamGroup::new();
    assert_eq!(group.len(), 0);
    assert!(group.is_empty());

    // Add a parameter
    group
        .add_parameter(float_info("rate", 0.0, 1.0, 1), Value::Float(0.5))
        .unwrap();

    assert_eq!(group.len(), 1);
    assert!(!group.is_empty());
    assert!(group.contains("rate"));

    // Add another parameter
    group
        .add_parameter(int_info("trials"), Value::Int(100))
        .unwrap();

    assert_eq!(group.len(), 2);
    assert!(group.contains("trials"));

    // Get a parameter
    let entry = group.get("rate").unwrap();
    assert_eq!(entry.info().name(), "rate");
    assert_eq!(entry.value(), Some(&Value::Float(0.5)));

    // Get a parameter that doesn't exist
    assert!(group.get("nonexistent").is_none());

    // Update through a mutable reference
    let entry = group.get_mut("trials").unwrap();
    entry.set_value(Value::Int(250)).unwrap();
    assert_eq!(group.get("trials").unwrap().value(), Some(&Value::Int(250)));

    // Remove a parameter
    let removed = group.remove_parameter("rate").unwrap();
    assert_eq!(removed.info().name(), "rate");

    assert_eq!(group.len(), 1);
    assert!(!group.contains("rate"));
}

#[test]
fn test_incremental_build_and_prune() {
    // Empty group, then x: float in [0, 1] with value 0.5
    let mut group = ParamGroup::new();
    group
        .add_parameter(
            ParamInfo::new("x", ParamType::Float, Constraints::bounds(0.0, 1.0), 1usize),
            Value::Float(0.5),
        )
        .unwrap();
    assert_eq!(group.get_names(), vec!["x"]);

    // Then y: int with value 2
    group
        .add_parameter(
            ParamInfo::new("y", ParamType::Int, Constraints::new(), 1usize),
            Value::Int(2),
        )
        .unwrap();
    assert_eq!(group.get_names(), vec!["x", "y"]);

    // Remove x
    group.remove_parameter("x").unwrap();
    assert_eq!(group.get_names(), vec!["y"]);
}

#[test]
fn test_duplicate_add_keeps_first_entry() {
    let mut group = ParamGroup::new();
    group
        .add_parameter(float_info("rate", 0.0, 1.0, 1), Value::Float(0.5))
        .unwrap();

    let err = group
        .add_parameter(float_info("rate", 0.0, 100.0, 1), Value::Float(42.0))
        .unwrap_err();
    assert!(matches!(err, ParamsError::DuplicateName { .. }));

    // The first entry, bounds and all, is untouched
    let entry = group.get("rate").unwrap();
    assert_eq!(entry.value(), Some(&Value::Float(0.5)));
    assert_eq!(entry.info().constraints().max(), Some(1.0));
}

#[test]
fn test_batch_removal_equivalences() {
    let mut scalar_removed = ParamGroup::new();
    scalar_removed
        .add_parameter(float_info("a", 0.0, 1.0, 1), Value::Float(0.1))
        .unwrap();
    scalar_removed
        .add_parameter(int_info("b"), Value::Int(5))
        .unwrap();
    let mut batch_removed = scalar_removed.clone();

    // A one-element batch behaves exactly like the scalar removal
    scalar_removed.remove_parameter("a").unwrap();
    batch_removed.remove_parameters(["a"]).unwrap();
    assert_eq!(scalar_removed, batch_removed);

    // A failing batch removes nothing
    let err = batch_removed.remove_parameters(["b", "ghost"]).unwrap_err();
    assert!(matches!(err, ParamsError::NameNotFound { .. }));
    assert!(batch_removed.contains("b"));
}

#[test]
fn test_names_are_sorted_not_insertion_ordered() {
    let mut group = ParamGroup::new();
    for name in ["delta", "alpha", "charlie", "bravo"] {
        group
            .add_parameter(
                ParamInfo::scalar(name, ParamType::Float),
                Value::Float(1.0),
            )
            .unwrap();
    }

    assert_eq!(group.get_names(), vec!["alpha", "bravo", "charlie", "delta"]);
}

#[test]
fn test_element_names_expand_arrays() {
    let mut group = ParamGroup::new();
    group
        .add_parameter(float_info("scale", 0.0, 10.0, 1), Value::Float(2.0))
        .unwrap();
    group
        .add_parameter(
            ParamInfo::new("w", ParamType::Float, Constraints::new(), Shape::Dims(vec![2, 2])),
            Value::FloatVec(vec![1.0, 2.0, 3.0, 4.0]),
        )
        .unwrap();

    assert_eq!(
        group.element_names(),
        vec!["scale", "w[0]", "w[1]", "w[2]", "w[3]"]
    );
}

#[test]
fn test_group_flatten_for_optimizer() {
    // A mixed group like a model's hyperparameters: the flattened view is
    // what an optimizer or sampler consumes.
    let mut group = ParamGroup::new();
    group
        .add_parameter(
            categorical_info("kernel", &["rbf", "linear"]),
            Value::Categorical("linear".to_string()),
        )
        .unwrap();
    group
        .add_parameter(float_info("length_scale", 0.01, 100.0, 2), Value::FloatVec(vec![1.5, 2.0]))
        .unwrap();
    group
        .add_parameter(int_info("restarts"), Value::Int(8))
        .unwrap();

    let arr = group.to_array().unwrap();

    // Order: kernel, length_scale[0], length_scale[1], restarts
    assert_eq!(arr.len(), 4);
    assert_relative_eq!(arr[0], 1.0);
    assert_relative_eq!(arr[1], 1.5);
    assert_relative_eq!(arr[2], 2.0);
    assert_relative_eq!(arr[3], 8.0);
}

#[test]
fn test_json_file_round_trip() {
    let mut group = ParamGroup::new();
    group
        .add_parameter(float_info("rate", 0.0, 1.0, 1), Value::Float(0.5))
        .unwrap();
    group
        .add_parameter(
            categorical_info("kernel", &["rbf", "linear"]),
            Value::Categorical("rbf".to_string()),
        )
        .unwrap();

    let path = std::env::temp_dir().join("bip_params_group_roundtrip.json");
    group.save_json(&path).unwrap();

    let loaded = ParamGroup::load_json(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded, group);
    assert_eq!(loaded.get_names(), vec!["kernel", "rate"]);
}

#[test]
fn test_loading_rejects_tampered_values() {
    let mut group = ParamGroup::new();
    group
        .add_parameter(float_info("rate", 0.0, 1.0, 1), Value::Float(0.5))
        .unwrap();

    // Push the stored value outside its own bounds in the serialized form
    let json = group.to_json().unwrap().replace("0.5", "7.5");

    let result = ParamGroup::from_json(&json);
    assert!(matches!(
        result,
        Err(ParamsError::ConstraintViolation { .. })
    ));
}

#[test]
fn test_unset_parameters_block_flattening_only() {
    let mut group = ParamGroup::new();
    group
        .add_parameter(float_info("rate", 0.0, 1.0, 1), Value::Float(0.5))
        .unwrap();
    group
        .add_unset(ParamInfo::scalar("offset", ParamType::Float))
        .unwrap();

    // Listing and lookup work with an unset entry present
    assert_eq!(group.get_names(), vec!["offset", "rate"]);
    assert!(!group.get("offset").unwrap().is_set());

    // Flattening does not
    assert!(matches!(group.to_array(), Err(ParamsError::Flatten { .. })));

    // Assigning a value unblocks it
    group.set_value("offset", Value::Float(-3.0)).unwrap();
    assert_eq!(group.to_array().unwrap().to_vec(), vec![-3.0, 0.5]);
}
