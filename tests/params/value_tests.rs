//! Integration tests for parameter value storage and validation

use approx::assert_relative_eq;
use bip_params::{ParamValue, ParamsError, Value};

use crate::test_helpers::{categorical_info, float_info, int_info};

#[test]
fn test_value_write_read_clear_cycle() {
    let mut pv = ParamValue::new(float_info("rate", 0.0, 1.0, 1), Value::Float(0.25)).unwrap();
    assert_eq!(pv.value(), Some(&Value::Float(0.25)));

    pv.set_value(Value::Float(0.75)).unwrap();
    assert_eq!(pv.value(), Some(&Value::Float(0.75)));

    let removed = pv.clear();
    assert_eq!(removed, Some(Value::Float(0.75)));
    assert!(pv.value().is_none());

    // A cleared parameter accepts a fresh conforming value
    pv.set_value(Value::Float(0.1)).unwrap();
    assert!(pv.is_set());
}

#[test]
fn test_every_validation_failure_has_its_own_kind() {
    let mut pv = ParamValue::new(float_info("w", 0.0, 1.0, 2), Value::FloatVec(vec![0.1, 0.2]))
        .unwrap();

    let err = pv.set_value(Value::IntVec(vec![1, 2])).unwrap_err();
    assert!(matches!(err, ParamsError::TypeMismatch { .. }));

    let err = pv.set_value(Value::FloatVec(vec![0.1])).unwrap_err();
    assert!(matches!(err, ParamsError::ShapeMismatch { .. }));

    let err = pv.set_value(Value::FloatVec(vec![0.1, 7.0])).unwrap_err();
    assert!(matches!(err, ParamsError::ConstraintViolation { .. }));

    // The original value survived all three failed writes
    assert_eq!(pv.value(), Some(&Value::FloatVec(vec![0.1, 0.2])));
}

#[test]
fn test_int_parameter_rejects_float_writes() {
    let mut pv = ParamValue::new(int_info("trials"), Value::Int(100)).unwrap();

    assert!(pv.set_value(Value::Float(100.0)).is_err());
    assert!(pv.set_value(Value::Int(200)).is_ok());
}

#[test]
fn test_flatten_float_and_int() {
    let pv = ParamValue::new(float_info("w", 0.0, 10.0, 3), Value::FloatVec(vec![1.5, 2.5, 3.5]))
        .unwrap();
    let arr = pv.to_array().unwrap();
    assert_eq!(arr.len(), 3);
    assert_relative_eq!(arr[0], 1.5);
    assert_relative_eq!(arr[2], 3.5);

    let pv = ParamValue::new(int_info("trials"), Value::Int(42)).unwrap();
    assert_relative_eq!(pv.to_array().unwrap()[0], 42.0);
}

#[test]
fn test_flatten_categorical_uses_label_index() {
    let info = categorical_info("kernel", &["rbf", "linear", "poly"]);
    let pv = ParamValue::new(info, Value::Categorical("poly".to_string())).unwrap();

    let arr = pv.to_array().unwrap();
    assert_relative_eq!(arr[0], 2.0);
}

#[test]
fn test_flatten_unset_value_fails() {
    let pv = ParamValue::unset(float_info("rate", 0.0, 1.0, 1));

    match pv.to_array() {
        Err(ParamsError::Flatten { name, .. }) => assert_eq!(name, "rate"),
        _ => panic!("Expected Flatten error"),
    }
}

#[test]
fn test_value_serde_preserves_kind() {
    // Integer-looking and fractional numbers must come back as the kinds
    // they were stored with.
    let pv = ParamValue::new(int_info("trials"), Value::Int(100)).unwrap();
    let json = serde_json::to_string(&pv).unwrap();
    let back: ParamValue = serde_json::from_str(&json).unwrap();
    assert_eq!(back.value(), Some(&Value::Int(100)));

    let pv = ParamValue::new(float_info("rate", 0.0, 1.0, 1), Value::Float(0.5)).unwrap();
    let json = serde_json::to_string(&pv).unwrap();
    let back: ParamValue = serde_json::from_str(&json).unwrap();
    assert_eq!(back.value(), Some(&Value::Float(0.5)));
}
