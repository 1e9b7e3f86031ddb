//! Example demonstrating the parameter group workflow
//!
//! This example builds the parameter group for a small Gaussian-process-style
//! model, updates values with validation, flattens the group for an optimizer,
//! and round-trips it through JSON.

use bip_params::{Constraints, ParamGroup, ParamInfo, ParamType, Result, Shape, Value};

fn main() -> Result<()> {
    // Describe the model's parameters:
    // - kernel: one of a fixed set of labels
    // - length_scale: two positive floats, one per input dimension
    // - noise: a bounded scalar float
    // - restarts: an unconstrained integer
    let mut group = ParamGroup::new();

    group.add_parameter(
        ParamInfo::categorical("kernel", ["rbf", "matern", "linear"]),
        Value::Categorical("rbf".to_string()),
    )?;

    group.add_parameter(
        ParamInfo::new(
            "length_scale",
            ParamType::Float,
            Constraints::min_only(1e-3),
            Shape::Len(2),
        ),
        Value::FloatVec(vec![1.0, 1.0]),
    )?;

    group.add_parameter(
        ParamInfo::new(
            "noise",
            ParamType::Float,
            Constraints::bounds(0.0, 1.0),
            Shape::scalar(),
        ),
        Value::Float(0.1),
    )?;

    group.add_parameter(ParamInfo::scalar("restarts", ParamType::Int), Value::Int(8))?;

    println!("Parameters: {:?}", group.get_names());
    println!("Elements:   {:?}", group.element_names());

    // Validated updates: conforming values are stored, violations are errors
    group.set_value("noise", Value::Float(0.05))?;

    match group.set_value("noise", Value::Float(2.0)) {
        Ok(()) => println!("unexpected: out-of-bounds noise accepted"),
        Err(e) => println!("Rejected write: {}", e),
    }

    match group.set_value("kernel", Value::Categorical("sigmoid".to_string())) {
        Ok(()) => println!("unexpected: unknown kernel accepted"),
        Err(e) => println!("Rejected write: {}", e),
    }

    // Flatten the whole group for an optimizer or sampler
    let flat = group.to_array()?;
    println!("Flattened ({} elements): {}", flat.len(), flat);

    // Round-trip through JSON
    let json = group.to_json()?;
    let restored = ParamGroup::from_json(&json)?;
    assert_eq!(restored, group);
    println!("JSON round trip preserved {} parameters", restored.len());

    // Remove a batch of parameters; the call is atomic
    group.remove_parameters(["restarts", "noise"])?;
    println!("After removal: {:?}", group.get_names());

    Ok(())
}
