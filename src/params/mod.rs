//! # Parameter System
//!
//! This module provides the data-holding layer for named, typed parameters
//! used by Bayesian inference and optimization tools.
//!
//! ## Key Features
//!
//! - **Named Parameters**: Work with descriptive parameter names rather than array indices
//! - **Typed Metadata**: Each parameter declares its value domain, constraints, and shape
//! - **Validated Storage**: Every stored value is checked against its metadata
//! - **Array Flattening**: Any parameter or whole group flattens to a numeric array
//! - **Serialization Support**: Save and load parameter groups with serde
//!
//! ## Core Components
//!
//! - [`ParamInfo`]: Immutable metadata for one parameter (name, type, constraints, shape)
//! - [`ParamValue`]: One parameter's metadata bound to its current value
//! - [`ParamGroup`]: A name-keyed collection of parameters with uniqueness guarantees
//!
//! ## Example Usage
//!
//! ```rust
//! use bip_params::params::group::ParamGroup;
//! use bip_params::params::info::{Constraints, ParamInfo, ParamType};
//! use bip_params::params::shape::Shape;
//! use bip_params::params::value::Value;
//!
//! // Create a parameter group
//! let mut group = ParamGroup::new();
//!
//! // Add a bounded float parameter
//! group.add_parameter(ParamInfo::bounded("rate", 0.0, 1.0), Value::Float(0.5)).unwrap();
//!
//! // Add an integer parameter
//! group.add_parameter(ParamInfo::scalar("trials", ParamType::Int), Value::Int(100)).unwrap();
//!
//! // Add an array-valued parameter
//! group.add_parameter(
//!     ParamInfo::new("weights", ParamType::Float, Constraints::bounds(-1.0, 1.0), Shape::Dims(vec![2, 2])),
//!     Value::FloatVec(vec![0.1, 0.2, 0.3, 0.4]),
//! ).unwrap();
//!
//! // Names come back in alphabetical order
//! assert_eq!(group.get_names(), vec!["rate", "trials", "weights"]);
//!
//! // Update a value; validation runs on every write
//! group.set_value("rate", Value::Float(0.9)).unwrap();
//! assert!(group.set_value("rate", Value::Float(1.5)).is_err());
//!
//! // Flatten the whole group for an optimizer
//! let array = group.to_array().unwrap();
//! assert_eq!(array.len(), 6);
//! ```

pub mod group;
pub mod info;
pub mod shape;
pub mod value;


// Re-export key types
pub use group::ParamGroup;
pub use info::{ConstraintValue, Constraints, ParamInfo, ParamType};
pub use shape::Shape;
pub use value::{ParamValue, Value};
