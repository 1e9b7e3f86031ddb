//! # bip-params
//!
//! `bip-params` is the parameter-description layer for Bayesian inference and
//! optimization tools: named, typed parameters with constraints and shapes,
//! their current values, and named collections of them.
//!
//! The library provides:
//! - Immutable per-parameter metadata (name, type, constraints, shape)
//! - Validated value storage for scalar and array-valued parameters
//! - A name-keyed parameter group with uniqueness guarantees
//! - Flattening of values into `ndarray` arrays for optimizer consumption
//! - JSON persistence for whole groups
//!
//! ## Basic Usage
//!
//! ```
//! use bip_params::{ParamGroup, ParamInfo, ParamType, Value};
//!
//! let mut group = ParamGroup::new();
//! group.add_parameter(ParamInfo::bounded("rate", 0.0, 1.0), Value::Float(0.5)).unwrap();
//! group.add_parameter(ParamInfo::scalar("trials", ParamType::Int), Value::Int(100)).unwrap();
//!
//! assert_eq!(group.get_names(), vec!["rate", "trials"]);
//! assert_eq!(group.to_array().unwrap().to_vec(), vec![0.5, 100.0]);
//! ```

// Public modules
pub mod error;

// Parameter system
pub mod params;

// Re-exports for convenience
pub use error::{ParamsError, Result};
pub use params::{ConstraintValue, Constraints, ParamGroup, ParamInfo, ParamType, ParamValue, Shape, Value};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
