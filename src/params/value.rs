//! Parameter value storage
//!
//! This module provides the Value enum, the dynamic value a parameter can
//! assume, and the ParamValue struct, which binds one value to its metadata.
//! Every write into a ParamValue is validated against the declared type,
//! shape, and constraints of its [`ParamInfo`]; a write that fails validation
//! leaves the previously stored value in place.

use crate::error::{ParamsError, Result};
use crate::params::info::{ParamInfo, ParamType};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The value a parameter currently holds
///
/// Scalar variants hold a single element; the `*Vec` variants hold the
/// elements of an array-valued parameter in row-major order. The declared
/// [`Shape`](crate::params::shape::Shape) on the parameter's metadata carries
/// the dimensionality, so storage here is always flat.
///
/// Variant order matters for deserialization: integer-looking JSON numbers
/// resolve to the `Int` variants, numbers with a fractional representation to
/// the `Float` variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A single integer
    Int(i64),

    /// A single real number
    Float(f64),

    /// A single category label
    Categorical(String),

    /// Integer array elements in row-major order
    IntVec(Vec<i64>),

    /// Real-valued array elements in row-major order
    FloatVec(Vec<f64>),

    /// Category labels in row-major order
    CategoricalVec(Vec<String>),
}

impl Value {
    /// Get the parameter type this value inhabits
    pub fn kind(&self) -> ParamType {
        match self {
            Value::Float(_) | Value::FloatVec(_) => ParamType::Float,
            Value::Int(_) | Value::IntVec(_) => ParamType::Int,
            Value::Categorical(_) | Value::CategoricalVec(_) => ParamType::Categorical,
        }
    }

    /// Get the number of elements the value holds
    ///
    /// Scalar variants count as one element.
    pub fn len(&self) -> usize {
        match self {
            Value::Float(_) | Value::Int(_) | Value::Categorical(_) => 1,
            Value::FloatVec(v) => v.len(),
            Value::IntVec(v) => v.len(),
            Value::CategoricalVec(v) => v.len(),
        }
    }

    /// Check if the value holds no elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Categorical(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Categorical(s)
    }
}

impl From<Vec<f64>> for Value {
    fn from(v: Vec<f64>) -> Self {
        Value::FloatVec(v)
    }
}

impl From<Vec<i64>> for Value {
    fn from(v: Vec<i64>) -> Self {
        Value::IntVec(v)
    }
}

impl From<Vec<String>> for Value {
    fn from(v: Vec<String>) -> Self {
        Value::CategoricalVec(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join<T: fmt::Display>(items: &[T]) -> String {
            items
                .iter()
                .map(|x| x.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        }

        match self {
            Value::Float(x) => write!(f, "{}", x),
            Value::Int(i) => write!(f, "{}", i),
            Value::Categorical(s) => write!(f, "{}", s),
            Value::FloatVec(v) => write!(f, "[{}]", join(v)),
            Value::IntVec(v) => write!(f, "[{}]", join(v)),
            Value::CategoricalVec(v) => write!(f, "[{}]", join(v)),
        }
    }
}

/// Check a candidate value against a parameter's declared metadata
///
/// The three checks, in order: the value's kind must match the declared type,
/// its element count must match the declared shape, and every element must
/// satisfy the declared constraints ("min"/"max" bounds for numeric types,
/// "categories" membership for categorical ones).
fn validate(info: &ParamInfo, value: &Value) -> Result<()> {
    if value.kind() != info.param_type() {
        return Err(ParamsError::TypeMismatch {
            name: info.name().to_string(),
            expected: info.param_type(),
            actual: value.kind(),
        });
    }

    let expected = info.shape().num_elements();
    if value.len() != expected {
        return Err(ParamsError::ShapeMismatch {
            name: info.name().to_string(),
            expected,
            actual: value.len(),
        });
    }

    match value {
        Value::Float(x) => check_numeric(info, *x),
        Value::Int(i) => check_numeric(info, *i as f64),
        Value::Categorical(label) => check_category(info, label),
        Value::FloatVec(v) => v.iter().try_for_each(|x| check_numeric(info, *x)),
        Value::IntVec(v) => v.iter().try_for_each(|i| check_numeric(info, *i as f64)),
        Value::CategoricalVec(v) => v.iter().try_for_each(|label| check_category(info, label)),
    }
}

fn check_numeric(info: &ParamInfo, x: f64) -> Result<()> {
    let constraints = info.constraints();

    if let Some(min) = constraints.min() {
        if x < min {
            return Err(ParamsError::ConstraintViolation {
                name: info.name().to_string(),
                message: format!("value {} is below the minimum {}", x, min),
            });
        }
    }

    if let Some(max) = constraints.max() {
        if x > max {
            return Err(ParamsError::ConstraintViolation {
                name: info.name().to_string(),
                message: format!("value {} is above the maximum {}", x, max),
            });
        }
    }

    Ok(())
}

fn check_category(info: &ParamInfo, label: &str) -> Result<()> {
    // A categorical parameter without a "categories" constraint admits any label.
    if let Some(labels) = info.constraints().allowed_categories() {
        if !labels.iter().any(|l| l == label) {
            return Err(ParamsError::ConstraintViolation {
                name: info.name().to_string(),
                message: format!("'{}' is not one of the allowed categories", label),
            });
        }
    }

    Ok(())
}

/// A parameter's metadata together with its current value
///
/// A ParamValue owns one [`ParamInfo`] and the optional value currently
/// assigned to it. The value may be unset; every successful write is
/// guaranteed to conform to the metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamValue {
    /// The parameter's static metadata
    info: ParamInfo,

    /// The current value, if one has been assigned
    value: Option<Value>,
}

impl ParamValue {
    /// Create a new ParamValue with an initial value
    ///
    /// # Arguments
    ///
    /// * `info` - The parameter's metadata
    /// * `initial` - The initial value to store
    ///
    /// # Returns
    ///
    /// The new ParamValue, or an error if the initial value does not conform
    /// to the metadata's type, shape, or constraints.
    ///
    /// # Examples
    ///
    /// ```
    /// use bip_params::params::info::ParamInfo;
    /// use bip_params::params::value::{ParamValue, Value};
    ///
    /// let info = ParamInfo::bounded("rate", 0.0, 1.0);
    /// let pv = ParamValue::new(info, Value::Float(0.5)).unwrap();
    /// assert_eq!(pv.value(), Some(&Value::Float(0.5)));
    /// ```
    pub fn new(info: ParamInfo, initial: Value) -> Result<Self> {
        validate(&info, &initial)?;

        Ok(Self {
            info,
            value: Some(initial),
        })
    }

    /// Create a new ParamValue with no value assigned yet
    ///
    /// # Examples
    ///
    /// ```
    /// use bip_params::params::info::{ParamInfo, ParamType};
    /// use bip_params::params::value::ParamValue;
    ///
    /// let pv = ParamValue::unset(ParamInfo::scalar("offset", ParamType::Float));
    /// assert!(pv.value().is_none());
    /// ```
    pub fn unset(info: ParamInfo) -> Self {
        Self { info, value: None }
    }

    /// Get the parameter's metadata
    pub fn info(&self) -> &ParamInfo {
        &self.info
    }

    /// Get the current value, if one is assigned
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Check if a value is currently assigned
    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    /// Set the value of the parameter
    ///
    /// # Arguments
    ///
    /// * `value` - The new value for the parameter
    ///
    /// # Returns
    ///
    /// `Ok(())` if the value conforms to the metadata and was stored, or an
    /// error otherwise. On error the previously stored value is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use bip_params::params::info::ParamInfo;
    /// use bip_params::params::value::{ParamValue, Value};
    ///
    /// let info = ParamInfo::bounded("rate", 0.0, 1.0);
    /// let mut pv = ParamValue::new(info, Value::Float(0.5)).unwrap();
    ///
    /// pv.set_value(Value::Float(0.9)).unwrap();
    /// assert_eq!(pv.value(), Some(&Value::Float(0.9)));
    ///
    /// // Out of bounds: rejected, stored value untouched
    /// assert!(pv.set_value(Value::Float(1.5)).is_err());
    /// assert_eq!(pv.value(), Some(&Value::Float(0.9)));
    /// ```
    pub fn set_value(&mut self, value: Value) -> Result<()> {
        validate(&self.info, &value)?;
        self.value = Some(value);
        Ok(())
    }

    /// Clear the stored value, returning it if one was set
    pub fn clear(&mut self) -> Option<Value> {
        self.value.take()
    }

    /// Flatten the current value into a numeric array
    ///
    /// Float elements pass through unchanged, integer elements are cast, and
    /// category labels map to their index in the "categories" constraint.
    ///
    /// # Returns
    ///
    /// The flattened elements in row-major order, or an error if no value is
    /// set, or if a categorical parameter has no "categories" constraint or
    /// holds a label not listed in it.
    ///
    /// # Examples
    ///
    /// ```
    /// use bip_params::params::info::ParamInfo;
    /// use bip_params::params::value::{ParamValue, Value};
    ///
    /// let info = ParamInfo::categorical("kernel", ["rbf", "linear", "poly"]);
    /// let pv = ParamValue::new(info, Value::Categorical("linear".to_string())).unwrap();
    ///
    /// let arr = pv.to_array().unwrap();
    /// assert_eq!(arr.to_vec(), vec![1.0]);
    /// ```
    pub fn to_array(&self) -> Result<Array1<f64>> {
        let value = self.value.as_ref().ok_or_else(|| ParamsError::Flatten {
            name: self.info.name().to_string(),
            message: "no value is set".to_string(),
        })?;

        let flat = match value {
            Value::Float(x) => vec![*x],
            Value::Int(i) => vec![*i as f64],
            Value::FloatVec(v) => v.clone(),
            Value::IntVec(v) => v.iter().map(|i| *i as f64).collect(),
            Value::Categorical(label) => vec![self.category_index(label)?],
            Value::CategoricalVec(v) => v
                .iter()
                .map(|label| self.category_index(label))
                .collect::<Result<Vec<f64>>>()?,
        };

        Ok(Array1::from_vec(flat))
    }

    fn category_index(&self, label: &str) -> Result<f64> {
        let labels = self
            .info
            .constraints()
            .allowed_categories()
            .ok_or_else(|| ParamsError::Flatten {
                name: self.info.name().to_string(),
                message: "categorical parameter has no 'categories' constraint".to_string(),
            })?;

        labels
            .iter()
            .position(|l| l == label)
            .map(|i| i as f64)
            .ok_or_else(|| ParamsError::Flatten {
                name: self.info.name().to_string(),
                message: format!("label '{}' is not listed in the 'categories' constraint", label),
            })
    }

    /// Re-check the stored value against the metadata
    ///
    /// Used after deserialization, where the value bypasses `set_value`.
    pub(crate) fn revalidate(&self) -> Result<()> {
        match &self.value {
            Some(value) => validate(&self.info, value),
            None => Ok(()),
        }
    }
}
