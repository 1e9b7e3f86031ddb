//! Parameter metadata definition
//!
//! This module provides the ParamInfo struct, the static description of a
//! single parameter: its name, declared type, constraints, and shape.
//! ParamInfo is a plain record; it stores what it is given verbatim and is
//! immutable after construction. Conformance checking against this metadata
//! happens where values are stored, in [`crate::params::value`].

use crate::params::shape::Shape;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The domain a parameter's value is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    /// Real-valued parameter
    Float,

    /// Integer-valued parameter
    Int,

    /// Parameter drawn from a finite set of labels
    Categorical,
}

impl ParamType {
    /// Get the lowercase tag used in serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Float => "float",
            Self::Int => "int",
            Self::Categorical => "categorical",
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single named constraint entry
///
/// Constraint values are either numeric bounds (for "min"/"max") or a list of
/// allowed labels (for "categories"). Entries under other names are carried
/// through storage and serialization untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConstraintValue {
    /// A numeric bound or limit
    Number(f64),

    /// A set of allowed category labels
    Categories(Vec<String>),
}

/// Named constraints on a parameter's value
///
/// A mapping from constraint name to bound/value, e.g. `{"min": 0.0,
/// "max": 10.0}` or `{"categories": ["rbf", "linear"]}`. The well-known keys
/// `"min"`, `"max"`, and `"categories"` drive value validation; anything else
/// is stored verbatim and ignored by it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Constraints {
    entries: BTreeMap<String, ConstraintValue>,
}

impl Constraints {
    /// Key for the lower numeric bound
    pub const MIN: &'static str = "min";

    /// Key for the upper numeric bound
    pub const MAX: &'static str = "max";

    /// Key for the allowed category labels
    pub const CATEGORIES: &'static str = "categories";

    /// Create an empty constraint set
    ///
    /// # Examples
    ///
    /// ```
    /// use bip_params::params::info::Constraints;
    ///
    /// let constraints = Constraints::new();
    /// assert!(constraints.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a constraint set with min and max bounds
    ///
    /// # Examples
    ///
    /// ```
    /// use bip_params::params::info::Constraints;
    ///
    /// let constraints = Constraints::bounds(0.0, 1.0);
    /// assert_eq!(constraints.min(), Some(0.0));
    /// assert_eq!(constraints.max(), Some(1.0));
    /// ```
    pub fn bounds(min: f64, max: f64) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(Self::MIN.to_string(), ConstraintValue::Number(min));
        entries.insert(Self::MAX.to_string(), ConstraintValue::Number(max));
        Self { entries }
    }

    /// Create a constraint set with only a lower bound
    pub fn min_only(min: f64) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(Self::MIN.to_string(), ConstraintValue::Number(min));
        Self { entries }
    }

    /// Create a constraint set with only an upper bound
    pub fn max_only(max: f64) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(Self::MAX.to_string(), ConstraintValue::Number(max));
        Self { entries }
    }

    /// Create a constraint set with a list of allowed category labels
    ///
    /// # Examples
    ///
    /// ```
    /// use bip_params::params::info::Constraints;
    ///
    /// let constraints = Constraints::categories(["rbf", "linear"]);
    /// assert_eq!(constraints.allowed_categories().unwrap().len(), 2);
    /// ```
    pub fn categories<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut entries = BTreeMap::new();
        entries.insert(
            Self::CATEGORIES.to_string(),
            ConstraintValue::Categories(labels.into_iter().map(Into::into).collect()),
        );
        Self { entries }
    }

    /// Insert a constraint entry, returning the previous value for that name
    pub fn insert(&mut self, name: &str, value: ConstraintValue) -> Option<ConstraintValue> {
        self.entries.insert(name.to_string(), value)
    }

    /// Get a constraint entry by name
    pub fn get(&self, name: &str) -> Option<&ConstraintValue> {
        self.entries.get(name)
    }

    /// Get the lower numeric bound, if one is set
    pub fn min(&self) -> Option<f64> {
        match self.entries.get(Self::MIN) {
            Some(ConstraintValue::Number(x)) => Some(*x),
            _ => None,
        }
    }

    /// Get the upper numeric bound, if one is set
    pub fn max(&self) -> Option<f64> {
        match self.entries.get(Self::MAX) {
            Some(ConstraintValue::Number(x)) => Some(*x),
            _ => None,
        }
    }

    /// Get the allowed category labels, if any are set
    pub fn allowed_categories(&self) -> Option<&[String]> {
        match self.entries.get(Self::CATEGORIES) {
            Some(ConstraintValue::Categories(labels)) => Some(labels),
            _ => None,
        }
    }

    /// Get the number of constraint entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the constraint set is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get an iterator over the constraint name-value pairs
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ConstraintValue)> {
        self.entries.iter()
    }
}

/// Static metadata for one parameter
///
/// A ParamInfo records a parameter's name, the domain its value is drawn from,
/// the constraints on that value, and its expected shape. All four fields are
/// stored verbatim by the constructor and cannot be changed afterwards; no
/// validation is performed at construction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamInfo {
    /// Name of the parameter, unique within a group
    name: String,

    /// The domain the parameter's value is drawn from
    param_type: ParamType,

    /// Named constraints on the parameter's value
    constraints: Constraints,

    /// The expected shape of the parameter's value
    shape: Shape,
}

impl ParamInfo {
    /// Create a new parameter description
    ///
    /// # Arguments
    ///
    /// * `name` - Name of the parameter
    /// * `param_type` - The domain the value is drawn from
    /// * `constraints` - Named constraints on the value
    /// * `shape` - The expected shape of the value
    ///
    /// # Examples
    ///
    /// ```
    /// use bip_params::params::info::{Constraints, ParamInfo, ParamType};
    /// use bip_params::params::shape::Shape;
    ///
    /// let info = ParamInfo::new("rate", ParamType::Float, Constraints::bounds(0.0, 1.0), Shape::Len(1));
    /// assert_eq!(info.name(), "rate");
    /// assert_eq!(info.param_type(), ParamType::Float);
    /// assert_eq!(info.shape().num_elements(), 1);
    /// ```
    pub fn new(
        name: &str,
        param_type: ParamType,
        constraints: Constraints,
        shape: impl Into<Shape>,
    ) -> Self {
        Self {
            name: name.to_string(),
            param_type,
            constraints,
            shape: shape.into(),
        }
    }

    /// Create an unconstrained scalar parameter description
    ///
    /// # Examples
    ///
    /// ```
    /// use bip_params::params::info::{ParamInfo, ParamType};
    ///
    /// let info = ParamInfo::scalar("offset", ParamType::Float);
    /// assert!(info.constraints().is_empty());
    /// assert!(info.shape().is_scalar());
    /// ```
    pub fn scalar(name: &str, param_type: ParamType) -> Self {
        Self::new(name, param_type, Constraints::new(), Shape::scalar())
    }

    /// Create a scalar float parameter description with min/max bounds
    ///
    /// # Examples
    ///
    /// ```
    /// use bip_params::params::info::ParamInfo;
    ///
    /// let info = ParamInfo::bounded("rate", 0.0, 1.0);
    /// assert_eq!(info.constraints().min(), Some(0.0));
    /// assert_eq!(info.constraints().max(), Some(1.0));
    /// ```
    pub fn bounded(name: &str, min: f64, max: f64) -> Self {
        Self::new(
            name,
            ParamType::Float,
            Constraints::bounds(min, max),
            Shape::scalar(),
        )
    }

    /// Create a scalar categorical parameter description with allowed labels
    ///
    /// # Examples
    ///
    /// ```
    /// use bip_params::params::info::{ParamInfo, ParamType};
    ///
    /// let info = ParamInfo::categorical("kernel", ["rbf", "linear"]);
    /// assert_eq!(info.param_type(), ParamType::Categorical);
    /// ```
    pub fn categorical<I, S>(name: &str, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            ParamType::Categorical,
            Constraints::categories(labels),
            Shape::scalar(),
        )
    }

    /// Get the name of the parameter
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the domain the parameter's value is drawn from
    pub fn param_type(&self) -> ParamType {
        self.param_type
    }

    /// Get the constraints on the parameter's value
    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// Get the expected shape of the parameter's value
    pub fn shape(&self) -> &Shape {
        &self.shape
    }
}
