//! Declared parameter shapes
//!
//! A shape records the dimensionality a parameter's value is expected to have:
//! either a flat length or an ordered multi-dimensional extent.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The declared shape of a parameter's value
///
/// A shape is either a single length (a flat vector of `n` elements, with
/// `Len(1)` meaning a scalar) or an ordered tuple of extents for
/// multi-dimensional values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// A flat vector of the given length
    Len(usize),

    /// A multi-dimensional extent, outermost dimension first
    Dims(Vec<usize>),
}

impl Serialize for Shape {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // A flat length serializes as a bare integer, an extent as a list
        match self {
            Shape::Len(n) => serializer.serialize_u64(*n as u64),
            Shape::Dims(dims) => dims.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Shape {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum ShapeHelper {
            Len(usize),
            Dims(Vec<usize>),
        }

        match ShapeHelper::deserialize(deserializer)? {
            ShapeHelper::Len(n) => Ok(Shape::Len(n)),
            ShapeHelper::Dims(dims) => Ok(Shape::Dims(dims)),
        }
    }
}

impl Default for Shape {
    fn default() -> Self {
        Shape::scalar()
    }
}

impl Shape {
    /// Create the scalar shape (a single element)
    pub fn scalar() -> Self {
        Shape::Len(1)
    }

    /// Get the total number of elements a conforming value must have
    ///
    /// For `Len(n)` this is `n`; for `Dims` it is the product of the extents.
    /// An empty extent list describes a rank-0 value, which has one element.
    ///
    /// # Examples
    ///
    /// ```
    /// use bip_params::params::shape::Shape;
    ///
    /// assert_eq!(Shape::Len(3).num_elements(), 3);
    /// assert_eq!(Shape::Dims(vec![2, 3]).num_elements(), 6);
    /// assert_eq!(Shape::Dims(vec![]).num_elements(), 1);
    /// ```
    pub fn num_elements(&self) -> usize {
        match self {
            Shape::Len(n) => *n,
            Shape::Dims(dims) => dims.iter().product(),
        }
    }

    /// Check if the shape describes a single element
    pub fn is_scalar(&self) -> bool {
        self.num_elements() == 1
    }
}

impl From<usize> for Shape {
    fn from(n: usize) -> Self {
        Shape::Len(n)
    }
}

impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Self {
        Shape::Dims(dims)
    }
}

impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Shape::Dims(dims.to_vec())
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Len(n) => write!(f, "{}", n),
            Shape::Dims(dims) => {
                let parts: Vec<String> = dims.iter().map(|d| d.to_string()).collect();
                write!(f, "({})", parts.join(", "))
            }
        }
    }
}
