//! Parameter group implementation
//!
//! This module provides the ParamGroup struct, a named collection of
//! parameters. Each entry pairs a parameter's metadata with its current value
//! and is keyed by the parameter's name; names are unique within a group, and
//! the group exclusively owns its entries.

use crate::error::{ParamsError, Result};
use crate::params::info::ParamInfo;
use crate::params::value::{ParamValue, Value};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// A collection of named parameters
///
/// A ParamGroup maps parameter names to [`ParamValue`] entries. Every
/// mutation preserves name uniqueness, and a mutation that fails (a duplicate
/// add, a removal of an absent name, a non-conforming value) leaves the group
/// unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamGroup {
    /// Map of parameter names to their metadata and current value
    params: HashMap<String, ParamValue>,
}

impl ParamGroup {
    /// Create a new empty parameter group
    ///
    /// # Examples
    ///
    /// ```
    /// use bip_params::params::group::ParamGroup;
    ///
    /// let group = ParamGroup::new();
    /// assert_eq!(group.len(), 0);
    /// ```
    pub fn new() -> Self {
        Self {
            params: HashMap::new(),
        }
    }

    /// Create a parameter group from metadata-value pairs
    ///
    /// # Arguments
    ///
    /// * `entries` - An iterator of (metadata, initial value) pairs
    ///
    /// # Returns
    ///
    /// The populated group, or an error if two entries share a name or any
    /// value does not conform to its metadata.
    ///
    /// # Examples
    ///
    /// ```
    /// use bip_params::params::group::ParamGroup;
    /// use bip_params::params::info::{ParamInfo, ParamType};
    /// use bip_params::params::value::Value;
    ///
    /// let group = ParamGroup::from_entries([
    ///     (ParamInfo::bounded("rate", 0.0, 1.0), Value::Float(0.5)),
    ///     (ParamInfo::scalar("trials", ParamType::Int), Value::Int(100)),
    /// ]).unwrap();
    ///
    /// assert_eq!(group.len(), 2);
    /// ```
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (ParamInfo, Value)>,
    {
        let mut group = Self::new();

        for (info, value) in entries {
            group.add_parameter(info, value)?;
        }

        Ok(group)
    }

    /// Add a parameter to the group
    ///
    /// Builds a [`ParamValue`] from the metadata and initial value and
    /// inserts it under the metadata's name.
    ///
    /// # Arguments
    ///
    /// * `info` - The parameter's metadata
    /// * `initial_value` - The initial value assigned to the parameter
    ///
    /// # Returns
    ///
    /// `Ok(())` if the parameter was added, a duplicate-name error if the
    /// name is already taken, or a validation error if the value does not
    /// conform to the metadata. The group is unchanged on error.
    ///
    /// # Examples
    ///
    /// ```
    /// use bip_params::params::group::ParamGroup;
    /// use bip_params::params::info::ParamInfo;
    /// use bip_params::params::value::Value;
    ///
    /// let mut group = ParamGroup::new();
    /// group.add_parameter(ParamInfo::bounded("rate", 0.0, 1.0), Value::Float(0.5)).unwrap();
    ///
    /// // A second parameter under the same name is rejected
    /// let result = group.add_parameter(ParamInfo::bounded("rate", 0.0, 2.0), Value::Float(1.0));
    /// assert!(result.is_err());
    /// assert_eq!(group.len(), 1);
    /// ```
    pub fn add_parameter(&mut self, info: ParamInfo, initial_value: Value) -> Result<()> {
        if self.params.contains_key(info.name()) {
            return Err(ParamsError::DuplicateName {
                name: info.name().to_string(),
            });
        }

        // Validate the entry before touching the map
        let entry = ParamValue::new(info, initial_value)?;
        self.params.insert(entry.info().name().to_string(), entry);

        Ok(())
    }

    /// Add a parameter with no value assigned yet
    ///
    /// # Arguments
    ///
    /// * `info` - The parameter's metadata
    ///
    /// # Returns
    ///
    /// `Ok(())` if the parameter was added, or a duplicate-name error if the
    /// name is already taken.
    pub fn add_unset(&mut self, info: ParamInfo) -> Result<()> {
        if self.params.contains_key(info.name()) {
            return Err(ParamsError::DuplicateName {
                name: info.name().to_string(),
            });
        }

        let entry = ParamValue::unset(info);
        self.params.insert(entry.info().name().to_string(), entry);

        Ok(())
    }

    /// Remove a parameter from the group by name
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the parameter to remove
    ///
    /// # Returns
    ///
    /// The removed entry, or a missing-name error if no parameter with the
    /// given name exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use bip_params::params::group::ParamGroup;
    /// use bip_params::params::info::ParamInfo;
    /// use bip_params::params::value::Value;
    ///
    /// let mut group = ParamGroup::new();
    /// group.add_parameter(ParamInfo::bounded("rate", 0.0, 1.0), Value::Float(0.5)).unwrap();
    ///
    /// let removed = group.remove_parameter("rate").unwrap();
    /// assert_eq!(removed.info().name(), "rate");
    ///
    /// // Removing it again fails
    /// assert!(group.remove_parameter("rate").is_err());
    /// ```
    pub fn remove_parameter(&mut self, name: &str) -> Result<ParamValue> {
        self.params
            .remove(name)
            .ok_or_else(|| ParamsError::NameNotFound {
                name: name.to_string(),
            })
    }

    /// Remove several parameters from the group by name
    ///
    /// The batch is atomic: every name is checked against the group first,
    /// and if any is absent the call fails without removing anything.
    /// A name listed more than once is removed once.
    ///
    /// # Arguments
    ///
    /// * `names` - The names of the parameters to remove
    ///
    /// # Returns
    ///
    /// The removed entries, or a missing-name error naming the first absent
    /// parameter. The group is unchanged on error.
    ///
    /// # Examples
    ///
    /// ```
    /// use bip_params::params::group::ParamGroup;
    /// use bip_params::params::info::{ParamInfo, ParamType};
    /// use bip_params::params::value::Value;
    ///
    /// let mut group = ParamGroup::new();
    /// group.add_parameter(ParamInfo::bounded("rate", 0.0, 1.0), Value::Float(0.5)).unwrap();
    /// group.add_parameter(ParamInfo::scalar("trials", ParamType::Int), Value::Int(100)).unwrap();
    ///
    /// group.remove_parameters(["rate", "trials"]).unwrap();
    /// assert!(group.is_empty());
    /// ```
    pub fn remove_parameters<I, S>(&mut self, names: I) -> Result<Vec<ParamValue>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = names.into_iter().map(|s| s.as_ref().to_string()).collect();

        for name in &names {
            if !self.params.contains_key(name) {
                return Err(ParamsError::NameNotFound { name: name.clone() });
            }
        }

        let mut removed = Vec::with_capacity(names.len());
        let mut seen = HashSet::new();

        for name in names {
            if seen.insert(name.clone()) {
                if let Some(entry) = self.params.remove(&name) {
                    removed.push(entry);
                }
            }
        }

        Ok(removed)
    }

    /// Get a parameter entry by name
    ///
    /// # Examples
    ///
    /// ```
    /// use bip_params::params::group::ParamGroup;
    /// use bip_params::params::info::ParamInfo;
    /// use bip_params::params::value::Value;
    ///
    /// let mut group = ParamGroup::new();
    /// group.add_parameter(ParamInfo::bounded("rate", 0.0, 1.0), Value::Float(0.5)).unwrap();
    ///
    /// assert_eq!(group.get("rate").unwrap().value(), Some(&Value::Float(0.5)));
    /// assert!(group.get("nonexistent").is_none());
    /// ```
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }

    /// Get a mutable reference to a parameter entry by name
    pub fn get_mut(&mut self, name: &str) -> Option<&mut ParamValue> {
        self.params.get_mut(name)
    }

    /// Check if the group contains a parameter with the given name
    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    /// Get the number of parameters in the group
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if the group is empty
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Get an iterator over the name-entry pairs, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamValue)> {
        self.params.iter()
    }

    /// Get the names of all parameters in the group, sorted alphabetically
    ///
    /// # Examples
    ///
    /// ```
    /// use bip_params::params::group::ParamGroup;
    /// use bip_params::params::info::{ParamInfo, ParamType};
    /// use bip_params::params::value::Value;
    ///
    /// let mut group = ParamGroup::new();
    /// group.add_parameter(ParamInfo::scalar("y", ParamType::Int), Value::Int(2)).unwrap();
    /// group.add_parameter(ParamInfo::bounded("x", 0.0, 1.0), Value::Float(0.5)).unwrap();
    ///
    /// assert_eq!(group.get_names(), vec!["x", "y"]);
    /// ```
    pub fn get_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.params.keys().cloned().collect();
        names.sort();
        names
    }

    /// Get parameter names with array elements expanded
    ///
    /// Parameters whose shape holds one element contribute their bare name;
    /// array-valued parameters contribute one entry per element, indexed in
    /// row-major order ("w[0]", "w[1]", ...). The listing follows the same
    /// alphabetical order as [`get_names`](Self::get_names).
    ///
    /// # Examples
    ///
    /// ```
    /// use bip_params::params::group::ParamGroup;
    /// use bip_params::params::info::{Constraints, ParamInfo, ParamType};
    /// use bip_params::params::shape::Shape;
    /// use bip_params::params::value::Value;
    ///
    /// let mut group = ParamGroup::new();
    /// group.add_parameter(ParamInfo::bounded("rate", 0.0, 1.0), Value::Float(0.5)).unwrap();
    /// group.add_parameter(
    ///     ParamInfo::new("w", ParamType::Float, Constraints::new(), Shape::Len(2)),
    ///     Value::FloatVec(vec![1.0, 2.0]),
    /// ).unwrap();
    ///
    /// assert_eq!(group.element_names(), vec!["rate", "w[0]", "w[1]"]);
    /// ```
    pub fn element_names(&self) -> Vec<String> {
        let mut names = Vec::new();

        for name in self.get_names() {
            let entry = &self.params[&name];
            let count = entry.info().shape().num_elements();

            if entry.info().shape().is_scalar() {
                names.push(name);
            } else {
                for i in 0..count {
                    names.push(format!("{}[{}]", name, i));
                }
            }
        }

        names
    }

    /// Set the value of a parameter by name
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the parameter to update
    /// * `value` - The new value
    ///
    /// # Returns
    ///
    /// `Ok(())` if the value conforms to the parameter's metadata and was
    /// stored, a missing-name error if no such parameter exists, or a
    /// validation error. The previous value is unchanged on error.
    pub fn set_value(&mut self, name: &str, value: Value) -> Result<()> {
        let entry = self
            .params
            .get_mut(name)
            .ok_or_else(|| ParamsError::NameNotFound {
                name: name.to_string(),
            })?;

        entry.set_value(value)
    }

    /// Flatten every parameter's value into one numeric array
    ///
    /// Parameters are flattened individually (see
    /// [`ParamValue::to_array`](crate::params::value::ParamValue::to_array))
    /// and concatenated in [`get_names`](Self::get_names) order.
    ///
    /// # Returns
    ///
    /// The concatenated elements, or an error if any parameter has no value
    /// or cannot be flattened.
    ///
    /// # Examples
    ///
    /// ```
    /// use bip_params::params::group::ParamGroup;
    /// use bip_params::params::info::{ParamInfo, ParamType};
    /// use bip_params::params::value::Value;
    ///
    /// let mut group = ParamGroup::new();
    /// group.add_parameter(ParamInfo::scalar("b", ParamType::Int), Value::Int(2)).unwrap();
    /// group.add_parameter(ParamInfo::bounded("a", 0.0, 1.0), Value::Float(0.5)).unwrap();
    ///
    /// // "a" sorts before "b"
    /// assert_eq!(group.to_array().unwrap().to_vec(), vec![0.5, 2.0]);
    /// ```
    pub fn to_array(&self) -> Result<Array1<f64>> {
        let mut flat = Vec::new();

        for name in self.get_names() {
            let arr = self.params[&name].to_array()?;
            flat.extend(arr.iter().copied());
        }

        Ok(Array1::from_vec(flat))
    }

    /// Check every entry for key/metadata agreement and value conformance
    ///
    /// Deserialized groups bypass the validating constructors, so persistence
    /// entry points run this before handing the group to the caller.
    fn validate_entries(&self) -> Result<()> {
        for (key, entry) in &self.params {
            if key != entry.info().name() {
                return Err(ParamsError::Other(format!(
                    "group entry '{}' holds a parameter named '{}'",
                    key,
                    entry.info().name()
                )));
            }

            entry.revalidate()?;
        }

        Ok(())
    }
}

impl ParamGroup {
    /// Save the group to a JSON file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the file to save the group to
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use bip_params::params::group::ParamGroup;
    ///
    /// let group = ParamGroup::new();
    /// group.save_json("parameters.json").unwrap();
    /// ```
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Serialize the group to a JSON string
    ///
    /// # Examples
    ///
    /// ```
    /// use bip_params::params::group::ParamGroup;
    /// use bip_params::params::info::ParamInfo;
    /// use bip_params::params::value::Value;
    ///
    /// let mut group = ParamGroup::new();
    /// group.add_parameter(ParamInfo::bounded("rate", 0.0, 1.0), Value::Float(0.5)).unwrap();
    ///
    /// let json = group.to_json().unwrap();
    /// assert!(json.contains("rate"));
    /// ```
    pub fn to_json(&self) -> Result<String> {
        let json = serde_json::to_string_pretty(self)?;
        Ok(json)
    }

    /// Load a group from a JSON file
    ///
    /// Every entry is re-validated against its metadata after parsing.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the JSON file to load the group from
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use bip_params::params::group::ParamGroup;
    ///
    /// let group = ParamGroup::load_json("parameters.json").unwrap();
    /// println!("Loaded {} parameters", group.len());
    /// ```
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load a group from a JSON string
    ///
    /// Every entry is re-validated against its metadata after parsing.
    ///
    /// # Examples
    ///
    /// ```
    /// use bip_params::params::group::ParamGroup;
    ///
    /// let json = r#"{
    ///   "params": {
    ///     "rate": {
    ///       "info": {
    ///         "name": "rate",
    ///         "param_type": "float",
    ///         "constraints": {"min": 0.0, "max": 1.0},
    ///         "shape": 1
    ///       },
    ///       "value": 0.5
    ///     }
    ///   }
    /// }"#;
    ///
    /// let group = ParamGroup::from_json(json).unwrap();
    /// assert_eq!(group.len(), 1);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let group: ParamGroup = serde_json::from_str(json)?;
        group.validate_entries()?;
        Ok(group)
    }
}
