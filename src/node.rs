use crate::attribute::Attribute;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Loosely typed metadata a pass attaches under a string key. Anything with a fixed meaning
/// gets a typed field on the node kind instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParameterValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Ints(Vec<i64>),
    Floats(Vec<f64>),
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        ParameterValue::Bool(value)
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        ParameterValue::Int(value)
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        ParameterValue::Float(value)
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        ParameterValue::String(value.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        ParameterValue::String(value)
    }
}

impl From<Vec<i64>> for ParameterValue {
    fn from(value: Vec<i64>) -> Self {
        ParameterValue::Ints(value)
    }
}

impl From<Vec<f64>> for ParameterValue {
    fn from(value: Vec<f64>) -> Self {
        ParameterValue::Floats(value)
    }
}

/// State shared by operators and variables. Each node owns its own sets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeBase {
    attributes: HashSet<Attribute>,
    parameters: HashMap<String, ParameterValue>,
}

impl NodeBase {
    pub fn new(parameters: HashMap<String, ParameterValue>) -> Self {
        Self {
            attributes: HashSet::new(),
            parameters,
        }
    }
}

pub trait IrNode {
    fn base(&self) -> &NodeBase;
    fn base_mut(&mut self) -> &mut NodeBase;

    fn attributes(&self) -> &HashSet<Attribute> {
        &self.base().attributes
    }

    fn has_attribute(&self, attribute: Attribute) -> bool {
        self.base().attributes.contains(&attribute)
    }

    /// Returns false if the tag was already present.
    fn add_attribute(&mut self, attribute: Attribute) -> bool {
        self.base_mut().attributes.insert(attribute)
    }

    fn remove_attribute(&mut self, attribute: Attribute) -> bool {
        self.base_mut().attributes.remove(&attribute)
    }

    fn parameters(&self) -> &HashMap<String, ParameterValue> {
        &self.base().parameters
    }

    fn parameter(&self, name: &str) -> Option<&ParameterValue> {
        self.base().parameters.get(name)
    }

    fn set_parameter(&mut self, name: &str, value: impl Into<ParameterValue>) -> Option<ParameterValue>
    where
        Self: Sized,
    {
        self.base_mut().parameters.insert(name.to_string(), value.into())
    }

    fn remove_parameter(&mut self, name: &str) -> Option<ParameterValue> {
        self.base_mut().parameters.remove(name)
    }
}
