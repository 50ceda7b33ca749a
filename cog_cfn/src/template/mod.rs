//! The template document and its sections.
//!
//! Every section is an insertion-ordered map. Declaring an entry under an
//! existing key replaces the value in place (last write wins) and hands the
//! previous value back so callers can decide whether that was intended.

mod metadata;
mod write;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::CfnResult;
use crate::intrinsic::Expr;

pub use metadata::{INTERFACE_METADATA_KEY, InterfaceMetadata, MetadataValue};

/// Template format version emitted at the top of every document.
pub const FORMAT_VERSION: &str = "2010-09-09";

/// A CloudFormation template under assembly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Template {
    #[serde(rename = "AWSTemplateFormatVersion")]
    format_version: String,
    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(rename = "Metadata", skip_serializing_if = "IndexMap::is_empty")]
    metadata: IndexMap<String, MetadataValue>,
    #[serde(rename = "Parameters", skip_serializing_if = "IndexMap::is_empty")]
    parameters: IndexMap<String, Map<String, Value>>,
    #[serde(rename = "Conditions", skip_serializing_if = "IndexMap::is_empty")]
    conditions: IndexMap<String, Expr>,
    #[serde(rename = "Resources", skip_serializing_if = "IndexMap::is_empty")]
    resources: IndexMap<String, Value>,
    #[serde(rename = "Outputs", skip_serializing_if = "IndexMap::is_empty")]
    outputs: IndexMap<String, Value>,
}

impl Default for Template {
    fn default() -> Self {
        Self::new()
    }
}

impl Template {
    /// Creates an empty template.
    #[must_use]
    pub fn new() -> Self {
        Self {
            format_version: FORMAT_VERSION.to_owned(),
            description: None,
            metadata: IndexMap::new(),
            parameters: IndexMap::new(),
            conditions: IndexMap::new(),
            resources: IndexMap::new(),
            outputs: IndexMap::new(),
        }
    }

    /// Sets the template description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    /// Returns the template description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Declares a parameter, returning the attributes it replaced.
    pub fn declare_parameter(
        &mut self,
        id: impl Into<String>,
        attributes: Map<String, Value>,
    ) -> Option<Map<String, Value>> {
        self.parameters.insert(id.into(), attributes)
    }

    /// Declares a condition, returning the expression it replaced.
    pub fn declare_condition(&mut self, name: impl Into<String>, expression: Expr) -> Option<Expr> {
        self.conditions.insert(name.into(), expression)
    }

    /// Declares a resource, returning the definition it replaced.
    pub fn declare_resource(&mut self, id: impl Into<String>, definition: Value) -> Option<Value> {
        self.resources.insert(id.into(), definition)
    }

    /// Declares an output, returning the definition it replaced.
    pub fn declare_output(&mut self, id: impl Into<String>, definition: Value) -> Option<Value> {
        self.outputs.insert(id.into(), definition)
    }

    /// Stores a metadata entry under `name`.
    pub fn set_metadata(&mut self, name: impl Into<String>, value: impl Into<MetadataValue>) {
        self.metadata.insert(name.into(), value.into());
    }

    /// Attributes of a declared parameter.
    #[must_use]
    pub fn parameter(&self, id: &str) -> Option<&Map<String, Value>> {
        self.parameters.get(id)
    }

    /// Whether a parameter with this id is declared.
    #[must_use]
    pub fn has_parameter(&self, id: &str) -> bool {
        self.parameters.contains_key(id)
    }

    /// Expression of a declared condition.
    #[must_use]
    pub fn condition(&self, name: &str) -> Option<&Expr> {
        self.conditions.get(name)
    }

    /// Definition of a declared resource.
    #[must_use]
    pub fn resource(&self, id: &str) -> Option<&Value> {
        self.resources.get(id)
    }

    /// Definition of a declared output.
    #[must_use]
    pub fn output(&self, id: &str) -> Option<&Value> {
        self.outputs.get(id)
    }

    /// Metadata entry stored under `name`.
    #[must_use]
    pub fn metadata(&self, name: &str) -> Option<&MetadataValue> {
        self.metadata.get(name)
    }

    /// Parameter ids in declaration order.
    pub fn parameter_ids(&self) -> impl Iterator<Item = &str> {
        self.parameters.keys().map(String::as_str)
    }

    /// Condition names in declaration order.
    pub fn condition_names(&self) -> impl Iterator<Item = &str> {
        self.conditions.keys().map(String::as_str)
    }

    /// Resource ids in declaration order.
    pub fn resource_ids(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }

    /// Output ids in declaration order.
    pub fn output_ids(&self) -> impl Iterator<Item = &str> {
        self.outputs.keys().map(String::as_str)
    }

    /// Renders the whole document as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CfnError::Json`] if serialisation fails.
    pub fn to_value(&self) -> CfnResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Renders the whole document as a JSON string.
    ///
    /// Presentation groups are read at this point, so member lists mutated
    /// after the metadata was stored are rendered with their latest contents.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CfnError::Json`] if serialisation fails.
    pub fn generate(&self, pretty: bool) -> CfnResult<String> {
        let document = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(document)
    }
}
