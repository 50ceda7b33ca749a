//! Template-level metadata, including the parameter input form layout.

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::groups::PresentationGroup;

/// Metadata key read by the console to lay out the parameter form.
pub const INTERFACE_METADATA_KEY: &str = "AWS::CloudFormation::Interface";

/// A value stored under the template's `Metadata` section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetadataValue {
    /// Parameter groups and labels; groups are rendered from their live
    /// member lists when the template is generated.
    Interface(InterfaceMetadata),
    /// Arbitrary JSON.
    Json(Value),
}

impl From<InterfaceMetadata> for MetadataValue {
    fn from(value: InterfaceMetadata) -> Self {
        Self::Interface(value)
    }
}

impl From<Value> for MetadataValue {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

/// Layout of the parameter input form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InterfaceMetadata {
    /// Ordered presentation groups.
    #[serde(rename = "ParameterGroups")]
    pub parameter_groups: Vec<PresentationGroup>,
    /// Display label per parameter id.
    #[serde(rename = "ParameterLabels", serialize_with = "serialize_labels")]
    pub parameter_labels: IndexMap<String, String>,
}

impl InterfaceMetadata {
    /// Creates an empty layout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a presentation group.
    pub fn push_group(&mut self, group: PresentationGroup) {
        self.parameter_groups.push(group);
    }

    /// Sets the label for a parameter; a later label for the same id wins.
    pub fn label(&mut self, id: impl Into<String>, text: impl Into<String>) {
        self.parameter_labels.insert(id.into(), text.into());
    }

    /// Sets several labels at once.
    pub fn extend_labels<I, K, V>(&mut self, labels: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (id, text) in labels {
            self.label(id, text);
        }
    }
}

fn serialize_labels<S: Serializer>(
    labels: &IndexMap<String, String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    #[derive(Serialize)]
    struct Label<'a> {
        default: &'a str,
    }

    let mut map = serializer.serialize_map(Some(labels.len()))?;
    for (id, text) in labels {
        map.serialize_entry(id, &Label { default: text })?;
    }
    map.end()
}
