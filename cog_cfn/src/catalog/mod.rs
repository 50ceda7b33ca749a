//! Fixed resource fragments merged into the template verbatim.
//!
//! Fragments are JSON documents holding any of the `Parameters`,
//! `Conditions`, `Resources` and `Outputs` sections. They may embed asset
//! placeholders of the form `{"Cog::Asset": "<file name>"}`, which are
//! replaced by the asset's text before merging (see [`AssetSource`]).

mod assets;

use serde_json::{Map, Value};
use tracing::debug;

use crate::intrinsic::Expr;
use crate::template::Template;
use crate::{CfnError, CfnResult};

pub use assets::{ASSET_PLACEHOLDER, AssetSource, BUNDLED_ASSETS};

/// EC2 host, load balancer, IAM, S3 bucket and timestamp Lambda.
pub const INSTANCE: Fragment =
    Fragment::new("instance", include_str!("../../templates/instance.json"));

/// Optional RDS database and its security group.
pub const RDS: Fragment = Fragment::new("rds", include_str!("../../templates/rds.json"));

const SECTIONS: [&str; 4] = ["Parameters", "Conditions", "Resources", "Outputs"];

/// A named JSON template fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment {
    name: &'static str,
    source: &'static str,
}

impl Fragment {
    /// Creates a fragment from its name and JSON source.
    #[must_use]
    pub const fn new(name: &'static str, source: &'static str) -> Self {
        Self { name, source }
    }

    /// Fragment name used in diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Parses the fragment and resolves its asset placeholders.
    ///
    /// # Errors
    ///
    /// Returns [`CfnError::Json`] for malformed JSON,
    /// [`CfnError::InvalidFragment`] when the top level is not an object of
    /// known sections, and asset errors from [`AssetSource::load`].
    pub fn resolve(&self, assets: &AssetSource) -> CfnResult<Map<String, Value>> {
        let mut document: Value = serde_json::from_str(self.source)?;
        assets.resolve(&mut document)?;
        let Value::Object(sections) = document else {
            return Err(CfnError::invalid_fragment(self.name, "top level must be an object"));
        };
        if let Some(unknown) = sections.keys().find(|key| !SECTIONS.contains(&key.as_str())) {
            return Err(CfnError::invalid_fragment(
                self.name,
                format!("unknown section '{unknown}'"),
            ));
        }
        Ok(sections)
    }

    /// Merges the fragment's sections into `template`; entries replace
    /// same-named entries already present.
    ///
    /// # Errors
    ///
    /// See [`Self::resolve`]; additionally every section must be an object.
    pub fn merge_into(&self, template: &mut Template, assets: &AssetSource) -> CfnResult<()> {
        for (section, entries) in self.resolve(assets)? {
            let Value::Object(entries) = entries else {
                return Err(CfnError::invalid_fragment(
                    self.name,
                    format!("{section} must be an object"),
                ));
            };
            debug!(
                fragment = self.name,
                section = %section,
                count = entries.len(),
                "merging fragment section"
            );
            for (id, definition) in entries {
                self.merge_entry(template, &section, id, definition)?;
            }
        }
        Ok(())
    }

    fn merge_entry(
        &self,
        template: &mut Template,
        section: &str,
        id: String,
        definition: Value,
    ) -> CfnResult<()> {
        match section {
            "Parameters" => {
                let Value::Object(attributes) = definition else {
                    return Err(CfnError::invalid_fragment(
                        self.name,
                        format!("parameter '{id}' must be an object"),
                    ));
                };
                template.declare_parameter(id, attributes);
            }
            "Conditions" => {
                template.declare_condition(id, Expr::Literal(definition));
            }
            "Resources" => {
                template.declare_resource(id, definition);
            }
            _ => {
                template.declare_output(id, definition);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
