//! The parameter registrar.
//!
//! A [`ParameterSpec`] describes one configurable input. Registering it on an
//! [`AssemblyContext`] derives the canonical id, declares a `String`
//! parameter, declares a condition keyed to that parameter, and appends the
//! id to the presentation group named by the `ParameterSpec`.
//!
//! # Declaration precedence
//!
//! The caller's `options` form the base of the declaration. `Description`
//! and `Type` are then forced, and finally `Default` and `AllowedValues` are
//! set from the `ParameterSpec` fields when present. An `options` entry named
//! `Default` or `AllowedValues` is therefore overwritten whenever the
//! matching `ParameterSpec` field is also given; callers should use one mechanism
//! or the other.
//!
//! # Conditions
//!
//! A parameter whose allowed values are exactly `false` and `true` (in any
//! order) gets a condition named after the parameter that holds when the value
//! is `"true"`. Every other parameter gets `<Id>Empty`, which holds when the
//! value was left blank.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::context::AssemblyContext;
use crate::groups::GroupKey;
use crate::intrinsic::{Expr, equal, reference};
use crate::naming::{derive_id, env_name};
use crate::{CfnError, CfnResult};

/// Allowed values that mark a parameter as boolean-like, in sorted order.
pub const BOOLEAN_VALUES: [&str; 2] = ["false", "true"];

const EMPTY_SUFFIX: &str = "Empty";

/// Declarative description of one configurable input.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    /// Presentation group the parameter belongs to.
    pub group: GroupKey,
    /// Lowercase snake-case name; unique per assembly run.
    pub name: String,
    /// Human description, prefixed with the environment variable name.
    pub description: String,
    /// Default value; `None` omits the `Default` attribute entirely.
    pub default: Option<String>,
    /// Permitted values in caller order.
    pub allowed: Option<Vec<String>>,
    /// Extra declaration attributes merged underneath the synthesised ones.
    pub options: Map<String, Value>,
}

impl ParameterSpec {
    /// Creates a parameter with no default, no allowed values, and no options.
    #[must_use]
    pub fn new(
        group: impl Into<GroupKey>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            description: description.into(),
            default: None,
            allowed: None,
            options: Map::new(),
        }
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Sets the permitted values.
    #[must_use]
    pub fn with_allowed<I, S>(mut self, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed = Some(allowed.into_iter().map(Into::into).collect());
        self
    }

    /// Adds an extra declaration attribute such as `NoEcho` or `MinLength`.
    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Canonical template id derived from the name.
    #[must_use]
    pub fn canonical_id(&self) -> String {
        derive_id(&self.name)
    }

    /// Whether the allowed values are exactly the boolean pair.
    #[must_use]
    pub fn is_boolean(&self) -> bool {
        self.allowed.as_ref().is_some_and(|allowed| {
            let mut sorted: Vec<&str> = allowed.iter().map(String::as_str).collect();
            sorted.sort_unstable();
            sorted == BOOLEAN_VALUES
        })
    }

    /// Builds the parameter declaration without registering it.
    #[must_use]
    pub fn declaration(&self) -> Declaration {
        let mut attributes = self.options.clone();
        attributes.insert(
            "Description".to_owned(),
            Value::String(format!("{}: {}", env_name(&self.name), self.description)),
        );
        attributes.insert("Type".to_owned(), Value::String("String".to_owned()));
        if let Some(default) = &self.default {
            attributes.insert("Default".to_owned(), Value::String(default.clone()));
        }
        if let Some(allowed) = &self.allowed {
            attributes.insert(
                "AllowedValues".to_owned(),
                Value::Array(allowed.iter().cloned().map(Value::String).collect()),
            );
        }
        Declaration {
            id: self.canonical_id(),
            attributes,
        }
    }

    /// Builds the condition keyed to this parameter without registering it.
    #[must_use]
    pub fn condition(&self) -> Condition {
        let id = self.canonical_id();
        if self.is_boolean() {
            Condition {
                expression: equal(reference(id.as_str()), "true"),
                name: id,
            }
        } else {
            Condition {
                expression: equal(reference(id.as_str()), ""),
                name: format!("{id}{EMPTY_SUFFIX}"),
            }
        }
    }
}

/// A parameter declaration emitted under `Parameters`.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// Canonical id the declaration is stored under.
    pub id: String,
    /// Declaration attributes in emission order.
    pub attributes: Map<String, Value>,
}

/// A named condition emitted under `Conditions`.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// Synthesised condition name.
    pub name: String,
    /// Boolean expression evaluated by the provisioning engine.
    pub expression: Expr,
}

impl AssemblyContext {
    /// Registers a parameter.
    ///
    /// Appends the canonical id to the parameter's group, declares the parameter
    /// and its condition, and returns both records. Registering the same
    /// canonical id twice silently replaces the earlier declaration and
    /// appends the id to the group again; use [`Self::try_register`] to
    /// reject duplicates instead.
    pub fn register(&mut self, spec: ParameterSpec) -> (Declaration, Condition) {
        let declaration = spec.declaration();
        let condition = spec.condition();
        debug!(
            id = %declaration.id,
            group = %spec.group,
            condition = %condition.name,
            "registering parameter"
        );

        self.groups.record(&spec.group, declaration.id.as_str());
        if self
            .template
            .declare_parameter(declaration.id.as_str(), declaration.attributes.clone())
            .is_some()
        {
            warn!(id = %declaration.id, "parameter declared twice; keeping the later declaration");
        }
        self.template
            .declare_condition(condition.name.as_str(), condition.expression.clone());

        (declaration, condition)
    }

    /// Registers a parameter, rejecting canonical ids that are already
    /// declared.
    ///
    /// # Errors
    ///
    /// Returns [`CfnError::DuplicateParameter`] when the id is taken; the
    /// context is left unchanged.
    pub fn try_register(&mut self, spec: ParameterSpec) -> CfnResult<(Declaration, Condition)> {
        let id = spec.canonical_id();
        if self.template.has_parameter(&id) {
            return Err(CfnError::DuplicateParameter { id });
        }
        Ok(self.register(spec))
    }
}
