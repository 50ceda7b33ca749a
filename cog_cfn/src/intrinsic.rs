//! CloudFormation intrinsic function expressions.
//!
//! [`Expr`] is a small typed tree that serialises to the JSON shape the
//! provisioning engine expects (`{"Ref": ...}`, `{"Fn::Equals": [...]}` and
//! so on). The free functions mirror the helpers used when writing template
//! content by hand.

use serde::{Serialize, Serializer};
use serde_json::{Value, json};

/// A template value that may contain intrinsic function calls.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal JSON value emitted verbatim.
    Literal(Value),
    /// `{"Ref": name}`.
    Ref(String),
    /// `{"Fn::GetAtt": [resource, attribute]}`.
    GetAtt {
        /// Logical id of the resource.
        resource: String,
        /// Attribute name, for example `Endpoint.Address`.
        attribute: String,
    },
    /// `{"Fn::Equals": [lhs, rhs]}`.
    Equals(Box<Expr>, Box<Expr>),
    /// `{"Fn::Not": [expr]}`.
    Not(Box<Expr>),
    /// `{"Fn::If": [condition, then, otherwise]}`.
    If {
        /// Name of the condition to branch on.
        condition: String,
        /// Value used when the condition holds.
        then: Box<Expr>,
        /// Value used otherwise.
        otherwise: Box<Expr>,
    },
    /// `{"Fn::Join": [delimiter, [parts...]]}`.
    Join {
        /// Delimiter placed between parts.
        delimiter: String,
        /// Joined parts.
        parts: Vec<Expr>,
    },
    /// `{"Fn::Base64": expr}`.
    Base64(Box<Expr>),
}

impl Expr {
    /// Renders the expression as template JSON.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Literal(value) => value.clone(),
            Self::Ref(name) => json!({ "Ref": name }),
            Self::GetAtt {
                resource,
                attribute,
            } => json!({ "Fn::GetAtt": [resource, attribute] }),
            Self::Equals(lhs, rhs) => json!({ "Fn::Equals": [lhs.to_value(), rhs.to_value()] }),
            Self::Not(inner) => json!({ "Fn::Not": [inner.to_value()] }),
            Self::If {
                condition,
                then,
                otherwise,
            } => json!({ "Fn::If": [condition, then.to_value(), otherwise.to_value()] }),
            Self::Join { delimiter, parts } => {
                let rendered: Vec<Value> = parts.iter().map(Self::to_value).collect();
                json!({ "Fn::Join": [delimiter, rendered] })
            }
            Self::Base64(inner) => json!({ "Fn::Base64": inner.to_value() }),
        }
    }
}

impl Serialize for Expr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Self::Literal(Value::String(value.to_owned()))
    }
}

impl From<String> for Expr {
    fn from(value: String) -> Self {
        Self::Literal(Value::String(value))
    }
}

impl From<i32> for Expr {
    fn from(value: i32) -> Self {
        Self::Literal(Value::from(value))
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Self::Literal(Value::from(value))
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Self::Literal(value)
    }
}

/// `Ref` to a parameter, resource or pseudo parameter.
#[must_use]
pub fn reference(name: impl Into<String>) -> Expr {
    Expr::Ref(name.into())
}

/// `Fn::GetAtt` on a resource attribute.
#[must_use]
pub fn get_att(resource: impl Into<String>, attribute: impl Into<String>) -> Expr {
    Expr::GetAtt {
        resource: resource.into(),
        attribute: attribute.into(),
    }
}

/// `Fn::Equals` between two values.
#[must_use]
pub fn equal(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
    Expr::Equals(Box::new(lhs.into()), Box::new(rhs.into()))
}

/// `Fn::Not` wrapped around `Fn::Equals`.
#[must_use]
pub fn not_equal(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
    Expr::Not(Box::new(equal(lhs, rhs)))
}

/// `Fn::If` selecting between two values on a named condition.
#[must_use]
pub fn fn_if(
    condition: impl Into<String>,
    then: impl Into<Expr>,
    otherwise: impl Into<Expr>,
) -> Expr {
    Expr::If {
        condition: condition.into(),
        then: Box::new(then.into()),
        otherwise: Box::new(otherwise.into()),
    }
}

/// `Fn::Join` over the given parts.
#[must_use]
pub fn join<I, E>(delimiter: impl Into<String>, parts: I) -> Expr
where
    I: IntoIterator<Item = E>,
    E: Into<Expr>,
{
    Expr::Join {
        delimiter: delimiter.into(),
        parts: parts.into_iter().map(Into::into).collect(),
    }
}

/// `Fn::Base64` of a value.
#[must_use]
pub fn base64(inner: impl Into<Expr>) -> Expr {
    Expr::Base64(Box::new(inner.into()))
}
