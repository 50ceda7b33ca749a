//! Core crate for assembling the Cog CloudFormation template.
//!
//! The heart of the crate is the parameter registrar: each configurable input
//! is described once as a [`ParameterSpec`] and registered on an
//! [`AssemblyContext`], which derives the template identifier, emits the
//! parameter declaration and its condition, and records the identifier in a
//! presentation group. The [`stack`] module drives the registrar for the
//! complete Cog deployment and merges the fixed resource fragments shipped in
//! [`catalog`].
//!
//! ```rust
//! use cog_cfn::{AssemblyContext, ParameterSpec};
//!
//! let mut ctx = AssemblyContext::default();
//! let (declaration, condition) = ctx.register(
//!     ParameterSpec::new(
//!         "common",
//!         "cog_allow_self_registration",
//!         "Allow users to register themselves with Cog",
//!     )
//!     .with_default("false")
//!     .with_allowed(["false", "true"]),
//! );
//! assert_eq!(declaration.id, "CogAllowSelfRegistration");
//! assert_eq!(condition.name, "CogAllowSelfRegistration");
//! ```

pub mod catalog;
mod config;
mod context;
mod error;
pub mod groups;
pub mod intrinsic;
pub mod naming;
mod registrar;
pub mod stack;
pub mod template;

pub use config::{AssemblyConfig, DEFAULT_CONFIG_FILE, ENV_PREFIX};
pub use context::AssemblyContext;
pub use error::{CfnError, CfnResult};
pub use groups::{GroupKey, GroupRegistry, MemberList, PresentationGroup};
pub use intrinsic::Expr;
pub use registrar::{BOOLEAN_VALUES, Condition, Declaration, ParameterSpec};
pub use template::Template;
