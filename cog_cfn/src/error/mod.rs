//! Error types produced while assembling a template.

mod constructors;
mod types;

pub use types::{CfnError, CfnResult};
