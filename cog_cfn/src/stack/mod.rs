//! The complete Cog deployment template.
//!
//! [`assemble`] declares every Cog input through the registrar or as a raw
//! declaration, attaches the parameter form metadata, merges the bundled
//! instance and RDS fragments, and adds the launch user data and outputs.

mod interface;
mod launch;
mod outputs;
mod parameters;

use tracing::{debug, info};

use crate::catalog::{self, AssetSource};
use crate::config::AssemblyConfig;
use crate::context::AssemblyContext;
use crate::template::Template;
use crate::CfnResult;

pub use interface::{AWS_PARAMETERS, BOOTSTRAP_GROUP_LABEL, HTTP_PARAMETERS, RDS_PARAMETERS};

/// Builds the Cog deployment template described by `config`.
///
/// # Errors
///
/// Returns [`crate::CfnError::Io`] when the configured asset directory cannot
/// be opened, asset and fragment errors from [`crate::catalog`], and, in
/// strict mode, duplicate or undeclared parameter errors.
pub fn assemble(config: &AssemblyConfig) -> CfnResult<Template> {
    let assets = match &config.asset_dir {
        Some(dir) => AssetSource::from_dir(dir)?,
        None => AssetSource::bundled(),
    };
    let mut ctx = AssemblyContext::new(config.description.as_str());
    parameters::declare(&mut ctx, config)?;
    interface::attach(&mut ctx, config.strict)?;
    for fragment in [catalog::INSTANCE, catalog::RDS] {
        debug!(fragment = fragment.name(), "including fragment");
        ctx.include_fragment(&fragment, &assets)?;
    }
    launch::attach_user_data(&mut ctx, &assets)?;
    outputs::declare(ctx.template_mut());
    let template = ctx.into_template();
    info!(
        parameters = template.parameter_ids().count(),
        resources = template.resource_ids().count(),
        "assembled Cog template"
    );
    Ok(template)
}
