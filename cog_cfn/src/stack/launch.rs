//! User data for the Cog host launch configuration.

use serde_json::Value;

use crate::catalog::AssetSource;
use crate::context::AssemblyContext;
use crate::intrinsic::{Expr, base64, get_att, join, reference};
use crate::{CfnError, CfnResult};

pub(super) const LAUNCH_CONFIG: &str = "CogAsgLaunchConfig";

const CLOUD_CONFIG_ASSET: &str = "cloud-config";

/// Builds the base64 user data: the cloud-config asset, the `cfn-init`
/// call, and the build timestamp.
pub(super) fn user_data(assets: &AssetSource) -> CfnResult<Expr> {
    let cloud_config = assets.load(CLOUD_CONFIG_ASSET)?;
    Ok(base64(join(
        "",
        [
            Expr::from(cloud_config),
            Expr::from("  - cfn-init -s "),
            reference("AWS::StackName"),
            Expr::from(format!(" -r {LAUNCH_CONFIG}\n")),
            Expr::from("# Timestamp: "),
            get_att("Time", "Now"),
        ],
    )))
}

/// Sets `UserData` on the launch configuration merged from the instance
/// fragment.
///
/// # Errors
///
/// Returns [`CfnError::InvalidFragment`] when the launch configuration or
/// its `Properties` object is missing, and asset errors from
/// [`AssetSource::load`].
pub(super) fn attach_user_data(ctx: &mut AssemblyContext, assets: &AssetSource) -> CfnResult<()> {
    let mut launch = ctx
        .template()
        .resource(LAUNCH_CONFIG)
        .cloned()
        .ok_or_else(|| {
            CfnError::invalid_fragment("instance", format!("{LAUNCH_CONFIG} is missing"))
        })?;
    let Some(properties) = launch.get_mut("Properties").and_then(Value::as_object_mut) else {
        return Err(CfnError::invalid_fragment(
            "instance",
            format!("{LAUNCH_CONFIG} has no Properties object"),
        ));
    };
    properties.insert("UserData".to_owned(), user_data(assets)?.to_value());
    ctx.template_mut().declare_resource(LAUNCH_CONFIG, launch);
    Ok(())
}
