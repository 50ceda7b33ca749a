//! Parameter form metadata: group order and human labels.

use crate::context::AssemblyContext;
use crate::groups::{GroupKey, MemberList, PresentationGroup};
use crate::naming::humanize_id;
use crate::template::{INTERFACE_METADATA_KEY, InterfaceMetadata};
use crate::CfnResult;

/// Inputs shown under `AWS Global Configuration`.
pub const AWS_PARAMETERS: [&str; 6] = [
    "VpcId",
    "ElbSubnetIds",
    "InstanceSubnetIds",
    "KeyName",
    "InstanceType",
    "ImageId",
];

/// Inputs shown under `HTTP Configuration`.
pub const HTTP_PARAMETERS: [&str; 2] = ["CogDnsname", "SslCertificateArn"];

/// Inputs shown under the RDS database group.
pub const RDS_PARAMETERS: [&str; 6] = [
    "RdsMasterUsername",
    "RdsMasterPassword",
    "RdsInstanceType",
    "RdsStorage",
    "RdsBackupRetention",
    "RdsMultiAZ",
];

/// Label of the group that leads with the bootstrap method selector.
pub const BOOTSTRAP_GROUP_LABEL: &str = "Cog Config (Bootstrap)";

const BOOTSTRAP_SELECTOR: &str = "CogBootstrapInstance";

const AWS_LABELS: [(&str, &str); 12] = [
    ("VpcId", "* VPC ID"),
    ("KeyName", "* EC2 SSH Keypair"),
    ("InstanceType", "* EC2 Instance Type"),
    ("ImageId", "* EC2 AMI"),
    ("ElbSubnetIds", "* ELB Subnet IDs"),
    ("InstanceSubnetIds", "* Instance Subnet IDs"),
    ("RdsMasterUsername", "RDS Username"),
    ("RdsMasterPassword", "RDS Password"),
    ("RdsInstanceType", "DB Instance Type"),
    ("RdsStorage", "Storage (GB)"),
    ("RdsBackupRetention", "Backup Retention (Days)"),
    ("RdsMultiAZ", "Multi-AZ HA"),
];

const HTTP_LABELS: [(&str, &str); 2] = [
    ("CogDnsname", "DNS Hostname"),
    ("SslCertificateArn", "SSL Certificate"),
];

const COG_LABELS: [(&str, &str); 10] = [
    ("CogImage", "* Cog Docker Image"),
    ("SlackApiToken", "* Slack API Token"),
    ("RelayImage", "* Relay Docker Image"),
    ("RelayId", "* Relay UUID"),
    ("RelayCogToken", "* Relay Secret"),
    ("DatabaseSource", "* Database Source"),
    ("DatabaseUrl", "Database URL"),
    ("CogDbSsl", "Use SSL"),
    ("CogBootstrapInstance", "* Bootstrap Method"),
    ("CogAllowSelfRegistration", "* Self Registration"),
];

const HOST_LABELS: [(&str, &str); 2] = [
    ("CogBucketName", "S3 Bucket"),
    ("CogBucketPrefix", "S3 Key Prefix"),
];

/// Stores the `AWS::CloudFormation::Interface` metadata on the template.
///
/// Bootstrap labels are derived from the group members before the selector
/// is prepended, so the selector keeps its own label.
pub(super) fn attach(ctx: &mut AssemblyContext, strict: bool) -> CfnResult<()> {
    let mut interface = InterfaceMetadata::new();
    interface.push_group(PresentationGroup::fixed("AWS Global Configuration", AWS_PARAMETERS));
    interface.push_group(PresentationGroup::fixed("HTTP Configuration", HTTP_PARAMETERS));
    interface.push_group(PresentationGroup::fixed("Database Source", ["DatabaseSource"]));
    interface.push_group(PresentationGroup::fixed(
        "Database Configuration: External (Skip for RDS)",
        ["DatabaseUrl", "CogDbSsl"],
    ));
    interface.push_group(PresentationGroup::fixed(
        "Database Configuration: RDS (Skip for External)",
        RDS_PARAMETERS,
    ));

    let required = ctx.parameter_group("required", "Cog Config (Required)");
    let bootstrap = ctx.parameter_group("bootstrap", BOOTSTRAP_GROUP_LABEL);
    let common = ctx.parameter_group("common", "Cog Config (Frequently Updated)");
    let host = ctx.parameter_group("host", "Cog Host Configuration");

    interface.extend_labels(AWS_LABELS);
    interface.extend_labels(HTTP_LABELS);
    interface.extend_labels(COG_LABELS);
    interface.extend_labels(HOST_LABELS);
    interface.extend_labels(bootstrap_labels(ctx));

    if strict {
        ctx.prepend_declared(&bootstrap.members, BOOTSTRAP_SELECTOR)?;
    } else {
        bootstrap.members.prepend(BOOTSTRAP_SELECTOR);
    }

    for group in [required, bootstrap, common, host] {
        interface.push_group(group);
    }
    ctx.template_mut()
        .set_metadata(INTERFACE_METADATA_KEY, interface);
    Ok(())
}

fn bootstrap_labels(ctx: &AssemblyContext) -> Vec<(String, String)> {
    ctx.groups()
        .get(&GroupKey::from("bootstrap"))
        .as_ref()
        .map(MemberList::to_vec)
        .unwrap_or_default()
        .into_iter()
        .map(|id| {
            let label = humanize_id(&id.replace("CogBootstrap", ""));
            (id, label)
        })
        .collect()
}
