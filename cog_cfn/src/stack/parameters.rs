//! Cog input declarations and the conditions derived from them.

use serde_json::{Map, Value};

use crate::config::AssemblyConfig;
use crate::context::AssemblyContext;
use crate::intrinsic::{equal, not_equal, reference};
use crate::registrar::ParameterSpec;
use crate::{CfnError, CfnResult};

/// A parameter declared directly rather than through the registrar.
#[derive(Debug, Clone, Copy)]
struct RawParameter {
    id: &'static str,
    description: &'static str,
    kind: &'static str,
    default: Option<&'static str>,
    allowed: &'static [&'static str],
    pattern: Option<&'static str>,
    constraint: Option<&'static str>,
    no_echo: bool,
}

impl RawParameter {
    const fn new(id: &'static str, description: &'static str, kind: &'static str) -> Self {
        Self {
            id,
            description,
            kind,
            default: None,
            allowed: &[],
            pattern: None,
            constraint: None,
            no_echo: false,
        }
    }

    const fn default(mut self, value: &'static str) -> Self {
        self.default = Some(value);
        self
    }

    const fn allowed(mut self, values: &'static [&'static str]) -> Self {
        self.allowed = values;
        self
    }

    const fn pattern(mut self, pattern: &'static str) -> Self {
        self.pattern = Some(pattern);
        self
    }

    const fn constraint(mut self, text: &'static str) -> Self {
        self.constraint = Some(text);
        self
    }

    const fn no_echo(mut self) -> Self {
        self.no_echo = true;
        self
    }

    fn attributes(&self) -> Map<String, Value> {
        let mut attrs = Map::new();
        attrs.insert("Description".to_owned(), self.description.into());
        attrs.insert("Type".to_owned(), self.kind.into());
        if let Some(default) = self.default {
            attrs.insert("Default".to_owned(), default.into());
        }
        if !self.allowed.is_empty() {
            attrs.insert("AllowedValues".to_owned(), self.allowed.into());
        }
        if let Some(pattern) = self.pattern {
            attrs.insert("AllowedPattern".to_owned(), pattern.into());
        }
        if self.no_echo {
            attrs.insert("NoEcho".to_owned(), "true".into());
        }
        if let Some(constraint) = self.constraint {
            attrs.insert("ConstraintDescription".to_owned(), constraint.into());
        }
        attrs
    }
}

const BOOLEAN: &[&str] = &["false", "true"];

const AWS: [RawParameter; 6] = [
    RawParameter::new("VpcId", "VPC ID for Cog deployment", "AWS::EC2::VPC::Id")
        .default("")
        .constraint("must be an existing VPC"),
    RawParameter::new(
        "ElbSubnetIds",
        "Comma separated list of subnets for the load balancer - 2 or more required",
        "List<AWS::EC2::Subnet::Id>",
    )
    .constraint("must be a list of VPC subnet IDs"),
    RawParameter::new(
        "InstanceSubnetIds",
        "Comma separated list of subnets for the Cog host and RDS - 2 or more required for MultiAZ RDS",
        "List<AWS::EC2::Subnet::Id>",
    )
    .constraint("must be a list of VPC subnet IDs"),
    RawParameter::new(
        "KeyName",
        "Name of an existing EC2 KeyPair to enable SSH access",
        "AWS::EC2::KeyPair::KeyName",
    )
    .constraint("must be the name of an existing EC2 KeyPair"),
    RawParameter::new("InstanceType", "Cog Host EC2 instance type", "String")
        .default("t2.medium")
        .constraint("must be an HVM/EBS EC2 instance type"),
    RawParameter::new("ImageId", "Cog Host AMI", "String")
        .default("ami-81365496")
        .constraint("must be an Ubuntu 16.04 LTS HVM/EBS AMI"),
];

const HTTP: [RawParameter; 2] = [
    RawParameter::new(
        "CogDnsname",
        "DNS hostname to use for Cog APIs - defaults to ELB DNS name if not set",
        "String",
    )
    .default(""),
    RawParameter::new(
        "SslCertificateArn",
        "AWS Certificate Manager ARN for SSL certificate to use for ELB",
        "String",
    )
    .default("")
    .pattern("^(arn:aws:acm.*)?$")
    .constraint("must be a valid AWS Certificate Manager ARN"),
];

const DATABASE_SOURCE: RawParameter = RawParameter::new(
    "DatabaseSource",
    "Provision new RDS database or use existing external Postgres database",
    "String",
)
.allowed(&["RDS", "External Database"])
.default("RDS");

const EXTERNAL_DATABASE: [RawParameter; 2] = [
    RawParameter::new("DatabaseUrl", "Database connection string for external database", "String")
        .pattern("^(ecto://[^:]+:[^@]+@[^/]+/.*)?$")
        .constraint("must be a valid Cog database URL"),
    RawParameter::new("CogDbSsl", "Use SSL to connect to Postgres", "String")
        .allowed(BOOLEAN)
        .default("false"),
];

const RDS: [RawParameter; 6] = [
    RawParameter::new("RdsMasterUsername", "Username for Postgres admin user", "String")
        .default("cog"),
    RawParameter::new("RdsMasterPassword", "Password for Postgres admin user", "String").no_echo(),
    RawParameter::new("RdsInstanceType", "Instance type to use for RDS database", "String")
        .default("db.m3.medium"),
    RawParameter::new("RdsStorage", "Space in GB to allocate for database storage", "Number")
        .default("20"),
    RawParameter::new(
        "RdsBackupRetention",
        "Number of days to retain automatic RDS backups",
        "Number",
    )
    .default("30"),
    RawParameter::new(
        "RdsMultiAZ",
        "Configure multi-AZ failover HA - requires 2 or more subnet IDs to be defined",
        "String",
    )
    .allowed(BOOLEAN)
    .default("false"),
];

const BOOTSTRAP_INSTANCE: RawParameter = RawParameter::new(
    "CogBootstrapInstance",
    "Configure Cog admin user automatically with bootstrap settings or manually via cogctl",
    "String",
)
.default("automatic")
.allowed(&["automatic", "cogctl"]);

/// Declares every Cog input in form order.
pub(super) fn declare(ctx: &mut AssemblyContext, config: &AssemblyConfig) -> CfnResult<()> {
    let strict = config.strict;

    declare_raw(ctx, &AWS, strict)?;

    declare_raw(ctx, &HTTP, strict)?;
    let conditions = ctx.template_mut();
    conditions.declare_condition("CogDnsnameExists", not_equal(reference("CogDnsname"), ""));
    conditions.declare_condition("SslEnabled", not_equal(reference("SslCertificateArn"), ""));
    conditions.declare_condition("SslDisabled", equal(reference("SslCertificateArn"), ""));

    register(ctx, required(config), strict)?;

    declare_raw(ctx, &[DATABASE_SOURCE], strict)?;
    ctx.template_mut()
        .declare_condition("ProvisionRds", equal(reference("DatabaseSource"), "RDS"));
    declare_raw(ctx, &EXTERNAL_DATABASE, strict)?;
    declare_raw(ctx, &RDS, strict)?;

    declare_raw(ctx, &[BOOTSTRAP_INSTANCE], strict)?;
    ctx.template_mut().declare_condition(
        "CogBootstrapInstance",
        equal(reference("CogBootstrapInstance"), "automatic"),
    );
    register(ctx, bootstrap(), strict)?;

    register(ctx, common(), strict)?;

    register(ctx, host(), strict)?;
    ctx.template_mut()
        .declare_condition("CogBucketNameExists", not_equal(reference("CogBucketName"), ""));
    Ok(())
}

fn declare_raw(
    ctx: &mut AssemblyContext,
    parameters: &[RawParameter],
    strict: bool,
) -> CfnResult<()> {
    for parameter in parameters {
        if strict && ctx.template().has_parameter(parameter.id) {
            return Err(CfnError::DuplicateParameter {
                id: parameter.id.to_owned(),
            });
        }
        ctx.template_mut()
            .declare_parameter(parameter.id, parameter.attributes());
    }
    Ok(())
}

fn register(ctx: &mut AssemblyContext, specs: Vec<ParameterSpec>, strict: bool) -> CfnResult<()> {
    for spec in specs {
        if strict {
            ctx.try_register(spec)?;
        } else {
            ctx.register(spec);
        }
    }
    Ok(())
}

fn required(config: &AssemblyConfig) -> Vec<ParameterSpec> {
    vec![
        ParameterSpec::new("required", "cog_image", "Cog Docker Image")
            .with_default(config.cog_image.as_str())
            .with_option("MinLength", "1"),
        ParameterSpec::new("required", "slack_api_token", "Slack API token")
            .with_option("NoEcho", "true"),
        ParameterSpec::new("required", "relay_image", "Relay Docker Image")
            .with_default(config.relay_image.as_str())
            .with_option("MinLength", "1"),
        ParameterSpec::new("required", "relay_id", "UUID for Relay")
            .with_default("00000000-0000-0000-0000-000000000000"),
        ParameterSpec::new("required", "relay_cog_token", "Shared secret for Relay")
            .with_option("NoEcho", "true"),
    ]
}

fn bootstrap() -> Vec<ParameterSpec> {
    [
        ("cog_bootstrap_username", "Username for initial Cog administrator", "admin"),
        ("cog_bootstrap_password", "Password for initial Cog administrator", "changeme"),
        ("cog_bootstrap_first_name", "First name for initial Cog administrator", "Cog"),
        ("cog_bootstrap_last_name", "Last name for initial Cog administrator", "Administrator"),
        (
            "cog_bootstrap_email_address",
            "Email address for initial Cog administrator",
            "cog@example.com",
        ),
    ]
    .into_iter()
    .map(|(name, description, default)| {
        ParameterSpec::new("bootstrap", name, description).with_default(default)
    })
    .collect()
}

fn common() -> Vec<ParameterSpec> {
    vec![
        ParameterSpec::new(
            "common",
            "cog_allow_self_registration",
            "Allow users to register themselves with Cog",
        )
        .with_default("false")
        .with_allowed(BOOLEAN.iter().copied()),
    ]
}

fn host() -> Vec<ParameterSpec> {
    vec![
        ParameterSpec::new(
            "host",
            "cog_bucket_name",
            "Existing S3 bucket for Cog host files - a new bucket is created if not set",
        )
        .with_default(""),
        ParameterSpec::new(
            "host",
            "cog_bucket_prefix",
            "Key prefix for Cog host files within the bucket, starting and ending with /",
        )
        .with_default("/"),
    ]
}
