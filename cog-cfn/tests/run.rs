//! End-to-end tests for a `cog-cfn` run, isolated in a `figment::Jail`.

use anyhow::{Result, anyhow, ensure};
use clap::Parser;
use cog_cfn::ENV_PREFIX;
use cog_cfn_cli::cli::Args;
use cog_cfn_cli::error::AppError;
use cog_cfn_cli::output::Destination;
use cog_cfn_cli::run;
use rstest::rstest;
use serde_json::Value;
use test_helpers::figment::{figment_error, with_clean_jail};

fn args(flags: &[&str]) -> Args {
    Args::parse_from(std::iter::once("cog-cfn").chain(flags.iter().copied()))
}

#[rstest]
fn writes_pretty_json_to_stdout_by_default() -> Result<()> {
    let (destination, buffer) = with_clean_jail(ENV_PREFIX, |_| {
        let mut buffer = Vec::new();
        let destination = run(&args(&[]), &mut buffer).map_err(figment_error)?;
        Ok((destination, buffer))
    })?;
    ensure!(destination == Destination::Stdout, "unexpected destination {destination:?}");
    let text = String::from_utf8(buffer)?;
    ensure!(text.lines().count() > 1, "default output should be pretty");
    let document: Value = serde_json::from_str(&text)?;
    ensure!(
        document["AWSTemplateFormatVersion"] == "2010-09-09",
        "missing format version"
    );
    Ok(())
}

#[rstest]
fn file_configuration_and_flags_are_layered() -> Result<()> {
    let text = with_clean_jail(ENV_PREFIX, |j| {
        j.create_file(
            "cog-cfn.toml",
            "description = \"From file\"\ncog_image = \"registry/cog:file\"\noutput = \"build/cog.json\"\n",
        )?;
        j.set_env("COG_CFN_RELAY_IMAGE", "registry/relay:env");
        let mut buffer = Vec::new();
        let destination = run(
            &args(&["--compact", "--cog-image", "registry/cog:cli"]),
            &mut buffer,
        )
        .map_err(figment_error)?;
        if destination != Destination::File("build/cog.json".into()) {
            return Err(figment_error(format!("unexpected destination {destination:?}")));
        }
        if !buffer.is_empty() {
            return Err(figment_error("stdout should stay empty"));
        }
        std::fs::read_to_string("build/cog.json").map_err(figment_error)
    })?;

    ensure!(text.trim_end().lines().count() == 1, "compact output expected");
    let document: Value = serde_json::from_str(&text)?;
    ensure!(document["Description"] == "From file", "file description lost");
    ensure!(
        document["Parameters"]["CogImage"]["Default"] == "registry/cog:cli",
        "flag must beat file"
    );
    ensure!(
        document["Parameters"]["RelayImage"]["Default"] == "registry/relay:env",
        "env must beat defaults"
    );
    Ok(())
}

#[rstest]
fn directory_output_is_rejected() -> Result<()> {
    let err = with_clean_jail(ENV_PREFIX, |j| {
        std::fs::create_dir_all(j.directory().join("out")).map_err(figment_error)?;
        run(&args(&["-o", "out"]), &mut Vec::new())
            .err()
            .ok_or_else(|| figment_error("run should fail"))
    })?;
    ensure!(
        matches!(err, AppError::InvalidOutputPath { .. }),
        "unexpected error {err}"
    );
    Ok(())
}

#[rstest]
fn missing_explicit_config_is_reported() -> Result<()> {
    let err = with_clean_jail(ENV_PREFIX, |_| {
        run(&args(&["--config", "absent.toml"]), &mut Vec::new())
            .err()
            .ok_or_else(|| figment_error("run should fail"))
    })?;
    let message = err.to_string();
    ensure!(message.contains("absent.toml"), "message {message} lacks the path");
    Ok(())
}

#[rstest]
fn asset_directory_overrides_user_data() -> Result<()> {
    let text = with_clean_jail(ENV_PREFIX, |j| {
        std::fs::create_dir_all(j.directory().join("assets")).map_err(figment_error)?;
        j.create_file("assets/cloud-config", "#cloud-config\n# custom host setup\nruncmd:\n")?;
        let mut buffer = Vec::new();
        run(&args(&["--asset-dir", "assets", "--compact"]), &mut buffer).map_err(figment_error)?;
        String::from_utf8(buffer).map_err(figment_error)
    })?;
    ensure!(text.contains("custom host setup"), "asset override not applied");
    Ok(())
}

#[rstest]
fn strict_runs_succeed_for_the_bundled_stack() -> Result<()> {
    with_clean_jail(ENV_PREFIX, |_| {
        run(&args(&["--strict"]), &mut Vec::new()).map_err(figment_error)?;
        Ok(())
    })
    .map_err(|err| anyhow!("strict run failed: {err}"))
}
