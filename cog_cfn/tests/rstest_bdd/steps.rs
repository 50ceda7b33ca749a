//! Step definitions for the registrar scenarios.

use anyhow::{Context, Result, anyhow, ensure};
use cog_cfn::intrinsic::{equal, reference};
use cog_cfn::{AssemblyContext, CfnError, GroupKey, ParameterSpec, Template};
use rstest_bdd_macros::{given, then, when};
use serde_json::Value;

use crate::fixtures::RegistrarWorld;

fn with_context<T>(
    world: &RegistrarWorld,
    f: impl FnOnce(&mut AssemblyContext) -> T,
) -> Result<T> {
    let mut ctx = world
        .context
        .take()
        .ok_or_else(|| anyhow!("assembly context not initialised"))?;
    let output = f(&mut ctx);
    world.context.set(ctx);
    Ok(output)
}

fn with_template<T>(world: &RegistrarWorld, f: impl FnOnce(&Template) -> T) -> Result<T> {
    world
        .context
        .with_ref(|ctx| f(ctx.template()))
        .ok_or_else(|| anyhow!("assembly context not initialised"))
}

fn secret(group: &str, name: &str) -> ParameterSpec {
    ParameterSpec::new(group, name, "Shared secret").with_option("NoEcho", "true")
}

#[given("an empty assembly context")]
fn empty_context(registrar_world: &RegistrarWorld) {
    registrar_world.context.set(AssemblyContext::default());
}

#[when("I register a flag {name} in group {group} defaulting to {default}")]
fn register_flag(
    registrar_world: &RegistrarWorld,
    name: String,
    group: String,
    default: String,
) -> Result<()> {
    let spec = ParameterSpec::new(group, name, "Boolean flag")
        .with_default(default)
        .with_allowed(["false", "true"]);
    with_context(registrar_world, |ctx| {
        ctx.register(spec);
    })
}

#[when("I register a setting {name} in group {group} defaulting to {default}")]
fn register_setting(
    registrar_world: &RegistrarWorld,
    name: String,
    group: String,
    default: String,
) -> Result<()> {
    let spec = ParameterSpec::new(group, name, "Plain setting").with_default(default);
    with_context(registrar_world, |ctx| {
        ctx.register(spec);
    })
}

#[when("I register a secret {name} in group {group}")]
fn register_secret(registrar_world: &RegistrarWorld, name: String, group: String) -> Result<()> {
    let spec = secret(&group, &name);
    with_context(registrar_world, |ctx| {
        ctx.register(spec);
    })
}

#[when("I strictly register a secret {name} in group {group}")]
fn try_register_secret(
    registrar_world: &RegistrarWorld,
    name: String,
    group: String,
) -> Result<()> {
    let spec = secret(&group, &name);
    let outcome = with_context(registrar_world, |ctx| ctx.try_register(spec))?;
    if let Err(err) = outcome {
        registrar_world.failure.set(err);
    }
    Ok(())
}

#[when("I prepend {id} to the bootstrap group")]
fn prepend_bootstrap(registrar_world: &RegistrarWorld, id: String) -> Result<()> {
    let group = with_context(registrar_world, |ctx| {
        ctx.parameter_group("bootstrap", "Cog Config (Bootstrap)")
    })?;
    group.members.prepend(id);
    registrar_world.bootstrap.set(group);
    Ok(())
}

#[then("the parameter {id} is a String with default {default}")]
fn parameter_with_default(
    registrar_world: &RegistrarWorld,
    id: String,
    default: String,
) -> Result<()> {
    let attrs = with_template(registrar_world, |template| template.parameter(&id).cloned())?
        .with_context(|| format!("{id} is not declared"))?;
    ensure!(attrs.get("Type").and_then(Value::as_str) == Some("String"), "{id} is not a String");
    ensure!(
        attrs.get("Default").and_then(Value::as_str) == Some(default.as_str()),
        "{id} has default {:?}",
        attrs.get("Default")
    );
    Ok(())
}

#[then("the parameter {id} has no default")]
fn parameter_without_default(registrar_world: &RegistrarWorld, id: String) -> Result<()> {
    let attrs = with_template(registrar_world, |template| template.parameter(&id).cloned())?
        .with_context(|| format!("{id} is not declared"))?;
    ensure!(!attrs.contains_key("Default"), "{id} unexpectedly has a default");
    Ok(())
}

#[then("the condition {name} holds when the value is true")]
fn truthy_condition(registrar_world: &RegistrarWorld, name: String) -> Result<()> {
    let expected = equal(reference(name.as_str()), "true");
    let actual = with_template(registrar_world, |template| template.condition(&name).cloned())?;
    ensure!(actual == Some(expected), "condition {name} is {actual:?}");
    Ok(())
}

#[then("the condition {name} holds when the value is blank")]
fn blank_condition(registrar_world: &RegistrarWorld, name: String) -> Result<()> {
    let id = name
        .strip_suffix("Empty")
        .with_context(|| format!("{name} is not an emptiness condition"))?;
    let expected = equal(reference(id), "");
    let actual = with_template(registrar_world, |template| template.condition(&name).cloned())?;
    ensure!(actual == Some(expected), "condition {name} is {actual:?}");
    Ok(())
}

#[then("group {group} lists {id}")]
fn group_lists(registrar_world: &RegistrarWorld, group: String, id: String) -> Result<()> {
    let members = registrar_world
        .context
        .with_ref(|ctx| ctx.groups().get(&GroupKey::from(group.as_str())))
        .flatten()
        .with_context(|| format!("group {group} was never recorded"))?;
    ensure!(members.contains(&id), "group {group} lacks {id}");
    Ok(())
}

#[then("group {group} is absent")]
fn group_absent(registrar_world: &RegistrarWorld, group: String) -> Result<()> {
    let present = registrar_world
        .context
        .with_ref(|ctx| ctx.groups().get(&GroupKey::from(group.as_str())).is_some())
        .ok_or_else(|| anyhow!("assembly context not initialised"))?;
    ensure!(!present, "group {group} should not exist");
    Ok(())
}

#[then("the rendered bootstrap group lists {ids}")]
fn rendered_bootstrap(registrar_world: &RegistrarWorld, ids: String) -> Result<()> {
    let expected: Vec<&str> = ids.split(',').map(str::trim).collect();
    let rendered = registrar_world
        .bootstrap
        .with_ref(|group| serde_json::to_value(group))
        .ok_or_else(|| anyhow!("bootstrap group was not captured"))??;
    let actual: Vec<&str> = rendered["Parameters"]
        .as_array()
        .context("rendered group has a member list")?
        .iter()
        .filter_map(Value::as_str)
        .collect();
    ensure!(actual == expected, "rendered members were {actual:?}");
    Ok(())
}

#[then("registration fails because {id} is already declared")]
fn duplicate_failure(registrar_world: &RegistrarWorld, id: String) -> Result<()> {
    let matched = registrar_world
        .failure
        .with_ref(|err| matches!(err, CfnError::DuplicateParameter { id: dup } if *dup == id))
        .ok_or_else(|| anyhow!("no failure was recorded"))?;
    ensure!(matched, "failure does not name {id}");
    Ok(())
}
