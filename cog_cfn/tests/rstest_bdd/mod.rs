//! `rstest-bdd` behavioural tests for the parameter registrar.
//!
//! The feature files live under `tests/features`; this entrypoint wires in
//! the shared fixtures, the step registry, and the scenario bindings.

mod fixtures;
mod scenarios;
mod steps;
