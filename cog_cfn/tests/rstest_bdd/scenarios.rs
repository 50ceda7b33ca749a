//! Binds the registrar feature file to the step registry.

use crate::fixtures::{RegistrarWorld, registrar_world};
use rstest_bdd_macros::scenarios;

scenarios!(
    "tests/features/registrar.feature",
    fixtures = [registrar_world: RegistrarWorld]
);
