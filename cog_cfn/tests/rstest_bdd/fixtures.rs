//! Scenario state shared by the registrar steps.

use cog_cfn::{AssemblyContext, CfnError, PresentationGroup};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;

/// State carried between the steps of one registrar scenario.
#[derive(Debug, Default, ScenarioState)]
pub struct RegistrarWorld {
    /// Context under test.
    pub context: Slot<AssemblyContext>,
    /// Bootstrap group handle obtained before further mutation.
    pub bootstrap: Slot<PresentationGroup>,
    /// Error returned by the last checked operation.
    pub failure: Slot<CfnError>,
}

/// Provides an empty world for each scenario.
#[fixture]
pub fn registrar_world() -> RegistrarWorld {
    RegistrarWorld::default()
}
