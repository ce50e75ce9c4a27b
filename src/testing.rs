//! Test-support configuration shared by the fixture-based suites.

use std::sync::LazyLock;

/// Environment variable that switches fixture tests into regeneration mode.
pub const REGEN_ENV_VAR: &str = "REGRAFT_REGEN_TEST_FIXTURES";

static REGEN: LazyLock<bool> =
    LazyLock::new(|| std::env::var(REGEN_ENV_VAR).as_deref().is_ok_and(truthy));

/// True when fixture tests should rewrite their expected files instead of
/// asserting against them. Read once per process.
#[must_use]
pub fn regen_fixtures() -> bool {
    *REGEN
}

fn truthy(value: &str) -> bool {
    !value.is_empty() && value != "0" && value != "false"
}
