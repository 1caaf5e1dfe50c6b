// crates/gitlab-mock-config/tests/common/mod.rs
// ============================================================================
// Module: Config Test Helpers
// Description: Shared fixture text and file helpers for config tests.
// Purpose: Reduce duplication across integration tests for gitlab-mock-config.
// ============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use gitlab_mock_config::ConfigError;
use gitlab_mock_config::FixtureConfig;
use time::OffsetDateTime;
use time::macros::datetime;

/// Instant pinned by [`FIXTURE`].
pub const START: OffsetDateTime = datetime!(2026-01-01 00:00 UTC);

/// Fixture with a group, a group project, and two releases.
pub const FIXTURE: &str = r#"
[clock]
mode = "fixed"
at = "2026-01-01T00:00:00Z"

[[users]]
username = "root"
name = "Root"
email = "root@example.test"
is_admin = true

[[users]]
username = "maria"
name = "Maria"
email = "maria@example.test"

[[users]]
username = "dev"
name = "Dev"
email = "dev@example.test"
bio = "ships things"

[[groups]]
path = "acme"
name = "Acme"
members = [{ username = "maria", tier = "maintain" }]

[[projects]]
name = "Widgets"
path = "widgets"
namespace = { group = "acme" }
members = [{ username = "dev", tier = "contribute" }]

[[projects.releases]]
tag_name = "v1.0.0"
author = "dev"
name = "First"
ref = "main"

[[projects.releases]]
tag_name = "v1.1.0"
author = "maria"
released_at = "2026-02-01T00:00:00Z"

[[projects]]
name = "Notes"
path = "notes"
namespace = { user = "dev" }
visibility = "public"
shares = [{ group = "acme", tier = "view" }]
"#;

/// Parses TOML into a fixture without validating it.
pub fn config_from_toml(toml_str: &str) -> Result<FixtureConfig, toml::de::Error> {
    toml::from_str(toml_str)
}

/// Returns the shared fixture, unvalidated.
pub fn fixture_config() -> Result<FixtureConfig, toml::de::Error> {
    config_from_toml(FIXTURE)
}

/// Writes `contents` to `name` under `dir` and returns the path.
pub fn write_fixture(dir: &Path, name: &str, contents: &[u8]) -> Result<PathBuf, String> {
    let path = dir.join(name);
    fs::write(&path, contents).map_err(|err| err.to_string())?;
    Ok(path)
}

/// Fails unless `result` is an invalid-config error mentioning `needle`.
pub fn assert_invalid<T>(result: Result<T, ConfigError>, needle: &str) -> Result<(), String> {
    match result {
        Err(ConfigError::Invalid(message)) => {
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Err(other) => Err(format!("expected invalid config, got {other}")),
        Ok(_) => Err("expected invalid config".to_string()),
    }
}
