//! Tests for telemetry opt-out exports.

use std::collections::HashMap;

use gha_core::telemetry::{self, EnvVar, ExportTarget, TELEMETRY_DEFAULTS};
use gha_core::Error;
use gha_fs::NormalizedPath;
use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::TempDir;

fn names(vars: &[EnvVar]) -> Vec<&str> {
    vars.iter().map(|v| v.name.as_str()).collect()
}

#[rstest]
#[case(None, false)]
#[case(Some(""), false)]
#[case(Some("0"), false)]
#[case(Some("false"), false)]
#[case(Some("FALSE"), false)]
#[case(Some("1"), true)]
#[case(Some("true"), true)]
#[case(Some("yes"), true)]
fn test_do_not_track_truthiness(#[case] value: Option<&str>, #[case] expected: bool) {
    assert_eq!(telemetry::is_truthy(value), expected);
}

#[test]
fn test_falsy_exports_nothing_and_ignores_additional() {
    let vars = telemetry::telemetry_exports(None, Some("not { valid")).unwrap();
    assert!(vars.is_empty());
}

#[test]
fn test_defaults_exported() {
    let vars = telemetry::telemetry_exports(Some("1"), None).unwrap();
    assert_eq!(vars.len(), TELEMETRY_DEFAULTS.len());
    assert_eq!(vars.last(), Some(&EnvVar::new("WRANGLER_SEND_METRICS", "false")));
    assert!(vars.contains(&EnvVar::new("NEXT_TELEMETRY_DISABLED", "1")));
}

#[test]
fn test_additional_json_comes_first() {
    let vars = telemetry::telemetry_exports(Some("1"), Some(r#"{"GATSBY_TELEMETRY_DISABLED": 1, "FOO": true}"#))
        .unwrap();
    assert_eq!(names(&vars)[..2], ["GATSBY_TELEMETRY_DISABLED", "FOO"]);
    assert_eq!(vars[0].value, "1");
    assert_eq!(vars[1].value, "true");
    assert_eq!(vars.len(), TELEMETRY_DEFAULTS.len() + 2);
}

#[test]
fn test_additional_dotenv() {
    let input = "\
# tooling opt-outs
GATSBY_TELEMETRY_DISABLED=1
export NUXT_TELEMETRY_DISABLED=\"1\"

STORYBOOK_DISABLE_TELEMETRY = 'true'
";
    let vars = telemetry::parse_additional(input).unwrap();
    assert_eq!(
        vars,
        vec![
            EnvVar::new("GATSBY_TELEMETRY_DISABLED", "1"),
            EnvVar::new("NUXT_TELEMETRY_DISABLED", "1"),
            EnvVar::new("STORYBOOK_DISABLE_TELEMETRY", "true"),
        ]
    );
}

#[rstest]
#[case::bad_json("{\"A\": ")]
#[case::nested_json("{\"A\": {\"B\": 1}}")]
#[case::no_equals("JUST_A_NAME")]
#[case::bad_name("1ABC=1")]
fn test_invalid_additional(#[case] input: &str) {
    let err = telemetry::parse_additional(input).unwrap_err();
    assert!(matches!(err, Error::InvalidInput { ref name, .. } if name == "additional"));
}

#[test]
fn test_export_appends_to_env_file() {
    let temp = TempDir::new().unwrap();
    let env_file = temp.path().join("github_env");
    std::fs::write(&env_file, "EXISTING=1\n").unwrap();

    let target = ExportTarget::from_env(env_file.to_str());
    let printed = target
        .export(&[EnvVar::new("A", "1"), EnvVar::new("B", "false")])
        .unwrap();

    assert_eq!(printed, None);
    let content = std::fs::read_to_string(&env_file).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "EXISTING=1");
    assert!(lines[1].starts_with("A<<ghadelimiter_"));
    assert_eq!(lines[2], "1");
    assert!(lines[4].starts_with("B<<ghadelimiter_"));
    assert_eq!(lines[5], "false");
    assert_eq!(lines.len(), 7);
}

#[test]
fn test_export_to_stdout_without_github_env() {
    let target = ExportTarget::from_env(None);
    assert_eq!(target, ExportTarget::Stdout);
    assert_eq!(ExportTarget::from_env(Some("  ")), ExportTarget::Stdout);

    let printed = target.export(&[EnvVar::new("A", "1")]).unwrap();
    assert_eq!(printed.as_deref(), Some("A=1\n"));
}

#[test]
fn test_env_file_target_path() {
    assert_eq!(
        ExportTarget::from_env(Some("/runner/env")),
        ExportTarget::EnvFile(NormalizedPath::new("/runner/env"))
    );
}

#[test]
fn test_verify_passes_when_all_set() {
    let env: HashMap<&str, &str> = TELEMETRY_DEFAULTS.iter().copied().collect();
    let verified = telemetry::verify(|name| env.get(name).map(|v| v.to_string())).unwrap();
    assert_eq!(verified.len(), TELEMETRY_DEFAULTS.len());
}

#[test]
fn test_verify_lists_missing() {
    let env: HashMap<&str, &str> = [("DO_NOT_TRACK", "1"), ("ASTRO_TELEMETRY_DISABLED", "1")]
        .into_iter()
        .collect();
    let err = telemetry::verify(|name| env.get(name).map(|v| v.to_string())).unwrap_err();
    let Error::TelemetryNotSet { names } = err else {
        panic!("expected TelemetryNotSet, got {err:?}");
    };
    assert_eq!(names.len(), 4);
    assert!(!names.contains(&"DO_NOT_TRACK".to_string()));
}

#[test]
fn test_verify_skipped_when_tracking_allowed() {
    let verified = telemetry::verify(|_| None).unwrap();
    assert!(verified.is_empty());
}
