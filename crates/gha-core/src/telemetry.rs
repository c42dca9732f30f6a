//! Telemetry opt-out exports driven by `DO_NOT_TRACK`.
//!
//! When `DO_NOT_TRACK` is set to a truthy value, the opt-out switches of
//! common JavaScript tooling are exported to the job environment, preceded by
//! any user supplied variables.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use uuid::Uuid;

use gha_fs::{NormalizedPath, io};

use crate::{Error, Result};

/// Variable whose value decides whether anything is exported.
pub const DO_NOT_TRACK: &str = "DO_NOT_TRACK";

/// Job environment file written by the runner.
pub const GITHUB_ENV: &str = "GITHUB_ENV";

/// Opt-out variables exported whenever `DO_NOT_TRACK` is truthy.
pub const TELEMETRY_DEFAULTS: [(&str, &str); 6] = [
    ("ASTRO_TELEMETRY_DISABLED", "1"),
    ("DO_NOT_TRACK", "1"),
    ("NEXT_TELEMETRY_DISABLED", "1"),
    ("TURBO_TELEMETRY_DISABLED", "1"),
    ("VERCEL_TELEMETRY_DISABLED", "1"),
    ("WRANGLER_SEND_METRICS", "false"),
];

static ENV_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("Invalid env name regex"));

/// A variable to export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvVar {
    pub name: String,
    pub value: String,
}

impl EnvVar {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Whether a `DO_NOT_TRACK` value opts out of telemetry.
///
/// Unset, empty, `0` and `false` (any case) are falsy. This is stricter than
/// a plain presence check on purpose: `DO_NOT_TRACK=0` opts back in.
pub fn is_truthy(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        None | Some("") | Some("0") => false,
        Some(v) => !v.eq_ignore_ascii_case("false"),
    }
}

/// Parse the `additional` input: a JSON object or dotenv style lines.
///
/// # Errors
/// `Error::InvalidInput` for malformed JSON, nested values, lines without `=`
/// or names that are not valid environment variable names.
pub fn parse_additional(input: &str) -> Result<Vec<EnvVar>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    if trimmed.starts_with('{') {
        parse_json(trimmed)
    } else {
        parse_dotenv(trimmed)
    }
}

fn parse_json(input: &str) -> Result<Vec<EnvVar>> {
    let object: serde_json::Map<String, Value> = serde_json::from_str(input)
        .map_err(|e| Error::invalid_input("additional", format!("invalid JSON object: {e}")))?;

    object
        .into_iter()
        .map(|(name, value)| {
            let value = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null => String::new(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(Error::invalid_input(
                        "additional",
                        format!("value of '{name}' must be a string, number or boolean"),
                    ));
                }
            };
            validate_name(&name)?;
            Ok(EnvVar { name, value })
        })
        .collect()
}

fn parse_dotenv(input: &str) -> Result<Vec<EnvVar>> {
    let mut vars = Vec::new();

    for (number, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);

        let (name, value) = line.split_once('=').ok_or_else(|| {
            Error::invalid_input("additional", format!("line {} has no '='", number + 1))
        })?;
        let name = name.trim();
        validate_name(name)?;

        vars.push(EnvVar::new(name, unquote(value.trim())));
    }

    Ok(vars)
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

fn validate_name(name: &str) -> Result<()> {
    if ENV_NAME.is_match(name) {
        Ok(())
    } else {
        Err(Error::invalid_input(
            "additional",
            format!("'{name}' is not a valid environment variable name"),
        ))
    }
}

/// Variables to export for the given `DO_NOT_TRACK` value.
///
/// Returns nothing when `DO_NOT_TRACK` is falsy, without looking at
/// `additional`. Otherwise the additional variables come first, then the
/// defaults.
pub fn telemetry_exports(do_not_track: Option<&str>, additional: Option<&str>) -> Result<Vec<EnvVar>> {
    if !is_truthy(do_not_track) {
        tracing::debug!("DO_NOT_TRACK not set, exporting nothing");
        return Ok(Vec::new());
    }

    let mut vars = parse_additional(additional.unwrap_or_default())?;
    vars.extend(
        TELEMETRY_DEFAULTS
            .iter()
            .map(|(name, value)| EnvVar::new(*name, *value)),
    );
    Ok(vars)
}

/// Where exported variables go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
    /// The runner's `GITHUB_ENV` file.
    EnvFile(NormalizedPath),
    /// `NAME=value` lines on stdout, for local runs.
    Stdout,
}

impl ExportTarget {
    /// Target for a `GITHUB_ENV` value; unset or blank means stdout.
    pub fn from_env(github_env: Option<&str>) -> Self {
        match github_env.map(str::trim) {
            Some(path) if !path.is_empty() => Self::EnvFile(NormalizedPath::new(path)),
            _ => Self::Stdout,
        }
    }

    /// Text written for `vars`.
    pub fn render(&self, vars: &[EnvVar]) -> String {
        let mut out = String::new();
        for var in vars {
            match self {
                Self::EnvFile(_) => {
                    let delimiter = format!("ghadelimiter_{}", Uuid::new_v4());
                    out.push_str(&format!(
                        "{}<<{delimiter}\n{}\n{delimiter}\n",
                        var.name, var.value
                    ));
                }
                Self::Stdout => out.push_str(&format!("{}={}\n", var.name, var.value)),
            }
        }
        out
    }

    /// Export `vars`. Returns the text to print for [`ExportTarget::Stdout`].
    pub fn export(&self, vars: &[EnvVar]) -> Result<Option<String>> {
        let rendered = self.render(vars);
        match self {
            Self::EnvFile(path) => {
                io::append_text(path, &rendered)?;
                for var in vars {
                    tracing::debug!(name = %var.name, path = %path, "Exported variable");
                }
                Ok(None)
            }
            Self::Stdout => Ok(Some(rendered)),
        }
    }
}

/// Check that every default opt-out variable is present.
///
/// Passes without checking when `DO_NOT_TRACK` is falsy. Returns the names
/// that were verified.
///
/// # Errors
/// `Error::TelemetryNotSet` listing every missing variable.
pub fn verify<F>(lookup: F) -> Result<Vec<&'static str>>
where
    F: Fn(&str) -> Option<String>,
{
    if !is_truthy(lookup(DO_NOT_TRACK).as_deref()) {
        return Ok(Vec::new());
    }

    let missing: Vec<String> = TELEMETRY_DEFAULTS
        .iter()
        .filter(|entry| lookup(entry.0).is_none_or(|v| v.is_empty()))
        .map(|(name, _)| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(Error::TelemetryNotSet { names: missing });
    }

    let verified: Vec<&'static str> = TELEMETRY_DEFAULTS.iter().map(|(name, _)| *name).collect();
    for name in &verified {
        tracing::info!("verified {name}");
    }
    Ok(verified)
}
