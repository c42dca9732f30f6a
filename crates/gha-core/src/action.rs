//! Action definition model (`action.yml`).
//!
//! Only the parts needed for the README table are modelled. Input attributes
//! are loosely typed in the wild (numeric defaults, `"true"` as a string), so
//! they are coerced here, at the parse boundary, into plain strings and bools.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Deserializer, de};
use serde_yaml::Value;

use gha_fs::{NormalizedPath, io};

use crate::{Error, Result};

/// Table columns, in display order.
pub const INPUT_COLUMNS: [&str; 4] = ["name", "default", "description", "required"];

/// File names recognised as action definitions (`action.yml`, `action.yaml`).
static ACTION_FILE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^action\.ya?ml$").expect("Invalid action file regex"));

/// Whether a repository path names an action definition.
pub fn is_action_file(path: &str) -> bool {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    ACTION_FILE_NAME.is_match(file_name)
}

/// The subset of an action definition rendered into README tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ActionDefinition {
    #[serde(deserialize_with = "scalar_option")]
    pub name: Option<String>,
    #[serde(deserialize_with = "scalar_option")]
    pub description: Option<String>,
    /// Declared inputs in file order.
    #[serde(deserialize_with = "nullable_inputs")]
    pub inputs: IndexMap<String, ActionInput>,
}

/// A single declared input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ActionInput {
    #[serde(deserialize_with = "scalar_string")]
    pub default: String,
    #[serde(deserialize_with = "scalar_string")]
    pub description: String,
    #[serde(deserialize_with = "flexible_bool")]
    pub required: bool,
}

/// One rendered table row in [`INPUT_COLUMNS`] order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRow {
    pub name: String,
    pub default: String,
    pub description: String,
    pub required: bool,
}

impl InputRow {
    /// Display strings in column order.
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.default.clone(),
            self.description.clone(),
            self.required.to_string(),
        ]
    }
}

impl ActionDefinition {
    /// Parse YAML text. An empty document is a definition with no inputs.
    pub fn parse(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        match serde_yaml::from_str::<Option<Self>>(content)? {
            Some(definition) => Ok(definition),
            None => Ok(Self::default()),
        }
    }

    /// Read and parse the definition at `path`.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let content = io::read_text(path)?;
        Self::parse(&content).map_err(|e| Error::ActionParse {
            path: path.to_native(),
            message: e.to_string(),
        })
    }

    pub fn has_inputs(&self) -> bool {
        !self.inputs.is_empty()
    }

    /// Table rows in declaration order.
    pub fn rows(&self) -> Vec<InputRow> {
        self.inputs
            .iter()
            .map(|(name, input)| InputRow {
                name: name.clone(),
                default: input.default.clone(),
                description: input.description.clone(),
                required: input.required,
            })
            .collect()
    }
}

fn scalar_to_string<E: de::Error>(value: Value) -> std::result::Result<Option<String>, E> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Tagged(tagged) => scalar_to_string(tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => {
            Err(E::custom("expected a string, number or boolean"))
        }
    }
}

fn scalar_string<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_to_string::<D::Error>(value)?.unwrap_or_default())
}

fn scalar_option<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    scalar_to_string::<D::Error>(Value::deserialize(deserializer)?)
}

fn flexible_bool<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<bool, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(false),
        Value::Bool(b) => Ok(b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" | "" => Ok(false),
            other => Err(de::Error::custom(format!("expected true or false, got {other:?}"))),
        },
        _ => Err(de::Error::custom("expected a boolean")),
    }
}

fn nullable_inputs<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<IndexMap<String, ActionInput>, D::Error> {
    let inputs: Option<IndexMap<String, Option<ActionInput>>> = Option::deserialize(deserializer)?;
    Ok(inputs
        .unwrap_or_default()
        .into_iter()
        .map(|(name, input)| (name, input.unwrap_or_default()))
        .collect())
}
