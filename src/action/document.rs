//! Parsed action metadata (action.yml).
//!
//! YAML shape (only the fields we read):
//! name: Greet
//! inputs:
//!   who-to-greet:
//!     required: true
//! outputs:
//!   time:
//!     description: ...
//! branding:
//!   color: purple
//!
//! Everything else in the file is ignored. Key order of `inputs` and `outputs`
//! is preserved so the diagram lists nodes in the order the author wrote them.

use crate::error::ActionError;

use indexmap::IndexMap;
use serde::Deserialize;
use serde::de::{Deserializer, IgnoredAny};
use serde_yaml::Value;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionDocument {
    /// `name: 2048` is a valid name; any scalar is read as text.
    #[serde(default, deserialize_with = "scalar_text")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub inputs: IndexMap<String, InputSpec>,

    /// Output bodies carry nothing we render and may be any YAML value.
    #[serde(default, deserialize_with = "null_as_default")]
    pub outputs: IndexMap<String, IgnoredAny>,

    #[serde(default)]
    pub branding: Option<Branding>,
}

/// An input body. Only a mapping can declare `required`; a null or scalar
/// body is an optional input.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Value")]
pub struct InputSpec {
    /// Kept loose: authors write `true`, `'true'` and `"false"` interchangeably.
    pub required: Value,
}

impl From<Value> for InputSpec {
    fn from(body: Value) -> Self {
        let required = match &body {
            Value::Mapping(m) => m.get("required").cloned().unwrap_or_default(),
            _ => Value::Null,
        };
        Self { required }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Branding {
    #[serde(default, deserialize_with = "scalar_text")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Required,
    Optional,
}

impl Requirement {
    /// Style class name used in the diagram.
    pub fn class(self) -> &'static str {
        match self {
            Requirement::Required => "required",
            Requirement::Optional => "optional",
        }
    }
}

impl InputSpec {
    pub fn requirement(&self) -> Requirement {
        match &self.required {
            Value::Bool(true) => Requirement::Required,
            Value::String(s) if s.trim().eq_ignore_ascii_case("true") => Requirement::Required,
            _ => Requirement::Optional,
        }
    }
}

impl ActionDocument {
    /// Parse raw action.yml text.
    ///
    /// An empty file, a bare `~`, or `{}` is [`ActionError::EmptyDocument`];
    /// a top-level value that is not a mapping is a parse error.
    pub fn parse(text: &str) -> Result<Self, ActionError> {
        if text.trim().is_empty() {
            return Err(ActionError::EmptyDocument);
        }
        let value: Value = serde_yaml::from_str(text)?;
        match &value {
            Value::Null => return Err(ActionError::EmptyDocument),
            Value::Mapping(m) if m.is_empty() => return Err(ActionError::EmptyDocument),
            _ => {}
        }
        Ok(serde_yaml::from_value(value)?)
    }

    /// The action's display name; absent or blank is an error.
    pub fn name(&self) -> Result<&str, ActionError> {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => Ok(name),
            _ => Err(ActionError::MissingName),
        }
    }

    /// Input keys with their classification, in document order.
    pub fn inputs(&self) -> impl Iterator<Item = (&str, Requirement)> {
        self.inputs
            .iter()
            .map(|(key, spec)| (key.as_str(), spec.requirement()))
    }

    /// Output keys in document order.
    pub fn outputs(&self) -> impl Iterator<Item = &str> {
        self.outputs.keys().map(String::as_str)
    }

    pub fn branding_color(&self) -> Option<&str> {
        self.branding
            .as_ref()
            .and_then(|b| b.color.as_deref())
            .filter(|c| !c.trim().is_empty())
    }
}

/// Treat `inputs:` with nothing under it the same as a missing section.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Read a string, number or boolean as text. Null, sequences and mappings
/// read as absent.
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}
