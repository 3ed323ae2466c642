// Released under MIT License.
// Copyright (c) 2025 Ladislav Bartos

//! Contains the implementation of the `MdpValue` structure and its methods.

use std::fmt::{self, Display};

use crate::errors::MdpError;
use crate::PANIC_MESSAGE;

/// A typed value that can be written into an mdp file.
#[derive(Debug, Clone, PartialEq)]
pub enum MdpValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl MdpValue {
    /// Convert the value into its canonical mdp textual representation.
    ///
    /// Booleans become `yes`/`no`, numbers use their standard decimal form,
    /// strings are stripped of surrounding whitespace.
    pub fn format(&self) -> String {
        match self {
            Self::Bool(true) => "yes".to_owned(),
            Self::Bool(false) => "no".to_owned(),
            Self::Int(x) => x.to_string(),
            Self::Float(x) => x.to_string(),
            Self::Str(x) => x.trim().to_owned(),
        }
    }

    /// Parse a raw textual value from an overrides file into a typed value.
    ///
    /// `yes`/`true`/`on` and `no`/`false`/`off` (case-insensitive) are booleans.
    /// Values containing `.`, `e` or `E` are parsed as floats, other numbers
    /// as integers. Anything that fails to parse is kept as a trimmed string.
    pub fn parse(raw: &str) -> Self {
        let text = raw.trim();

        match text.to_lowercase().as_str() {
            "yes" | "true" | "on" => return Self::Bool(true),
            "no" | "false" | "off" => return Self::Bool(false),
            _ => (),
        }

        if text.contains(['.', 'e', 'E']) {
            if let Ok(x) = text.parse::<f64>() {
                return Self::Float(x);
            }
        } else if let Ok(x) = text.parse::<i64>() {
            return Self::Int(x);
        }

        Self::Str(text.to_owned())
    }
}

impl Display for MdpValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format())
    }
}

impl From<bool> for MdpValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for MdpValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for MdpValue {
    fn from(value: i32) -> Self {
        Self::Int(value as i64)
    }
}

impl From<u32> for MdpValue {
    fn from(value: u32) -> Self {
        Self::Int(value as i64)
    }
}

impl From<f64> for MdpValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for MdpValue {
    fn from(value: f32) -> Self {
        Self::Float(value as f64)
    }
}

impl From<&str> for MdpValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for MdpValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl TryFrom<serde_yaml::Value> for MdpValue {
    type Error = MdpError;

    /// Convert a value from a yaml overrides mapping into a typed mdp value.
    /// Only scalars have an mdp representation.
    fn try_from(value: serde_yaml::Value) -> Result<Self, MdpError> {
        match value {
            serde_yaml::Value::Bool(x) => Ok(Self::Bool(x)),
            serde_yaml::Value::Number(x) if x.is_i64() => {
                Ok(Self::Int(x.as_i64().expect(PANIC_MESSAGE)))
            }
            serde_yaml::Value::Number(x) => Ok(Self::Float(x.as_f64().expect(PANIC_MESSAGE))),
            serde_yaml::Value::String(x) => Ok(Self::Str(x)),
            serde_yaml::Value::Null => Err(MdpError::UnsupportedValueType("null".to_owned())),
            serde_yaml::Value::Sequence(_) => {
                Err(MdpError::UnsupportedValueType("sequence".to_owned()))
            }
            serde_yaml::Value::Mapping(_) => {
                Err(MdpError::UnsupportedValueType("mapping".to_owned()))
            }
            serde_yaml::Value::Tagged(_) => {
                Err(MdpError::UnsupportedValueType("tagged".to_owned()))
            }
        }
    }
}
