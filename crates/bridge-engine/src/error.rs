//! Error types for rule-set loading.
//!
//! A [`ConfigError`] aborts engine construction. A [`RuleError`] only
//! disqualifies the one record it describes.

use bridge_core::ParseCallError;
use std::fmt::{self, Display};

#[derive(Debug)]
pub enum ConfigError {
    /// The rule file could not be read.
    Io(std::io::Error),
    /// The document is not valid YAML for the rule schema.
    Yaml(serde_yaml::Error),
    /// The document is not valid JSON for the rule schema.
    Json(serde_json::Error),
    /// The file extension does not name a supported format.
    UnsupportedFormat(String),
    /// The document parsed but no usable rule survived.
    NoRules { rejected: usize },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Yaml(e) => write!(f, "YAML error: {e}"),
            Self::Json(e) => write!(f, "JSON error: {e}"),
            Self::UnsupportedFormat(ext) => {
                write!(f, "Unsupported rule file format '{ext}' (expected yaml, yml or json)")
            }
            Self::NoRules { rejected } => {
                write!(f, "Rule set contains no usable rules ({rejected} malformed)")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Yaml(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Yaml(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Why a single rule record was excluded from the rule set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// The record does not fit the rule schema (wrong field types).
    Schema(String),
    MissingBid,
    InvalidBid(ParseCallError),
    InvalidContext(ParseCallError),
    InvertedRange { name: &'static str, min: u8, max: u8 },
}

impl Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schema(msg) => write!(f, "malformed record: {msg}"),
            Self::MissingBid => write!(f, "rule has no bid"),
            Self::InvalidBid(e) => write!(f, "bad bid: {e}"),
            Self::InvalidContext(e) => write!(f, "bad auction context: {e}"),
            Self::InvertedRange { name, min, max } => {
                write!(f, "{name} range is empty ({min} > {max})")
            }
        }
    }
}

impl std::error::Error for RuleError {}
