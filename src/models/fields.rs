//! Shared field types and lenient deserialization helpers.
//!
//! Stored documents are schema-less: a numeric field may arrive as a JSON
//! number or a numeric string, list entries may be legacy plain strings or
//! rich objects, and any field may be missing. Model deserialization must
//! never fail on such input; every consumer sees a usable default instead.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Strategy risk rating with a fixed ordering: Low < Medium < High.
/// Absent or unrecognized values fall into `Unknown`, which sorts last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    #[default]
    Unknown,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Unknown => "Unknown",
        }
    }

    /// Sort ordinal for the catalog's risk sort.
    pub fn ordinal(&self) -> u8 {
        match self {
            RiskLevel::Low => 1,
            RiskLevel::Medium => 2,
            RiskLevel::High => 3,
            RiskLevel::Unknown => 4,
        }
    }

    /// Match against a filter value, where `"all"` means no filter.
    pub fn matches_filter(&self, filter: &str) -> bool {
        filter == "all" || self.label().eq_ignore_ascii_case(filter)
    }

    fn from_value(value: &Value) -> Self {
        match value.as_str() {
            Some(s) if s.eq_ignore_ascii_case("low") => RiskLevel::Low,
            Some(s) if s.eq_ignore_ascii_case("medium") => RiskLevel::Medium,
            Some(s) if s.eq_ignore_ascii_case("high") => RiskLevel::High,
            _ => RiskLevel::Unknown,
        }
    }
}

impl<'de> Deserialize<'de> for RiskLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(RiskLevel::from_value(&value))
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One entry of a strategy's step-by-step guide. Legacy documents store each
/// step as a plain string; newer documents store an object with a title and
/// description.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Plain(String),
    Detailed {
        title: Option<String>,
        description: Option<String>,
        link: Option<String>,
    },
}

impl Step {
    /// The single flat display string every consumer uses, regardless of the
    /// stored shape.
    pub fn display_text(&self) -> String {
        match self {
            Step::Plain(text) => text.clone(),
            Step::Detailed {
                title, description, ..
            } => description
                .clone()
                .filter(|s| !s.is_empty())
                .or_else(|| title.clone().filter(|s| !s.is_empty()))
                .unwrap_or_else(|| "Step".to_string()),
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Step::Plain(_) => None,
            Step::Detailed { title, .. } => title.as_deref().filter(|s| !s.is_empty()),
        }
    }

    pub fn link(&self) -> Option<&str> {
        match self {
            Step::Plain(_) => None,
            Step::Detailed { link, .. } => link.as_deref(),
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Step::Plain(s.clone())),
            Value::Object(map) => Some(Step::Detailed {
                title: string_field(map, "title"),
                description: string_field(map, "description"),
                link: string_field(map, "link"),
            }),
            _ => None,
        }
    }
}

/// One entry of a strategy's risk analysis, legacy string or rich object.
#[derive(Debug, Clone, PartialEq)]
pub enum RiskNote {
    Plain(String),
    Detailed {
        kind: Option<String>,
        level: Option<String>,
        description: Option<String>,
    },
}

impl RiskNote {
    /// Flat display string: the risk type, else its description.
    pub fn display_text(&self) -> String {
        match self {
            RiskNote::Plain(text) => text.clone(),
            RiskNote::Detailed {
                kind, description, ..
            } => kind
                .clone()
                .filter(|s| !s.is_empty())
                .or_else(|| description.clone().filter(|s| !s.is_empty()))
                .unwrap_or_else(|| "Risk".to_string()),
        }
    }

    pub fn level_label(&self) -> String {
        match self {
            RiskNote::Plain(_) => "Unknown".to_string(),
            RiskNote::Detailed { level, .. } => level
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "Unknown".to_string()),
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            RiskNote::Plain(_) => None,
            RiskNote::Detailed { description, .. } => {
                description.as_deref().filter(|s| !s.is_empty())
            }
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(RiskNote::Plain(s.clone())),
            Value::Object(map) => Some(RiskNote::Detailed {
                kind: string_field(map, "type"),
                level: string_field(map, "level"),
                description: string_field(map, "description"),
            }),
            _ => None,
        }
    }
}

/// Frequently-asked-question entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaqEntry {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub a: String,
}

/// Changelog entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeEntry {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub change: String,
}

/// Per-protocol fee note.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProtocolFee {
    #[serde(default)]
    pub protocol: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub amount: String,
}

fn string_field(map: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Number, numeric string, or anything else treated as zero.
pub fn number_or_zero(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

pub fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(number_or_zero(&value))
}

pub fn lenient_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(number_or_zero(&value).max(0.0) as u64)
}

/// Optional integer field: absent or malformed becomes `None` so the
/// consumer's documented default applies.
pub fn lenient_opt_u32<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u32>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let n = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(n.filter(|n| *n >= 0.0).map(|n| n as u32))
}

/// String, or a number rendered as text; anything else is empty.
pub fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

pub fn lenient_opt_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// String list that skips non-string entries instead of failing.
pub fn lenient_strings<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    })
}

pub fn lenient_steps<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Step>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items.iter().filter_map(Step::from_value).collect(),
        _ => Vec::new(),
    })
}

pub fn lenient_risk_notes<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<RiskNote>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items.iter().filter_map(RiskNote::from_value).collect(),
        _ => Vec::new(),
    })
}

/// Typed list that drops entries which do not deserialize, instead of
/// rejecting the whole document.
pub fn lenient_entries<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|v| serde_json::from_value(v).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// Boolean, tolerating the string forms `"true"`/`"false"`.
pub fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::String(s) => s.eq_ignore_ascii_case("true") || s == "on",
        _ => false,
    })
}
