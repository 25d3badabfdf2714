//! Strategy record model.

use serde::Deserialize;
use serde_json::Value;

use crate::models::fields::{
    self, ChangeEntry, FaqEntry, ProtocolFee, RiskLevel, RiskNote, Step,
};
use crate::store::Document;

/// A DeFi strategy as read from the `strategies` collection.
///
/// Every field is optional on the wire; deserialization is lenient so a
/// minimal `{name}`-only document still produces a usable value. Numeric
/// fields accept numeric strings (`"12.5"`) and degrade to zero. The
/// date-bearing write timestamps stay as raw JSON values because legacy
/// documents hold several shapes; only `utils::dates` interprets them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Strategy {
    #[serde(deserialize_with = "fields::lenient_string")]
    pub id: String,
    #[serde(deserialize_with = "fields::lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "fields::lenient_string")]
    pub description: String,
    #[serde(deserialize_with = "fields::lenient_string")]
    pub category: String,
    #[serde(deserialize_with = "fields::lenient_strings")]
    pub tags: Vec<String>,

    #[serde(deserialize_with = "fields::lenient_f64")]
    pub apy: f64,
    #[serde(deserialize_with = "fields::lenient_f64")]
    pub tvl: f64,
    pub risk: RiskLevel,
    #[serde(deserialize_with = "fields::lenient_f64")]
    pub min_investment: f64,
    #[serde(deserialize_with = "fields::lenient_f64")]
    pub max_investment: f64,
    #[serde(deserialize_with = "fields::lenient_opt_string")]
    pub fee: Option<String>,
    #[serde(deserialize_with = "fields::lenient_opt_string")]
    pub time_to_setup: Option<String>,

    #[serde(deserialize_with = "fields::lenient_strings")]
    pub chains: Vec<String>,
    #[serde(deserialize_with = "fields::lenient_strings")]
    pub protocols: Vec<String>,
    #[serde(deserialize_with = "fields::lenient_steps")]
    pub steps: Vec<Step>,
    #[serde(deserialize_with = "fields::lenient_risk_notes")]
    pub risks: Vec<RiskNote>,
    #[serde(deserialize_with = "fields::lenient_entries")]
    pub faq: Vec<FaqEntry>,
    #[serde(deserialize_with = "fields::lenient_entries")]
    pub changelog: Vec<ChangeEntry>,
    #[serde(deserialize_with = "fields::lenient_entries")]
    pub protocol_fees: Vec<ProtocolFee>,

    #[serde(deserialize_with = "fields::lenient_string")]
    pub status: String,
    #[serde(deserialize_with = "fields::lenient_opt_string")]
    pub author: Option<String>,
    /// Author-supplied display date, distinct from the write timestamp.
    #[serde(deserialize_with = "fields::lenient_opt_string")]
    pub last_updated: Option<String>,
    pub created_at: Value,
    pub updated_at: Value,
    #[serde(deserialize_with = "fields::lenient_bool")]
    pub featured: bool,
}

impl Strategy {
    /// Build a strategy from a stored document, merging the store id over
    /// any `id` field in the data. Never fails: a document of an unexpected
    /// shape yields the defaults.
    pub fn from_document(doc: &Document) -> Self {
        let mut strategy: Strategy =
            serde_json::from_value(doc.data.clone()).unwrap_or_default();
        strategy.id = doc.id.clone();
        strategy
    }

    /// Epoch sort key over the write timestamp, for the in-memory fallback
    /// ordering of catalog listings.
    pub fn created_sort_key(&self) -> i64 {
        crate::utils::dates::sort_key(&self.created_at).unwrap_or(0)
    }
}
