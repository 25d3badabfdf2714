//! AI crawler JSON endpoints.
//!
//! Two projections for machine consumers: the catalog at `/ai/sitemap.json`
//! and the per-strategy detail document at `/ai/<id>.json`. Both read the
//! canonical field map; the detail document additionally flattens the
//! legacy-or-rich step and risk forms into plain strings.

use serde::Serialize;

use crate::exports::canon;
use crate::models::{ChangeEntry, FaqEntry, Strategy};
use crate::utils::format_metric;

/// Fallback fee fraction when the free-text fee field is absent or does not
/// parse as a percentage.
pub const DEFAULT_FEE_FRACTION: f64 = 0.0025;
const DEFAULT_FEE_DISPLAY: &str = "0.25%";

/// One catalog entry of `/ai/sitemap.json`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AiCatalogEntry {
    pub title: String,
    pub url: String,
    pub updated: String,
}

/// Build the AI catalog for all strategies.
pub fn ai_catalog(strategies: &[Strategy], base_url: &str) -> Vec<AiCatalogEntry> {
    strategies
        .iter()
        .map(|strategy| {
            let canonical = canon::strategy_entry(strategy);
            AiCatalogEntry {
                title: canonical.title,
                url: format!("{base_url}/ai/{}.json", strategy.id),
                updated: canonical.updated,
            }
        })
        .collect()
}

/// The fixed-shape AI detail document for one strategy.
#[derive(Debug, Clone, Serialize)]
pub struct AiStrategyDoc {
    pub slug: String,
    pub title: String,
    pub updated: String,
    pub summary: String,
    pub numbers: AiNumbers,
    pub chains: Vec<String>,
    pub protocols: Vec<String>,
    pub how_it_works: Vec<String>,
    pub risks: Vec<String>,
    pub fees: String,
    pub faq: Vec<FaqEntry>,
    pub changelog: Vec<ChangeEntry>,
    pub source: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AiNumbers {
    pub apy_typical: String,
    pub fee_gross_yield_pct: f64,
}

/// Build the AI detail document for one strategy.
pub fn ai_strategy_doc(strategy: &Strategy, base_url: &str) -> AiStrategyDoc {
    let canonical = canon::strategy_entry(strategy);
    let fee_display = strategy.fee.as_deref().unwrap_or(DEFAULT_FEE_DISPLAY);

    AiStrategyDoc {
        slug: strategy.id.clone(),
        title: canonical.title,
        updated: canonical.updated,
        summary: strategy.description.clone(),
        numbers: AiNumbers {
            apy_typical: format!("{}%", format_metric(strategy.apy)),
            fee_gross_yield_pct: parse_fee_fraction(strategy.fee.as_deref()),
        },
        chains: strategy.chains.clone(),
        protocols: strategy.protocols.clone(),
        how_it_works: strategy
            .steps
            .iter()
            .map(|step| step.display_text())
            .collect(),
        risks: strategy
            .risks
            .iter()
            .map(|risk| risk.display_text())
            .collect(),
        fees: format!("Forge fee = {fee_display} of gross yield, net daily."),
        faq: strategy.faq.clone(),
        changelog: strategy.changelog.clone(),
        source: format!("{base_url}{}", canonical.path),
    }
}

/// Parse a free-text percent literal (`"0.25%"`) into a fraction. Parse
/// failure falls back to [`DEFAULT_FEE_FRACTION`] rather than propagating
/// a non-finite value.
pub fn parse_fee_fraction(fee: Option<&str>) -> f64 {
    let parsed = fee
        .map(|raw| raw.trim().trim_end_matches('%').trim())
        .and_then(|raw| raw.parse::<f64>().ok())
        .map(|pct| pct / 100.0);
    match parsed {
        Some(fraction) if fraction.is_finite() => fraction,
        _ => DEFAULT_FEE_FRACTION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Document;
    use serde_json::{Value, json};

    const BASE: &str = "https://forge.finance";

    fn strategy(data: Value) -> Strategy {
        Strategy::from_document(&Document {
            id: data
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or("s1")
                .to_string(),
            data,
        })
    }

    #[test]
    fn test_catalog_shape() {
        let strategies = vec![strategy(json!({
            "id": "lido-arbitrum",
            "name": "Lido + Arbitrum Yield Strategy",
            "lastUpdated": "2024-01-15"
        }))];
        let catalog = ai_catalog(&strategies, BASE);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].title, "Lido + Arbitrum Yield Strategy");
        assert_eq!(
            catalog[0].url,
            "https://forge.finance/ai/lido-arbitrum.json"
        );
        assert_eq!(catalog[0].updated, "2024-01-15");
    }

    #[test]
    fn test_detail_flattens_legacy_and_rich_forms() {
        let doc = ai_strategy_doc(
            &strategy(json!({
                "id": "s1",
                "name": "X",
                "steps": [
                    "Stake ETH on Lido for stETH",
                    { "title": "Bridge", "description": "Bridge stETH to Arbitrum" },
                    { "title": "Provide liquidity" }
                ],
                "risks": [
                    "Contract bugs",
                    { "type": "Bridge Risk", "level": "Medium", "description": "..." }
                ]
            })),
            BASE,
        );

        assert_eq!(
            doc.how_it_works,
            vec![
                "Stake ETH on Lido for stETH",
                "Bridge stETH to Arbitrum",
                "Provide liquidity"
            ]
        );
        assert_eq!(doc.risks, vec!["Contract bugs", "Bridge Risk"]);

        // The serialized document contains only flat strings, never objects.
        let value = serde_json::to_value(&doc).unwrap();
        for entry in value["how_it_works"].as_array().unwrap() {
            assert!(entry.is_string());
        }
        for entry in value["risks"].as_array().unwrap() {
            assert!(entry.is_string());
        }
    }

    #[test]
    fn test_fee_parsing() {
        assert_eq!(parse_fee_fraction(Some("0.25%")), 0.0025);
        assert_eq!(parse_fee_fraction(Some("1%")), 0.01);
        assert_eq!(parse_fee_fraction(Some(" 2.5 % ")), 0.025);
        assert_eq!(parse_fee_fraction(Some("free")), DEFAULT_FEE_FRACTION);
        assert_eq!(parse_fee_fraction(Some("")), DEFAULT_FEE_FRACTION);
        assert_eq!(parse_fee_fraction(None), DEFAULT_FEE_FRACTION);
        assert_eq!(parse_fee_fraction(Some("NaN%")), DEFAULT_FEE_FRACTION);
    }

    #[test]
    fn test_minimal_record_produces_complete_document() {
        let doc = ai_strategy_doc(&strategy(json!({ "id": "bare", "name": "Bare" })), BASE);
        assert_eq!(doc.slug, "bare");
        assert_eq!(doc.numbers.apy_typical, "0%");
        assert_eq!(doc.numbers.fee_gross_yield_pct, DEFAULT_FEE_FRACTION);
        assert!(doc.chains.is_empty());
        assert!(doc.how_it_works.is_empty());
        assert_eq!(doc.fees, "Forge fee = 0.25% of gross yield, net daily.");
        assert_eq!(doc.source, "https://forge.finance/strategies/bare");
        assert!(!doc.updated.is_empty());

        // Serialization carries every key of the fixed shape.
        let value = serde_json::to_value(&doc).unwrap();
        for key in [
            "slug",
            "title",
            "updated",
            "summary",
            "numbers",
            "chains",
            "protocols",
            "how_it_works",
            "risks",
            "fees",
            "faq",
            "changelog",
            "source",
        ] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
    }

    #[test]
    fn test_fractional_apy_formatting() {
        let doc = ai_strategy_doc(
            &strategy(json!({ "id": "s", "name": "X", "apy": 31.2 })),
            BASE,
        );
        assert_eq!(doc.numbers.apy_typical, "31.2%");
    }
}
