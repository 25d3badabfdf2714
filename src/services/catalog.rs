//! In-memory filter, sort, and search over fetched record lists.
//!
//! Pure functions: the input slices are never mutated, and the same inputs
//! always produce the same output. Listing pages fetch a collection once per
//! request and run it through here.

use std::cmp::Ordering;

use serde::Deserialize;

use crate::models::{BlogPost, Strategy};

/// Listing parameters for the strategy catalog. `"all"` is the sentinel for
/// "no filter" on the categorical fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StrategyQuery {
    pub q: String,
    pub risk: String,
    pub category: String,
    pub sort: String,
}

impl Default for StrategyQuery {
    fn default() -> Self {
        Self {
            q: String::new(),
            risk: "all".to_string(),
            category: "all".to_string(),
            sort: "apy".to_string(),
        }
    }
}

/// Listing parameters for the blog.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PostQuery {
    pub q: String,
    pub category: String,
    pub tag: String,
}

impl Default for PostQuery {
    fn default() -> Self {
        Self {
            q: String::new(),
            category: "all".to_string(),
            tag: "all".to_string(),
        }
    }
}

/// Filter and order the strategy catalog. Search matches case-insensitively
/// against name, description, tags, and author; an empty term matches
/// everything. Sorting is stable, keyed by `apy` or `tvl` descending, `risk`
/// ordinal ascending, or `name` ascending.
pub fn filter_strategies(strategies: &[Strategy], query: &StrategyQuery) -> Vec<Strategy> {
    let term = query.q.trim().to_lowercase();
    let mut out: Vec<Strategy> = strategies
        .iter()
        .filter(|s| term.is_empty() || strategy_matches(s, &term))
        .filter(|s| s.risk.matches_filter(&query.risk))
        .filter(|s| query.category == "all" || s.category == query.category)
        .cloned()
        .collect();

    match query.sort.as_str() {
        "tvl" => out.sort_by(|a, b| descending(a.tvl, b.tvl)),
        "risk" => out.sort_by_key(|s| s.risk.ordinal()),
        "name" => out.sort_by(|a, b| a.name.cmp(&b.name)),
        // Default sort, including unknown keys
        _ => out.sort_by(|a, b| descending(a.apy, b.apy)),
    }
    out
}

/// Filter and order blog posts, newest publish date first.
pub fn filter_posts(posts: &[BlogPost], query: &PostQuery) -> Vec<BlogPost> {
    let term = query.q.trim().to_lowercase();
    let mut out: Vec<BlogPost> = posts
        .iter()
        .filter(|p| term.is_empty() || post_matches(p, &term))
        .filter(|p| query.category == "all" || p.category == query.category)
        .filter(|p| query.tag == "all" || p.tags.iter().any(|t| t == &query.tag))
        .cloned()
        .collect();

    out.sort_by_key(|p| std::cmp::Reverse(p.publish_sort_key()));
    out
}

/// Distinct categories across a post list, in first-seen order, for the
/// filter dropdown.
pub fn post_categories(posts: &[BlogPost]) -> Vec<String> {
    let mut out = Vec::new();
    for post in posts {
        if !post.category.is_empty() && !out.contains(&post.category) {
            out.push(post.category.clone());
        }
    }
    out
}

/// Distinct tags across a post list, in first-seen order.
pub fn post_tags(posts: &[BlogPost]) -> Vec<String> {
    let mut out = Vec::new();
    for post in posts {
        for tag in &post.tags {
            if !out.contains(tag) {
                out.push(tag.clone());
            }
        }
    }
    out
}

fn strategy_matches(s: &Strategy, term: &str) -> bool {
    s.name.to_lowercase().contains(term)
        || s.description.to_lowercase().contains(term)
        || s.tags.iter().any(|tag| tag.to_lowercase().contains(term))
        || s.author
            .as_deref()
            .is_some_and(|a| a.to_lowercase().contains(term))
}

fn post_matches(p: &BlogPost, term: &str) -> bool {
    p.title.to_lowercase().contains(term)
        || p.excerpt.to_lowercase().contains(term)
        || p.tags.iter().any(|tag| tag.to_lowercase().contains(term))
        || p.author
            .as_deref()
            .is_some_and(|a| a.to_lowercase().contains(term))
}

/// Descending float comparison with a total order over missing-as-zero
/// values; NaN compares equal rather than poisoning the sort.
fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Document;
    use serde_json::{Value, json};

    fn strategy(data: Value) -> Strategy {
        Strategy::from_document(&Document {
            id: data
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or("s")
                .to_string(),
            data,
        })
    }

    fn post(data: Value) -> BlogPost {
        BlogPost::from_document(&Document {
            id: "p".to_string(),
            data,
        })
    }

    fn sample_strategies() -> Vec<Strategy> {
        vec![
            strategy(json!({
                "id": "lido-arbitrum",
                "name": "Lido + Arbitrum Yield Strategy",
                "description": "Maximize yield by staking ETH with Lido.",
                "category": "Liquid Staking",
                "risk": "Low",
                "apy": 31.2,
                "tvl": 25000000,
                "tags": ["Liquid Staking", "Cross-chain"]
            })),
            strategy(json!({
                "id": "curve-3pool",
                "name": "Curve 3Pool + Convex Strategy",
                "description": "Earn stable yields on Curve's 3Pool.",
                "category": "Stablecoin",
                "risk": "Low",
                "apy": 8.5,
                "tvl": 15000000,
                "tags": ["Stablecoin", "Low Risk"]
            })),
            strategy(json!({
                "id": "arbitrage-bot",
                "name": "Cross-Chain Arbitrage",
                "description": "Automated arbitrage across DEXs.",
                "category": "Arbitrage",
                "risk": "High",
                "apy": 52.3,
                "tvl": 34000000,
                "tags": ["Arbitrage", "Automated"]
            })),
        ]
    }

    #[test]
    fn test_search_matches_only_named_strategy() {
        let strategies = sample_strategies();
        let query = StrategyQuery {
            q: "lido".to_string(),
            ..Default::default()
        };
        let out = filter_strategies(&strategies, &query);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Lido + Arbitrum Yield Strategy");
    }

    #[test]
    fn test_filtering_is_pure() {
        let strategies = sample_strategies();
        let before = strategies.clone();
        let query = StrategyQuery {
            risk: "low".to_string(),
            ..Default::default()
        };

        let first = filter_strategies(&strategies, &query);
        let second = filter_strategies(&strategies, &query);

        assert_eq!(first, second, "same inputs, same output");
        assert_eq!(strategies, before, "input list is never mutated");
    }

    #[test]
    fn test_apy_sort_treats_missing_as_zero() {
        let strategies = vec![
            strategy(json!({ "id": "a", "name": "A", "apy": 5 })),
            strategy(json!({ "id": "b", "name": "B", "apy": 20 })),
            strategy(json!({ "id": "c", "name": "C", "apy": null })),
        ];
        let out = filter_strategies(&strategies, &StrategyQuery::default());
        let apys: Vec<f64> = out.iter().map(|s| s.apy).collect();
        assert_eq!(apys, vec![20.0, 5.0, 0.0]);
    }

    #[test]
    fn test_string_apy_sorts_comparably() {
        let strategies = vec![
            strategy(json!({ "id": "a", "name": "A", "apy": "12.5" })),
            strategy(json!({ "id": "b", "name": "B", "apy": 9.0 })),
            strategy(json!({ "id": "c", "name": "C", "apy": 20.0 })),
        ];
        let out = filter_strategies(&strategies, &StrategyQuery::default());
        let names: Vec<_> = out.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_risk_sort_uses_fixed_ordinal() {
        let strategies = sample_strategies();
        let query = StrategyQuery {
            sort: "risk".to_string(),
            ..Default::default()
        };
        let out = filter_strategies(&strategies, &query);
        assert_eq!(out.last().unwrap().name, "Cross-Chain Arbitrage");
    }

    #[test]
    fn test_category_sentinel_and_exact_match() {
        let strategies = sample_strategies();
        let all = filter_strategies(&strategies, &StrategyQuery::default());
        assert_eq!(all.len(), 3);

        let query = StrategyQuery {
            category: "Stablecoin".to_string(),
            ..Default::default()
        };
        let stable = filter_strategies(&strategies, &query);
        assert_eq!(stable.len(), 1);
        assert_eq!(stable[0].category, "Stablecoin");
    }

    #[test]
    fn test_missing_optional_fields_do_not_panic() {
        let strategies = vec![strategy(json!({ "id": "bare", "name": "Bare" }))];
        let query = StrategyQuery {
            q: "bare".to_string(),
            sort: "tvl".to_string(),
            ..Default::default()
        };
        let out = filter_strategies(&strategies, &query);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_posts_sorted_by_publish_date_desc() {
        let posts = vec![
            post(json!({ "title": "Old", "publishedAt": "2024-01-01T00:00:00Z" })),
            post(json!({ "title": "New", "publishedAt": "2024-01-10T00:00:00Z" })),
            post(json!({ "title": "ByCreate", "createdAt": "2024-01-05T00:00:00Z" })),
        ];
        let out = filter_posts(&posts, &PostQuery::default());
        let titles: Vec<_> = out.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["New", "ByCreate", "Old"]);
    }

    #[test]
    fn test_post_search_includes_author() {
        let posts = vec![
            post(json!({ "title": "Guide", "author": "Emma Thompson" })),
            post(json!({ "title": "Other", "author": "David Park" })),
        ];
        let query = PostQuery {
            q: "emma".to_string(),
            ..Default::default()
        };
        let out = filter_posts(&posts, &query);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "Guide");
    }

    #[test]
    fn test_post_tag_filter() {
        let posts = vec![
            post(json!({ "title": "A", "tags": ["DeFi", "Staking"] })),
            post(json!({ "title": "B", "tags": ["Security"] })),
        ];
        let query = PostQuery {
            tag: "Security".to_string(),
            ..Default::default()
        };
        let out = filter_posts(&posts, &query);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "B");
    }

    #[test]
    fn test_dropdown_helpers_dedupe_in_order() {
        let posts = vec![
            post(json!({ "title": "A", "category": "Education", "tags": ["DeFi", "Staking"] })),
            post(json!({ "title": "B", "category": "Security", "tags": ["DeFi"] })),
            post(json!({ "title": "C", "category": "Education" })),
        ];
        assert_eq!(post_categories(&posts), vec!["Education", "Security"]);
        assert_eq!(post_tags(&posts), vec!["DeFi", "Staking"]);
    }
}
