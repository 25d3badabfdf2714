//! Detail-page projections.
//!
//! A stored record is projected into a page view model exactly once per
//! request; every optional field gets its documented default here. The SEO
//! structured-data objects are derived from the *projected* view, never from
//! the raw record, so the human-facing page and the machine-facing schema
//! cannot disagree about a defaulted value.

use serde_json::{Value, json};

use crate::models::{BlogPost, ChangeEntry, FaqEntry, ProtocolFee, RiskLevel, Strategy};
use crate::services::MarkdownService;
use crate::utils::{self, dates};

pub const DEFAULT_AUTHOR: &str = "Forge Team";
pub const DEFAULT_READ_TIME: u32 = 5;

/// Strategy detail view model with all defaults applied.
#[derive(Debug, Clone)]
pub struct StrategyView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub risk: RiskLevel,
    pub apy: f64,
    pub tvl: f64,
    pub min_investment: f64,
    pub max_investment: f64,
    pub fee: Option<String>,
    pub time_to_setup: String,
    pub author: String,
    /// Author-supplied display date if present, else the normalized write
    /// timestamp, else today.
    pub last_updated: String,
    pub status: String,
    pub chains: Vec<String>,
    pub protocols: Vec<String>,
    pub tags: Vec<String>,
    pub steps: Vec<StepView>,
    pub risks: Vec<RiskView>,
    pub faq: Vec<FaqEntry>,
    pub changelog: Vec<ChangeEntry>,
    pub protocol_fees: Vec<ProtocolFee>,
    pub featured: bool,
}

/// One rendered step of the step-by-step guide.
#[derive(Debug, Clone)]
pub struct StepView {
    pub number: usize,
    pub title: String,
    pub text: String,
    pub link: Option<String>,
}

/// One rendered entry of the risk analysis.
#[derive(Debug, Clone)]
pub struct RiskView {
    pub kind: String,
    pub level: String,
    pub description: String,
}

/// Project a strategy record into its detail view.
pub fn project_strategy(s: &Strategy) -> StrategyView {
    let steps = s
        .steps
        .iter()
        .enumerate()
        .map(|(i, step)| StepView {
            number: i + 1,
            title: step
                .title()
                .map(str::to_string)
                .unwrap_or_else(|| format!("Step {}", i + 1)),
            text: step.display_text(),
            link: step.link().map(str::to_string),
        })
        .collect();

    let risks = s
        .risks
        .iter()
        .map(|risk| RiskView {
            kind: risk.display_text(),
            level: risk.level_label(),
            description: risk.description().unwrap_or_default().to_string(),
        })
        .collect();

    StrategyView {
        id: s.id.clone(),
        name: s.name.clone(),
        description: s.description.clone(),
        category: if s.category.is_empty() {
            "General".to_string()
        } else {
            s.category.clone()
        },
        risk: s.risk,
        apy: s.apy,
        tvl: s.tvl,
        min_investment: s.min_investment,
        max_investment: s.max_investment,
        fee: s.fee.clone(),
        time_to_setup: s
            .time_to_setup
            .clone()
            .unwrap_or_else(|| "N/A".to_string()),
        author: s.author.clone().unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
        last_updated: s
            .last_updated
            .clone()
            .unwrap_or_else(|| dates::ymd_or_today(&s.updated_at)),
        status: if s.status.is_empty() {
            "active".to_string()
        } else {
            s.status.clone()
        },
        chains: s.chains.clone(),
        protocols: s.protocols.clone(),
        tags: s.tags.clone(),
        steps,
        risks,
        faq: s.faq.clone(),
        changelog: s.changelog.clone(),
        protocol_fees: s.protocol_fees.clone(),
        featured: s.featured,
    }
}

/// schema.org structured data for a strategy detail page: a Product carrying
/// one property per metric, a HowTo block when steps exist, and a FAQPage
/// block when FAQ entries exist.
pub fn strategy_structured_data(view: &StrategyView, base_url: &str) -> Value {
    let url = format!("{}/strategies/{}", base_url, view.id);
    let mut graph = vec![json!({
        "@type": "Product",
        "name": view.name,
        "description": view.description,
        "url": url,
        "additionalProperty": [
            { "@type": "PropertyValue", "name": "APY",
              "value": format!("{}%", utils::format_metric(view.apy)) },
            { "@type": "PropertyValue", "name": "Risk", "value": view.risk.label() },
            { "@type": "PropertyValue", "name": "Chains", "value": view.chains.join(", ") },
            { "@type": "PropertyValue", "name": "Minimum Investment",
              "value": utils::format_usd(view.min_investment) },
            { "@type": "PropertyValue", "name": "Last Updated", "value": view.last_updated },
        ]
    })];

    if !view.steps.is_empty() {
        graph.push(json!({
            "@type": "HowTo",
            "name": format!("How to use {}", view.name),
            "step": view.steps.iter().map(|step| json!({
                "@type": "HowToStep",
                "position": step.number,
                "name": step.title,
                "text": step.text,
            })).collect::<Vec<_>>()
        }));
    }

    if !view.faq.is_empty() {
        graph.push(json!({
            "@type": "FAQPage",
            "mainEntity": view.faq.iter().map(|entry| json!({
                "@type": "Question",
                "name": entry.q,
                "acceptedAnswer": { "@type": "Answer", "text": entry.a }
            })).collect::<Vec<_>>()
        }));
    }

    json!({ "@context": "https://schema.org", "@graph": graph })
}

/// Blog post detail view model with all defaults applied.
#[derive(Debug, Clone)]
pub struct PostView {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    /// Content rendered to HTML (Markdown and pre-rendered HTML both accepted).
    pub content_html: String,
    pub author: String,
    pub category: String,
    pub tags: Vec<String>,
    pub read_time: u32,
    /// Publish date as `YYYY-MM-DD` (publishedAt, else createdAt, else today).
    pub published_date: String,
    /// Publish date in long human form (`January 15, 2024`).
    pub published_long: String,
    /// Last-modified date as `YYYY-MM-DD`.
    pub modified_date: String,
    pub views: u64,
    pub likes: u64,
    pub featured: bool,
}

/// Project a blog post record into its detail view.
pub fn project_post(p: &BlogPost, markdown: &MarkdownService) -> PostView {
    let publish_value = if p.published_at.is_null() {
        &p.created_at
    } else {
        &p.published_at
    };

    PostView {
        id: p.id.clone(),
        title: p.title.clone(),
        slug: p.slug.clone(),
        excerpt: p.excerpt.clone(),
        content_html: markdown.render_content(&p.content),
        author: p.author.clone().unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
        category: if p.category.is_empty() {
            "General".to_string()
        } else {
            p.category.clone()
        },
        tags: p.tags.clone(),
        read_time: p.read_time.unwrap_or(DEFAULT_READ_TIME),
        published_date: dates::ymd_or_today(publish_value),
        published_long: dates::long_date(publish_value),
        modified_date: dates::ymd_or_today(&p.updated_at),
        views: p.views,
        likes: p.likes,
        featured: p.featured,
    }
}

/// schema.org BlogPosting for a post detail page, read from the projected
/// view so dates and author carry the same defaults the page shows.
pub fn post_structured_data(view: &PostView, base_url: &str) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "BlogPosting",
        "headline": view.title,
        "description": view.excerpt,
        "author": { "@type": "Person", "name": view.author },
        "publisher": {
            "@type": "Organization",
            "name": "Forge DeFi Platform",
            "logo": { "@type": "ImageObject", "url": format!("{}/logo.png", base_url) }
        },
        "datePublished": view.published_date,
        "dateModified": view.modified_date,
        "mainEntityOfPage": {
            "@type": "WebPage",
            "@id": format!("{}/blog/{}", base_url, view.slug)
        },
        "keywords": if view.tags.is_empty() {
            "DeFi, cryptocurrency, blockchain".to_string()
        } else {
            view.tags.join(", ")
        },
        "articleSection": view.category,
        "wordCount": view.content_html.split_whitespace().count(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Document;

    fn strategy(data: Value) -> Strategy {
        Strategy::from_document(&Document {
            id: "s1".to_string(),
            data,
        })
    }

    fn post(data: Value) -> BlogPost {
        BlogPost::from_document(&Document {
            id: "p1".to_string(),
            data,
        })
    }

    #[test]
    fn test_strategy_defaults() {
        let view = project_strategy(&strategy(json!({ "name": "Bare" })));
        assert_eq!(view.risk, RiskLevel::Unknown);
        assert_eq!(view.apy, 0.0);
        assert_eq!(view.time_to_setup, "N/A");
        assert_eq!(view.author, "Forge Team");
        assert_eq!(view.category, "General");
        assert_eq!(view.status, "active");
        assert!(!view.last_updated.is_empty(), "falls back to today");
    }

    #[test]
    fn test_strategy_last_updated_prefers_author_date() {
        let view = project_strategy(&strategy(json!({
            "name": "X",
            "lastUpdated": "2024-01-15",
            "updatedAt": "2024-03-01T00:00:00Z"
        })));
        assert_eq!(view.last_updated, "2024-01-15");

        let view = project_strategy(&strategy(json!({
            "name": "X",
            "updatedAt": "2024-03-01T00:00:00Z"
        })));
        assert_eq!(view.last_updated, "2024-03-01");
    }

    #[test]
    fn test_structured_data_reads_defaulted_values() {
        let view = project_strategy(&strategy(json!({ "name": "Bare" })));
        let data = strategy_structured_data(&view, "https://forge.finance");

        let product = &data["@graph"][0];
        assert_eq!(product["@type"], "Product");
        let props = product["additionalProperty"].as_array().unwrap();
        let risk = props.iter().find(|p| p["name"] == "Risk").unwrap();
        // Same default the page shows, not a raw missing field.
        assert_eq!(risk["value"], "Unknown");
        let apy = props.iter().find(|p| p["name"] == "APY").unwrap();
        assert_eq!(apy["value"], "0%");
    }

    #[test]
    fn test_structured_data_optional_blocks() {
        let bare = project_strategy(&strategy(json!({ "name": "Bare" })));
        let data = strategy_structured_data(&bare, "https://forge.finance");
        assert_eq!(data["@graph"].as_array().unwrap().len(), 1);

        let full = project_strategy(&strategy(json!({
            "name": "Full",
            "steps": ["Stake ETH", { "title": "Bridge", "description": "Bridge out" }],
            "faq": [{ "q": "Safe?", "a": "Audited." }]
        })));
        let data = strategy_structured_data(&full, "https://forge.finance");
        let graph = data["@graph"].as_array().unwrap();
        assert_eq!(graph.len(), 3);
        assert_eq!(graph[1]["@type"], "HowTo");
        assert_eq!(graph[1]["step"].as_array().unwrap().len(), 2);
        assert_eq!(graph[2]["@type"], "FAQPage");
    }

    #[test]
    fn test_step_views_number_untitled_steps() {
        let view = project_strategy(&strategy(json!({
            "name": "X",
            "steps": ["Stake ETH on Lido"]
        })));
        assert_eq!(view.steps[0].title, "Step 1");
        assert_eq!(view.steps[0].text, "Stake ETH on Lido");
    }

    #[test]
    fn test_post_defaults() {
        let markdown = MarkdownService::new();
        let view = project_post(&post(json!({ "title": "Hello" })), &markdown);
        assert_eq!(view.author, "Forge Team");
        assert_eq!(view.read_time, 5);
        assert_eq!(view.category, "General");
        assert!(!view.published_date.is_empty());
    }

    #[test]
    fn test_post_structured_data_matches_view() {
        let markdown = MarkdownService::new();
        let view = project_post(
            &post(json!({
                "title": "Hello",
                "slug": "hello",
                "publishedAt": "2024-01-05T11:20:00Z"
            })),
            &markdown,
        );
        let data = post_structured_data(&view, "https://forge.finance");
        assert_eq!(data["datePublished"], "2024-01-05");
        assert_eq!(data["author"]["name"], "Forge Team");
        assert_eq!(
            data["mainEntityOfPage"]["@id"],
            "https://forge.finance/blog/hello"
        );
    }
}
