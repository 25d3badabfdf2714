//! Listing-page cards, rendered from projected views so the defaults shown
//! here match the detail pages.

use crate::services::projection::{PostView, StrategyView};
use crate::utils::{escape_attr, escape_html, format_metric, format_tvl, format_usd};

/// CSS badge class per risk label.
pub fn risk_badge_class(risk: &str) -> &'static str {
    match risk.to_lowercase().as_str() {
        "low" => "badge risk-low",
        "medium" => "badge risk-medium",
        "high" => "badge risk-high",
        _ => "badge risk-unknown",
    }
}

/// One strategy card in the catalog grid.
pub fn strategy_card(view: &StrategyView) -> String {
    let mut html = String::new();
    html.push_str("<div class=\"card strategy-card\">");
    html.push_str("<div class=\"card-header\">");
    html.push_str(&format!(
        "<h3><a href=\"/strategies/{}\">{}</a></h3>",
        escape_attr(&view.id),
        escape_html(&view.name)
    ));
    if view.featured {
        html.push_str("<span class=\"badge featured\">Featured</span>");
    }
    html.push_str(&format!(
        "<span class=\"{}\">{} Risk</span>",
        risk_badge_class(view.risk.label()),
        view.risk.label()
    ));
    html.push_str("</div>");
    html.push_str(&format!(
        "<p class=\"card-description\">{}</p>",
        escape_html(&view.description)
    ));

    html.push_str("<div class=\"metrics\">");
    html.push_str(&format!(
        "<div class=\"metric\"><div class=\"metric-value\">{}%</div><div class=\"metric-label\">APY</div></div>",
        format_metric(view.apy)
    ));
    html.push_str(&format!(
        "<div class=\"metric\"><div class=\"metric-value\">{}</div><div class=\"metric-label\">TVL</div></div>",
        format_tvl(view.tvl)
    ));
    html.push_str(&format!(
        "<div class=\"metric\"><div class=\"metric-value\">{}</div><div class=\"metric-label\">Chains</div></div>",
        view.chains.len()
    ));
    html.push_str("</div>");

    if !view.tags.is_empty() {
        html.push_str("<div class=\"tag-list\">");
        for tag in &view.tags {
            html.push_str(&format!("<span class=\"tag\">{}</span>", escape_html(tag)));
        }
        html.push_str("</div>");
    }

    html.push_str(&format!(
        "<div class=\"card-meta\"><span>{}</span><span>Min: {}</span></div>",
        escape_html(&view.time_to_setup),
        format_usd(view.min_investment)
    ));
    html.push_str("</div>");
    html
}

/// One blog post card in the blog grid.
pub fn post_card(view: &PostView) -> String {
    let mut html = String::new();
    html.push_str("<div class=\"card post-card\">");
    html.push_str("<div class=\"card-header\">");
    html.push_str(&format!(
        "<span class=\"badge category\">{}</span>",
        escape_html(&view.category)
    ));
    if view.featured {
        html.push_str("<span class=\"badge featured\">Featured</span>");
    }
    html.push_str("</div>");
    html.push_str(&format!(
        "<h3><a href=\"/blog/{}\">{}</a></h3>",
        escape_attr(&view.slug),
        escape_html(&view.title)
    ));
    html.push_str(&format!(
        "<p class=\"card-description\">{}</p>",
        escape_html(&view.excerpt)
    ));
    html.push_str(&format!(
        "<div class=\"card-meta\"><span>{}</span><span>{}</span><span>{} min read</span></div>",
        escape_html(&view.author),
        escape_html(&view.published_long),
        view.read_time
    ));
    html.push_str("</div>");
    html
}
