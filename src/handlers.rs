use axum::{
    Form, Json,
    body::Body,
    extract::{Path as AxumPath, Query, State},
    http::{HeaderMap, HeaderValue, Response, StatusCode, header},
    response::{Html, IntoResponse, Redirect},
};
use serde::Deserialize;
use serde_json::json;

use crate::auth::{SESSION_COOKIE, session_from_cookies};
use crate::components::admin::{self, BlogFormData, StrategyFormData};
use crate::components::cards::{post_card, risk_badge_class, strategy_card};
use crate::components::{NavigationComponent, TemplateComponent, seo};
use crate::errors::{ForgeError, Result};
use crate::exports::{ai, sitemap};
use crate::services::catalog::{self, PostQuery, StrategyQuery};
use crate::services::projection::{
    self, PostView, StrategyView, post_structured_data, strategy_structured_data,
};
use crate::services::{BlogService, MarkdownService, StrategyService};
use crate::types::AppState;
use crate::utils::{escape_attr, escape_html, format_metric, format_tvl, format_usd};

/// Assemble a full page in the site chrome.
fn page(active: &str, title: &str, description: &str, head: &str, content: &str) -> Result<String> {
    let navigation = NavigationComponent::new();
    let templates = TemplateComponent::new();
    let header = navigation.render_header(active);
    let footer = navigation.render_footer();
    templates.render_page(title, description, head, &header, content, &footer)
}

/// Inline error panel for a page whose fetch failed; the page still renders.
fn error_panel(message: &str) -> String {
    format!(
        "<div class=\"page-error\"><h2>Something went wrong</h2><p>{}</p></div>",
        escape_html(message)
    )
}

/// In-chrome "not found" page with a 404 status.
fn not_found_response(active: &str, title: &str, message: &str, back: (&str, &str)) -> Response<Body> {
    let content = format!(
        "<div class=\"not-found\"><h1>{}</h1><p>{}</p><a class=\"button primary\" href=\"{}\">{}</a></div>",
        escape_html(title),
        escape_html(message),
        escape_attr(back.0),
        escape_html(back.1),
    );
    match page(active, title, message, "", &content) {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(e) => e.into_response(),
    }
}

// ---------------------------------------------------------------------------
// Content pages
// ---------------------------------------------------------------------------

/// Landing page: hero, featured strategies, waitlist form.
pub async fn handle_landing(State(state): State<AppState>) -> Result<Response<Body>> {
    let service = StrategyService::new(state.store.clone());

    let mut content = String::new();
    content.push_str("<section class=\"hero\">");
    content.push_str("<h1>AI-Powered DeFi <span class=\"accent\">Strategies</span></h1>");
    content.push_str(
        "<p>Generate optimized multi-chain yield strategies in seconds. \
         Risk-managed, profit-maximized DeFi automation for builders and traders.</p>",
    );
    content.push_str(
        "<div class=\"hero-actions\">\
         <a class=\"button primary\" href=\"/strategies\">Explore Strategies</a>\
         <a class=\"button secondary\" href=\"/blog\">Read the Blog</a></div>",
    );
    content.push_str("</section>");

    match service.list_all().await {
        Ok(strategies) => {
            let featured: Vec<StrategyView> = strategies
                .iter()
                .filter(|s| s.featured)
                .take(3)
                .map(projection::project_strategy)
                .collect();
            if !featured.is_empty() {
                content.push_str("<section class=\"featured\"><h2>Featured Strategies</h2>");
                content.push_str("<div class=\"card-grid\">");
                for view in &featured {
                    content.push_str(&strategy_card(view));
                }
                content.push_str("</div></section>");
            }
        }
        Err(e) => content.push_str(&error_panel(&e.to_string())),
    }

    content.push_str(&waitlist_form());

    let head = seo::render_head(
        "",
        "Generate optimized multi-chain DeFi yield strategies in seconds with AI.",
        &format!("{}/", state.config.base_url),
        "website",
        None,
    );
    let html = page(
        "/",
        "Forge - AI-Powered DeFi Strategy Automation",
        "Generate optimized multi-chain DeFi yield strategies in seconds with AI.",
        &head,
        &content,
    )?;
    Ok(Html(html).into_response())
}

fn waitlist_form() -> String {
    concat!(
        "<section class=\"waitlist card\"><h2>Join the Waitlist</h2>",
        "<p>Get early access when the strategy builder launches.</p>",
        "<form method=\"post\" action=\"/waitlist\">",
        "<input name=\"email\" type=\"email\" placeholder=\"Enter your email address\" required>",
        "<button type=\"submit\" class=\"button primary\">Join Waitlist</button>",
        "</form>",
        "<p class=\"form-note\">No spam, unsubscribe anytime. We respect your privacy.</p>",
        "</section>"
    )
    .to_string()
}

/// Strategy catalog with search, filters, and sorting.
pub async fn handle_strategies(
    State(state): State<AppState>,
    Query(query): Query<StrategyQuery>,
) -> Result<Response<Body>> {
    log::info!("Strategy catalog request: {:?}", query);
    let service = StrategyService::new(state.store.clone());

    let mut content = String::new();
    content.push_str("<h1>DeFi <span class=\"accent\">Strategies</span></h1>");
    content.push_str(
        "<p class=\"page-intro\">Discover and understand proven DeFi strategies. From \
         conservative stablecoin yields to aggressive arbitrage opportunities.</p>",
    );
    content.push_str(&strategy_filter_form(&query));

    match service.list_all().await {
        Ok(strategies) => {
            let filtered = catalog::filter_strategies(&strategies, &query);
            let views: Vec<StrategyView> = filtered
                .iter()
                .map(projection::project_strategy)
                .collect();

            content.push_str(&format!(
                "<p class=\"results-count\">Showing {} of {} strategies</p>",
                views.len(),
                strategies.len()
            ));

            let featured: Vec<&StrategyView> = views.iter().filter(|v| v.featured).collect();
            if !featured.is_empty() {
                content.push_str("<h2>Featured Strategies</h2><div class=\"card-grid\">");
                for view in featured {
                    content.push_str(&strategy_card(view));
                }
                content.push_str("</div>");
            }

            content.push_str("<h2>All Strategies</h2>");
            if views.is_empty() {
                content.push_str(
                    "<div class=\"empty-state\"><h3>No strategies found</h3>\
                     <p>Try adjusting your search criteria or filters</p>\
                     <a class=\"button secondary\" href=\"/strategies\">Clear Filters</a></div>",
                );
            } else {
                content.push_str("<div class=\"card-grid\">");
                for view in &views {
                    content.push_str(&strategy_card(view));
                }
                content.push_str("</div>");
            }
        }
        Err(e) => content.push_str(&error_panel(&e.to_string())),
    }

    let head = seo::render_head(
        "DeFi Strategies",
        "Catalog of proven DeFi yield strategies.",
        &format!("{}/strategies", state.config.base_url),
        "website",
        None,
    );
    let html = page("/strategies", "DeFi Strategies", "Catalog of proven DeFi yield strategies.", &head, &content)?;
    Ok(Html(html).into_response())
}

fn strategy_filter_form(query: &StrategyQuery) -> String {
    let mut html = String::new();
    html.push_str("<form class=\"filters\" method=\"get\" action=\"/strategies\">");
    html.push_str(&format!(
        "<input name=\"q\" value=\"{}\" placeholder=\"Search strategies, protocols, or tags...\">",
        escape_attr(&query.q)
    ));
    html.push_str(&filter_select(
        "risk",
        &[("all", "All Risk"), ("low", "Low"), ("medium", "Medium"), ("high", "High")],
        &query.risk,
    ));
    html.push_str(&filter_select(
        "category",
        &[
            ("all", "All Categories"),
            ("Liquid Staking", "Liquid Staking"),
            ("Yield Farming", "Yield Farming"),
            ("Stablecoin", "Stablecoin"),
            ("Arbitrage", "Arbitrage"),
            ("Index Fund", "Index Fund"),
            ("Bitcoin Yield", "Bitcoin Yield"),
        ],
        &query.category,
    ));
    html.push_str(&filter_select(
        "sort",
        &[("apy", "APY"), ("tvl", "TVL"), ("risk", "Risk"), ("name", "Name")],
        &query.sort,
    ));
    html.push_str("<button type=\"submit\" class=\"button secondary\">Apply</button>");
    html.push_str("</form>");
    html
}

fn filter_select(name: &str, options: &[(&str, &str)], selected: &str) -> String {
    let mut html = format!("<select name=\"{name}\">");
    for (value, label) in options {
        let attr = if *value == selected { " selected" } else { "" };
        html.push_str(&format!(
            "<option value=\"{}\"{attr}>{}</option>",
            escape_attr(value),
            escape_html(label)
        ));
    }
    html.push_str("</select>");
    html
}

/// Strategy detail page.
pub async fn handle_strategy_detail(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Response<Body>> {
    log::info!("Strategy detail request: '{}'", id);
    let service = StrategyService::new(state.store.clone());

    let strategy = match service.get_by_id(&id).await {
        Ok(strategy) => strategy,
        Err(e) if e.is_not_found() => {
            log::warn!("Strategy not found: '{}'", id);
            return Ok(not_found_response(
                "/strategies",
                "Strategy Not Found",
                "The strategy you're looking for doesn't exist.",
                ("/strategies", "Back to Strategies"),
            ));
        }
        Err(e) => return Err(e),
    };

    let view = projection::project_strategy(&strategy);
    let structured = strategy_structured_data(&view, &state.config.base_url);
    let head = seo::render_head(
        &view.name,
        &view.description,
        &format!("{}/strategies/{}", state.config.base_url, view.id),
        "website",
        Some(&structured),
    );

    let content = render_strategy_detail(&view);
    let html = page("/strategies", &view.name, &view.description, &head, &content)?;
    Ok(Html(html).into_response())
}

fn render_strategy_detail(view: &StrategyView) -> String {
    let mut html = String::new();
    html.push_str("<a class=\"back-link\" href=\"/strategies\">&larr; Back to Strategies</a>");

    html.push_str("<div class=\"detail-header\">");
    html.push_str(&format!(
        "<span class=\"badge category\">{}</span>",
        escape_html(&view.category)
    ));
    html.push_str(&format!(
        "<span class=\"{}\">{} Risk</span>",
        risk_badge_class(view.risk.label()),
        view.risk.label()
    ));
    if view.featured {
        html.push_str("<span class=\"badge featured\">Featured</span>");
    }
    html.push_str(&format!("<h1>{}</h1>", escape_html(&view.name)));
    html.push_str(&format!(
        "<p class=\"page-intro\">{}</p>",
        escape_html(&view.description)
    ));
    html.push_str("</div>");

    html.push_str("<div class=\"metrics\">");
    for (value, label) in [
        (format!("{}%", format_metric(view.apy)), "APY"),
        (format_tvl(view.tvl), "TVL"),
        (format_usd(view.min_investment), "Min Investment"),
        (view.time_to_setup.clone(), "Setup Time"),
    ] {
        html.push_str(&format!(
            "<div class=\"metric\"><div class=\"metric-value\">{}</div><div class=\"metric-label\">{}</div></div>",
            escape_html(&value),
            label
        ));
    }
    html.push_str("</div>");

    if !view.steps.is_empty() {
        html.push_str("<section class=\"card\"><h2>Step-by-Step Guide</h2><ol class=\"steps\">");
        for step in &view.steps {
            html.push_str("<li>");
            html.push_str(&format!("<h4>{}</h4>", escape_html(&step.title)));
            html.push_str(&format!("<p>{}</p>", escape_html(&step.text)));
            if let Some(link) = &step.link {
                html.push_str(&format!(
                    "<a href=\"{}\" rel=\"noopener\">Protocol link</a>",
                    escape_attr(link)
                ));
            }
            html.push_str("</li>");
        }
        html.push_str("</ol></section>");
    }

    if !view.risks.is_empty() {
        html.push_str("<section class=\"card\"><h2>Risk Analysis</h2><ul class=\"risks\">");
        for risk in &view.risks {
            html.push_str(&format!(
                "<li><span class=\"{}\">{}</span><div><h4>{}</h4><p>{}</p></div></li>",
                risk_badge_class(&risk.level),
                escape_html(&risk.level),
                escape_html(&risk.kind),
                escape_html(&risk.description)
            ));
        }
        html.push_str("</ul></section>");
    }

    if !view.faq.is_empty() {
        html.push_str("<section class=\"card\"><h2>FAQ</h2>");
        for entry in &view.faq {
            html.push_str(&format!(
                "<details><summary>{}</summary><p>{}</p></details>",
                escape_html(&entry.q),
                escape_html(&entry.a)
            ));
        }
        html.push_str("</section>");
    }

    if !view.protocol_fees.is_empty() {
        html.push_str("<section class=\"card\"><h2>Protocol Fees</h2><ul>");
        for fee in &view.protocol_fees {
            html.push_str(&format!(
                "<li>{}: {}</li>",
                escape_html(&fee.protocol),
                escape_html(&fee.amount)
            ));
        }
        html.push_str("</ul></section>");
    }

    if !view.changelog.is_empty() {
        html.push_str("<section class=\"card\"><h2>Changelog</h2><ul class=\"changelog\">");
        for entry in &view.changelog {
            html.push_str(&format!(
                "<li><span class=\"date\">{}</span> {}</li>",
                escape_html(&entry.date),
                escape_html(&entry.change)
            ));
        }
        html.push_str("</ul></section>");
    }

    html.push_str("<aside class=\"card detail-sidebar\">");
    html.push_str("<h2>Strategy Info</h2>");
    for (label, values) in [
        ("Supported Chains", &view.chains),
        ("Protocols Used", &view.protocols),
        ("Tags", &view.tags),
    ] {
        if !values.is_empty() {
            html.push_str(&format!("<h4>{label}</h4><div class=\"tag-list\">"));
            for value in values {
                html.push_str(&format!("<span class=\"tag\">{}</span>", escape_html(value)));
            }
            html.push_str("</div>");
        }
    }
    html.push_str("<dl class=\"detail-meta\">");
    html.push_str(&format!(
        "<dt>Author</dt><dd>{}</dd>",
        escape_html(&view.author)
    ));
    if view.max_investment > 0.0 {
        html.push_str(&format!(
            "<dt>Max Investment</dt><dd>{}</dd>",
            format_usd(view.max_investment)
        ));
    }
    if let Some(fee) = &view.fee {
        html.push_str(&format!("<dt>Forge Fee</dt><dd>{}</dd>", escape_html(fee)));
    }
    html.push_str(&format!(
        "<dt>Last Updated</dt><dd>{}</dd>",
        escape_html(&view.last_updated)
    ));
    html.push_str(&format!(
        "<dt>Status</dt><dd>{}</dd>",
        escape_html(&view.status)
    ));
    html.push_str("</dl></aside>");
    html
}

/// Strategy builder teaser page.
pub async fn handle_strategy_builder(State(state): State<AppState>) -> Result<Response<Body>> {
    let content = concat!(
        "<h1>Strategy <span class=\"accent\">Builder</span></h1>",
        "<p class=\"page-intro\">Describe your goals and let the builder assemble a ",
        "multi-chain yield strategy: pick chains, risk tolerance, and capital, and get ",
        "a step-by-step plan with projected APY.</p>",
        "<div class=\"card\"><h2>Coming Soon</h2>",
        "<p>The interactive builder is in private beta. Join the waitlist on the ",
        "<a href=\"/\">landing page</a> to get early access, or browse the ",
        "<a href=\"/strategies\">strategy catalog</a> in the meantime.</p></div>",
    );
    let head = seo::render_head(
        "Strategy Builder",
        "Assemble a custom multi-chain DeFi yield strategy.",
        &format!("{}/strategy-builder", state.config.base_url),
        "website",
        None,
    );
    let html = page(
        "/strategy-builder",
        "Strategy Builder",
        "Assemble a custom multi-chain DeFi yield strategy.",
        &head,
        content,
    )?;
    Ok(Html(html).into_response())
}

/// Blog listing with search and category/tag filters.
pub async fn handle_blog(
    State(state): State<AppState>,
    Query(query): Query<PostQuery>,
) -> Result<Response<Body>> {
    log::info!("Blog listing request: {:?}", query);
    let service = BlogService::new(state.store.clone());
    let markdown = MarkdownService::new();

    let mut content = String::new();
    content.push_str("<h1>Forge <span class=\"accent\">Blog</span></h1>");
    content.push_str(
        "<p class=\"page-intro\">Latest insights, strategies, and guides for DeFi yield \
         optimization.</p>",
    );

    match service.list_all().await {
        Ok(posts) => {
            content.push_str(&post_filter_form(&query, &posts));
            let filtered = catalog::filter_posts(&posts, &query);
            let views: Vec<PostView> = filtered
                .iter()
                .map(|p| projection::project_post(p, &markdown))
                .collect();

            let featured: Vec<&PostView> = views.iter().filter(|v| v.featured).collect();
            if !featured.is_empty() {
                content.push_str("<h2>Featured</h2><div class=\"card-grid\">");
                for view in featured {
                    content.push_str(&post_card(view));
                }
                content.push_str("</div>");
            }

            content.push_str("<h2>All Articles</h2>");
            if views.is_empty() {
                content.push_str(
                    "<div class=\"empty-state\"><h3>No articles found</h3>\
                     <p>Try different keywords or clear the filters.</p>\
                     <a class=\"button secondary\" href=\"/blog\">Clear Filters</a></div>",
                );
            } else {
                content.push_str("<div class=\"card-grid\">");
                for view in &views {
                    content.push_str(&post_card(view));
                }
                content.push_str("</div>");
            }
        }
        Err(e) => content.push_str(&error_panel(&e.to_string())),
    }

    let head = seo::render_head(
        "Blog - DeFi Strategies & Insights",
        "DeFi strategies, yield farming techniques, and blockchain insights.",
        &format!("{}/blog", state.config.base_url),
        "website",
        None,
    );
    let html = page("/blog", "Blog - DeFi Strategies & Insights", "DeFi strategies, yield farming techniques, and blockchain insights.", &head, &content)?;
    Ok(Html(html).into_response())
}

fn post_filter_form(query: &PostQuery, posts: &[crate::models::BlogPost]) -> String {
    let mut html = String::new();
    html.push_str("<form class=\"filters\" method=\"get\" action=\"/blog\">");
    html.push_str(&format!(
        "<input name=\"q\" value=\"{}\" placeholder=\"Search articles...\">",
        escape_attr(&query.q)
    ));

    let mut categories = vec![("all".to_string(), "All Categories".to_string())];
    categories.extend(
        catalog::post_categories(posts)
            .into_iter()
            .map(|c| (c.clone(), c)),
    );
    let category_refs: Vec<(&str, &str)> = categories
        .iter()
        .map(|(v, l)| (v.as_str(), l.as_str()))
        .collect();
    html.push_str(&filter_select("category", &category_refs, &query.category));

    let mut tags = vec![("all".to_string(), "All Tags".to_string())];
    tags.extend(catalog::post_tags(posts).into_iter().map(|t| (t.clone(), t)));
    let tag_refs: Vec<(&str, &str)> = tags.iter().map(|(v, l)| (v.as_str(), l.as_str())).collect();
    html.push_str(&filter_select("tag", &tag_refs, &query.tag));

    html.push_str("<button type=\"submit\" class=\"button secondary\">Apply</button>");
    html.push_str("</form>");
    html
}

/// Blog post detail page, looked up by slug.
pub async fn handle_blog_detail(
    State(state): State<AppState>,
    AxumPath(slug): AxumPath<String>,
) -> Result<Response<Body>> {
    log::info!("Blog detail request: '{}'", slug);
    let service = BlogService::new(state.store.clone());

    let post = match service.get_by_slug(&slug).await {
        Ok(post) => post,
        Err(e) if e.is_not_found() => {
            log::warn!("Article not found: '{}'", slug);
            return Ok(not_found_response(
                "/blog",
                "Article Not Found",
                "The article you're looking for doesn't exist.",
                ("/blog", "Back to Blog"),
            ));
        }
        Err(e) => return Err(e),
    };

    // Count the view without blocking the render; counter failures are
    // logged inside the service.
    let store = state.store.clone();
    let post_id = post.id.clone();
    tokio::spawn(async move {
        BlogService::new(store).increment_views(&post_id).await;
    });

    let markdown = MarkdownService::new();
    let view = projection::project_post(&post, &markdown);
    let structured = post_structured_data(&view, &state.config.base_url);
    let head = seo::render_head(
        &view.title,
        &view.excerpt,
        &format!("{}/blog/{}", state.config.base_url, view.slug),
        "article",
        Some(&structured),
    );

    let mut content = String::new();
    content.push_str("<a class=\"back-link\" href=\"/blog\">&larr; Back to Blog</a>");
    content.push_str("<article class=\"post\">");
    content.push_str(&format!(
        "<span class=\"badge category\">{}</span>",
        escape_html(&view.category)
    ));
    if view.featured {
        content.push_str("<span class=\"badge featured\">Featured</span>");
    }
    content.push_str(&format!("<h1>{}</h1>", escape_html(&view.title)));
    if !view.excerpt.is_empty() {
        content.push_str(&format!(
            "<p class=\"page-intro\">{}</p>",
            escape_html(&view.excerpt)
        ));
    }
    content.push_str(&format!(
        "<div class=\"post-meta\"><span>{}</span><span>{}</span><span>{} min read</span>\
         <span>{} views</span><span>{} likes</span></div>",
        escape_html(&view.author),
        escape_html(&view.published_long),
        view.read_time,
        view.views,
        view.likes
    ));
    // Rendered content: Markdown already converted, HTML passed through.
    content.push_str(&format!(
        "<div class=\"post-content\">{}</div>",
        view.content_html
    ));
    if !view.tags.is_empty() {
        content.push_str("<div class=\"tag-list\">");
        for tag in &view.tags {
            content.push_str(&format!("<span class=\"tag\">{}</span>", escape_html(tag)));
        }
        content.push_str("</div>");
    }
    content.push_str("</article>");
    content.push_str(&waitlist_form());

    let html = page("/blog", &view.title, &view.excerpt, &head, &content)?;
    Ok(Html(html).into_response())
}

/// About page.
pub async fn handle_about(State(state): State<AppState>) -> Result<Response<Body>> {
    let content = concat!(
        "<h1>About <span class=\"accent\">Forge</span></h1>",
        "<p class=\"page-intro\">Forge researches, documents, and monitors DeFi yield ",
        "strategies across chains, so you can deploy capital with a clear picture of the ",
        "returns and the risks.</p>",
        "<div class=\"card\"><h2>What we do</h2>",
        "<p>Every strategy in the catalog is broken down into the protocols it touches, ",
        "the steps to set it up, and the risks it carries. The catalog, the blog, and ",
        "the AI-readable endpoints are all generated from the same source records.</p></div>",
        "<div class=\"card\"><h2>What we are not</h2>",
        "<p>Forge is an information product. Nothing here is financial advice, and no ",
        "strategy is risk-free. Do your own research.</p></div>",
    );
    let head = seo::render_head(
        "About",
        "About the Forge DeFi strategy platform.",
        &format!("{}/about", state.config.base_url),
        "website",
        None,
    );
    let html = page("/about", "About", "About the Forge DeFi strategy platform.", &head, content)?;
    Ok(Html(html).into_response())
}

/// Contact page.
pub async fn handle_contact(State(state): State<AppState>) -> Result<Response<Body>> {
    let mut content = String::new();
    content.push_str("<h1>Contact <span class=\"accent\">Us</span></h1>");
    content.push_str(
        "<p class=\"page-intro\">Questions about a strategy, a correction, or a \
         partnership? We read everything.</p>",
    );
    content.push_str(
        "<div class=\"card\"><h2>Reach us</h2>\
         <p>Email <a href=\"mailto:hello@forge.finance\">hello@forge.finance</a> or \
         mention <strong>@forgedefi</strong>.</p></div>",
    );
    content.push_str(&waitlist_form());

    let head = seo::render_head(
        "Contact",
        "Contact the Forge team.",
        &format!("{}/contact", state.config.base_url),
        "website",
        None,
    );
    let html = page("/contact", "Contact", "Contact the Forge team.", &head, &content)?;
    Ok(Html(html).into_response())
}

// ---------------------------------------------------------------------------
// Waitlist
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct WaitlistForm {
    #[serde(default)]
    pub email: String,
}

/// Waitlist signup. The visitor always sees success; backing failures are
/// logged inside the email service.
pub async fn handle_waitlist(
    State(state): State<AppState>,
    Form(form): Form<WaitlistForm>,
) -> Result<Response<Body>> {
    let email = form.email.trim();
    if !email.is_empty() {
        state.email.subscribe(state.store.as_ref(), email).await;
    }

    let content = concat!(
        "<div class=\"card waitlist-done\"><h1>You're on the list!</h1>",
        "<p>Thanks for signing up. We'll let you know as soon as early access opens.</p>",
        "<a class=\"button primary\" href=\"/\">Back to Home</a></div>",
    );
    let html = page("/", "Waitlist", "Waitlist signup confirmed.", "", content)?;
    Ok(Html(html).into_response())
}

// ---------------------------------------------------------------------------
// Machine-facing exports
// ---------------------------------------------------------------------------

/// `/sitemap.xml`: one feed for search engines. A failed fetch degrades to
/// the static pages; the endpoint never returns a broken document.
pub async fn handle_sitemap(State(state): State<AppState>) -> Result<Response<Body>> {
    let strategies = StrategyService::new(state.store.clone())
        .list_all()
        .await
        .unwrap_or_else(|e| {
            log::error!("Sitemap strategy fetch failed: {e}");
            Vec::new()
        });
    let posts = BlogService::new(state.store.clone())
        .list_all()
        .await
        .unwrap_or_else(|e| {
            log::error!("Sitemap blog fetch failed: {e}");
            Vec::new()
        });

    let entries = sitemap::sitemap_entries(&strategies, &posts, &state.config.base_url);
    let xml = sitemap::render_sitemap_xml(&entries);

    let mut resp = Response::new(Body::from(xml));
    resp.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/xml"),
    );
    Ok(resp)
}

/// `/ai/sitemap.json`: the AI crawler catalog.
pub async fn handle_ai_catalog(State(state): State<AppState>) -> Result<Response<Body>> {
    match StrategyService::new(state.store.clone()).list_all().await {
        Ok(strategies) => {
            let catalog = ai::ai_catalog(&strategies, &state.config.base_url);
            Ok(Json(catalog).into_response())
        }
        Err(e) => Ok((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Failed to load sitemap",
                "message": e.to_string(),
            })),
        )
            .into_response()),
    }
}

/// `/ai/<slug>.json`: the per-strategy AI detail document. A missing
/// strategy answers with the `{error, slug}` body and a 404.
pub async fn handle_ai_strategy(
    State(state): State<AppState>,
    AxumPath(file): AxumPath<String>,
) -> Result<Response<Body>> {
    let Some(slug) = file.strip_suffix(".json") else {
        return Err(ForgeError::NotFound);
    };
    log::info!("AI detail request: '{}'", slug);

    match StrategyService::new(state.store.clone()).get_by_id(slug).await {
        Ok(strategy) => {
            let doc = ai::ai_strategy_doc(&strategy, &state.config.base_url);
            Ok(Json(doc).into_response())
        }
        Err(e) if e.is_not_found() => Ok((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Strategy not found", "slug": slug })),
        )
            .into_response()),
        Err(e) => Ok((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Strategy not found", "message": e.to_string() })),
        )
            .into_response()),
    }
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct AdminQuery {
    #[serde(default)]
    pub created: String,
}

async fn signed_in_user(state: &AppState, headers: &HeaderMap) -> Option<crate::auth::User> {
    let cookies = headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok());
    let token = session_from_cookies(cookies)?;
    state.auth.current_user(&token).await
}

fn admin_page(content: &str) -> Result<Response<Body>> {
    let html = page("/admin", "Admin Dashboard", "Forge admin dashboard.", "", content)?;
    Ok(Html(html).into_response())
}

/// `/admin`: dashboard when signed in, sign-in form otherwise.
pub async fn handle_admin(
    State(state): State<AppState>,
    Query(query): Query<AdminQuery>,
    headers: HeaderMap,
) -> Result<Response<Body>> {
    match signed_in_user(&state, &headers).await {
        Some(user) => {
            let notice = match query.created.as_str() {
                "strategy" => Some("Strategy created successfully!"),
                "post" => Some("Blog post created successfully!"),
                _ => None,
            };
            admin_page(&admin::render_dashboard(
                &user.email,
                notice,
                None,
                &StrategyFormData::default(),
                None,
                &BlogFormData::default(),
            ))
        }
        None => admin_page(&admin::render_login(None)),
    }
}

/// `POST /admin/login`.
pub async fn handle_admin_login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response<Body>> {
    match state.auth.sign_in(form.email.trim(), &form.password).await {
        Ok(token) => {
            let cookie = format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax");
            let mut resp = Redirect::to("/admin").into_response();
            resp.headers_mut().insert(
                header::SET_COOKIE,
                HeaderValue::from_str(&cookie)
                    .map_err(|e| ForgeError::Template(e.to_string()))?,
            );
            Ok(resp)
        }
        Err(ForgeError::AuthFailure) => {
            admin_page(&admin::render_login(Some("Invalid email or password")))
        }
        Err(e) => Err(e),
    }
}

/// `POST /admin/logout`.
pub async fn handle_admin_logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response<Body>> {
    let cookies = headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok());
    if let Some(token) = session_from_cookies(cookies) {
        state.auth.sign_out(&token).await;
    }

    let expired = format!("{SESSION_COOKIE}=; Path=/; HttpOnly; Max-Age=0");
    let mut resp = Redirect::to("/admin").into_response();
    resp.headers_mut().insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&expired).map_err(|e| ForgeError::Template(e.to_string()))?,
    );
    Ok(resp)
}

/// `POST /admin/strategies`: create a strategy from the entry form. On a
/// write failure the dashboard re-renders with the error and the submitted
/// values intact.
pub async fn handle_admin_create_strategy(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<StrategyFormData>,
) -> Result<Response<Body>> {
    let Some(user) = signed_in_user(&state, &headers).await else {
        return Ok(Redirect::to("/admin").into_response());
    };

    let service = StrategyService::new(state.store.clone());
    match service.create(form.payload()).await {
        Ok(_) => Ok(Redirect::to("/admin?created=strategy").into_response()),
        Err(e) => admin_page(&admin::render_dashboard(
            &user.email,
            None,
            Some(&e.to_string()),
            &form,
            None,
            &BlogFormData::default(),
        )),
    }
}

/// `POST /admin/posts`: create a blog post from the entry form.
pub async fn handle_admin_create_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<BlogFormData>,
) -> Result<Response<Body>> {
    let Some(user) = signed_in_user(&state, &headers).await else {
        return Ok(Redirect::to("/admin").into_response());
    };

    let service = BlogService::new(state.store.clone());
    match service.create(form.payload()).await {
        Ok(_) => Ok(Redirect::to("/admin?created=post").into_response()),
        Err(e) => admin_page(&admin::render_dashboard(
            &user.email,
            None,
            None,
            &StrategyFormData::default(),
            Some(&e.to_string()),
            &form,
        )),
    }
}

// ---------------------------------------------------------------------------
// Static files
// ---------------------------------------------------------------------------

/// Handle static file requests.
pub async fn handle_static(
    State(state): State<AppState>,
    AxumPath(path): AxumPath<String>,
) -> Result<Response<Body>> {
    // Refuse path traversal before touching the filesystem.
    if path.split('/').any(|segment| segment == "..") {
        return Err(ForgeError::NotFound);
    }

    let requested = state.config.static_dir.join(path.trim_start_matches('/'));
    if !requested.is_file() {
        return Err(ForgeError::NotFound);
    }

    let bytes = std::fs::read(&requested)?;
    let content_type = crate::utils::content_type_for(&requested);
    let mut resp = Response::new(Body::from(bytes));
    resp.headers_mut().insert(
        header::CONTENT_TYPE,
        content_type
            .parse()
            .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream")),
    );
    Ok(resp)
}
