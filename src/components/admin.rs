//! Admin dashboard: the sign-in form and the two content-entry forms.
//!
//! Form payload assembly lives here next to the markup. Numeric inputs are
//! parsed from text with no validation gate: text that does not parse is
//! stored as null, and every consumer already treats a non-numeric field as
//! zero. List-valued fields are entered one per line.

use serde::Deserialize;
use serde_json::{Value, json};

use crate::utils::{dates, escape_attr, escape_html};

/// Strategy entry form, field names matching the stored record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StrategyFormData {
    pub name: String,
    pub description: String,
    pub category: String,
    pub risk: String,
    pub apy: String,
    pub tvl: String,
    pub min_investment: String,
    pub max_investment: String,
    pub fee: String,
    pub time_to_setup: String,
    pub chains: String,
    pub protocols: String,
    pub tags: String,
    pub steps: String,
    pub featured: String,
}

impl StrategyFormData {
    /// Assemble the create payload from the submitted fields.
    pub fn payload(&self) -> Value {
        json!({
            "name": self.name.trim(),
            "description": self.description.trim(),
            "category": self.category,
            "risk": self.risk,
            "apy": parse_number(&self.apy),
            "tvl": parse_number(&self.tvl),
            "minInvestment": parse_number(&self.min_investment),
            "maxInvestment": parse_number(&self.max_investment),
            "fee": self.fee.trim(),
            "timeToSetup": self.time_to_setup.trim(),
            "chains": split_lines(&self.chains),
            "protocols": split_lines(&self.protocols),
            "tags": split_lines(&self.tags),
            "steps": split_lines(&self.steps),
            "featured": checkbox(&self.featured),
        })
    }
}

/// Blog post entry form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlogFormData {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub author: String,
    pub category: String,
    pub tags: String,
    pub read_time: String,
    pub featured: String,
}

impl BlogFormData {
    pub fn payload(&self) -> Value {
        json!({
            "title": self.title.trim(),
            "slug": self.slug.trim(),
            "excerpt": self.excerpt.trim(),
            "content": self.content,
            "author": self.author.trim(),
            "category": self.category,
            "tags": split_lines(&self.tags),
            "readTime": parse_integer(&self.read_time),
            "featured": checkbox(&self.featured),
            "publishedAt": dates::now_rfc3339(),
        })
    }
}

fn parse_number(input: &str) -> Value {
    match input.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => json!(n),
        _ => Value::Null,
    }
}

fn parse_integer(input: &str) -> Value {
    match input.trim().parse::<i64>() {
        Ok(n) => json!(n),
        _ => Value::Null,
    }
}

fn checkbox(input: &str) -> bool {
    input == "on" || input == "true"
}

fn split_lines(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

const STRATEGY_CATEGORIES: &[&str] = &[
    "Liquid Staking",
    "Stablecoin",
    "Yield Farming",
    "Arbitrage",
    "Index Fund",
    "Bitcoin Yield",
];

const BLOG_CATEGORIES: &[&str] = &["Strategy", "Education", "Security", "Market Analysis"];

/// Sign-in form, with the generic failure message when credentials were bad.
pub fn render_login(error: Option<&str>) -> String {
    let mut html = String::new();
    html.push_str("<div class=\"admin-login card\">");
    html.push_str("<h1>Admin Access</h1>");
    html.push_str("<p>Sign in to access the admin dashboard</p>");
    if let Some(message) = error {
        html.push_str(&format!(
            "<div class=\"form-error\">{}</div>",
            escape_html(message)
        ));
    }
    html.push_str("<form method=\"post\" action=\"/admin/login\">");
    html.push_str(
        "<label for=\"email\">Email</label>\
         <input id=\"email\" name=\"email\" type=\"email\" required>",
    );
    html.push_str(
        "<label for=\"password\">Password</label>\
         <input id=\"password\" name=\"password\" type=\"password\" required>",
    );
    html.push_str("<button type=\"submit\" class=\"button primary\">Sign In</button>");
    html.push_str("</form></div>");
    html
}

/// Dashboard with both entry forms. On a failed submit the relevant error is
/// shown inline and the submitted values are kept for retry.
pub fn render_dashboard(
    signed_in_email: &str,
    notice: Option<&str>,
    strategy_error: Option<&str>,
    strategy_form: &StrategyFormData,
    blog_error: Option<&str>,
    blog_form: &BlogFormData,
) -> String {
    let mut html = String::new();
    html.push_str("<div class=\"admin-dashboard\">");
    html.push_str("<div class=\"admin-header\">");
    html.push_str("<h1>Admin Dashboard</h1>");
    html.push_str(&format!(
        "<div class=\"admin-session\"><span>Signed in as {}</span>\
         <form method=\"post\" action=\"/admin/logout\">\
         <button type=\"submit\" class=\"button secondary\">Sign Out</button></form></div>",
        escape_html(signed_in_email)
    ));
    html.push_str("</div>");

    if let Some(message) = notice {
        html.push_str(&format!(
            "<div class=\"form-notice\">{}</div>",
            escape_html(message)
        ));
    }

    html.push_str(&render_strategy_form(strategy_error, strategy_form));
    html.push_str(&render_blog_form(blog_error, blog_form));
    html.push_str("</div>");
    html
}

fn render_strategy_form(error: Option<&str>, form: &StrategyFormData) -> String {
    let mut html = String::new();
    html.push_str("<section class=\"card admin-form\">");
    html.push_str("<h2>Create New Strategy</h2>");
    html.push_str("<p>Add a new DeFi strategy to the platform</p>");
    if let Some(message) = error {
        html.push_str(&format!(
            "<div class=\"form-error\">Error creating strategy: {}</div>",
            escape_html(message)
        ));
    }
    html.push_str("<form method=\"post\" action=\"/admin/strategies\">");
    html.push_str(&text_input("name", "Strategy Name", &form.name, true));
    html.push_str(&select_input(
        "category",
        "Category",
        STRATEGY_CATEGORIES,
        &form.category,
    ));
    html.push_str(&textarea("description", "Description", &form.description, 3));
    html.push_str(&text_input("apy", "APY (%)", &form.apy, false));
    html.push_str(&text_input("tvl", "TVL (USD)", &form.tvl, false));
    html.push_str(&select_input(
        "risk",
        "Risk",
        &["Low", "Medium", "High"],
        &form.risk,
    ));
    html.push_str(&text_input(
        "minInvestment",
        "Min Investment",
        &form.min_investment,
        false,
    ));
    html.push_str(&text_input(
        "maxInvestment",
        "Max Investment",
        &form.max_investment,
        false,
    ));
    html.push_str(&text_input("fee", "Fee (e.g. 0.25%)", &form.fee, false));
    html.push_str(&text_input(
        "timeToSetup",
        "Time to Setup",
        &form.time_to_setup,
        false,
    ));
    html.push_str(&textarea("chains", "Chains (one per line)", &form.chains, 3));
    html.push_str(&textarea(
        "protocols",
        "Protocols (one per line)",
        &form.protocols,
        3,
    ));
    html.push_str(&textarea("tags", "Tags (one per line)", &form.tags, 3));
    html.push_str(&textarea("steps", "Steps (one per line)", &form.steps, 5));
    html.push_str(&checkbox_input("featured", "Featured", &form.featured));
    html.push_str("<button type=\"submit\" class=\"button primary\">Save Strategy</button>");
    html.push_str("</form></section>");
    html
}

fn render_blog_form(error: Option<&str>, form: &BlogFormData) -> String {
    let mut html = String::new();
    html.push_str("<section class=\"card admin-form\">");
    html.push_str("<h2>Create New Blog Post</h2>");
    if let Some(message) = error {
        html.push_str(&format!(
            "<div class=\"form-error\">Error creating blog post: {}</div>",
            escape_html(message)
        ));
    }
    html.push_str("<form method=\"post\" action=\"/admin/posts\">");
    html.push_str(&text_input("title", "Title", &form.title, true));
    html.push_str(&text_input("slug", "Slug", &form.slug, true));
    html.push_str(&textarea("excerpt", "Excerpt", &form.excerpt, 3));
    html.push_str(&textarea(
        "content",
        "Content (Markdown or HTML)",
        &form.content,
        10,
    ));
    html.push_str(&text_input("author", "Author", &form.author, false));
    html.push_str(&select_input(
        "category",
        "Category",
        BLOG_CATEGORIES,
        &form.category,
    ));
    html.push_str(&textarea("tags", "Tags (one per line)", &form.tags, 3));
    html.push_str(&text_input(
        "readTime",
        "Read Time (minutes)",
        &form.read_time,
        false,
    ));
    html.push_str(&checkbox_input("featured", "Featured", &form.featured));
    html.push_str("<button type=\"submit\" class=\"button primary\">Save Post</button>");
    html.push_str("</form></section>");
    html
}

fn text_input(name: &str, label: &str, value: &str, required: bool) -> String {
    format!(
        "<label for=\"{name}\">{label}</label>\
         <input id=\"{name}\" name=\"{name}\" value=\"{}\"{}>",
        escape_attr(value),
        if required { " required" } else { "" }
    )
}

fn textarea(name: &str, label: &str, value: &str, rows: u8) -> String {
    format!(
        "<label for=\"{name}\">{label}</label>\
         <textarea id=\"{name}\" name=\"{name}\" rows=\"{rows}\">{}</textarea>",
        escape_html(value)
    )
}

fn select_input(name: &str, label: &str, options: &[&str], selected: &str) -> String {
    let mut html = format!("<label for=\"{name}\">{label}</label><select id=\"{name}\" name=\"{name}\">");
    for option in options {
        let attr = if *option == selected { " selected" } else { "" };
        html.push_str(&format!(
            "<option value=\"{}\"{attr}>{}</option>",
            escape_attr(option),
            escape_html(option)
        ));
    }
    html.push_str("</select>");
    html
}

fn checkbox_input(name: &str, label: &str, value: &str) -> String {
    format!(
        "<label class=\"checkbox\"><input type=\"checkbox\" name=\"{name}\"{}> {label}</label>",
        if checkbox(value) { " checked" } else { "" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_payload_parses_numbers_leniently() {
        let form = StrategyFormData {
            name: " Lido Strategy ".to_string(),
            apy: "31.2".to_string(),
            tvl: "not a number".to_string(),
            min_investment: "100".to_string(),
            featured: "on".to_string(),
            chains: "Ethereum\nArbitrum\n\n".to_string(),
            ..Default::default()
        };
        let payload = form.payload();

        assert_eq!(payload["name"], "Lido Strategy");
        assert_eq!(payload["apy"], json!(31.2));
        // Invalid numeric text is stored as null, not rejected.
        assert_eq!(payload["tvl"], Value::Null);
        assert_eq!(payload["minInvestment"], json!(100.0));
        assert_eq!(payload["featured"], json!(true));
        assert_eq!(payload["chains"], json!(["Ethereum", "Arbitrum"]));
    }

    #[test]
    fn test_blog_payload_stamps_published_at() {
        let form = BlogFormData {
            title: "Hello".to_string(),
            slug: "hello".to_string(),
            read_time: "8".to_string(),
            tags: "DeFi\nStaking".to_string(),
            ..Default::default()
        };
        let payload = form.payload();
        assert_eq!(payload["readTime"], json!(8));
        assert_eq!(payload["tags"], json!(["DeFi", "Staking"]));
        assert!(payload["publishedAt"].is_string());
        assert_eq!(payload["featured"], json!(false));
    }

    #[test]
    fn test_forms_preserve_submitted_values() {
        let form = StrategyFormData {
            name: "Kept <value>".to_string(),
            ..Default::default()
        };
        let html = render_strategy_form(Some("store rejected the write"), &form);
        assert!(html.contains("Kept &lt;value&gt;"));
        assert!(html.contains("Error creating strategy"));
    }

    #[test]
    fn test_login_error_is_rendered() {
        let html = render_login(Some("Invalid email or password"));
        assert!(html.contains("Invalid email or password"));
        assert!(render_login(None).contains("Sign In"));
    }
}
