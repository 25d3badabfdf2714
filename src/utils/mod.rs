pub mod dates;

/// Escape HTML special characters
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escape HTML attribute values
pub fn escape_attr(text: &str) -> String {
    escape_html(text)
}

/// Escape special XML characters
pub fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Determine the content type for a static file by extension
pub fn content_type_for(path: &std::path::Path) -> String {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();

    let content_type = match extension.as_str() {
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" => "application/javascript",
        "json" => "application/json",
        "xml" => "application/xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    };
    content_type.to_string()
}

/// Format a TVL figure the way the catalog cards display it: `$25.0M` above
/// one million, `$150K` below.
pub fn format_tvl(tvl: f64) -> String {
    if tvl >= 1_000_000.0 {
        format!("${:.1}M", tvl / 1_000_000.0)
    } else {
        format!("${:.0}K", tvl / 1_000.0)
    }
}

/// Format a numeric metric without a trailing `.0` on whole values, so an
/// `apy` of `31.2` renders as `31.2` and `0.0` renders as `0`.
pub fn format_metric(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Format a dollar amount for display, dropping the cents on whole values.
pub fn format_usd(value: f64) -> String {
    format!("${}", format_metric(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("say \"hi\""), "say &quot;hi&quot;");
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("it's"), "it&apos;s");
        assert_eq!(escape_xml("a&b<c>"), "a&amp;b&lt;c&gt;");
    }

    #[test]
    fn test_format_tvl() {
        assert_eq!(format_tvl(25_000_000.0), "$25.0M");
        assert_eq!(format_tvl(150_000.0), "$150K");
        assert_eq!(format_tvl(0.0), "$0K");
    }

    #[test]
    fn test_format_metric() {
        assert_eq!(format_metric(31.2), "31.2");
        assert_eq!(format_metric(0.0), "0");
        assert_eq!(format_metric(8.0), "8");
    }
}
