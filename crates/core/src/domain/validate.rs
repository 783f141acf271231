// Input normalization and validation helpers shared by all entities

use super::error::ValidationErrors;

pub const MAX_JSON_DEPTH: usize = 16;

/// Trim in place
pub fn trim(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

/// Trim in place; blank strings become `None`
pub fn trim_opt(value: &mut Option<String>) {
    if let Some(v) = value.as_mut() {
        trim(v);
        if v.is_empty() {
            *value = None;
        }
    }
}

/// Non-empty and at most `max` characters
pub fn required(errors: &mut ValidationErrors, field: &str, value: &str, max: usize) {
    if value.is_empty() {
        errors.add(field, "is required");
    } else if value.chars().count() > max {
        errors.add(field, format!("must be at most {} characters", max));
    }
}

/// At most `max` characters when present
pub fn max_len(errors: &mut ValidationErrors, field: &str, value: Option<&str>, max: usize) {
    if let Some(v) = value {
        if v.chars().count() > max {
            errors.add(field, format!("must be at most {} characters", max));
        }
    }
}

/// `local@domain.tld` shape, no whitespace
pub fn is_valid_email(value: &str) -> bool {
    if value.len() > 254 || value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains("..")
}

/// Lowercase DNS hostname with at least two labels
pub fn is_valid_hostname(value: &str) -> bool {
    if value.is_empty() || value.len() > 253 || !value.contains('.') {
        return false;
    }
    value.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    })
}

/// `[a-z0-9-]`, no leading/trailing or doubled hyphen
pub fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && !value.starts_with('-')
        && !value.ends_with('-')
        && !value.contains("--")
        && value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Absolute http(s) URL with a host part
pub fn is_http_url(value: &str) -> bool {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    match rest {
        Some(rest) => {
            let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
            !host.is_empty() && !value.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

/// Builds a slug from free text: lowercase ASCII alphanumerics joined by single hyphens
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

/// Nesting depth of a JSON value (scalars are depth 0)
pub fn json_depth(value: &serde_json::Value) -> usize {
    match value {
        serde_json::Value::Array(items) => 1 + items.iter().map(json_depth).max().unwrap_or(0),
        serde_json::Value::Object(map) => 1 + map.values().map(json_depth).max().unwrap_or(0),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("admin@example.com"));
        assert!(is_valid_email("a.b+c@mail.example.org"));
        assert!(!is_valid_email("admin"));
        assert!(!is_valid_email("admin@localhost"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("a@@example.com"));
        assert!(!is_valid_email("a b@example.com"));
        assert!(!is_valid_email("a@example..com"));
    }

    #[test]
    fn test_hostnames() {
        assert!(is_valid_hostname("example.com"));
        assert!(is_valid_hostname("my-site.co.uk"));
        assert!(!is_valid_hostname("localhost"));
        assert!(!is_valid_hostname("Example.com"));
        assert!(!is_valid_hostname("-bad.com"));
        assert!(!is_valid_hostname("bad-.com"));
        assert!(!is_valid_hostname("a..com"));
        assert!(!is_valid_hostname(&format!("{}.com", "a".repeat(64))));
    }

    #[test]
    fn test_slugs() {
        assert!(is_valid_slug("about-us"));
        assert!(is_valid_slug("home"));
        assert!(!is_valid_slug("About"));
        assert!(!is_valid_slug("-home"));
        assert!(!is_valid_slug("a--b"));
        assert!(!is_valid_slug(""));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  Rust & SQLite  in 2024 "), "rust-sqlite-in-2024");
        assert_eq!(slugify("---"), "");
        assert_eq!(slugify("Ünïcode title"), "n-code-title");
    }

    #[test]
    fn test_http_url() {
        assert!(is_http_url("https://cdn.example.com/og.png"));
        assert!(is_http_url("http://example.com"));
        assert!(!is_http_url("ftp://example.com/file"));
        assert!(!is_http_url("https://"));
        assert!(!is_http_url("/relative/path.png"));
    }

    #[test]
    fn test_json_depth() {
        assert_eq!(json_depth(&json!(1)), 0);
        assert_eq!(json_depth(&json!([])), 1);
        assert_eq!(json_depth(&json!([{"type": "hero"}])), 2);
        assert_eq!(json_depth(&json!({"a": {"b": {"c": [1]}}})), 4);
    }

    #[test]
    fn test_trim_opt_blank_becomes_none() {
        let mut value = Some("   ".to_string());
        trim_opt(&mut value);
        assert_eq!(value, None);

        let mut value = Some("  keep ".to_string());
        trim_opt(&mut value);
        assert_eq!(value.as_deref(), Some("keep"));
    }
}
