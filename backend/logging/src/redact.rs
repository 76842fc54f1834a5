//! Log Redaction Layer
//!
//! Scrubs bearer tokens and session cookie values from strings prior to logging.

use regex::Regex;
use std::sync::LazyLock;

static BEARER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)bearer\s+[a-zA-Z0-9\-\._~+/]+=*").unwrap());
static SESSION_KV_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b([a-z0-9_\-]*(?:session|token)[a-z0-9_\-]*)=([^;&\s]+)").unwrap()
});

/// Redacts credentials in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let redacted = BEARER_RE.replace_all(input, "Bearer [REDACTED_TOKEN]");
    SESSION_KV_RE
        .replace_all(&redacted, "$1=[REDACTED]")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_bearer_tokens() {
        let raw = "lookup failed for Bearer 5f0c2a8e-1d2b-4c7a-9e11-aa00bb11cc22";
        let clean = redact_sensitive_data(raw);
        assert!(!clean.contains("5f0c2a8e"));
        assert!(clean.contains("[REDACTED_TOKEN]"));
    }

    #[test]
    fn redacts_session_cookie_values() {
        let raw = "cookie: theme=dark; hireforge_session=abc123; lang=en";
        let clean = redact_sensitive_data(raw);
        assert!(!clean.contains("abc123"));
        assert!(clean.contains("hireforge_session=[REDACTED]"));
        assert!(clean.contains("theme=dark"));
    }

    #[test]
    fn redacts_lowercase_bearer_scheme() {
        let clean = redact_sensitive_data("authorization: bearer 9d1e77aa");
        assert!(!clean.contains("9d1e77aa"));
        assert!(clean.contains("[REDACTED_TOKEN]"));
    }

    #[test]
    fn leaves_plain_text_alone() {
        assert_eq!(redact_sensitive_data("/admin/jobs"), "/admin/jobs");
    }
}
