//! Shared helpers for the fleetdeck workspace.

use once_cell::sync::Lazy;
use regex::Regex;

pub mod time_handling;

static REDACTION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(authorization: )([\w\-\.=:/+ ]+)",
        r"(?i)([A-Z0-9_]*?(KEY|TOKEN|SECRET|PASSWORD)=)([^\s]+)",
        r#"(?i)("[a-z0-9_]*(key|token|secret|password)"\s*:\s*)"[^"]*""#,
    ]
    .iter()
    .map(|pat| Regex::new(pat).unwrap())
    .collect()
});

/// Redacts values that look like secrets in a string.
///
/// Applied to anything that leaves the process as a log line or an error
/// message: request dumps, backend error bodies, payload previews.
pub fn redact_sensitive(input: &str) -> String {
    let mut redacted = input.to_string();
    for re in REDACTION_PATTERNS.iter() {
        redacted = re
            .replace_all(&redacted, |caps: &regex::Captures| {
                let prefix = caps.get(1).map(|m| m.as_str()).unwrap_or("");
                format!("{}<redacted>", prefix)
            })
            .to_string();
    }
    redacted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_authorization_headers() {
        let line = "authorization: Bearer abc.def.ghi";
        assert_eq!(redact_sensitive(line), "authorization: <redacted>");
    }

    #[test]
    fn redacts_env_style_assignments() {
        let line = "FLEETDECK_API_KEY=sk-live-1234 OTHER=ok";
        let redacted = redact_sensitive(line);
        assert!(redacted.contains("FLEETDECK_API_KEY=<redacted>"));
        assert!(redacted.contains("OTHER=ok"));
    }

    #[test]
    fn redacts_json_secret_fields() {
        let body = r#"{"name":"Team key","api_key":"sk-live-1234","host":"smtp.example.com"}"#;
        let redacted = redact_sensitive(body);
        assert!(!redacted.contains("sk-live-1234"));
        assert!(redacted.contains(r#""host":"smtp.example.com""#));
    }

    #[test]
    fn leaves_plain_text_alone() {
        let line = "created scheduled task 'Morning digest'";
        assert_eq!(redact_sensitive(line), line);
    }
}
