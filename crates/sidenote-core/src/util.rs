//! Small helpers for config values and timestamps.

/// Trimmed `value`, or `fallback` when only whitespace is left.
pub fn trimmed_or(value: &str, fallback: String) -> String {
    match value.trim() {
        "" => fallback,
        trimmed => trimmed.to_string(),
    }
}

/// Survey pages must be reachable from a regular browser tab.
pub fn is_web_url(url: &str) -> bool {
    ["http://", "https://"]
        .iter()
        .any(|scheme| url.starts_with(scheme))
}

/// Wall clock in Unix milliseconds, as stored in `last_modified`.
pub fn unix_millis_now() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trimmed_or_falls_back_for_blank_values() {
        assert_eq!(trimmed_or("   ", "notes.html".to_string()), "notes.html");
        assert_eq!(trimmed_or("", "notes.html".to_string()), "notes.html");
    }

    #[test]
    fn trimmed_or_trims_value() {
        assert_eq!(
            trimmed_or(" notes@mozilla.com ", String::new()),
            "notes@mozilla.com"
        );
    }

    #[test]
    fn is_web_url_accepts_http_schemes() {
        assert!(is_web_url("http://localhost"));
        assert!(is_web_url("https://qsurvey.mozilla.com/s3/notes"));
        assert!(!is_web_url("moz-extension://notes/index.html"));
    }

    #[test]
    fn unix_millis_now_is_after_epoch() {
        assert!(unix_millis_now() > 1_500_000_000_000);
    }
}
