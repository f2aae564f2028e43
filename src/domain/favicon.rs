// src/domain/favicon.rs
//! URL normalization and best-effort favicon lookup.
//!
//! Pure functions: no network access, only URL parsing. A favicon URL is a
//! hint for the front end, which falls back to a placeholder glyph when the
//! icon cannot be loaded.

use crate::domain::error::{DomainError, DomainResult};
use tracing::debug;
use url::Url;

pub const PLACEHOLDER_ICON: &str = "/placeholder.svg";
const FAVICON_SERVICE: &str = "https://www.google.com/s2/favicons";

/// Normalize user input into an absolute URL.
///
/// Adds `https://` when no http(s) scheme is given. Returns an empty string
/// when the result is not a valid URL with a host.
pub fn format_url(input: &str) -> String {
    let input = input.trim();
    if input.is_empty() {
        return String::new();
    }

    let candidate = if input.starts_with("http://") || input.starts_with("https://") {
        input.to_string()
    } else {
        format!("https://{}", input)
    };

    match Url::parse(&candidate) {
        Ok(parsed) if parsed.host_str().is_some_and(|h| !h.is_empty()) => parsed.to_string(),
        Ok(_) => {
            debug!("URL has no host: {}", candidate);
            String::new()
        }
        Err(e) => {
            debug!("Invalid URL format '{}': {}", candidate, e);
            String::new()
        }
    }
}

/// Like [`format_url`], but reports invalid input as an error.
pub fn validate_url(input: &str) -> DomainResult<String> {
    let formatted = format_url(input);
    if formatted.is_empty() {
        return Err(DomainError::InvalidUrl(input.to_string()));
    }
    Ok(formatted)
}

/// Icon URL for the host of `url`, or the local placeholder.
pub fn favicon_url(url: &str) -> String {
    match Url::parse(url).ok().and_then(|u| u.host_str().map(str::to_string)) {
        Some(host) if !host.is_empty() => format!("{}?domain={}&sz=128", FAVICON_SERVICE, host),
        _ => {
            debug!("No hostname in '{}', using placeholder icon", url);
            PLACEHOLDER_ICON.to_string()
        }
    }
}

/// Hostname without a leading `www.`, usable as a fallback title.
pub fn title_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    let title = host.strip_prefix("www.").unwrap_or(host);
    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("example.com", "https://example.com/")]
    #[case("  example.com/path?q=1 ", "https://example.com/path?q=1")]
    #[case("http://example.com", "http://example.com/")]
    #[case("https://Example.COM/a", "https://example.com/a")]
    #[case("not a url", "")]
    #[case("", "")]
    #[case("   ", "")]
    #[case("https://", "")]
    fn given_input_when_format_url_then_normalizes_or_signals_invalid(
        #[case] input: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(format_url(input), expected);
    }

    #[test]
    fn given_invalid_input_when_validate_url_then_invalid_url_error() {
        let err = validate_url("not a url").unwrap_err();
        assert!(matches!(err, DomainError::InvalidUrl(_)));
        assert_eq!(validate_url("example.com").unwrap(), "https://example.com/");
    }

    #[test]
    fn given_valid_url_when_favicon_url_then_uses_service_with_host() {
        assert_eq!(
            favicon_url("https://www.rust-lang.org/learn"),
            "https://www.google.com/s2/favicons?domain=www.rust-lang.org&sz=128"
        );
    }

    #[test]
    fn given_unparseable_url_when_favicon_url_then_placeholder() {
        assert_eq!(favicon_url("example.com"), PLACEHOLDER_ICON);
        assert_eq!(favicon_url(""), PLACEHOLDER_ICON);
        assert_eq!(favicon_url("mailto:someone@example.com"), PLACEHOLDER_ICON);
    }

    #[test]
    fn given_www_host_when_title_from_url_then_strips_prefix() {
        assert_eq!(title_from_url("https://www.github.com/"), Some("github.com".to_string()));
        assert_eq!(title_from_url("https://docs.rs/"), Some("docs.rs".to_string()));
        assert_eq!(title_from_url("garbage"), None);
    }
}
