//! # Return URLs
//!
//! The provider substitutes [`CHECKOUT_SESSION_ID_PLACEHOLDER`] with the real
//! session id when it redirects the customer back. The return page reads
//! `session_id` from its query string to look the session up, so the
//! placeholder has to be present in exactly this shape.

/// Token Stripe replaces with the checkout session id on redirect
pub const CHECKOUT_SESSION_ID_PLACEHOLDER: &str = "{CHECKOUT_SESSION_ID}";

/// Append `session_id={CHECKOUT_SESSION_ID}` unless the URL already carries
/// the placeholder.
pub fn with_session_placeholder(url: &str) -> String {
    if url.contains(CHECKOUT_SESSION_ID_PLACEHOLDER) {
        return url.to_string();
    }
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{}{}session_id={}", url, sep, CHECKOUT_SESSION_ID_PLACEHOLDER)
}

/// Join a relative path onto a base URL. Absolute URLs pass through.
pub fn absolute_url(base_url: Option<&str>, url: &str) -> String {
    match base_url {
        Some(base) if url.starts_with('/') => {
            format!("{}{}", base.trim_end_matches('/'), url)
        }
        _ => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_query() {
        assert_eq!(
            with_session_placeholder("/done"),
            "/done?session_id={CHECKOUT_SESSION_ID}"
        );
    }

    #[test]
    fn test_appends_to_existing_query() {
        assert_eq!(
            with_session_placeholder("https://shop.example/return?ref=mail"),
            "https://shop.example/return?ref=mail&session_id={CHECKOUT_SESSION_ID}"
        );
    }

    #[test]
    fn test_keeps_existing_placeholder() {
        let url = "https://shop.example/r?sid={CHECKOUT_SESSION_ID}";
        assert_eq!(with_session_placeholder(url), url);
    }

    #[test]
    fn test_absolute_url() {
        assert_eq!(
            absolute_url(Some("http://localhost:8080/"), "/done?session_id=x"),
            "http://localhost:8080/done?session_id=x"
        );
        assert_eq!(
            absolute_url(Some("http://localhost:8080"), "https://other.example/done"),
            "https://other.example/done"
        );
        assert_eq!(absolute_url(None, "/done"), "/done");
    }
}
