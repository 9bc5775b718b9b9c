//! Address handling - turning entry text into navigable URLs

use url::Url;

use crate::constants::{ABOUT_BLANK, SEARCH_ADDRESS};

/// Normalize address-entry text into something the engine can load.
/// Text that already parses as an absolute URL passes through untouched;
/// bare hostnames get an https scheme.
pub fn normalize(input: &str) -> String {
    let input = input.trim();
    if input == ABOUT_BLANK {
        return String::from(ABOUT_BLANK);
    }
    if Url::parse(input).is_ok() {
        return input.to_string();
    }
    format!("https://{}", input)
}

/// Build a search-engine query URL from search-entry text
pub fn search_url(query: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(query.trim().as_bytes()).collect();
    format!("{}?q={}", SEARCH_ADDRESS, encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_url_passthrough() {
        assert_eq!(normalize("https://example.com/a?b=c"), "https://example.com/a?b=c");
    }

    #[test]
    fn test_bare_host_gets_scheme() {
        assert_eq!(normalize("example.com"), "https://example.com");
        assert_eq!(normalize("  example.com  "), "https://example.com");
    }

    #[test]
    fn test_blank_passthrough() {
        assert_eq!(normalize("about:blank"), "about:blank");
    }

    #[test]
    fn test_search_url_encodes_query() {
        let url = search_url("rust borrow checker");
        assert_eq!(url, "https://duckduckgo.com/lite/?q=rust+borrow+checker");
    }
}
