//! API utilities for frontend-backend communication

/// Get the base URL for API requests
///
/// The backend listens on port 3000 of the host that served the page.
/// Returns an empty string if window is not available.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Build a full API URL from a path (should start with "/api/")
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Query string из пар ключ-значение; пустые значения пропускаются
pub fn query_string(params: &[(&str, &str)]) -> String {
    let encoded: Vec<String> = params
        .iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect();
    if encoded.is_empty() {
        String::new()
    } else {
        format!("?{}", encoded.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_string_skips_empty_and_encodes() {
        assert_eq!(query_string(&[]), "");
        assert_eq!(query_string(&[("search", "")]), "");
        assert_eq!(
            query_string(&[("search", "café bar"), ("category_id", ""), ("rating_min", "4")]),
            "?search=caf%C3%A9%20bar&rating_min=4"
        );
    }
}
