use actix_web::http::header::HeaderMap;

/// Derives the client identifier used for rate limiting from the
/// proxy-forwarded header chain: first `X-Forwarded-For` entry, then
/// `X-Real-IP`, then the literal `"unknown"`.
///
/// Clients behind neither header all share the `"unknown"` bucket.
pub fn get_client_ip(headers: &HeaderMap) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for") {
        if let Ok(s) = forwarded.to_str() {
            let first = s.split(',').next().unwrap_or("").trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header::{HeaderName, HeaderValue};

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(
                HeaderName::from_lowercase(name.as_bytes()).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        map
    }

    #[test]
    fn takes_first_forwarded_for_entry() {
        let map = headers(&[("x-forwarded-for", "203.0.113.7, 10.0.0.1, 10.0.0.2")]);
        assert_eq!(get_client_ip(&map), "203.0.113.7");
    }

    #[test]
    fn falls_back_to_real_ip() {
        let map = headers(&[("x-real-ip", "198.51.100.23")]);
        assert_eq!(get_client_ip(&map), "198.51.100.23");
    }

    #[test]
    fn forwarded_for_wins_over_real_ip() {
        let map = headers(&[
            ("x-forwarded-for", " 203.0.113.7 "),
            ("x-real-ip", "198.51.100.23"),
        ]);
        assert_eq!(get_client_ip(&map), "203.0.113.7");
    }

    #[test]
    fn unknown_when_no_headers_present() {
        assert_eq!(get_client_ip(&HeaderMap::new()), "unknown");
    }
}
