/// Exact-match origin allow-list for the contact endpoint.
///
/// A request without an `Origin` header is allowed so non-browser clients
/// (curl, mobile apps) can reach the API; browsers always send the header on
/// cross-site requests, so the allow-list still gates those.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allowed_origins: Vec<String>,
}

/// Per-request outcome of the origin check, carrying the response headers
/// derived from it. Attached to every response, success or error.
#[derive(Debug, Clone)]
pub struct CorsDecision {
    pub allowed: bool,
    allow_origin: String,
}

impl CorsPolicy {
    pub fn new(allowed_origins: Vec<String>) -> Self {
        CorsPolicy { allowed_origins }
    }

    /// No wildcard or subdomain matching: an origin is allowed iff it is an
    /// exact member of the configured list.
    pub fn is_allowed(&self, origin: Option<&str>) -> bool {
        match origin {
            None => true,
            Some(origin) => self.allowed_origins.iter().any(|allowed| allowed == origin),
        }
    }

    pub fn decision(&self, origin: Option<&str>) -> CorsDecision {
        let allowed = self.is_allowed(origin);
        let allow_origin = if allowed {
            origin.unwrap_or("*").to_string()
        } else {
            String::new()
        };

        CorsDecision {
            allowed,
            allow_origin,
        }
    }
}

impl CorsDecision {
    pub fn headers(&self) -> [(&'static str, &str); 3] {
        [
            ("Access-Control-Allow-Origin", self.allow_origin.as_str()),
            ("Access-Control-Allow-Methods", "GET, POST, OPTIONS"),
            ("Access-Control-Allow-Headers", "Content-Type"),
        ]
    }
}
