/// How requests to the store are authenticated.
///
/// WooCommerce only accepts OAuth 1.0a signatures over plain HTTP and only
/// accepts basic auth over HTTPS; [`AuthMode::Auto`] picks by URL scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Auto,
    OAuth1,
    Basic,
}

impl AuthMode {
    /// Resolves [`AuthMode::Auto`] against the store's URL scheme.
    #[must_use]
    pub fn resolve(self, base_url: &str) -> AuthMode {
        match self {
            AuthMode::Auto => {
                if base_url
                    .get(..8)
                    .is_some_and(|s| s.eq_ignore_ascii_case("https://"))
                {
                    AuthMode::Basic
                } else {
                    AuthMode::OAuth1
                }
            }
            other => other,
        }
    }
}

impl std::fmt::Display for AuthMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthMode::Auto => write!(f, "auto"),
            AuthMode::OAuth1 => write!(f, "oauth1"),
            AuthMode::Basic => write!(f, "basic"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    /// REST root of the store, e.g. `https://shop.example/wp-json/wc/v3/`.
    pub base_url: String,
    pub consumer_key: String,
    pub consumer_secret: String,
    pub auth_mode: AuthMode,
    pub request_timeout_secs: u64,
    /// `per_page` sent with every product search.
    pub page_size: u32,
    pub user_agent: String,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |s: &str| if s.is_empty() { "" } else { "[redacted]" };
        f.debug_struct("AppConfig")
            .field("base_url", &self.base_url)
            .field("consumer_key", &redact(&self.consumer_key))
            .field("consumer_secret", &redact(&self.consumer_secret))
            .field("auth_mode", &self.auth_mode)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("page_size", &self.page_size)
            .field("user_agent", &self.user_agent)
            .field("log_level", &self.log_level)
            .finish()
    }
}
