//! Client configuration

/// Key holding the session token in durable storage
pub const STORAGE_KEY_TOKEN: &str = "token";
/// Key holding the theme preference in durable storage
pub const STORAGE_KEY_THEME: &str = "theme";

/// Static client settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix for every API path. Empty means same origin as the page.
    pub api_base: String,
}

impl ClientConfig {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// Settings baked in at build time through `MECHAT_API_BASE`
    pub fn from_build_env() -> Self {
        Self::new(option_env!("MECHAT_API_BASE").unwrap_or_default())
    }

    /// Absolute URL for an API path such as `/api/chat`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_build_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_dropped() {
        let config = ClientConfig::new("http://localhost:8080/");
        assert_eq!(config.url("/api/chat"), "http://localhost:8080/api/chat");
    }

    #[test]
    fn empty_base_keeps_same_origin_paths() {
        let config = ClientConfig::new("");
        assert_eq!(config.url("/api/conversations"), "/api/conversations");
    }
}
