use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub store_path: PathBuf,
    pub places_base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub cache_max_age_secs: u64,
    /// Seeds the stored credential when the store has none yet.
    pub places_api_key: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("store_path", &self.store_path)
            .field("places_base_url", &self.places_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("cache_max_age_secs", &self.cache_max_age_secs)
            .field(
                "places_api_key",
                &self.places_api_key.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}
