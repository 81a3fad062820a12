/// Application-level constants
pub const APP_NAME: &str = "Coopvet";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Model handling multimodal diagnostic screening (image + symptom text,
/// structured JSON output).
pub const DIAGNOSTIC_MODEL: &str = "gemini-3-pro-preview";

/// Model behind the conversational advisor.
pub const ADVISORY_MODEL: &str = "gemini-3-flash-latest";

/// Model used for the search-grounded news digest.
pub const NEWS_MODEL: &str = "gemini-3-flash-latest";

/// Base URL of the generative-language REST API.
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Per-request timeout for generative calls, in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Media type assumed for uploaded bird photos when the caller does not
/// say otherwise.
pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// Default log filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    format!("warn,{}=info", env!("CARGO_PKG_NAME"))
}

/// Read the API key from the environment. Empty values count as unset.
pub fn api_key_from_env() -> Option<String> {
    std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_name_is_coopvet() {
        assert_eq!(APP_NAME, "Coopvet");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn advisory_and_news_share_the_flash_model() {
        assert_eq!(ADVISORY_MODEL, NEWS_MODEL);
    }

    #[test]
    fn log_filter_names_this_crate() {
        assert!(default_log_filter().contains("coopvet"));
    }
}
