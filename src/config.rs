use std::env;
use std::time::Duration;

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub lookup: LookupConfig,
}

/// Upstream endpoints and deadlines for the resolution pipeline.
///
/// Base URLs carry no trailing slash; tests point them at mock servers.
#[derive(Clone, Debug)]
pub struct LookupConfig {
    pub bnf_sru_url: String,
    pub bnf_timeout: Duration,
    pub google_books_url: String,
    pub google_books_key: Option<String>,
    /// Restrict volume search to the caller's working language
    pub google_books_lang_bias: bool,
    pub google_books_timeout: Duration,
    pub openlibrary_url: String,
    pub openlibrary_covers_url: String,
    pub openlibrary_timeout: Duration,
    pub translate_url: String,
    pub translate_descriptions: bool,
    pub target_language: String,
    pub user_agent: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            bnf_sru_url: "https://catalogue.bnf.fr/api/SRU".to_string(),
            bnf_timeout: Duration::from_millis(7500),
            google_books_url: "https://www.googleapis.com".to_string(),
            google_books_key: None,
            google_books_lang_bias: true,
            google_books_timeout: Duration::from_millis(6500),
            openlibrary_url: "https://openlibrary.org".to_string(),
            openlibrary_covers_url: "https://covers.openlibrary.org".to_string(),
            openlibrary_timeout: Duration::from_millis(6500),
            translate_url: "https://translate.googleapis.com".to_string(),
            translate_descriptions: true,
            target_language: "fr".to_string(),
            user_agent: concat!("biblioresolve/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl LookupConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            bnf_sru_url: env_url("BNF_SRU_URL").unwrap_or(defaults.bnf_sru_url),
            bnf_timeout: env_millis("BNF_TIMEOUT_MS").unwrap_or(defaults.bnf_timeout),
            google_books_url: env_url("GOOGLE_BOOKS_URL").unwrap_or(defaults.google_books_url),
            google_books_key: env::var("GOOGLE_BOOKS_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            google_books_lang_bias: env_flag("GOOGLE_BOOKS_LANG_BIAS")
                .unwrap_or(defaults.google_books_lang_bias),
            google_books_timeout: env_millis("GOOGLE_BOOKS_TIMEOUT_MS")
                .unwrap_or(defaults.google_books_timeout),
            openlibrary_url: env_url("OPENLIBRARY_URL").unwrap_or(defaults.openlibrary_url),
            openlibrary_covers_url: env_url("OPENLIBRARY_COVERS_URL")
                .unwrap_or(defaults.openlibrary_covers_url),
            openlibrary_timeout: env_millis("OPENLIBRARY_TIMEOUT_MS")
                .unwrap_or(defaults.openlibrary_timeout),
            translate_url: env_url("TRANSLATE_URL").unwrap_or(defaults.translate_url),
            translate_descriptions: env_flag("TRANSLATE_DESCRIPTIONS")
                .unwrap_or(defaults.translate_descriptions),
            target_language: env::var("TARGET_LANGUAGE")
                .ok()
                .map(|l| l.trim().to_lowercase())
                .filter(|l| !l.is_empty())
                .unwrap_or(defaults.target_language),
            user_agent: defaults.user_agent,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .ok()
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_else(Vec::new),
            lookup: LookupConfig::from_env(),
        }
    }
}

fn env_url(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().trim_end_matches('/').to_string())
        .filter(|v| !v.is_empty())
}

fn env_millis(key: &str) -> Option<Duration> {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_millis)
}

fn env_flag(key: &str) -> Option<bool> {
    env::var(key)
        .ok()
        .map(|v| v != "false" && v != "0")
}
