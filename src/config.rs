use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "HealthSentinel";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Overrides the database location.
pub const DB_PATH_ENV: &str = "SENTINEL_DB_PATH";

const OLLAMA_URL_ENV: &str = "SENTINEL_OLLAMA_URL";
const MODEL_ENV: &str = "SENTINEL_MODEL";
const TIMEOUT_ENV: &str = "SENTINEL_ADVISOR_TIMEOUT_SECS";
const MOCK_ENV: &str = "SENTINEL_MOCK";

const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
const DEFAULT_MODEL: &str = "medgemma";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Get the application data directory
/// ~/HealthSentinel/ on all platforms, falling back to the working directory
/// when no home directory can be resolved.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Database file: `SENTINEL_DB_PATH` if set, else `<app data>/sentinel.db`.
pub fn database_path() -> PathBuf {
    database_path_from(std::env::var(DB_PATH_ENV).ok())
}

fn database_path_from(override_path: Option<String>) -> PathBuf {
    match override_path.filter(|p| !p.trim().is_empty()) {
        Some(path) => PathBuf::from(path),
        None => app_data_dir().join("sentinel.db"),
    }
}

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "info,sentinel_lib=debug"
}

/// Connection settings for the advisory model.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisorConfig {
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
    /// Use the canned demo advisor instead of Ollama.
    pub mock: bool,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OLLAMA_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            mock: false,
        }
    }
}

impl AdvisorConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset, blank or unparseable values keep
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let timeout_secs = match get(TIMEOUT_ENV).map(|v| v.parse::<u64>()) {
            Some(Ok(secs)) if secs > 0 => secs,
            Some(_) => {
                tracing::warn!(key = TIMEOUT_ENV, "Ignoring invalid advisor timeout");
                defaults.timeout_secs
            }
            None => defaults.timeout_secs,
        };

        Self {
            base_url: get(OLLAMA_URL_ENV).unwrap_or(defaults.base_url),
            model: get(MODEL_ENV).unwrap_or(defaults.model),
            timeout_secs,
            mock: get(MOCK_ENV)
                .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1"))
                .unwrap_or(false),
        }
    }
}
