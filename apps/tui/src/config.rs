use color_eyre::eyre::eyre;
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Household statistics by district, published by the Ministry of the Interior.
pub const DEFAULT_API_URL: &str =
    "https://od.moi.gov.tw/api/v1/rest/datastore/301000000A-000082-045";

/// Records whose district identifier contains this marker are kept.
pub const DEFAULT_REGION_MARKER: &str = "臺北";

/// Stripped from district identifiers to build selector labels.
pub const DEFAULT_LABEL_PREFIX: &str = "臺北市";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Snapshot shipped with the application, used when the endpoint is unreachable.
pub fn default_fallback_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join("apiData.json")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSettings {
    pub marker: String,
    pub label_prefix: String,
}

impl Default for RegionSettings {
    fn default() -> Self {
        Self {
            marker: DEFAULT_REGION_MARKER.to_string(),
            label_prefix: DEFAULT_LABEL_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_url: String,
    pub fallback_path: PathBuf,
    /// SQLite file for the session store; in-memory when unset.
    pub session_db: Option<PathBuf>,
    pub region: RegionSettings,
    pub request_timeout: Duration,
    pub initial_district: Option<String>,
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            fallback_path: default_fallback_path(),
            session_db: None,
            region: RegionSettings::default(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            initial_district: None,
            debug: false,
        }
    }
}

impl AppConfig {
    /// Builds the configuration from a variable lookup, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> color_eyre::eyre::Result<Self> {
        let defaults = Self::default();
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let request_timeout = match non_empty("REQUEST_TIMEOUT_SECS") {
            Some(value) => {
                let secs = value
                    .trim()
                    .parse::<u64>()
                    .map_err(|e| eyre!("Invalid REQUEST_TIMEOUT_SECS {value:?}: {e}"))?;
                Duration::from_secs(secs)
            }
            None => defaults.request_timeout,
        };

        Ok(Self {
            api_url: non_empty("API_URL").unwrap_or(defaults.api_url),
            fallback_path: non_empty("FALLBACK_DATA_PATH")
                .map_or(defaults.fallback_path, PathBuf::from),
            session_db: non_empty("SESSION_DB").map(PathBuf::from),
            region: RegionSettings {
                marker: non_empty("REGION_MARKER").unwrap_or(defaults.region.marker),
                label_prefix: lookup("LABEL_PREFIX").unwrap_or(defaults.region.label_prefix),
            },
            request_timeout,
            initial_district: non_empty("DISTRICT"),
            debug: non_empty("DEBUG").is_some_and(|value| value != "0"),
        })
    }
}

/// Loads `.env` if present and reads the configuration from the environment.
pub fn init_app_config() -> color_eyre::eyre::Result<AppConfig> {
    dotenv().ok();
    AppConfig::from_lookup(|name| env::var(name).ok())
}
