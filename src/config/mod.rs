use std::env;
use std::path::PathBuf;

const DEFAULT_API_BASE_URL: &str = "https://booking-app-db.vercel.app/";
const DEFAULT_API_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the remote hotel catalog API.
    pub api_base_url: String,
    /// Per-request timeout for catalog calls, in seconds.
    pub api_timeout_secs: u64,
    /// File backing the local store. `None` keeps everything in memory.
    pub storage_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            api_base_url: env::var("BOOKING_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
            api_timeout_secs: env::var("BOOKING_API_TIMEOUT_SECS")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(DEFAULT_API_TIMEOUT_SECS),
            storage_path: env::var("BOOKING_STORAGE_PATH").ok().map(PathBuf::from),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_timeout_secs: DEFAULT_API_TIMEOUT_SECS,
            storage_path: None,
        }
    }
}
