//! Service configuration read from the environment.
//!
//! Every setting has a default; the defaults applied are logged at startup so
//! a misspelt variable shows up in the log instead of silently.

use std::{
    env,
    fmt::{Debug, Display},
    path::PathBuf,
    str::FromStr,
};

use log::{info, warn};

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@exhibition.local";
pub const DEFAULT_ADMIN_PASSWORD: &str = "exhibit-admin";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub admin_email: String,
    pub admin_password: String,
    pub open_browser: bool,
    /// Largest JSON body accepted, in bytes.
    pub json_limit: usize,
}

impl Config {
    pub fn load() -> Self {
        let config = Self {
            host: try_load("EXHIBIT_HOST", "127.0.0.1".to_string()),
            port: try_load("EXHIBIT_PORT", 8080),
            db_path: try_load("EXHIBIT_DB_PATH", PathBuf::from("exhibition.sqlite")),
            admin_email: try_load("EXHIBIT_ADMIN_EMAIL", DEFAULT_ADMIN_EMAIL.to_string()),
            admin_password: try_load("EXHIBIT_ADMIN_PASSWORD", DEFAULT_ADMIN_PASSWORD.to_string()),
            open_browser: try_load("EXHIBIT_OPEN_BROWSER", false),
            json_limit: try_load("EXHIBIT_JSON_LIMIT", 1024 * 1024),
        };
        if config.admin_password == DEFAULT_ADMIN_PASSWORD {
            warn!("EXHIBIT_ADMIN_PASSWORD not set; the admin panel uses the default password");
        }
        config
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Debug,
    T::Err: Display,
{
    let Ok(raw) = env::var(key) else {
        info!("{key} not set, using default: {default:?}");
        return default;
    };
    raw.parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw:?}: {e}; using default: {default:?}");
        default
    })
}
