use std::path::PathBuf;
use std::time::Duration;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub jwt: JwtConfig,
    pub gate: GateSettings,
}

/// Runtime knobs for the resource gate.
#[derive(Debug, Clone)]
pub struct GateSettings {
    /// How long an evaluated flag may be served from cache.
    pub cache_ttl: Duration,
    /// Maximum number of cached resource names.
    pub cache_capacity: u64,
    /// Optional JSON file replacing the built-in route and hierarchy tables.
    pub config_path: Option<PathBuf>,
    /// Directory holding `resources/404.html` and `errors/404.html`.
    pub templates_dir: PathBuf,
    /// Where blocked users are sent back to.
    pub dashboard_path: String,
    /// Let `admin` and `staff` callers through inactive resources.
    pub bypass_elevated: bool,
}

impl Default for GateSettings {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(30),
            cache_capacity: 256,
            config_path: None,
            templates_dir: PathBuf::from("templates"),
            dashboard_path: "/pages/dashboard/".to_string(),
            bypass_elevated: true,
        }
    }
}

impl GateSettings {
    /// | Env Var                          | Default             |
    /// |----------------------------------|---------------------|
    /// | `RESOURCE_GATE_CACHE_TTL_SECS`   | `30`                |
    /// | `RESOURCE_GATE_CACHE_CAPACITY`   | `256`               |
    /// | `RESOURCE_GATE_CONFIG`           | built-in tables     |
    /// | `RESOURCE_GATE_BYPASS_ELEVATED`  | `true`              |
    /// | `RESOURCE_TEMPLATES_DIR`         | `templates`         |
    /// | `DASHBOARD_PATH`                 | `/pages/dashboard/` |
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let cache_ttl_secs: u64 = std::env::var("RESOURCE_GATE_CACHE_TTL_SECS")
            .map(|v| v.parse().expect("RESOURCE_GATE_CACHE_TTL_SECS must be a valid u64"))
            .unwrap_or(defaults.cache_ttl.as_secs());

        let cache_capacity: u64 = std::env::var("RESOURCE_GATE_CACHE_CAPACITY")
            .map(|v| v.parse().expect("RESOURCE_GATE_CACHE_CAPACITY must be a valid u64"))
            .unwrap_or(defaults.cache_capacity);

        let bypass_elevated: bool = std::env::var("RESOURCE_GATE_BYPASS_ELEVATED")
            .map(|v| v.parse().expect("RESOURCE_GATE_BYPASS_ELEVATED must be true or false"))
            .unwrap_or(defaults.bypass_elevated);

        Self {
            cache_ttl: Duration::from_secs(cache_ttl_secs),
            cache_capacity,
            config_path: std::env::var("RESOURCE_GATE_CONFIG").ok().map(PathBuf::from),
            templates_dir: std::env::var("RESOURCE_TEMPLATES_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.templates_dir),
            dashboard_path: std::env::var("DASHBOARD_PATH").unwrap_or(defaults.dashboard_path),
            bypass_elevated,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    ///
    /// JWT and gate settings are read by [`JwtConfig::from_env`] and
    /// [`GateSettings::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            gate: GateSettings::from_env(),
        }
    }
}
