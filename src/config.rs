//! Guard configuration: storage key names, admin sentinel and redirect paths.
//!
//! SYSTEM CONTEXT
//! ==============
//! The same settings are read from JSON, from process environment (SSR and
//! native hosts) or from the build environment baked into the WASM bundle.
//! Every source funnels through one validation path.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;
use thiserror::Error;

use crate::routing::guard::target_of;
use crate::routing::meta::Requirement;
use crate::routing::table::RouteTable;

pub const DEFAULT_TOKEN_KEY: &str = "jwt";
pub const DEFAULT_ROLE_KEY: &str = "role";
pub const DEFAULT_ADMIN_SENTINEL: &str = "admin";
pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_HOME_PATH: &str = "/";
pub const DEFAULT_LOG_LEVEL: log::Level = log::Level::Info;

pub const TOKEN_KEY_VAR: &str = "BOOKING_TOKEN_KEY";
pub const ROLE_KEY_VAR: &str = "BOOKING_ROLE_KEY";
pub const ADMIN_SENTINEL_VAR: &str = "BOOKING_ADMIN_SENTINEL";
pub const LOGIN_PATH_VAR: &str = "BOOKING_LOGIN_PATH";
pub const HOME_PATH_VAR: &str = "BOOKING_HOME_PATH";
pub const LOG_LEVEL_VAR: &str = "BOOKING_LOG_LEVEL";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} must be an absolute path starting with '/', got '{value}'")]
    RelativePath { field: &'static str, value: String },

    #[error("unknown log level '{0}'")]
    LogLevel(String),

    #[error("invalid config json: {0}")]
    Json(String),

    #[error("{field} '{path}' would itself be refused by the route table")]
    RefusedRedirect { field: &'static str, path: String },
}

/// Settings shared by the session reader and the navigation guard.
///
/// The admin sentinel is compared against a value the browser controls. It
/// decides which pages are shown, not what the API permits; admin endpoints
/// must re-check the role server-side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardConfig {
    pub token_key: String,
    pub role_key: String,
    pub admin_sentinel: String,
    pub login_path: String,
    pub home_path: String,
    pub log_level: log::Level,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            token_key: DEFAULT_TOKEN_KEY.to_owned(),
            role_key: DEFAULT_ROLE_KEY.to_owned(),
            admin_sentinel: DEFAULT_ADMIN_SENTINEL.to_owned(),
            login_path: DEFAULT_LOGIN_PATH.to_owned(),
            home_path: DEFAULT_HOME_PATH.to_owned(),
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl GuardConfig {
    /// Load settings for this build. Server builds read the process
    /// environment. Browser builds use a JSON blob baked in through
    /// `BOOKING_GUARD_CONFIG` if present, else the individual variables.
    pub fn load() -> Result<Self, ConfigError> {
        #[cfg(feature = "ssr")]
        {
            Self::from_env()
        }
        #[cfg(not(feature = "ssr"))]
        {
            match option_env!("BOOKING_GUARD_CONFIG") {
                Some(raw) => Self::from_json(raw),
                None => Self::from_build_env(),
            }
        }
    }

    /// Check both redirect targets against `table`. The login page must admit
    /// an anonymous session and the home page must admit every session, or a
    /// redirect would land on another refusal.
    pub fn validate_redirects(&self, table: &RouteTable) -> Result<(), ConfigError> {
        let login = target_of(table, &self.login_path);
        if login.requires(Requirement::Auth) || login.requires(Requirement::Admin) {
            return Err(ConfigError::RefusedRedirect { field: "login_path", path: self.login_path.clone() });
        }
        if !target_of(table, &self.home_path).meta().is_empty() {
            return Err(ConfigError::RefusedRedirect { field: "home_path", path: self.home_path.clone() });
        }
        Ok(())
    }

    /// Parse a JSON object such as `{"tokenKey": "jwt", "loginPath": "/login"}`.
    /// Missing fields take their defaults; unknown fields are rejected.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(raw).map_err(|e| ConfigError::Json(e.to_string()))?;
        raw.build()
    }

    /// Build config from a variable lookup.
    ///
    /// Optional, all with defaults:
    /// - `BOOKING_TOKEN_KEY`: storage key holding the session token (`jwt`)
    /// - `BOOKING_ROLE_KEY`: storage key holding the role marker (`role`)
    /// - `BOOKING_ADMIN_SENTINEL`: role marker value granting admin pages (`admin`)
    /// - `BOOKING_LOGIN_PATH`: redirect for unauthenticated users (`/login`)
    /// - `BOOKING_HOME_PATH`: redirect for refused pages (`/`)
    /// - `BOOKING_LOG_LEVEL`: `error`..`trace` (`info`)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        RawConfig {
            token_key: lookup(TOKEN_KEY_VAR),
            role_key: lookup(ROLE_KEY_VAR),
            admin_sentinel: lookup(ADMIN_SENTINEL_VAR),
            login_path: lookup(LOGIN_PATH_VAR),
            home_path: lookup(HOME_PATH_VAR),
            log_level: lookup(LOG_LEVEL_VAR),
        }
        .build()
    }

    /// Read the variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read the variables captured at compile time. Used by the WASM bundle,
    /// which has no process environment at runtime.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| {
            let value = match var {
                TOKEN_KEY_VAR => option_env!("BOOKING_TOKEN_KEY"),
                ROLE_KEY_VAR => option_env!("BOOKING_ROLE_KEY"),
                ADMIN_SENTINEL_VAR => option_env!("BOOKING_ADMIN_SENTINEL"),
                LOGIN_PATH_VAR => option_env!("BOOKING_LOGIN_PATH"),
                HOME_PATH_VAR => option_env!("BOOKING_HOME_PATH"),
                LOG_LEVEL_VAR => option_env!("BOOKING_LOG_LEVEL"),
                _ => None,
            };
            value.map(str::to_owned)
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawConfig {
    token_key: Option<String>,
    role_key: Option<String>,
    admin_sentinel: Option<String>,
    login_path: Option<String>,
    home_path: Option<String>,
    log_level: Option<String>,
}

impl RawConfig {
    fn build(self) -> Result<GuardConfig, ConfigError> {
        let log_level = match self.log_level {
            Some(raw) => raw.trim().parse::<log::Level>().map_err(|_| ConfigError::LogLevel(raw))?,
            None => DEFAULT_LOG_LEVEL,
        };

        Ok(GuardConfig {
            token_key: non_empty("token_key", self.token_key, DEFAULT_TOKEN_KEY)?,
            role_key: non_empty("role_key", self.role_key, DEFAULT_ROLE_KEY)?,
            // Kept verbatim: the marker comparison is exact.
            admin_sentinel: non_empty("admin_sentinel", self.admin_sentinel, DEFAULT_ADMIN_SENTINEL)?,
            login_path: absolute_path("login_path", self.login_path, DEFAULT_LOGIN_PATH)?,
            home_path: absolute_path("home_path", self.home_path, DEFAULT_HOME_PATH)?,
            log_level,
        })
    }
}

fn non_empty(field: &'static str, value: Option<String>, default: &str) -> Result<String, ConfigError> {
    match value {
        Some(v) if v.is_empty() => Err(ConfigError::Empty { field }),
        Some(v) => Ok(v),
        None => Ok(default.to_owned()),
    }
}

fn absolute_path(field: &'static str, value: Option<String>, default: &str) -> Result<String, ConfigError> {
    let path = non_empty(field, value, default)?;
    if path.starts_with('/') {
        Ok(path)
    } else {
        Err(ConfigError::RelativePath { field, value: path })
    }
}
