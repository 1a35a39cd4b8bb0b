// This file is part of the product Wanderlist.
// SPDX-FileCopyrightText: 2025-2026 Wanderlist Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "config.yaml";

#[derive(Debug)]
pub enum ConfigError {
    LoadError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::LoadError(msg) => write!(f, "Configuration load error: {}", msg),
            ConfigError::ValidationError(msg) => {
                write!(f, "Configuration validation error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: default_workers(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_workers() -> usize {
    2
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_app_description")]
    pub description: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            description: default_app_description(),
        }
    }
}

fn default_app_name() -> String {
    "Wanderlist".to_string()
}

fn default_app_description() -> String {
    "Places worth going back for".to_string()
}

/// Connection settings for the hosted database/auth/storage provider.
///
/// The anon key authenticates ordinary row-level requests together with the
/// user's bearer token; the service-role key is the administrative credential
/// used only for storage object cleanup.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProviderConfig {
    pub url: String,
    pub anon_key: String,
    pub service_role_key: String,
    #[serde(default = "default_storage_bucket")]
    pub storage_bucket: String,
}

fn default_storage_bucket() -> String {
    "visit-images".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthConfig {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    #[serde(default = "default_cookie_secure")]
    pub cookie_secure: bool,
    #[serde(default = "default_session_hours")]
    pub session_hours: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            cookie_secure: default_cookie_secure(),
            session_hours: default_session_hours(),
        }
    }
}

fn default_cookie_name() -> String {
    "wanderlist_auth".to_string()
}

fn default_cookie_secure() -> bool {
    false
}

fn default_session_hours() -> i64 {
    24 * 7
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GeocodingConfig {
    #[serde(default = "default_search_url")]
    pub search_url: String,
    #[serde(default = "default_timezone_url")]
    pub timezone_url: String,
    #[serde(default = "default_geocoding_user_agent")]
    pub user_agent: String,
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            search_url: default_search_url(),
            timezone_url: default_timezone_url(),
            user_agent: default_geocoding_user_agent(),
        }
    }
}

fn default_search_url() -> String {
    "https://nominatim.openstreetmap.org/search".to_string()
}

fn default_timezone_url() -> String {
    "https://timeapi.io/api/TimeZone/coordinate".to_string()
}

fn default_geocoding_user_agent() -> String {
    "wanderlist/0.4".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub app: AppConfig,
    pub provider: ProviderConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub geocoding: GeocodingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// A configuration that passed validation. Same shape as [`Config`] with the
/// provider URL normalized (no trailing slash).
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub server: ServerConfig,
    pub app: AppConfig,
    pub provider: ProviderConfig,
    pub auth: AuthConfig,
    pub geocoding: GeocodingConfig,
    pub logging: LoggingConfig,
}

impl Config {
    pub fn load_and_validate(root: &Path) -> Result<ValidatedConfig, ConfigError> {
        let path = root.join(CONFIG_FILE_NAME);
        let raw = fs::read_to_string(&path)
            .map_err(|err| ConfigError::LoadError(format!("{}: {}", path.display(), err)))?;
        let config: Config = serde_yaml::from_str(&raw)
            .map_err(|err| ConfigError::LoadError(format!("{}: {}", path.display(), err)))?;
        config.validate()
    }

    pub fn validate(self) -> Result<ValidatedConfig, ConfigError> {
        if self.server.workers == 0 {
            return Err(ConfigError::ValidationError(
                "server.workers must be at least 1".to_string(),
            ));
        }
        if self.provider.url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "provider.url is required".to_string(),
            ));
        }
        if !self.provider.url.starts_with("http://") && !self.provider.url.starts_with("https://") {
            return Err(ConfigError::ValidationError(
                "provider.url must be an http(s) URL".to_string(),
            ));
        }
        if self.provider.anon_key.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "provider.anon_key is required".to_string(),
            ));
        }
        if self.provider.service_role_key.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "provider.service_role_key is required".to_string(),
            ));
        }
        if self.provider.storage_bucket.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "provider.storage_bucket is required".to_string(),
            ));
        }
        if self.auth.cookie_name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "auth.cookie_name is required".to_string(),
            ));
        }
        if self.auth.session_hours <= 0 {
            return Err(ConfigError::ValidationError(
                "auth.session_hours must be positive".to_string(),
            ));
        }

        let mut provider = self.provider;
        provider.url = provider.url.trim_end_matches('/').to_string();

        Ok(ValidatedConfig {
            server: self.server,
            app: self.app,
            provider,
            auth: self.auth,
            geocoding: self.geocoding,
            logging: self.logging,
        })
    }

    /// Starter config written on first run so the operator only has to fill
    /// in the provider credentials.
    pub fn starter_yaml() -> String {
        concat!(
            "# Wanderlist configuration\n",
            "server:\n",
            "  host: 127.0.0.1\n",
            "  port: 8080\n",
            "  workers: 2\n",
            "app:\n",
            "  name: Wanderlist\n",
            "  description: Places worth going back for\n",
            "provider:\n",
            "  url: https://YOUR-PROJECT.example.co\n",
            "  anon_key: \"\"\n",
            "  service_role_key: \"\"\n",
            "  storage_bucket: visit-images\n",
            "auth:\n",
            "  cookie_name: wanderlist_auth\n",
            "  cookie_secure: false\n",
            "  session_hours: 168\n",
            "logging:\n",
            "  level: info\n",
        )
        .to_string()
    }
}
