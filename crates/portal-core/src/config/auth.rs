//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub jwt_access_ttl_minutes: u64,
    /// Refresh token TTL in hours.
    #[serde(default = "default_refresh_ttl")]
    pub jwt_refresh_ttl_hours: u64,
    /// Bootstrap owner account created when the directory is empty.
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_access_ttl_minutes: default_access_ttl(),
            jwt_refresh_ttl_hours: default_refresh_ttl(),
            bootstrap: BootstrapConfig::default(),
        }
    }
}

/// Bootstrap owner account settings.
///
/// On startup, if the user directory is empty, an `owner` account is
/// created from these values so the portal is administrable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Email address of the bootstrap owner.
    #[serde(default = "default_bootstrap_email")]
    pub email: String,
    /// Initial password of the bootstrap owner.
    #[serde(default = "default_bootstrap_password")]
    pub password: String,
    /// Display name of the bootstrap owner.
    #[serde(default = "default_bootstrap_name")]
    pub display_name: String,
    /// Home region code of the bootstrap owner.
    #[serde(default = "default_bootstrap_region")]
    pub region: String,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            email: default_bootstrap_email(),
            password: default_bootstrap_password(),
            display_name: default_bootstrap_name(),
            region: default_bootstrap_region(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_access_ttl() -> u64 {
    15
}

fn default_refresh_ttl() -> u64 {
    24
}

fn default_bootstrap_email() -> String {
    "owner@kizuna.example".to_string()
}

fn default_bootstrap_password() -> String {
    "change-me-on-first-login".to_string()
}

fn default_bootstrap_name() -> String {
    "Portal Owner".to_string()
}

fn default_bootstrap_region() -> String {
    "TYO".to_string()
}
