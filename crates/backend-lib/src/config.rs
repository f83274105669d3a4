// ============================
// signup-backend-lib/src/config.rs
// ============================
//! Configuration management.
use std::net::SocketAddr;
use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use figment::{Figment, providers::{Env, Format, Serialized, Toml}};
use anyhow::Result;

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Data directory path for the flat-file account store
    pub data_dir: PathBuf,
    /// Log level
    pub log_level: String,
    /// Password requirements
    pub password_requirements: PasswordRequirements,
}

/// Password complexity requirements.
///
/// The lifecycle only mandates a non-empty password; everything beyond that
/// is deployment policy, so the defaults are permissive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordRequirements {
    /// Minimum password length
    pub min_length: usize,
    /// Require uppercase letters
    pub require_uppercase: bool,
    /// Require lowercase letters
    pub require_lowercase: bool,
    /// Require digits
    pub require_digit: bool,
    /// Require special characters
    pub require_special: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".parse().unwrap(),
            data_dir: PathBuf::from("data"),
            log_level: "info".to_string(),
            password_requirements: PasswordRequirements::default(),
        }
    }
}

impl Default for PasswordRequirements {
    fn default() -> Self {
        Self {
            min_length: 1,
            require_uppercase: false,
            require_lowercase: false,
            require_digit: false,
            require_special: false,
        }
    }
}

/// Load settings from various sources
pub fn load_settings() -> Result<Settings> {
    // Defaults first, then config file, then environment variables
    let settings = Figment::from(Serialized::defaults(Settings::default()))
        .merge(Toml::file("signup.toml"))
        .merge(Env::prefixed("SIGNUP_"))
        .extract()?;

    Ok(settings)
}
