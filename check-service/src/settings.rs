use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::upload::{ParseLimitError, UploadLimit};

// Evaluate env vars only once
lazy_static::lazy_static! {
    static ref ENV_SETTINGS: Result<Settings, SettingsError> = Settings::from_env();
}

/// Settings read from the process environment.
pub fn current() -> Result<&'static Settings, SettingsError> {
    ENV_SETTINGS.as_ref().map_err(Clone::clone)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("PORT must be a port number, got '{0}'")]
    InvalidPort(String),
    #[error("unknown DEPLOY_TARGET '{0}', expected vercel, railway, render or fly")]
    UnknownTarget(String),
    #[error("MAX_UPLOAD_SIZE: {0}")]
    InvalidUploadSize(#[from] ParseLimitError),
}

/// Hosting platform the service is deployed on; decides the default
/// upload ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeployTarget {
    #[default]
    Vercel,
    Railway,
    Render,
    Fly,
}

impl DeployTarget {
    pub fn upload_limit(self) -> UploadLimit {
        match self {
            DeployTarget::Vercel => UploadLimit::STANDARD,
            DeployTarget::Railway | DeployTarget::Render | DeployTarget::Fly => {
                UploadLimit::EXTENDED
            }
        }
    }
}

impl FromStr for DeployTarget {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vercel" => Ok(DeployTarget::Vercel),
            "railway" => Ok(DeployTarget::Railway),
            "render" => Ok(DeployTarget::Render),
            "fly" | "fly.io" | "flyio" => Ok(DeployTarget::Fly),
            _ => Err(SettingsError::UnknownTarget(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AllowedOrigins {
    #[default]
    Any,
    List(Vec<String>),
}

impl AllowedOrigins {
    fn parse(raw: &str) -> Self {
        let origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();
        if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
            AllowedOrigins::Any
        } else {
            AllowedOrigins::List(origins)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub deploy_target: DeployTarget,
    pub upload_limit: UploadLimit,
    pub public_folder: PathBuf,
    pub allowed_origins: AllowedOrigins,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            host: "0.0.0.0".to_string(),
            port: 8080,
            deploy_target: DeployTarget::default(),
            upload_limit: DeployTarget::default().upload_limit(),
            public_folder: PathBuf::from("public"),
            allowed_origins: AllowedOrigins::Any,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from a variable lookup. Unset or blank variables
    /// keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut settings = Settings::default();

        if let Some(host) = var("HOST") {
            settings.host = host.trim().to_string();
        }
        if let Some(port) = var("PORT") {
            settings.port = port
                .trim()
                .parse()
                .map_err(|_| SettingsError::InvalidPort(port.clone()))?;
        }
        if let Some(target) = var("DEPLOY_TARGET") {
            settings.deploy_target = target.parse()?;
        }
        settings.upload_limit = match var("MAX_UPLOAD_SIZE") {
            Some(size) => size.parse()?,
            None => settings.deploy_target.upload_limit(),
        };
        if let Some(folder) = var("PUBLIC_FOLDER") {
            settings.public_folder = PathBuf::from(folder);
        }
        if let Some(origins) = var("CORS_ALLOWED_ORIGINS") {
            settings.allowed_origins = AllowedOrigins::parse(&origins);
        }

        Ok(settings)
    }
}
