use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::warn;

use crate::service::ServiceId;

/// One credential value a call site may need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialKey {
    GithubToken,
    IpstackAccessKey,
    DarkskySecretKey,
    WatsonUsername,
    WatsonPassword,
}

impl CredentialKey {
    pub const fn all() -> &'static [CredentialKey] {
        &[
            CredentialKey::GithubToken,
            CredentialKey::IpstackAccessKey,
            CredentialKey::DarkskySecretKey,
            CredentialKey::WatsonUsername,
            CredentialKey::WatsonPassword,
        ]
    }

    /// Environment variable that overrides the file value.
    pub fn env_var(&self) -> &'static str {
        match self {
            CredentialKey::GithubToken => "GITHUB_TOKEN",
            CredentialKey::IpstackAccessKey => "IPSTACK_SK",
            CredentialKey::DarkskySecretKey => "DARKSKY_SK",
            CredentialKey::WatsonUsername => "WATSON_USERNAME",
            CredentialKey::WatsonPassword => "WATSON_PASSWORD",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CredentialKey::GithubToken => "GitHub access token",
            CredentialKey::IpstackAccessKey => "ipstack access key",
            CredentialKey::DarkskySecretKey => "Dark Sky secret key",
            CredentialKey::WatsonUsername => "Watson username",
            CredentialKey::WatsonPassword => "Watson password",
        }
    }

    pub fn service(&self) -> ServiceId {
        match self {
            CredentialKey::GithubToken => ServiceId::Github,
            CredentialKey::IpstackAccessKey => ServiceId::Ipstack,
            CredentialKey::DarkskySecretKey => ServiceId::Darksky,
            CredentialKey::WatsonUsername | CredentialKey::WatsonPassword => ServiceId::Watson,
        }
    }

    /// Whether the value should be masked when typed in.
    pub fn is_secret(&self) -> bool {
        !matches!(self, CredentialKey::WatsonUsername)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpstackConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DarkskyConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatsonConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Process-wide credentials, built once at startup and then only read.
///
/// Example TOML:
/// ```toml
/// timeout_secs = 30
///
/// [watson]
/// username = "..."
/// password = "..."
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Optional per-request timeout for the HTTP transport.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    pub github: GithubConfig,
    pub ipstack: IpstackConfig,
    pub darksky: DarkskyConfig,
    pub watson: WatsonConfig,
}

pub const TIMEOUT_ENV_VAR: &str = "APICALL_TIMEOUT_SECS";

impl Config {
    /// Config file (if any) overlaid with the process environment.
    pub fn load() -> Result<Self> {
        Self::load_file()?.with_env(std::env::vars())
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load_file() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "apicall", "apicall")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Overlay environment variables; non-empty values win over the file.
    pub fn with_env<I>(mut self, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (name, value) in vars {
            if value.is_empty() {
                continue;
            }

            if name == TIMEOUT_ENV_VAR {
                let secs = value
                    .parse()
                    .with_context(|| format!("{TIMEOUT_ENV_VAR} must be a whole number of seconds, got '{value}'"))?;
                self.timeout_secs = Some(secs);
            } else if let Some(key) = CredentialKey::all().iter().find(|k| k.env_var() == name) {
                self.set_credential(*key, value);
            }
        }

        Ok(self)
    }

    pub fn credential(&self, key: CredentialKey) -> Option<&str> {
        let slot = match key {
            CredentialKey::GithubToken => &self.github.token,
            CredentialKey::IpstackAccessKey => &self.ipstack.access_key,
            CredentialKey::DarkskySecretKey => &self.darksky.secret_key,
            CredentialKey::WatsonUsername => &self.watson.username,
            CredentialKey::WatsonPassword => &self.watson.password,
        };
        slot.as_deref()
    }

    /// Like [`credential`](Self::credential), but an unset value becomes
    /// empty; the remote service then rejects the request.
    pub fn credential_or_empty(&self, key: CredentialKey) -> &str {
        self.credential(key).unwrap_or_else(|| {
            warn!(
                credential = key.env_var(),
                service = %key.service(),
                "credential not configured; sending an empty value"
            );
            ""
        })
    }

    pub fn set_credential(&mut self, key: CredentialKey, value: String) {
        let slot = match key {
            CredentialKey::GithubToken => &mut self.github.token,
            CredentialKey::IpstackAccessKey => &mut self.ipstack.access_key,
            CredentialKey::DarkskySecretKey => &mut self.darksky.secret_key,
            CredentialKey::WatsonUsername => &mut self.watson.username,
            CredentialKey::WatsonPassword => &mut self.watson.password,
        };
        *slot = Some(value);
    }

    pub fn is_service_configured(&self, service: ServiceId) -> bool {
        service.credential_keys().iter().all(|key| self.credential(*key).is_some())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
