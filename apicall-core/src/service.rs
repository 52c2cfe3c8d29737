use crate::config::CredentialKey;
use std::{convert::TryFrom, fmt};

pub mod darksky;
pub mod github;
pub mod ipstack;
pub mod watson;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceId {
    Github,
    Ipstack,
    Darksky,
    Watson,
}

impl ServiceId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceId::Github => "github",
            ServiceId::Ipstack => "ipstack",
            ServiceId::Darksky => "darksky",
            ServiceId::Watson => "watson",
        }
    }

    pub const fn all() -> &'static [ServiceId] {
        &[ServiceId::Github, ServiceId::Ipstack, ServiceId::Darksky, ServiceId::Watson]
    }

    pub fn credential_keys(&self) -> &'static [CredentialKey] {
        match self {
            ServiceId::Github => &[CredentialKey::GithubToken],
            ServiceId::Ipstack => &[CredentialKey::IpstackAccessKey],
            ServiceId::Darksky => &[CredentialKey::DarkskySecretKey],
            ServiceId::Watson => &[CredentialKey::WatsonUsername, CredentialKey::WatsonPassword],
        }
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ServiceId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "github" => Ok(ServiceId::Github),
            "ipstack" => Ok(ServiceId::Ipstack),
            "darksky" => Ok(ServiceId::Darksky),
            "watson" => Ok(ServiceId::Watson),
            _ => Err(anyhow::anyhow!(
                "Unknown service '{value}'. Supported services: github, ipstack, darksky, watson."
            )),
        }
    }
}

/// Base URLs of the four services. Tests point these at a mock server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub github: String,
    pub ipstack: String,
    pub darksky: String,
    pub watson: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            github: github::DEFAULT_BASE_URL.to_string(),
            ipstack: ipstack::DEFAULT_BASE_URL.to_string(),
            darksky: darksky::DEFAULT_BASE_URL.to_string(),
            watson: watson::DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Every service served from one base URL.
    pub fn all_at(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/').to_string();
        Self {
            github: base.clone(),
            ipstack: base.clone(),
            darksky: base.clone(),
            watson: base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_id_as_str_roundtrip() {
        for id in ServiceId::all() {
            let parsed = ServiceId::try_from(id.as_str()).expect("roundtrip should succeed");
            assert_eq!(*id, parsed);
        }
    }

    #[test]
    fn service_id_is_case_insensitive() {
        assert_eq!(ServiceId::try_from("GitHub").unwrap(), ServiceId::Github);
    }

    #[test]
    fn unknown_service_error() {
        let err = ServiceId::try_from("openweather").unwrap_err();
        assert!(err.to_string().contains("Unknown service"));
    }

    #[test]
    fn every_credential_belongs_to_its_service() {
        for id in ServiceId::all() {
            for key in id.credential_keys() {
                assert_eq!(key.service(), *id);
            }
        }
    }

    #[test]
    fn all_at_trims_trailing_slash() {
        let endpoints = Endpoints::all_at("http://127.0.0.1:9999/");
        assert_eq!(endpoints.watson, "http://127.0.0.1:9999");
        assert_eq!(endpoints.github, endpoints.darksky);
    }
}
