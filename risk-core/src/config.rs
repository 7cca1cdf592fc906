use std::str::FromStr;

pub const DEFAULT_API_BASE: &str = "http://localhost:5000/api";

/// Which build of the dashboard is running.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Login, registration, history and credentialed requests.
    #[default]
    SessionAware,
    /// Anonymous predictions only.
    Guest,
}

impl Variant {
    pub fn sends_credentials(self) -> bool {
        matches!(self, Variant::SessionAware)
    }

    pub fn has_accounts(self) -> bool {
        matches!(self, Variant::SessionAware)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown client variant '{0}' (expected 'session' or 'guest')")]
    UnknownVariant(String),
}

impl FromStr for Variant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "session" | "session-aware" | "auth" => Ok(Variant::SessionAware),
            "guest" | "anonymous" => Ok(Variant::Guest),
            other => Err(ConfigError::UnknownVariant(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base: String,
    pub variant: Variant,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.into(),
            variant: Variant::default(),
        }
    }
}

impl ClientConfig {
    /// Reads `RISK_API_BASE` and `RISK_CLIENT_VARIANT` as baked in at compile
    /// time. The browser has no process environment to consult at runtime.
    pub fn from_build_env() -> Self {
        Self::from_values(option_env!("RISK_API_BASE"), option_env!("RISK_CLIENT_VARIANT"))
    }

    pub fn from_values(api_base: Option<&str>, variant: Option<&str>) -> Self {
        let defaults = Self::default();
        let api_base = api_base
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base);
        let variant = match variant.map(Variant::from_str) {
            Some(Ok(v)) => v,
            Some(Err(e)) => {
                tracing::warn!("{e}; falling back to {:?}", defaults.variant);
                defaults.variant
            }
            None => defaults.variant,
        };
        Self { api_base, variant }
    }

    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let config = ClientConfig::from_values(None, None);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.variant, Variant::SessionAware);
    }

    #[test]
    fn overrides_trim_trailing_slash() {
        let config = ClientConfig::from_values(Some("https://risk.example.org/api/"), Some("guest"));
        assert_eq!(config.api_base, "https://risk.example.org/api");
        assert_eq!(config.variant, Variant::Guest);
        assert_eq!(
            config.url("/predict/technical"),
            "https://risk.example.org/api/predict/technical"
        );
    }

    #[test]
    fn unknown_variant_falls_back() {
        assert!("desktop".parse::<Variant>().is_err());
        let config = ClientConfig::from_values(Some("  "), Some("desktop"));
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.variant, Variant::SessionAware);
    }

    #[test]
    fn only_session_variant_sends_credentials() {
        assert!(Variant::SessionAware.sends_credentials());
        assert!(!Variant::Guest.sends_credentials());
    }
}
