use std::sync::Arc;

use crate::config::errors::ApplicationError;
use crate::config::EnvironmentProvider;

#[derive(Debug, Clone)]
pub struct ConfigValue {
    pub value: String,
    pub source: ConfigValueSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValueSource {
    EnvironmentVariable { name: String },
    Default,
}

/// Configuration specification with environment override → default priority
pub struct ConfigSpec {
    env_provider: Arc<dyn EnvironmentProvider + Send + Sync>,
    pub env_override: Option<String>,
    pub default_value: Option<String>,
    pub min_length: Option<usize>,
    pub validator: Option<fn(&str) -> Result<(), String>>,
}

impl ConfigSpec {
    pub fn new(env_provider: Arc<dyn EnvironmentProvider + Send + Sync>) -> Self {
        Self {
            env_provider,
            env_override: None,
            default_value: None,
            min_length: None,
            validator: None,
        }
    }

    pub fn env_override(mut self, name: &str) -> Self {
        self.env_override = Some(name.to_string());
        self
    }

    pub fn default_value(mut self, value: &str) -> Self {
        self.default_value = Some(value.to_string());
        self
    }

    pub fn min_length(mut self, length: usize) -> Self {
        self.min_length = Some(length);
        self
    }

    pub fn validator(mut self, f: fn(&str) -> Result<(), String>) -> Self {
        self.validator = Some(f);
        self
    }

    /// Load a setting value with source tracking
    ///
    /// The environment variable wins over the default. Both are validated
    /// against the same rules.
    pub fn load_setting_with_source(&self) -> Result<ConfigValue, ApplicationError> {
        let setting_name = self.setting_name();

        if let Some(env_var) = &self.env_override {
            if let Some(value) = self.env_provider.get_var(env_var) {
                self.validate_value(&value, env_var)?;

                return Ok(ConfigValue {
                    value,
                    source: ConfigValueSource::EnvironmentVariable {
                        name: env_var.clone(),
                    },
                });
            }
        }

        if let Some(default) = &self.default_value {
            self.validate_value(default, &setting_name)?;

            return Ok(ConfigValue {
                value: default.clone(),
                source: ConfigValueSource::Default,
            });
        }

        Ok(ConfigValue {
            value: String::new(),
            source: ConfigValueSource::Default,
        })
    }

    /// Validate a setting value according to the ConfigSpec rules
    pub fn validate_value(&self, value: &str, setting_name: &str) -> Result<(), ApplicationError> {
        if let Some(min_len) = self.min_length {
            if value.len() < min_len {
                return Err(ApplicationError::InvalidSetting {
                    setting_name: setting_name.to_string(),
                    reason: format!("Value must be at least {} characters long", min_len),
                });
            }
        }

        if let Some(validator) = self.validator {
            validator(value).map_err(|reason| ApplicationError::InvalidSetting {
                setting_name: setting_name.to_string(),
                reason,
            })?;
        }

        Ok(())
    }

    fn setting_name(&self) -> String {
        self.env_override
            .clone()
            .unwrap_or_else(|| "unknown_setting".to_string())
    }
}

/// Type parsing utilities for configuration values
impl ConfigSpec {
    /// Parse an unsigned integer value from string
    pub fn parse_u64(value: &str, setting_name: &str) -> Result<u64, ApplicationError> {
        value.trim().parse::<u64>()
            .map_err(|e| ApplicationError::ParseError {
                setting_name: setting_name.to_string(),
                error: format!("Expected positive integer, got '{}': {}", value, e),
            })
    }

    /// Parse a port number from string with validation
    ///
    /// Validates that the port is in the valid range (1-65535).
    pub fn parse_port(value: &str, setting_name: &str) -> Result<u16, ApplicationError> {
        let port = value.trim().parse::<u16>()
            .map_err(|e| ApplicationError::ParseError {
                setting_name: setting_name.to_string(),
                error: format!("Expected port number (1-65535), got '{}': {}", value, e),
            })?;

        if port == 0 {
            return Err(ApplicationError::InvalidSetting {
                setting_name: setting_name.to_string(),
                reason: "Port number must be between 1 and 65535".to_string(),
            });
        }

        Ok(port)
    }
}

/// Range validation utilities
impl ConfigSpec {
    /// Validate an integer value is within the specified range
    pub fn validate_integer_range(value: &str, min: i64, max: i64) -> Result<(), String> {
        let parsed = value.trim().parse::<i64>()
            .map_err(|_| format!("Expected integer between {} and {}", min, max))?;

        if parsed < min || parsed > max {
            return Err(format!("Value {} is outside valid range {}-{}", parsed, min, max));
        }

        Ok(())
    }

    /// Validate a port number is within the specified range
    pub fn validate_port_range(value: &str, min: u16, max: u16) -> Result<(), String> {
        let parsed = value.trim().parse::<u16>()
            .map_err(|_| format!("Expected port number between {} and {}", min, max))?;

        if parsed < min || parsed > max {
            return Err(format!("Port {} is outside valid range {}-{}", parsed, min, max));
        }

        Ok(())
    }

    /// Validate a bind address: IPv4, bracketed IPv6 or a hostname
    ///
    /// Does not perform DNS resolution.
    pub fn validate_host_address(value: &str) -> Result<(), String> {
        if value.is_empty() {
            return Err("Host address cannot be empty".to_string());
        }

        if value.chars().any(char::is_whitespace) {
            return Err("Host address cannot contain whitespace characters".to_string());
        }

        if value.starts_with('[') {
            let inner = value.strip_prefix('[').and_then(|v| v.strip_suffix(']'));
            return match inner {
                Some(ipv6) if ipv6.parse::<std::net::Ipv6Addr>().is_ok() => Ok(()),
                _ => Err("Invalid IPv6 address format".to_string()),
            };
        }

        let looks_like_ipv4 = value.split('.').count() == 4
            && value.split('.').all(|part| part.chars().all(|c| c.is_ascii_digit()));
        if looks_like_ipv4 && value.parse::<std::net::Ipv4Addr>().is_err() {
            return Err(format!("Invalid IPv4 address: '{}'", value));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockEnvironment;

    fn env(vars: &[(&str, &str)]) -> Arc<dyn EnvironmentProvider + Send + Sync> {
        Arc::new(MockEnvironment::empty().with_vars(vars))
    }

    #[test]
    fn test_load_setting_with_source_env_override() {
        let spec = ConfigSpec::new(env(&[("BULK_RANGE_LIMIT", "250")]))
            .env_override("BULK_RANGE_LIMIT")
            .default_value("1000");

        let loaded = spec.load_setting_with_source().unwrap();
        assert_eq!(loaded.value, "250");
        assert_eq!(
            loaded.source,
            ConfigValueSource::EnvironmentVariable { name: "BULK_RANGE_LIMIT".to_string() }
        );
    }

    #[test]
    fn test_load_setting_with_source_default() {
        let spec = ConfigSpec::new(env(&[]))
            .env_override("BULK_RANGE_LIMIT")
            .default_value("1000");

        let loaded = spec.load_setting_with_source().unwrap();
        assert_eq!(loaded.value, "1000");
        assert_eq!(loaded.source, ConfigValueSource::Default);
    }

    #[test]
    fn test_min_length_rejects_blank_override() {
        let spec = ConfigSpec::new(env(&[("DATABASE_URL", "")]))
            .env_override("DATABASE_URL")
            .default_value("sqlite://ipam.db?mode=rwc")
            .min_length(1);

        match spec.load_setting_with_source() {
            Err(ApplicationError::InvalidSetting { setting_name, .. }) => {
                assert_eq!(setting_name, "DATABASE_URL");
            }
            other => panic!("Expected InvalidSetting, got: {:?}", other),
        }
    }

    #[test]
    fn test_load_setting_with_source_validation() {
        let spec = ConfigSpec::new(env(&[("PORT", "70000")]))
            .env_override("PORT")
            .validator(|v| ConfigSpec::validate_port_range(v, 1, 65535));

        assert!(spec.load_setting_with_source().is_err());
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(ConfigSpec::parse_port("8080", "PORT").unwrap(), 8080);
        assert!(ConfigSpec::parse_port("0", "PORT").is_err());
        assert!(ConfigSpec::parse_port("http", "PORT").is_err());
    }

    #[test]
    fn test_range_validators() {
        assert!(ConfigSpec::validate_integer_range("1000", 1, 65536).is_ok());
        assert!(ConfigSpec::validate_integer_range("0", 1, 65536).is_err());
        assert!(ConfigSpec::validate_integer_range("lots", 1, 65536).is_err());
        assert!(ConfigSpec::validate_port_range("3000", 1, 65535).is_ok());
    }

    #[test]
    fn test_validate_host_address() {
        assert!(ConfigSpec::validate_host_address("0.0.0.0").is_ok());
        assert!(ConfigSpec::validate_host_address("localhost").is_ok());
        assert!(ConfigSpec::validate_host_address("[::1]").is_ok());
        assert!(ConfigSpec::validate_host_address("256.0.0.1").is_err());
        assert!(ConfigSpec::validate_host_address("").is_err());
        assert!(ConfigSpec::validate_host_address("local host").is_err());
        assert!(ConfigSpec::validate_host_address("[]").is_err());
    }
}
