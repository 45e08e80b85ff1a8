use std::fmt;
use std::sync::Arc;
use crate::config::errors::ApplicationError;
use crate::config::config_spec::ConfigSpec;
use crate::config::EnvironmentProvider;

/// Bootstrap settings for infrastructure and engine limits
pub struct BootstrapSettings {
    database_url: String,
    audit_database_url: String,
    server_host: String,
    server_port: u16,
    bulk_range_limit: u64,
    audit_page_size_max: u64,
}

impl BootstrapSettings {
    /// Load bootstrap settings from environment variables using ConfigSpec
    pub fn from_env_provider(env_provider: Arc<dyn EnvironmentProvider + Send + Sync>) -> Result<Self, ApplicationError> {
        let database_url_spec = ConfigSpec::new(env_provider.clone())
            .env_override("DATABASE_URL")
            .default_value("sqlite://ipam.db?mode=rwc")
            .min_length(1);

        let audit_database_url_spec = ConfigSpec::new(env_provider.clone())
            .env_override("AUDIT_DATABASE_URL")
            .default_value("sqlite://audit.db?mode=rwc")
            .min_length(1);

        let host_spec = ConfigSpec::new(env_provider.clone())
            .env_override("HOST")
            .default_value("0.0.0.0")
            .validator(ConfigSpec::validate_host_address);

        let port_spec = ConfigSpec::new(env_provider.clone())
            .env_override("PORT")
            .default_value("3000")
            .validator(|value| ConfigSpec::validate_port_range(value, 1, 65535));

        let bulk_range_limit_spec = ConfigSpec::new(env_provider.clone())
            .env_override("BULK_RANGE_LIMIT")
            .default_value("1000")
            .validator(|value| ConfigSpec::validate_integer_range(value, 1, 65536));

        let audit_page_size_spec = ConfigSpec::new(env_provider)
            .env_override("AUDIT_PAGE_SIZE_MAX")
            .default_value("100")
            .validator(|value| ConfigSpec::validate_integer_range(value, 1, 10_000));

        let database_url = database_url_spec.load_setting_with_source()?.value;
        let audit_database_url = audit_database_url_spec.load_setting_with_source()?.value;
        let server_host = host_spec.load_setting_with_source()?.value;

        let port_value = port_spec.load_setting_with_source()?.value;
        let server_port = ConfigSpec::parse_port(&port_value, "PORT")?;

        let limit_value = bulk_range_limit_spec.load_setting_with_source()?.value;
        let bulk_range_limit = ConfigSpec::parse_u64(&limit_value, "BULK_RANGE_LIMIT")?;

        let page_value = audit_page_size_spec.load_setting_with_source()?.value;
        let audit_page_size_max = ConfigSpec::parse_u64(&page_value, "AUDIT_PAGE_SIZE_MAX")?;

        Ok(Self {
            database_url,
            audit_database_url,
            server_host,
            server_port,
            bulk_range_limit,
            audit_page_size_max,
        })
    }

    /// Convenience method that uses the system environment provider
    pub fn from_env() -> Result<Self, ApplicationError> {
        use crate::config::SystemEnvironment;
        Self::from_env_provider(Arc::new(SystemEnvironment))
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn audit_database_url(&self) -> &str {
        &self.audit_database_url
    }

    pub fn server_host(&self) -> &str {
        &self.server_host
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Largest address range a single bulk call may cover
    pub fn bulk_range_limit(&self) -> u64 {
        self.bulk_range_limit
    }

    pub fn audit_page_size_max(&self) -> u64 {
        self.audit_page_size_max
    }
}

impl fmt::Debug for BootstrapSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootstrapSettings")
            .field("database_url", &self.database_url)
            .field("audit_database_url", &self.audit_database_url)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("bulk_range_limit", &self.bulk_range_limit)
            .field("audit_page_size_max", &self.audit_page_size_max)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockEnvironment;
    use std::collections::HashMap;

    fn create_test_env(vars: HashMap<String, String>) -> Arc<MockEnvironment> {
        Arc::new(MockEnvironment::new(vars))
    }

    #[test]
    fn test_bootstrap_settings_with_all_vars() {
        let env_vars = HashMap::from([
            ("DATABASE_URL".to_string(), "sqlite://test.db".to_string()),
            ("AUDIT_DATABASE_URL".to_string(), "sqlite://test-audit.db".to_string()),
            ("HOST".to_string(), "127.0.0.1".to_string()),
            ("PORT".to_string(), "8080".to_string()),
            ("BULK_RANGE_LIMIT".to_string(), "256".to_string()),
            ("AUDIT_PAGE_SIZE_MAX".to_string(), "50".to_string()),
        ]);
        let env_provider = create_test_env(env_vars);

        let settings = BootstrapSettings::from_env_provider(env_provider).unwrap();

        assert_eq!(settings.database_url(), "sqlite://test.db");
        assert_eq!(settings.audit_database_url(), "sqlite://test-audit.db");
        assert_eq!(settings.server_address(), "127.0.0.1:8080");
        assert_eq!(settings.bulk_range_limit(), 256);
        assert_eq!(settings.audit_page_size_max(), 50);
    }

    #[test]
    fn test_bootstrap_settings_with_defaults() {
        let env_provider = create_test_env(HashMap::new());

        let settings = BootstrapSettings::from_env_provider(env_provider).unwrap();

        assert_eq!(settings.database_url(), "sqlite://ipam.db?mode=rwc");
        assert_eq!(settings.audit_database_url(), "sqlite://audit.db?mode=rwc");
        assert_eq!(settings.server_host(), "0.0.0.0");
        assert_eq!(settings.server_port(), 3000);
        assert_eq!(settings.bulk_range_limit(), 1000);
        assert_eq!(settings.audit_page_size_max(), 100);
    }

    #[test]
    fn test_bootstrap_settings_empty_database_url_fails_validation() {
        let env_vars = HashMap::from([
            ("DATABASE_URL".to_string(), "".to_string()),
        ]);
        let env_provider = create_test_env(env_vars);

        match BootstrapSettings::from_env_provider(env_provider) {
            Err(ApplicationError::InvalidSetting { setting_name, reason }) => {
                assert_eq!(setting_name, "DATABASE_URL");
                assert!(reason.contains("must be at least 1 characters long"));
            },
            other => panic!("Expected InvalidSetting for DATABASE_URL, got: {:?}", other),
        }
    }

    #[test]
    fn test_bootstrap_settings_empty_host_fails_validation() {
        let env_vars = HashMap::from([
            ("HOST".to_string(), "".to_string()),
        ]);
        let env_provider = create_test_env(env_vars);

        match BootstrapSettings::from_env_provider(env_provider) {
            Err(ApplicationError::InvalidSetting { setting_name, reason }) => {
                assert_eq!(setting_name, "HOST");
                assert!(reason.contains("cannot be empty"));
            },
            other => panic!("Expected InvalidSetting for HOST, got: {:?}", other),
        }
    }

    #[test]
    fn test_bootstrap_settings_invalid_port() {
        let env_vars = HashMap::from([
            ("PORT".to_string(), "not_a_number".to_string()),
        ]);
        let env_provider = create_test_env(env_vars);

        match BootstrapSettings::from_env_provider(env_provider) {
            Err(ApplicationError::InvalidSetting { setting_name, reason }) => {
                assert_eq!(setting_name, "PORT");
                assert!(reason.contains("Expected port number between 1 and 65535"));
            },
            other => panic!("Expected InvalidSetting for PORT, got: {:?}", other),
        }
    }

    #[test]
    fn test_bootstrap_settings_zero_port() {
        let env_vars = HashMap::from([
            ("PORT".to_string(), "0".to_string()),
        ]);
        let env_provider = create_test_env(env_vars);

        match BootstrapSettings::from_env_provider(env_provider) {
            Err(ApplicationError::InvalidSetting { setting_name, reason }) => {
                assert_eq!(setting_name, "PORT");
                assert!(reason.contains("outside valid range"));
            },
            other => panic!("Expected InvalidSetting error for zero PORT, got: {:?}", other),
        }
    }

    #[test]
    fn test_bootstrap_settings_bulk_range_limit_bounds() {
        for bad in ["0", "65537", "many"] {
            let env_vars = HashMap::from([
                ("BULK_RANGE_LIMIT".to_string(), bad.to_string()),
            ]);
            let env_provider = create_test_env(env_vars);

            match BootstrapSettings::from_env_provider(env_provider) {
                Err(ApplicationError::InvalidSetting { setting_name, .. }) => {
                    assert_eq!(setting_name, "BULK_RANGE_LIMIT");
                },
                other => panic!("Expected InvalidSetting for {}, got: {:?}", bad, other),
            }
        }

        let env_vars = HashMap::from([
            ("BULK_RANGE_LIMIT".to_string(), "65536".to_string()),
        ]);
        let settings = BootstrapSettings::from_env_provider(create_test_env(env_vars)).unwrap();
        assert_eq!(settings.bulk_range_limit(), 65536);
    }

    #[test]
    fn test_bootstrap_settings_ipv6_host() {
        let env_vars = HashMap::from([
            ("HOST".to_string(), "[::1]".to_string()),
            ("PORT".to_string(), "8080".to_string()),
        ]);
        let env_provider = create_test_env(env_vars);

        let settings = BootstrapSettings::from_env_provider(env_provider).unwrap();
        assert_eq!(settings.server_address(), "[::1]:8080");
    }
}
