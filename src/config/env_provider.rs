#[cfg(test)]
use std::collections::HashMap;

/// Source of environment variables for settings and logging
///
/// Tests inject a `MockEnvironment` instead of mutating the process
/// environment, which parallel tests would otherwise race on.
pub trait EnvironmentProvider {
    fn get_var(&self, key: &str) -> Option<String>;
}

/// Reads from the process environment (after `.env` has been applied)
pub struct SystemEnvironment;

impl EnvironmentProvider for SystemEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// In-memory environment for tests
#[cfg(test)]
#[derive(Default)]
pub struct MockEnvironment {
    vars: HashMap<String, String>,
}

#[cfg(test)]
impl MockEnvironment {
    pub fn new(vars: HashMap<String, String>) -> Self {
        Self { vars }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_vars(mut self, vars: &[(&str, &str)]) -> Self {
        for (key, value) in vars {
            self.vars.insert(key.to_string(), value.to_string());
        }
        self
    }
}

#[cfg(test)]
impl EnvironmentProvider for MockEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_environment_reads_process_env() {
        let provider = SystemEnvironment;

        assert!(provider.get_var("IPAM_SURELY_UNSET_VARIABLE_4711").is_none());
        if let Ok(path) = std::env::var("PATH") {
            assert_eq!(provider.get_var("PATH"), Some(path));
        }
    }

    #[test]
    fn test_mock_environment_provider() {
        let provider = MockEnvironment::empty()
            .with_var("DATABASE_URL", "sqlite::memory:")
            .with_vars(&[("HOST", "127.0.0.1"), ("PORT", "8080")]);

        assert_eq!(provider.get_var("DATABASE_URL"), Some("sqlite::memory:".to_string()));
        assert_eq!(provider.get_var("PORT"), Some("8080".to_string()));
        assert_eq!(provider.get_var("BULK_RANGE_LIMIT"), None);
    }

    #[test]
    fn test_mock_environment_later_value_wins() {
        let provider = MockEnvironment::new(HashMap::from([
            ("PORT".to_string(), "3000".to_string()),
        ]))
        .with_var("PORT", "4000");

        assert_eq!(provider.get_var("PORT"), Some("4000".to_string()));
    }
}
