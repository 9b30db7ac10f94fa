use std::{fs, path::Path};

use serde::Deserialize;

use crate::{MemoError, Result};

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MemoConfig {
    /// number of cache slots allocated up front, defaults to 0
    pub initial_capacity: usize,
    /// registry size at which entries of dropped cursors are pruned, must be > 0, defaults to 64
    pub registry_prune_threshold: usize,
}

impl Default for MemoConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 0,
            registry_prune_threshold: 64,
        }
    }
}

impl MemoConfig {
    pub fn create<T: AsRef<Path>>(path: T) -> Result<Self> {
        let data = fs::read_to_string(path.as_ref()).map_err(|e| MemoError::Config(format!("failed to load config file {:?}: {}", path.as_ref(), e)))?;

        Self::load_from_str(data.as_str())
    }

    pub fn load_from_str(toml_str: &str) -> Result<Self> {
        let config = toml::from_str::<MemoConfig>(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.registry_prune_threshold == 0 {
            return Err(MemoError::Config("registry_prune_threshold must be greater than 0".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::{MemoConfig, MemoError};

    #[test]
    fn test_config_deserialize() {
        let toml_str = r#"
        initial_capacity = 128
        registry_prune_threshold = 16
        "#;
        let config = MemoConfig::load_from_str(toml_str).unwrap();
        assert_eq!(config.initial_capacity, 128);
        assert_eq!(config.registry_prune_threshold, 16);
    }

    #[test]
    fn test_config_defaults_for_missing_keys() {
        let config = MemoConfig::load_from_str("initial_capacity = 4").unwrap();
        assert_eq!(config.initial_capacity, 4);
        assert_eq!(config.registry_prune_threshold, MemoConfig::default().registry_prune_threshold);

        assert_eq!(MemoConfig::load_from_str("").unwrap(), MemoConfig::default());
    }

    #[test]
    fn test_config_rejects_zero_threshold() {
        let err = MemoConfig::load_from_str("registry_prune_threshold = 0").unwrap_err();
        assert!(matches!(err, MemoError::Config(_)));
    }

    #[test]
    fn test_config_rejects_bad_toml() {
        let err = MemoConfig::load_from_str("initial_capacity = \"many\"").unwrap_err();
        assert!(matches!(err, MemoError::Config(_)));
    }

    #[test]
    fn test_config_missing_file() {
        let err = MemoConfig::create("/nonexistent/memoiter.toml").unwrap_err();
        assert!(matches!(err, MemoError::Config(_)));
    }
}
