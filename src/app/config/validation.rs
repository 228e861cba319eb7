use super::{Config, ConfigError};
use crate::domain::LevelTable;

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.logfile.as_os_str().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "A log file must be given".to_string(),
            ));
        }

        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(ConfigError::InvalidConfig(format!(
                "Threshold must be a non-negative number of seconds, got {}",
                self.threshold
            )));
        }

        if !LevelTable::standard().contains(&self.severity) {
            return Err(ConfigError::InvalidConfig(format!(
                "Unknown severity '{}'",
                self.severity
            )));
        }

        if self.top == 0 {
            return Err(ConfigError::InvalidConfig(
                "Top list length must be greater than 0".to_string(),
            ));
        }

        if self.year_prefix.is_empty() {
            return Err(ConfigError::InvalidConfig(
                "Year prefix cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
