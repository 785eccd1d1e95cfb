// SPDX-FileCopyrightText: 2026 Copydeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes.

use crate::diagnostic::ConfigError;
use crate::model::CopydeckConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)`
/// with all collected validation errors (does not fail fast).
pub fn validate_config(config: &CopydeckConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let base_url = config.api.base_url.trim();
    if base_url.is_empty() {
        errors.push(ConfigError::Validation {
            message: "api.base_url must not be empty".to_string(),
        });
    } else if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        errors.push(ConfigError::Validation {
            message: format!("api.base_url `{base_url}` must start with http:// or https://"),
        });
    }

    if config.api.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "api.timeout_secs must be at least 1".to_string(),
        });
    }

    if config.storage.path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.path must not be empty".to_string(),
        });
    }

    if config.generation.count == 0 {
        errors.push(ConfigError::Validation {
            message: "generation.count must be at least 1".to_string(),
        });
    }

    if config.studio.default_platform.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "studio.default_platform must not be empty".to_string(),
        });
    }

    if config.studio.default_format.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "studio.default_format must not be empty".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&CopydeckConfig::default()).is_ok());
    }

    #[test]
    fn rejects_schemeless_base_url() {
        let mut config = CopydeckConfig::default();
        config.api.base_url = "localhost:3333/api".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("api.base_url"));
    }

    #[test]
    fn collects_all_failures() {
        let mut config = CopydeckConfig::default();
        config.api.base_url = String::new();
        config.storage.path = "  ".to_string();
        config.generation.count = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
