//! Configuration validation rules.
//!
//! - `service_url`, when set, must be an absolute http(s) URL
//! - `timeout_secs` must be positive

use reqwest::Url;

use crate::config::schema::AppConfig;
use crate::error::{EvfieldError, Result};

/// Validate a configuration, reporting every problem at once.
pub fn validate(config: &AppConfig) -> Result<()> {
    let mut problems = Vec::new();

    if let Some(url) = &config.service_url {
        match Url::parse(url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            Ok(parsed) => problems.push(format!(
                "service_url '{}' must use http or https, not '{}'",
                url,
                parsed.scheme()
            )),
            Err(e) => problems.push(format!("service_url '{}' is not a URL: {}", url, e)),
        }
    }

    if config.timeout_secs == 0 {
        problems.push("timeout_secs must be greater than 0".to_string());
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(EvfieldError::ConfigValidationError {
            message: problems.join("; "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate(&AppConfig::default()).is_ok());
    }

    #[test]
    fn https_url_is_valid() {
        let config = AppConfig {
            service_url: Some("https://collector.example.com/api".to_string()),
            ..AppConfig::default()
        };
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn reports_all_problems() {
        let config = AppConfig {
            service_url: Some("ftp://example.com".to_string()),
            timeout_secs: 0,
            ..AppConfig::default()
        };

        let message = validate(&config).unwrap_err().to_string();

        assert!(message.contains("http or https"));
        assert!(message.contains("timeout_secs"));
    }

    #[test]
    fn relative_url_is_rejected() {
        let config = AppConfig {
            service_url: Some("/api".to_string()),
            ..AppConfig::default()
        };
        assert!(validate(&config)
            .unwrap_err()
            .to_string()
            .contains("not a URL"));
    }
}
