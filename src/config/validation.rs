use crate::config::types::{Config, OutputConfig, RequestConfig, SearchConfig};
use crate::selector::{SelectorSpec, SelectorTree, PRICE_FIELD};
use crate::ConfigError;
use std::time::Duration;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_search_config(&config.search)?;
    validate_request_config(&config.request)?;
    validate_selectors(&config.selectors)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the search section
fn validate_search_config(config: &SearchConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.url_base)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid url-base: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "url-base must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if config.query.trim().is_empty() {
        return Err(ConfigError::Validation("query cannot be empty".to_string()));
    }

    if config.pages < 1 {
        return Err(ConfigError::Validation(format!(
            "pages must be >= 1, got {}",
            config.pages
        )));
    }

    if !config.delay_min.is_finite() || !config.delay_max.is_finite() {
        return Err(ConfigError::Validation(
            "delay-min and delay-max must be finite".to_string(),
        ));
    }

    if config.delay_min < 0.0 || config.delay_min > config.delay_max {
        return Err(ConfigError::Validation(format!(
            "delay range must satisfy 0 <= delay-min <= delay-max, got {}..{}",
            config.delay_min, config.delay_max
        )));
    }

    if Duration::try_from_secs_f64(config.delay_max).is_err() {
        return Err(ConfigError::Validation(format!(
            "delay-max is too large, got {}",
            config.delay_max
        )));
    }

    Ok(())
}

/// Validates request settings
fn validate_request_config(config: &RequestConfig) -> Result<(), ConfigError> {
    if config.timeout_ms == 0 {
        return Err(ConfigError::Validation(
            "timeout-ms must be greater than 0".to_string(),
        ));
    }

    if let Some(agent) = &config.user_agent {
        if agent.trim().is_empty() {
            return Err(ConfigError::Validation(
                "user-agent cannot be empty when set".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates the selector tree
///
/// A tree without a price selector is accepted with a warning: every item
/// block is then dropped and the run produces no records.
fn validate_selectors(tree: &SelectorTree) -> Result<(), ConfigError> {
    validate_selector("container", &tree.container)?;

    for (field, spec) in &tree.fields {
        validate_selector(field, spec)?;
    }

    if tree.field(PRICE_FIELD).is_none() {
        tracing::warn!("No '{}' selector configured; no records will be kept", PRICE_FIELD);
    }

    Ok(())
}

fn validate_selector(field: &str, spec: &SelectorSpec) -> Result<(), ConfigError> {
    if spec.tag.is_empty() {
        return Err(ConfigError::InvalidSelector {
            field: field.to_string(),
            message: "tag cannot be empty".to_string(),
        });
    }

    if !spec
        .tag
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return Err(ConfigError::InvalidSelector {
            field: field.to_string(),
            message: format!("tag '{}' is not a plain element name", spec.tag),
        });
    }

    if spec.attrs.keys().any(|name| name.trim().is_empty()) {
        return Err(ConfigError::InvalidSelector {
            field: field.to_string(),
            message: "attribute names cannot be empty".to_string(),
        });
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    if config.file_prefix.is_empty() || config.file_prefix.contains(['/', '\\']) {
        return Err(ConfigError::Validation(format!(
            "file-prefix must be a non-empty file name, got '{}'",
            config.file_prefix
        )));
    }

    Ok(())
}
