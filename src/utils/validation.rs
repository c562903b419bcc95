use crate::utils::error::{LearnError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(LearnError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(LearnError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(LearnError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(LearnError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(LearnError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// A fraction that must lie strictly between 0 and 1, e.g. a test split size.
pub fn validate_unit_fraction(field_name: &str, value: f32) -> Result<()> {
    if !value.is_finite() || value <= 0.0 || value >= 1.0 {
        return Err(LearnError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be strictly between 0 and 1".to_string(),
        });
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(LearnError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_known_dataset(field_name: &str, name: &str, known: &[&str]) -> Result<()> {
    if known.contains(&name) {
        return Ok(());
    }
    Err(LearnError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: name.to_string(),
        reason: format!("Unknown bundled dataset. Available: {}", known.join(", ")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("dataset_url", "https://example.com/iris.csv").is_ok());
        assert!(validate_url("dataset_url", "http://example.com").is_ok());
        assert!(validate_url("dataset_url", "").is_err());
        assert!(validate_url("dataset_url", "not-a-url").is_err());
        assert!(validate_url("dataset_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_unit_fraction() {
        assert!(validate_unit_fraction("test_size", 0.25).is_ok());
        assert!(validate_unit_fraction("test_size", 0.0).is_err());
        assert!(validate_unit_fraction("test_size", 1.0).is_err());
        assert!(validate_unit_fraction("test_size", -0.1).is_err());
        assert!(validate_unit_fraction("test_size", f32::NAN).is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("min_samples_leaf", 1, 1).is_ok());
        assert!(validate_positive_number("min_samples_leaf", 0, 1).is_err());
    }

    #[test]
    fn test_validate_known_dataset() {
        assert!(validate_known_dataset("dataset", "iris", &["iris"]).is_ok());
        assert!(validate_known_dataset("dataset", "wine", &["iris"]).is_err());
    }
}
