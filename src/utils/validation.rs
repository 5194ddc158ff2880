use crate::utils::error::{Result, ScanApiError};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Checks `host:port` shape only; host names are resolved at bind time.
pub fn validate_bind_address(field_name: &str, addr: &str) -> Result<()> {
    let invalid = |reason: String| ScanApiError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: addr.to_string(),
        reason,
    };

    let (host, port) = addr
        .rsplit_once(':')
        .ok_or_else(|| invalid("Expected host:port".to_string()))?;
    let host = host.trim_start_matches('[').trim_end_matches(']');
    if host.trim().is_empty() {
        return Err(invalid("Host cannot be empty".to_string()));
    }
    port.parse::<u16>().map_err(|e| invalid(format!("Invalid port: {}", e)))?;
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(ScanApiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ScanApiError::validation(
            field_name,
            format!("{} cannot be empty or whitespace-only", field_name),
        ));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ScanApiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
