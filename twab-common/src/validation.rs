//! Input validation utilities and patterns

use crate::{
    error::{TwabError, TwabResult},
    types::Timestamp,
};

/// Validation utilities for common data types
pub struct ValidationUtils;

impl ValidationUtils {
    /// Validate that a period length can bucket timestamps
    pub fn validate_period_length(period_length: Timestamp) -> TwabResult<()> {
        if period_length == 0 {
            return Err(TwabError::validation("Period length must be greater than 0"));
        }
        Ok(())
    }

    /// Validate that a query interval is ordered
    pub fn validate_interval(start: Timestamp, end: Timestamp) -> TwabResult<()> {
        if start > end {
            return Err(TwabError::validation(format!(
                "Invalid interval: start {} is after end {}",
                start, end
            )));
        }
        Ok(())
    }

    /// Validate that `now` does not move backwards relative to the latest write
    pub fn validate_monotonic(latest: Timestamp, now: Timestamp) -> TwabResult<()> {
        if now < latest {
            return Err(TwabError::validation(format!(
                "Time moved backwards: latest write at {}, now {}",
                latest, now
            )));
        }
        Ok(())
    }

    /// Validate string length
    pub fn validate_string_length(s: &str, max_len: usize, field_name: &str) -> TwabResult<()> {
        if s.len() > max_len {
            return Err(TwabError::validation(format!(
                "{} too long: {} bytes (max {})",
                field_name,
                s.len(),
                max_len
            )));
        }
        Ok(())
    }

    /// Validate an account key used by the replay tooling
    pub fn validate_account_key(key: &str) -> TwabResult<()> {
        if key.is_empty() {
            return Err(TwabError::validation("Account key cannot be empty"));
        }
        Self::validate_string_length(key, 128, "Account key")
    }

    /// Batch validation for multiple values
    pub fn validate_batch<T, F>(items: &[T], validator: F, field_name: &str) -> TwabResult<()>
    where
        F: Fn(&T) -> TwabResult<()>,
    {
        for (i, item) in items.iter().enumerate() {
            validator(item)
                .map_err(|e| TwabError::validation(format!("{}[{}]: {}", field_name, i, e)))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_length_validation() {
        assert!(ValidationUtils::validate_period_length(1).is_ok());
        assert!(ValidationUtils::validate_period_length(86_400).is_ok());
        assert!(ValidationUtils::validate_period_length(0).is_err());
    }

    #[test]
    fn test_interval_validation() {
        assert!(ValidationUtils::validate_interval(5, 5).is_ok());
        assert!(ValidationUtils::validate_interval(5, 10).is_ok());
        assert!(ValidationUtils::validate_interval(10, 5).is_err());
    }

    #[test]
    fn test_monotonic_validation() {
        assert!(ValidationUtils::validate_monotonic(100, 100).is_ok());
        assert!(ValidationUtils::validate_monotonic(100, 101).is_ok());
        assert!(ValidationUtils::validate_monotonic(100, 99).is_err());
    }

    #[test]
    fn test_account_key_validation() {
        assert!(ValidationUtils::validate_account_key("alice").is_ok());
        assert!(ValidationUtils::validate_account_key("").is_err());
        assert!(ValidationUtils::validate_account_key(&"x".repeat(200)).is_err());
    }

    #[test]
    fn test_batch_validation_reports_index() {
        let lengths = [10u64, 0, 3];
        let err = ValidationUtils::validate_batch(
            &lengths,
            |l| ValidationUtils::validate_period_length(*l),
            "periods",
        )
        .unwrap_err();
        assert!(err.to_string().contains("periods[1]"));
    }
}
