//! Alert configuration from environment variables.
//!
//! - `KITCHEN_ALERT_LOOKAHEAD_DAYS` (default 30)
//! - `KITCHEN_ALERT_WARNING_DAYS` (default 14)
//! - `KITCHEN_ALERT_CRITICAL_DAYS` (default 7)

use kitchen_core::DomainError;
use kitchen_inventory::AlertPolicy;

pub const LOOKAHEAD_DAYS_VAR: &str = "KITCHEN_ALERT_LOOKAHEAD_DAYS";
pub const WARNING_DAYS_VAR: &str = "KITCHEN_ALERT_WARNING_DAYS";
pub const CRITICAL_DAYS_VAR: &str = "KITCHEN_ALERT_CRITICAL_DAYS";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a non-negative integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("invalid alert windows: {0}")]
    InvalidPolicy(#[from] DomainError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertConfig {
    pub policy: AlertPolicy,
}

impl AlertConfig {
    /// Read the alert windows from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read the alert windows through `lookup`; absent variables take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AlertPolicy::default();

        let lookahead = read_days(&lookup, LOOKAHEAD_DAYS_VAR, defaults.lookahead_days())?;
        let warning = read_days(&lookup, WARNING_DAYS_VAR, defaults.warning_days())?;
        let critical = read_days(&lookup, CRITICAL_DAYS_VAR, defaults.critical_days())?;

        let policy = AlertPolicy::new(lookahead, warning, critical)?;
        Ok(Self { policy })
    }
}

fn read_days<F>(lookup: &F, var: &'static str, default: u32) -> Result<u32, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => {
            let parsed = raw.trim().parse::<u32>();
            parsed.map_err(|_| ConfigError::InvalidNumber { var, value: raw })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = AlertConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.policy, AlertPolicy::default());
    }

    #[test]
    fn overrides_are_parsed() {
        let config = AlertConfig::from_lookup(lookup_from(&[
            (LOOKAHEAD_DAYS_VAR, "45"),
            (WARNING_DAYS_VAR, " 21 "),
            (CRITICAL_DAYS_VAR, "3"),
        ]))
        .unwrap();

        assert_eq!(config.policy.lookahead_days(), 45);
        assert_eq!(config.policy.warning_days(), 21);
        assert_eq!(config.policy.critical_days(), 3);
    }

    #[test]
    fn garbage_is_rejected() {
        let err = AlertConfig::from_lookup(lookup_from(&[(WARNING_DAYS_VAR, "two weeks")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                var: WARNING_DAYS_VAR,
                value: "two weeks".to_string(),
            }
        );
    }

    #[test]
    fn inconsistent_windows_are_rejected() {
        let err = AlertConfig::from_lookup(lookup_from(&[(LOOKAHEAD_DAYS_VAR, "10")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPolicy(DomainError::Validation(_))));
    }
}
