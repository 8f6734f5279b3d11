//! Runtime settings read from environment variables.
//!
//! Every setting has a default, so an empty environment is valid. Values that
//! are present but malformed are configuration errors.

use crate::{
    core::{
        payment::DEFAULT_PAYMENT_DELAY, plan::OrderingPolicy, scroll::DEFAULT_COLLAPSE_DISTANCE,
    },
    errors::{Error, Result},
};
use std::{path::PathBuf, time::Duration};

/// Default path of the seed plan file.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Runtime settings.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    /// `COLLAPSE_DISTANCE`: pixels of scroll over which headers collapse
    pub collapse_distance: f64,
    /// `PAYMENT_DELAY_MS`: simulated payment processing time
    pub payment_delay: Duration,
    /// `PLAN_ORDERING`: `unfinished_first` or `before_last`
    pub plan_ordering: OrderingPolicy,
    /// `POCKET_CONFIG`: path of the seed plan file
    pub config_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            collapse_distance: DEFAULT_COLLAPSE_DISTANCE,
            payment_delay: DEFAULT_PAYMENT_DELAY,
            plan_ordering: OrderingPolicy::default(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, falling back to defaults for missing keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(raw) = lookup("COLLAPSE_DISTANCE") {
            let distance: f64 = raw.trim().parse().map_err(|e| Error::Config {
                message: format!("COLLAPSE_DISTANCE must be a number: {e}"),
            })?;
            if !distance.is_finite() || distance <= 0.0 {
                return Err(Error::Config {
                    message: format!("COLLAPSE_DISTANCE must be positive, got {distance}"),
                });
            }
            settings.collapse_distance = distance;
        }

        if let Some(raw) = lookup("PAYMENT_DELAY_MS") {
            let millis: u64 = raw.trim().parse().map_err(|e| Error::Config {
                message: format!("PAYMENT_DELAY_MS must be a whole number of milliseconds: {e}"),
            })?;
            settings.payment_delay = Duration::from_millis(millis);
        }

        if let Some(raw) = lookup("PLAN_ORDERING") {
            settings.plan_ordering = raw.parse()?;
        }

        if let Some(raw) = lookup("POCKET_CONFIG") {
            settings.config_path = PathBuf::from(raw);
        }

        tracing::debug!(?settings, "Settings loaded");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() -> Result<()> {
        let settings = Settings::from_lookup(lookup(&[]))?;
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.collapse_distance, 100.0);
        assert_eq!(settings.payment_delay, Duration::from_millis(1_500));
        assert_eq!(settings.plan_ordering, OrderingPolicy::UnfinishedFirst);
        assert_eq!(settings.config_path, PathBuf::from("config.toml"));
        Ok(())
    }

    #[test]
    fn test_overrides_are_applied() -> Result<()> {
        let settings = Settings::from_lookup(lookup(&[
            ("COLLAPSE_DISTANCE", "120"),
            ("PAYMENT_DELAY_MS", "10"),
            ("PLAN_ORDERING", "before_last"),
            ("POCKET_CONFIG", "/tmp/plans.toml"),
        ]))?;
        assert_eq!(settings.collapse_distance, 120.0);
        assert_eq!(settings.payment_delay, Duration::from_millis(10));
        assert_eq!(settings.plan_ordering, OrderingPolicy::BeforeLast);
        assert_eq!(settings.config_path, PathBuf::from("/tmp/plans.toml"));
        Ok(())
    }

    #[test]
    fn test_malformed_values_are_config_errors() {
        for pairs in [
            [("COLLAPSE_DISTANCE", "wide")],
            [("COLLAPSE_DISTANCE", "-3")],
            [("PAYMENT_DELAY_MS", "1.5s")],
            [("PLAN_ORDERING", "alphabetical")],
        ] {
            assert!(matches!(
                Settings::from_lookup(lookup(&pairs)),
                Err(Error::Config { .. })
            ));
        }
    }
}
