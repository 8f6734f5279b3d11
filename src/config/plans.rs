//! Seed plan loading from config.toml
//!
//! The plans listed in config.toml make up the store's initial contents for a
//! session. Amounts are given in whole currency units.

use crate::{
    entities::{Currency, Money, PlanId, PlanName, PlanRecord, Tint},
    errors::{Error, Result},
};
use chrono::Utc;
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Plans to seed the store with, in display order
    #[serde(default)]
    pub plans: Vec<PlanSeed>,
}

impl Config {
    /// Converts every seed into a record, failing on the first invalid one.
    pub fn into_records(self) -> Result<Vec<PlanRecord>> {
        self.plans.into_iter().map(PlanSeed::into_record).collect()
    }
}

/// Configuration for a single seed plan
#[derive(Debug, Deserialize, Clone)]
pub struct PlanSeed {
    /// Name of the plan
    pub name: String,
    /// Total amount in whole units
    pub total: i64,
    /// Amount already paid in whole units
    #[serde(default)]
    pub paid: i64,
    /// ISO currency code
    pub currency: String,
    /// Status line, e.g. "Paid off in 6 months"
    pub due_label: String,
    /// Icon tag
    #[serde(default = "default_icon")]
    pub icon: String,
    /// Tint tag
    #[serde(default)]
    pub tint: Tint,
}

fn default_icon() -> String {
    "doc.text.fill".to_string()
}

impl PlanSeed {
    /// Validates the seed and turns it into a store record.
    pub fn into_record(self) -> Result<PlanRecord> {
        let name = PlanName::new(self.name).map_err(|e| Error::Config {
            message: format!("Invalid seed plan: {e}"),
        })?;
        let currency: Currency = self.currency.parse()?;

        for amount in [self.total, self.paid] {
            if amount < 0 {
                return Err(Error::InvalidAmount {
                    minor_units: amount.saturating_mul(Currency::MINOR_PER_MAJOR),
                });
            }
        }

        Ok(PlanRecord {
            id: PlanId::new(),
            name: name.into_inner(),
            total_amount: Money::from_major(self.total, currency),
            paid_amount: Money::from_major(self.paid, currency),
            due_label: self.due_label,
            icon: self.icon,
            tint: self.tint,
            created_at: Utc::now(),
        })
    }
}

/// Loads plan configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read ([`Error::Io`])
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref)?;

    parse_config(&contents)
}

/// Parses config.toml contents
pub fn parse_config(contents: &str) -> Result<Config> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    const SAMPLE: &str = r#"
        [[plans]]
        name = "Home Office Setup"
        total = 18200
        paid = 6000
        currency = "SEK"
        due_label = "Paid off in 6 months"
        tint = "purple"

        [[plans]]
        name = "New Kitchen Appliances"
        total = 28500
        paid = 28500
        currency = "SEK"
        due_label = "Paid off"
        icon = "doc.text.fill"
        tint = "green"
    "#;

    #[test]
    fn test_parse_plan_config() {
        let config = parse_config(SAMPLE).unwrap();
        assert_eq!(config.plans.len(), 2);
        assert_eq!(config.plans[0].name, "Home Office Setup");
        assert_eq!(config.plans[0].icon, "doc.text.fill");
        assert_eq!(config.plans[0].tint, Tint::Purple);

        let records = config.into_records().unwrap();
        assert_eq!(
            records[0].total_amount,
            Money::from_major(18_200, Currency::Sek)
        );
        assert!(!records[0].is_paid_off());
        assert_eq!(records[1].progress(), 1.0);
        assert_ne!(records[0].id, records[1].id);
    }

    #[test]
    fn test_missing_plans_section_is_empty() {
        let config = parse_config("").unwrap();
        assert!(config.plans.is_empty());
    }

    #[test]
    fn test_invalid_seeds_are_rejected() {
        let blank = parse_config(
            r#"
            [[plans]]
            name = " "
            total = 1
            currency = "SEK"
            due_label = "x"
            "#,
        )
        .unwrap();
        assert!(matches!(blank.into_records(), Err(Error::Config { .. })));

        let negative = parse_config(
            r#"
            [[plans]]
            name = "Debt"
            total = -5
            currency = "SEK"
            due_label = "x"
            "#,
        )
        .unwrap();
        assert!(matches!(
            negative.into_records(),
            Err(Error::InvalidAmount { minor_units: -500 })
        ));

        let bad_currency = parse_config(
            r#"
            [[plans]]
            name = "Trip"
            total = 5
            currency = "???"
            due_label = "x"
            "#,
        )
        .unwrap();
        assert!(matches!(
            bad_currency.into_records(),
            Err(Error::UnknownCurrency { .. })
        ));
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        assert!(matches!(
            parse_config("[[plans]\nname = 1"),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            load_config("/nonexistent/config.toml"),
            Err(Error::Io(ref e)) if e.kind() == std::io::ErrorKind::NotFound
        ));
    }

    #[test]
    fn test_load_config_reads_file_from_disk() {
        let path = std::env::temp_dir().join(format!("pocket-plans-{}.toml", std::process::id()));
        std::fs::write(&path, SAMPLE).unwrap();

        let config = load_config(&path);
        std::fs::remove_file(&path).unwrap();

        let config = config.unwrap();
        assert_eq!(config.plans.len(), 2);
        assert_eq!(config.plans[1].name, "New Kitchen Appliances");
    }
}
