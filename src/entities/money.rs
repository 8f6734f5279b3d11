//! Money value type - integer minor units tagged with a currency.
//!
//! Amounts are never stored or parsed as display strings. Formatting into the
//! `"18 200 SEK"` shape is a pure presentation function on top of this type.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Supported ISO 4217 currencies. All of them use two minor-unit digits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Swedish krona
    Sek,
    /// Euro
    Eur,
    /// US dollar
    Usd,
    /// Norwegian krone
    Nok,
    /// Danish krone
    Dkk,
}

impl Currency {
    /// Minor units per major unit.
    pub const MINOR_PER_MAJOR: i64 = 100;

    /// ISO code, e.g. `"SEK"`.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Sek => "SEK",
            Self::Eur => "EUR",
            Self::Usd => "USD",
            Self::Nok => "NOK",
            Self::Dkk => "DKK",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SEK" => Ok(Self::Sek),
            "EUR" => Ok(Self::Eur),
            "USD" => Ok(Self::Usd),
            "NOK" => Ok(Self::Nok),
            "DKK" => Ok(Self::Dkk),
            _ => Err(Error::UnknownCurrency {
                code: s.to_string(),
            }),
        }
    }
}

/// A signed monetary amount in minor units (öre, cents).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    /// Amount in minor units
    pub minor_units: i64,
    /// Currency of the amount
    pub currency: Currency,
}

impl Money {
    /// Creates an amount from minor units.
    #[must_use]
    pub const fn new(minor_units: i64, currency: Currency) -> Self {
        Self {
            minor_units,
            currency,
        }
    }

    /// Creates an amount from whole major units (`1000` SEK → `100_000` öre).
    #[must_use]
    pub const fn from_major(units: i64, currency: Currency) -> Self {
        Self::new(units.saturating_mul(Currency::MINOR_PER_MAJOR), currency)
    }

    /// Zero in the given currency.
    #[must_use]
    pub const fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.minor_units == 0
    }

    /// Returns `true` if the amount is strictly positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.minor_units > 0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.minor_units < 0
    }

    fn ensure_same_currency(self, other: Self) -> Result<()> {
        if self.currency == other.currency {
            Ok(())
        } else {
            Err(Error::CurrencyMismatch {
                left: self.currency.code().to_string(),
                right: other.currency.code().to_string(),
            })
        }
    }

    /// Adds two amounts of the same currency.
    pub fn checked_add(self, other: Self) -> Result<Self> {
        self.ensure_same_currency(other)?;
        self.minor_units
            .checked_add(other.minor_units)
            .map(|minor_units| Self::new(minor_units, self.currency))
            .ok_or(Error::InvalidAmount {
                minor_units: other.minor_units,
            })
    }

    /// Subtracts `other` from `self`; both must share a currency.
    pub fn checked_sub(self, other: Self) -> Result<Self> {
        self.ensure_same_currency(other)?;
        self.minor_units
            .checked_sub(other.minor_units)
            .map(|minor_units| Self::new(minor_units, self.currency))
            .ok_or(Error::InvalidAmount {
                minor_units: other.minor_units,
            })
    }

    /// Display form: `"18 200 SEK"`, `"1 568,50 SEK"`, `"-42 EUR"`.
    #[must_use]
    pub fn format(self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let abs = self.minor_units.unsigned_abs();
        let per_major = Currency::MINOR_PER_MAJOR.unsigned_abs();
        let whole = group_thousands(abs / per_major);
        let fraction = abs % per_major;

        if fraction == 0 {
            format!("{sign}{whole} {}", self.currency)
        } else {
            format!("{sign}{whole},{fraction:02} {}", self.currency)
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    grouped
}
