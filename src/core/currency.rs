//! Supported currencies and the rate provider abstraction

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Npr,
    Eur,
    Inr,
    Gbp,
    Jpy,
}

impl Currency {
    /// Selector order. Flag icons and UI indices follow this order.
    pub const ALL: [Currency; 6] = [
        Currency::Usd,
        Currency::Npr,
        Currency::Eur,
        Currency::Inr,
        Currency::Gbp,
        Currency::Jpy,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Npr => "NPR",
            Currency::Eur => "EUR",
            Currency::Inr => "INR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Currency::Usd => "US Dollar",
            Currency::Npr => "Nepalese Rupee",
            Currency::Eur => "Euro",
            Currency::Inr => "Indian Rupee",
            Currency::Gbp => "Pound Sterling",
            Currency::Jpy => "Japanese Yen",
        }
    }

    pub fn index_of(&self) -> usize {
        Currency::ALL
            .iter()
            .position(|c| c == self)
            .unwrap_or_default()
    }

    /// Returns the currency at a selector index, if any.
    pub fn from_index(index: usize) -> Option<Currency> {
        Currency::ALL.get(index).copied()
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "NPR" => Ok(Currency::Npr),
            "EUR" => Ok(Currency::Eur),
            "INR" => Ok(Currency::Inr),
            "GBP" => Ok(Currency::Gbp),
            "JPY" => Ok(Currency::Jpy),
            _ => Err(anyhow!("Unsupported currency: {}", s)),
        }
    }
}

/// Latest rates quoted against a single base currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    pub base: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub rates: HashMap<String, f64>,
}

impl RateTable {
    pub fn rate_for(&self, target: &str) -> Result<f64> {
        self.rates
            .get(target)
            .copied()
            .ok_or_else(|| anyhow!("No conversion rate for {} in {} rates", target, self.base))
    }
}

#[async_trait]
pub trait CurrencyRateProvider: Send + Sync {
    async fn latest_rates(&self, base: &str) -> Result<RateTable>;

    async fn get_rate(&self, from: &str, to: &str) -> Result<f64> {
        self.latest_rates(from).await?.rate_for(to)
    }
}
