//! Amount parsing and rate application

use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::debug;

use super::currency::{Currency, CurrencyRateProvider};

pub const INVALID_AMOUNT: &str = "Invalid amount.";
pub const RESULT_PREFIX: &str = "Converted Amount: ";

/// Parses a user-typed decimal amount.
pub fn parse_amount(text: &str) -> Result<f64> {
    match text.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() && !amount.is_sign_negative() => Ok(amount),
        _ => bail!(INVALID_AMOUNT),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionRequest {
    pub amount: f64,
    pub from: Currency,
    pub to: Currency,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conversion {
    pub amount: f64,
    pub from: Currency,
    pub to: Currency,
    pub rate: f64,
    pub converted: f64,
    /// When the provider last refreshed the rate. `None` if no rate was fetched.
    pub rates_updated_at: Option<DateTime<Utc>>,
}

impl Conversion {
    pub fn new(request: ConversionRequest, rate: f64) -> Self {
        Conversion {
            amount: request.amount,
            from: request.from,
            to: request.to,
            rate,
            converted: request.amount * rate,
            rates_updated_at: None,
        }
    }

    pub fn display(&self, decimal_places: usize) -> String {
        format!(
            "{RESULT_PREFIX}{:.prec$} {}",
            self.converted,
            self.to,
            prec = decimal_places
        )
    }
}

pub struct Converter {
    provider: Arc<dyn CurrencyRateProvider>,
}

impl Converter {
    pub fn new(provider: Arc<dyn CurrencyRateProvider>) -> Self {
        Converter { provider }
    }

    pub async fn convert(&self, request: ConversionRequest) -> Result<Conversion> {
        let (rate, rates_updated_at) = if request.from == request.to {
            (1.0, None)
        } else {
            let table = self.provider.latest_rates(request.from.code()).await?;
            (table.rate_for(request.to.code())?, table.updated_at)
        };
        debug!(?request, rate, "Applying conversion rate");

        let conversion = Conversion {
            rates_updated_at,
            ..Conversion::new(request, rate)
        };
        if !conversion.converted.is_finite() {
            bail!(
                "Converted amount is out of range for {} {} → {}",
                request.amount,
                request.from,
                request.to
            );
        }
        Ok(conversion)
    }
}
