//! Window state, kept free of egui types so it can be driven from tests.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::events::{ServiceEvent, UiEvent};
use crate::core::Currency;
use crate::core::config::DisplayConfig;
use crate::core::conversion::{ConversionRequest, INVALID_AMOUNT, RESULT_PREFIX, parse_amount};

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub from: usize,
    pub to: usize,
    pub amount: String,
    pub result: String,
    /// Provider timestamp of the rates behind the shown result.
    pub rates_updated_at: Option<DateTime<Utc>>,
    /// Message for the blocking dialog, if one is open.
    pub dialog: Option<String>,
    pub busy: bool,
    decimal_places: usize,
}

impl AppState {
    pub fn new(display: &DisplayConfig) -> Self {
        AppState {
            from: display.default_from.index_of(),
            to: display.default_to.index_of(),
            amount: String::new(),
            result: RESULT_PREFIX.to_string(),
            rates_updated_at: None,
            dialog: None,
            busy: false,
            decimal_places: display.decimal_places,
        }
    }

    pub fn from_currency(&self) -> Currency {
        Currency::from_index(self.from).unwrap_or(Currency::Usd)
    }

    pub fn to_currency(&self) -> Currency {
        Currency::from_index(self.to).unwrap_or(Currency::Usd)
    }

    pub fn swap(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
    }

    /// Validates the amount and returns the command to send, if any.
    /// An unparsable amount opens the invalid-amount dialog instead.
    pub fn request_conversion(&mut self) -> Option<UiEvent> {
        if self.busy {
            return None;
        }
        let amount = match parse_amount(&self.amount) {
            Ok(amount) => amount,
            Err(_) => {
                debug!(amount = %self.amount, "Rejected amount");
                self.dialog = Some(INVALID_AMOUNT.to_string());
                return None;
            }
        };

        self.busy = true;
        Some(UiEvent::Convert(ConversionRequest {
            amount,
            from: self.from_currency(),
            to: self.to_currency(),
        }))
    }

    pub fn apply(&mut self, event: ServiceEvent) {
        self.busy = false;
        match event {
            ServiceEvent::Converted(conversion) => {
                self.result = conversion.display(self.decimal_places);
                self.rates_updated_at = conversion.rates_updated_at;
            }
            ServiceEvent::ConversionFailed { request, message } => {
                self.result = RESULT_PREFIX.to_string();
                self.rates_updated_at = None;
                self.dialog = Some(format!(
                    "Could not get the {} → {} rate.\n{}",
                    request.from, request.to, message
                ));
            }
        }
    }

    pub fn dismiss_dialog(&mut self) {
        self.dialog = None;
    }
}
