use super::ui;
use crate::core::config::DisplayConfig;
use crate::core::conversion::{Conversion, ConversionRequest, Converter, parse_amount};
use crate::core::currency::{Currency, CurrencyRateProvider};
use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

impl Conversion {
    pub fn display_styled(&self, decimal_places: usize) -> String {
        let line = self.display(decimal_places);
        let rate_line = format!("1 {} = {} {}", self.from, self.rate, self.to);
        format!(
            "{}\n{}",
            ui::style_text(&line, ui::StyleType::Result),
            ui::style_text(&rate_line, ui::StyleType::Subtle)
        )
    }
}

/// Converts `amount_text` from one currency to another and prints the result.
/// The amount is validated before any request is made.
pub async fn run_convert(
    amount_text: &str,
    from: Currency,
    to: Currency,
    provider: Arc<dyn CurrencyRateProvider>,
    display: &DisplayConfig,
) -> Result<Conversion> {
    let amount = parse_amount(amount_text)?;
    let request = ConversionRequest { amount, from, to };
    debug!(?request, "Running headless conversion");

    let spinner = ui::new_spinner(format!("Fetching {from} → {to} rate..."));
    let result = Converter::new(provider).convert(request).await;
    spinner.finish_and_clear();

    let conversion = result?;
    println!("{}", conversion.display_styled(display.decimal_places));
    Ok(conversion)
}
