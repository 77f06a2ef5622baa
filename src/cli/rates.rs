use super::ui;
use crate::core::currency::{Currency, CurrencyRateProvider, RateTable};
use anyhow::Result;
use comfy_table::Cell;

impl RateTable {
    /// Renders the rates for every supported currency against the table's base.
    pub fn display_as_table(&self, decimal_places: usize) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Currency"),
            ui::header_cell("Name"),
            ui::header_cell(&format!("Rate (1 {})", self.base)),
        ]);

        for currency in Currency::ALL {
            let rate = self.rates.get(currency.code()).copied();
            table.add_row(vec![
                Cell::new(currency.code()),
                Cell::new(currency.name()),
                ui::format_optional_cell(rate, |r| format!("{r:.prec$}", prec = decimal_places)),
            ]);
        }

        let mut output = format!(
            "Rates for {}\n\n",
            ui::style_text(&self.base, ui::StyleType::Title)
        );
        output.push_str(&table.to_string());

        let updated = self.updated_at.map_or("unknown".to_string(), |ts| {
            ts.format("%Y-%m-%d %H:%M UTC").to_string()
        });
        output.push_str(&format!(
            "\n\n{}",
            ui::style_text(&format!("Last updated: {updated}"), ui::StyleType::Subtle)
        ));
        output
    }
}

pub async fn run_rates(
    base: Currency,
    provider: &dyn CurrencyRateProvider,
    decimal_places: usize,
) -> Result<RateTable> {
    let spinner = ui::new_spinner(format!("Fetching {base} rates..."));
    let result = provider.latest_rates(base.code()).await;
    spinner.finish_and_clear();

    let table = result?;
    println!("{}", table.display_as_table(decimal_places));
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::collections::HashMap;

    #[test]
    fn test_rates_table_lists_supported_currencies() {
        let table = RateTable {
            base: "EUR".to_string(),
            updated_at: Utc.with_ymd_and_hms(2026, 10, 17, 0, 0, 1).single(),
            rates: HashMap::from([
                ("EUR".to_string(), 1.0),
                ("USD".to_string(), 1.1681),
                ("CHF".to_string(), 0.93),
            ]),
        };

        let output = console::strip_ansi_codes(&table.display_as_table(2)).to_string();
        assert!(output.contains("Rates for EUR"));
        assert!(output.contains("1.17"));
        assert!(output.contains("Nepalese Rupee"));
        assert!(output.contains("N/A"));
        assert!(!output.contains("CHF"));
        assert!(output.contains("Last updated: 2026-10-17 00:00 UTC"));
    }
}
