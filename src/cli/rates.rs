use super::ui;
use crate::core::{Currency, RateTable, Session};
use anyhow::Result;
use comfy_table::{Cell, CellAlignment, Table};
use std::io::Write;

/// Fetches rates once and prints them.
pub async fn run(session: &mut Session, out: &mut dyn Write) -> Result<()> {
    super::load_rates(session).await?;
    if let Some(table) = session.rates().table() {
        write_rates(table, out)?;
    }
    Ok(())
}

pub fn write_rates(rates: &RateTable, out: &mut dyn Write) -> Result<()> {
    writeln!(
        out,
        "{} {}",
        ui::style_text("Exchange rates", ui::StyleType::Title),
        ui::style_text(
            &format!("(base {})", Currency::PIVOT.display_name()),
            ui::StyleType::Subtle
        )
    )?;
    writeln!(out, "{}", rates_table(rates))?;

    let updated = rates
        .last_updated()
        .map(|ts| ts.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "unknown".to_string());
    writeln!(
        out,
        "{}",
        ui::style_text(&format!("Last updated: {updated}"), ui::StyleType::Subtle)
    )?;
    Ok(())
}

fn rates_table(rates: &RateTable) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Code"),
        ui::header_cell("Currency"),
        ui::header_cell(&format!("Per 1 {}", Currency::PIVOT)),
    ]);
    for (currency, rate) in rates.iter() {
        table.add_row(vec![
            Cell::new(currency.code()),
            Cell::new(currency.display_name()),
            Cell::new(format!("{rate:.4}")).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::collections::HashMap;

    #[test]
    fn test_write_rates_lists_every_currency() -> Result<()> {
        let mapping: HashMap<String, f64> = Currency::ALL
            .iter()
            .enumerate()
            .map(|(i, c)| (c.code().to_string(), (i + 1) as f64 * 1.5))
            .collect();
        let updated = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).single();
        let rates = RateTable::from_codes(&mapping, updated)?;

        let mut out = Vec::new();
        write_rates(&rates, &mut out)?;
        let text = String::from_utf8(out)?;

        for currency in Currency::ALL {
            assert!(text.contains(currency.code()));
            assert!(text.contains(currency.display_name()));
        }
        assert!(text.contains("1.5000"));
        assert!(text.contains("Last updated: 2024-03-01 00:00 UTC"));
        Ok(())
    }
}
