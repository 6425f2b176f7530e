//! Line-driven conversion form.
//!
//! Rates are fetched once on start. Inputs, swap and convert behave like the
//! fields of a form: editing any input discards the previous result, and a
//! result only appears after an explicit `convert`.

use super::ui;
use crate::core::{Currency, RateState, Session};
use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::debug;

const HELP: &str = "\
Commands:
  amount <value>   set the amount to convert
  from <code>      set the source currency
  to <code>        set the target currency
  swap             exchange source and target
  convert          convert the amount
  rates            show the loaded exchange rates
  currencies       list supported currencies
  refresh          fetch exchange rates again
  help             show this help
  quit             leave";

enum Command<'a> {
    Amount(&'a str),
    From(&'a str),
    To(&'a str),
    Swap,
    Convert,
    Rates,
    Currencies,
    Refresh,
    Help,
    Quit,
    Unknown(&'a str),
}

fn parse_command(line: &str) -> Option<Command<'_>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (name, arg) = match line.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (line, ""),
    };
    let command = match name.to_lowercase().as_str() {
        "amount" => Command::Amount(arg),
        "from" => Command::From(arg),
        "to" => Command::To(arg),
        "swap" => Command::Swap,
        "convert" => Command::Convert,
        "rates" => Command::Rates,
        "currencies" => Command::Currencies,
        "refresh" => Command::Refresh,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => Command::Unknown(name),
    };
    Some(command)
}

/// Runs the form until `quit` or end of input.
pub async fn run<R: BufRead>(session: &mut Session, input: R, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "{}", ui::style_text("Currency converter", ui::StyleType::Title))?;
    refresh(session, out).await?;
    write_selection(session, out)?;
    writeln!(out, "{}", ui::style_text("Type `help` for commands.", ui::StyleType::Subtle))?;

    for line in input.lines() {
        let line = line?;
        let Some(command) = parse_command(&line) else {
            continue;
        };

        match command {
            Command::Amount(amount) => {
                session.set_amount(amount);
                debug!(amount, "Amount set");
            }
            Command::From(code) => {
                if let Some(currency) = parse_currency(code, out)? {
                    session.set_from(currency);
                    write_selection(session, out)?;
                }
            }
            Command::To(code) => {
                if let Some(currency) = parse_currency(code, out)? {
                    session.set_to(currency);
                    write_selection(session, out)?;
                }
            }
            Command::Swap => {
                session.swap();
                write_selection(session, out)?;
            }
            Command::Convert => convert(session, out)?,
            Command::Rates => match session.rates() {
                RateState::Loaded(table) => super::rates::write_rates(table, out)?,
                _ => write_rate_status(session, out)?,
            },
            Command::Currencies => {
                for currency in Currency::ALL {
                    writeln!(out, "{} - {}", currency.code(), currency.display_name())?;
                }
            }
            Command::Refresh => refresh(session, out).await?,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => break,
            Command::Unknown(name) => writeln!(
                out,
                "{}",
                ui::style_text(
                    &format!("Unknown command: {name}. Type `help` for commands."),
                    ui::StyleType::Error
                )
            )?,
        }
    }

    Ok(())
}

async fn refresh(session: &mut Session, out: &mut dyn Write) -> Result<()> {
    match super::load_rates(session).await {
        Ok(()) => writeln!(
            out,
            "{}",
            ui::style_text("Exchange rates loaded.", ui::StyleType::Subtle)
        )?,
        Err(_) => write_rate_status(session, out)?,
    }
    Ok(())
}

fn convert(session: &mut Session, out: &mut dyn Write) -> Result<()> {
    if !session.can_convert() {
        writeln!(
            out,
            "{}",
            ui::style_text("Enter an amount first.", ui::StyleType::Error)
        )?;
        return Ok(());
    }
    if session.rates().table().is_none() {
        return write_rate_status(session, out);
    }

    session.convert();
    match session.result_banner() {
        Some(banner) => writeln!(out, "{}", ui::style_text(&banner, ui::StyleType::Result))?,
        None => writeln!(
            out,
            "{}",
            ui::style_text(
                &format!("'{}' is not a number.", session.amount()),
                ui::StyleType::Error
            )
        )?,
    }
    Ok(())
}

fn parse_currency(code: &str, out: &mut dyn Write) -> Result<Option<Currency>> {
    match code.parse::<Currency>() {
        Ok(currency) => Ok(Some(currency)),
        Err(e) => {
            let supported: Vec<_> = Currency::ALL.iter().map(|c| c.code()).collect();
            writeln!(
                out,
                "{}",
                ui::style_text(
                    &format!("{e}. Choose one of: {}", supported.join(", ")),
                    ui::StyleType::Error
                )
            )?;
            Ok(None)
        }
    }
}

fn write_selection(session: &Session, out: &mut dyn Write) -> Result<()> {
    let selection = session.selection();
    writeln!(out, "From {} to {}", selection.from, selection.to)?;
    Ok(())
}

fn write_rate_status(session: &Session, out: &mut dyn Write) -> Result<()> {
    let message = match session.rates() {
        RateState::Failed(message) => message.as_str(),
        RateState::Unloaded => "Exchange rates are not loaded yet.",
        RateState::Loaded(_) => return Ok(()),
    };
    writeln!(out, "{}", ui::style_text(message, ui::StyleType::Error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rates::{FETCH_FAILURE_MESSAGE, RateProvider, RateTable};
    use crate::core::CurrencySelection;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::io::Cursor;

    struct FixedRateProvider(Option<RateTable>);

    #[async_trait]
    impl RateProvider for FixedRateProvider {
        async fn fetch_rates(&self) -> Result<RateTable> {
            self.0.clone().ok_or_else(|| anyhow!("connection refused"))
        }
    }

    async fn run_script(table: Option<RateTable>, script: &str) -> String {
        let mut session = Session::new(
            Box::new(FixedRateProvider(table)),
            CurrencySelection::default(),
        );
        let mut out = Vec::new();
        run(&mut session, Cursor::new(script), &mut out)
            .await
            .expect("interactive run failed");
        String::from_utf8(out).unwrap()
    }

    fn sample_table() -> RateTable {
        RateTable::from_pairs(&[
            (Currency::Usd, 1.0),
            (Currency::Ars, 900.0),
            (Currency::Brl, 5.0),
        ])
    }

    #[tokio::test]
    async fn test_convert_and_swap() {
        let output = run_script(
            Some(sample_table()),
            "amount 10\nconvert\nswap\namount 900\nconvert\nquit\n",
        )
        .await;

        assert!(output.contains("Exchange rates loaded."));
        assert!(output.contains("10 USD = 9000.00 ARS"));
        assert!(output.contains("From ARS to USD"));
        assert!(output.contains("900 ARS = 1.00 USD"));
    }

    #[tokio::test]
    async fn test_cross_conversion() {
        let output = run_script(
            Some(sample_table()),
            "from ars\nto BRL\namount 100\nconvert\n",
        )
        .await;
        assert!(output.contains("100 ARS = 0.56 BRL"));
    }

    #[tokio::test]
    async fn test_convert_needs_amount() {
        let output = run_script(Some(sample_table()), "convert\namount abc\nconvert\n").await;
        assert!(output.contains("Enter an amount first."));
        assert!(output.contains("'abc' is not a number."));
    }

    #[tokio::test]
    async fn test_failed_fetch_stays_interactive() {
        let output = run_script(None, "amount 5\nconvert\nrates\nquit\n").await;
        assert_eq!(output.matches(FETCH_FAILURE_MESSAGE).count(), 3);
        assert!(!output.contains(" = "));
    }

    #[tokio::test]
    async fn test_unknown_command_and_currency() {
        let output = run_script(Some(sample_table()), "frobnicate\nfrom EUR\n").await;
        assert!(output.contains("Unknown command: frobnicate."));
        assert!(output.contains("Unsupported currency: EUR. Choose one of: ARS, BOB, BRL, CLP, COP, USD"));
    }

    #[tokio::test]
    async fn test_quit_stops_reading() {
        let output = run_script(Some(sample_table()), "quit\namount 1\nconvert\n").await;
        assert!(!output.contains(" = "));
    }

    #[test]
    fn test_parse_command() {
        assert!(parse_command("   ").is_none());
        assert!(matches!(parse_command("amount  12.5 "), Some(Command::Amount("12.5"))));
        assert!(matches!(parse_command("amount"), Some(Command::Amount(""))));
        assert!(matches!(parse_command("SWAP"), Some(Command::Swap)));
        assert!(matches!(parse_command("exit"), Some(Command::Quit)));
        assert!(matches!(parse_command("to cop"), Some(Command::To("cop"))));
    }
}
