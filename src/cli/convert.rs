use super::ui;
use crate::core::Session;
use anyhow::Result;
use std::io::Write;

/// Fetches rates once, converts `amount` with the session's selection and
/// prints the result line.
pub async fn run(session: &mut Session, amount: &str, out: &mut dyn Write) -> Result<()> {
    super::load_rates(session).await?;

    session.set_amount(amount);
    if !session.can_convert() {
        writeln!(out, "{}", ui::style_text("Enter an amount to convert.", ui::StyleType::Error))?;
        return Ok(());
    }

    session.convert();
    match session.result_banner() {
        Some(banner) => writeln!(out, "{}", ui::style_text(&banner, ui::StyleType::Result))?,
        None => writeln!(
            out,
            "{}",
            ui::style_text(
                &format!("'{}' is not a number, nothing to convert.", amount.trim()),
                ui::StyleType::Error
            )
        )?,
    }
    Ok(())
}
