pub mod convert;
pub mod interactive;
pub mod rates;
pub mod setup;
pub mod ui;

use crate::core::{RateFetchFailure, Session};

/// Loads the session's rates with a spinner covering the loading window.
pub async fn load_rates(session: &mut Session) -> Result<(), RateFetchFailure> {
    let spinner = ui::new_spinner("Fetching exchange rates...");
    let result = session.load_rates().await;
    spinner.finish_and_clear();
    result
}
