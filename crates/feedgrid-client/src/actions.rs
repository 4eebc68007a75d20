//! Event actions: open deep links.

use feedgrid_core::CalendarDeepLink;
use tracing::info;

use crate::error::{ClientError, ClientResult};

/// Opens a deep link in the default browser.
pub fn open_link(link: &CalendarDeepLink) -> ClientResult<()> {
    info!(url = %link, "opening deep link");
    open::that(link.as_str()).map_err(|e| ClientError::Action(format!("failed to open URL: {}", e)))?;
    Ok(())
}
