//! Feed source selection.

use std::path::Path;

use feedgrid_feed::{ErrorFeedSource, FeedSource, HttpFeedRetriever, StaticFeedSource};
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Builds the feed source: a local file when given, the HTTP retriever
/// otherwise.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the feed settings are
/// invalid. A retriever that cannot be constructed is replaced by a source
/// that always fails, so the load still yields an empty schedule.
pub fn build_source(file: Option<&Path>, config: &ClientConfig) -> ClientResult<Box<dyn FeedSource>> {
    if let Some(path) = file {
        debug!(path = %path.display(), "reading feed from file");
        let text = std::fs::read_to_string(path)?;
        return Ok(Box::new(StaticFeedSource::new("file", text)));
    }

    let feed_config = config.feed.to_feed_config().map_err(ClientError::Config)?;
    match HttpFeedRetriever::new(feed_config) {
        Ok(retriever) => Ok(Box::new(retriever)),
        Err(e) => {
            warn!(error = %e, "HTTP retriever unavailable");
            Ok(Box::new(ErrorFeedSource::new("http", e)))
        }
    }
}
