//! Calendar feed retrieval, decoding and normalization.
//!
//! This crate turns a remote iCalendar feed into the [`Schedule`] a
//! presentation adapter renders:
//!
//! - [`FeedSource`] - Where feed text comes from ([`HttpFeedRetriever`] over
//!   HTTP through a relay, [`StaticFeedSource`] for text in memory)
//! - [`FeedDecoder`] - iCalendar text to [`CalendarComponentRecord`]s
//! - [`project`] / [`normalize_event`] - records to [`NormalizedEvent`]s
//! - [`load_schedule`] - the whole pipeline, never failing
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐
//! │  Feed origin    │◀───│  CORS relay     │
//! └─────────────────┘    └────────┬────────┘
//!                                 │ HttpFeedRetriever
//!                                 ▼
//!                        ┌─────────────────┐
//!                        │  RawFeedText    │
//!                        └────────┬────────┘
//!                                 │ FeedDecoder::decode()
//!                                 ▼
//!                   ┌───────────────────────────┐
//!                   │ CalendarComponentRecord[] │
//!                   └─────────────┬─────────────┘
//!                                 │ project()
//!                                 ▼
//!                        ┌─────────────────┐
//!                        │    Schedule     │
//!                        └─────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use feedgrid_feed::{FeedConfig, FeedDecoder, HttpFeedRetriever, load_schedule};
//!
//! async fn load(url: &str) -> feedgrid_feed::FeedResult<Schedule> {
//!     let retriever = HttpFeedRetriever::new(FeedConfig::new(url).map_err(...)?)?;
//!     Ok(load_schedule(&retriever, &FeedDecoder::default()).await)
//! }
//! ```
//!
//! [`Schedule`]: feedgrid_core::Schedule
//! [`NormalizedEvent`]: feedgrid_core::NormalizedEvent

pub mod error;
#[cfg(feature = "http")]
pub mod http;
pub mod ics;
pub mod normalize;
pub mod pipeline;
pub mod record;
pub mod source;

// Re-export main types at crate root
pub use error::{FeedError, FeedErrorCode, FeedResult};
#[cfg(feature = "http")]
pub use http::{FeedConfig, HttpFeedRetriever, RelayConfig};
pub use ics::{DecodedFeed, FeedDecoder, parse_duration, unescape_text};
pub use normalize::{normalize_event, project};
pub use pipeline::{load_into, load_schedule, run_pipeline};
pub use record::{CalendarComponentRecord, EventRecord};
pub use source::{BoxFuture, ErrorFeedSource, FeedSource, RawFeedText, StaticFeedSource};
