//! Core types: events, time windows, tooltips, deep links, interaction state

pub mod event;
pub mod interaction;
pub mod links;
pub mod time;
pub mod tooltip;
pub mod tracing;

pub use event::{
    AnchorGeometry, AnchorPoint, CalendarDeepLink, ExtendedProperties, NormalizedEvent, Schedule,
    TooltipPayload,
};
pub use interaction::{InteractionState, PresentationAdapter};
pub use links::{DEFAULT_DEEP_LINK_BASE, DeepLinkBuilder, compact_utc};
pub use time::{GridView, TimeWindow, is_local_midnight, local_midnight, resolve_local, same_local_day};
pub use tooltip::{TooltipFormatter, parse_locale};
pub use crate::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
