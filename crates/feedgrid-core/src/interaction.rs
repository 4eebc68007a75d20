//! The presentation adapter boundary.
//!
//! A presentation adapter renders a [`Schedule`] and reports pointer
//! interactions. The tooltip currently on screen belongs to the adapter
//! instance through [`InteractionState`]; the projector functions it calls
//! stay pure.

use crate::event::{AnchorGeometry, CalendarDeepLink, NormalizedEvent, Schedule, TooltipPayload};
use crate::links::DeepLinkBuilder;
use crate::tooltip::TooltipFormatter;

/// Hover and activation state owned by one adapter instance.
///
/// At most one tooltip is live: entering a new event replaces the previous
/// payload, leaving clears it.
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    formatter: TooltipFormatter,
    links: DeepLinkBuilder,
    tooltip: Option<TooltipPayload>,
}

impl InteractionState {
    /// Creates interaction state using the given formatter and link builder.
    pub fn new(formatter: TooltipFormatter, links: DeepLinkBuilder) -> Self {
        Self {
            formatter,
            links,
            tooltip: None,
        }
    }

    /// Shows the tooltip for `event`, replacing any tooltip already shown.
    pub fn hover_enter(&mut self, event: &NormalizedEvent, geometry: AnchorGeometry) -> &TooltipPayload {
        self.tooltip
            .insert(self.formatter.tooltip(event, geometry.tooltip_anchor()))
    }

    /// Hides the current tooltip, if any.
    pub fn hover_leave(&mut self) {
        self.tooltip = None;
    }

    /// Builds a fresh deep link for an activated event.
    pub fn activate(&self, event: &NormalizedEvent) -> CalendarDeepLink {
        self.links.deep_link(event)
    }

    /// The tooltip currently shown.
    pub fn tooltip(&self) -> Option<&TooltipPayload> {
        self.tooltip.as_ref()
    }

    /// The formatter tooltips are built with.
    pub fn formatter(&self) -> &TooltipFormatter {
        &self.formatter
    }
}

/// A component that renders events and raises interaction callbacks.
///
/// Implementors own their [`InteractionState`]; the default callback
/// implementations delegate to it.
pub trait PresentationAdapter {
    /// Receives the event set for one load. Called exactly once per load.
    fn publish(&mut self, schedule: Schedule);

    /// The adapter's interaction state.
    fn interaction(&mut self) -> &mut InteractionState;

    /// Pointer entered the element rendering `event`.
    fn on_event_hover_enter(&mut self, event: &NormalizedEvent, geometry: AnchorGeometry) -> TooltipPayload {
        self.interaction().hover_enter(event, geometry).clone()
    }

    /// Pointer left the element that was hovered.
    fn on_event_hover_leave(&mut self) {
        self.interaction().hover_leave();
    }

    /// The user activated (clicked) `event`.
    fn on_event_activate(&mut self, event: &NormalizedEvent) -> CalendarDeepLink {
        self.interaction().activate(event)
    }
}
