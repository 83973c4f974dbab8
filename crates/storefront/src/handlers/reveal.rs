//! Scroll reveal and counter start.

use std::time::Duration;

use crate::layout::CounterGroup;
use crate::state::{Page, PageState};
use crate::surface::{Rect, StyleProperty, Surface, VisualState};

use super::scroll::ViewportState;

/// Whether an element's top edge is above `margin` from the viewport bottom.
#[must_use]
pub fn is_in_view(rect: Rect, viewport: ViewportState, margin: f64) -> bool {
    rect.top - viewport.scroll_y < viewport.height - margin
}

impl<S: Surface> Page<S> {
    /// Reveal every element in view and start counter groups that just came
    /// into view.
    pub(crate) fn reveal_visible(&self, state: &mut PageState<S>) {
        let margin = self.config().scroll.reveal_margin;
        let viewport = state.viewport;
        let layout = self.layout();

        for element in &layout.reveal {
            let Some(rect) = state.surface.rect(element) else {
                continue;
            };
            if is_in_view(rect, viewport, margin) {
                state.surface.set_state(element, VisualState::Active, true);
            }
        }

        for (group, started) in layout
            .counter_groups
            .iter()
            .zip(state.counters_started.iter_mut())
        {
            if *started {
                continue;
            }
            let Some(rect) = state.surface.rect(&group.trigger) else {
                continue;
            };
            if is_in_view(rect, viewport, margin) {
                *started = true;
                self.start_counter_group(group);
            }
        }
    }

    /// Schedule every counter of a group after the group's start delay.
    fn start_counter_group(&self, group: &CounterGroup) {
        tracing::debug!(trigger = %group.trigger, counters = group.counters.len(), "counter group started");
        let delay = Duration::from_millis(group.start_delay_ms);

        for spec in &group.counters {
            let page = self.clone();
            let spec = spec.clone();
            self.spawn(async move {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                if let Some(bar) = &spec.bar {
                    let width = format!("{}%", spec.target);
                    page.with_state(|state| {
                        state.surface.set_style(bar, StyleProperty::Width, &width);
                    });
                }
                page.run_counter(spec).await;
            });
        }
    }

    /// Whether the counter group at `index` has been started.
    #[must_use]
    pub fn counters_started(&self, index: usize) -> bool {
        self.with_state(|state| state.counters_started.get(index).copied().unwrap_or(false))
    }
}
