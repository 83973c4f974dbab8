//! Scroll tracker.
//!
//! Recomputes everything that depends on the scroll offset: header and
//! back-to-top state, the highlighted nav link and parallax transforms. Also
//! answers nav and back-to-top clicks with the offset the host should scroll to.

use serde::Serialize;
use tracing::instrument;

use crate::elements;
use crate::layout::ParallaxDirection;
use crate::state::{Page, PageState};
use crate::surface::{Rect, StyleProperty, Surface, VisualState};

/// Current viewport, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ViewportState {
    pub scroll_y: f64,
    pub height: f64,
}

impl ViewportState {
    /// A window of `height` scrolled to the top of the page.
    #[must_use]
    pub const fn at_top(height: f64) -> Self {
        Self {
            scroll_y: 0.0,
            height,
        }
    }
}

/// The section the nav should highlight.
///
/// A section matches when `top <= probe < top + height`. When several match,
/// the last one in document order wins.
#[must_use]
pub fn active_section<'a, I>(sections: I, probe: f64) -> Option<&'a str>
where
    I: IntoIterator<Item = (&'a str, Rect)>,
{
    sections
        .into_iter()
        .filter(|(_, rect)| rect.top <= probe && probe < rect.bottom())
        .last()
        .map(|(id, _)| id)
}

/// Vertical offset of the parallax layer at `index`.
#[must_use]
pub fn parallax_offset(scroll_y: f64, index: usize, direction: ParallaxDirection) -> f64 {
    let speed = 0.05f64.mul_add(f64::from(u32::try_from(index).unwrap_or(u32::MAX)), 0.1);
    match direction {
        ParallaxDirection::Up => -(scroll_y * speed),
        ParallaxDirection::Down => scroll_y * speed,
    }
}

impl<S: Surface> Page<S> {
    /// The host scrolled to `scroll_y`.
    #[instrument(skip(self))]
    pub fn on_scroll(&self, scroll_y: f64) {
        self.with_state(|state| {
            state.viewport.scroll_y = scroll_y.max(0.0);
            self.track(state);
            self.reveal_visible(state);
        });
    }

    /// The host viewport changed height.
    #[instrument(skip(self))]
    pub fn on_resize(&self, height: f64) {
        self.with_state(|state| {
            state.viewport.height = height.max(0.0);
            self.track(state);
            self.reveal_visible(state);
        });
    }

    /// Current viewport.
    #[must_use]
    pub fn viewport(&self) -> ViewportState {
        self.with_state(|state| state.viewport)
    }

    /// A nav link to `#target` was clicked.
    ///
    /// Returns the offset to scroll to (the section top minus the header
    /// height), or `None` for a bare `#` or an unknown section.
    #[instrument(skip(self))]
    pub fn click_nav(&self, target: &str) -> Option<f64> {
        let section = target.trim_start_matches('#');
        if section.is_empty() {
            return None;
        }

        self.with_state(|state| {
            self.close_menu(state);

            let layout = self.layout();
            for id in &layout.sections {
                state
                    .surface
                    .set_state(&elements::nav_link(id), VisualState::Active, id == section);
            }

            let rect = state.surface.rect(section)?;
            let header = state
                .surface
                .rect(elements::HEADER)
                .map_or(0.0, |r| r.height);
            let offset = (rect.top - header).max(0.0);
            tracing::debug!(section, offset, "scrolling to section");
            Some(offset)
        })
    }

    /// The back-to-top button was clicked. Returns the offset to scroll to.
    #[instrument(skip(self))]
    pub fn click_back_to_top(&self) -> f64 {
        tracing::debug!("scrolling to top");
        0.0
    }

    /// Apply every scroll-dependent visual state.
    pub(crate) fn track(&self, state: &mut PageState<S>) {
        let scroll = self.config().scroll;
        let layout = self.layout();
        let y = state.viewport.scroll_y;

        state
            .surface
            .set_state(elements::HEADER, VisualState::Scrolled, y > scroll.header_compact_at);
        state
            .surface
            .set_state(elements::BACK_TO_TOP, VisualState::Visible, y > scroll.back_to_top_at);

        let surface = &state.surface;
        let current = active_section(
            layout
                .sections
                .iter()
                .filter_map(|id| surface.rect(id).map(|rect| (id.as_str(), rect))),
            y + scroll.nav_offset,
        );
        for id in &layout.sections {
            state.surface.set_state(
                &elements::nav_link(id),
                VisualState::Active,
                current == Some(id.as_str()),
            );
        }

        for (index, layer) in layout.parallax_layers.iter().enumerate() {
            let offset = parallax_offset(y, index, layout.parallax_direction);
            state.surface.set_style(
                layer,
                StyleProperty::Transform,
                &format!("translateY({offset:.2}px)"),
            );
        }

        tracing::debug!(scroll_y = y, section = ?current, "viewport tracked");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::StorefrontConfig;
    use crate::layout::PageLayout;
    use crate::surface::MemorySurface;

    fn sections() -> Vec<(&'static str, Rect)> {
        vec![
            ("home", Rect::band(0.0, 800.0)),
            ("about", Rect::band(800.0, 600.0)),
            ("skills", Rect::band(1400.0, 500.0)),
        ]
    }

    #[test]
    fn test_active_section_bounds() {
        assert_eq!(active_section(sections(), 150.0), Some("home"));
        assert_eq!(active_section(sections(), 800.0), Some("about"));
        assert_eq!(active_section(sections(), 1399.9), Some("about"));
        assert_eq!(active_section(sections(), 1900.0), None);
    }

    #[test]
    fn test_active_section_last_match_wins() {
        let overlapping = vec![
            ("hero", Rect::band(0.0, 1000.0)),
            ("intro", Rect::band(200.0, 300.0)),
        ];
        assert_eq!(active_section(overlapping.clone(), 250.0), Some("intro"));
        assert_eq!(active_section(overlapping, 600.0), Some("hero"));
    }

    #[test]
    fn test_parallax_speeds() {
        assert!((parallax_offset(1000.0, 0, ParallaxDirection::Down) - 100.0).abs() < 1e-9);
        assert!((parallax_offset(1000.0, 2, ParallaxDirection::Down) - 200.0).abs() < 1e-9);
        assert!((parallax_offset(1000.0, 1, ParallaxDirection::Up) + 150.0).abs() < 1e-9);
    }

    fn portfolio_surface() -> MemorySurface {
        MemorySurface::new()
            .with_rect(elements::HEADER, Rect::band(0.0, 80.0))
            .with_rect("home", Rect::band(0.0, 800.0))
            .with_rect("about", Rect::band(800.0, 600.0))
            .with_rect("skills", Rect::band(1400.0, 500.0))
    }

    #[tokio::test(start_paused = true)]
    async fn test_scroll_thresholds() {
        let page = Page::load(
            portfolio_surface(),
            StorefrontConfig::default(),
            PageLayout::portfolio(),
            ViewportState::at_top(800.0),
        );

        page.on_scroll(100.0);
        page.inspect(|s| {
            assert!(!s.has_state(elements::HEADER, VisualState::Scrolled));
            assert!(!s.has_state(elements::BACK_TO_TOP, VisualState::Visible));
        });

        page.on_scroll(101.0);
        assert!(page.inspect(|s| s.has_state(elements::HEADER, VisualState::Scrolled)));

        page.on_scroll(700.0);
        page.inspect(|s| {
            assert!(s.has_state(elements::BACK_TO_TOP, VisualState::Visible));
            assert_eq!(s.with_state(VisualState::Active), vec!["nav-link-about"]);
            assert_eq!(
                s.style("floating-shape-2", StyleProperty::Transform),
                Some("translateY(-105.00px)")
            );
        });

        page.on_scroll(0.0);
        page.inspect(|s| {
            assert!(!s.has_state(elements::HEADER, VisualState::Scrolled));
            assert!(!s.has_state(elements::BACK_TO_TOP, VisualState::Visible));
            assert_eq!(s.with_state(VisualState::Active), vec!["nav-link-home"]);
        });
    }

    #[tokio::test(start_paused = true)]
    async fn test_nav_click_offsets_by_header() {
        let page = Page::load(
            portfolio_surface(),
            StorefrontConfig::default(),
            PageLayout::portfolio(),
            ViewportState::at_top(800.0),
        );

        assert_eq!(page.click_nav("#skills"), Some(1320.0));
        assert!(page.inspect(|s| s.has_state("nav-link-skills", VisualState::Active)));
        assert_eq!(page.click_nav("#"), None);
        assert_eq!(page.click_nav("#missing"), None);
        assert!((page.click_back_to_top()).abs() < f64::EPSILON);
    }
}
