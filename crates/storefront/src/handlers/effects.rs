//! Decorative page effects and the small widgets around them.

use std::time::Duration;

use askama::Template;
use serde::Serialize;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::instrument;

use crate::elements;
use crate::error::AppError;
use crate::state::{Page, PageState};
use crate::surface::{StyleProperty, Surface, VisualState};
use crate::templates::{FooterYearTemplate, RippleTemplate, SearchOverlayTemplate};

const RIPPLE_DURATION: Duration = Duration::from_millis(600);
const SEARCH_FADE: Duration = Duration::from_millis(300);
const HEADLINE_PERIOD: Duration = Duration::from_millis(3000);
const FADE_IN_STEP_MS: usize = 200;

/// Geometry of a click ripple, relative to its button.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ripple {
    pub size: f64,
    pub left: f64,
    pub top: f64,
}

/// CSS delay for the fade-in element at `index`.
#[must_use]
pub fn fade_in_delay(index: usize) -> String {
    let ms = index.saturating_mul(FADE_IN_STEP_MS);
    format!("{}.{}s", ms / 1000, (ms % 1000) / 100)
}

impl<S: Surface> Page<S> {
    /// Whether the mobile menu is open.
    #[must_use]
    pub fn is_menu_open(&self) -> bool {
        self.with_state(|state| state.menu_open)
    }

    /// Hamburger button clicked.
    #[instrument(skip(self))]
    pub fn toggle_menu(&self) -> bool {
        self.with_state(|state| {
            let open = !state.menu_open;
            self.set_menu(state, open);
            open
        })
    }

    /// A click landed outside both the menu and its toggle.
    pub fn click_outside_menu(&self) {
        self.with_state(|state| self.close_menu(state));
    }

    pub(crate) fn close_menu(&self, state: &mut PageState<S>) {
        if state.menu_open {
            self.set_menu(state, false);
        }
    }

    fn set_menu(&self, state: &mut PageState<S>, open: bool) {
        state.menu_open = open;
        state
            .surface
            .set_state(elements::MENU_TOGGLE, VisualState::Active, open);
        state
            .surface
            .set_state(elements::NAV_MENU, VisualState::Active, open);

        if self.layout().lock_scroll_with_menu {
            if open {
                state
                    .surface
                    .set_style(elements::BODY, StyleProperty::Overflow, "hidden");
            } else {
                state
                    .surface
                    .clear_style(elements::BODY, StyleProperty::Overflow);
            }
        }
    }

    /// A button was clicked at document point (`x`, `y`). Adds a ripple that
    /// removes itself when its animation ends.
    #[instrument(skip(self))]
    pub fn click_button(&self, button: &str, x: f64, y: f64) -> Option<Ripple> {
        self.with_state(|state| {
            let rect = state.surface.rect(button)?;
            let size = rect.width.max(rect.height);
            let ripple = Ripple {
                size,
                left: x - rect.left - size / 2.0,
                top: y - rect.top - size / 2.0,
            };

            let markup = match (RippleTemplate { ripple: &ripple }).render() {
                Ok(markup) => markup,
                Err(e) => {
                    AppError::from(e).report();
                    return None;
                }
            };
            let id = state.next_transient_id();
            state.surface.insert_transient(id, button, markup);

            let page = self.clone();
            self.spawn(async move {
                tokio::time::sleep(RIPPLE_DURATION).await;
                page.with_state(|state| state.surface.remove_transient(id));
            });
            Some(ripple)
        })
    }

    /// Pointer entered or left a service card.
    pub fn hover_service(&self, card: &str, entered: bool) {
        let transform = if entered {
            "rotateY(180deg) scale(1.1)"
        } else {
            "rotateY(0deg) scale(1)"
        };
        self.with_state(|state| {
            state.surface.set_style(
                &elements::service_icon(card),
                StyleProperty::Transform,
                transform,
            );
        });
    }

    /// Whether the search overlay is showing.
    #[must_use]
    pub fn is_search_open(&self) -> bool {
        self.with_state(|state| state.search_overlay.is_some())
    }

    /// Search button clicked.
    #[instrument(skip(self))]
    pub fn open_search(&self) {
        let suggestions: Vec<&str> = self
            .layout()
            .products
            .iter()
            .take(3)
            .map(|p| p.name.as_str())
            .collect();
        let markup = match (SearchOverlayTemplate { suggestions }).render() {
            Ok(markup) => markup,
            Err(e) => {
                AppError::from(e).report();
                return;
            }
        };

        self.with_state(|state| {
            if state.search_overlay.is_some() {
                return;
            }
            let id = state.next_transient_id();
            state.surface.insert_transient(id, elements::BODY, markup);
            state.search_overlay = Some(id);
        });
    }

    /// Search close button or backdrop clicked. The overlay fades out, then
    /// is removed.
    #[instrument(skip(self))]
    pub fn close_search(&self) {
        let Some(id) = self.with_state(|state| {
            let id = state.search_overlay.take()?;
            state.surface.begin_exit(id).then_some(id)
        }) else {
            return;
        };

        let page = self.clone();
        self.spawn(async move {
            tokio::time::sleep(SEARCH_FADE).await;
            page.with_state(|state| {
                if !state.surface.remove_transient(id) {
                    tracing::debug!(%id, "search overlay already removed");
                }
            });
        });
    }

    /// Text typed into the search box.
    pub fn search_input(&self, query: &str) {
        tracing::info!(query, "search");
    }

    /// Load-time effects: footer year, fade-in stagger, headline rotation.
    pub(crate) fn start_effects(&self, state: &mut PageState<S>) {
        let layout = self.layout();

        if layout.footer_year {
            match FooterYearTemplate.render() {
                Ok(year) => state.surface.set_text(elements::CURRENT_YEAR, &year),
                Err(e) => AppError::from(e).report(),
            }
        }

        for (index, element) in layout.fade_in.iter().enumerate() {
            state
                .surface
                .set_style(element, StyleProperty::AnimationDelay, &fade_in_delay(index));
        }

        if layout.headline_words.len() > 1 {
            let page = self.clone();
            self.spawn(async move { page.rotate_headline().await });
        }
    }

    async fn rotate_headline(&self) {
        let mut ticker =
            tokio::time::interval_at(Instant::now() + HEADLINE_PERIOD, HEADLINE_PERIOD);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let words = &self.layout().headline_words;

        loop {
            ticker.tick().await;
            self.with_state(|state| {
                state.headline_index = (state.headline_index + 1) % words.len();
                if let Some(word) = words.get(state.headline_index) {
                    state.surface.set_text(elements::HEADLINE_HIGHLIGHT, word);
                }
            });
        }
    }
}
