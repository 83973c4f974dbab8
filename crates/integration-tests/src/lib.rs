//! End-to-end tests for the PhoneHub page engine.
//!
//! Every test loads a page onto a [`MemorySurface`] laid out like the real
//! sites and drives it through public handlers on a paused tokio clock.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p phonehub-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `auth_flows` - Modal, login and registration
//! - `notifications` - Notification lifecycle
//! - `scrolling` - Scroll tracking, reveal and counters
//! - `catalog` - Cart, wishlist, filtering, search and the converter page

use phonehub_core::TransientId;
use phonehub_storefront::surface::TransientSnapshot;
use phonehub_storefront::{
    MemorySurface, Page, PageLayout, Rect, StorefrontConfig, ViewportState, elements,
};

/// Viewport height used by the test pages.
pub const VIEWPORT_HEIGHT: f64 = 900.0;

/// A PhoneHub shop page with its sections laid out top to bottom.
#[must_use]
pub fn phonehub_page() -> Page<MemorySurface> {
    let surface = MemorySurface::new()
        .with_rect(elements::HEADER, Rect::band(0.0, 72.0))
        .with_rect("home", Rect::band(0.0, 900.0))
        .with_rect("hero-stats", Rect::band(1000.0, 120.0))
        .with_rect("products", Rect::band(900.0, 1400.0))
        .with_rect("products-grid", Rect::band(1000.0, 1200.0))
        .with_rect("features", Rect::band(2300.0, 800.0))
        .with_rect("about", Rect::band(3100.0, 700.0))
        .with_rect("contact", Rect::band(3800.0, 900.0));
    load(surface, PageLayout::phonehub())
}

/// A portfolio page with its sections laid out top to bottom.
#[must_use]
pub fn portfolio_page() -> Page<MemorySurface> {
    let surface = MemorySurface::new()
        .with_rect(elements::HEADER, Rect::band(0.0, 80.0))
        .with_rect("home", Rect::band(0.0, 900.0))
        .with_rect("about", Rect::band(900.0, 700.0))
        .with_rect("about-content", Rect::band(1000.0, 500.0))
        .with_rect("skills", Rect::band(1600.0, 600.0))
        .with_rect("skill-html", Rect::band(1700.0, 60.0))
        .with_rect("skill-css", Rect::band(1780.0, 60.0))
        .with_rect("skill-js", Rect::band(1860.0, 60.0))
        .with_rect("services", Rect::band(2200.0, 800.0))
        .with_rect("portfolio", Rect::band(3000.0, 900.0))
        .with_rect("stat-projects", Rect::band(3100.0, 100.0))
        .with_rect("stat-clients", Rect::band(3100.0, 100.0))
        .with_rect("stat-years", Rect::band(3100.0, 100.0))
        .with_rect("contact", Rect::band(3900.0, 800.0))
        .with_rect("hero-cta", Rect::new(200.0, 600.0, 180.0, 48.0));
    load(surface, PageLayout::portfolio())
}

/// The converter page.
#[must_use]
pub fn converter_page() -> Page<MemorySurface> {
    load(MemorySurface::new(), PageLayout::converter())
}

fn load(surface: MemorySurface, layout: PageLayout) -> Page<MemorySurface> {
    Page::load(
        surface,
        StorefrontConfig::default(),
        layout,
        ViewportState::at_top(VIEWPORT_HEIGHT),
    )
}

/// Notifications currently attached to the page body, oldest first.
#[must_use]
pub fn notifications(page: &Page<MemorySurface>) -> Vec<TransientSnapshot> {
    page.inspect(|s| s.transients_in(elements::BODY).cloned().collect())
}

/// Whether a transient is still attached.
#[must_use]
pub fn attached(page: &Page<MemorySurface>, id: TransientId) -> bool {
    page.inspect(|s| s.transient(id).is_some())
}

/// Text of an element.
#[must_use]
pub fn text(page: &Page<MemorySurface>, element: &str) -> Option<String> {
    page.inspect(|s| s.text(element).map(String::from))
}
