//! Headless event replay.
//!
//! Loads a page onto an in-memory surface, feeds it a timed list of events and
//! reports the resulting page state. Useful for checking a layout without a
//! browser.
//!
//! # Script format
//!
//! ```json
//! {
//!   "layout": "phonehub",
//!   "viewport_height": 900,
//!   "rects": { "hero-stats": { "top": 600, "height": 120 } },
//!   "events": [
//!     { "at_ms": 0, "event": { "type": "add_to_cart", "card": "xiaomi-14" } },
//!     { "at_ms": 500, "event": { "type": "scroll", "y": 300 } }
//!   ]
//! }
//! ```
//!
//! `layout` is either a preset name or an inline layout object. Events run in
//! order; `at_ms` is measured from page load.
//!
//! # Environment Variables
//!
//! The page engine configuration is read from `PHONEHUB_*` variables (see
//! `phonehub_storefront::config`).

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use phonehub_core::{ActionKind, FormView, SocialProvider};
use phonehub_storefront::config::ConfigError;
use phonehub_storefront::handlers::scroll::ViewportState;
use phonehub_storefront::{
    ContactForm, ConverterForm, LoginForm, MemorySurface, NewsletterForm, Page, PageLayout, Rect,
    RegisterForm, StorefrontConfig,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Window height used when a script does not give one.
const DEFAULT_VIEWPORT_HEIGHT: f64 = 900.0;

/// Errors that can occur while replaying.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// Script file could not be read.
    #[error("Failed to read script: {0}")]
    Io(#[from] std::io::Error),

    /// Script is not valid JSON or has the wrong shape.
    #[error("Invalid script: {0}")]
    Script(#[from] serde_json::Error),

    /// Engine configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Script names a layout preset that does not exist.
    #[error("Unknown layout preset: {0}. Valid presets: portfolio, phonehub, converter")]
    UnknownPreset(String),
}

/// Layout selection in a script.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LayoutSource {
    Preset(String),
    Inline(Box<PageLayout>),
}

/// A replay script.
#[derive(Debug, Deserialize)]
pub struct Script {
    pub layout: LayoutSource,
    #[serde(default)]
    pub viewport_height: Option<f64>,
    #[serde(default)]
    pub rects: BTreeMap<String, Rect>,
    #[serde(default)]
    pub events: Vec<TimedEvent>,
}

/// An event and when it happens.
#[derive(Debug, Deserialize)]
pub struct TimedEvent {
    #[serde(default)]
    pub at_ms: u64,
    pub event: Event,
}

/// Page events a script can send.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    Scroll { y: f64 },
    Resize { height: f64 },
    NavClick { target: String },
    BackToTop,
    MenuToggle,
    ClickOutsideMenu,
    ButtonClick { element: String, x: f64, y: f64 },
    ServiceHover { card: String, entered: bool },
    Filter { filter: String },
    AddToCart { card: String },
    ProductAction { card: String, action: ActionKind },
    OpenSearch,
    CloseSearch,
    SearchInput { query: String },
    OpenAuth,
    CloseAuth,
    Key { key: String },
    SwitchForm { view: FormView },
    TogglePassword { field: String },
    Login(LoginForm),
    Register(RegisterForm),
    SocialLogin { provider: SocialProvider },
    ForgotPassword { email: String },
    Contact(ContactForm),
    Newsletter(NewsletterForm),
    Convert(ConverterForm),
    Notify { message: String, severity: String },
}

/// Page state after a replay.
#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub layout: String,
    pub elapsed_ms: u64,
    pub viewport: ViewportState,
    pub cart_count: u32,
    pub form_view: FormView,
    pub logged_in: bool,
    pub surface: MemorySurface,
}

/// Read a script file and replay it.
///
/// # Errors
///
/// Returns `ReplayError` if the script cannot be read or parsed, names an
/// unknown preset, or the engine configuration is invalid.
pub fn run_file(path: &Path, settle_ms: u64, realtime: bool) -> Result<ReplayReport, ReplayError> {
    let raw = std::fs::read_to_string(path)?;
    let script: Script = serde_json::from_str(&raw)?;
    tracing::info!(path = %path.display(), events = script.events.len(), "replaying script");
    run(script, settle_ms, realtime)
}

/// Replay a parsed script.
///
/// # Errors
///
/// Returns `ReplayError` for an unknown preset or invalid configuration.
pub fn run(script: Script, settle_ms: u64, realtime: bool) -> Result<ReplayReport, ReplayError> {
    let config = StorefrontConfig::from_env()?;
    let layout = match script.layout {
        LayoutSource::Preset(name) => {
            PageLayout::preset(&name).ok_or(ReplayError::UnknownPreset(name))?
        }
        LayoutSource::Inline(layout) => *layout,
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(!realtime)
        .build()?;

    Ok(runtime.block_on(replay(
        script.rects,
        script.viewport_height,
        script.events,
        config,
        layout,
        settle_ms,
    )))
}

async fn replay(
    rects: BTreeMap<String, Rect>,
    viewport_height: Option<f64>,
    events: Vec<TimedEvent>,
    config: StorefrontConfig,
    layout: PageLayout,
    settle_ms: u64,
) -> ReplayReport {
    let mut surface = MemorySurface::new();
    for (element, rect) in &rects {
        surface.place(element, *rect);
    }

    let start = tokio::time::Instant::now();
    let viewport = ViewportState::at_top(viewport_height.unwrap_or(DEFAULT_VIEWPORT_HEIGHT));
    let page = Page::load(surface, config, layout, viewport);

    for timed in events {
        tokio::time::sleep_until(start + Duration::from_millis(timed.at_ms)).await;
        apply(&page, timed.event);
    }
    tokio::time::sleep(Duration::from_millis(settle_ms)).await;

    let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
    let report = ReplayReport {
        layout: page.layout().name.clone(),
        elapsed_ms,
        viewport: page.viewport(),
        cart_count: page.cart_count(),
        form_view: page.form_view(),
        logged_in: page.is_logged_in(),
        surface: page.inspect(Clone::clone),
    };

    let cancelled = page.teardown();
    tracing::info!(elapsed_ms, cancelled, "replay finished");
    report
}

/// Send one event to the page. Handler errors have already been reported by
/// the page; the replay carries on.
fn apply(page: &Page<MemorySurface>, event: Event) {
    tracing::debug!(?event, "event");
    let outcome = match event {
        Event::Scroll { y } => {
            page.on_scroll(y);
            Ok(())
        }
        Event::Resize { height } => {
            page.on_resize(height);
            Ok(())
        }
        Event::NavClick { target } => {
            if let Some(offset) = page.click_nav(&target) {
                page.on_scroll(offset);
            }
            Ok(())
        }
        Event::BackToTop => {
            page.on_scroll(page.click_back_to_top());
            Ok(())
        }
        Event::MenuToggle => {
            page.toggle_menu();
            Ok(())
        }
        Event::ClickOutsideMenu => {
            page.click_outside_menu();
            Ok(())
        }
        Event::ButtonClick { element, x, y } => {
            if page.click_button(&element, x, y).is_none() {
                tracing::warn!(%element, "button has no geometry");
            }
            Ok(())
        }
        Event::ServiceHover { card, entered } => {
            page.hover_service(&card, entered);
            Ok(())
        }
        Event::Filter { filter } => {
            page.filter_products(&filter);
            Ok(())
        }
        Event::AddToCart { card } => page.add_to_cart(&card).map(|_| ()),
        Event::ProductAction { card, action } => page.product_action(&card, action),
        Event::OpenSearch => {
            page.open_search();
            Ok(())
        }
        Event::CloseSearch => {
            page.close_search();
            Ok(())
        }
        Event::SearchInput { query } => {
            page.search_input(&query);
            Ok(())
        }
        Event::OpenAuth => {
            page.open_auth_modal();
            Ok(())
        }
        Event::CloseAuth => {
            page.close_auth_modal();
            Ok(())
        }
        Event::Key { key } => {
            page.press_key(&key);
            Ok(())
        }
        Event::SwitchForm { view } => {
            page.switch_form(view);
            Ok(())
        }
        Event::TogglePassword { field } => {
            page.toggle_password_visibility(&field);
            Ok(())
        }
        Event::Login(form) => page.submit_login(&form),
        Event::Register(form) => page.submit_register(&form),
        Event::SocialLogin { provider } => {
            page.social_login(provider);
            Ok(())
        }
        Event::ForgotPassword { email } => {
            page.forgot_password(&email);
            Ok(())
        }
        Event::Contact(form) => {
            page.submit_contact(&form);
            Ok(())
        }
        Event::Newsletter(form) => {
            page.submit_newsletter(&form);
            Ok(())
        }
        Event::Convert(form) => page.submit_conversion(&form).map(|_| ()),
        Event::Notify { message, severity } => {
            page.notify_tagged(&message, &severity);
            Ok(())
        }
    };

    if let Err(e) = outcome {
        tracing::debug!(error = %e, "event rejected");
    }
}
