//! PhoneHub page interaction engine.
//!
//! Drives the interactive behaviour of the PhoneHub shop, the portfolio page
//! and the currency converter against an abstract rendering [`Surface`]:
//! scroll tracking, reveal and counter animations, notifications, forms, the
//! product grid and decorative effects.
//!
//! # Architecture
//!
//! - [`Page`] is the session for one loaded page. It owns all page-lifetime
//!   state and every timer or frame loop it schedules.
//! - Handlers are methods on [`Page`], one module per event group under
//!   [`handlers`].
//! - Timers and frames run on tokio; a page must be driven from inside a
//!   runtime.
//! - Inserted fragments are rendered with Askama templates.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod elements;
pub mod error;
mod filters;
pub mod frames;
pub mod handlers;
pub mod layout;
pub mod state;
pub mod surface;
pub mod tasks;
pub mod templates;

pub use config::StorefrontConfig;
pub use error::AppError;
pub use handlers::converter::ConverterForm;
pub use handlers::forms::{ContactForm, LoginForm, NewsletterForm, RegisterForm};
pub use handlers::notify::Notification;
pub use handlers::scroll::ViewportState;
pub use layout::PageLayout;
pub use state::Page;
pub use surface::{MemorySurface, Rect, StyleProperty, Surface, VisualState};
