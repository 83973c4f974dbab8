//! PhoneHub Core - Shared types library.
//!
//! This crate provides the types used by every PhoneHub component:
//! - `storefront` - The page interaction engine (scroll, counters, notifications, forms)
//! - `cli` - Command-line converter and headless page replay
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no timers, no
//! rendering surface, no I/O. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Currency conversion, password validation, transient ids and
//!   the small enums shared by the page components

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
