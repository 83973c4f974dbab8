//! Element labels shared by the engine and its hosts.
//!
//! Fixed page furniture has a constant label. Repeated elements (nav links,
//! filter buttons, card buttons) derive theirs from the owning item.

pub const BODY: &str = "body";
pub const HEADER: &str = "header";
pub const BACK_TO_TOP: &str = "back-to-top";
pub const NAV_MENU: &str = "nav-menu";
pub const MENU_TOGGLE: &str = "menu-toggle";
pub const CURRENT_YEAR: &str = "current-year";
pub const HEADLINE_HIGHLIGHT: &str = "hero-highlight";
pub const CART_COUNT: &str = "cart-count";

pub const AUTH_MODAL: &str = "auth-modal";
pub const LOGIN_BUTTON: &str = "login-button";
pub const LOGIN_FORM: &str = "login-form";
pub const REGISTER_FORM: &str = "register-form";
pub const CONTACT_FORM: &str = "contact-form";
pub const NEWSLETTER_FORM: &str = "newsletter-form";

pub const CONVERTER_RESULT: &str = "result";

/// Nav link pointing at `#section`.
#[must_use]
pub fn nav_link(section: &str) -> String {
    format!("nav-link-{section}")
}

/// Product filter button for a category (or `all`).
#[must_use]
pub fn filter_button(filter: &str) -> String {
    format!("filter-{filter}")
}

/// "Add to cart" button on a product card.
#[must_use]
pub fn add_to_cart_button(card: &str) -> String {
    format!("{card}-add")
}

/// Wishlist button on a product card.
#[must_use]
pub fn wishlist_button(card: &str) -> String {
    format!("{card}-wishlist")
}

/// Icon inside a service card.
#[must_use]
pub fn service_icon(card: &str) -> String {
    format!("{card}-icon")
}

/// Show/hide toggle next to a password input.
#[must_use]
pub fn password_toggle(field: &str) -> String {
    format!("{field}-toggle")
}
