//! Product grid handlers: cart, wishlist, quick view and category filter.

use std::time::Duration;

use phonehub_core::ActionKind;
use tracing::instrument;

use crate::elements;
use crate::error::{AppError, Result};
use crate::layout::ProductCard;
use crate::state::{Page, PageState};
use crate::surface::{StyleProperty, Surface, VisualState};

use super::notify::Notification;

const CART_BUMP: Duration = Duration::from_millis(300);
const BUTTON_PRESS: Duration = Duration::from_millis(200);
const CARD_SHOW_DELAY: Duration = Duration::from_millis(10);
const CARD_HIDE_DELAY: Duration = Duration::from_millis(300);
const WISHLIST_FILL: &str = "#ec4899";

/// Page-lifetime cart. Only a count; items are not kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CartState {
    pub count: u32,
}

impl<S: Surface> Page<S> {
    /// Items added to the cart on this page.
    #[must_use]
    pub fn cart_count(&self) -> u32 {
        self.with_state(|state| state.cart.count)
    }

    /// Whether a product is in the wishlist.
    #[must_use]
    pub fn in_wishlist(&self, card: &str) -> bool {
        self.with_state(|state| state.wishlist.contains(card))
    }

    /// "Add to cart" clicked on a product card. Returns the new cart count.
    ///
    /// # Errors
    ///
    /// Returns `AppError::UnknownElement` if the layout has no such card.
    #[instrument(skip(self))]
    pub fn add_to_cart(&self, card: &str) -> Result<u32> {
        let product = self.product(card)?;
        let button = elements::add_to_cart_button(card);

        let count = self.with_state(|state| {
            state.cart.count = state.cart.count.saturating_add(1);
            let count = state.cart.count;

            state
                .surface
                .set_text(elements::CART_COUNT, &count.to_string());
            state
                .surface
                .set_style(elements::CART_COUNT, StyleProperty::Transform, "scale(1.5)");
            state
                .surface
                .set_style(&button, StyleProperty::Transform, "scale(0.95)");

            self.emit(
                state,
                Notification::success(format!("Đã thêm \"{}\" vào giỏ hàng", product.name)),
            );
            count
        });

        self.restore_after(
            CART_BUMP,
            elements::CART_COUNT.to_string(),
            StyleProperty::Transform,
            "scale(1)",
        );
        self.restore_after(BUTTON_PRESS, button, StyleProperty::Transform, "scale(1)");

        tracing::info!(product = %product.name, price = %product.price, count, "added to cart");
        Ok(count)
    }

    /// An icon button on a product card was clicked.
    ///
    /// # Errors
    ///
    /// Returns `AppError::UnknownElement` if the layout has no such card.
    #[instrument(skip(self))]
    pub fn product_action(&self, card: &str, action: ActionKind) -> Result<()> {
        let product = self.product(card)?;

        self.with_state(|state| match action {
            ActionKind::Wishlist => self.toggle_wishlist(state, card, product),
            ActionKind::QuickView => {
                self.emit(state, Notification::info(format!("Xem nhanh \"{}\"", product.name)));
            }
        });
        Ok(())
    }

    /// Category filter button clicked. Returns how many cards stay visible.
    #[instrument(skip(self))]
    pub fn filter_products(&self, filter: &str) -> usize {
        let layout = self.layout();

        let shown = self.with_state(|state| {
            for candidate in &layout.filters {
                state.surface.set_state(
                    &elements::filter_button(candidate),
                    VisualState::Active,
                    candidate == filter,
                );
            }

            let mut shown = 0;
            for product in &layout.products {
                if filter == "all" || product.category == filter {
                    shown += 1;
                    state
                        .surface
                        .set_style(&product.element, StyleProperty::Display, "block");
                } else {
                    state
                        .surface
                        .set_style(&product.element, StyleProperty::Opacity, "0");
                    state
                        .surface
                        .set_style(&product.element, StyleProperty::Transform, "scale(0.8)");
                }
            }
            shown
        });

        for product in &layout.products {
            let element = product.element.clone();
            if filter == "all" || product.category == filter {
                let page = self.clone();
                self.spawn(async move {
                    tokio::time::sleep(CARD_SHOW_DELAY).await;
                    page.with_state(|state| {
                        state.surface.set_style(&element, StyleProperty::Opacity, "1");
                        state
                            .surface
                            .set_style(&element, StyleProperty::Transform, "scale(1)");
                    });
                });
            } else {
                self.restore_after(CARD_HIDE_DELAY, element, StyleProperty::Display, "none");
            }
        }

        tracing::debug!(filter, shown, "products filtered");
        shown
    }

    fn toggle_wishlist(&self, state: &mut PageState<S>, card: &str, product: &ProductCard) {
        let button = elements::wishlist_button(card);
        let added = state.wishlist.insert(card.to_string());
        if !added {
            state.wishlist.remove(card);
        }

        state.surface.set_state(&button, VisualState::Active, added);
        let notification = if added {
            state
                .surface
                .set_style(&button, StyleProperty::Fill, WISHLIST_FILL);
            Notification::success(format!(
                "Đã thêm \"{}\" vào danh sách yêu thích",
                product.name
            ))
        } else {
            state.surface.set_style(&button, StyleProperty::Fill, "none");
            Notification::info(format!(
                "Đã xóa \"{}\" khỏi danh sách yêu thích",
                product.name
            ))
        };
        self.emit(state, notification);
    }

    fn product(&self, card: &str) -> Result<&ProductCard> {
        self.layout().product(card).ok_or_else(|| {
            let err = AppError::UnknownElement(card.to_string());
            err.report();
            err
        })
    }

    /// Set a style value once `delay` has passed.
    pub(crate) fn restore_after(
        &self,
        delay: Duration,
        element: String,
        property: StyleProperty,
        value: &'static str,
    ) {
        let page = self.clone();
        self.spawn(async move {
            tokio::time::sleep(delay).await;
            page.with_state(|state| state.surface.set_style(&element, property, value));
        });
    }
}
