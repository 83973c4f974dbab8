//! Rendering surface contract.
//!
//! The engine never touches markup directly. Everything it does to a page goes
//! through [`Surface`]: geometry queries, named visual-state toggles, text and
//! inline-style writes, and insertion/removal of transient fragments such as
//! notifications and ripples.
//!
//! Elements are addressed by label (see [`crate::elements`]). A host maps
//! labels to whatever its element tree uses.

mod memory;

use phonehub_core::TransientId;
use serde::{Deserialize, Serialize};

pub use memory::{ElementSnapshot, MemorySurface, TransientSnapshot};

/// Element box in document coordinates (CSS pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rect.
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// A full-width band starting at `top`, as sections are laid out.
    #[must_use]
    pub const fn band(top: f64, height: f64) -> Self {
        Self::new(0.0, top, 0.0, height)
    }

    /// Document offset of the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Named visual states a host styles (class toggles in a browser).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualState {
    /// Header past the compact threshold.
    Scrolled,
    /// Floating control (back-to-top) shown.
    Visible,
    /// Revealed element, highlighted nav link, open menu or modal, pressed toggle.
    Active,
}

/// Inline style properties the engine writes, serialized as CSS property names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleProperty {
    Transform,
    Width,
    Display,
    Opacity,
    Fill,
    Overflow,
    AnimationDelay,
}

/// Host primitives the engine drives.
///
/// Writes to labels the host does not know are ignored by the host; geometry
/// for an unknown label is `None` and the engine skips that element.
pub trait Surface: Send + 'static {
    /// Document-coordinate box of an element.
    fn rect(&self, element: &str) -> Option<Rect>;

    /// Turn a named visual state on or off. Idempotent.
    fn set_state(&mut self, element: &str, state: VisualState, on: bool);

    /// Whether a visual state is currently on.
    fn has_state(&self, element: &str, state: VisualState) -> bool;

    /// Replace an element's text content.
    fn set_text(&mut self, element: &str, text: &str);

    /// Replace an element's inner markup with a rendered fragment.
    fn set_markup(&mut self, element: &str, markup: &str);

    /// Set an inline style property.
    fn set_style(&mut self, element: &str, property: StyleProperty, value: &str);

    /// Remove an inline style property, restoring the stylesheet value.
    fn clear_style(&mut self, element: &str, property: StyleProperty);

    /// Set an attribute (e.g. an input's `type`).
    fn set_attribute(&mut self, element: &str, name: &str, value: &str);

    /// Read an attribute.
    fn attribute(&self, element: &str, name: &str) -> Option<String>;

    /// Clear every field of a form.
    fn reset_form(&mut self, form: &str);

    /// Append a transient fragment to `parent`.
    fn insert_transient(&mut self, id: TransientId, parent: &str, markup: String);

    /// Start a transient's exit transition. Returns false if it is gone.
    fn begin_exit(&mut self, id: TransientId) -> bool;

    /// Remove a transient. Returns false if it was already removed.
    fn remove_transient(&mut self, id: TransientId) -> bool;

    /// Whether a transient is still attached.
    fn contains_transient(&self, id: TransientId) -> bool;
}
