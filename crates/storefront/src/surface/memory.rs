//! Headless in-memory surface.
//!
//! Records every write so tests and the replay tool can inspect the page after
//! a sequence of events. Writes to unknown labels create the element, like a
//! page that simply has every element the engine asks for.

use std::collections::{BTreeMap, BTreeSet};

use phonehub_core::TransientId;
use serde::Serialize;

use super::{Rect, StyleProperty, Surface, VisualState};

/// Recorded state of one element.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ElementSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rect: Option<Rect>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub states: BTreeSet<VisualState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markup: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub styles: BTreeMap<StyleProperty, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    /// Number of times the element was reset as a form.
    #[serde(skip_serializing_if = "is_zero")]
    pub resets: u32,
}

/// Recorded state of one transient fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransientSnapshot {
    pub id: TransientId,
    pub parent: String,
    pub markup: String,
    pub exiting: bool,
}

/// In-memory [`Surface`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct MemorySurface {
    elements: BTreeMap<String, ElementSnapshot>,
    transients: BTreeMap<TransientId, TransientSnapshot>,
}

impl MemorySurface {
    /// Create an empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Self::place`].
    #[must_use]
    pub fn with_rect(mut self, element: &str, rect: Rect) -> Self {
        self.place(element, rect);
        self
    }

    /// Give an element a document-coordinate box.
    pub fn place(&mut self, element: &str, rect: Rect) {
        self.entry(element).rect = Some(rect);
    }

    /// Recorded state of an element, if anything touched it.
    #[must_use]
    pub fn element(&self, element: &str) -> Option<&ElementSnapshot> {
        self.elements.get(element)
    }

    /// Current text of an element.
    #[must_use]
    pub fn text(&self, element: &str) -> Option<&str> {
        self.elements.get(element)?.text.as_deref()
    }

    /// Current markup of an element.
    #[must_use]
    pub fn markup(&self, element: &str) -> Option<&str> {
        self.elements.get(element)?.markup.as_deref()
    }

    /// Current inline style value.
    #[must_use]
    pub fn style(&self, element: &str, property: StyleProperty) -> Option<&str> {
        self.elements
            .get(element)?
            .styles
            .get(&property)
            .map(String::as_str)
    }

    /// Number of form resets recorded for `form`.
    #[must_use]
    pub fn resets(&self, form: &str) -> u32 {
        self.elements.get(form).map_or(0, |e| e.resets)
    }

    /// Labels currently carrying `state`.
    #[must_use]
    pub fn with_state(&self, state: VisualState) -> Vec<&str> {
        self.elements
            .iter()
            .filter(|(_, e)| e.states.contains(&state))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Attached transients, oldest first.
    pub fn transients(&self) -> impl Iterator<Item = &TransientSnapshot> {
        self.transients.values()
    }

    /// Attached transients under `parent`, oldest first.
    pub fn transients_in<'a>(
        &'a self,
        parent: &'a str,
    ) -> impl Iterator<Item = &'a TransientSnapshot> + 'a {
        self.transients.values().filter(move |t| t.parent == parent)
    }

    /// A single attached transient.
    #[must_use]
    pub fn transient(&self, id: TransientId) -> Option<&TransientSnapshot> {
        self.transients.get(&id)
    }

    fn entry(&mut self, element: &str) -> &mut ElementSnapshot {
        self.elements.entry(element.to_owned()).or_default()
    }
}

impl Surface for MemorySurface {
    fn rect(&self, element: &str) -> Option<Rect> {
        self.elements.get(element)?.rect
    }

    fn set_state(&mut self, element: &str, state: VisualState, on: bool) {
        let states = &mut self.entry(element).states;
        if on {
            states.insert(state);
        } else {
            states.remove(&state);
        }
    }

    fn has_state(&self, element: &str, state: VisualState) -> bool {
        self.elements
            .get(element)
            .is_some_and(|e| e.states.contains(&state))
    }

    fn set_text(&mut self, element: &str, text: &str) {
        self.entry(element).text = Some(text.to_owned());
    }

    fn set_markup(&mut self, element: &str, markup: &str) {
        self.entry(element).markup = Some(markup.to_owned());
    }

    fn set_style(&mut self, element: &str, property: StyleProperty, value: &str) {
        self.entry(element)
            .styles
            .insert(property, value.to_owned());
    }

    fn clear_style(&mut self, element: &str, property: StyleProperty) {
        if let Some(e) = self.elements.get_mut(element) {
            e.styles.remove(&property);
        }
    }

    fn set_attribute(&mut self, element: &str, name: &str, value: &str) {
        self.entry(element)
            .attributes
            .insert(name.to_owned(), value.to_owned());
    }

    fn attribute(&self, element: &str, name: &str) -> Option<String> {
        self.elements.get(element)?.attributes.get(name).cloned()
    }

    fn reset_form(&mut self, form: &str) {
        self.entry(form).resets += 1;
    }

    fn insert_transient(&mut self, id: TransientId, parent: &str, markup: String) {
        self.transients.insert(
            id,
            TransientSnapshot {
                id,
                parent: parent.to_owned(),
                markup,
                exiting: false,
            },
        );
    }

    fn begin_exit(&mut self, id: TransientId) -> bool {
        self.transients.get_mut(&id).is_some_and(|t| {
            t.exiting = true;
            true
        })
    }

    fn remove_transient(&mut self, id: TransientId) -> bool {
        self.transients.remove(&id).is_some()
    }

    fn contains_transient(&self, id: TransientId) -> bool {
        self.transients.contains_key(&id)
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_zero(n: &u32) -> bool {
    *n == 0
}
