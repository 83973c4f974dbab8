//! Page event handlers.
//!
//! Each module adds methods to [`Page`] for one group of events. Public
//! methods lock the page state once; crate-internal helpers take the already
//! locked [`PageState`](crate::state::PageState) so they can be combined inside a single handler.

pub mod catalog;
pub mod converter;
pub mod counter;
pub mod effects;
pub mod forms;
pub mod notify;
pub mod reveal;
pub mod scroll;

use crate::state::Page;
use crate::surface::Surface;

impl<S: Surface> Page<S> {
    /// Page finished loading.
    pub(crate) fn on_load(&self) {
        self.with_state(|state| {
            self.track(state);
            self.reveal_visible(state);
            self.start_effects(state);
        });
    }
}
