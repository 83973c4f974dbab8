//! Page session state shared across handlers.

use std::collections::HashSet;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use phonehub_core::{ExchangeRateTable, TransientId};
use tokio::time::Instant;

use crate::config::StorefrontConfig;
use crate::frames::FrameClock;
use crate::handlers::catalog::CartState;
use crate::handlers::forms::AuthState;
use crate::handlers::scroll::ViewportState;
use crate::layout::PageLayout;
use crate::surface::Surface;
use crate::tasks::TaskSet;

/// Lock a mutex, recovering the data if a previous holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One loaded page.
///
/// This struct is cheaply cloneable via `Arc`; scheduled callbacks hold a
/// clone. All mutable page-lifetime state (viewport, cart, auth view, counter
/// guards) lives in a single [`PageState`] behind one lock, created when the
/// page loads and dropped with the last handle.
///
/// Handlers spawn timers and frame loops, so a page must be loaded and driven
/// from inside a tokio runtime.
pub struct Page<S> {
    inner: Arc<PageInner<S>>,
}

impl<S> Clone for Page<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct PageInner<S> {
    config: StorefrontConfig,
    layout: PageLayout,
    rates: ExchangeRateTable,
    origin: Instant,
    state: Mutex<PageState<S>>,
    tasks: TaskSet,
}

/// Mutable page-lifetime state.
pub struct PageState<S> {
    pub(crate) surface: S,
    pub(crate) viewport: ViewportState,
    pub(crate) cart: CartState,
    pub(crate) auth: AuthState,
    pub(crate) menu_open: bool,
    pub(crate) wishlist: HashSet<String>,
    /// One flag per layout counter group; set when the group starts.
    pub(crate) counters_started: Vec<bool>,
    pub(crate) headline_index: usize,
    pub(crate) search_overlay: Option<TransientId>,
    last_transient: TransientId,
}

impl<S> PageState<S> {
    /// Allocate a handle for a new transient element.
    pub(crate) const fn next_transient_id(&mut self) -> TransientId {
        self.last_transient = self.last_transient.next();
        self.last_transient
    }
}

impl<S: Surface> Page<S> {
    /// Create the session for a freshly loaded page and run its load handlers.
    ///
    /// `viewport` is the window as the page finished loading; elements already
    /// in view are revealed and their counters started before this returns.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn load(
        surface: S,
        config: StorefrontConfig,
        layout: PageLayout,
        viewport: ViewportState,
    ) -> Self {
        Self::load_with_rates(surface, config, layout, viewport, ExchangeRateTable::vnd_base())
    }

    /// Like [`Self::load`] with a custom exchange-rate table.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn load_with_rates(
        surface: S,
        config: StorefrontConfig,
        layout: PageLayout,
        viewport: ViewportState,
        rates: ExchangeRateTable,
    ) -> Self {
        let state = PageState {
            surface,
            viewport: ViewportState {
                scroll_y: viewport.scroll_y.max(0.0),
                height: viewport.height.max(0.0),
            },
            cart: CartState::default(),
            auth: AuthState::default(),
            menu_open: false,
            wishlist: HashSet::new(),
            counters_started: vec![false; layout.counter_groups.len()],
            headline_index: 0,
            search_overlay: None,
            last_transient: TransientId::new(0),
        };

        let page = Self {
            inner: Arc::new(PageInner {
                config,
                layout,
                rates,
                origin: Instant::now(),
                state: Mutex::new(state),
                tasks: TaskSet::default(),
            }),
        };

        tracing::info!(page = %page.layout().name, ?viewport, "page loaded");
        page.on_load();
        page
    }

    /// Get a reference to the page configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the page layout.
    #[must_use]
    pub fn layout(&self) -> &PageLayout {
        &self.inner.layout
    }

    /// Get a reference to the exchange-rate table.
    #[must_use]
    pub fn rates(&self) -> &ExchangeRateTable {
        &self.inner.rates
    }

    /// Read the surface.
    pub fn inspect<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&lock(&self.inner.state).surface)
    }

    /// Number of callbacks still scheduled.
    #[must_use]
    pub fn pending_callbacks(&self) -> usize {
        self.inner.tasks.pending()
    }

    /// Leave the page: cancel every pending timer and frame loop.
    ///
    /// Returns the number of callbacks cancelled.
    pub fn teardown(&self) -> usize {
        let cancelled = self.inner.tasks.abort_all();
        tracing::info!(page = %self.layout().name, cancelled, "page torn down");
        cancelled
    }

    /// Run `f` with exclusive access to the page state.
    ///
    /// `f` must not call back into another locking method of the page.
    pub(crate) fn with_state<R>(&self, f: impl FnOnce(&mut PageState<S>) -> R) -> R {
        f(&mut lock(&self.inner.state))
    }

    /// Schedule a callback owned by this page.
    pub(crate) fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.inner.tasks.spawn(future);
    }

    /// A frame clock for one animation.
    pub(crate) fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.config().timings.frame_interval, self.inner.origin)
    }
}
