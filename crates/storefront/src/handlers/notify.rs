//! Notification emitter.
//!
//! A notification is inserted into the page body immediately, starts its exit
//! transition after the display period and is removed once the transition has
//! run. Each notification owns its own timer; nothing is queued or merged.

use askama::Template;
use phonehub_core::{Severity, TransientId};
use serde::Serialize;
use tracing::instrument;

use crate::elements;
use crate::error::AppError;
use crate::state::{Page, PageState};
use crate::surface::Surface;
use crate::templates::NotificationTemplate;

/// View model of one notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    /// Create a new notification.
    #[must_use]
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }

    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Success)
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Error)
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Info)
    }

    /// Icon shown next to the message.
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self.severity {
            Severity::Success => "check",
            Severity::Error => "error",
            Severity::Info => "info",
        }
    }
}

impl<S: Surface> Page<S> {
    /// Show a notification and schedule its removal.
    #[instrument(skip(self, message))]
    pub fn notify(&self, message: &str, severity: Severity) -> TransientId {
        self.with_state(|state| self.emit(state, Notification::new(message, severity)))
    }

    /// Like [`Self::notify`] with a severity tag; unknown tags show as `info`.
    pub fn notify_tagged(&self, message: &str, tag: &str) -> TransientId {
        self.notify(message, Severity::from_tag(tag))
    }

    /// Surface a handler error as an `error` notification.
    pub(crate) fn emit_error(&self, state: &mut PageState<S>, err: &AppError) {
        err.report();
        self.emit(state, Notification::error(err.user_message()));
    }

    /// Insert a notification while the state is already locked.
    pub(crate) fn emit(&self, state: &mut PageState<S>, notification: Notification) -> TransientId {
        let id = state.next_transient_id();
        let markup = match (NotificationTemplate {
            notification: &notification,
        })
        .render()
        {
            Ok(markup) => markup,
            Err(e) => {
                AppError::from(e).report();
                return id;
            }
        };

        state.surface.insert_transient(id, elements::BODY, markup);
        tracing::debug!(%id, severity = %notification.severity, message = %notification.message, "notification shown");

        let timings = self.config().timings;
        let page = self.clone();
        self.spawn(async move {
            tokio::time::sleep(timings.notification_display).await;
            if !page.with_state(|state| state.surface.begin_exit(id)) {
                tracing::debug!(%id, "notification already gone");
                return;
            }

            tokio::time::sleep(timings.notification_exit).await;
            page.with_state(|state| {
                if !state.surface.remove_transient(id) {
                    tracing::debug!(%id, "notification removed by host");
                }
            });
        });

        id
    }
}
