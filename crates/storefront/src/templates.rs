//! Fragment templates.
//!
//! Every piece of markup the engine inserts into a page is rendered here from
//! a view model, so handlers deal only in data.

use askama::Template;

use crate::filters;
use crate::handlers::effects::Ripple;
use crate::handlers::notify::Notification;

/// Toast shown by the notification emitter.
#[derive(Template)]
#[template(path = "partials/notification.html")]
pub struct NotificationTemplate<'a> {
    pub notification: &'a Notification,
}

/// Click ripple inside a button.
#[derive(Template)]
#[template(path = "partials/ripple.html")]
pub struct RippleTemplate<'a> {
    pub ripple: &'a Ripple,
}

/// Full-screen product search overlay.
#[derive(Template)]
#[template(path = "partials/search_overlay.html")]
pub struct SearchOverlayTemplate<'a> {
    pub suggestions: Vec<&'a str>,
}

/// Contents of the login button once signed in.
#[derive(Template)]
#[template(path = "partials/logged_in.html")]
pub struct LoggedInTemplate<'a> {
    pub greeting: &'a str,
}

/// Footer copyright year.
#[derive(Template)]
#[template(source = "{{ \"\"|current_year }}", ext = "txt")]
pub struct FooterYearTemplate;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Datelike;
    use phonehub_core::Severity;

    use super::*;

    #[test]
    fn test_notification_escapes_message() {
        let notification = Notification::new("<b>Xiaomi</b> & co", Severity::Error);
        let html = NotificationTemplate {
            notification: &notification,
        }
        .render()
        .unwrap();

        assert!(html.contains("notification-error"));
        assert!(html.contains("#ef4444"));
        assert!(html.contains("icon-error"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;b&gt;Xiaomi"));
    }

    #[test]
    fn test_ripple_geometry() {
        let ripple = Ripple {
            size: 120.0,
            left: -10.5,
            top: 4.0,
        };
        let html = RippleTemplate { ripple: &ripple }.render().unwrap();
        assert!(html.contains("width: 120px"));
        assert!(html.contains("left: -10.5px"));
    }

    #[test]
    fn test_search_overlay_suggestions() {
        let html = SearchOverlayTemplate {
            suggestions: vec!["iPhone 15", "Xiaomi 14"],
        }
        .render()
        .unwrap();
        assert!(html.contains("Gợi ý: iPhone 15, Xiaomi 14"));

        let html = SearchOverlayTemplate {
            suggestions: Vec::new(),
        }
        .render()
        .unwrap();
        assert!(!html.contains("search-suggestions"));
    }

    #[test]
    fn test_footer_year() {
        let year = FooterYearTemplate.render().unwrap();
        assert_eq!(year, chrono::Utc::now().year().to_string());
    }
}
