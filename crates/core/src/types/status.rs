//! Small closed enums shared by the page components.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Notification severity.
///
/// Controls the colour and icon of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Error,
    #[default]
    Info,
}

impl Severity {
    /// Parse a severity tag, falling back to [`Severity::Info`] for anything unknown.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim() {
            "success" => Self::Success,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }

    /// The tag used in class names (`notification-<tag>`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }

    /// Background colour of the notification surface.
    #[must_use]
    pub const fn background(self) -> &'static str {
        match self {
            Self::Success => "#10b981",
            Self::Error => "#ef4444",
            Self::Info => "#6366f1",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which of the two auth forms is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FormView {
    #[default]
    Login,
    Register,
}

impl FormView {
    /// The other view.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Login => Self::Register,
            Self::Register => Self::Login,
        }
    }
}

impl std::str::FromStr for FormView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "register" => Ok(Self::Register),
            "login" => Ok(Self::Login),
            _ => Err(format!("invalid form view: {s}")),
        }
    }
}

/// Action behind a product card's icon button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Toggle the product in the wishlist.
    Wishlist,
    /// Open the quick-view preview.
    QuickView,
}

/// Third-party sign-in provider buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SocialProvider {
    Google,
    Facebook,
}

impl fmt::Display for SocialProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Google => write!(f, "Google"),
            Self::Facebook => write!(f, "Facebook"),
        }
    }
}
