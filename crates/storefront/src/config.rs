//! Page engine configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional; defaults match the shipped sites.
//!
//! - `PHONEHUB_HEADER_COMPACT_AT` - Scroll offset past which the header is compact (default: 100)
//! - `PHONEHUB_BACK_TO_TOP_AT` - Scroll offset past which back-to-top shows (default: 500)
//! - `PHONEHUB_NAV_OFFSET` - Look-ahead added to the offset for nav highlighting (default: 150)
//! - `PHONEHUB_REVEAL_MARGIN` - Distance above the viewport bottom that triggers reveal (default: 100)
//! - `PHONEHUB_NOTIFICATION_DISPLAY_MS` - How long a notification stays (default: 3000)
//! - `PHONEHUB_NOTIFICATION_EXIT_MS` - Exit transition length (default: 300)
//! - `PHONEHUB_REGISTER_SWITCH_DELAY_MS` - Delay before showing login after registering (default: 2000)
//! - `PHONEHUB_FRAME_INTERVAL_MS` - Animation frame period (default: 16)

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Page engine configuration.
#[derive(Debug, Clone, Default)]
pub struct StorefrontConfig {
    /// Scroll-driven thresholds
    pub scroll: ScrollConfig,
    /// Timer and frame durations
    pub timings: Timings,
}

/// Offsets used by the scroll tracker and reveal animator, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollConfig {
    pub header_compact_at: f64,
    pub back_to_top_at: f64,
    pub nav_offset: f64,
    pub reveal_margin: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            header_compact_at: 100.0,
            back_to_top_at: 500.0,
            nav_offset: 150.0,
            reveal_margin: 100.0,
        }
    }
}

/// Durations of the timer-driven behaviours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub notification_display: Duration,
    pub notification_exit: Duration,
    pub register_switch_delay: Duration,
    pub frame_interval: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            notification_display: Duration::from_millis(3000),
            notification_exit: Duration::from_millis(300),
            register_switch_delay: Duration::from_millis(2000),
            frame_interval: Duration::from_millis(16),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed, or if
    /// the frame interval is zero.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let scroll = ScrollConfig {
            header_compact_at: parse_or(
                &lookup,
                "PHONEHUB_HEADER_COMPACT_AT",
                defaults.scroll.header_compact_at,
            )?,
            back_to_top_at: parse_or(
                &lookup,
                "PHONEHUB_BACK_TO_TOP_AT",
                defaults.scroll.back_to_top_at,
            )?,
            nav_offset: parse_or(&lookup, "PHONEHUB_NAV_OFFSET", defaults.scroll.nav_offset)?,
            reveal_margin: parse_or(
                &lookup,
                "PHONEHUB_REVEAL_MARGIN",
                defaults.scroll.reveal_margin,
            )?,
        };

        let timings = Timings {
            notification_display: millis_or(
                &lookup,
                "PHONEHUB_NOTIFICATION_DISPLAY_MS",
                defaults.timings.notification_display,
            )?,
            notification_exit: millis_or(
                &lookup,
                "PHONEHUB_NOTIFICATION_EXIT_MS",
                defaults.timings.notification_exit,
            )?,
            register_switch_delay: millis_or(
                &lookup,
                "PHONEHUB_REGISTER_SWITCH_DELAY_MS",
                defaults.timings.register_switch_delay,
            )?,
            frame_interval: millis_or(
                &lookup,
                "PHONEHUB_FRAME_INTERVAL_MS",
                defaults.timings.frame_interval,
            )?,
        };

        if timings.frame_interval.is_zero() {
            return Err(ConfigError::InvalidEnvVar(
                "PHONEHUB_FRAME_INTERVAL_MS".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        Ok(Self { scroll, timings })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable, falling back to `default` when it is unset.
fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

/// Parse a millisecond duration variable.
fn millis_or(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: Duration,
) -> Result<Duration, ConfigError> {
    let default_ms = u64::try_from(default.as_millis()).unwrap_or(u64::MAX);
    parse_or(lookup, key, default_ms).map(Duration::from_millis)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = StorefrontConfig::from_lookup(lookup_from(&[])).unwrap();
        assert!((config.scroll.header_compact_at - 100.0).abs() < f64::EPSILON);
        assert!((config.scroll.back_to_top_at - 500.0).abs() < f64::EPSILON);
        assert_eq!(
            config.timings.notification_display,
            Duration::from_millis(3000)
        );
        assert_eq!(config.timings.frame_interval, Duration::from_millis(16));
    }

    #[test]
    fn test_overrides() {
        let config = StorefrontConfig::from_lookup(lookup_from(&[
            ("PHONEHUB_NAV_OFFSET", "80"),
            ("PHONEHUB_NOTIFICATION_EXIT_MS", " 500 "),
        ]))
        .unwrap();
        assert!((config.scroll.nav_offset - 80.0).abs() < f64::EPSILON);
        assert_eq!(config.timings.notification_exit, Duration::from_millis(500));
    }

    #[test]
    fn test_invalid_value() {
        let err = StorefrontConfig::from_lookup(lookup_from(&[(
            "PHONEHUB_REGISTER_SWITCH_DELAY_MS",
            "soon",
        )]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "PHONEHUB_REGISTER_SWITCH_DELAY_MS"));
    }

    #[test]
    fn test_zero_frame_interval_rejected() {
        let result =
            StorefrontConfig::from_lookup(lookup_from(&[("PHONEHUB_FRAME_INTERVAL_MS", "0")]));
        assert!(result.is_err());
    }
}
