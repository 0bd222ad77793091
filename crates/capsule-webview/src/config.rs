//! Creation configuration and timing knobs.

use std::time::Duration;

use capsule_common::{BridgeError, Rect, Result};
use serde::{Deserialize, Serialize};

/// Creation-time configuration for one webview.
///
/// Geometry fields are normally derived from the measured placeholder;
/// set them to override. `url` absent means no initial navigation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebViewConfig {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub device_pixel_ratio: Option<f64>,
    pub url: Option<String>,
}

impl WebViewConfig {
    /// Config that navigates to `url` once the native view exists.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Fill unset fields from the measured placeholder and the host's
    /// device pixel ratio.
    pub(crate) fn resolve(&self, measured: Rect, device_pixel_ratio: f64) -> ResolvedConfig {
        ResolvedConfig {
            x: self.x.unwrap_or(measured.x),
            y: self.y.unwrap_or(measured.y),
            width: self.width.unwrap_or(measured.width),
            height: self.height.unwrap_or(measured.height),
            device_pixel_ratio: self.device_pixel_ratio.unwrap_or(device_pixel_ratio),
            url: self.url.clone(),
        }
    }
}

/// Fully resolved configuration, as sent over the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedConfig {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub device_pixel_ratio: f64,
    pub url: Option<String>,
}

/// Timing knobs for creation and tracking.
///
/// The delays are empirically chosen workarounds for native layout
/// timing, not load-bearing contracts. Defaults match shipped behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Delay before the native creation call, letting placeholder
    /// layout finish so the overlay materializes at final geometry.
    pub create_settle_ms: u64,
    /// Delay between a page-enter notification and the display refresh.
    pub page_enter_settle_ms: u64,
    /// Interval between initial geometry polls.
    pub poll_interval_ms: u64,
    /// How many polls before giving up on a non-zero measurement.
    pub poll_budget: u32,
    /// Delay before re-measuring after an orientation change.
    pub orientation_settle_ms: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            create_settle_ms: 200,
            page_enter_settle_ms: 100,
            poll_interval_ms: 100,
            poll_budget: 30,
            orientation_settle_ms: 500,
        }
    }
}

impl Tuning {
    /// Parse overrides from a TOML snippet; missing fields keep their
    /// defaults.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| BridgeError::InvalidArgument(format!("failed to parse tuning TOML: {e}")))
    }

    pub(crate) fn create_settle(&self) -> Duration {
        Duration::from_millis(self.create_settle_ms)
    }

    pub(crate) fn page_enter_settle(&self) -> Duration {
        Duration::from_millis(self.page_enter_settle_ms)
    }

    pub(crate) fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub(crate) fn orientation_settle(&self) -> Duration {
        Duration::from_millis(self.orientation_settle_ms)
    }
}
