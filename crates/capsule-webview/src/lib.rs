//! Bridge between DOM placeholder elements and native embedded webviews.
//!
//! The app shell renders a placeholder element where a native webview
//! should appear; the native layer draws the actual browser surface as
//! an overlay. This crate keeps the two in sync:
//! - Lifecycle and interaction calls (create, navigate, script
//!   evaluation, show/hide, touch, cookies) forwarded over an injected
//!   [`bridge::NativeBridge`] channel
//! - A bounds tracker that classifies placeholder geometry changes into
//!   display/resize/scroll updates toward the native layer
//! - A focus arbiter answering element-under-point queries from the
//!   native layer

pub mod bridge;
pub mod config;
pub mod cookies;
pub mod events;
pub mod focus;
pub mod host;
pub mod manager;
pub mod platform;
pub mod tracker;

#[cfg(test)]
pub(crate) mod testutil;

pub use bridge::{NativeBridge, NativeCreateArgs, NativeEvent};
pub use config::{ResolvedConfig, Tuning, WebViewConfig};
pub use events::{BoundsEvent, BoundsEventKind, PageListener, ProgressListener, ReadyCallback};
pub use focus::FocusArbiter;
pub use host::{ElementRef, HostUi, ObserverGuard, ObserverSink};
pub use manager::{CreateWebViewArgs, WebView, WebViewManager};
pub use platform::PlatformProfile;
