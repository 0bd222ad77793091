//! The channel toward the platform-native webview implementation.
//!
//! The native layer is an opaque collaborator reachable through
//! asynchronous request/response calls plus a published event stream.
//! The host runtime provides the transport; this module only fixes the
//! call surface and the inbound event vocabulary.

use async_trait::async_trait;
use capsule_common::{Rect, Result, ViewId};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::config::ResolvedConfig;

/// Creation payload sent to the native layer. Geometry is already
/// resolved from the measured placeholder at this point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NativeCreateArgs {
    pub id: ViewId,
    pub config: ResolvedConfig,
    /// Destroy and recreate if a native view with this id already exists.
    pub force_create: bool,
}

/// Events published by the native layer.
///
/// The stream is multiplexed across all views; per-view filtering is
/// done locally by the subscriber.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum NativeEvent {
    /// Pointer-location query: is the querying view the topmost element
    /// at (x, y)? Answered via [`NativeBridge::dispatch_web_view_event`].
    #[serde(rename = "isWebViewInFocus", rename_all = "camelCase")]
    IsWebViewInFocus {
        x: f64,
        y: f64,
        web_view_id: ViewId,
    },
    /// The native view finished materializing. One-shot per creation.
    #[serde(rename = "onWebViewReady", rename_all = "camelCase")]
    WebViewReady { web_view_id: ViewId },
    #[serde(rename = "onPageStarted", rename_all = "camelCase")]
    PageStarted { web_view_id: ViewId },
    #[serde(rename = "onPageFinished", rename_all = "camelCase")]
    PageFinished { web_view_id: ViewId },
    #[serde(rename = "onProgressChanged", rename_all = "camelCase")]
    ProgressChanged {
        web_view_id: ViewId,
        new_progress: u32,
    },
    #[serde(other)]
    Unknown,
}

/// Outbound calls toward the native layer.
///
/// Every call is fire-and-await: errors surface to the caller unchanged
/// and are never retried here.
#[async_trait]
pub trait NativeBridge: Send + Sync {
    async fn create(&self, args: NativeCreateArgs) -> Result<()>;
    async fn load_url(&self, id: &ViewId, url: &str) -> Result<()>;
    /// Evaluate a script in the view. Returns the serialized result, if
    /// the script produced one.
    async fn evaluate_javascript(
        &self,
        id: &ViewId,
        script: &str,
    ) -> Result<Option<serde_json::Value>>;
    async fn destroy(&self, id: &ViewId) -> Result<()>;
    async fn show(&self, id: &ViewId) -> Result<()>;
    async fn hide(&self, id: &ViewId) -> Result<()>;
    async fn enable_touch(&self, id: &ViewId) -> Result<()>;
    async fn disable_touch(&self, id: &ViewId) -> Result<()>;

    /// Read cookies for `url`. `key = None` returns the whole cookie
    /// string; a key returns that cookie's value or `None`.
    async fn get_cookie(&self, url: &str, key: Option<&str>) -> Result<Option<String>>;
    async fn set_cookie(&self, url: &str, key: &str, value: &str) -> Result<()>;
    async fn remove_all_cookies(&self) -> Result<()>;
    async fn has_cookies(&self) -> Result<bool>;

    async fn on_scroll(&self, id: &ViewId, bounds: Rect) -> Result<()>;
    async fn on_resize(&self, id: &ViewId, bounds: Rect) -> Result<()>;
    async fn on_display(&self, id: &ViewId, bounds: Rect) -> Result<()>;
    /// Report a focus verdict for a pointer-location query.
    async fn dispatch_web_view_event(&self, id: &ViewId, focus: bool) -> Result<()>;

    /// Subscribe to the inbound native event stream.
    fn subscribe(&self) -> broadcast::Receiver<NativeEvent>;
}
