use std::sync::Arc;

use capsule_common::{Result, ViewId};
use tracing::warn;

use crate::events::{PageListener, ProgressListener};
use crate::manager::types::ListenerSlots;
use crate::manager::WebViewManager;

/// Handle to one live webview. Interaction calls forward to the native
/// layer one-to-one; the native result surfaces unchanged.
pub struct WebView {
    id: ViewId,
    manager: Arc<WebViewManager>,
}

impl std::fmt::Debug for WebView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebView").field("id", &self.id).finish_non_exhaustive()
    }
}

impl WebView {
    pub(super) fn new(id: ViewId, manager: Arc<WebViewManager>) -> Self {
        Self { id, manager }
    }

    pub fn id(&self) -> &ViewId {
        &self.id
    }

    pub async fn load_url(&self, url: &str) -> Result<()> {
        self.manager.bridge().load_url(&self.id, url).await
    }

    /// Evaluate a script in the view, returning its serialized result
    /// if it produced one.
    pub async fn evaluate_javascript(&self, script: &str) -> Result<Option<serde_json::Value>> {
        self.manager.bridge().evaluate_javascript(&self.id, script).await
    }

    pub async fn show(&self) -> Result<()> {
        self.manager.bridge().show(&self.id).await
    }

    pub async fn hide(&self) -> Result<()> {
        self.manager.bridge().hide(&self.id).await
    }

    pub async fn enable_touch(&self) -> Result<()> {
        self.manager.bridge().enable_touch(&self.id).await
    }

    pub async fn disable_touch(&self) -> Result<()> {
        self.manager.bridge().disable_touch(&self.id).await
    }

    /// Destroy the view, consuming the handle. Local observers are torn
    /// down before the native layer is told.
    pub async fn destroy(self) -> Result<()> {
        self.manager.destroy_view(&self.id).await
    }

    /// Replace the page-started listener. `None` clears it.
    pub fn set_on_page_started_listener(&self, callback: Option<PageListener>) {
        if let Some(slots) = self.slots() {
            *slots.page_started.lock().unwrap() = callback;
        }
    }

    /// Replace the page-finished listener. `None` clears it.
    pub fn set_on_page_finished_listener(&self, callback: Option<PageListener>) {
        if let Some(slots) = self.slots() {
            *slots.page_finished.lock().unwrap() = callback;
        }
    }

    /// Replace the progress-changed listener. `None` clears it.
    pub fn set_on_progress_changed_listener(&self, callback: Option<ProgressListener>) {
        if let Some(slots) = self.slots() {
            *slots.progress_changed.lock().unwrap() = callback;
        }
    }

    fn slots(&self) -> Option<Arc<ListenerSlots>> {
        let slots = self.manager.listener_slots(&self.id);
        if slots.is_none() {
            warn!(view = %self.id, "listener change on a destroyed view ignored");
        }
        slots
    }
}
