use std::sync::{Arc, Mutex};

use capsule_common::ViewId;
use tokio::task::JoinHandle;

use crate::config::WebViewConfig;
use crate::events::{PageListener, ProgressListener};
use crate::host::ElementRef;
use crate::tracker::BoundsTracker;

/// Arguments for creating one webview.
#[derive(Debug)]
pub struct CreateWebViewArgs {
    pub id: ViewId,
    /// Placeholder element the native overlay mirrors. Exclusively
    /// owned by the view while it is alive.
    pub element: ElementRef,
    pub config: WebViewConfig,
    /// Destroy and recreate if a view with this id already exists.
    pub force_create: bool,
}

impl CreateWebViewArgs {
    pub fn new(id: impl Into<ViewId>, element: ElementRef) -> Self {
        Self {
            id: id.into(),
            element,
            config: WebViewConfig::default(),
            force_create: false,
        }
    }

    pub fn with_config(mut self, config: WebViewConfig) -> Self {
        self.config = config;
        self
    }

    pub fn force_create(mut self) -> Self {
        self.force_create = true;
        self
    }
}

/// Per-view page event listeners. At most one callback per event;
/// setting replaces the previous one, `None` clears.
#[derive(Default)]
pub(crate) struct ListenerSlots {
    pub page_started: Mutex<Option<PageListener>>,
    pub page_finished: Mutex<Option<PageListener>>,
    pub progress_changed: Mutex<Option<ProgressListener>>,
}

impl ListenerSlots {
    pub fn clear(&self) {
        *self.page_started.lock().unwrap() = None;
        *self.page_finished.lock().unwrap() = None;
        *self.progress_changed.lock().unwrap() = None;
    }
}

/// Registry state for one live view.
pub(crate) struct ViewEntry {
    pub element: ElementRef,
    pub tracker: Option<BoundsTracker>,
    pub listeners: Arc<ListenerSlots>,
    /// One-shot wait for the native ready notification, if a callback
    /// was registered at creation.
    pub ready_task: Option<JoinHandle<()>>,
}
