//! Webview lifecycle management.
//!
//! `WebViewManager` creates, tracks, and destroys views, one per
//! placeholder element that should host native web content, and runs
//! the router task that fans inbound native events out to them.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use capsule_common::ViewId;
use tokio::task::JoinHandle;

use crate::bridge::NativeBridge;
use crate::config::Tuning;
use crate::focus::FocusArbiter;
use crate::host::{ElementRef, HostUi};
use crate::platform::PlatformProfile;

mod handle;
mod lifecycle;
mod router;
mod types;

pub use handle::WebView;
pub use types::CreateWebViewArgs;

use types::ViewEntry;

/// Manages all webview instances behind one native bridge.
pub struct WebViewManager {
    bridge: Arc<dyn NativeBridge>,
    host: Arc<dyn HostUi>,
    profile: PlatformProfile,
    tuning: Tuning,
    arbiter: FocusArbiter,
    views: Mutex<HashMap<ViewId, ViewEntry>>,
    /// Elements claimed by live views. No two views may own the same
    /// placeholder.
    claimed: Mutex<HashSet<ElementRef>>,
    router: Mutex<Option<JoinHandle<()>>>,
}

impl WebViewManager {
    /// Build a manager and start its event router. The router holds a
    /// weak reference, so dropping the last `Arc` shuts it down.
    pub fn new(
        bridge: Arc<dyn NativeBridge>,
        host: Arc<dyn HostUi>,
        profile: PlatformProfile,
        tuning: Tuning,
    ) -> Arc<Self> {
        let arbiter = FocusArbiter::new(Arc::clone(&host), Arc::clone(&bridge));
        let manager = Arc::new(Self {
            bridge,
            host,
            profile,
            tuning,
            arbiter,
            views: Mutex::new(HashMap::new()),
            claimed: Mutex::new(HashSet::new()),
            router: Mutex::new(None),
        });

        let task = tokio::spawn(router::run(
            manager.bridge.subscribe(),
            Arc::downgrade(&manager),
        ));
        *manager.router.lock().unwrap() = Some(task);

        manager
    }

    /// Ids of all live views.
    pub fn active_views(&self) -> Vec<ViewId> {
        self.views.lock().unwrap().keys().cloned().collect()
    }

    pub fn count(&self) -> usize {
        self.views.lock().unwrap().len()
    }

    pub(crate) fn bridge(&self) -> &Arc<dyn NativeBridge> {
        &self.bridge
    }
}

impl Drop for WebViewManager {
    fn drop(&mut self) {
        if let Some(task) = self.router.lock().unwrap().take() {
            task.abort();
        }
    }
}
