//! Inbound native event routing.
//!
//! The native event stream is multiplexed across all views; routing
//! filters per view locally. Events for unknown or destroyed ids are
//! dropped without error.

use std::sync::{Arc, Weak};

use capsule_common::{BridgeError, ViewId};
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::bridge::NativeEvent;
use crate::manager::types::ListenerSlots;
use crate::manager::WebViewManager;

pub(super) async fn run(
    mut rx: broadcast::Receiver<NativeEvent>,
    manager: Weak<WebViewManager>,
) {
    loop {
        let event = match rx.recv().await {
            Ok(event) => event,
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(skipped, "native event stream lagged");
                continue;
            }
            Err(broadcast::error::RecvError::Closed) => break,
        };

        let Some(manager) = manager.upgrade() else {
            break;
        };
        manager.route(event).await;
    }
}

impl WebViewManager {
    pub(super) async fn route(&self, event: NativeEvent) {
        match event {
            NativeEvent::IsWebViewInFocus { x, y, web_view_id } => {
                self.arbiter.handle_query(x, y, &web_view_id).await;
            }
            // consumed by the one-shot creation subscriptions
            NativeEvent::WebViewReady { .. } => {}
            NativeEvent::PageStarted { web_view_id } => {
                if let Some(slots) = self.routed_slots(&web_view_id) {
                    if let Some(callback) = slots.page_started.lock().unwrap().as_ref() {
                        callback();
                    }
                }
            }
            NativeEvent::PageFinished { web_view_id } => {
                if let Some(slots) = self.routed_slots(&web_view_id) {
                    if let Some(callback) = slots.page_finished.lock().unwrap().as_ref() {
                        callback();
                    }
                }
            }
            NativeEvent::ProgressChanged {
                web_view_id,
                new_progress,
            } => {
                if let Some(slots) = self.routed_slots(&web_view_id) {
                    if let Some(callback) = slots.progress_changed.lock().unwrap().as_ref() {
                        callback(new_progress);
                    }
                }
            }
            NativeEvent::Unknown => {}
        }
    }

    pub(super) fn listener_slots(&self, id: &ViewId) -> Option<Arc<ListenerSlots>> {
        self.views
            .lock()
            .unwrap()
            .get(id)
            .map(|entry| Arc::clone(&entry.listeners))
    }

    fn routed_slots(&self, id: &ViewId) -> Option<Arc<ListenerSlots>> {
        let slots = self.listener_slots(id);
        if slots.is_none() {
            debug!("{}", BridgeError::StaleEvent(id.clone()));
        }
        slots
    }
}
