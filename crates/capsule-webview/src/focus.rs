//! Element-under-point focus arbitration.
//!
//! The native layer cannot see the DOM; when it needs to decide whether
//! a touch belongs to a view's overlay, it asks which element sits under
//! the point. The arbiter hit-tests, reads the element's view tag, and
//! reports the verdict back. Stateless between queries.

use std::sync::Arc;

use capsule_common::ViewId;
use tracing::{debug, warn};

use crate::bridge::NativeBridge;
use crate::host::HostUi;

pub struct FocusArbiter {
    host: Arc<dyn HostUi>,
    bridge: Arc<dyn NativeBridge>,
}

impl FocusArbiter {
    pub fn new(host: Arc<dyn HostUi>, bridge: Arc<dyn NativeBridge>) -> Self {
        Self { host, bridge }
    }

    /// Is `id` the owner of the topmost element at (x, y)?
    ///
    /// Misses never error: no element under the point, or an untagged
    /// element, both resolve to `false`.
    pub fn resolve(&self, x: f64, y: f64, id: &ViewId) -> bool {
        self.host
            .hit_test(x, y)
            .and_then(|element| self.host.view_tag(&element))
            .is_some_and(|tag| tag == *id)
    }

    /// Handle one inbound focus query and report the verdict back,
    /// keyed by the querying view id.
    pub async fn handle_query(&self, x: f64, y: f64, id: &ViewId) {
        let focus = self.resolve(x, y, id);
        debug!(view = %id, x, y, focus, "focus query resolved");
        if let Err(e) = self.bridge.dispatch_web_view_event(id, focus).await {
            warn!(view = %id, error = %e, "focus verdict dispatch failed");
        }
    }
}
