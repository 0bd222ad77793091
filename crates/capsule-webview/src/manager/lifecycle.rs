//! Creation and destruction sequencing.
//!
//! Observation infrastructure is installed only after the native view
//! is addressable, and torn down strictly before the native destroy
//! call, so no callback can reference a view id the native layer no
//! longer knows.

use std::sync::Arc;

use capsule_common::{BridgeError, Result, ViewId};
use tracing::{debug, warn};

use crate::bridge::{NativeCreateArgs, NativeEvent};
use crate::events::{self, ReadyCallback};
use crate::manager::types::{CreateWebViewArgs, ListenerSlots, ViewEntry};
use crate::manager::{WebView, WebViewManager};
use crate::tracker::{self, BoundsTracker, TrackerContext};

impl WebViewManager {
    /// Create a webview mirroring `args.element`.
    ///
    /// The native creation call is the sole fallible step; on failure
    /// nothing stays registered. `ready` is invoked at most once, when
    /// the native layer reports the view materialized.
    pub async fn create(
        self: &Arc<Self>,
        args: CreateWebViewArgs,
        ready: Option<ReadyCallback>,
    ) -> Result<WebView> {
        if args.id.is_empty() {
            return Err(BridgeError::InvalidArgument("id is required".into()));
        }

        if self.views.lock().unwrap().contains_key(&args.id) {
            if !args.force_create {
                return Err(BridgeError::InvalidArgument(format!(
                    "view {} already exists",
                    args.id
                )));
            }
            self.destroy_view(&args.id).await?;
        }

        {
            let mut claimed = self.claimed.lock().unwrap();
            if !claimed.insert(args.element) {
                return Err(BridgeError::InvalidArgument(format!(
                    "placeholder element already owned by another view (creating {})",
                    args.id
                )));
            }
        }

        self.host.tag_element(&args.element, &args.id);

        let measured =
            tracker::resolve_initial_bounds(self.host.as_ref(), &args.element, &args.id, &self.tuning)
                .await;
        let resolved = args.config.resolve(measured, self.host.device_pixel_ratio());

        // native overlays position themselves against final layout
        tokio::time::sleep(self.tuning.create_settle()).await;

        if let Err(e) = self
            .bridge
            .create(NativeCreateArgs {
                id: args.id.clone(),
                config: resolved,
                force_create: args.force_create,
            })
            .await
        {
            self.claimed.lock().unwrap().remove(&args.element);
            return Err(e);
        }

        let tracker = self.profile.tracks_bounds.then(|| {
            BoundsTracker::install(
                TrackerContext {
                    id: args.id.clone(),
                    element: args.element,
                    host: Arc::clone(&self.host),
                    bridge: Arc::clone(&self.bridge),
                    tuning: self.tuning.clone(),
                },
                &self.profile,
                measured,
            )
        });

        let ready_task = ready.map(|callback| {
            let wanted = args.id.clone();
            events::take_one(
                self.bridge.subscribe(),
                move |event| {
                    matches!(
                        event,
                        NativeEvent::WebViewReady { web_view_id } if *web_view_id == wanted
                    )
                },
                move |event| {
                    if let NativeEvent::WebViewReady { web_view_id } = event {
                        callback(web_view_id);
                    }
                },
            )
        });

        self.views.lock().unwrap().insert(
            args.id.clone(),
            ViewEntry {
                element: args.element,
                tracker,
                listeners: Arc::new(ListenerSlots::default()),
                ready_task,
            },
        );

        debug!(view = %args.id, "webview created");
        Ok(WebView::new(args.id, Arc::clone(self)))
    }

    /// Tear down a view locally, then destroy its native counterpart.
    ///
    /// All observers, the driver task, and listener slots are removed
    /// before the first await, so nothing queued can emit for this id
    /// once the native call is in flight.
    pub(crate) async fn destroy_view(&self, id: &ViewId) -> Result<()> {
        let entry = self.views.lock().unwrap().remove(id);
        let Some(mut entry) = entry else {
            return Err(BridgeError::InvalidArgument(format!("view {id} not found")));
        };

        if let Some(tracker) = entry.tracker.as_mut() {
            tracker.shutdown();
        }
        if let Some(task) = entry.ready_task.take() {
            task.abort();
        }
        entry.listeners.clear();
        self.claimed.lock().unwrap().remove(&entry.element);

        debug!(view = %id, "webview destroyed");
        self.bridge.destroy(id).await
    }

    /// Destroy every live view. Used during graceful shutdown; native
    /// failures are logged, not propagated.
    pub async fn destroy_all(&self) {
        for id in self.active_views() {
            if let Err(e) = self.destroy_view(&id).await {
                warn!(view = %id, error = %e, "destroy during shutdown failed");
            }
        }
    }
}
