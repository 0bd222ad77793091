//! Bounds tracking.
//!
//! One observation context per view: host observers feed a FIFO signal
//! channel, and a single driver task re-measures, classifies, and
//! forwards bounds updates. The single task preserves per-view emission
//! order; nothing is guaranteed across views.

use std::sync::Arc;

use capsule_common::{Rect, ViewId};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::bridge::NativeBridge;
use crate::config::Tuning;
use crate::events::{BoundsEvent, BoundsEventKind};
use crate::host::{ElementRef, HostUi, ObserverGuard, ObserverSink};
use crate::platform::PlatformProfile;

mod measure;
mod state;

pub(crate) use measure::resolve_initial_bounds;
pub use state::{Phase, TrackState};

/// What an installed observer reported. Payload-free: the driver
/// re-measures through the host when it handles the signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrackerSignal {
    /// The placeholder's box may have changed.
    Measured,
    /// An ancestor container or the window shifted the viewport.
    Scrolled,
    /// The managed page container holding the placeholder is entering
    /// the foreground.
    PageEntered,
    /// The device orientation changed.
    OrientationChanged,
}

/// Everything the driver task needs to observe one view.
pub(crate) struct TrackerContext {
    pub id: ViewId,
    pub element: ElementRef,
    pub host: Arc<dyn HostUi>,
    pub bridge: Arc<dyn NativeBridge>,
    pub tuning: Tuning,
}

/// Observation context for one view. Shutting down releases all host
/// observers and stops the driver before yielding, so no queued signal
/// can emit an event for a destroyed view id.
pub struct BoundsTracker {
    guards: Vec<ObserverGuard>,
    driver: Option<JoinHandle<()>>,
}

impl BoundsTracker {
    /// Install observers per the platform profile and start the driver.
    /// `initial` seeds the state machine without emitting anything.
    pub(crate) fn install(
        ctx: TrackerContext,
        profile: &PlatformProfile,
        initial: Rect,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut guards = Vec::new();

        guards.push(
            ctx.host
                .observe_resize(&ctx.element, signal_sink(&tx, TrackerSignal::Measured)),
        );

        if profile.page_container_hooks {
            match ctx
                .host
                .observe_page_enter(&ctx.element, signal_sink(&tx, TrackerSignal::PageEntered))
            {
                Some(guard) => guards.push(guard),
                None => debug!(view = %ctx.id, "placeholder not in a managed page container"),
            }
        }

        if profile.container_scroll_listeners {
            guards.push(
                ctx.host
                    .observe_container_scroll(signal_sink(&tx, TrackerSignal::Scrolled)),
            );
            guards.push(
                ctx.host
                    .observe_orientation(signal_sink(&tx, TrackerSignal::OrientationChanged)),
            );
        }

        let driver = tokio::spawn(Self::drive(ctx, rx, TrackState::new(initial)));

        Self {
            guards,
            driver: Some(driver),
        }
    }

    async fn drive(
        ctx: TrackerContext,
        mut rx: mpsc::UnboundedReceiver<TrackerSignal>,
        mut state: TrackState,
    ) {
        while let Some(signal) = rx.recv().await {
            match signal {
                TrackerSignal::Measured => {
                    let bounds = ctx.host.measure(&ctx.element);
                    if let Some(kind) = state.observe(bounds) {
                        Self::forward(&ctx, kind, bounds).await;
                    }
                }
                TrackerSignal::Scrolled => {
                    if state.allows_scroll() {
                        let bounds = ctx.host.measure(&ctx.element);
                        Self::forward(&ctx, BoundsEventKind::Scroll, bounds).await;
                    }
                }
                TrackerSignal::PageEntered => {
                    state.page_entered();
                    tokio::time::sleep(ctx.tuning.page_enter_settle()).await;
                    let bounds = ctx.host.measure(&ctx.element);
                    let kind = state.page_settled(bounds);
                    Self::forward(&ctx, kind, bounds).await;
                }
                TrackerSignal::OrientationChanged => {
                    tokio::time::sleep(ctx.tuning.orientation_settle()).await;
                    if state.allows_scroll() {
                        let bounds = ctx.host.measure(&ctx.element);
                        Self::forward(&ctx, BoundsEventKind::Scroll, bounds).await;
                    }
                }
            }
        }
    }

    async fn forward(ctx: &TrackerContext, kind: BoundsEventKind, bounds: Rect) {
        let event = BoundsEvent {
            id: ctx.id.clone(),
            kind,
            bounds,
        };
        let result = match event.kind {
            BoundsEventKind::Display => ctx.bridge.on_display(&event.id, event.bounds).await,
            BoundsEventKind::Resize => ctx.bridge.on_resize(&event.id, event.bounds).await,
            BoundsEventKind::Scroll => ctx.bridge.on_scroll(&event.id, event.bounds).await,
        };
        match result {
            // the native view may be mid-destruction; nothing to do here
            Err(e) => warn!(view = %event.id, kind = ?event.kind, error = %e, "bounds update rejected"),
            Ok(()) => debug!(
                view = %event.id,
                kind = ?event.kind,
                width = event.bounds.width,
                height = event.bounds.height,
                "bounds update forwarded"
            ),
        }
    }

    /// Release all observers and stop the driver. Runs to completion
    /// without yielding, and is safe to call twice.
    pub fn shutdown(&mut self) {
        for guard in &mut self.guards {
            guard.release();
        }
        self.guards.clear();
        if let Some(driver) = self.driver.take() {
            driver.abort();
        }
    }
}

impl Drop for BoundsTracker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn signal_sink(tx: &mpsc::UnboundedSender<TrackerSignal>, signal: TrackerSignal) -> ObserverSink {
    let tx = tx.clone();
    // send failure just means the driver is already gone
    Box::new(move || {
        let _ = tx.send(signal);
    })
}
