//! Semantic bounds events and listener plumbing.

use capsule_common::{Rect, ViewId};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::bridge::NativeEvent;

/// Classification of one placeholder geometry change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsEventKind {
    /// The view became visible or its page entered the foreground.
    Display,
    /// A dimension changed while visible.
    Resize,
    /// A position-only change while visible.
    Scroll,
}

/// A bounds event bound for the native layer.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundsEvent {
    pub id: ViewId,
    pub kind: BoundsEventKind,
    pub bounds: Rect,
}

/// Callback for page-started / page-finished notifications.
pub type PageListener = Box<dyn Fn() + Send + Sync>;

/// Callback for load-progress notifications (0–100).
pub type ProgressListener = Box<dyn Fn(u32) + Send + Sync>;

/// One-shot callback invoked when the native view reports ready.
pub type ReadyCallback = Box<dyn FnOnce(ViewId) + Send>;

/// At-most-once subscription on a native event stream: the first event
/// matching `filter` invokes `callback`, then the subscription ends.
///
/// Abort the returned handle to cancel an undelivered subscription.
pub(crate) fn take_one<F, C>(
    mut rx: broadcast::Receiver<NativeEvent>,
    filter: F,
    callback: C,
) -> JoinHandle<()>
where
    F: Fn(&NativeEvent) -> bool + Send + 'static,
    C: FnOnce(NativeEvent) + Send + 'static,
{
    tokio::spawn(async move {
        let mut callback = Some(callback);
        loop {
            match rx.recv().await {
                Ok(event) if filter(&event) => {
                    if let Some(callback) = callback.take() {
                        callback(event);
                    }
                    break;
                }
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "one-shot subscription lagged behind event stream");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}
