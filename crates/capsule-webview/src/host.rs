//! Injected host UI facility.
//!
//! The DOM and its observation machinery are process-wide singletons
//! owned by the app shell. The bridge core never touches them directly;
//! it goes through [`HostUi`], and every observation it installs is
//! scoped by an [`ObserverGuard`] released at view destruction.

use capsule_common::{Rect, ViewId};

/// Opaque handle to a host UI node. Assigned by the host; the bridge
/// only compares and forwards it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementRef(pub u64);

/// Notification callback for an installed observer. Carries no payload;
/// the subscriber re-measures through [`HostUi`] when it fires.
pub type ObserverSink = Box<dyn Fn() + Send + Sync>;

/// Scoped teardown for one observer subscription.
///
/// Releasing runs the teardown exactly once; dropping an unreleased
/// guard releases it.
pub struct ObserverGuard {
    teardown: Option<Box<dyn FnOnce() + Send>>,
}

impl ObserverGuard {
    pub fn new(teardown: impl FnOnce() + Send + 'static) -> Self {
        Self {
            teardown: Some(Box::new(teardown)),
        }
    }

    /// A guard with no teardown, for hosts whose subscriptions need none.
    pub fn noop() -> Self {
        Self { teardown: None }
    }

    pub fn release(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}

impl Drop for ObserverGuard {
    fn drop(&mut self) {
        self.release();
    }
}

/// Spatial queries and observation subscriptions provided by the host
/// UI layer.
pub trait HostUi: Send + Sync {
    /// Current bounding box of an element, in device-independent pixels.
    /// May transiently report zero size before layout settles.
    fn measure(&self, element: &ElementRef) -> Rect;

    fn device_pixel_ratio(&self) -> f64;

    /// Topmost element at a point, if any.
    fn hit_test(&self, x: f64, y: f64) -> Option<ElementRef>;

    /// Tag an element with its owning view id.
    fn tag_element(&self, element: &ElementRef, id: &ViewId);

    /// The view id an element was tagged with, if any.
    fn view_tag(&self, element: &ElementRef) -> Option<ViewId>;

    /// Fire `sink` whenever the element's box changes.
    fn observe_resize(&self, element: &ElementRef, sink: ObserverSink) -> ObserverGuard;

    /// Fire `sink` when ancestor scrollable containers or the window
    /// shift the viewport. Used on platforms where the placeholder does
    /// not receive scroll notifications directly.
    fn observe_container_scroll(&self, sink: ObserverSink) -> ObserverGuard;

    /// Fire `sink` on a device orientation change.
    fn observe_orientation(&self, sink: ObserverSink) -> ObserverGuard;

    /// Fire `sink` when the managed page container holding the element
    /// enters the foreground. Returns `None` if the element is not
    /// inside a managed page container.
    fn observe_page_enter(&self, element: &ElementRef, sink: ObserverSink)
        -> Option<ObserverGuard>;
}
