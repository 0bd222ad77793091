//! Platform capability profile.
//!
//! Platform differences are captured once at startup as a capability
//! object instead of string checks scattered through the tracker.

/// What the current platform needs from the bounds tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformProfile {
    /// Placeholder geometry is mirrored to a native overlay. False for
    /// a pure-web shell, where the placeholder is the real view.
    pub tracks_bounds: bool,
    /// Placeholders do not receive scroll notifications directly;
    /// viewport-shift listeners go on ancestor containers and the
    /// window, installed at creation and torn down at destruction.
    pub container_scroll_listeners: bool,
    /// Placeholders live inside managed page containers that fire
    /// enter transitions; each entry refreshes the native overlay.
    pub page_container_hooks: bool,
}

impl PlatformProfile {
    pub fn android() -> Self {
        Self {
            tracks_bounds: true,
            container_scroll_listeners: true,
            page_container_hooks: false,
        }
    }

    pub fn ios() -> Self {
        Self {
            tracks_bounds: true,
            container_scroll_listeners: false,
            page_container_hooks: true,
        }
    }

    pub fn web() -> Self {
        Self {
            tracks_bounds: false,
            container_scroll_listeners: false,
            page_container_hooks: false,
        }
    }
}

impl Default for PlatformProfile {
    fn default() -> Self {
        Self::web()
    }
}
