//! Visibility state machine for one tracked placeholder.

use capsule_common::Rect;

use crate::events::BoundsEventKind;

/// Tracking phase of a placeholder element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Both dimensions measured zero. No resize/scroll passes through
    /// until the element reappears.
    Hidden,
    /// Visible with settled layout.
    Stable,
    /// A page-enter transition is settling; measurements update the
    /// cache but emit nothing until the settle delay elapses. Scroll
    /// still passes through.
    Transitioning,
}

/// Classifies each geometry measurement into at most one bounds event.
#[derive(Debug)]
pub struct TrackState {
    phase: Phase,
    last: Rect,
}

impl TrackState {
    /// No event is emitted for the initial measurement; it only seeds
    /// the phase and the dimension cache.
    pub fn new(initial: Rect) -> Self {
        let phase = if initial.is_zero() {
            Phase::Hidden
        } else {
            Phase::Stable
        };
        Self {
            phase,
            last: initial,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Feed a fresh measurement. Returns the event to emit, if any.
    pub fn observe(&mut self, rect: Rect) -> Option<BoundsEventKind> {
        let event = if rect.is_zero() {
            self.phase = Phase::Hidden;
            None
        } else {
            match self.phase {
                Phase::Hidden => {
                    self.phase = Phase::Stable;
                    Some(BoundsEventKind::Display)
                }
                Phase::Stable => {
                    if rect.same_size(&self.last) {
                        None
                    } else {
                        Some(BoundsEventKind::Resize)
                    }
                }
                Phase::Transitioning => None,
            }
        };
        self.last = rect;
        event
    }

    /// The placeholder's page container started entering the foreground.
    pub fn page_entered(&mut self) {
        self.phase = Phase::Transitioning;
    }

    /// The settle delay after a page entry elapsed. Always a display
    /// refresh, regardless of whether geometry changed.
    pub fn page_settled(&mut self, rect: Rect) -> BoundsEventKind {
        self.phase = if rect.is_zero() {
            Phase::Hidden
        } else {
            Phase::Stable
        };
        self.last = rect;
        BoundsEventKind::Display
    }

    /// Viewport-shift events pass through whenever the element is not
    /// hidden; position is not cached or compared.
    pub fn allows_scroll(&self) -> bool {
        self.phase != Phase::Hidden
    }
}
