//! Bounded polling for the initial placeholder measurement.

use capsule_common::{BridgeError, Rect, ViewId};
use tracing::warn;

use crate::config::Tuning;
use crate::host::{ElementRef, HostUi};

/// Poll until the placeholder reports a non-zero width or the retry
/// budget runs out.
///
/// Exhaustion is non-fatal: the last (possibly zero) measurement is
/// returned and a warning recorded; creation proceeds best-effort.
pub(crate) async fn resolve_initial_bounds(
    host: &dyn HostUi,
    element: &ElementRef,
    id: &ViewId,
    tuning: &Tuning,
) -> Rect {
    let mut bounds = host.measure(element);
    if bounds.width != 0.0 {
        return bounds;
    }

    let mut retries = 0;
    while bounds.width == 0.0 && retries < tuning.poll_budget {
        tokio::time::sleep(tuning.poll_interval()).await;
        bounds = host.measure(element);
        retries += 1;
    }

    if bounds.width == 0.0 {
        let timeout = BridgeError::MeasurementTimeout {
            view: id.clone(),
            retries,
        };
        warn!(view = %id, "{timeout}");
    }

    bounds
}
