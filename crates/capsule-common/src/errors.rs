use crate::types::ViewId;

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// A call was made with arguments the bridge cannot act on
    /// (missing id, duplicate view, element already claimed). Fatal
    /// to the call that raised it.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The native layer rejected an outbound call. Propagated to the
    /// caller unchanged, never retried.
    #[error("native call failed: {0}")]
    NativeCall(String),

    /// Geometry polling exhausted its retry budget before the
    /// placeholder reported a usable size. Non-fatal: logged, and
    /// creation proceeds with the last measurement.
    #[error("placeholder size for view {view} not determined after {retries} polls")]
    MeasurementTimeout { view: ViewId, retries: u32 },

    /// An inbound event referenced a view id that is unknown or
    /// already destroyed. Dropped silently by the router.
    #[error("stale event for view {0}")]
    StaleEvent(ViewId),
}
