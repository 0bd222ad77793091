pub mod errors;
pub mod types;

pub use errors::BridgeError;
pub use types::{Rect, ViewId};

pub type Result<T> = std::result::Result<T, BridgeError>;
