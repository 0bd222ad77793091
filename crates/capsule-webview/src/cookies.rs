//! Cookie store forwarding.
//!
//! Cookies live in the native layer's shared cookie manager, not in any
//! single view, so the facade hangs off the manager.

use capsule_common::{BridgeError, Result};

use crate::manager::WebViewManager;

impl WebViewManager {
    /// Cookies for `url`. `key = None` returns the whole cookie string;
    /// with a key, that cookie's value or `None`.
    pub async fn get_cookie(&self, url: &str, key: Option<&str>) -> Result<Option<String>> {
        if url.is_empty() {
            return Err(BridgeError::InvalidArgument("url is required".into()));
        }
        self.bridge().get_cookie(url, key).await
    }

    pub async fn set_cookie(&self, url: &str, key: &str, value: &str) -> Result<()> {
        if url.is_empty() {
            return Err(BridgeError::InvalidArgument("url is required".into()));
        }
        if key.is_empty() {
            return Err(BridgeError::InvalidArgument("key is required".into()));
        }
        if value.is_empty() {
            return Err(BridgeError::InvalidArgument("value is required".into()));
        }
        self.bridge().set_cookie(url, key, value).await
    }

    pub async fn remove_all_cookies(&self) -> Result<()> {
        self.bridge().remove_all_cookies().await
    }

    pub async fn has_cookies(&self) -> Result<bool> {
        self.bridge().has_cookies().await
    }
}
