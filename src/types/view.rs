use serde::{Deserialize, Serialize};

/// A retained view instance in the keep-alive cache, keyed by tab path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewEntry {
    pub cache_key: String,
    pub path: String,
    pub cached_at: i64,
    pub hits: u32,
}

/// Result of activating a view through the cache.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewActivation {
    /// Key the host shell indexes its mounted view instances by.
    pub cache_key: String,
    /// Whether a previously mounted instance can be reused.
    pub reused: bool,
}
