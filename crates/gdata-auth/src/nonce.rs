//! Nonce and timestamp generation for signed requests.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Highest timestamp handed out so far.
static LAST_TIMESTAMP: AtomicU64 = AtomicU64::new(0);

/// Generate cryptographically random nonce (32 hex characters).
#[must_use]
pub fn new_nonce() -> String {
    let bytes: [u8; 16] = rand::random();
    hex::encode(bytes)
}

/// Current Unix time in seconds, never lower than a previous call returned.
#[must_use]
pub fn new_timestamp() -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs());
    let previous = LAST_TIMESTAMP.fetch_max(now, Ordering::Relaxed);
    previous.max(now)
}

/// Nonce and timestamp of one signed request.
///
/// A stamp must not be reused across requests. [`Stamp::fresh`] is what the
/// builders use; [`Stamp::new`] exists so signatures can be reproduced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    /// Single-use random value.
    pub nonce: String,
    /// Unix seconds.
    pub timestamp: u64,
}

impl Stamp {
    /// Stamp with caller-chosen values.
    pub fn new(nonce: impl Into<String>, timestamp: u64) -> Self {
        Self {
            nonce: nonce.into(),
            timestamp,
        }
    }

    /// Stamp with a new nonce and the current time.
    #[must_use]
    pub fn fresh() -> Self {
        Self {
            nonce: new_nonce(),
            timestamp: new_timestamp(),
        }
    }
}
