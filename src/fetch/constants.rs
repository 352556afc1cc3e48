//! Constants for the fetch module (timeouts, rate limiting).

use std::time::Duration;

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP read timeout (2 minutes; large indexes can be slow to serve).
pub const READ_TIMEOUT_SECS: u64 = 120;

/// Default delay applied before each network fetch.
pub const DEFAULT_FETCH_INTERVAL: Duration = Duration::from_secs(1);

/// Warning threshold for cumulative rate limit delay (30 seconds).
pub const CUMULATIVE_DELAY_WARNING_THRESHOLD: Duration = Duration::from_secs(30);
