//! Caller-supplied policies for validation and allocation.

use serde::{Deserialize, Serialize};

/// Which special-purpose ranges a base address may fall in.
///
/// Everything except private ranges is disallowed by default.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct ReachabilityPolicy {
    pub allow_private: bool,
    pub allow_loopback: bool,
    pub allow_link_local: bool,
    pub allow_multicast: bool,
    pub allow_reserved: bool,
    pub allow_cgnat: bool,
}

impl Default for ReachabilityPolicy {
    fn default() -> Self {
        ReachabilityPolicy {
            allow_private: true,
            allow_loopback: false,
            allow_link_local: false,
            allow_multicast: false,
            allow_reserved: false,
            allow_cgnat: false,
        }
    }
}

/// Constraints applied by the partition engine.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct AllocationPolicy {
    /// Reject blocks of /31 or /32, which have no usable hosts.
    pub require_usable_hosts: bool,
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        AllocationPolicy {
            require_usable_hosts: true,
        }
    }
}
