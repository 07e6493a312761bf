//! Address reachability checks.
//!
//! Rejects addresses that fall inside special-purpose IPv4 ranges unless the
//! caller's [`ReachabilityPolicy`] allows them.

use crate::error::SubnetError;
use crate::models::{cut_addr, parse_address, ReachabilityPolicy};
use serde::Serialize;
use std::net::Ipv4Addr;

/// A labelled special-purpose range.
#[derive(Debug, Clone, Copy)]
pub struct SpecialBlock {
    pub base: Ipv4Addr,
    pub prefix: u8,
    pub label: &'static str,
}

impl SpecialBlock {
    const fn new(base: Ipv4Addr, prefix: u8, label: &'static str) -> SpecialBlock {
        SpecialBlock {
            base,
            prefix,
            label,
        }
    }

    /// Check if `addr` lies in this range.
    pub fn contains(&self, addr: u32) -> bool {
        cut_addr(addr, self.prefix) == u32::from(self.base)
    }
}

/// Reserved and special-use blocks (RFC 6890 and friends).
pub const RESERVED_BLOCKS: &[SpecialBlock] = &[
    SpecialBlock::new(Ipv4Addr::new(0, 0, 0, 0), 8, "Current network/unspecified"),
    SpecialBlock::new(Ipv4Addr::new(0, 0, 0, 0), 32, "Unspecified address"),
    SpecialBlock::new(Ipv4Addr::new(255, 255, 255, 255), 32, "Limited broadcast"),
    SpecialBlock::new(Ipv4Addr::new(127, 0, 0, 0), 8, "Loopback"),
    SpecialBlock::new(Ipv4Addr::new(169, 254, 0, 0), 16, "Link-local (APIPA)"),
    SpecialBlock::new(Ipv4Addr::new(224, 0, 0, 0), 4, "Multicast"),
    SpecialBlock::new(Ipv4Addr::new(240, 0, 0, 0), 4, "Reserved for future use"),
    SpecialBlock::new(Ipv4Addr::new(100, 64, 0, 0), 10, "Carrier-grade NAT"),
    SpecialBlock::new(Ipv4Addr::new(192, 0, 0, 0), 24, "IETF Protocol Assignments"),
    SpecialBlock::new(Ipv4Addr::new(192, 0, 2, 0), 24, "TEST-NET-1 (doc)"),
    SpecialBlock::new(Ipv4Addr::new(198, 51, 100, 0), 24, "TEST-NET-2 (doc)"),
    SpecialBlock::new(Ipv4Addr::new(203, 0, 113, 0), 24, "TEST-NET-3 (doc)"),
    SpecialBlock::new(Ipv4Addr::new(198, 18, 0, 0), 15, "Benchmarking"),
];

pub const LOOPBACK_BLOCK: SpecialBlock =
    SpecialBlock::new(Ipv4Addr::new(127, 0, 0, 0), 8, "Loopback");
pub const LINK_LOCAL_BLOCK: SpecialBlock =
    SpecialBlock::new(Ipv4Addr::new(169, 254, 0, 0), 16, "Link-local (APIPA)");
pub const MULTICAST_BLOCK: SpecialBlock =
    SpecialBlock::new(Ipv4Addr::new(224, 0, 0, 0), 4, "Multicast");
pub const CGNAT_BLOCK: SpecialBlock = SpecialBlock::new(Ipv4Addr::new(100, 64, 0, 0), 10, "CGNAT");

/// RFC 1918 private blocks.
pub const PRIVATE_BLOCKS: &[SpecialBlock] = &[
    SpecialBlock::new(Ipv4Addr::new(10, 0, 0, 0), 8, "Private 10/8"),
    SpecialBlock::new(Ipv4Addr::new(172, 16, 0, 0), 12, "Private 172.16/12"),
    SpecialBlock::new(Ipv4Addr::new(192, 168, 0, 0), 16, "Private 192.168/16"),
];

/// Blocks to scan under `policy`, in check order.
fn blocks_to_check(policy: &ReachabilityPolicy) -> Vec<&'static SpecialBlock> {
    let mut blocks: Vec<&'static SpecialBlock> = Vec::new();
    if !policy.allow_reserved {
        blocks.extend(RESERVED_BLOCKS.iter());
    }
    if !policy.allow_loopback {
        blocks.push(&LOOPBACK_BLOCK);
    }
    if !policy.allow_link_local {
        blocks.push(&LINK_LOCAL_BLOCK);
    }
    if !policy.allow_multicast {
        blocks.push(&MULTICAST_BLOCK);
    }
    if !policy.allow_cgnat {
        blocks.push(&CGNAT_BLOCK);
    }
    if !policy.allow_private {
        blocks.extend(PRIVATE_BLOCKS.iter());
    }
    blocks
}

/// Parse `text` and check it against `policy`, returning the first violated rule.
pub fn validate_address(
    text: &str,
    policy: &ReachabilityPolicy,
) -> Result<Ipv4Addr, SubnetError> {
    let bits = parse_address(text)?;

    if bits == 0 {
        return Err(SubnetError::UnspecifiedAddress);
    }
    if bits == u32::MAX {
        return Err(SubnetError::LimitedBroadcast);
    }

    if let Some(block) = blocks_to_check(policy)
        .into_iter()
        .find(|block| block.contains(bits))
    {
        return Err(SubnetError::BlockedRange {
            address: text.to_string(),
            label: block.label,
        });
    }

    Ok(Ipv4Addr::from(bits))
}

/// Outcome of [`check_address_usable`].
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AddressCheck {
    pub ok: bool,
    pub reason: Option<String>,
    pub blocked_by: Option<&'static str>,
}

/// Check whether `text` is a usable base address under `policy`.
///
/// Never fails; the verdict and reason are carried in the result.
pub fn check_address_usable(text: &str, policy: &ReachabilityPolicy) -> AddressCheck {
    match validate_address(text, policy) {
        Ok(_) => AddressCheck {
            ok: true,
            reason: None,
            blocked_by: None,
        },
        Err(e) => {
            log::debug!("address {text} rejected: {e}");
            AddressCheck {
                ok: false,
                blocked_by: e.blocked_by(),
                reason: Some(e.to_string()),
            }
        }
    }
}
