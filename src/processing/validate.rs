//! Mask validation and base network preparation.
//!
//! [`prepare_base_network`] is the entry point callers use before running
//! any allocation algorithm.

use super::reachability::validate_address;
use crate::error::SubnetError;
use crate::models::{mask_bits_to_prefix, parse_address, NetworkBlock, ReachabilityPolicy};
use serde::Serialize;

/// Parse a dotted mask and return its prefix length.
pub fn validate_mask(mask: &str) -> Result<u8, SubnetError> {
    let bits = parse_address(mask)?;
    mask_bits_to_prefix(bits).ok_or_else(|| SubnetError::NonContiguousMask {
        input: mask.to_string(),
    })
}

/// Outcome of [`check_mask`].
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MaskCheck {
    pub ok: bool,
    pub prefix: Option<u8>,
    pub reason: Option<String>,
}

/// Check a dotted mask for format and contiguity.
pub fn check_mask(mask: &str) -> MaskCheck {
    match validate_mask(mask) {
        Ok(prefix) => MaskCheck {
            ok: true,
            prefix: Some(prefix),
            reason: None,
        },
        Err(e) => MaskCheck {
            ok: false,
            prefix: None,
            reason: Some(e.to_string()),
        },
    }
}

/// Validate address and mask, then clear the host bits of the address.
///
/// # Arguments
/// * `address` - Dotted address, any host inside the wanted network
/// * `mask` - Dotted subnet mask
/// * `policy` - Which special ranges the address may fall in
///
/// # Returns
/// * `Ok(NetworkBlock)` - The aligned base network
/// * `Err` - The first rule the inputs violate
pub fn prepare_base_network(
    address: &str,
    mask: &str,
    policy: &ReachabilityPolicy,
) -> Result<NetworkBlock, SubnetError> {
    let addr = validate_address(address, policy)?;
    let prefix = validate_mask(mask)?;
    let block = NetworkBlock::new(addr, prefix)?;
    if block.base != addr {
        log::debug!("normalised {address}/{prefix} to {block}");
    }
    Ok(block)
}
