//! Domain models for IPv4 subnet planning.
//!
//! This module contains the value types and address arithmetic:
//! - [`NetworkBlock`] - aligned network in CIDR notation
//! - [`SubnetRecord`] - one computed subnet
//! - [`ReachabilityPolicy`] and [`AllocationPolicy`] - caller toggles

mod ipv4;
mod policy;
mod subnet;

// Re-export public types
pub use ipv4::{
    block_size, cut_addr, format_address, get_cidr_mask, lo_mask, mask_bits_to_prefix,
    mask_to_prefix, parse_address, prefix_to_mask, required_prefix_for_hosts, usable_hosts,
    NetworkBlock, MAX_LENGTH,
};
pub use policy::{AllocationPolicy, ReachabilityPolicy};
pub use subnet::{build_record, SubnetRecord};
