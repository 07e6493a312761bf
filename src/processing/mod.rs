//! Subnet planning logic.
//!
//! This module contains the validation and allocation logic:
//! - [`reachability`] - special-purpose range checks
//! - [`validate`] - mask checks and base network preparation
//! - [`partition`] - equal, VLSM and hybrid allocation
//! - [`gap_finder`] - unused space after allocation
//! - [`plan`] - request dispatch and plan summary

pub mod gap_finder;
pub mod partition;
pub mod plan;
pub mod reachability;
pub mod validate;

// Re-export public functions
pub use gap_finder::find_free_blocks;
pub use partition::{hybrid_by_count_and_hosts, place_aligned, subnet_by_count, vlsm_by_hosts};
pub use plan::{calculate, Plan};
pub use reachability::{check_address_usable, validate_address, AddressCheck, SpecialBlock};
pub use validate::{check_mask, prepare_base_network, validate_mask, MaskCheck};
