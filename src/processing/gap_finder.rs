//! Gap finding inside a planned base network.
//!
//! Identifies address ranges the allocation left unused and expresses them
//! as the largest aligned CIDR blocks.

use crate::models::{block_size, lo_mask, NetworkBlock, SubnetRecord};

/// Find the unused space of `base` not covered by `records`.
///
/// Records may be in any order; the result is in ascending address order.
pub fn find_free_blocks(base: &NetworkBlock, records: &[SubnetRecord]) -> Vec<NetworkBlock> {
    let mut used: Vec<NetworkBlock> = records.iter().map(|r| r.block()).collect();
    used.sort();

    let mut next_ip = u32::from(base.base) as u64;
    let end = next_ip + base.size();
    let mut free = Vec::new();

    for block in &used {
        let lo = u32::from(block.lo()) as u64;
        fill_gap(next_ip, lo, &mut free);
        next_ip = next_ip.max(lo + block.size());
    }
    fill_gap(next_ip, end, &mut free);
    free
}

/// Cover `[start, end)` with the fewest aligned blocks.
fn fill_gap(mut start: u64, end: u64, free: &mut Vec<NetworkBlock>) {
    while start < end {
        let mask = find_biggest_subnet(start, end);
        free.push(NetworkBlock::from_bits(start as u32, mask));
        start += block_size(mask);
    }
}

/// Find the biggest subnet starting at `start_ip` that ends by `end`.
///
/// The returned mask is constrained by:
/// 1. The alignment of `start_ip` - it must be a valid network address for the mask
/// 2. The subnet must not reach `end`
fn find_biggest_subnet(start_ip: u64, end: u64) -> u8 {
    assert!(start_ip < end, "start_ip[{start_ip}] >= end[{end}] should never happen.");

    let mut next_mask = lo_mask(start_ip as u32);
    while start_ip + block_size(next_mask) > end {
        next_mask += 1;
    }
    next_mask
}
