//! Partition engine.
//!
//! Splits an aligned [`NetworkBlock`] into subnets three ways:
//! - [`subnet_by_count`] - N equal blocks
//! - [`vlsm_by_hosts`] - one block per host demand, largest first
//! - [`hybrid_by_count_and_hosts`] - demands first, equal split of the rest
//!
//! All three share one cursor-based placement primitive and either return
//! every requested block or an error, never a partial list.

use crate::error::SubnetError;
use crate::models::{
    block_size, build_record, required_prefix_for_hosts, usable_hosts, AllocationPolicy,
    NetworkBlock, SubnetRecord, MAX_LENGTH,
};

/// Round `x` up to a multiple of `size`.
fn align(x: u64, size: u64) -> u64 {
    x.div_ceil(size) * size
}

/// Start of the next `size`-aligned block at or after `cursor` that ends by `limit`.
///
/// Addresses are carried as u64 so a block ending at 2^32 does not wrap.
pub fn place_aligned(cursor: u64, size: u64, limit: u64) -> Option<u64> {
    let start = align(cursor, size);
    (start + size <= limit).then_some(start)
}

/// Cursor over the free space of one base block, for one allocation call.
struct Allocator {
    block: NetworkBlock,
    cursor: u64,
    limit: u64,
    records: Vec<SubnetRecord>,
}

impl Allocator {
    fn new(block: NetworkBlock) -> Allocator {
        let base = u32::from(block.base) as u64;
        Allocator {
            block,
            cursor: base,
            limit: base + block.size(),
            records: Vec::new(),
        }
    }

    /// Place one block of `prefix` after the cursor and record it.
    fn place(&mut self, prefix: u8) -> Result<(), SubnetError> {
        let size = block_size(prefix);
        let start = place_aligned(self.cursor, size, self.limit).ok_or_else(|| {
            SubnetError::OutOfSpace {
                network: self.block.to_string(),
                prefix,
            }
        })?;
        let record = build_record(start as u32, prefix, self.records.len() + 1);
        log::debug!(
            "placed #{} {}/{} in {}",
            record.index,
            record.network,
            prefix,
            self.block
        );
        self.records.push(record);
        self.cursor = start + size;
        Ok(())
    }

    /// Addresses between the cursor and the end of the base block.
    fn remaining(&self) -> u64 {
        self.limit - self.cursor
    }
}

fn ensure_usable<F>(prefix: u8, policy: &AllocationPolicy, context: F) -> Result<(), SubnetError>
where
    F: FnOnce() -> String,
{
    if policy.require_usable_hosts && usable_hosts(prefix) == 0 {
        Err(SubnetError::NoUsableHosts {
            context: context(),
            prefix,
        })
    } else {
        Ok(())
    }
}

/// Positive demands, largest first.
fn sorted_demands(demands: &[i64]) -> Vec<u64> {
    let mut sorted: Vec<u64> = demands
        .iter()
        .filter(|&&h| h > 0)
        .map(|&h| h as u64)
        .collect();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted
}

fn allocate_demands(
    alloc: &mut Allocator,
    demands: &[u64],
    policy: &AllocationPolicy,
) -> Result<(), SubnetError> {
    let base_prefix = alloc.block.prefix;
    for &hosts in demands {
        // never a larger block than the base network itself
        let prefix =
            required_prefix_for_hosts(hosts).map_or(base_prefix, |p| p.max(base_prefix));
        ensure_usable(prefix, policy, || format!("A demand of {hosts} hosts"))?;
        alloc.place(prefix)?;
    }
    Ok(())
}

/// Split `block` into `count` equal subnets in ascending address order.
///
/// A count of zero yields an empty list.
pub fn subnet_by_count(
    block: &NetworkBlock,
    count: usize,
    policy: &AllocationPolicy,
) -> Result<Vec<SubnetRecord>, SubnetError> {
    if count == 0 {
        return Ok(Vec::new());
    }
    ensure_usable(block.prefix, policy, || format!("Base network {block}"))?;

    // ceil(log2(count))
    let extra_bits = count
        .checked_next_power_of_two()
        .map(|n| n.trailing_zeros())
        .unwrap_or(usize::BITS);
    let required = block.prefix as u32 + extra_bits;
    if required > MAX_LENGTH as u32 {
        return Err(SubnetError::PrefixOverflow {
            base: block.prefix,
            count,
            required,
        });
    }
    let prefix = required as u8;
    ensure_usable(prefix, policy, || {
        format!("Splitting {block} into {count} subnets")
    })?;

    let mut alloc = Allocator::new(*block);
    for _ in 0..count {
        alloc.place(prefix)?;
    }
    log::info!("split {block} into {count} x /{prefix}");
    Ok(alloc.records)
}

/// Allocate one subnet per positive host demand, largest demand first.
///
/// Each block is the smallest that holds its demand, placed at the lowest
/// address after the previous block that is aligned to its own size.
pub fn vlsm_by_hosts(
    block: &NetworkBlock,
    demands: &[i64],
    policy: &AllocationPolicy,
) -> Result<Vec<SubnetRecord>, SubnetError> {
    ensure_usable(block.prefix, policy, || format!("Base network {block}"))?;
    let demands = sorted_demands(demands);

    let mut alloc = Allocator::new(*block);
    allocate_demands(&mut alloc, &demands, policy)?;
    log::info!("allocated {} VLSM subnets in {block}", alloc.records.len());
    Ok(alloc.records)
}

/// Allocate the host demands, then split what is left equally among the
/// remaining `total_count - demands` subnets.
///
/// Each equal block is the largest power of two not above
/// `remaining space / remaining count`. Space past the last equal block is
/// left unallocated.
pub fn hybrid_by_count_and_hosts(
    block: &NetworkBlock,
    total_count: usize,
    demands: &[i64],
    policy: &AllocationPolicy,
) -> Result<Vec<SubnetRecord>, SubnetError> {
    let demands = sorted_demands(demands);
    if demands.len() > total_count {
        return Err(SubnetError::DemandExceedsCount {
            demands: demands.len(),
            count: total_count,
        });
    }
    if total_count == 0 {
        return Ok(Vec::new());
    }
    ensure_usable(block.prefix, policy, || format!("Base network {block}"))?;

    let mut alloc = Allocator::new(*block);
    allocate_demands(&mut alloc, &demands, policy)?;

    let remaining = total_count - demands.len();
    if remaining == 0 {
        return Ok(alloc.records);
    }

    let target = alloc.remaining() / remaining as u64;
    if target == 0 {
        return Err(SubnetError::InsufficientSpace {
            network: block.to_string(),
            remaining,
        });
    }
    // largest power of two not above target
    let size = 1u64 << (u64::BITS - 1 - target.leading_zeros());
    let prefix = MAX_LENGTH - size.trailing_zeros() as u8;
    ensure_usable(prefix, policy, || {
        format!("Splitting the remaining space into {remaining} subnets")
    })?;

    for _ in 0..remaining {
        alloc.place(prefix)?;
    }
    log::info!(
        "hybrid split of {block}: {} by demand, {remaining} x /{prefix}",
        demands.len()
    );
    Ok(alloc.records)
}
