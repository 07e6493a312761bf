//! Plan assembly: validation, allocation and space accounting.

use super::gap_finder::find_free_blocks;
use super::partition::{hybrid_by_count_and_hosts, subnet_by_count, vlsm_by_hosts};
use super::validate::prepare_base_network;
use crate::error::SubnetError;
use crate::models::{NetworkBlock, SubnetRecord};
use crate::request::{PlanMode, PlanRequest};
use serde::Serialize;

/// The outcome of one calculation.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    /// Normalised base network.
    pub base: NetworkBlock,
    /// Algorithm that produced the records.
    pub mode: PlanMode,
    /// Subnets in allocation order.
    pub records: Vec<SubnetRecord>,
    /// Addresses covered by the records.
    pub allocated: u64,
    /// Addresses of the base network left unused.
    pub unallocated: u64,
    /// Unused space as aligned blocks.
    pub free_blocks: Vec<NetworkBlock>,
}

impl Plan {
    /// Summarise `records` against `base`.
    pub fn new(base: NetworkBlock, mode: PlanMode, records: Vec<SubnetRecord>) -> Plan {
        let allocated: u64 = records.iter().map(|r| r.size()).sum();
        let free_blocks = find_free_blocks(&base, &records);
        Plan {
            base,
            mode,
            unallocated: base.size().saturating_sub(allocated),
            allocated,
            records,
            free_blocks,
        }
    }

    /// Index pairs of records that share addresses.
    pub fn overlapping(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for (i, a) in self.records.iter().enumerate() {
            for b in self.records.iter().skip(i + 1) {
                if a.block().overlaps(&b.block()) {
                    pairs.push((a.index, b.index));
                }
            }
        }
        pairs
    }
}

/// Validate the request and run the selected partition algorithm.
pub fn calculate(request: &PlanRequest) -> Result<Plan, SubnetError> {
    let base = prepare_base_network(&request.address, &request.mask, &request.policy)?;
    let policy = request.allocation_policy();
    let mode = request.resolved_mode();
    log::info!("calculating {mode} plan for {base}");

    let records = match mode {
        PlanMode::Count => subnet_by_count(&base, request.subnet_count, &policy)?,
        PlanMode::Hosts => vlsm_by_hosts(&base, &request.host_demands, &policy)?,
        PlanMode::Hybrid => hybrid_by_count_and_hosts(
            &base,
            request.subnet_count,
            &request.host_demands,
            &policy,
        )?,
        PlanMode::Auto => {
            return Err(SubnetError::InvalidRequest(
                "auto mode was not resolved".to_string(),
            ))
        }
    };

    let plan = Plan::new(base, mode, records);
    if plan.unallocated > 0 {
        log::info!(
            "{} of {} addresses in {base} left unallocated",
            plan.unallocated,
            base.size()
        );
    }
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(address: &str, mask: &str) -> PlanRequest {
        PlanRequest {
            address: address.to_string(),
            mask: mask.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_calculate_auto_count() {
        let plan = calculate(&PlanRequest {
            subnet_count: 4,
            ..request("10.0.0.77", "255.255.255.0")
        })
        .unwrap();
        assert_eq!(plan.base.to_string(), "10.0.0.0/24");
        assert_eq!(plan.mode, PlanMode::Count);
        assert_eq!(plan.records.len(), 4);
        assert_eq!(plan.allocated, 256);
        assert_eq!(plan.unallocated, 0);
        assert!(plan.free_blocks.is_empty());
    }

    #[test]
    fn test_calculate_auto_hosts() {
        let plan = calculate(&PlanRequest {
            subnet_count: 4,
            host_demands: vec![60, 30, 10, 0],
            ..request("192.168.1.0", "255.255.255.0")
        })
        .unwrap();
        assert_eq!(plan.mode, PlanMode::Hosts);
        assert_eq!(plan.records.len(), 3);
        assert_eq!(plan.allocated, 64 + 32 + 16);
        assert_eq!(plan.unallocated, 144);
        let free: Vec<String> = plan.free_blocks.iter().map(|b| b.to_string()).collect();
        assert_eq!(free, vec!["192.168.1.112/28", "192.168.1.128/25"]);
        assert!(plan.overlapping().is_empty());
    }

    #[test]
    fn test_calculate_reports_validation_error() {
        let err = calculate(&request("127.0.0.1", "255.0.0.0")).unwrap_err();
        assert_eq!(err.blocked_by(), Some("Loopback"));
        let err = calculate(&request("10.0.0.0", "255.255.0.255")).unwrap_err();
        assert!(matches!(err, SubnetError::NonContiguousMask { .. }));
    }

    #[test]
    fn test_overlapping_detects_pairs() {
        let base: NetworkBlock = "10.0.0.0/24".parse().unwrap();
        let records = vec![
            crate::models::build_record(0x0A000000, 25, 1),
            crate::models::build_record(0x0A000040, 26, 2),
        ];
        let plan = Plan::new(base, PlanMode::Hosts, records);
        assert_eq!(plan.overlapping(), vec![(1, 2)]);
    }
}
