//! Integration tests for subnet-planner
//!
//! These tests verify the complete workflow from request to plan and output.

use std::path::Path;
use subnet_planner::{
    calculate,
    models::{format_address, mask_to_prefix, parse_address, prefix_to_mask},
    output::{render_csv, render_json},
    processing::check_address_usable,
    ErrorCategory, PlanMode, PlanRequest, ReachabilityPolicy, SubnetError,
};

fn request(address: &str, mask: &str) -> PlanRequest {
    PlanRequest {
        address: address.to_string(),
        mask: mask.to_string(),
        ..Default::default()
    }
}

fn networks(plan: &subnet_planner::Plan) -> Vec<String> {
    plan.records.iter().map(|r| r.block().to_string()).collect()
}

#[test]
fn test_hybrid_request_file() {
    let req = PlanRequest::from_file(Path::new("tests/test_data/request_hybrid_01.json"))
        .expect("Failed to read request");
    assert_eq!(req.mode, PlanMode::Hybrid);

    let plan = calculate(&req).expect("Hybrid plan failed");
    assert_eq!(plan.base.to_string(), "172.16.4.0/22");
    assert_eq!(
        networks(&plan),
        vec![
            "172.16.4.0/24",
            "172.16.5.0/25",
            "172.16.5.128/26",
            "172.16.6.0/25",
            "172.16.6.128/25",
            "172.16.7.0/25",
        ]
    );
    assert_eq!(plan.unallocated, 192);
    let free: Vec<String> = plan.free_blocks.iter().map(|b| b.to_string()).collect();
    assert_eq!(free, vec!["172.16.5.192/26", "172.16.7.128/25"]);
    assert!(plan.overlapping().is_empty());
    assert_eq!(plan.allocated + plan.unallocated, plan.base.size());
}

#[test]
fn test_vlsm_request_file() {
    let req = PlanRequest::from_file(Path::new("tests/test_data/request_vlsm_01.json"))
        .expect("Failed to read request");
    let plan = calculate(&req).expect("VLSM plan failed");
    assert_eq!(plan.mode, PlanMode::Hosts);
    assert_eq!(
        networks(&plan),
        vec!["192.168.1.0/26", "192.168.1.64/27", "192.168.1.96/28"]
    );
    assert_eq!(plan.records[0].usable_hosts, 62);
}

#[test]
fn test_blocked_request_file() {
    let req = PlanRequest::from_file(Path::new("tests/test_data/request_blocked_01.json"))
        .expect("Failed to read request");
    let err = calculate(&req).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Policy);
    assert_eq!(err.blocked_by(), Some("CGNAT"));
}

#[test]
fn test_equal_split_end_to_end() {
    let plan = calculate(&PlanRequest {
        subnet_count: 4,
        mode: PlanMode::Count,
        ..request("10.0.0.0", "255.255.255.0")
    })
    .unwrap();
    assert_eq!(
        networks(&plan),
        vec!["10.0.0.0/26", "10.0.0.64/26", "10.0.0.128/26", "10.0.0.192/26"]
    );
    let csv = render_csv(&plan);
    assert_eq!(csv.lines().count(), 5);
    let json: serde_json::Value = serde_json::from_str(&render_json(&plan).unwrap()).unwrap();
    assert_eq!(json["records"][3]["broadcast"], "10.0.0.255");
}

#[test]
fn test_capacity_failure_is_atomic() {
    let err = calculate(&PlanRequest {
        subnet_count: 2,
        ..request("10.0.0.0", "255.255.255.252")
    })
    .unwrap_err();
    assert!(matches!(err, SubnetError::NoUsableHosts { prefix: 31, .. }));
    assert_eq!(err.category(), ErrorCategory::HostUsability);

    let err = calculate(&PlanRequest {
        host_demands: vec![100, 100, 100],
        ..request("10.0.0.0", "255.255.255.0")
    })
    .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Capacity);
}

#[test]
fn test_hybrid_consistency_across_counts() {
    for count in 2..=16 {
        let plan = calculate(&PlanRequest {
            mode: PlanMode::Hybrid,
            subnet_count: count,
            host_demands: vec![25],
            ..request("192.168.8.0", "255.255.255.0")
        })
        .unwrap_or_else(|e| panic!("count {count}: {e}"));
        assert_eq!(plan.records.len(), count);
        assert_eq!(plan.records[0].block().to_string(), "192.168.8.0/27");
        assert!(plan.allocated <= plan.base.size());
        assert!(plan.overlapping().is_empty(), "count {count}");
    }

    // 224 addresses left for 56 subnets: /30 each, still usable
    let plan = calculate(&PlanRequest {
        mode: PlanMode::Hybrid,
        subnet_count: 57,
        host_demands: vec![25],
        ..request("192.168.8.0", "255.255.255.0")
    })
    .unwrap();
    assert!(plan.records.iter().skip(1).all(|r| r.prefix == 30));

    // 224 for 57: 3 each, rounds down to a /31
    let err = calculate(&PlanRequest {
        mode: PlanMode::Hybrid,
        subnet_count: 58,
        host_demands: vec![25],
        ..request("192.168.8.0", "255.255.255.0")
    })
    .unwrap_err();
    assert!(matches!(err, SubnetError::NoUsableHosts { prefix: 31, .. }));
}

#[test]
fn test_oversized_demand_takes_base_block() {
    let plan = calculate(&PlanRequest {
        host_demands: vec![300],
        ..request("192.168.1.0", "255.255.255.0")
    })
    .unwrap();
    assert_eq!(networks(&plan), vec!["192.168.1.0/24"]);
    assert_eq!(plan.unallocated, 0);
}

#[test]
fn test_request_file_over_environment_defaults() {
    let defaults = PlanRequest {
        policy: ReachabilityPolicy {
            allow_cgnat: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let req = PlanRequest::from_file_with_defaults(
        Path::new("tests/test_data/request_blocked_01.json"),
        &defaults,
    )
    .expect("Failed to read request");
    assert!(req.policy.allow_cgnat);
    assert!(req.policy.allow_reserved);
    let plan = calculate(&req).expect("CGNAT allowed by defaults");
    assert_eq!(plan.base.to_string(), "100.64.10.0/24");
}

#[test]
fn test_codec_properties() {
    for text in ["10.0.0.0", "192.168.100.254", "8.8.4.4", "255.0.255.0"] {
        assert_eq!(format_address(parse_address(text).unwrap()), text);
    }
    for p in 0..=32 {
        assert_eq!(
            mask_to_prefix(&prefix_to_mask(p).unwrap().to_string()),
            Some(p as u8)
        );
    }
    assert_eq!(mask_to_prefix("255.0.255.0"), None);
}

#[test]
fn test_policy_rejection() {
    let check = check_address_usable("127.0.0.1", &ReachabilityPolicy::default());
    assert!(!check.ok);
    assert_eq!(check.blocked_by, Some("Loopback"));
}

#[test]
fn test_normalisation_is_idempotent() {
    let first = calculate(&request("10.0.0.0", "255.255.255.0")).unwrap();
    let again = calculate(&request(&first.base.base.to_string(), "255.255.255.0")).unwrap();
    assert_eq!(first.base, again.base);
    assert_eq!(first.base.to_string(), "10.0.0.0/24");
}
