//! IPv4 subnetting planner.
//!
//! Validates a base network and partitions it into equal subnets, into
//! subnets sized for per-subnet host demands (VLSM), or a mix of both.
//!
//! ```
//! use subnet_planner::{calculate, PlanRequest};
//!
//! let plan = calculate(&PlanRequest {
//!     address: "192.168.1.0".to_string(),
//!     mask: "255.255.255.0".to_string(),
//!     host_demands: vec![60, 30, 10],
//!     ..Default::default()
//! })
//! .unwrap();
//! assert_eq!(plan.records[1].network.to_string(), "192.168.1.64");
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod processing;
pub mod request;

pub use error::{ErrorCategory, SubnetError};
pub use models::{AllocationPolicy, NetworkBlock, ReachabilityPolicy, SubnetRecord};
pub use processing::{calculate, Plan};
pub use request::{PlanMode, PlanRequest};
