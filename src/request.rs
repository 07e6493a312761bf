//! Calculation request.
//!
//! One [`PlanRequest`] carries everything a calculation needs; nothing is
//! kept between calculations.

use crate::models::{AllocationPolicy, ReachabilityPolicy};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;
use std::path::Path;

/// Which partition algorithm to run.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlanMode {
    /// Host demands if any are positive, otherwise equal split.
    #[default]
    Auto,
    /// Equal split into `subnet_count` blocks.
    Count,
    /// One block per host demand (VLSM).
    Hosts,
    /// Host demands first, equal split of the rest up to `subnet_count`.
    Hybrid,
}

impl std::str::FromStr for PlanMode {
    type Err = String;

    fn from_str(s: &str) -> Result<PlanMode, String> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(PlanMode::Auto),
            "count" | "equal" => Ok(PlanMode::Count),
            "hosts" | "vlsm" => Ok(PlanMode::Hosts),
            "hybrid" => Ok(PlanMode::Hybrid),
            other => Err(format!("unknown mode '{other}'")),
        }
    }
}

impl std::fmt::Display for PlanMode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            PlanMode::Auto => "auto",
            PlanMode::Count => "count",
            PlanMode::Hosts => "hosts",
            PlanMode::Hybrid => "hybrid",
        };
        write!(f, "{name}")
    }
}

/// A single subnetting calculation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PlanRequest {
    /// Dotted base address; host bits are cleared during validation.
    pub address: String,
    /// Dotted subnet mask.
    pub mask: String,
    pub mode: PlanMode,
    /// Number of subnets for the count and hybrid modes.
    pub subnet_count: usize,
    /// Hosts wanted per subnet; zero and negative entries are ignored.
    pub host_demands: Vec<i64>,
    pub policy: ReachabilityPolicy,
    pub require_usable_hosts: bool,
}

impl Default for PlanRequest {
    fn default() -> Self {
        PlanRequest {
            address: String::new(),
            mask: String::new(),
            mode: PlanMode::Auto,
            subnet_count: 1,
            host_demands: vec![],
            policy: ReachabilityPolicy::default(),
            require_usable_hosts: true,
        }
    }
}

impl PlanRequest {
    /// Allocation constraints for the partition engine.
    pub fn allocation_policy(&self) -> AllocationPolicy {
        AllocationPolicy {
            require_usable_hosts: self.require_usable_hosts,
        }
    }

    /// The mode actually run, with [`PlanMode::Auto`] resolved.
    pub fn resolved_mode(&self) -> PlanMode {
        match self.mode {
            PlanMode::Auto if self.host_demands.iter().any(|&h| h > 0) => PlanMode::Hosts,
            PlanMode::Auto => PlanMode::Count,
            mode => mode,
        }
    }

    /// Parse a request from JSON, reporting the path of any bad field.
    pub fn from_json(json: &str) -> Result<PlanRequest, Box<dyn Error>> {
        let mut deserializer = serde_json::Deserializer::from_str(json);
        let request: PlanRequest = serde_path_to_error::deserialize(&mut deserializer)
            .map_err(|e| format!("Error parsing request: path={} error={}", e.path(), e))?;
        Ok(request)
    }

    /// Parse a request from JSON, taking fields the JSON leaves out from
    /// `defaults`. Nested objects such as `policy` are merged field by field.
    pub fn from_json_with_defaults(
        json: &str,
        defaults: &PlanRequest,
    ) -> Result<PlanRequest, Box<dyn Error>> {
        let overlay: Value =
            serde_json::from_str(json).map_err(|e| format!("Error parsing request: {e}"))?;
        let mut merged = serde_json::to_value(defaults)?;
        merge_json(&mut merged, overlay);
        let request: PlanRequest = serde_path_to_error::deserialize(merged)
            .map_err(|e| format!("Error parsing request: path={} error={}", e.path(), e))?;
        Ok(request)
    }

    /// Read a request from a JSON file.
    pub fn from_file(path: &Path) -> Result<PlanRequest, Box<dyn Error>> {
        PlanRequest::from_file_with_defaults(path, &PlanRequest::default())
    }

    /// Read a request from a JSON file over `defaults`.
    pub fn from_file_with_defaults(
        path: &Path,
        defaults: &PlanRequest,
    ) -> Result<PlanRequest, Box<dyn Error>> {
        if !path.exists() {
            return Err(format!("Request file does not exist: {}", path.display()).into());
        }
        log::info!("Reading request file: {}", path.display());
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Error reading request file {}: {e}", path.display()))?;
        PlanRequest::from_json_with_defaults(&json, defaults)
    }
}

fn merge_json(target: &mut Value, overlay: Value) {
    match (target, overlay) {
        (Value::Object(target), Value::Object(overlay)) => {
            for (key, value) in overlay {
                merge_json(target.entry(key).or_insert(Value::Null), value);
            }
        }
        (target, overlay) => *target = overlay,
    }
}
