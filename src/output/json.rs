//! JSON output for subnet plans.

use crate::processing::Plan;
use serde::Serialize;
use std::error::Error;

#[derive(Serialize)]
struct Report<'a> {
    generated_at: String,
    #[serde(flatten)]
    plan: &'a Plan,
}

/// Render the plan as pretty JSON with a generation timestamp.
pub fn render_json(plan: &Plan) -> Result<String, Box<dyn Error>> {
    let report = Report {
        generated_at: chrono::Utc::now().to_rfc3339(),
        plan,
    };
    let json =
        serde_json::to_string_pretty(&report).map_err(|e| format!("Error serializing JSON: {e}"))?;
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::calculate;
    use crate::request::PlanRequest;

    #[test]
    fn test_render_json() {
        let plan = calculate(&PlanRequest {
            address: "192.168.1.0".to_string(),
            mask: "255.255.255.0".to_string(),
            host_demands: vec![60, 30, 10],
            ..Default::default()
        })
        .unwrap();
        let json = render_json(&plan).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["generated_at"].is_string());
        assert_eq!(value["base"], "192.168.1.0/24");
        assert_eq!(value["mode"], "hosts");
        assert_eq!(value["records"][1]["network"], "192.168.1.64");
        assert_eq!(value["records"][1]["prefix"], 27);
        assert_eq!(value["unallocated"], 144);
        assert_eq!(value["free_blocks"][1], "192.168.1.128/25");
    }
}
