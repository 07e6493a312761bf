//! Terminal output utilities.
//!
//! Provides field formatting and a human-readable plan table.

use crate::processing::Plan;
use colored::Colorize;
use itertools::Itertools;
use std::net::Ipv4Addr;

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
///
/// # Returns
/// A quoted, right-aligned string
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    let quoted = format!("\"{value_str}\"");
    let quoted_len = quoted.len();

    if quoted_len >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

/// Render an optional address, `-` when absent.
pub fn format_opt_addr(addr: Option<Ipv4Addr>) -> String {
    addr.map(|a| a.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Render the plan as an aligned table with a summary footer.
pub fn render_table(plan: &Plan) -> String {
    let header = format!(
        "{:>3}  {:<18} {:<15} {:<31} {:<15} {:>10}",
        "#", "network", "mask", "usable hosts", "broadcast", "hosts"
    );
    let mut out = format!(
        "{} {} ({} mode)\n{}\n",
        "Base network".bold(),
        plan.base,
        plan.mode,
        header.bold().underline()
    );

    for r in &plan.records {
        let range = match (r.first_host, r.last_host) {
            (Some(first), Some(last)) => format!("{first} - {last}"),
            _ => "-".to_string(),
        };
        out.push_str(&format!(
            "{:>3}  {:<18} {:<15} {:<31} {:<15} {:>10}\n",
            r.index,
            r.block().to_string(),
            r.mask.to_string(),
            range,
            format_opt_addr(r.broadcast),
            r.usable_hosts
        ));
    }

    out.push_str(&format!(
        "allocated {} of {} addresses\n",
        plan.allocated,
        plan.base.size()
    ));
    if plan.unallocated > 0 {
        out.push_str(&format!(
            "{} {} addresses unallocated: {}\n",
            "NOTE".on_red(),
            plan.unallocated,
            plan.free_blocks.iter().join(", ")
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::calculate;
    use crate::request::PlanRequest;

    #[test]
    fn test_format_field_short() {
        assert_eq!(format_field("test", 10), "    \"test\"");
    }

    #[test]
    fn test_format_field_exact() {
        assert_eq!(format_field("test", 6), "\"test\"");
    }

    #[test]
    fn test_format_field_long() {
        assert_eq!(format_field("long_value", 5), "\"long_value\"");
    }

    #[test]
    fn test_format_field_number() {
        assert_eq!(format_field(42, 6), "  \"42\"");
    }

    #[test]
    fn test_render_table() {
        colored::control::set_override(false);
        let plan = calculate(&PlanRequest {
            address: "10.0.0.0".to_string(),
            mask: "255.255.255.0".to_string(),
            host_demands: vec![100],
            ..Default::default()
        })
        .unwrap();
        let table = render_table(&plan);
        assert!(table.contains("10.0.0.0/25"));
        assert!(table.contains("10.0.0.1 - 10.0.0.126"));
        assert!(table.contains("128 addresses unallocated: 10.0.0.128/25"));
        assert_eq!(table.lines().count(), 5);
        assert!(table.lines().all(|l| !l.is_empty()));
    }
}
