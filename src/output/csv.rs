//! CSV output formatting for subnet plans.

use super::terminal::{format_field, format_opt_addr};
use crate::models::SubnetRecord;
use crate::processing::Plan;
use itertools::Itertools;

/// Header line matching [`csv_row`].
pub const CSV_HEADER: &str = r#""index","network","mask","prefix","first_host","last_host","broadcast","usable_hosts""#;

/// Render the plan as CSV, one row per record.
pub fn render_csv(plan: &Plan) -> String {
    log::debug!("rendering {} records as CSV", plan.records.len());
    std::iter::once(CSV_HEADER.to_string())
        .chain(plan.records.iter().map(csv_row))
        .map(|line| line + "\n")
        .collect()
}

/// Format a single CSV row.
pub fn csv_row(r: &SubnetRecord) -> String {
    [
        format_field(r.index, 5),
        format_field(r.network, 17),
        format_field(r.mask, 17),
        format_field(r.prefix, 4),
        format_field(format_opt_addr(r.first_host), 17),
        format_field(format_opt_addr(r.last_host), 17),
        format_field(format_opt_addr(r.broadcast), 17),
        format_field(r.usable_hosts, 12),
    ]
    .iter()
    .join(",")
}
