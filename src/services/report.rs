//! Report rendering
//!
//! Formats a `BillingSummary` as the Markdown message delivered to the
//! webhook: header with window totals, one table row per ranked service with
//! per-day columns, the below-threshold remainder, and a daily-total row.

use crate::services::service_names::display_name;
use crate::types::{BillingSummary, ChangeClass};
use chrono::{DateTime, Utc};
use std::fmt::Write;

/// Ranked services shown before the table is cut off
const MAX_TABLE_ROWS: usize = 10;

/// How the run was started; only the report footer differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Scheduled,
    Manual,
}

/// Render the summary as a Markdown message.
pub fn render_report(
    summary: &BillingSummary,
    trigger: Trigger,
    generated_at: DateTime<Utc>,
) -> String {
    if summary.services.is_empty() {
        return format!(
            "No AWS costs found above the ${:.0} threshold for the past {} days.",
            summary.cost_threshold, summary.window_days
        );
    }

    let mut message = String::new();
    let window_start = summary.dates[0];
    let window_end = summary.dates[summary.dates.len() - 1];

    let _ = writeln!(
        message,
        "## 📊 AWS Cost Summary ({window_start} to {window_end})\n"
    );
    let _ = writeln!(
        message,
        "**Total Cost:** ${:.2} | **Average Daily Cost:** ${:.2}",
        summary.total_cost, summary.average_daily_cost
    );
    message.push_str("*Showing unblended costs (true usage costs before account-level discounts)*\n\n");

    // Table header with one column per recent-window day
    let mut header = String::from("| Service | Total | Avg |");
    let mut separator = String::from("|---------|-------|-----|");
    for date in &summary.dates {
        let _ = write!(header, " {} |", date.format("%m-%d"));
        separator.push_str("------|");
    }
    header.push_str(" Change |");
    separator.push_str("--------|");
    let _ = writeln!(message, "{header}");
    let _ = writeln!(message, "{separator}");

    for aggregate in summary.services.iter().take(MAX_TABLE_ROWS) {
        let _ = write!(
            message,
            "| {} | ${:.0} | ${:.0} |",
            display_name(&aggregate.service),
            aggregate.recent_total,
            aggregate.recent_average
        );
        push_cost_cells(&mut message, &aggregate.daily_breakdown);
        let _ = writeln!(
            message,
            " {} |",
            change_indicator(aggregate.change, aggregate.percent_change)
        );
    }

    if let Some(other) = summary.other.as_ref().filter(|o| o.has_spend()) {
        let _ = write!(
            message,
            "| Other costs | ${:.0} | ${:.0} |",
            other.total, other.average
        );
        push_cost_cells(&mut message, &other.daily_breakdown);
        message.push_str(" — |\n");
    }

    // Dash row keeps the daily total inside the same table
    let _ = writeln!(
        message,
        "| — | — | — |{} — |",
        " — |".repeat(summary.dates.len())
    );

    let total_all: f64 = summary.daily_totals.iter().sum();
    let average_all = total_all / summary.window_days as f64;
    let _ = write!(
        message,
        "| Daily Total | ${total_all:.0} | ${average_all:.0} |"
    );
    push_cost_cells(&mut message, &summary.daily_totals);
    let _ = writeln!(
        message,
        " {} |",
        change_indicator(
            ChangeClass::classify(summary.total_change),
            summary.total_change
        )
    );

    if summary.services.len() > MAX_TABLE_ROWS {
        let remaining = summary.services.len() - MAX_TABLE_ROWS;
        let _ = writeln!(
            message,
            "\n*... and {remaining} more services above ${:.0} threshold*",
            summary.cost_threshold
        );
    }

    message.push_str("\n---\n");
    let timestamp = generated_at.format("%Y-%m-%d %H:%M:%S");
    match trigger {
        Trigger::Scheduled => {
            let _ = write!(message, "*Scheduled report generated at {timestamp} UTC*");
        }
        Trigger::Manual => {
            let _ = write!(message, "*Report generated at {timestamp} UTC*");
        }
    }

    message
}

fn push_cost_cells(message: &mut String, costs: &[f64]) {
    for &cost in costs {
        if cost > 0.0 {
            let _ = write!(message, " ${cost:.0} |");
        } else {
            message.push_str(" $0 |");
        }
    }
}

/// Emoji + signed percent for the Change column
fn change_indicator(change: ChangeClass, percent_change: Option<f64>) -> String {
    let percent = percent_change.unwrap_or(0.0);
    match change {
        ChangeClass::SignificantIncrease => format!("📈+{percent:.0}%"),
        ChangeClass::ModerateIncrease => format!("↗️+{percent:.0}%"),
        ChangeClass::NoChange => "➡️0%".to_string(),
        ChangeClass::ModerateDecrease => format!("↘️{percent:.0}%"),
        ChangeClass::SignificantDecrease => format!("📉{percent:.0}%"),
        ChangeClass::NewService => "🆕 new".to_string(),
    }
}
