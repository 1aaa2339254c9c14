//! Services for cost aggregation and reporting

pub mod report;
pub mod service_names;
pub mod summary;
pub mod webhook;

pub use report::{render_report, Trigger};
pub use service_names::display_name;
pub use summary::{BillingSummaryComputer, DEFAULT_COST_THRESHOLD, DEFAULT_WINDOW_DAYS};
pub use webhook::WebhookNotifier;
