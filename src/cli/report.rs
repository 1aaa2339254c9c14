//! Report run: fetch costs, compute the summary, render, deliver

use std::collections::HashSet;

use chrono::{Duration, Utc};
use clap::Args;

use crate::config::Config;
use crate::providers::CostExplorerProvider;
use crate::services::{
    render_report, BillingSummaryComputer, Trigger, WebhookNotifier, DEFAULT_COST_THRESHOLD,
    DEFAULT_WINDOW_DAYS,
};
use crate::types::{CostwatchError, Result};

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Label the report as manually triggered
    #[arg(long)]
    pub manual: bool,

    /// Print the report without delivering it to the webhook
    #[arg(long)]
    pub dry_run: bool,

    /// Print the computed summary as JSON and exit without delivering
    #[arg(long)]
    pub json: bool,

    /// Rolling-average window length in days
    #[arg(long, default_value_t = DEFAULT_WINDOW_DAYS)]
    pub window_days: usize,

    /// Minimum recent average daily cost for a service to be ranked
    #[arg(long, default_value_t = DEFAULT_COST_THRESHOLD)]
    pub threshold: f64,
}

impl ReportArgs {
    pub fn run(self) -> Result<()> {
        let config = Config::from_env();

        // Both comparison windows end the day before the report date, so the
        // fetch never includes the still-accumulating current day
        let report_date = Utc::now().date_naive();
        let fetch_start = report_date - Duration::days(2 * self.window_days as i64);

        println!("Fetching AWS unblended costs from {fetch_start} to {report_date}");
        println!("Excluding record types: Refund, Credit (to mirror AWS Console)");

        let runtime = tokio::runtime::Runtime::new().map_err(CostwatchError::Io)?;
        let records = runtime.block_on(async {
            let provider = CostExplorerProvider::new(&config).await;
            provider.fetch_daily_costs(fetch_start, report_date).await
        })?;

        if records.is_empty() {
            return Err(CostwatchError::Provider(
                "no cost data returned for the requested range".into(),
            ));
        }

        let service_count = records
            .iter()
            .map(|r| r.service.as_str())
            .collect::<HashSet<_>>()
            .len();
        println!("Retrieved cost data for {service_count} services");

        let summary = BillingSummaryComputer::new(self.window_days, self.threshold)
            .compute(&records, report_date)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
            return Ok(());
        }

        println!(
            "{} of {service_count} services cleared the ${:.0} threshold",
            summary.services.len(),
            self.threshold
        );

        let trigger = if self.manual {
            Trigger::Manual
        } else {
            Trigger::Scheduled
        };
        let message = render_report(&summary, trigger, Utc::now());

        println!("\n{message}\n");

        if self.dry_run {
            println!("Dry run: skipping webhook delivery");
            return Ok(());
        }

        let webhook_url = config.webhook_url()?;
        WebhookNotifier::new(webhook_url).send(&message)?;
        println!("Delivered cost summary to webhook");

        Ok(())
    }
}
