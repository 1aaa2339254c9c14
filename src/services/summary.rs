//! Billing summary computation
//!
//! Turns daily per-service cost records into ranked window-over-window
//! aggregates: a rolling average over the recent window, one over the prior
//! window of the same length, and the percent change between them.

use crate::types::{
    BillingSummary, ChangeClass, CostwatchError, DailyCostRecord, OtherCosts, Result,
    ServiceAggregate,
};
use chrono::{Duration, NaiveDate};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Default rolling-average window length in days
pub const DEFAULT_WINDOW_DAYS: usize = 5;

/// Default minimum recent average daily cost for a service to be ranked
pub const DEFAULT_COST_THRESHOLD: f64 = 10.0;

/// Computes ranked billing summaries from daily cost records.
///
/// The two comparison windows are disjoint, contiguous, and equally long:
/// the recent window covers the `window_days` days before the report date,
/// the prior window the `window_days` days before that. Days a service has
/// no record for count as $0 spend.
pub struct BillingSummaryComputer {
    window_days: usize,
    cost_threshold: f64,
}

impl Default for BillingSummaryComputer {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_DAYS, DEFAULT_COST_THRESHOLD)
    }
}

impl BillingSummaryComputer {
    pub fn new(window_days: usize, cost_threshold: f64) -> Self {
        Self {
            window_days,
            cost_threshold,
        }
    }

    /// Compute the summary for the windows ending at `report_date` (exclusive).
    ///
    /// Fails with `DataGap` when the input covers fewer distinct days than the
    /// two windows need. Records outside the windows are ignored.
    pub fn compute(
        &self,
        records: &[DailyCostRecord],
        report_date: NaiveDate,
    ) -> Result<BillingSummary> {
        if self.window_days == 0 {
            return Err(CostwatchError::Config(
                "window length must be at least one day".into(),
            ));
        }

        let recent_dates = window_ending(report_date, self.window_days);
        let prior_end = report_date - Duration::days(self.window_days as i64);
        let prior_dates = window_ending(prior_end, self.window_days);

        let span_start = prior_dates[0];
        let required = 2 * self.window_days;
        let available = records
            .iter()
            .filter(|r| r.date >= span_start && r.date < report_date)
            .map(|r| r.date)
            .collect::<HashSet<_>>()
            .len();
        if available < required {
            return Err(CostwatchError::DataGap {
                available,
                required,
            });
        }

        // Group by service, then by date; duplicate (service, date) pairs sum
        let mut by_service: BTreeMap<&str, HashMap<NaiveDate, f64>> = BTreeMap::new();
        for record in records {
            *by_service
                .entry(record.service.as_str())
                .or_default()
                .entry(record.date)
                .or_insert(0.0) += record.cost;
        }

        let window = self.window_days as f64;
        let mut services = Vec::new();
        let mut other_daily = vec![0.0; recent_dates.len()];
        let mut daily_totals = vec![0.0; recent_dates.len()];
        let mut prior_total_all = 0.0;

        for (service, daily) in &by_service {
            let recent: Vec<f64> = recent_dates
                .iter()
                .map(|d| daily.get(d).copied().unwrap_or(0.0))
                .collect();
            let recent_total: f64 = recent.iter().sum();
            let prior_total: f64 = prior_dates
                .iter()
                .map(|d| daily.get(d).copied().unwrap_or(0.0))
                .sum();

            let recent_average = recent_total / window;
            let prior_average = prior_total / window;

            for (slot, cost) in daily_totals.iter_mut().zip(&recent) {
                *slot += cost;
            }
            prior_total_all += prior_total;

            // Below-threshold services fold into the "other" remainder
            if recent_average < self.cost_threshold {
                for (slot, cost) in other_daily.iter_mut().zip(&recent) {
                    *slot += cost;
                }
                continue;
            }

            let percent_change = percent_change(recent_average, prior_average);
            services.push(ServiceAggregate {
                service: (*service).to_string(),
                recent_average,
                prior_average,
                percent_change,
                change: ChangeClass::classify(percent_change),
                recent_total,
                daily_breakdown: recent,
            });
        }

        // Highest recent average first; the sort is stable and the input
        // order is alphabetical, so ties stay deterministic
        services.sort_by(|a, b| b.recent_average.total_cmp(&a.recent_average));

        let total_cost: f64 = services.iter().map(|s| s.recent_total).sum();
        let average_daily_cost = total_cost / window;

        let other_total: f64 = other_daily.iter().sum();
        let other = (other_total > 0.0).then(|| OtherCosts {
            total: other_total,
            average: other_total / window,
            daily_breakdown: other_daily,
        });

        let recent_total_all: f64 = daily_totals.iter().sum();
        let total_change = percent_change(recent_total_all / window, prior_total_all / window);

        Ok(BillingSummary {
            dates: recent_dates,
            services,
            total_cost,
            average_daily_cost,
            other,
            daily_totals,
            total_change,
            window_days: self.window_days,
            cost_threshold: self.cost_threshold,
        })
    }
}

/// Contiguous dates ending the day before `end`, ascending
fn window_ending(end: NaiveDate, days: usize) -> Vec<NaiveDate> {
    (1..=days as i64)
        .rev()
        .map(|back| end - Duration::days(back))
        .collect()
}

/// Percent change between window averages; `None` when the prior window had
/// no spend (new service), never a division by zero
fn percent_change(recent_average: f64, prior_average: f64) -> Option<f64> {
    if prior_average > 0.0 {
        Some((recent_average - prior_average) / prior_average * 100.0)
    } else {
        None
    }
}
