//! Cost types for billing summaries

use chrono::NaiveDate;
use serde::Serialize;

/// One service's cost for one day, as returned by the cost provider.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyCostRecord {
    pub date: NaiveDate,
    pub service: String,
    pub cost: f64,
}

impl DailyCostRecord {
    pub fn new(date: NaiveDate, service: impl Into<String>, cost: f64) -> Self {
        Self {
            date,
            service: service.into(),
            cost,
        }
    }
}

/// Direction and magnitude of a window-over-window cost change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeClass {
    SignificantIncrease,
    ModerateIncrease,
    NoChange,
    ModerateDecrease,
    SignificantDecrease,
    /// No prior-window spend to compare against
    NewService,
}

/// Absolute percent change above which a move counts as significant.
/// Exactly 10% is still moderate.
const SIGNIFICANT_CHANGE_PERCENT: f64 = 10.0;

impl ChangeClass {
    /// Classify a percent change. `None` means the prior window had no spend.
    pub fn classify(percent_change: Option<f64>) -> Self {
        let change = match percent_change {
            Some(c) => c,
            None => return ChangeClass::NewService,
        };
        if change > SIGNIFICANT_CHANGE_PERCENT {
            ChangeClass::SignificantIncrease
        } else if change < -SIGNIFICANT_CHANGE_PERCENT {
            ChangeClass::SignificantDecrease
        } else if change > 0.0 {
            ChangeClass::ModerateIncrease
        } else if change < 0.0 {
            ChangeClass::ModerateDecrease
        } else {
            ChangeClass::NoChange
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChangeClass::SignificantIncrease => "significant increase",
            ChangeClass::ModerateIncrease => "moderate increase",
            ChangeClass::NoChange => "no change",
            ChangeClass::ModerateDecrease => "moderate decrease",
            ChangeClass::SignificantDecrease => "significant decrease",
            ChangeClass::NewService => "new service",
        }
    }
}

/// Per-service aggregate over the two comparison windows.
///
/// `daily_breakdown` is aligned with `BillingSummary::dates` (recent window,
/// ascending), with $0 filled in for days the service had no spend.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceAggregate {
    pub service: String,
    pub recent_average: f64,
    pub prior_average: f64,
    /// `None` when the prior window had no spend (new service)
    pub percent_change: Option<f64>,
    pub change: ChangeClass,
    pub recent_total: f64,
    pub daily_breakdown: Vec<f64>,
}

/// Per-day remainder for services that fell below the cost threshold.
#[derive(Debug, Clone, Serialize)]
pub struct OtherCosts {
    pub total: f64,
    pub average: f64,
    pub daily_breakdown: Vec<f64>,
}

impl OtherCosts {
    pub fn has_spend(&self) -> bool {
        self.daily_breakdown.iter().any(|&c| c > 0.0)
    }
}

/// Complete result of one report computation. Derived, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct BillingSummary {
    /// Recent-window dates, ascending
    pub dates: Vec<NaiveDate>,
    /// Ranked services, descending by `recent_average`
    pub services: Vec<ServiceAggregate>,
    /// Recent-window total across ranked services
    pub total_cost: f64,
    /// Recent-window average daily cost across ranked services
    pub average_daily_cost: f64,
    /// Below-threshold remainder, if any spend landed there
    pub other: Option<OtherCosts>,
    /// Per-day totals across all services, ranked and other alike
    pub daily_totals: Vec<f64>,
    /// Window-over-window change of the totals series
    pub total_change: Option<f64>,
    pub window_days: usize,
    pub cost_threshold: f64,
}
