//! AWS Cost Explorer provider
//!
//! Fetches daily unblended costs grouped by service. Refunds and credits are
//! filtered out so the numbers line up with the console's cost view; result
//! pages are followed and split groups summed per (date, service).

use crate::config::Config;
use crate::types::{CostwatchError, DailyCostRecord, Result};
use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_costexplorer::types::{
    DateInterval, Dimension, DimensionValues, Expression, Granularity, GroupDefinition,
    GroupDefinitionType, ResultByTime,
};
use aws_sdk_costexplorer::Client;
use chrono::NaiveDate;
use std::collections::BTreeMap;

const COST_METRIC: &str = "UnblendedCost";

pub struct CostExplorerProvider {
    client: Client,
}

impl CostExplorerProvider {
    /// Build a client for the configured region. Static env credentials win
    /// over the SDK default chain when present.
    pub async fn new(config: &Config) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()));
        if let Some((key, secret)) = config.static_credentials() {
            loader = loader
                .credentials_provider(Credentials::new(key, secret, None, None, "costwatch"));
        }
        let sdk_config = loader.load().await;

        Self {
            client: Client::new(&sdk_config),
        }
    }

    /// Daily cost per service over `[start, end)`, sorted by date then
    /// service name.
    pub async fn fetch_daily_costs(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyCostRecord>> {
        let period = DateInterval::builder()
            .start(start.to_string())
            .end(end.to_string())
            .build()
            .map_err(|e| CostwatchError::Provider(format!("invalid date interval: {}", e)))?;

        let mut merged: BTreeMap<(NaiveDate, String), f64> = BTreeMap::new();
        let mut next_token: Option<String> = None;

        loop {
            let response = self
                .client
                .get_cost_and_usage()
                .time_period(period.clone())
                .granularity(Granularity::Daily)
                .metrics(COST_METRIC)
                .group_by(
                    GroupDefinition::builder()
                        .r#type(GroupDefinitionType::Dimension)
                        .key("SERVICE")
                        .build(),
                )
                .filter(usage_only_filter())
                .set_next_page_token(next_token)
                .send()
                .await
                .map_err(|e| CostwatchError::Provider(e.to_string()))?;

            merge_results(response.results_by_time(), &mut merged)?;

            next_token = response.next_page_token().map(str::to_string);
            if next_token.is_none() {
                break;
            }
        }

        Ok(merged
            .into_iter()
            .map(|((date, service), cost)| DailyCostRecord {
                date,
                service,
                cost,
            })
            .collect())
    }
}

/// Exclude refunds and credits, mirroring the console's cost view
fn usage_only_filter() -> Expression {
    Expression::builder()
        .not(
            Expression::builder()
                .dimensions(
                    DimensionValues::builder()
                        .key(Dimension::RecordType)
                        .values("Refund")
                        .values("Credit")
                        .build(),
                )
                .build(),
        )
        .build()
}

/// Fold one page of results into the accumulator. Non-positive amounts are
/// skipped; a group split across pages sums per (date, service).
fn merge_results(
    results: &[ResultByTime],
    merged: &mut BTreeMap<(NaiveDate, String), f64>,
) -> Result<()> {
    for result in results {
        let period = match result.time_period() {
            Some(p) => p,
            None => continue,
        };
        let date = NaiveDate::parse_from_str(period.start(), "%Y-%m-%d").map_err(|e| {
            CostwatchError::Provider(format!("bad period start {:?}: {}", period.start(), e))
        })?;

        for group in result.groups() {
            let service = match group.keys().first() {
                Some(key) => key,
                None => continue,
            };
            let amount = group
                .metrics()
                .and_then(|m| m.get(COST_METRIC))
                .and_then(|v| v.amount())
                .unwrap_or("0");
            let cost: f64 = amount.parse().map_err(|e| {
                CostwatchError::Provider(format!(
                    "bad cost amount {:?} for {}: {}",
                    amount, service, e
                ))
            })?;
            if cost > 0.0 {
                *merged.entry((date, service.clone())).or_insert(0.0) += cost;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_costexplorer::types::{Group, MetricValue};

    fn period(start: &str, end: &str) -> DateInterval {
        DateInterval::builder()
            .start(start)
            .end(end)
            .build()
            .unwrap()
    }

    fn cost_group(service: &str, amount: &str) -> Group {
        Group::builder()
            .keys(service)
            .metrics(
                COST_METRIC,
                MetricValue::builder().amount(amount).unit("USD").build(),
            )
            .build()
    }

    fn result_page(start: &str, end: &str, groups: Vec<Group>) -> ResultByTime {
        ResultByTime::builder()
            .time_period(period(start, end))
            .set_groups(Some(groups))
            .build()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn test_merge_extracts_daily_records() {
        let results = vec![result_page(
            "2024-01-06",
            "2024-01-07",
            vec![
                cost_group("Amazon Simple Storage Service", "12.5"),
                cost_group("AWS Lambda", "3.25"),
            ],
        )];

        let mut merged = BTreeMap::new();
        merge_results(&results, &mut merged).unwrap();

        assert_eq!(merged.len(), 2);
        assert_eq!(
            merged[&(date(6), "Amazon Simple Storage Service".to_string())],
            12.5
        );
        assert_eq!(merged[&(date(6), "AWS Lambda".to_string())], 3.25);
    }

    #[test]
    fn test_merge_skips_zero_and_negative_amounts() {
        let results = vec![result_page(
            "2024-01-06",
            "2024-01-07",
            vec![
                cost_group("Amazon Route 53", "0"),
                cost_group("AWS Lambda", "-1.5"),
                cost_group("Amazon Simple Storage Service", "0.0000001"),
            ],
        )];

        let mut merged = BTreeMap::new();
        merge_results(&results, &mut merged).unwrap();

        assert_eq!(merged.len(), 1);
        assert!(merged.contains_key(&(date(6), "Amazon Simple Storage Service".to_string())));
    }

    #[test]
    fn test_merge_sums_split_groups_across_pages() {
        let page_one = vec![result_page(
            "2024-01-06",
            "2024-01-07",
            vec![cost_group("AWS Lambda", "1.5")],
        )];
        let page_two = vec![result_page(
            "2024-01-06",
            "2024-01-07",
            vec![cost_group("AWS Lambda", "2.0")],
        )];

        let mut merged = BTreeMap::new();
        merge_results(&page_one, &mut merged).unwrap();
        merge_results(&page_two, &mut merged).unwrap();

        assert_eq!(merged.len(), 1);
        assert!((merged[&(date(6), "AWS Lambda".to_string())] - 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_merge_missing_metric_counts_as_zero() {
        let results = vec![result_page(
            "2024-01-06",
            "2024-01-07",
            vec![Group::builder().keys("AWS Lambda").build()],
        )];

        let mut merged = BTreeMap::new();
        merge_results(&results, &mut merged).unwrap();

        assert!(merged.is_empty());
    }

    #[test]
    fn test_merge_bad_amount_is_provider_error() {
        let results = vec![result_page(
            "2024-01-06",
            "2024-01-07",
            vec![cost_group("AWS Lambda", "not-a-number")],
        )];

        let mut merged = BTreeMap::new();
        let err = merge_results(&results, &mut merged).unwrap_err();

        assert!(matches!(err, CostwatchError::Provider(_)));
        assert!(err.to_string().contains("not-a-number"));
    }

    #[test]
    fn test_merge_result_without_period_is_skipped() {
        let results = vec![ResultByTime::builder()
            .set_groups(Some(vec![cost_group("AWS Lambda", "1.0")]))
            .build()];

        let mut merged = BTreeMap::new();
        merge_results(&results, &mut merged).unwrap();

        assert!(merged.is_empty());
    }

    #[test]
    fn test_usage_only_filter_excludes_refunds_and_credits() {
        let filter = usage_only_filter();

        let inner = filter.not().unwrap();
        let dimensions = inner.dimensions().unwrap();
        assert_eq!(dimensions.key(), Some(&Dimension::RecordType));
        assert_eq!(dimensions.values().to_vec(), vec!["Refund", "Credit"]);
    }
}
