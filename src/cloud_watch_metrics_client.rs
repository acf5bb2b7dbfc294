use crate::error::ReportError;
use async_trait::async_trait;

use chrono::{DateTime, Utc};
use log::{debug, warn};
use rusoto_cloudwatch::{
    CloudWatch, CloudWatchClient, Datapoint, Dimension, GetMetricStatisticsInput,
};
use rusoto_core::Region;

use crate::metric::Sample;
use crate::time_range::TimeRange;
use std::collections::HashMap;

const NAMESPACE: &'static str = "AWS/EC2";
const NETWORK_IN: &'static str = "NetworkIn";
const NETWORK_OUT: &'static str = "NetworkOut";
const INSTANCE_DIMENSION: &'static str = "InstanceId";
const DAILY_STATISTIC: &'static str = "Sum";
const DAILY_PERIOD_SECONDS: i64 = 24 * 60 * 60;

type DailySum = (DateTime<Utc>, f64);

pub struct CloudWatchMetricsClient {
    client: CloudWatchClient,
    instance_id: String,
}

#[async_trait]
pub trait FetchSamples {
    async fn fetch_samples(&self, time_range: &TimeRange) -> Result<Vec<Sample>, ReportError>;
}

#[async_trait]
impl FetchSamples for CloudWatchMetricsClient {
    async fn fetch_samples(&self, time_range: &TimeRange) -> Result<Vec<Sample>, ReportError> {
        let (inbound, outbound) = tokio::try_join!(
            self.daily_sums(NETWORK_IN, time_range),
            self.daily_sums(NETWORK_OUT, time_range)
        )?;
        Ok(join_series(inbound, outbound))
    }
}

impl CloudWatchMetricsClient {
    pub fn new(region: Region, instance_id: String) -> Self {
        Self::new_with_client(CloudWatchClient::new(region), instance_id)
    }

    fn new_with_client(client: CloudWatchClient, instance_id: String) -> Self {
        CloudWatchMetricsClient {
            client,
            instance_id,
        }
    }

    async fn daily_sums(
        &self,
        metric_name: &str,
        time_range: &TimeRange,
    ) -> Result<Vec<DailySum>, ReportError> {
        let metrics = self
            .client
            .get_metric_statistics(GetMetricStatisticsInput {
                start_time: time_range.start.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
                end_time: time_range.end.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
                metric_name: metric_name.to_string(),
                namespace: NAMESPACE.to_string(),
                dimensions: Some(vec![Dimension {
                    name: INSTANCE_DIMENSION.to_string(),
                    value: self.instance_id.clone(),
                }]),
                period: DAILY_PERIOD_SECONDS,
                statistics: Some(vec![DAILY_STATISTIC.to_string()]),
                ..Default::default()
            })
            .await?;

        let data_points = metrics.datapoints.unwrap_or_default();
        debug!(
            "{} returned {} datapoints for {}",
            metric_name,
            data_points.len(),
            self.instance_id
        );
        let mut sums = data_points
            .into_iter()
            .map(Self::daily_sum)
            .collect::<Result<Vec<DailySum>, ReportError>>()?;
        sums.sort_by_key(|(timestamp, _)| *timestamp);
        Ok(sums)
    }

    fn daily_sum(data_point: Datapoint) -> Result<DailySum, ReportError> {
        let raw_timestamp = data_point.timestamp.ok_or(ReportError::NoneValue)?;
        let timestamp = DateTime::parse_from_rfc3339(&raw_timestamp)
            .map_err(|_| ReportError::InvalidTimestamp(raw_timestamp.clone()))?
            .with_timezone(&Utc);
        let sum = data_point.sum.ok_or(ReportError::NoneValue)?;
        Ok((timestamp, sum))
    }
}

/// Pairs each inbound datapoint with the outbound datapoint of the same
/// timestamp. Inbound order is kept.
fn join_series(inbound: Vec<DailySum>, outbound: Vec<DailySum>) -> Vec<Sample> {
    let mut outbound: HashMap<DateTime<Utc>, f64> = outbound.into_iter().collect();
    let samples: Vec<Sample> = inbound
        .into_iter()
        .map(|(timestamp, inbound)| Sample {
            timestamp,
            inbound,
            outbound: outbound.remove(&timestamp),
        })
        .collect();
    for timestamp in outbound.keys() {
        warn!(
            "Dropping {} datapoint at {} without a {} counterpart",
            NETWORK_OUT, timestamp, NETWORK_IN
        );
    }
    samples
}
