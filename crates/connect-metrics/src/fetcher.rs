// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use tracing::debug;

use crate::api::{ConnectApi, CurrentMetricQuery, HistoricalMetricQuery};
use crate::catalog::{HISTORICAL_METRICS, REAL_TIME_MAX_RESULTS, REAL_TIME_METRICS};
use crate::directory::QueueDirectory;
use crate::error::Result;
use crate::model::{Channel, Grouping, MetricQueryResult};
use crate::window::TimeWindow;

fn groupings(grouping: Option<Grouping>) -> Vec<Grouping> {
    grouping.into_iter().collect()
}

/// Reads the real-time gauges for the voice channel of the given queues.
#[derive(Clone, Copy)]
pub struct RealTimeFetcher<'a> {
    api: &'a dyn ConnectApi,
    instance_id: &'a str,
}

impl<'a> RealTimeFetcher<'a> {
    pub fn new(api: &'a dyn ConnectApi, instance_id: &'a str) -> Self {
        Self { api, instance_id }
    }

    pub fn query(
        &self,
        directory: &QueueDirectory,
        grouping: Option<Grouping>,
    ) -> CurrentMetricQuery {
        CurrentMetricQuery {
            instance_id: self.instance_id.to_string(),
            queue_ids: directory.queue_ids(),
            channels: vec![Channel::Voice],
            groupings: groupings(grouping),
            metrics: &REAL_TIME_METRICS,
            max_results: REAL_TIME_MAX_RESULTS,
        }
    }

    /// One result per queue when grouped, a single aggregate result otherwise.
    /// Only the first page is requested.
    pub async fn fetch(
        &self,
        directory: &QueueDirectory,
        grouping: Option<Grouping>,
    ) -> Result<MetricQueryResult> {
        let query = self.query(directory, grouping);
        let result = self.api.get_current_metric_data(&query).await?;
        debug!(
            "Fetched {} real-time results (grouped: {})",
            result.results.len(),
            grouping.is_some()
        );
        Ok(result)
    }
}

/// Reads historical statistics for the voice channel of the given queues.
#[derive(Clone, Copy)]
pub struct HistoricalFetcher<'a> {
    api: &'a dyn ConnectApi,
    instance_id: &'a str,
    window: TimeWindow,
}

impl<'a> HistoricalFetcher<'a> {
    pub fn new(api: &'a dyn ConnectApi, instance_id: &'a str, window: TimeWindow) -> Self {
        Self {
            api,
            instance_id,
            window,
        }
    }

    pub fn query(
        &self,
        directory: &QueueDirectory,
        grouping: Option<Grouping>,
    ) -> HistoricalMetricQuery {
        HistoricalMetricQuery {
            instance_id: self.instance_id.to_string(),
            queue_ids: directory.queue_ids(),
            channels: vec![Channel::Voice],
            groupings: groupings(grouping),
            window: self.window,
            metrics: &HISTORICAL_METRICS,
        }
    }

    pub async fn fetch(
        &self,
        directory: &QueueDirectory,
        grouping: Option<Grouping>,
    ) -> Result<MetricQueryResult> {
        let query = self.query(directory, grouping);
        let result = self.api.get_metric_data(&query).await?;
        debug!(
            "Fetched {} historical results for {} - {} (grouped: {})",
            result.results.len(),
            self.window.start,
            self.window.end,
            grouping.is_some()
        );
        Ok(result)
    }
}
