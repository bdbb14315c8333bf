// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{
    Channel, Grouping, MetricDefinition, MetricQueryResult, OutputRecord, QueueSummary,
};
use crate::window::TimeWindow;

/// Snapshot query against the real-time metric API.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentMetricQuery {
    pub instance_id: String,
    pub queue_ids: Vec<String>,
    pub channels: Vec<Channel>,
    /// Empty for an aggregate query across every queue in `queue_ids`.
    pub groupings: Vec<Grouping>,
    pub metrics: &'static [MetricDefinition],
    pub max_results: i32,
}

/// Windowed query against the historical metric API.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalMetricQuery {
    pub instance_id: String,
    pub queue_ids: Vec<String>,
    pub channels: Vec<Channel>,
    /// Empty for an aggregate query across every queue in `queue_ids`.
    pub groupings: Vec<Grouping>,
    pub window: TimeWindow,
    pub metrics: &'static [MetricDefinition],
}

/// The contact-center APIs a run reads from.
#[async_trait]
pub trait ConnectApi: Send + Sync {
    /// Lists every queue of the instance, in the order the directory returns them.
    async fn list_queues(&self, instance_id: &str) -> Result<Vec<QueueSummary>>;

    async fn get_current_metric_data(&self, query: &CurrentMetricQuery)
        -> Result<MetricQueryResult>;

    async fn get_metric_data(&self, query: &HistoricalMetricQuery) -> Result<MetricQueryResult>;
}

/// What the stream reported back for a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PutRecordsOutcome {
    pub record_count: usize,
    pub failed_record_count: usize,
}

/// The ordered stream metric records are published to.
#[async_trait]
pub trait StreamSink: Send + Sync {
    async fn put_records(
        &self,
        stream_name: &str,
        records: &[OutputRecord],
    ) -> Result<PutRecordsOutcome>;
}
