// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! In-memory Connect and Kinesis fakes

use async_trait::async_trait;
use connect_metrics::api::{
    ConnectApi, CurrentMetricQuery, HistoricalMetricQuery, PutRecordsOutcome, StreamSink,
};
use connect_metrics::error::{MetricApi, ProcessorError, Result};
use connect_metrics::model::{
    Dimensions, MetricData, MetricDefinition, MetricQueryResult, MetricResult, OutputRecord,
    QueueReference, QueueSummary, QueueType, Statistic, Unit,
};
use std::sync::Mutex;

pub fn queue(id: &str, name: &str, queue_type: QueueType) -> QueueSummary {
    QueueSummary {
        id: id.to_string(),
        name: name.to_string(),
        arn: format!("arn:aws:connect:us-east-1:123456789012:instance/i-1/queue/{id}"),
        queue_type,
    }
}

pub fn real_time_result(queue_id: Option<&str>, contacts_in_queue: f64) -> MetricResult {
    MetricResult {
        dimensions: queue_id.map(|id| Dimensions {
            queue: Some(QueueReference {
                id: id.to_string(),
                arn: Some(format!("arn:{id}")),
                name: None,
            }),
            channel: Some("VOICE".to_string()),
        }),
        collections: vec![MetricData {
            metric: MetricDefinition::current("CONTACTS_IN_QUEUE", Unit::Count).descriptor(),
            value: Some(contacts_in_queue),
        }],
    }
}

pub fn historical_result(queue_id: Option<&str>, handled: f64) -> MetricResult {
    MetricResult {
        collections: vec![MetricData {
            metric: MetricDefinition::historical("CONTACTS_HANDLED", Unit::Count, Statistic::Sum)
                .descriptor(),
            value: Some(handled),
        }],
        ..real_time_result(queue_id, 0.0)
    }
}

/// Answers each query from canned results; grouped and aggregate queries are
/// told apart by their groupings.
#[derive(Default)]
pub struct FakeConnect {
    pub queues: Vec<QueueSummary>,
    pub real_time_by_queue: Vec<MetricResult>,
    pub real_time_aggregate: Vec<MetricResult>,
    pub historical_by_queue: Vec<MetricResult>,
    pub historical_aggregate: Vec<MetricResult>,
    pub fail_directory: bool,
    pub fail_real_time: bool,
    pub fail_historical: bool,
    /// Fails only the ungrouped historical query.
    pub fail_historical_aggregate: bool,
    pub current_queries: Mutex<Vec<CurrentMetricQuery>>,
    pub historical_queries: Mutex<Vec<HistoricalMetricQuery>>,
}

#[async_trait]
impl ConnectApi for FakeConnect {
    async fn list_queues(&self, _instance_id: &str) -> Result<Vec<QueueSummary>> {
        if self.fail_directory {
            return Err(ProcessorError::Directory("ResourceNotFoundException".into()));
        }
        Ok(self.queues.clone())
    }

    async fn get_current_metric_data(
        &self,
        query: &CurrentMetricQuery,
    ) -> Result<MetricQueryResult> {
        self.current_queries.lock().unwrap().push(query.clone());
        if self.fail_real_time {
            return Err(ProcessorError::fetch(MetricApi::RealTime, "ThrottlingException"));
        }
        let results = if query.groupings.is_empty() {
            &self.real_time_aggregate
        } else {
            &self.real_time_by_queue
        };
        Ok(results.clone().into())
    }

    async fn get_metric_data(&self, query: &HistoricalMetricQuery) -> Result<MetricQueryResult> {
        self.historical_queries.lock().unwrap().push(query.clone());
        if self.fail_historical || (self.fail_historical_aggregate && query.groupings.is_empty()) {
            return Err(ProcessorError::fetch(MetricApi::Historical, "ThrottlingException"));
        }
        let results = if query.groupings.is_empty() {
            &self.historical_aggregate
        } else {
            &self.historical_by_queue
        };
        Ok(results.clone().into())
    }
}

/// Records every batch it is handed.
#[derive(Default)]
pub struct RecordingSink {
    pub batches: Mutex<Vec<(String, Vec<OutputRecord>)>>,
    pub reject: usize,
}

impl RecordingSink {
    pub fn batches(&self) -> Vec<(String, Vec<OutputRecord>)> {
        self.batches.lock().unwrap().clone()
    }
}

#[async_trait]
impl StreamSink for RecordingSink {
    async fn put_records(
        &self,
        stream_name: &str,
        records: &[OutputRecord],
    ) -> Result<PutRecordsOutcome> {
        self.batches
            .lock()
            .unwrap()
            .push((stream_name.to_string(), records.to_vec()));
        Ok(PutRecordsOutcome {
            record_count: records.len(),
            failed_record_count: self.reject,
        })
    }
}
