// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Connect and Kinesis clients backed by the AWS SDK.

use async_trait::async_trait;
use aws_config::{meta::region::RegionProviderChain, BehaviorVersion, SdkConfig};
use aws_sdk_connect::error::DisplayErrorContext;
use aws_sdk_connect::primitives::DateTime as SdkDateTime;
use aws_sdk_connect::types as connect;
use aws_sdk_kinesis::primitives::Blob;
use aws_sdk_kinesis::types::PutRecordsRequestEntry;
use tracing::debug;

use crate::api::{
    ConnectApi, CurrentMetricQuery, HistoricalMetricQuery, PutRecordsOutcome, StreamSink,
};
use crate::error::{MetricApi, ProcessorError, Result};
use crate::model::{
    Dimensions, MetricData, MetricDefinition, MetricDescriptor, MetricQueryResult, MetricResult,
    OutputRecord, QueueReference, QueueSummary, QueueType, ThresholdDescriptor,
};

/// Loads region and credentials from the environment.
pub async fn load_sdk_config() -> SdkConfig {
    let region_provider = RegionProviderChain::default_provider();
    aws_config::defaults(BehaviorVersion::latest())
        .region(region_provider)
        .load()
        .await
}

#[derive(Debug, Clone)]
pub struct ConnectClient {
    client: aws_sdk_connect::Client,
}

impl ConnectClient {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_connect::Client::new(sdk_config),
        }
    }

    fn filters(queue_ids: &[String], channels: &[crate::model::Channel]) -> connect::Filters {
        connect::Filters::builder()
            .set_queues(Some(queue_ids.to_vec()))
            .set_channels(Some(
                channels
                    .iter()
                    .map(|c| connect::Channel::from(c.as_str()))
                    .collect(),
            ))
            .build()
    }

    fn groupings(groupings: &[crate::model::Grouping]) -> Vec<connect::Grouping> {
        groupings
            .iter()
            .map(|g| connect::Grouping::from(g.as_str()))
            .collect()
    }
}

fn current_metric(definition: &MetricDefinition) -> connect::CurrentMetric {
    connect::CurrentMetric::builder()
        .name(connect::CurrentMetricName::from(definition.name))
        .unit(connect::Unit::from(definition.unit.as_str()))
        .build()
}

fn historical_metric(definition: &MetricDefinition) -> connect::HistoricalMetric {
    let mut builder = connect::HistoricalMetric::builder()
        .name(connect::HistoricalMetricName::from(definition.name))
        .unit(connect::Unit::from(definition.unit.as_str()));
    if let Some(statistic) = definition.statistic {
        builder = builder.statistic(connect::Statistic::from(statistic.as_str()));
    }
    if let Some(threshold) = definition.threshold {
        builder = builder.threshold(
            connect::Threshold::builder()
                .comparison(connect::Comparison::from(threshold.comparison.as_str()))
                .threshold_value(threshold.value)
                .build(),
        );
    }
    builder.build()
}

fn dimensions(
    dimensions: Option<connect::Dimensions>,
    api: MetricApi,
) -> Result<Option<Dimensions>> {
    let Some(d) = dimensions else {
        return Ok(None);
    };
    let queue = match d.queue {
        Some(q) => Some(QueueReference {
            id: q
                .id
                .ok_or_else(|| ProcessorError::fetch(api, "queue dimension without Id"))?,
            arn: q.arn,
            name: None,
        }),
        None => None,
    };
    Ok(Some(Dimensions {
        queue,
        channel: d.channel.map(|c| c.as_str().to_string()),
    }))
}

fn current_descriptor(metric: Option<connect::CurrentMetric>) -> MetricDescriptor {
    let metric = metric.unwrap_or_else(|| connect::CurrentMetric::builder().build());
    MetricDescriptor {
        name: metric
            .name
            .map(|n| n.as_str().to_string())
            .unwrap_or_default(),
        unit: metric.unit.map(|u| u.as_str().to_string()),
        statistic: None,
        threshold: None,
    }
}

fn historical_descriptor(metric: Option<connect::HistoricalMetric>) -> MetricDescriptor {
    let metric = metric.unwrap_or_else(|| connect::HistoricalMetric::builder().build());
    MetricDescriptor {
        name: metric
            .name
            .map(|n| n.as_str().to_string())
            .unwrap_or_default(),
        unit: metric.unit.map(|u| u.as_str().to_string()),
        statistic: metric.statistic.map(|s| s.as_str().to_string()),
        threshold: metric.threshold.map(|t| ThresholdDescriptor {
            comparison: t.comparison.map(|c| c.as_str().to_string()),
            threshold_value: t.threshold_value,
        }),
    }
}

fn current_result(result: connect::CurrentMetricResult) -> Result<MetricResult> {
    Ok(MetricResult {
        dimensions: dimensions(result.dimensions, MetricApi::RealTime)?,
        collections: result
            .collections
            .unwrap_or_default()
            .into_iter()
            .map(|data| MetricData {
                metric: current_descriptor(data.metric),
                value: data.value,
            })
            .collect(),
    })
}

fn historical_result(result: connect::HistoricalMetricResult) -> Result<MetricResult> {
    Ok(MetricResult {
        dimensions: dimensions(result.dimensions, MetricApi::Historical)?,
        collections: result
            .collections
            .unwrap_or_default()
            .into_iter()
            .map(|data| MetricData {
                metric: historical_descriptor(data.metric),
                value: data.value,
            })
            .collect(),
    })
}

/// Agent queues carry no name, so only the id is required.
fn queue_summary(summary: connect::QueueSummary) -> Result<QueueSummary> {
    let id = summary
        .id
        .ok_or_else(|| ProcessorError::Directory("queue summary without Id".to_string()))?;
    Ok(QueueSummary {
        id,
        name: summary.name.unwrap_or_default(),
        arn: summary.arn.unwrap_or_default(),
        queue_type: summary
            .queue_type
            .map(|t| QueueType::from(t.as_str()))
            .unwrap_or_else(|| QueueType::Other(String::new())),
    })
}

#[async_trait]
impl ConnectApi for ConnectClient {
    async fn list_queues(&self, instance_id: &str) -> Result<Vec<QueueSummary>> {
        let mut summaries = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let output = self
                .client
                .list_queues()
                .instance_id(instance_id)
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| ProcessorError::Directory(DisplayErrorContext(&e).to_string()))?;

            for summary in output.queue_summary_list.unwrap_or_default() {
                summaries.push(queue_summary(summary)?);
            }

            match output.next_token {
                Some(token) if !token.is_empty() => next_token = Some(token),
                _ => break,
            }
        }

        debug!("Listed {} queues for instance {}", summaries.len(), instance_id);
        Ok(summaries)
    }

    async fn get_current_metric_data(
        &self,
        query: &CurrentMetricQuery,
    ) -> Result<MetricQueryResult> {
        let output = self
            .client
            .get_current_metric_data()
            .instance_id(&query.instance_id)
            .filters(Self::filters(&query.queue_ids, &query.channels))
            .set_groupings(Some(Self::groupings(&query.groupings)))
            .set_current_metrics(Some(query.metrics.iter().map(current_metric).collect()))
            .max_results(query.max_results)
            .send()
            .await
            .map_err(|e| {
                ProcessorError::fetch(MetricApi::RealTime, DisplayErrorContext(&e).to_string())
            })?;

        let results = output
            .metric_results
            .unwrap_or_default()
            .into_iter()
            .map(current_result)
            .collect::<Result<Vec<_>>>()?;
        Ok(results.into())
    }

    async fn get_metric_data(&self, query: &HistoricalMetricQuery) -> Result<MetricQueryResult> {
        let output = self
            .client
            .get_metric_data()
            .instance_id(&query.instance_id)
            .filters(Self::filters(&query.queue_ids, &query.channels))
            .set_groupings(Some(Self::groupings(&query.groupings)))
            .start_time(SdkDateTime::from_secs(query.window.start.timestamp()))
            .end_time(SdkDateTime::from_secs(query.window.end.timestamp()))
            .set_historical_metrics(Some(
                query.metrics.iter().map(historical_metric).collect(),
            ))
            .send()
            .await
            .map_err(|e| {
                ProcessorError::fetch(MetricApi::Historical, DisplayErrorContext(&e).to_string())
            })?;

        let results = output
            .metric_results
            .unwrap_or_default()
            .into_iter()
            .map(historical_result)
            .collect::<Result<Vec<_>>>()?;
        Ok(results.into())
    }
}

#[derive(Debug, Clone)]
pub struct KinesisSink {
    client: aws_sdk_kinesis::Client,
}

impl KinesisSink {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_kinesis::Client::new(sdk_config),
        }
    }
}

#[async_trait]
impl StreamSink for KinesisSink {
    async fn put_records(
        &self,
        stream_name: &str,
        records: &[OutputRecord],
    ) -> Result<PutRecordsOutcome> {
        let entries = records
            .iter()
            .map(|record| {
                PutRecordsRequestEntry::builder()
                    .data(Blob::new(record.data.clone()))
                    .partition_key(record.partition_key.as_str())
                    .build()
                    .map_err(|e| ProcessorError::Publish(e.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        let output = self
            .client
            .put_records()
            .stream_name(stream_name)
            .set_records(Some(entries))
            .send()
            .await
            .map_err(|e| ProcessorError::Publish(DisplayErrorContext(&e).to_string()))?;

        Ok(PutRecordsOutcome {
            record_count: output.records().len(),
            failed_record_count: output
                .failed_record_count()
                .map(|n| n.max(0) as usize)
                .unwrap_or(0),
        })
    }
}
