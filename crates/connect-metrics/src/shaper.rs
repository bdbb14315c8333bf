// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use tracing::warn;

use crate::directory::QueueDirectory;
use crate::error::{MetricApi, ProcessorError, Result};
use crate::model::{MetricQueryResult, MetricResult, OutputRecord};

/// Partition key shared by every aggregate (ungrouped) record.
pub const AGGREGATE_PARTITION_KEY: &str = "Queue";

/// Sets `Dimensions.Queue.Name` from the directory. Results whose queue id is
/// unknown keep an unset name.
pub fn enrich(result: &mut MetricResult, directory: &QueueDirectory) {
    let Some(queue) = result.dimensions.as_mut().and_then(|d| d.queue.as_mut()) else {
        return;
    };
    match directory.name_of(&queue.id) {
        Some(name) => queue.name = Some(name.to_string()),
        None => warn!(
            "Queue {} not found in directory, publishing without a name",
            queue.id
        ),
    }
}

/// Partition key of a per-queue record: the queue name, or the queue id when
/// enrichment found no name. `None` when the result names no queue at all.
pub fn partition_key(result: &MetricResult) -> Option<String> {
    let non_empty = |key: &&str| !key.is_empty();
    result
        .queue_name()
        .filter(non_empty)
        .or_else(|| result.queue_id().filter(non_empty))
        .map(str::to_string)
}

/// Enriches each grouped result in place and turns it into a record keyed by
/// its queue. A grouped result without a queue id is a malformed response
/// from `api` and fails the run.
pub fn shape_grouped(
    results: Vec<MetricResult>,
    api: MetricApi,
    directory: &QueueDirectory,
) -> Result<Vec<OutputRecord>> {
    results
        .into_iter()
        .map(|mut result| {
            enrich(&mut result, directory);
            let key = partition_key(&result).ok_or_else(|| {
                ProcessorError::fetch(api, "grouped metric result has no queue id")
            })?;
            Ok(OutputRecord {
                data: serde_json::to_vec(&result)?,
                partition_key: key,
            })
        })
        .collect()
}

/// An aggregate query yields one record built from its first result, or none
/// when the query came back empty.
pub fn shape_aggregate(result: &MetricQueryResult) -> Result<Option<OutputRecord>> {
    result
        .results
        .first()
        .map(|first| {
            Ok(OutputRecord {
                data: serde_json::to_vec(first)?,
                partition_key: AGGREGATE_PARTITION_KEY.to_string(),
            })
        })
        .transpose()
}

/// Everything fetched during one run.
#[derive(Debug, Clone, Default)]
pub struct FetchedMetrics {
    pub real_time_by_queue: MetricQueryResult,
    pub historical_by_queue: MetricQueryResult,
    pub real_time_aggregate: MetricQueryResult,
    pub historical_aggregate: MetricQueryResult,
}

/// Builds the run's records: grouped real-time, grouped historical, then the
/// real-time and historical aggregates.
pub fn shape_records(
    fetched: FetchedMetrics,
    directory: &QueueDirectory,
) -> Result<Vec<OutputRecord>> {
    let mut records = shape_grouped(
        fetched.real_time_by_queue.results,
        MetricApi::RealTime,
        directory,
    )?;
    records.extend(shape_grouped(
        fetched.historical_by_queue.results,
        MetricApi::Historical,
        directory,
    )?);

    for aggregate in [&fetched.real_time_aggregate, &fetched.historical_aggregate] {
        if let Some(record) = shape_aggregate(aggregate)? {
            records.push(record);
        }
    }

    Ok(records)
}
