// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

mod common;

use chrono::{TimeZone, Utc};
use common::mocks::{historical_result, queue, real_time_result, FakeConnect, RecordingSink};
use connect_metrics::error::MetricApi;
use connect_metrics::model::{MetricResult, QueueType};
use connect_metrics::{MetricsProcessor, ProcessorError};
use std::sync::Arc;

fn two_queue_connect() -> FakeConnect {
    FakeConnect {
        queues: vec![
            queue("Q1", "Sales", QueueType::Standard),
            queue("A1", "agent-queue", QueueType::Agent),
            queue("Q2", "Support", QueueType::Standard),
        ],
        real_time_by_queue: vec![
            real_time_result(Some("Q1"), 3.0),
            real_time_result(Some("Q2"), 1.0),
        ],
        historical_by_queue: vec![
            historical_result(Some("Q1"), 42.0),
            historical_result(Some("Q2"), 17.0),
        ],
        real_time_aggregate: vec![real_time_result(None, 4.0)],
        historical_aggregate: vec![historical_result(None, 59.0)],
        ..Default::default()
    }
}

fn processor(connect: &Arc<FakeConnect>, sink: &Arc<RecordingSink>) -> MetricsProcessor {
    MetricsProcessor::new(
        connect.clone(),
        sink.clone(),
        "instance-1",
        "connect-metrics-stream",
    )
}

#[tokio::test]
async fn test_end_to_end_publishes_six_records_in_one_call() {
    let connect = Arc::new(two_queue_connect());
    let sink = Arc::new(RecordingSink::default());
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 7, 31).unwrap();

    let report = processor(&connect, &sink).run_at(now).await.unwrap();

    assert_eq!(report.queue_count, 2);
    assert_eq!(report.record_count, 6);
    assert_eq!(report.window.end, Utc.with_ymd_and_hms(2024, 3, 1, 12, 5, 0).unwrap());
    assert_eq!(report.window.start, Utc.with_ymd_and_hms(2024, 3, 1, 11, 5, 0).unwrap());

    let batches = sink.batches();
    assert_eq!(batches.len(), 1);
    let (stream_name, records) = &batches[0];
    assert_eq!(stream_name, "connect-metrics-stream");

    let keys: Vec<&str> = records.iter().map(|r| r.partition_key.as_str()).collect();
    assert_eq!(keys, vec!["Sales", "Support", "Sales", "Support", "Queue", "Queue"]);

    for record in &records[..4] {
        let payload: MetricResult = serde_json::from_slice(&record.data).unwrap();
        assert_eq!(payload.queue_name(), Some(record.partition_key.as_str()));
    }
    let aggregate: MetricResult = serde_json::from_slice(&records[5].data).unwrap();
    assert_eq!(aggregate.collections[0].value, Some(59.0));
}

#[tokio::test]
async fn test_queries_are_scoped_to_standard_queues() {
    let connect = Arc::new(two_queue_connect());
    let sink = Arc::new(RecordingSink::default());

    processor(&connect, &sink).run().await.unwrap();

    let current = connect.current_queries.lock().unwrap();
    let historical = connect.historical_queries.lock().unwrap();
    assert_eq!(current.len(), 2);
    assert_eq!(historical.len(), 2);
    for ids in current
        .iter()
        .map(|q| &q.queue_ids)
        .chain(historical.iter().map(|q| &q.queue_ids))
    {
        assert_eq!(ids, &vec!["Q1".to_string(), "Q2".to_string()]);
    }
    assert_eq!(current.iter().filter(|q| q.groupings.is_empty()).count(), 1);
    assert_eq!(historical.iter().filter(|q| q.groupings.is_empty()).count(), 1);
}

#[tokio::test]
async fn test_historical_failure_publishes_nothing() {
    let connect = Arc::new(FakeConnect {
        fail_historical: true,
        ..two_queue_connect()
    });
    let sink = Arc::new(RecordingSink::default());

    let err = processor(&connect, &sink).run().await.unwrap_err();

    assert!(matches!(err, ProcessorError::Fetch { .. }));
    assert!(sink.batches().is_empty());
}

#[tokio::test]
async fn test_real_time_failure_publishes_nothing() {
    let connect = Arc::new(FakeConnect {
        fail_real_time: true,
        ..two_queue_connect()
    });
    let sink = Arc::new(RecordingSink::default());

    let err = processor(&connect, &sink).run().await.unwrap_err();

    assert!(matches!(
        err,
        ProcessorError::Fetch {
            api: MetricApi::RealTime,
            ..
        }
    ));
    assert!(sink.batches().is_empty());
}

#[tokio::test]
async fn test_aggregate_failure_discards_grouped_results() {
    let connect = Arc::new(FakeConnect {
        fail_historical_aggregate: true,
        ..two_queue_connect()
    });
    let sink = Arc::new(RecordingSink::default());

    let err = processor(&connect, &sink).run().await.unwrap_err();

    assert!(matches!(
        err,
        ProcessorError::Fetch {
            api: MetricApi::Historical,
            ..
        }
    ));
    let historical = connect.historical_queries.lock().unwrap();
    assert!(historical.iter().any(|q| !q.groupings.is_empty()));
    assert!(sink.batches().is_empty());
}

#[tokio::test]
async fn test_grouped_result_without_queue_publishes_nothing() {
    let connect = Arc::new(FakeConnect {
        real_time_by_queue: vec![real_time_result(Some("Q1"), 3.0), real_time_result(None, 1.0)],
        ..two_queue_connect()
    });
    let sink = Arc::new(RecordingSink::default());

    let err = processor(&connect, &sink).run().await.unwrap_err();

    assert!(matches!(
        err,
        ProcessorError::Fetch {
            api: MetricApi::RealTime,
            ..
        }
    ));
    assert!(sink.batches().is_empty());
}

#[tokio::test]
async fn test_directory_failure_aborts_before_fetching() {
    let connect = Arc::new(FakeConnect {
        fail_directory: true,
        ..two_queue_connect()
    });
    let sink = Arc::new(RecordingSink::default());

    let err = processor(&connect, &sink).run().await.unwrap_err();

    assert!(matches!(err, ProcessorError::Directory(_)));
    assert!(connect.current_queries.lock().unwrap().is_empty());
    assert!(connect.historical_queries.lock().unwrap().is_empty());
    assert!(sink.batches().is_empty());
}

#[tokio::test]
async fn test_unknown_queue_is_still_published() {
    let connect = Arc::new(FakeConnect {
        real_time_by_queue: vec![real_time_result(Some("Q9"), 2.0)],
        historical_by_queue: vec![],
        real_time_aggregate: vec![],
        historical_aggregate: vec![],
        ..two_queue_connect()
    });
    let sink = Arc::new(RecordingSink::default());

    let report = processor(&connect, &sink).run().await.unwrap();

    assert_eq!(report.record_count, 1);
    let records = &sink.batches()[0].1;
    let payload: MetricResult = serde_json::from_slice(&records[0].data).unwrap();
    assert_eq!(payload.queue_name(), None);
    assert_eq!(records[0].partition_key, "Q9");
}

#[tokio::test]
async fn test_empty_aggregates_emit_no_records() {
    let connect = Arc::new(FakeConnect {
        real_time_aggregate: vec![],
        historical_aggregate: vec![],
        ..two_queue_connect()
    });
    let sink = Arc::new(RecordingSink::default());

    let report = processor(&connect, &sink).run().await.unwrap();

    assert_eq!(report.record_count, 4);
    let records = &sink.batches()[0].1;
    assert!(records.iter().all(|r| r.partition_key != "Queue"));
}

#[tokio::test]
async fn test_rejected_records_fail_the_run() {
    let connect = Arc::new(two_queue_connect());
    let sink = Arc::new(RecordingSink {
        reject: 1,
        ..Default::default()
    });

    let err = processor(&connect, &sink).run().await.unwrap_err();
    assert!(matches!(
        err,
        ProcessorError::PartialPublish {
            failed: 1,
            total: 6
        }
    ));
}

#[tokio::test]
async fn test_repeated_runs_produce_identical_payloads() {
    let connect = Arc::new(two_queue_connect());
    let sink = Arc::new(RecordingSink::default());
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 0, 2, 0).unwrap();

    let processor = processor(&connect, &sink);
    processor.run_at(now).await.unwrap();
    processor.run_at(now).await.unwrap();

    let batches = sink.batches();
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].1, batches[1].1);
}
