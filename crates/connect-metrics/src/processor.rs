// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::api::{ConnectApi, StreamSink};
use crate::directory::resolve_queues;
use crate::error::Result;
use crate::fetcher::{HistoricalFetcher, RealTimeFetcher};
use crate::model::Grouping;
use crate::publisher::StreamPublisher;
use crate::shaper::{shape_records, FetchedMetrics};
use crate::window::TimeWindow;

/// Summary of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub window: TimeWindow,
    pub queue_count: usize,
    pub record_count: usize,
}

/// Collects queue metrics from Connect and publishes them to a stream.
///
/// Clients are injected so a run can be driven against fakes.
#[derive(Clone)]
pub struct MetricsProcessor {
    connect: Arc<dyn ConnectApi>,
    sink: Arc<dyn StreamSink>,
    instance_id: String,
    stream_name: String,
}

impl MetricsProcessor {
    pub fn new(
        connect: Arc<dyn ConnectApi>,
        sink: Arc<dyn StreamSink>,
        instance_id: impl Into<String>,
        stream_name: impl Into<String>,
    ) -> Self {
        Self {
            connect,
            sink,
            instance_id: instance_id.into(),
            stream_name: stream_name.into(),
        }
    }

    /// Runs the pipeline for the window ending at the current time.
    pub async fn run(&self) -> Result<RunReport> {
        self.run_at(Utc::now()).await
    }

    /// Runs the pipeline as if invoked at `now`.
    ///
    /// The four metric queries run concurrently; if any of them fails the run
    /// returns that error and nothing is published.
    pub async fn run_at(&self, now: DateTime<Utc>) -> Result<RunReport> {
        let directory = resolve_queues(self.connect.as_ref(), &self.instance_id).await?;
        let window = TimeWindow::ending_at(now)?;
        debug!("Collecting historical metrics for {} - {}", window.start, window.end);

        let real_time = RealTimeFetcher::new(self.connect.as_ref(), &self.instance_id);
        let historical = HistoricalFetcher::new(self.connect.as_ref(), &self.instance_id, window);

        let (real_time_by_queue, historical_by_queue, real_time_aggregate, historical_aggregate) =
            tokio::try_join!(
                real_time.fetch(&directory, Some(Grouping::Queue)),
                historical.fetch(&directory, Some(Grouping::Queue)),
                real_time.fetch(&directory, None),
                historical.fetch(&directory, None),
            )?;

        let records = shape_records(
            FetchedMetrics {
                real_time_by_queue,
                historical_by_queue,
                real_time_aggregate,
                historical_aggregate,
            },
            &directory,
        )?;

        StreamPublisher::new(self.sink.as_ref(), &self.stream_name)
            .publish(&records)
            .await?;

        info!(
            "Published {} metric records for {} queues to {}",
            records.len(),
            directory.len(),
            self.stream_name
        );

        Ok(RunReport {
            window,
            queue_count: directory.len(),
            record_count: records.len(),
        })
    }
}
