// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use tracing::{debug, error};

use crate::api::{PutRecordsOutcome, StreamSink};
use crate::error::{ProcessorError, Result};
use crate::model::OutputRecord;

/// Publishes a run's records to the stream in a single call.
pub struct StreamPublisher<'a> {
    sink: &'a dyn StreamSink,
    stream_name: &'a str,
}

impl<'a> StreamPublisher<'a> {
    pub fn new(sink: &'a dyn StreamSink, stream_name: &'a str) -> Self {
        Self { sink, stream_name }
    }

    /// Sends every record in one batch. Records the stream rejects fail the
    /// run; nothing is retried here.
    pub async fn publish(&self, records: &[OutputRecord]) -> Result<PutRecordsOutcome> {
        if records.is_empty() {
            debug!("No records to publish to {}", self.stream_name);
            return Ok(PutRecordsOutcome::default());
        }

        debug!("Publishing {} records to {}", records.len(), self.stream_name);
        let outcome = self.sink.put_records(self.stream_name, records).await?;

        if outcome.failed_record_count > 0 {
            error!(
                "{} of {} records were rejected by {}",
                outcome.failed_record_count,
                records.len(),
                self.stream_name
            );
            return Err(ProcessorError::PartialPublish {
                failed: outcome.failed_record_count,
                total: records.len(),
            });
        }

        Ok(outcome)
    }
}
