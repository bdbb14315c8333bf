// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

pub type Result<T> = std::result::Result<T, ProcessorError>;

/// Which metric endpoint a fetch error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricApi {
    RealTime,
    Historical,
}

impl std::fmt::Display for MetricApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricApi::RealTime => write!(f, "GetCurrentMetricData"),
            MetricApi::Historical => write!(f, "GetMetricData"),
        }
    }
}

/// Errors that abort a metrics run.
///
/// Every variant is fatal for the run it occurs in: nothing is published once
/// one of these is returned. Queue-name enrichment misses are not errors.
#[derive(Debug, thiserror::Error)]
pub enum ProcessorError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to compute metric window: {0}")]
    Window(String),

    #[error("Failed to list queues: {0}")]
    Directory(String),

    #[error("{api} request failed: {message}")]
    Fetch { api: MetricApi, message: String },

    #[error("Failed to serialize metric result: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to publish records: {0}")]
    Publish(String),

    #[error("Stream rejected {failed} of {total} records")]
    PartialPublish { failed: usize, total: usize },
}

impl ProcessorError {
    pub fn fetch(api: MetricApi, message: impl Into<String>) -> Self {
        ProcessorError::Fetch {
            api,
            message: message.into(),
        }
    }
}
