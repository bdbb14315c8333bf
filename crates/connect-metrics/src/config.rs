// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::error::ProcessorError;
use std::env;
use std::time::Duration;

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration for the metrics processor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessorConfig {
    /// Amazon Connect instance to collect queue metrics from
    pub instance_id: String,
    /// Kinesis stream that receives one record per metric result
    pub stream_name: String,
    /// Log level (e.g., trace, debug, info, warn, error)
    pub log_level: String,
    /// Run repeatedly on this interval instead of once per invocation
    pub poll_interval: Option<Duration>,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            instance_id: String::new(),
            stream_name: String::new(),
            log_level: "info".to_string(),
            poll_interval: None,
        }
    }
}

impl ProcessorConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, ProcessorError> {
        let instance_id = env::var("CONNECT_INSTANCE_ID").map_err(|_| {
            ProcessorError::InvalidConfig(
                "CONNECT_INSTANCE_ID environment variable is not set".to_string(),
            )
        })?;
        let stream_name = env::var("KINESIS_STREAM_NAME").map_err(|_| {
            ProcessorError::InvalidConfig(
                "KINESIS_STREAM_NAME environment variable is not set".to_string(),
            )
        })?;
        let log_level = env::var("CONNECT_METRICS_LOG_LEVEL")
            .map(|val| val.to_lowercase())
            .unwrap_or_else(|_| "info".to_string());
        let poll_interval = match env::var("CONNECT_METRICS_POLL_INTERVAL_SECS") {
            Ok(val) => {
                let secs = val.trim().parse::<u64>().map_err(|_| {
                    ProcessorError::InvalidConfig(format!(
                        "CONNECT_METRICS_POLL_INTERVAL_SECS must be a number of seconds, \
                         got '{val}'"
                    ))
                })?;
                Some(Duration::from_secs(secs))
            }
            Err(_) => None,
        };

        let config = Self {
            instance_id,
            stream_name,
            log_level,
            poll_interval,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ProcessorError> {
        if self.instance_id.trim().is_empty() {
            return Err(ProcessorError::InvalidConfig(
                "CONNECT_INSTANCE_ID cannot be empty".to_string(),
            ));
        }

        if self.stream_name.trim().is_empty() {
            return Err(ProcessorError::InvalidConfig(
                "KINESIS_STREAM_NAME cannot be empty".to_string(),
            ));
        }

        if !VALID_LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ProcessorError::InvalidConfig(format!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.log_level
            )));
        }

        if self.poll_interval == Some(Duration::ZERO) {
            return Err(ProcessorError::InvalidConfig(
                "CONNECT_METRICS_POLL_INTERVAL_SECS must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
