// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Amazon Connect queue metrics collection.
//!
//! A run lists the instance's standard queues, queries the real-time and
//! historical metric APIs both per queue and in aggregate, names each per-queue
//! result after its queue and publishes one Kinesis record per result.

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

pub mod api;
pub mod aws;
pub mod catalog;
pub mod config;
pub mod directory;
pub mod error;
pub mod fetcher;
pub mod model;
pub mod processor;
pub mod publisher;
pub mod shaper;
pub mod window;

pub use config::ProcessorConfig;
pub use error::{ProcessorError, Result};
pub use processor::{MetricsProcessor, RunReport};
