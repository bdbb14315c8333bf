// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Data carried through a single metrics run.
//!
//! Metric results mirror the JSON shape of the Connect metric APIs
//! (`Dimensions`, `Collections`, PascalCase keys) because that is the payload
//! downstream consumers of the stream read.

use serde::{Deserialize, Serialize};

/// Routing type reported by the queue directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueType {
    Standard,
    Agent,
    Other(String),
}

impl From<&str> for QueueType {
    fn from(value: &str) -> Self {
        match value {
            "STANDARD" => QueueType::Standard,
            "AGENT" => QueueType::Agent,
            other => QueueType::Other(other.to_string()),
        }
    }
}

/// One entry of the queue directory listing, before filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueSummary {
    pub id: String,
    pub name: String,
    pub arn: String,
    pub queue_type: QueueType,
}

/// A standard queue that metrics are collected for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Queue {
    pub id: String,
    pub name: String,
    pub arn: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Seconds,
    Count,
    Percent,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Seconds => "SECONDS",
            Unit::Count => "COUNT",
            Unit::Percent => "PERCENT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statistic {
    Avg,
    Sum,
    Max,
}

impl Statistic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Statistic::Avg => "AVG",
            Statistic::Sum => "SUM",
            Statistic::Max => "MAX",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Lt,
}

impl Comparison {
    pub fn as_str(&self) -> &'static str {
        match self {
            Comparison::Lt => "LT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threshold {
    pub comparison: Comparison,
    pub value: f64,
}

/// A metric requested from one of the metric APIs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricDefinition {
    pub name: &'static str,
    pub unit: Unit,
    /// Only historical metrics carry a statistic.
    pub statistic: Option<Statistic>,
    pub threshold: Option<Threshold>,
}

impl MetricDefinition {
    pub const fn current(name: &'static str, unit: Unit) -> Self {
        Self {
            name,
            unit,
            statistic: None,
            threshold: None,
        }
    }

    pub const fn historical(name: &'static str, unit: Unit, statistic: Statistic) -> Self {
        Self {
            name,
            unit,
            statistic: Some(statistic),
            threshold: None,
        }
    }

    pub const fn with_threshold(mut self, comparison: Comparison, value: f64) -> Self {
        self.threshold = Some(Threshold { comparison, value });
        self
    }

    /// The descriptor the metric APIs echo back next to each value.
    pub fn descriptor(&self) -> MetricDescriptor {
        MetricDescriptor {
            name: self.name.to_string(),
            unit: Some(self.unit.as_str().to_string()),
            statistic: self.statistic.map(|s| s.as_str().to_string()),
            threshold: self.threshold.map(|t| ThresholdDescriptor {
                comparison: Some(t.comparison.as_str().to_string()),
                threshold_value: Some(t.value),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Voice,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Voice => "VOICE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    Queue,
}

impl Grouping {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grouping::Queue => "QUEUE",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueueReference {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arn: Option<String>,
    /// Filled in from the queue directory; absent until then.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Dimensions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue: Option<QueueReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ThresholdDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_value: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<ThresholdDescriptor>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricData {
    pub metric: MetricDescriptor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

/// One grouping of metric values returned by a metric API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    #[serde(default)]
    pub collections: Vec<MetricData>,
}

impl MetricResult {
    pub fn queue_id(&self) -> Option<&str> {
        self.dimensions
            .as_ref()
            .and_then(|d| d.queue.as_ref())
            .map(|q| q.id.as_str())
    }

    pub fn queue_name(&self) -> Option<&str> {
        self.dimensions
            .as_ref()
            .and_then(|d| d.queue.as_ref())
            .and_then(|q| q.name.as_deref())
    }
}

/// Results of one metric query, in the order the API returned them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricQueryResult {
    pub results: Vec<MetricResult>,
}

impl From<Vec<MetricResult>> for MetricQueryResult {
    fn from(results: Vec<MetricResult>) -> Self {
        Self { results }
    }
}

/// A keyed message handed to the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    pub data: Vec<u8>,
    pub partition_key: String,
}
