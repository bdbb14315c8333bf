// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Fixed metric catalogs requested on every run.

use crate::model::{
    Comparison::Lt,
    MetricDefinition,
    Statistic::{self, Avg, Max, Sum},
    Unit::{self, Count, Percent, Seconds},
};

/// Page size requested from the real-time API. Only the first page is read.
pub const REAL_TIME_MAX_RESULTS: i32 = 100;

const fn hist(name: &'static str, unit: Unit, statistic: Statistic) -> MetricDefinition {
    MetricDefinition::historical(name, unit, statistic)
}

const fn current(name: &'static str, unit: Unit) -> MetricDefinition {
    MetricDefinition::current(name, unit)
}

/// Historical metrics, aggregated over the run's time window.
///
/// `CONTACTS_CONSULTED` is listed twice; both entries are sent and the API
/// reports the metric twice.
pub const HISTORICAL_METRICS: [MetricDefinition; 27] = [
    hist("ABANDON_TIME", Seconds, Avg),
    hist("AFTER_CONTACT_WORK_TIME", Seconds, Avg),
    hist("API_CONTACTS_HANDLED", Count, Sum),
    hist("CALLBACK_CONTACTS_HANDLED", Count, Sum),
    hist("CONTACTS_ABANDONED", Count, Sum),
    hist("CONTACTS_AGENT_HUNG_UP_FIRST", Count, Sum),
    hist("CONTACTS_CONSULTED", Count, Sum),
    hist("CONTACTS_CONSULTED", Count, Sum),
    hist("CONTACTS_HANDLED", Count, Sum),
    hist("CONTACTS_HANDLED_INCOMING", Count, Sum),
    hist("CONTACTS_HANDLED_OUTBOUND", Count, Sum),
    hist("CONTACTS_HOLD_ABANDONS", Count, Sum),
    hist("CONTACTS_MISSED", Count, Sum),
    hist("CONTACTS_QUEUED", Count, Sum),
    hist("CONTACTS_TRANSFERRED_IN", Count, Sum),
    hist("CONTACTS_TRANSFERRED_IN_FROM_QUEUE", Count, Sum),
    hist("CONTACTS_TRANSFERRED_OUT_FROM_QUEUE", Count, Sum),
    hist("HANDLE_TIME", Seconds, Avg),
    hist("HOLD_TIME", Seconds, Avg),
    hist("INTERACTION_AND_HOLD_TIME", Seconds, Avg),
    hist("INTERACTION_TIME", Seconds, Avg),
    hist("OCCUPANCY", Percent, Avg),
    hist("QUEUE_ANSWER_TIME", Seconds, Avg),
    hist("QUEUED_TIME", Seconds, Max),
    hist("SERVICE_LEVEL", Percent, Avg).with_threshold(Lt, 15.0),
    hist("SERVICE_LEVEL", Percent, Avg).with_threshold(Lt, 30.0),
    hist("SERVICE_LEVEL", Percent, Avg).with_threshold(Lt, 60.0),
];

/// Real-time gauges read at the moment of the query.
pub const REAL_TIME_METRICS: [MetricDefinition; 13] = [
    current("AGENTS_AFTER_CONTACT_WORK", Count),
    current("AGENTS_AVAILABLE", Count),
    current("AGENTS_ERROR", Count),
    current("AGENTS_NON_PRODUCTIVE", Count),
    current("AGENTS_ON_CALL", Count),
    current("AGENTS_ON_CONTACT", Count),
    current("AGENTS_ONLINE", Count),
    current("AGENTS_STAFFED", Count),
    current("CONTACTS_IN_QUEUE", Count),
    current("CONTACTS_SCHEDULED", Count),
    current("OLDEST_CONTACT_AGE", Seconds),
    current("SLOTS_ACTIVE", Count),
    current("SLOTS_AVAILABLE", Count),
];
