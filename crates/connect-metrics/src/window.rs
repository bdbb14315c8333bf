// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Duration, DurationRound, Utc};

use crate::error::{ProcessorError, Result};

/// Granularity the historical API aggregates on.
pub const WINDOW_ALIGNMENT_MINUTES: i64 = 5;
pub const WINDOW_LENGTH_MINUTES: i64 = 60;

/// `[start, end)` range for the historical metric query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// The hour ending at the last 5-minute boundary at or before `now`.
    pub fn ending_at(now: DateTime<Utc>) -> Result<Self> {
        let end = floor_to_5min(now)?;
        let start = end
            .checked_sub_signed(Duration::minutes(WINDOW_LENGTH_MINUTES))
            .ok_or_else(|| ProcessorError::Window(format!("{end} has no preceding hour")))?;
        Ok(Self { start, end })
    }
}

/// Truncates to the 5-minute boundary at or before `t`, dropping seconds and
/// sub-second precision. Truncation runs on the full timestamp so hour and
/// day boundaries roll over correctly.
pub fn floor_to_5min(t: DateTime<Utc>) -> Result<DateTime<Utc>> {
    t.duration_trunc(Duration::minutes(WINDOW_ALIGNMENT_MINUTES))
        .map_err(|e| ProcessorError::Window(format!("cannot align {t}: {e}")))
}
