// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;

use tracing::debug;

use crate::api::ConnectApi;
use crate::error::Result;
use crate::model::{Queue, QueueSummary, QueueType};

/// The standard queues of an instance, with an id to name index for enrichment.
#[derive(Debug, Clone, Default)]
pub struct QueueDirectory {
    queues: Vec<Queue>,
    names: HashMap<String, String>,
}

impl QueueDirectory {
    /// Keeps only `STANDARD` queues, preserving listing order.
    pub fn from_summaries(summaries: Vec<QueueSummary>) -> Self {
        let queues: Vec<Queue> = summaries
            .into_iter()
            .filter(|summary| summary.queue_type == QueueType::Standard)
            .map(|summary| Queue {
                id: summary.id,
                name: summary.name,
                arn: summary.arn,
            })
            .collect();
        let names = queues
            .iter()
            .map(|queue| (queue.id.clone(), queue.name.clone()))
            .collect();
        Self { queues, names }
    }

    pub fn queues(&self) -> &[Queue] {
        &self.queues
    }

    pub fn queue_ids(&self) -> Vec<String> {
        self.queues.iter().map(|queue| queue.id.clone()).collect()
    }

    pub fn name_of(&self, queue_id: &str) -> Option<&str> {
        self.names.get(queue_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.queues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queues.is_empty()
    }
}

/// Fetches the instance's queue listing. Any API failure aborts the run.
pub async fn resolve_queues(api: &dyn ConnectApi, instance_id: &str) -> Result<QueueDirectory> {
    let summaries = api.list_queues(instance_id).await?;
    let listed = summaries.len();
    let directory = QueueDirectory::from_summaries(summaries);
    debug!(
        "Resolved {} standard queues out of {} listed",
        directory.len(),
        listed
    );
    Ok(directory)
}
