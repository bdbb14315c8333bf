// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

use std::{process::ExitCode, sync::Arc, time::Duration};
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use connect_metrics::{
    aws::{load_sdk_config, ConnectClient, KinesisSink},
    MetricsProcessor, ProcessorConfig,
};

#[tokio::main]
pub async fn main() -> ExitCode {
    let config = match ProcessorConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            // logging is not set up yet without a valid level
            eprintln!("Error reading connect metrics processor configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let env_filter = format!(
        "h2=off,hyper=off,rustls=off,aws_smithy_runtime=warn,aws_config=warn,{}",
        config.log_level
    );

    #[allow(clippy::expect_used)]
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_new(env_filter).expect("could not parse log level in configuration"),
        )
        .with_level(true)
        .with_thread_names(false)
        .with_thread_ids(false)
        .with_line_number(false)
        .with_file(false)
        .with_target(true)
        .without_time()
        .finish();

    #[allow(clippy::expect_used)]
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    debug!("Logging subsystem enabled");

    let sdk_config = load_sdk_config().await;
    let processor = MetricsProcessor::new(
        Arc::new(ConnectClient::new(&sdk_config)),
        Arc::new(KinesisSink::new(&sdk_config)),
        config.instance_id.clone(),
        config.stream_name.clone(),
    );

    match config.poll_interval {
        None => run_once(&processor).await,
        Some(period) => {
            run_on_interval(&processor, period).await;
            ExitCode::SUCCESS
        }
    }
}

async fn run_once(processor: &MetricsProcessor) -> ExitCode {
    match processor.run().await {
        Ok(report) => {
            debug!(
                "Run for window {} - {} finished",
                report.window.start, report.window.end
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Metrics run failed, nothing was published: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run_on_interval(processor: &MetricsProcessor, period: Duration) {
    let cancel_token = CancellationToken::new();
    let signal_token = cancel_token.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {e}");
        }
        signal_token.cancel();
    });

    info!("Collecting metrics every {}s", period.as_secs());
    let mut poll_interval = interval(period);
    poll_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = poll_interval.tick() => {
                // a failed run only skips this window
                if let Err(e) = processor.run().await {
                    error!("Metrics run failed, nothing was published: {e}");
                }
            }
            _ = cancel_token.cancelled() => {
                info!("Shutting down connect metrics processor");
                break;
            }
        }
    }
}
