mod aggregator;
mod byte_format;
mod cloud_watch_metrics_client;
mod config;
mod error;
mod metric;
mod notifier;
mod report;
mod response;
mod table;
mod time_range;

use chrono::{DateTime, Utc};
use lambda_runtime::{handler_fn, Context};
use log::{error, info};
use rusoto_core::Region;
use serde_json::Value;

use crate::cloud_watch_metrics_client::{CloudWatchMetricsClient, FetchSamples};
use crate::config::Config;
use crate::notifier::Dispatcher;
use crate::report::build_report;
use crate::response::HttpResponse;
use crate::time_range::TimeRange;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    env_logger::init();
    lambda_runtime::run(handler_fn(report_handler)).await?;
    Ok(())
}

async fn report_handler(
    _: Value,
    _: Context,
) -> Result<Value, Box<dyn std::error::Error + Send + Sync + 'static>> {
    let response = match Config::from_env() {
        Ok(config) => {
            let client =
                CloudWatchMetricsClient::new(Region::default(), config.instance_id.clone());
            let dispatcher = Dispatcher::from_config(&config);
            info!(
                "Reporting {} to {:?}",
                config.instance_id,
                dispatcher.channel_names()
            );
            respond(&client, &dispatcher, &config, Utc::now()).await
        }
        Err(error) => {
            error!("Invalid configuration: {:#}", error);
            HttpResponse::failure(500, &format!("{:#}", error))
        }
    };
    Ok(serde_json::to_value(response)?)
}

/// Builds the report for the configured window, pushes it to every channel and
/// returns the Markdown table. A failed report is pushed as a failure notice.
async fn respond<F>(
    fetcher: &F,
    dispatcher: &Dispatcher,
    config: &Config,
    now: DateTime<Utc>,
) -> HttpResponse
where
    F: FetchSamples + Sync,
{
    let result = match TimeRange::for_window(config.window, now) {
        Ok(time_range) => build_report(fetcher, &time_range, &config.title).await,
        Err(error) => Err(error),
    };

    match result {
        Ok(report) => {
            let summary = dispatcher.dispatch(&report.title, &report.plain).await;
            info!(
                "{} delivered to {:?}, failed for {:?}",
                report.title, summary.delivered, summary.failed
            );
            HttpResponse::markdown(report.markdown)
        }
        Err(error) => {
            error!("Failed to build report: {}", error);
            dispatcher
                .dispatch(&format!("{} failed", config.title), &error.to_string())
                .await;
            HttpResponse::failure(error.status_code(), &error.to_string())
        }
    }
}
