use crate::aggregator::aggregate;
use crate::cloud_watch_metrics_client::FetchSamples;
use crate::error::ReportError;
use crate::table::{render_markdown, render_plain};
use crate::time_range::TimeRange;
use log::info;

#[derive(Debug, PartialEq)]
pub struct Report {
    pub title: String,
    pub plain: String,
    pub markdown: String,
}

pub async fn build_report<F>(
    fetcher: &F,
    time_range: &TimeRange,
    title: &str,
) -> Result<Report, ReportError>
where
    F: FetchSamples + Sync,
{
    let samples = fetcher.fetch_samples(time_range).await?;
    let rows = aggregate(&samples);
    info!(
        "Aggregated {} samples into {} daily rows for {}",
        samples.len(),
        rows.len() - 1,
        time_range.label()
    );
    Ok(Report {
        title: format!("{} ({})", title, time_range.label()),
        plain: render_plain(&rows),
        markdown: render_markdown(&rows),
    })
}
