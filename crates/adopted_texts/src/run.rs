use anyhow::{anyhow, Context};
use engine_logging::{engine_error, engine_info, engine_warn};
use harvester_engine::{
    export_records, ExportOptions, Harvester, HubPublisher, Publisher, ReqwestFetcher,
};

use crate::cli::Cli;
use crate::progress::BarProgressSink;

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let fetcher = ReqwestFetcher::new(cli.fetch_settings())
        .map_err(|err| anyhow!("could not build HTTP client: {err}"))?;
    let harvester = Harvester::new(&fetcher, cli.harvest_settings());

    let sink = BarProgressSink::new();
    let report = harvester.harvest(&sink).await;
    sink.finish();

    if report.records.is_empty() {
        println!("No data scraped");
        return Ok(());
    }
    println!(
        "Scraped {} adopted texts ({} without content, {} failed)",
        report.records.len(),
        report.skipped,
        report.failed
    );

    let mut failures = Vec::new();

    if let Some(dir) = cli.output_dir.as_deref() {
        match export_records(dir, &report.records, &ExportOptions::default()) {
            Ok(summary) => engine_info!(
                "Exported {} records to {:?} (sha256 {})",
                summary.record_count,
                summary.output_path,
                summary.sha256
            ),
            Err(err) => {
                engine_error!("Export to {:?} failed: {}", dir, err);
                failures.push(format!("export: {err}"));
            }
        }
    }

    match cli.token() {
        None => engine_warn!("HF_TOKEN not provided"),
        Some(token) => {
            let destination = cli.destination_id();
            let publisher = HubPublisher::new(cli.hub_settings())
                .context("could not build Hub client")?;
            match publisher.publish(&report.records, &destination, token).await {
                Ok(published) => println!(
                    "Published {} records to {}",
                    published.record_count, published.destination_id
                ),
                Err(err) => {
                    engine_error!("Publishing to {} failed: {}", destination, err);
                    failures.push(format!("publish: {err}"));
                }
            }
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(anyhow!(failures.join("; ")))
    }
}
