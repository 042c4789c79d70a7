//! The `scan` command: run one scan and print the flagged places.

use clap::ValueEnum;
use poiscan_scan::{CacheDecision, PendingScan, ResultSource, ScanReport, ScanStep};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::Orchestrator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CacheMode {
    /// Prompt on stdin when a fresh cached result exists
    Ask,
    /// Reuse a fresh cached result without asking
    Use,
    /// Always query the Places API
    Fresh,
}

pub(crate) async fn run_scan(
    orch: &mut Orchestrator,
    url: &str,
    mode: CacheMode,
) -> anyhow::Result<()> {
    let report = match orch.scan_url(url).await? {
        ScanStep::Completed(report) => report,
        ScanStep::CacheAvailable(pending) => {
            let decision = match mode {
                CacheMode::Use => CacheDecision::UseCache,
                CacheMode::Fresh => CacheDecision::FetchFresh,
                CacheMode::Ask => ask_cache_decision(&pending).await?,
            };
            orch.resolve(pending, decision).await?
        }
    };

    print_report(&report);
    Ok(())
}

async fn ask_cache_decision(pending: &PendingScan) -> anyhow::Result<CacheDecision> {
    let age = chrono::Utc::now().signed_duration_since(pending.cached.timestamp);
    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(
            format!(
                "Cached results from {} minute(s) ago ({} places). Use them? [Y/n] ",
                age.num_minutes(),
                pending.cached.results.len()
            )
            .as_bytes(),
        )
        .await?;
    stdout.flush().await?;

    let mut answer = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut answer)
        .await?;
    Ok(parse_answer(&answer))
}

/// Anything other than an explicit "no" reuses the cache.
pub(crate) fn parse_answer(answer: &str) -> CacheDecision {
    match answer.trim().to_lowercase().as_str() {
        "n" | "no" => CacheDecision::FetchFresh,
        _ => CacheDecision::UseCache,
    }
}

pub(crate) fn print_report(report: &ScanReport) {
    match &report.source {
        ResultSource::Live => println!(
            "{} flagged place(s) within {} m",
            report.results.len(),
            report.radius_m
        ),
        ResultSource::Cache { timestamp } => println!(
            "{} flagged place(s) within {} m (cached {})",
            report.results.len(),
            report.radius_m,
            timestamp.format("%Y-%m-%d %H:%M UTC")
        ),
    }

    for result in &report.results {
        let missing: Vec<&str> = result.flags.iter().map(|f| f.label()).collect();
        if result.primary_type_display_name.is_empty() {
            println!("- {}", result.name);
        } else {
            println!("- {} [{}]", result.name, result.primary_type_display_name);
        }
        println!("    missing: {}", missing.join(", "));
        println!("    id: {}", result.id);
        if let Some(uri) = &result.uri {
            println!("    {uri}");
        }
        if let Some(primary_type) = &result.primary_type {
            println!("    type: {primary_type}");
        }
    }
}
