//! Subcommand handlers
//!
//! Generated PDFs go to the output directory; anything meant for a pipe
//! (JSON views, saved paths) is written to `out`, never to the log.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use rating_engine::{
    certifiable_entries, reconcile, search, ComplianceSummary, PortfolioStats, ReconciledRow,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::Society;
use society_pdf::{
    execute, render_certificate, render_report, Branding, GeneratedDocument, RenderCommand,
    RenderMetrics, RenderOptions, WatermarkImage,
};

use crate::cli::{Cli, Command, OutputArgs};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ComplianceView<'a> {
    society: &'a str,
    summary: ComplianceSummary,
    entries: Vec<ReconciledRow>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsView<'a> {
    query: Option<&'a str>,
    stats: PortfolioStats,
    matches: Vec<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchLine {
    job: usize,
    path: PathBuf,
    metrics: RenderMetrics,
}

/// Run the parsed command line
pub fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let options = render_options(&cli)?;

    match cli.command {
        Command::Report { society, output } => {
            let society: Society = read_json(&society)?;
            let watermark = load_watermark(&output)?;
            let document = render_report(&society, watermark.as_ref(), &options)?;
            save(&document, &output, out)?;
        }
        Command::Certificate {
            society,
            name,
            all_mandatory,
            output,
        } => {
            let society: Society = read_json(&society)?;
            let watermark = load_watermark(&output)?;
            let names: Vec<String> = match name {
                Some(name) if !all_mandatory => vec![name],
                _ => certifiable_entries()
                    .map(|spec| spec.name.to_string())
                    .collect(),
            };
            for name in &names {
                let document = render_certificate(&society, name, watermark.as_ref(), &options)?;
                save(&document, &output, out)?;
            }
        }
        Command::Compliance { society } => {
            let society: Society = read_json(&society)?;
            let entries = reconcile(&society);
            let view = ComplianceView {
                society: &society.name,
                summary: ComplianceSummary::from_reconciled(&entries),
                entries: entries.iter().map(ReconciledRow::from).collect(),
            };
            print_json(out, &view)?;
        }
        Command::Stats { societies, query } => {
            let societies: Vec<Society> = read_json(&societies)?;
            let matched: Vec<Society> = search(&societies, query.as_deref().unwrap_or(""))
                .into_iter()
                .cloned()
                .collect();
            let view = StatsView {
                query: query.as_deref(),
                stats: PortfolioStats::from_societies(&matched),
                matches: matched.iter().map(|s| s.name.as_str()).collect(),
            };
            print_json(out, &view)?;
        }
        Command::Batch { jobs, output } => {
            let commands: Vec<RenderCommand> = read_json(&jobs)?;
            let watermark = load_watermark(&output)?;
            run_batch(&commands, watermark.as_ref(), &options, &output, out)?;
        }
    }
    Ok(())
}

fn run_batch(
    commands: &[RenderCommand],
    watermark: Option<&WatermarkImage>,
    options: &RenderOptions,
    output: &OutputArgs,
    out: &mut impl Write,
) -> Result<()> {
    let mut failed = 0;
    for (job, command) in commands.iter().enumerate() {
        match execute(command, watermark, options) {
            Ok(outcome) => {
                let path = outcome.document.save_in(&output.out_dir)?;
                let line = BatchLine {
                    job,
                    path,
                    metrics: outcome.metrics,
                };
                writeln!(out, "{}", serde_json::to_string(&line)?)?;
            }
            Err(err) => {
                failed += 1;
                tracing::error!(job, society = %command.society().name, "Render failed: {err}");
            }
        }
    }
    tracing::info!(total = commands.len(), failed, "Batch finished");
    if failed > 0 {
        bail!("{failed} of {} jobs failed", commands.len());
    }
    Ok(())
}

fn render_options(cli: &Cli) -> Result<RenderOptions> {
    let mut options = RenderOptions::default();
    if let Some(date) = cli.date {
        options.generated_on = date;
    }
    if let Some(path) = &cli.branding {
        let branding: Branding = read_json(path)?;
        options.branding = branding;
    }
    Ok(options)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

fn load_watermark(output: &OutputArgs) -> Result<Option<WatermarkImage>> {
    let Some(path) = &output.watermark else {
        return Ok(None);
    };
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read watermark {}", path.display()))?;
    let image = if bytes.starts_with(b"data:") {
        let url = String::from_utf8_lossy(&bytes);
        WatermarkImage::from_data_url(&url)
    } else {
        WatermarkImage::from_png(&bytes)
    }
    .with_context(|| format!("Invalid watermark {}", path.display()))?;
    Ok(Some(image))
}

fn save(document: &GeneratedDocument, output: &OutputArgs, out: &mut impl Write) -> Result<()> {
    let path = document
        .save_in(&output.out_dir)
        .with_context(|| format!("Failed to write {}", document.file_name))?;
    writeln!(out, "{}", path.display())?;
    Ok(())
}

fn print_json<T: Serialize>(out: &mut impl Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
