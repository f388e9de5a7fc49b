use anyhow::{bail, Context, Result};
use glob::glob;
use std::path::PathBuf;
use stmtmerge::{
    merge, process,
    report::{FileOutcome, RunReport},
    schema, sheet,
};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_OUTPUT: &str = "merged_transactions.csv";

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    std::panic::set_hook(Box::new(|info| {
        eprintln!("panic: {:?}", info);
    }));

    // ─── 2) parse args ───────────────────────────────────────────────
    let (patterns, output) = parse_args(std::env::args().skip(1).collect())?;

    // ─── 3) expand globs, keeping input-list order ───────────────────
    let inputs = expand_inputs(&patterns)?;
    if inputs.is_empty() {
        bail!("no input files matched {:?}", patterns);
    }
    info!("{} input files to clean + merge", inputs.len());

    // ─── 4) per-file pipeline; a bad file is skipped, never fatal ────
    let mut per_file = Vec::with_capacity(inputs.len());
    let mut outcomes = Vec::with_capacity(inputs.len());
    for path in &inputs {
        match sheet::load_sheet(path).and_then(|s| process::clean_sheet(&s)) {
            Ok(records) => {
                info!(file = %path.display(), rows = records.len(), "file processed");
                outcomes.push(FileOutcome::Processed {
                    file: path.display().to_string(),
                    rows: records.len(),
                });
                per_file.push(records);
            }
            Err(err) => {
                error!(file = %path.display(), "skipping file: {:#}", err);
                outcomes.push(FileOutcome::Failed {
                    file: path.display().to_string(),
                    error: format!("{:#}", err),
                });
            }
        }
    }

    // ─── 5) merge + summarize ────────────────────────────────────────
    let merged = merge::merge_records(per_file);
    let report_path = output.with_extension("report.json");
    if merged.is_empty() {
        warn!("no data was loaded from any input; nothing to write");
        RunReport {
            files: outcomes,
            summary: None,
        }
        .write(&report_path)?;
        return Ok(());
    }

    let summary = merge::summarize(&merged);
    info!(
        total = summary.total_transactions,
        merchants = summary.distinct_merchants,
        "data overview"
    );
    info!("total amount charged: {:.2}", summary.total_amount);
    info!(
        "date range: {} to {}",
        summary.first_transaction, summary.last_transaction
    );

    // ─── 6) persist output + run report ──────────────────────────────
    schema::write_dataset(&output, &merged)?;
    info!("merged data saved to {}", output.display());
    RunReport {
        files: outcomes,
        summary: Some(summary),
    }
    .write(&report_path)?;

    Ok(())
}

fn parse_args(args: Vec<String>) -> Result<(Vec<String>, PathBuf)> {
    let mut patterns = Vec::new();
    let mut output = PathBuf::from(DEFAULT_OUTPUT);
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if arg == "-o" || arg == "--output" {
            output = PathBuf::from(iter.next().context("-o requires a path")?);
        } else {
            patterns.push(arg);
        }
    }
    if patterns.is_empty() {
        bail!(
            "usage: stmtmerge <statement.xlsx|statement.csv|glob>... [-o {}]",
            DEFAULT_OUTPUT
        );
    }
    Ok((patterns, output))
}

/// Expand each argument in input-list order: literal paths pass through,
/// anything else is tried as a glob pattern.
fn expand_inputs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();
    for pattern in patterns {
        let path = PathBuf::from(pattern);
        if path.exists() {
            inputs.push(path);
            continue;
        }
        let mut matched = 0usize;
        for entry in
            glob(pattern).with_context(|| format!("invalid glob pattern {}", pattern))?
        {
            match entry {
                Ok(p) => {
                    inputs.push(p);
                    matched += 1;
                }
                Err(e) => warn!("cannot read glob entry: {:?}", e),
            }
        }
        if matched == 0 {
            warn!(pattern = %pattern, "pattern matched no files");
        }
    }
    Ok(inputs)
}
