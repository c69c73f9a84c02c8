use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use regcheck_cli::inputs::{apply_threshold_overrides, load_config, load_sources};
use regcheck_cli::logging::redact_value;
use regcheck_ingest::{detect_header, read_customers, read_matrix};
use regcheck_match::MatchEngine;
use regcheck_model::{CellValue, MatchOutput, Tier};
use regcheck_normalize::TextNormalizer;
use regcheck_report::{ReportFormat, write_reports};
use tracing::{debug, info, info_span, trace};

use crate::cli::{ConfigArgs, HeadersArgs, MatchArgs, OutputFormatArg};
use crate::summary::apply_table_style;
use crate::types::{MatchRunResult, SourceSummary};

/// Longest row preview shown by `headers`.
const PREVIEW_CHARS: usize = 80;

pub fn run_match(args: &MatchArgs) -> Result<MatchRunResult> {
    let run_span = info_span!("match", customers = %args.customers.display());
    let _run_guard = run_span.enter();

    let config = load_config(args.config.as_deref())?;
    let config = apply_threshold_overrides(config, args.alta, args.baja)?;
    let engine = MatchEngine::new(config)?.with_explain(args.explain);

    let load_start = Instant::now();
    let customers = read_customers(&args.customers)
        .with_context(|| format!("load customers {}", args.customers.display()))?;
    let sources = load_sources(&args.registry)?;
    info!(
        customers = customers.len(),
        sources = sources.len(),
        duration_ms = load_start.elapsed().as_millis(),
        "inputs loaded"
    );

    let output = engine.run(&customers, &sources)?;
    trace_matches(&output);

    let output_dir = args.output_dir.clone().unwrap_or_else(|| {
        args.customers
            .parent()
            .map_or_else(|| PathBuf::from("output"), |dir| dir.join("output"))
    });
    let reports = if args.dry_run {
        debug!("dry run: no reports written");
        None
    } else {
        let paths = write_reports(&output_dir, &output, report_format(args.format))
            .with_context(|| format!("write reports to {}", output_dir.display()))?;
        Some(paths)
    };

    Ok(MatchRunResult {
        sources: sources
            .iter()
            .map(|matrix| SourceSummary {
                name: matrix.name.clone(),
                rows: matrix.rows.len(),
            })
            .collect(),
        output,
        output_dir,
        reports,
    })
}

fn trace_matches(output: &MatchOutput) {
    for record in output.matches.iter().filter(|record| record.tier != Tier::Sin) {
        trace!(
            customer = redact_value(&record.name),
            candidate = redact_value(record.min_name.as_deref().unwrap_or_default()),
            source = %record.source,
            score = record.score,
            tier = %record.tier,
            "match"
        );
    }
}

fn report_format(format: OutputFormatArg) -> ReportFormat {
    match format {
        OutputFormatArg::Json => ReportFormat::Json,
        OutputFormatArg::Csv => ReportFormat::Csv,
        OutputFormatArg::Both => ReportFormat::Both,
    }
}

pub fn run_headers(args: &HeadersArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    config.validate()?;
    let normalizer = TextNormalizer::new(&config.text)?;
    let rows = read_matrix(&args.file)
        .with_context(|| format!("load registry {}", args.file.display()))?;
    let detection = detect_header(&rows, &config.header, &normalizer);

    let mut table = Table::new();
    table.set_header(vec!["Row", "Hits", "Header", "Preview"]);
    apply_table_style(&mut table);
    for (idx, hits) in detection.row_hits.iter().enumerate() {
        let chosen = if detection.row == Some(idx) { "✓" } else { "" };
        table.add_row(vec![
            Cell::new(idx + 1),
            Cell::new(hits),
            Cell::new(chosen),
            Cell::new(row_preview(&rows[idx])),
        ]);
    }
    println!("File: {}", args.file.display());
    println!("{table}");
    match detection.row {
        Some(row) => println!(
            "Header row: {} ({} keyword hits); {} data rows follow",
            row + 1,
            detection.hits,
            data_rows(&rows, row)
        ),
        None => println!(
            "No header row found in the first {} rows; this source yields no candidates",
            detection.row_hits.len()
        ),
    }
    Ok(())
}

fn data_rows(rows: &[Vec<CellValue>], header: usize) -> usize {
    rows.iter()
        .skip(header + 1)
        .filter(|row| !row.iter().all(CellValue::is_blank))
        .count()
}

fn row_preview(row: &[CellValue]) -> String {
    let text = row
        .iter()
        .filter_map(CellValue::as_text)
        .collect::<Vec<_>>()
        .join(" | ");
    if text.chars().count() > PREVIEW_CHARS {
        let cut: String = text.chars().take(PREVIEW_CHARS - 1).collect();
        format!("{cut}…")
    } else {
        text
    }
}

pub fn run_config(args: &ConfigArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    config.validate()?;
    let json = serde_json::to_string_pretty(&config).context("serialize configuration")?;
    println!("{json}");
    Ok(())
}
