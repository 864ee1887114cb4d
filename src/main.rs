use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use sizing_report::{ParsedReport, SizingContext, SizingReportParser};

#[derive(Parser)]
#[command(name = "sizing_report", about = "Parse elastic-sizing-format capacity reports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one report and print its sizing context as JSON
    Parse {
        /// Markdown sizing report
        file: PathBuf,
        /// Print the raw extraction instead of the sizing context
        #[arg(long)]
        raw: bool,
        /// Single-line JSON
        #[arg(long)]
        compact: bool,
        /// List cells that only parsed through the zero default (stderr)
        #[arg(long)]
        diagnostics: bool,
    },
    /// Parse many reports in parallel
    Batch {
        /// Markdown sizing reports
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Write `<stem>.sizing.json` per report here instead of printing a summary
        #[arg(short, long, env = "SIZING_OUTPUT_DIR")]
        output_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse {
            file,
            raw,
            compact,
            diagnostics,
        } => {
            let parser = SizingReportParser::from_file(&file)?;
            let parsed = parser.parse();
            if diagnostics {
                print_diagnostics(&parsed);
            }
            let json = if raw {
                to_json(&parsed, compact)?
            } else {
                to_json(&SizingContext::from(parsed), compact)?
            };
            println!("{json}");
            Ok(())
        }
        Commands::Batch { files, output_dir } => {
            if let Some(dir) = &output_dir {
                fs::create_dir_all(dir)
                    .with_context(|| format!("creating output directory {}", dir.display()))?;
            }
            run_batch(&files, output_dir.as_deref())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn to_json<T: serde::Serialize>(value: &T, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(json)
}

fn print_diagnostics(parsed: &ParsedReport) {
    let failures = &parsed.diagnostics.numeric_failures;
    if failures.is_empty() {
        eprintln!("No numeric parse failures.");
        return;
    }
    eprintln!("{} cell(s) defaulted to 0:", failures.len());
    for f in failures {
        eprintln!("  {} | {} | {:?}", f.location, f.field, f.raw);
    }
}

fn run_batch(files: &[PathBuf], output_dir: Option<&Path>) -> Result<()> {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    let results: Vec<_> = files
        .par_iter()
        .map(|path| {
            let ctx = sizing_report::parse_sizing_file(path);
            pb.inc(1);
            (path, ctx)
        })
        .collect();
    pb.finish_and_clear();

    let mut failed = 0;
    for (path, ctx) in results {
        let ctx = match ctx {
            Ok(ctx) => ctx,
            Err(e) => {
                warn!("{e}");
                failed += 1;
                continue;
            }
        };
        match output_dir {
            Some(dir) => {
                let out = dir.join(output_name(path));
                fs::write(&out, to_json(&ctx, false)?)
                    .with_context(|| format!("writing {}", out.display()))?;
                info!(report = %path.display(), output = %out.display(), "wrote sizing context");
            }
            None => println!("{}", summary_line(path, &ctx)),
        }
    }

    println!("Parsed {} reports ({} failed).", files.len() - failed, failed);
    if failed > 0 {
        anyhow::bail!("{failed} report(s) could not be read");
    }
    Ok(())
}

fn output_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report".to_string());
    format!("{stem}.sizing.json")
}

fn summary_line(path: &Path, ctx: &SizingContext) -> String {
    let platform = ctx
        .platform_detected
        .map(|p| p.to_string())
        .unwrap_or_else(|| "-".into());
    let tiers = ctx.tiers.keys().cloned().collect::<Vec<_>>().join(",");
    let pools = ctx.aks.as_ref().map(|a| a.node_pools.len()).unwrap_or(0)
        + ctx
            .openshift
            .as_ref()
            .map(|o| o.worker_pools.len())
            .unwrap_or(0);
    let health = ctx
        .health_score
        .map(|h| h.to_string())
        .unwrap_or_else(|| "-".into());
    format!(
        "{} | platform={} | tiers={} | pools={} | health={}",
        path.display(),
        platform,
        if tiers.is_empty() { "-" } else { tiers.as_str() },
        pools,
        health
    )
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
