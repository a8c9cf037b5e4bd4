use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

use locker_sift::constants::{DEFAULT_CONFIG_FILE, DEFAULT_JSON_FILE_NAME};
use locker_sift::notify::{summary_message, Notification, NotificationSink, OutboxSink};
use locker_sift::report::{render_report, select, ExportDocument, RecordFilter};
use locker_sift::utils::{self, format_thousands, system::format_duration};
use locker_sift::{Config, SortProcessor};

#[derive(Parser)]
#[command(name = "locker-sift")]
#[command(about = "Locker Sift - sorts and deduplicates game account logs by V-Bucks")]
#[command(version)]
struct Args {
    #[arg(help = "Directory of text files, or a .zip archive of them")]
    input: PathBuf,

    #[arg(short, long, help = "Output directory for the report")]
    output: Option<PathBuf>,

    #[arg(short, long, help = "Configuration file (defaults apply when config.json is absent)")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "Verbose output")]
    verbose: bool,

    #[arg(long, help = "Also write a JSON export next to the report")]
    json: bool,

    #[arg(
        long,
        value_enum,
        default_value_t = RecordFilter::All,
        help = "Only report matching accounts"
    )]
    filter: RecordFilter,

    #[arg(long, default_value_t = 0, help = "Only report accounts with at least this many V-Bucks")]
    min_vbucks: u64,

    #[arg(long, help = "Drop the summary and report into the notification outbox")]
    notify: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let start_time = Instant::now();

    let config = match &args.config {
        Some(path) => Config::load(path)
            .await
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::load_or_default(DEFAULT_CONFIG_FILE).await?,
    };

    let verbosity = if args.verbose { "verbose" } else { config.logging.verbosity.as_str() };
    utils::setup_logging(verbosity)?;

    if !args.input.exists() {
        anyhow::bail!("Input does not exist: {}", args.input.display());
    }

    let output_dir = args.output.clone().unwrap_or_else(|| config.output_directory());
    tokio::fs::create_dir_all(&output_dir)
        .await
        .with_context(|| format!("Cannot create output directory {}", output_dir.display()))?;

    info!("Input: {}", args.input.display());
    info!("Output directory: {}", output_dir.display());

    let processor = SortProcessor::new(config.clone());
    let input = args.input.clone();
    let outcome = tokio::task::spawn_blocking(move || processor.process_input(&input)).await??;

    for skipped in &outcome.skipped {
        warn!("Skipped {}: {}", skipped.path.display(), skipped.reason);
    }

    let stats = outcome.aggregator.snapshot();
    let ordered = outcome.aggregator.export_ordered();
    let selected = select(&ordered, args.filter, args.min_vbucks);
    let generated_at = Local::now().naive_local();

    let report = render_report(&selected, generated_at);
    let report_path = output_dir.join(&config.io.report_file_name);
    tokio::fs::write(&report_path, &report)
        .await
        .with_context(|| format!("Cannot write report {}", report_path.display()))?;

    if args.json {
        let json_path = output_dir.join(DEFAULT_JSON_FILE_NAME);
        let document = ExportDocument::new(selected.clone(), stats, generated_at);
        tokio::fs::write(&json_path, document.to_json()?)
            .await
            .with_context(|| format!("Cannot write JSON export {}", json_path.display()))?;
        info!("JSON export written to {}", json_path.display());
    }

    if args.notify || config.notify.enabled {
        let sink = OutboxSink::new(config.outbox_directory());
        let notification = Notification {
            summary: summary_message(&stats),
            attachment_name: config.notify.attachment_name.clone(),
            attachment: report,
        };
        let status = tokio::task::spawn_blocking(move || sink.deliver(&notification)).await?;
        if status.ok {
            info!("Notification delivered to {}", config.outbox_directory().display());
        } else {
            warn!("Notification not delivered: {}", status.description.unwrap_or_default());
        }
    }

    let elapsed = start_time.elapsed();

    println!("\nSorting completed");
    println!("=======================================");
    println!(
        "Files processed: {} ({} skipped)",
        outcome.stats.files_processed, outcome.stats.files_skipped
    );
    println!("Lines read: {}", format_thousands(outcome.stats.lines_read as u64));
    println!("Accounts: {}", format_thousands(stats.total_records as u64));
    println!("Duplicates discarded: {}", format_thousands(outcome.stats.records_discarded as u64));
    println!("Total V-Bucks: {}", format_thousands(stats.total_currency));
    println!("Prime (FA+STW): {}", stats.prime_count);
    println!("Full access: {}", stats.full_access_count);
    println!("Total skins: {}", format_thousands(stats.total_items));
    println!("Reported accounts: {}", selected.len());
    println!("Processing time: {}", format_duration(elapsed));
    println!("Report written to: {}", report_path.display());

    Ok(())
}
