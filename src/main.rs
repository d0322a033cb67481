// Command-line front end for the image converter.
//
// Paths given on the command line play the part of files dropped onto the
// converter; flags replace the format/ratio checkboxes and quality box.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use image_converter_lib::utils::{contains_files, DEFAULT_OUTPUT_ROOT, DEFAULT_QUALITY};
use image_converter_lib::{
    clear_output, convert_images, open_output, AppState, AspectRatio, ConversionSettings,
    ImageFormat, Progress, ProgressType,
};

#[derive(Parser, Debug)]
#[command(name = "image-converter", version, about = "Batch-convert images into PNG/JPEG/WEBP/AVIF with optional aspect-ratio crops")]
struct Cli {
    /// Log debug output (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert images into the output tree
    Convert(ConvertArgs),
    /// Delete the output tree
    Clear(OutputArgs),
    /// Open the output tree in the file browser
    Open(OutputArgs),
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Root of the output tree
    #[arg(short, long, default_value = DEFAULT_OUTPUT_ROOT)]
    output: PathBuf,
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Output format, repeatable (png, jpeg, webp, avif). Defaults to all
    #[arg(short, long = "format", value_name = "FORMAT")]
    formats: Vec<ImageFormat>,

    /// Crop ratio as W-H (e.g. 16-9), repeatable. An uncropped copy goes to base/
    #[arg(short, long = "ratio", value_name = "RATIO")]
    ratios: Vec<AspectRatio>,

    /// Quality handed to every encoder
    #[arg(short, long, default_value_t = DEFAULT_QUALITY, value_parser = clap::value_parser!(u32).range(1..=100))]
    quality: u32,

    #[command(flatten)]
    output: OutputArgs,

    /// Print the batch report as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Open the output tree when the batch wrote something
    #[arg(long)]
    open: bool,

    /// Image files; unsupported extensions are ignored
    #[arg(required = true)]
    paths: Vec<PathBuf>,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)         // Remove file path
        .with_line_number(false)  // Remove line numbers
        .with_thread_ids(false)   // Remove thread IDs
        .with_thread_names(false) // Remove thread names
        .with_target(false)       // Remove module path
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn render_progress(progress: &Progress) {
    let task = progress.task_id.as_deref().unwrap_or_default();
    match progress.progress_type {
        ProgressType::Start => info!("{} ({} files)", progress.status, progress.total_tasks),
        ProgressType::Progress => info!(
            "[{}/{}] {}",
            progress.completed_tasks, progress.total_tasks, task
        ),
        ProgressType::Error => warn!(
            "[{}/{}] {} failed: {}",
            progress.completed_tasks,
            progress.total_tasks,
            task,
            progress.error.as_deref().unwrap_or("unknown error")
        ),
        ProgressType::Complete => info!("{}", progress.status),
    }
}

async fn run_convert(args: ConvertArgs) -> Result<()> {
    let state = AppState::new(&args.output.output);
    let settings = ConversionSettings::new(args.formats, args.ratios, args.quality)?;

    let report = convert_images(&state, args.paths.as_slice(), settings, render_progress).await?;
    if report.total() == 0 {
        warn!("No supported images given (png, jpg, jpeg, webp, avif)");
        return Ok(());
    }

    info!("{} written, {} failed", report.succeeded(), report.failed());
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    if args.open && state.output_available() {
        open_output(&state).await.context("Failed to open output folder")?;
    }
    Ok(())
}

async fn run_open(args: OutputArgs) -> Result<()> {
    let state = AppState::new(&args.output);
    // A fresh process has no batch history; files on disk stand in for it.
    if contains_files(&args.output).await {
        state.set_output_available(true);
    }
    let opened = open_output(&state).await?;
    info!("Opened {}", opened.display());
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Convert(args) => run_convert(args).await,
        Command::Clear(args) => {
            let state = AppState::new(&args.output);
            if !clear_output(&state).await? {
                info!("Nothing to clear");
            }
            Ok(())
        }
        Command::Open(args) => run_open(args).await,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(run(cli))
}
