use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dressd", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite one request JSON into a PNG.
    Compose(ComposeArgs),
    /// Composite several request JSON files into a directory of PNGs.
    Batch(BatchArgs),
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Input request JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Also write the composite report as JSON.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Override the per-image payload limit (bytes).
    #[arg(long)]
    max_payload_bytes: Option<usize>,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Input request JSON (repeatable).
    #[arg(long = "in", required = true)]
    in_paths: Vec<PathBuf>,

    /// Output directory; each request writes `<stem>.png` and `<stem>.report.json`.
    /// Inputs sharing a file stem get `<stem>-<index>` instead.
    #[arg(long)]
    out_dir: PathBuf,

    /// Composite requests in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Batch(args) => cmd_batch(args),
    }
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let req = dressd::CompositeRequest::from_path(&args.in_path)?;
    let mut opts = dressd::ComposeOpts::from_env();
    if let Some(n) = args.max_payload_bytes {
        opts.max_payload_bytes = n;
    }

    let out = dressd::composite_with_opts(&req, &dressd::LayerOrder::standard(), &opts)?;
    write_png(&args.out, &out.png_bytes()?)?;
    if let Some(path) = &args.report {
        write_report(path, &out.report)?;
    }

    eprintln!(
        "wrote {} ({} drawn, {} skipped)",
        args.out.display(),
        out.report.drawn.len(),
        out.report.skipped.len()
    );
    Ok(())
}

fn cmd_batch(args: BatchArgs) -> anyhow::Result<()> {
    let requests = args
        .in_paths
        .iter()
        .map(|p| dressd::CompositeRequest::from_path(p))
        .collect::<Result<Vec<_>, _>>()?;

    let batch = dressd::BatchOpts {
        parallel: args.parallel,
        threads: args.threads,
    };
    let results = dressd::composite_batch(
        &requests,
        &dressd::LayerOrder::standard(),
        &dressd::ComposeOpts::from_env(),
        &batch,
    )?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let stems = output_stems(&args.in_paths);
    let mut failed = 0usize;
    for ((in_path, stem), result) in args.in_paths.iter().zip(&stems).zip(results) {
        match result {
            Ok(out) => {
                write_png(&args.out_dir.join(format!("{stem}.png")), &out.png_bytes()?)?;
                write_report(
                    &args.out_dir.join(format!("{stem}.report.json")),
                    &out.report,
                )?;
            }
            Err(e) => {
                failed += 1;
                eprintln!("{}: {e}", in_path.display());
            }
        }
    }

    eprintln!(
        "wrote {} of {} composites to {}",
        args.in_paths.len() - failed,
        args.in_paths.len(),
        args.out_dir.display()
    );
    if failed > 0 {
        anyhow::bail!("{failed} request(s) failed");
    }
    Ok(())
}

fn output_stems(paths: &[PathBuf]) -> Vec<String> {
    let stems: Vec<String> = paths
        .iter()
        .map(|p| {
            p.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("request")
                .to_string()
        })
        .collect();
    stems
        .iter()
        .enumerate()
        .map(|(i, stem)| {
            if stems.iter().filter(|s| *s == stem).count() > 1 {
                format!("{stem}-{i}")
            } else {
                stem.clone()
            }
        })
        .collect()
}

fn write_png(path: &Path, png: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, png).with_context(|| format!("write png '{}'", path.display()))
}

fn write_report(path: &Path, report: &dressd::CompositeReport) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report).context("serialize report")?;
    std::fs::write(path, json).with_context(|| format!("write report '{}'", path.display()))
}
