//! blobmark - Group bounding boxes into connected blobs
//!
//! A command line tool that reads lists of identified rectangles, pads them
//! and reports which ones form disconnected groups.
//!
//! Input files hold a JSON array of `{"id", "left", "top", "width", "height"}`
//! records; `-` reads from stdin.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use blobmark_core::{BlobEntry, BlobParams, BlobReport, LengthUnit, Rect, cluster_with_params};
use clap::{ArgAction, Parser, ValueEnum};
use serde::Deserialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Output type for the partition.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputType {
    /// Blob records `{ids, rect}` as JSON (default)
    #[default]
    Json,
    /// Human readable report listing isolated blobs
    Text,
}

/// Group bounding boxes into blobs of transitively overlapping rectangles.
#[derive(Parser, Debug)]
#[command(name = "blobmark")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// One or more JSON box lists, or "-" for stdin
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,

    /// Padding added around every box before checking overlap
    #[arg(short = 'p', long, default_value = "10")]
    padding: f64,

    /// Unit of the padding (px, mm, cm, in, pt, pc)
    #[arg(short = 'u', long, default_value = "mm")]
    unit: LengthUnit,

    /// Pixels per document user unit
    #[arg(long = "viewport-scale", default_value = "1.0")]
    viewport_scale: f64,

    /// Type of output to generate
    #[arg(short = 't', long = "output-type", value_enum, default_value = "json")]
    output_type: OutputType,

    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,
}

/// One input rectangle as it appears on disk.
#[derive(Debug, Deserialize)]
struct BoxRecord {
    id: String,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut data = String::new();
        io::stdin()
            .read_to_string(&mut data)
            .context("failed to read stdin")?;
        return Ok(data);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Parse a box list, validating each rectangle.
fn parse_boxes(data: &str) -> Result<Vec<(String, Rect)>> {
    let records: Vec<BoxRecord> = serde_json::from_str(data).context("invalid box list")?;
    records
        .into_iter()
        .map(|r| {
            let rect = Rect::new(r.left, r.top, r.width, r.height)
                .with_context(|| format!("box {:?}", r.id))?;
            Ok((r.id, rect))
        })
        .collect()
}

/// Cluster a single input file.
fn process_file(path: &Path, params: &BlobParams) -> Result<BlobReport> {
    let data = read_input(path)?;
    let boxes = parse_boxes(&data).with_context(|| format!("in {}", path.display()))?;
    debug!(file = %path.display(), boxes = boxes.len(), "loaded boxes");

    let blobs = cluster_with_params(boxes, params)
        .with_context(|| format!("clustering {} failed", path.display()))?;
    let report = BlobReport::new(blobs);
    info!(file = %path.display(), "{}", report.summary());
    Ok(report)
}

fn write_json<W: Write>(writer: &mut W, reports: &[(PathBuf, BlobReport)]) -> Result<()> {
    if let [(_, report)] = reports {
        serde_json::to_writer_pretty(&mut *writer, report.blobs())?;
    } else {
        let by_file: BTreeMap<String, &[BlobEntry]> = reports
            .iter()
            .map(|(path, report)| (path.display().to_string(), report.blobs()))
            .collect();
        serde_json::to_writer_pretty(&mut *writer, &by_file)?;
    }
    writeln!(writer)?;
    Ok(())
}

fn write_text<W: Write>(writer: &mut W, reports: &[(PathBuf, BlobReport)]) -> Result<()> {
    let many = reports.len() > 1;
    for (path, report) in reports {
        if many {
            writeln!(writer, "== {}", path.display())?;
        }
        write!(writer, "{report}")?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let params = BlobParams::new(args.padding, args.unit).with_viewport_scale(args.viewport_scale);
    params.validate().context("invalid padding options")?;

    let reports = args
        .files
        .iter()
        .map(|path| Ok((path.clone(), process_file(path, &params)?)))
        .collect::<Result<Vec<_>>>()?;

    // Open output only once every input clustered, so failures leave no file behind
    let mut output: Box<dyn Write> = if args.outfile == "-" {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        let file = File::create(&args.outfile)
            .with_context(|| format!("failed to create output file {}", args.outfile))?;
        Box::new(BufWriter::new(file))
    };

    match args.output_type {
        OutputType::Json => write_json(&mut output, &reports)?,
        OutputType::Text => write_text(&mut output, &reports)?,
    }

    output.flush()?;
    Ok(())
}
