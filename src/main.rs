use anyhow::{bail, Context, Result};
use clap::Parser;
use cloudprep::dataset::{
    describe_record, extract_rows, find_points_field, label_histogram, read_records,
    record_label, RowStats,
};
use cloudprep::{normalize_rows, NormalizeParams, PointCloud};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::{self, File};
use std::io::{BufWriter, Write as _};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "cloudprep")]
#[command(about = "Inspect a point-cloud dataset and normalize one of its samples")]
#[command(version)]
struct Args {
    /// JSON-lines dataset, one record per line
    dataset: PathBuf,

    /// Index of the record to inspect and normalize
    #[arg(short, long, default_value_t = 0)]
    record: usize,

    /// Number of points after resampling (overrides the config file)
    #[arg(short, long)]
    num_points: Option<usize>,

    /// Seed for resampling; omitted means fresh entropy
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file with normalization parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Name of the integer label field
    #[arg(long, default_value = "label")]
    label_field: String,

    /// Write the normalized points here as a JSON array of [x, y, z]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level when RUST_LOG is unset (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    run(&args)
}

fn load_params(args: &Args) -> Result<NormalizeParams> {
    let mut params = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => NormalizeParams::default(),
    };
    if let Some(n) = args.num_points {
        params = params.with_num_points(n);
    }
    params.validate()?;
    Ok(params)
}

fn run(args: &Args) -> Result<()> {
    let params = load_params(args)?;

    let records = read_records(&args.dataset)
        .with_context(|| format!("loading dataset {}", args.dataset.display()))?;
    let record = records.get(args.record).with_context(|| {
        format!(
            "record {} out of range, dataset has {} records",
            args.record,
            records.len()
        )
    })?;

    println!("== record {} ==", args.record);
    for field in describe_record(record) {
        println!("  {field}");
    }

    let hist = label_histogram(&records, &args.label_field);
    if !hist.is_empty() {
        println!("== labels ({} classes) ==", hist.len());
        for (label, count) in hist {
            println!("  {label}: {count}");
        }
    }

    let Some(field) = find_points_field(record) else {
        bail!("record {} has no point field", args.record);
    };
    let rows = extract_rows(record, field)?;

    println!("== field '{field}' ==");
    if let Some(stats) = RowStats::from_rows(&rows) {
        println!("  points: {}", stats.count);
        println!("  dims: {}", stats.dims);
        println!("  range: [{:.3}, {:.3}]", stats.min, stats.max);
    }
    if let Ok(label) = record_label(record, &args.label_field) {
        println!("  label: {label}");
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let normalized = normalize_rows(&rows, &params, &mut rng)
        .with_context(|| format!("normalizing field '{field}'"))?;

    println!("== normalized ==");
    println!("  points: {}", normalized.len());
    println!(
        "  centroid removed: [{:.4}, {:.4}, {:.4}]",
        normalized.centroid[0], normalized.centroid[1], normalized.centroid[2]
    );
    println!("  scale: {:.4}", normalized.scale);
    if let Some((lo, hi)) = normalized.cloud.aabb().value_range() {
        println!("  range: [{lo:.3}, {hi:.3}]");
    }

    if let Some(path) = &args.output {
        write_points(path, &normalized.cloud)?;
        info!(path = %path.display(), points = normalized.len(), "wrote normalized cloud");
    }

    Ok(())
}

fn write_points(path: &Path, cloud: &PointCloud) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, &cloud.to_points())?;
    writer.flush()?;
    Ok(())
}
