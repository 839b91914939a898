mod events;

use clap::Parser;
use events::{EventPattern, generate_events, sample_pattern};
use heatmap_core::{DriveMode, HeatEvent, HeatMapConfig, HeatMapEngine};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum ModeArg {
    Streaming,
    Replay,
}

impl From<ModeArg> for DriveMode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Streaming => DriveMode::Streaming,
            ModeArg::Replay => DriveMode::Replay,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Output directory
    #[arg(long)]
    out: PathBuf,

    /// Engine configuration (JSON). Defaults to the built-in preset.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the drive mode from the config file
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Events to feed (JSON array of {x, y, heat}). Generated when absent.
    #[arg(long)]
    events: Option<PathBuf>,

    /// Pattern for generated events (sampled from the seed when absent)
    #[arg(long, value_enum)]
    pattern: Option<EventPattern>,

    /// Number of generated events
    #[arg(long, default_value_t = 100)]
    event_count: usize,

    /// Ticks to simulate
    #[arg(long, default_value_t = 200)]
    ticks: usize,

    /// Streaming mode: push one event every N ticks
    #[arg(long, default_value_t = 1)]
    push_every: usize,

    /// Write every N-th committed frame
    #[arg(long, default_value_t = 1)]
    record_every: usize,

    /// Base RNG seed (reproducibility)
    #[arg(long, default_value_t = 123)]
    seed: u64,
}

#[derive(Serialize)]
struct MetaRow<'a> {
    frame_idx: u64,
    tick: u64,

    mode: &'static str,
    seed: u64,
    pattern: Option<&'a str>,

    width: usize,
    height: usize,

    event: Option<HeatEvent>,
    resized: bool,
    heat_moved: i64,

    total_heat: i64,
    max_heat: u32,
    pending_events: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    if args.push_every == 0 {
        return Err("push_every must be >= 1".into());
    }
    if args.record_every == 0 {
        return Err("record_every must be >= 1".into());
    }

    let mut cfg = match &args.config {
        Some(path) => load_config(path)?,
        None => HeatMapConfig::default(),
    };
    if let Some(mode) = args.mode {
        cfg.mode = mode.into();
    }

    // Event stream: from file, or generated deterministically from the seed
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let (events, pattern) = match &args.events {
        Some(path) => (load_events(path)?, None),
        None => {
            let pattern = args.pattern.unwrap_or_else(|| sample_pattern(&mut rng));
            (generate_events(&mut rng, &cfg, pattern, args.event_count), Some(pattern))
        }
    };
    let pattern_name = pattern.map(|p| p.as_str());
    info!(
        events = events.len(),
        pattern = pattern_name.unwrap_or("file"),
        mode = cfg.mode.as_str(),
        "event stream ready"
    );

    let engine_seed = args.seed ^ 0x9E3779B97F4A7C15;
    let mut pushed = events.into_iter();
    let mut engine = match cfg.mode {
        DriveMode::Replay => HeatMapEngine::with_seed(cfg, pushed.by_ref(), engine_seed),
        DriveMode::Streaming => HeatMapEngine::with_seed(cfg, [], engine_seed),
    }
    .map_err(|e| format!("HeatMapEngine::with_seed: {e}"))?;

    fs::create_dir_all(&args.out)?;
    let mut frame_writer = BufWriter::new(File::create(args.out.join("frames.bin"))?);
    let mut meta_file = BufWriter::new(
        OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(args.out.join("meta.jsonl"))?,
    );

    let mut frame_idx: u64 = 0;
    let mut applied = 0usize;

    for step in 0..args.ticks {
        // Streaming producer: one push per interval, ahead of the tick that may consume it
        if engine.mode() == DriveMode::Streaming && step % args.push_every == 0 {
            if let Some(event) = pushed.next() {
                engine.push_event(event);
            }
        }

        let report = engine.tick();
        if report.event.is_some() {
            applied += 1;
        }
        if report.resized {
            debug!(tick = report.tick, "grid reallocated");
        }

        if report.tick % args.record_every as u64 != 0 {
            continue;
        }

        write_frame(&mut frame_writer, engine.field())?;

        let (width, height) = engine.dimensions();
        let row = MetaRow {
            frame_idx,
            tick: report.tick,

            mode: engine.mode().as_str(),
            seed: args.seed,
            pattern: pattern_name,

            width,
            height,

            event: report.event,
            resized: report.resized,
            heat_moved: report.heat_moved,

            total_heat: engine.total_heat(),
            max_heat: engine.max_heat(),
            pending_events: engine.pending_events(),
        };

        serde_json::to_writer(&mut meta_file, &row)?;
        meta_file.write_all(b"\n")?;

        frame_idx += 1;
    }

    frame_writer.flush()?;
    meta_file.flush()?;

    println!("Wrote frames to: {}", args.out.display());
    println!(
        "Frames: {} (ticks={} / record_every={}), events applied: {}, final heat: {}",
        frame_idx,
        args.ticks,
        args.record_every,
        applied,
        engine.total_heat()
    );

    Ok(())
}

fn load_config(path: &Path) -> Result<HeatMapConfig, Box<dyn std::error::Error>> {
    let file = File::open(path).map_err(|e| format!("{}: {e}", path.display()))?;
    let cfg: HeatMapConfig = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| format!("{}: {e}", path.display()))?;
    Ok(cfg)
}

fn load_events(path: &Path) -> Result<Vec<HeatEvent>, Box<dyn std::error::Error>> {
    let file = File::open(path).map_err(|e| format!("{}: {e}", path.display()))?;
    let events: Vec<HeatEvent> = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| format!("{}: {e}", path.display()))?;
    Ok(events)
}

fn write_frame<W: Write>(w: &mut W, field: &[i32]) -> std::io::Result<()> {
    for &v in field {
        w.write_all(&(v as u32).to_le_bytes())?;
    }
    Ok(())
}
