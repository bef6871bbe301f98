use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use helixflow::{
    EngineConfig, FrameSink, HelixSession, JsonLinesSink, PipelineSwitch, SessionOpts,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "helixflow", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load and validate a config, then list its pipelines.
    Check(CheckArgs),
    /// Drive frames headlessly and write them as JSON lines.
    Run(RunArgs),
    /// Print the stock config with every default filled in.
    Defaults,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Engine config JSON.
    #[arg(long)]
    config: PathBuf,
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Engine config JSON.
    #[arg(long)]
    config: PathBuf,

    /// Number of frames to drive.
    #[arg(long, default_value_t = 200)]
    frames: u64,

    /// Elapsed time added per frame (same units as the config's time scales).
    #[arg(long, default_value_t = 1000.0 / 60.0)]
    dt: f64,

    /// Elapsed time of the first frame.
    #[arg(long, default_value_t = 0.0)]
    start: f64,

    /// Request a pipeline before a frame, as `<frame>=<pipeline>`. Repeatable.
    #[arg(long = "switch")]
    switches: Vec<PipelineSwitch>,

    /// Include helix strands in every frame.
    #[arg(long, default_value_t = false)]
    helix: bool,

    /// Output file; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Run(args) => cmd_run(args),
        Command::Defaults => cmd_defaults(),
    }
}

fn load(path: &Path) -> anyhow::Result<HelixSession> {
    let cfg = EngineConfig::from_path(path)?;
    HelixSession::from_config(&cfg)
        .with_context(|| format!("build helix rig from '{}'", path.display()))
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let sess = load(&args.config)?;
    let sched = sess.scheduler();
    let active = sched.active_pipeline();

    println!("spine points: {}", sched.base_points().len());
    println!("transition steps: {}", sched.transition_steps());
    for name in sched.registry().pipeline_names() {
        let marker = if Some(name) == active { " (active)" } else { "" };
        println!("pipeline {name}{marker}");
    }
    if active.is_none() {
        eprintln!("warning: no default pipeline; `run` needs a --switch at frame 0");
    }
    Ok(())
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let mut sess = load(&args.config)?;
    let opts = SessionOpts {
        start_time: args.start,
        frame_dt: args.dt,
        with_strands: args.helix,
    };

    let stats = match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = File::create(path)
                .with_context(|| format!("create output '{}'", path.display()))?;
            let mut sink = JsonLinesSink::new(BufWriter::new(f));
            drive(&mut sess, &args, &opts, &mut sink)?
        }
        None => {
            let stdout = std::io::stdout();
            let mut sink = JsonLinesSink::new(stdout.lock());
            drive(&mut sess, &args, &opts, &mut sink)?
        }
    };

    eprintln!(
        "drove {} frames, {} transitions completed",
        stats.frames_total, stats.transitions_completed
    );
    Ok(())
}

fn drive(
    sess: &mut HelixSession,
    args: &RunArgs,
    opts: &SessionOpts,
    sink: &mut dyn FrameSink,
) -> anyhow::Result<helixflow::SessionStats> {
    sess.run(args.frames, opts, &args.switches, sink)
        .context("drive frames")
}

fn cmd_defaults() -> anyhow::Result<()> {
    let text = EngineConfig::default().to_json_pretty()?;
    let mut out = std::io::stdout().lock();
    writeln!(out, "{text}").context("write defaults")?;
    Ok(())
}
