use std::{io::Write as _, path::PathBuf, str::FromStr};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use showreel::{PortfolioConfig, SectionController, SlideLayout, SlideStep};

#[derive(Parser, Debug)]
#[command(name = "showreel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load and validate a portfolio JSON document.
    Validate(ValidateArgs),
    /// Run the controller headless and print render descriptors as JSON lines.
    Simulate(SimulateArgs),
    /// Print the slide/video layout for a canvas size.
    Layout(LayoutArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Portfolio JSON.
    #[arg(long)]
    config: PathBuf,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Portfolio JSON. Uses the built-in portfolio when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of frames to run.
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Input event as FRAME:ACTION, where ACTION is goto:<section>, next, or prev.
    #[arg(long = "event")]
    events: Vec<ScheduledEvent>,

    /// Print every Nth frame (the last frame is always printed).
    #[arg(long, default_value_t = 1)]
    every: u64,
}

const MAX_VIDEO_SLOTS: i64 = 16;

#[derive(Parser, Debug)]
struct LayoutArgs {
    /// Canvas width in pixels.
    #[arg(long, default_value_t = 1920)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = 1080)]
    height: u32,

    /// Number of video slots.
    #[arg(
        long,
        default_value_t = 3,
        value_parser = clap::value_parser!(u16).range(0..=MAX_VIDEO_SLOTS)
    )]
    videos: u16,
}

#[derive(Clone, Debug, PartialEq)]
enum Action {
    Goto(String),
    Slide(SlideStep),
}

#[derive(Clone, Debug, PartialEq)]
struct ScheduledEvent {
    frame: u64,
    action: Action,
}

impl FromStr for ScheduledEvent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (frame, action) = s
            .split_once(':')
            .ok_or_else(|| format!("expected FRAME:ACTION, got '{s}'"))?;
        let frame = frame
            .trim()
            .parse::<u64>()
            .map_err(|e| format!("bad frame '{frame}': {e}"))?;
        let action = match action.trim() {
            "next" => Action::Slide(SlideStep::Next),
            "prev" => Action::Slide(SlideStep::Previous),
            other => match other.strip_prefix("goto:") {
                Some(name) if !name.is_empty() => Action::Goto(name.to_string()),
                _ => return Err(format!("unknown action '{other}'")),
            },
        };
        Ok(Self { frame, action })
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Simulate(args) => cmd_simulate(args),
        Command::Layout(args) => cmd_layout(args),
    }
}

fn load(path: Option<&PathBuf>) -> anyhow::Result<PortfolioConfig> {
    match path {
        Some(p) => PortfolioConfig::from_path(p)
            .with_context(|| format!("load portfolio '{}'", p.display())),
        None => Ok(PortfolioConfig::default()),
    }
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let cfg = load(Some(&args.config))?;
    let catalog = cfg.catalog()?;
    for spec in catalog.sections() {
        eprintln!("{:<12} {}", spec.id, spec.display_label());
    }
    eprintln!(
        "ok: {} sections, default '{}', slide interval {:.2}s",
        catalog.len(),
        cfg.default_section,
        cfg.controller.slide_interval_secs(cfg.fps)
    );
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.every > 0, "--every must be > 0");
    let cfg = load(args.config.as_ref())?;
    let mut ctl = SectionController::from_config(&cfg)?;
    ctl.subscribe(|change| {
        tracing::info!(
            frame = change.frame.0,
            section = change.to_name.as_str(),
            "section changed"
        );
    });

    let mut events = args.events;
    for ev in &events {
        anyhow::ensure!(
            ev.frame < args.frames,
            "event at frame {} is outside the {}-frame run",
            ev.frame,
            args.frames
        );
        if let Action::Goto(name) = &ev.action {
            ctl.catalog()
                .resolve(name)
                .with_context(|| format!("event at frame {}", ev.frame))?;
        }
    }
    events.sort_by_key(|e| e.frame);
    let mut pending = events.into_iter().peekable();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for frame in 0..args.frames {
        while let Some(ev) = pending.next_if(|e| e.frame == frame) {
            match ev.action {
                Action::Goto(name) => ctl
                    .request_section_named(&name)
                    .with_context(|| format!("event at frame {frame}"))?,
                Action::Slide(step) => {
                    ctl.advance_slide(step);
                }
            }
        }
        ctl.tick();
        if frame % args.every == 0 || frame + 1 == args.frames {
            serde_json::to_writer(&mut out, &ctl.render_descriptor())?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let canvas = showreel::Canvas {
        width: args.width,
        height: args.height,
    };
    anyhow::ensure!(
        canvas.width > 0 && canvas.height > 0,
        "canvas must be non-empty"
    );
    let layout = SlideLayout::for_canvas(canvas, usize::from(args.videos));
    println!("{}", serde_json::to_string_pretty(&layout)?);
    Ok(())
}
