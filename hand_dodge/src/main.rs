//! hand_dodge: windowed entry point.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::error;

use hand_dodge::app::run;
use hand_dodge::config::{CameraMode, GameConfig};
use hand_dodge::logging::init_logging;

#[derive(Parser, Debug)]
#[command(name = "hand_dodge", version, about = "Dodge falling bars with a hand gesture or the arrow keys")]
struct Cli {
    /// TOML config file (defaults to the platform config dir).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Obstacle RNG seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Hand source: sim, udp or none.
    #[arg(long)]
    camera: Option<CameraMode>,

    /// Address the UDP landmark feed binds to.
    #[arg(long)]
    feed: Option<String>,

    /// Directory for game-over screenshots.
    #[arg(long, conflicts_with = "no_screenshots")]
    screenshots: Option<PathBuf>,

    /// Do not save game-over screenshots.
    #[arg(long)]
    no_screenshots: bool,

    /// Log filter, e.g. `debug` or `hand_dodge=trace`.
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn apply(self, cfg: &mut GameConfig) {
        if let Some(seed) = self.seed {
            cfg.seed = Some(seed);
        }
        if let Some(mode) = self.camera {
            cfg.camera.mode = mode;
        }
        if let Some(addr) = self.feed {
            cfg.camera.feed_addr = addr;
        }
        if let Some(dir) = self.screenshots {
            cfg.snapshots.enabled = true;
            cfg.snapshots.dir = dir;
        }
        if self.no_screenshots {
            cfg.snapshots.enabled = false;
        }
        if let Some(level) = self.log_level {
            cfg.logging.level = level;
        }
    }
}

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║          Hand Dodge: steer with your hand, dodge bars        ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    if let Err(e) = try_main() {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn try_main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut cfg = GameConfig::load(cli.config.as_deref()).context("loading config")?;
    cli.apply(&mut cfg);
    cfg.validate().context("invalid configuration")?;

    let _guard = init_logging(&cfg.logging.level, cfg.logging.dir.clone());

    println!("  Camera: {}", cfg.camera.mode);
    if cfg.snapshots.enabled {
        println!("  Screenshots: {}", cfg.snapshots.dir.display());
    }
    println!("  Opening game window…");
    println!();

    run(cfg).context("game aborted")?;
    Ok(())
}
