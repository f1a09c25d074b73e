//! dodge_headless: run a seeded session without a window.
//!
//! Useful for checking determinism and for balancing the difficulty curve:
//! the same `--seed` always produces the same obstacle stream.

use anyhow::{bail, Result};
use clap::Parser;
use dodge_sim::{Arena, Obstacle, Player, SimulationEngine};

/// Headless runner for the dodge simulation
#[derive(Parser, Debug)]
#[clap(version, about)]
struct Cli {
    /// RNG seed for obstacle generation
    #[clap(short = 's', long, default_value_t = 0)]
    seed: u64,

    /// stop after this many ticks even if the player survives
    #[clap(short = 't', long, default_value_t = 60 * 60 * 5)]
    max_ticks: u64,

    /// keep the player still instead of steering away from obstacles
    #[clap(long)]
    idle: bool,

    /// play-area width in pixels
    #[clap(long, default_value_t = 600.0)]
    width: f32,

    /// play-area height in pixels
    #[clap(long, default_value_t = 600.0)]
    height: f32,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.width <= 2.0 * dodge_sim::PLAYER_RADIUS || cli.height <= dodge_sim::PLAYER_BOTTOM_OFFSET {
        bail!("arena {}x{} is too small for the player", cli.width, cli.height);
    }

    let arena = Arena::new(cli.width, cli.height);
    let mut player = Player::new(arena);
    let mut engine = SimulationEngine::seeded(arena, cli.seed);

    println!();
    println!("  seed {}   arena {}x{}   {}", cli.seed, arena.width, arena.height,
             if cli.idle { "idle player" } else { "autopilot" });
    println!();
    println!("  {:>8}  {:>6}  {:>6}  {:>9}", "tick", "score", "speed", "frequency");

    let mut last_score = u32::MAX;
    while !engine.is_over() && engine.session().frame_count < cli.max_ticks {
        if !cli.idle {
            let dx = steer(&player, &engine.session().obstacles, arena);
            player.shift(dx, arena);
        }
        let report = engine.tick(&player);

        let s = engine.session();
        if report.difficulty_changed || (s.score != last_score && s.score % 10 == 0) {
            println!("  {:>8}  {:>6}  {:>6}  {:>9}",
                     s.frame_count, s.score, s.obstacle_speed, s.obstacle_frequency);
        }
        last_score = s.score;
    }

    let s = engine.session();
    println!();
    println!("  {} after {} ticks, score {}, speed {}, spawn every {} frames",
             if s.over { "Hit" } else { "Survived" },
             s.frame_count, s.score, s.obstacle_speed, s.obstacle_frequency);
    println!();
    Ok(())
}

/// Move away from the lowest obstacle that is about to cross the player's
/// row, towards whichever side has more room.
fn steer(player: &Player, obstacles: &[Obstacle], arena: Arena) -> f32 {
    let lookahead = player.radius * 6.0;
    let threat = obstacles
        .iter()
        .filter(|o| o.y + o.height > player.y - player.radius - lookahead && o.y < player.y + player.radius)
        .filter(|o| player.x + player.radius * 1.5 > o.x && player.x - player.radius * 1.5 < o.x + o.width)
        .max_by(|a, b| a.y.total_cmp(&b.y));

    match threat {
        Some(o) => {
            let room_left = o.x - player.radius;
            let room_right = arena.width - (o.x + o.width) - player.radius;
            if room_left > room_right { -player.speed } else { player.speed }
        }
        None => 0.0,
    }
}
