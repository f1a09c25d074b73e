//! # dodge_sim
//!
//! Deterministic falling-obstacle simulation.  One [`SimulationEngine::tick`]
//! advances the session by exactly one frame:
//!
//! 1. bump the frame counter,
//! 2. spawn an obstacle every `obstacle_frequency` frames,
//! 3. drop every obstacle by its own speed; obstacles leaving the bottom edge
//!    are removed and score one point each,
//! 4. re-derive difficulty when the score lands on a positive multiple of 10,
//! 5. test the player against every obstacle; the first overlap ends the
//!    session.
//!
//! ## Difficulty curve
//!
//! | score | obstacle speed | spawn every N frames |
//! |---|---|---|
//! | 0  | 3 | 60 |
//! | 10 | 4 | 58 |
//! | 50 | 8 | 50 |
//! | 150+ | 3 + score/10 | 30 |
//!
//! ## Quick start
//!
//! ```rust
//! use dodge_sim::{Arena, Player, SimulationEngine};
//!
//! let arena  = Arena::default();
//! let player = Player::new(arena);
//! let mut engine = SimulationEngine::seeded(arena, 7);
//!
//! while !engine.is_over() && engine.session().frame_count < 600 {
//!     engine.tick(&player);
//! }
//! println!("score = {}", engine.score());
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

// ════════════════════════════════════════════════════════════════════════════
// Constants
// ════════════════════════════════════════════════════════════════════════════

pub const BASE_OBSTACLE_SPEED:     u32 = 3;
pub const BASE_OBSTACLE_FREQUENCY: u32 = 60;
pub const MIN_OBSTACLE_FREQUENCY:  u32 = 30;

pub const OBSTACLE_MIN_WIDTH: u32 = 50;
pub const OBSTACLE_MAX_WIDTH: u32 = 100;
pub const OBSTACLE_HEIGHT:    f32 = 20.0;
/// Obstacles enter just above the visible area.
pub const OBSTACLE_SPAWN_Y:   f32 = -20.0;

pub const PLAYER_RADIUS:        f32 = 20.0;
pub const PLAYER_SPEED:         f32 = 5.0;
/// Distance from the bottom edge to the player's centre.
pub const PLAYER_BOTTOM_OFFSET: f32 = 50.0;

// ════════════════════════════════════════════════════════════════════════════
// Difficulty curve
// ════════════════════════════════════════════════════════════════════════════

/// Fall speed (px/frame) given to obstacles spawned at `score`.
pub fn obstacle_speed(score: u32) -> u32 {
    BASE_OBSTACLE_SPEED + score / 10
}

/// Frames between spawns at `score`; never below [`MIN_OBSTACLE_FREQUENCY`].
pub fn obstacle_frequency(score: u32) -> u32 {
    BASE_OBSTACLE_FREQUENCY
        .saturating_sub(score / 5)
        .max(MIN_OBSTACLE_FREQUENCY)
}

// ════════════════════════════════════════════════════════════════════════════
// Arena / Player / Obstacle
// ════════════════════════════════════════════════════════════════════════════

/// The play area, in pixels.  `(0, 0)` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arena {
    pub width:  f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Arena { width, height }
    }
}

impl Default for Arena {
    fn default() -> Self {
        Arena { width: 600.0, height: 600.0 }
    }
}

/// The player's disc.  Only `x` moves; `y`, `radius` and `speed` are fixed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Player {
    pub x:      f32,
    pub y:      f32,
    pub radius: f32,
    pub speed:  f32,
}

impl Player {
    /// Centred horizontally, resting near the bottom edge.
    pub fn new(arena: Arena) -> Self {
        Player {
            x:      arena.width / 2.0,
            y:      arena.height - PLAYER_BOTTOM_OFFSET,
            radius: PLAYER_RADIUS,
            speed:  PLAYER_SPEED,
        }
    }

    pub fn recenter(&mut self, arena: Arena) {
        self.x = arena.width / 2.0;
    }

    /// Move by `dx` and clamp to `[radius, arena.width - radius]`.
    pub fn shift(&mut self, dx: f32, arena: Arena) {
        let hi = (arena.width - self.radius).max(self.radius);
        self.x = (self.x + dx).clamp(self.radius, hi);
    }
}

/// A falling rectangle.  `speed` is frozen at spawn time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Obstacle {
    pub x:      f32,
    pub y:      f32,
    pub width:  f32,
    pub height: f32,
    pub speed:  f32,
}

impl Obstacle {
    /// Rectangle vs. the player's bounding box, strict on every edge.
    pub fn overlaps(&self, player: &Player) -> bool {
        player.y - player.radius < self.y + self.height
            && player.y + player.radius > self.y
            && player.x + player.radius > self.x
            && player.x - player.radius < self.x + self.width
    }
}

// ════════════════════════════════════════════════════════════════════════════
// GameSession
// ════════════════════════════════════════════════════════════════════════════

/// Everything a session mutates.  Owned by [`SimulationEngine`]; readers get
/// `&GameSession`.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSession {
    pub obstacles:          Vec<Obstacle>,
    pub score:              u32,
    pub frame_count:        u64,
    pub obstacle_speed:     u32,
    pub obstacle_frequency: u32,
    pub over:               bool,
}

impl Default for GameSession {
    fn default() -> Self {
        GameSession {
            obstacles:          Vec::new(),
            score:              0,
            frame_count:        0,
            obstacle_speed:     BASE_OBSTACLE_SPEED,
            obstacle_frequency: BASE_OBSTACLE_FREQUENCY,
            over:               false,
        }
    }
}

/// What happened during one [`SimulationEngine::tick`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub spawned:            bool,
    pub removed:            u32,
    pub difficulty_changed: bool,
    pub collided:           bool,
}

// ════════════════════════════════════════════════════════════════════════════
// SimulationEngine
// ════════════════════════════════════════════════════════════════════════════

pub struct SimulationEngine<R: Rng = StdRng> {
    arena:   Arena,
    session: GameSession,
    rng:     R,
}

impl SimulationEngine<StdRng> {
    /// Engine over a reproducible `StdRng`.
    pub fn seeded(arena: Arena, seed: u64) -> Self {
        SimulationEngine::new(arena, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SimulationEngine<R> {
    pub fn new(arena: Arena, rng: R) -> Self {
        SimulationEngine { arena, session: GameSession::default(), rng }
    }

    pub fn arena(&self)   -> Arena        { self.arena }
    pub fn session(&self) -> &GameSession { &self.session }
    pub fn score(&self)   -> u32          { self.session.score }
    pub fn is_over(&self) -> bool         { self.session.over }

    /// Drop an obstacle straight into the session, bypassing the spawn gate.
    pub fn insert_obstacle(&mut self, obstacle: Obstacle) {
        self.session.obstacles.push(obstacle);
    }

    /// Back to a fresh session.  The RNG keeps its position.
    pub fn reset(&mut self) {
        self.session = GameSession::default();
    }

    /// Advance exactly one frame.  A finished session is left untouched.
    pub fn tick(&mut self, player: &Player) -> TickReport {
        let mut report = TickReport::default();
        if self.session.over {
            return report;
        }

        // ── 1–2. frame counter + spawn gate ──────────────────────────────
        self.session.frame_count += 1;
        if self.session.frame_count % u64::from(self.session.obstacle_frequency) == 0 {
            let obstacle = self.spawn_obstacle();
            debug!(
                frame = self.session.frame_count,
                x = obstacle.x,
                width = obstacle.width,
                speed = obstacle.speed,
                "obstacle spawned"
            );
            self.session.obstacles.push(obstacle);
            report.spawned = true;
        }

        // ── 3. advance + prune in one pass ───────────────────────────────
        let floor = self.arena.height;
        let mut removed = 0u32;
        self.session.obstacles = std::mem::take(&mut self.session.obstacles)
            .into_iter()
            .filter_map(|mut o| {
                o.y += o.speed;
                if o.y > floor {
                    removed += 1;
                    None
                } else {
                    Some(o)
                }
            })
            .collect();
        self.session.score += removed;
        report.removed = removed;

        // ── 4. difficulty ────────────────────────────────────────────────
        let score = self.session.score;
        if score > 0 && score % 10 == 0 {
            let speed = obstacle_speed(score);
            let frequency = obstacle_frequency(score);
            if speed != self.session.obstacle_speed || frequency != self.session.obstacle_frequency {
                debug!(score, speed, frequency, "difficulty raised");
                report.difficulty_changed = true;
            }
            self.session.obstacle_speed = speed;
            self.session.obstacle_frequency = frequency;
        }

        // ── 5. collision ─────────────────────────────────────────────────
        if self.session.obstacles.iter().any(|o| o.overlaps(player)) {
            debug!(frame = self.session.frame_count, score, "player hit");
            self.session.over = true;
            report.collided = true;
        }

        report
    }

    fn spawn_obstacle(&mut self) -> Obstacle {
        let width = self.rng.gen_range(OBSTACLE_MIN_WIDTH..=OBSTACLE_MAX_WIDTH) as f32;
        let max_x = (self.arena.width - width).max(0.0) as u32;
        let x = self.rng.gen_range(0..=max_x) as f32;
        Obstacle {
            x,
            y:      OBSTACLE_SPAWN_Y,
            width,
            height: OBSTACLE_HEIGHT,
            speed:  self.session.obstacle_speed as f32,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
