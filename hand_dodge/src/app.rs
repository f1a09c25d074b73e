//! Top-level application state machine.
//!
//! `App` owns the simulation, the player, the gesture classifier and the hand
//! tracker.  Each loop iteration it consumes one [`FrameInput`] and moves
//! between phases:
//!
//! ```text
//!   Menu ──start──▶ Playing ──collision──▶ GameOver ──restart──▶ Playing
//!                                            │
//!                                            └──quit──▶ Terminated
//!   (any) ──window closed / Esc──▶ Terminated
//! ```
//!
//! Restarting is an edge back into `Playing`, not a fresh call into the run
//! loop, so any number of sessions runs in constant stack.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::mpsc;
use tracing::{info, warn};

use dodge_sim::{Arena, Obstacle, Player, SimulationEngine};

use crate::camera::{open_tracker, Frame, HandTracker};
use crate::config::{CameraMode, GameConfig, WindowConfig};
use crate::error::AppResult;
use crate::gesture::{GestureClassifier, GestureEvent};
use crate::input::{HeldKeys, InputAggregator};
use crate::layout::Layout;
use crate::snapshot::{Screenshot, SnapshotWriter};
use crate::visualizer::{Theme, Visualizer};

// ════════════════════════════════════════════════════════════════════════════
// States, triggers, per-frame input
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState { Menu, Playing, GameOver, Terminated }

/// What a button click asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger { Start, Restart, Quit }

/// Everything the window reported since the previous iteration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    pub held:   HeldKeys,
    /// Left-button presses, in window pixels, oldest first.
    pub clicks: Vec<(f32, f32)>,
    /// Window closed or quit key pressed.
    pub quit:   bool,
}

/// Read-only view handed to the renderer.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub state:        AppState,
    pub layout:       &'a Layout,
    pub player:       &'a Player,
    pub obstacles:    &'a [Obstacle],
    pub score:        u32,
    pub last_gesture: Option<GestureEvent>,
    pub preview:      Option<&'a Frame>,
}

/// Drawing surface plus the input it collects.
pub trait Renderer {
    fn poll_input(&mut self) -> FrameInput;
    fn render(&mut self, snapshot: &Snapshot<'_>);
    /// The last rendered frame, if the surface keeps one.
    fn capture(&self) -> Option<Screenshot>;
}

/// Result of one [`App::step`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    pub ticked:            bool,
    pub entered_game_over: bool,
}

// ════════════════════════════════════════════════════════════════════════════
// App
// ════════════════════════════════════════════════════════════════════════════

pub struct App<R: Rng = StdRng> {
    state:      AppState,
    layout:     Layout,
    arena:      Arena,
    engine:     SimulationEngine<R>,
    player:     Player,
    classifier: GestureClassifier,
    aggregator: InputAggregator,
    held:       HeldKeys,
    tracker:    Option<HandTracker>,
    /// Frame captured during the latest play tick, for the preview panel.
    preview:    Option<Frame>,
    sessions:   u32,
}

impl<R: Rng> App<R> {
    pub fn new(window: &WindowConfig, rng: R, tracker: Option<HandTracker>) -> Self {
        let layout = Layout::new(window);
        let arena = Arena::new(layout.play_width as f32, layout.height as f32);
        App {
            state:      AppState::Menu,
            layout,
            arena,
            engine:     SimulationEngine::new(arena, rng),
            player:     Player::new(arena),
            classifier: GestureClassifier::new(),
            aggregator: InputAggregator::new(arena),
            held:       HeldKeys::default(),
            tracker,
            preview:    None,
            sessions:   0,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn state(&self)        -> AppState               { self.state }
    pub fn layout(&self)       -> &Layout                { &self.layout }
    pub fn engine(&self)       -> &SimulationEngine<R>   { &self.engine }
    pub fn player(&self)       -> &Player                { &self.player }
    pub fn sessions(&self)     -> u32                    { self.sessions }
    pub fn last_gesture(&self) -> Option<GestureEvent>   { self.classifier.last_gesture() }
    pub fn tracker(&self)      -> Option<&HandTracker>   { self.tracker.as_ref() }

    /// Direct access to the running session, e.g. to plant obstacles.
    pub fn engine_mut(&mut self) -> &mut SimulationEngine<R> {
        &mut self.engine
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        let session = self.engine.session();
        Snapshot {
            state:        self.state,
            layout:       &self.layout,
            player:       &self.player,
            obstacles:    &session.obstacles,
            score:        session.score,
            last_gesture: self.classifier.last_gesture(),
            preview:      self.preview.as_ref(),
        }
    }

    // ── Triggers ──────────────────────────────────────────────────────────

    /// Which button, if any, a click at `(x, y)` hits in the current state.
    pub fn trigger_for_click(&self, x: f32, y: f32) -> Option<Trigger> {
        match self.state {
            AppState::Menu if self.layout.start_button.contains(x, y) => Some(Trigger::Start),
            AppState::GameOver if self.layout.restart_button.contains(x, y) => Some(Trigger::Restart),
            AppState::GameOver if self.layout.quit_button.contains(x, y) => Some(Trigger::Quit),
            _ => None,
        }
    }

    /// Apply a trigger; ones that make no sense in the current state are
    /// ignored.
    pub fn fire(&mut self, trigger: Trigger) {
        match (self.state, trigger) {
            (AppState::Menu, Trigger::Start) | (AppState::GameOver, Trigger::Restart) => {
                self.start_session();
            }
            (AppState::GameOver, Trigger::Quit) => self.terminate(),
            _ => {}
        }
    }

    /// Stop for good and hand the camera back.  Idempotent.
    pub fn terminate(&mut self) {
        if self.state == AppState::Terminated {
            return;
        }
        self.transition(AppState::Terminated);
        if let Some(tracker) = self.tracker.as_mut() {
            tracker.release();
        }
        self.preview = None;
    }

    // ── Per-iteration step ────────────────────────────────────────────────

    /// Consume one iteration's input.  A quit request wins over everything
    /// else and is only ever seen here, between ticks.
    pub fn step(&mut self, input: &FrameInput) -> StepOutcome {
        let mut outcome = StepOutcome::default();
        if self.state == AppState::Terminated {
            return outcome;
        }
        if input.quit {
            self.terminate();
            return outcome;
        }

        match self.state {
            AppState::Menu | AppState::GameOver => {
                for &(x, y) in &input.clicks {
                    if let Some(trigger) = self.trigger_for_click(x, y) {
                        self.fire(trigger);
                        break;
                    }
                }
            }
            AppState::Playing => {
                self.held = input.held;
                outcome.ticked = true;
                outcome.entered_game_over = self.play_tick();
            }
            AppState::Terminated => {}
        }
        outcome
    }

    /// Gesture → input → simulation, in that order.  True when this tick
    /// ended the session.
    fn play_tick(&mut self) -> bool {
        let (frame, pose) = match self.tracker.as_mut() {
            Some(t) => t.sample(),
            None => (None, None),
        };
        let gesture = self.classifier.classify(pose.as_ref());
        self.aggregator.apply(gesture, self.held, &mut self.player);
        let report = self.engine.tick(&self.player);
        self.preview = frame;

        if report.collided {
            info!(
                score = self.engine.score(),
                frames = self.engine.session().frame_count,
                "session {} over",
                self.sessions
            );
            self.transition(AppState::GameOver);
            return true;
        }
        false
    }

    fn start_session(&mut self) {
        self.engine.reset();
        self.player.recenter(self.arena);
        self.classifier.clear();
        self.held = HeldKeys::default();
        self.preview = None;
        self.sessions += 1;
        self.transition(AppState::Playing);
    }

    fn transition(&mut self, to: AppState) {
        info!(from = ?self.state, to = ?to, "state change");
        self.state = to;
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Loop
// ════════════════════════════════════════════════════════════════════════════

/// Drive `app` until it terminates.  Pacing is the renderer's job.
pub fn run_loop<R: Rng, D: Renderer>(app: &mut App<R>, renderer: &mut D, snapshots: Option<&SnapshotWriter>) {
    while app.state() != AppState::Terminated {
        let input = renderer.poll_input();
        let outcome = app.step(&input);
        if app.state() == AppState::Terminated {
            break;
        }

        if outcome.entered_game_over {
            // Show the collision itself before the game-over screen replaces it.
            renderer.render(&Snapshot { state: AppState::Playing, ..app.snapshot() });
            if let Some(writer) = snapshots {
                save_snapshot(renderer, writer);
            }
        }
        renderer.render(&app.snapshot());
    }
}

fn save_snapshot<D: Renderer>(renderer: &D, writer: &SnapshotWriter) {
    match renderer.capture() {
        Some(shot) => {
            if let Err(e) = writer.save(&shot) {
                warn!("screenshot not saved: {}", e);
            }
        }
        None => warn!("renderer has no frame to capture"),
    }
}

/// Run the game in a window.
///
/// Opens the camera first, then the window; a failure in either aborts
/// startup before any session begins, and whatever was already opened is
/// released on the way out.
pub fn run(cfg: GameConfig) -> AppResult<()> {
    cfg.validate()?;

    let (sim_tx, sim_rx) = match cfg.camera.mode {
        CameraMode::Sim => {
            let (tx, rx) = mpsc::channel();
            (Some(tx), Some(rx))
        }
        _ => (None, None),
    };

    let tracker = open_tracker(&cfg.camera, sim_rx)?;
    let mut vis = Visualizer::new(&cfg.window, Theme::default(), sim_tx)?;

    let seed = cfg.seed.unwrap_or_else(rand::random);
    info!(seed, camera = %cfg.camera.mode, "starting");

    let mut app = App::new(&cfg.window, StdRng::seed_from_u64(seed), tracker);
    let writer = cfg.snapshots.enabled.then(|| SnapshotWriter::new(&cfg.snapshots.dir));

    run_loop(&mut app, &mut vis, writer.as_ref());
    info!(sessions = app.sessions(), "bye");
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
