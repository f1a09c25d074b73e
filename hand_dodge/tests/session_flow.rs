//! Whole sessions driven through `run_loop` with a scripted, windowless renderer.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::SeedableRng;

use dodge_sim::Obstacle;
use hand_dodge::app::{run_loop, App, AppState, FrameInput, Renderer, Snapshot};
use hand_dodge::camera::{AnnotationPoseEstimator, Frame, FrameSource, HandTracker};
use hand_dodge::config::WindowConfig;
use hand_dodge::gesture::{GestureEvent, HandPose, Landmark, INDEX_TIP};
use hand_dodge::input::HeldKeys;
use hand_dodge::layout::Rect;
use hand_dodge::snapshot::{Screenshot, SnapshotWriter};

/// Feeds queued inputs, then a quit signal once the script runs dry.
struct ScriptedRenderer {
    script:   VecDeque<FrameInput>,
    rendered: Vec<(AppState, u32)>,
}

impl ScriptedRenderer {
    fn new(script: Vec<FrameInput>) -> Self {
        ScriptedRenderer { script: script.into(), rendered: Vec::new() }
    }

    fn states(&self) -> Vec<AppState> {
        self.rendered.iter().map(|(s, _)| *s).collect()
    }
}

impl Renderer for ScriptedRenderer {
    fn poll_input(&mut self) -> FrameInput {
        self.script.pop_front().unwrap_or(FrameInput { quit: true, ..FrameInput::default() })
    }

    fn render(&mut self, snap: &Snapshot<'_>) {
        self.rendered.push((snap.state, snap.score));
    }

    fn capture(&self) -> Option<Screenshot> {
        Some(Screenshot { width: 8, height: 6, pixels: vec![0xFF336699; 48] })
    }
}

fn new_app() -> App {
    App::new(&WindowConfig::default(), StdRng::seed_from_u64(42), None)
}

fn click(r: Rect) -> FrameInput {
    let (x, y) = r.center();
    FrameInput { clicks: vec![(x as f32, y as f32)], ..FrameInput::default() }
}

fn idle() -> FrameInput {
    FrameInput::default()
}

fn quit_signal() -> FrameInput {
    FrameInput { quit: true, ..FrameInput::default() }
}

/// Start a session and plant an obstacle on the player.
fn doomed_app() -> App {
    let mut app = new_app();
    let start = click(app.layout().start_button);
    app.step(&start);
    let p = *app.player();
    app.engine_mut().insert_obstacle(Obstacle {
        x: p.x - 10.0, y: p.y - 5.0, width: 20.0, height: 20.0, speed: 0.0,
    });
    app
}

fn bmp_count(dir: &std::path::Path) -> usize {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(Result::ok)
            .filter(|e| e.path().extension().is_some_and(|x| x == "bmp"))
            .count(),
        Err(_) => 0,
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────

#[test]
fn start_click_plays_until_quit() {
    let mut app = new_app();
    let start = click(app.layout().start_button);
    let mut r = ScriptedRenderer::new(vec![start, idle(), idle(), idle()]);

    run_loop(&mut app, &mut r, None);

    assert_eq!(app.state(), AppState::Terminated);
    assert_eq!(r.states(), vec![AppState::Playing; 4]);
    assert_eq!(app.engine().session().frame_count, 3);
    assert_eq!(app.sessions(), 1);
}

#[test]
fn missed_click_keeps_menu() {
    let mut app = new_app();
    let mut r = ScriptedRenderer::new(vec![
        FrameInput { clicks: vec![(1.0, 1.0)], ..FrameInput::default() },
        idle(),
    ]);

    run_loop(&mut app, &mut r, None);

    assert_eq!(r.states(), vec![AppState::Menu; 2]);
    assert_eq!(app.sessions(), 0);
}

#[test]
fn quit_from_menu_renders_nothing() {
    let mut app = new_app();
    let mut r = ScriptedRenderer::new(vec![quit_signal()]);

    run_loop(&mut app, &mut r, None);

    assert_eq!(app.state(), AppState::Terminated);
    assert!(r.rendered.is_empty());
}

// ── Game over ─────────────────────────────────────────────────────────────

#[test]
fn collision_saves_screenshot_then_quit_button_exits() {
    let tmp = tempfile::tempdir().unwrap();
    let writer = SnapshotWriter::new(tmp.path());
    let mut app = doomed_app();
    let quit = click(app.layout().quit_button);
    let mut r = ScriptedRenderer::new(vec![idle(), quit]);

    run_loop(&mut app, &mut r, Some(&writer));

    assert_eq!(app.state(), AppState::Terminated);
    // The collision frame is drawn as play before the game-over screen.
    assert_eq!(r.states(), vec![AppState::Playing, AppState::GameOver]);
    assert_eq!(bmp_count(tmp.path()), 1);
}

#[test]
fn no_writer_no_screenshot() {
    let tmp = tempfile::tempdir().unwrap();
    let mut app = doomed_app();
    let mut r = ScriptedRenderer::new(vec![idle()]);

    run_loop(&mut app, &mut r, None);

    assert_eq!(r.states(), vec![AppState::Playing, AppState::GameOver]);
    assert_eq!(bmp_count(tmp.path()), 0);
}

#[test]
fn unwritable_snapshot_dir_does_not_stop_the_game() {
    let blocker = tempfile::NamedTempFile::new().unwrap();
    let writer = SnapshotWriter::new(blocker.path());
    let mut app = doomed_app();
    let restart = click(app.layout().restart_button);
    let mut r = ScriptedRenderer::new(vec![idle(), restart, idle()]);

    run_loop(&mut app, &mut r, Some(&writer));

    assert_eq!(app.sessions(), 2);
    assert_eq!(r.states().last(), Some(&AppState::Playing));
}

#[test]
fn restart_begins_fresh_session() {
    let mut app = doomed_app();
    let restart = click(app.layout().restart_button);
    let left = FrameInput { held: HeldKeys { left: true, right: false }, ..FrameInput::default() };
    let mut r = ScriptedRenderer::new(vec![left.clone(), left.clone(), idle(), restart, left]);

    run_loop(&mut app, &mut r, None);

    assert_eq!(app.sessions(), 2);
    // One tick into the second session, moved once from the centre.
    let s = app.engine().session();
    assert_eq!(s.frame_count, 1);
    assert_eq!(s.score, 0);
    assert!(s.obstacles.is_empty());
    assert_eq!(app.player().x, 295.0);
    assert_eq!(r.rendered.last(), Some(&(AppState::Playing, 0)));
}

#[test]
fn restart_clicks_while_playing_are_ignored() {
    let mut app = new_app();
    let start = click(app.layout().start_button);
    let restart = click(app.layout().restart_button);
    let mut script = vec![start];
    for _ in 0..50 {
        script.push(restart.clone());
    }
    let mut r = ScriptedRenderer::new(script);

    run_loop(&mut app, &mut r, None);

    assert_eq!(app.sessions(), 1);
    assert_eq!(app.engine().session().frame_count, 50);
}

// ── Hand tracking ─────────────────────────────────────────────────────────

/// Replays one wrist→fingertip offset per frame, then reports no hand.
struct ScriptedSource {
    offsets: VecDeque<Option<f32>>,
}

impl FrameSource for ScriptedSource {
    fn next_frame(&mut self) -> Option<Frame> {
        let annotation = self.offsets.pop_front().flatten().map(|dx| {
            let pose = HandPose::from_wrist_and_tip(Landmark::new(0.5, 0.8), Landmark::new(0.5 + dx, 0.4));
            (0..=INDEX_TIP).filter_map(|id| pose.get(id)).collect()
        });
        Some(Frame { width: 0, height: 0, pixels: Vec::new(), annotation })
    }
}

/// Records the hint the renderer would show.
struct HintRecorder {
    inputs: VecDeque<FrameInput>,
    hints:  Vec<Option<GestureEvent>>,
    xs:     Vec<f32>,
}

impl Renderer for HintRecorder {
    fn poll_input(&mut self) -> FrameInput {
        self.inputs.pop_front().unwrap_or(FrameInput { quit: true, ..FrameInput::default() })
    }

    fn render(&mut self, snap: &Snapshot<'_>) {
        if snap.state == AppState::Playing {
            self.hints.push(snap.last_gesture);
            self.xs.push(snap.player.x);
        }
    }

    fn capture(&self) -> Option<Screenshot> {
        None
    }
}

#[test]
fn hand_steers_player_and_hint_follows() {
    let source = ScriptedSource {
        offsets: vec![Some(0.3), Some(0.3), Some(0.05), None, Some(-0.2)].into(),
    };
    let tracker = HandTracker::new(Box::new(source), Box::new(AnnotationPoseEstimator));
    let mut app = App::new(&WindowConfig::default(), StdRng::seed_from_u64(3), Some(tracker));

    let start = click(app.layout().start_button);
    let mut inputs = vec![start];
    inputs.extend(std::iter::repeat(idle()).take(5));
    let mut r = HintRecorder { inputs: inputs.into(), hints: Vec::new(), xs: Vec::new() };

    run_loop(&mut app, &mut r, None);

    // First render is the freshly started session.
    assert_eq!(r.hints, vec![
        None,
        Some(GestureEvent::Left),
        Some(GestureEvent::Left),
        None,
        None,
        Some(GestureEvent::Right),
    ]);
    assert_eq!(r.xs, vec![300.0, 295.0, 290.0, 290.0, 290.0, 295.0]);
    assert!(app.tracker().is_some_and(|t| t.is_released()));
}
