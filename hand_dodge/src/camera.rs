//! Frame acquisition and pose estimation.
//!
//! The game only needs "maybe a hand" per tick.  Where it comes from is
//! hidden behind two traits, [`FrameSource`] and [`PoseEstimator`], bundled
//! into a [`HandTracker`]:
//!
//! | Camera mode | FrameSource | PoseEstimator |
//! |---|---|---|
//! | `sim` | [`SimCamera`]: synthetic frame, hand steered with `A`/`D`/`H` | [`MarkerPoseEstimator`] |
//! | `udp` | [`UdpLandmarkFeed`]: JSON datagrams from an external estimator | [`AnnotationPoseEstimator`] |
//! | `none` | none | none |
//!
//! A source that has nothing for this tick returns `None`; the tick carries
//! on with no hand.

use std::net::UdpSocket;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::{CameraConfig, CameraMode};
use crate::error::{AppError, AppResult};
use crate::gesture::{HandPose, Landmark, INDEX_TIP, WRIST};

// ════════════════════════════════════════════════════════════════════════════
// Frame
// ════════════════════════════════════════════════════════════════════════════

/// One captured image.  `pixels` is row-major ARGB and may be empty when the
/// source has no picture to show.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub width:      usize,
    pub height:     usize,
    pub pixels:     Vec<u32>,
    /// Landmarks already computed upstream of this process.
    pub annotation: Option<Vec<Landmark>>,
}

impl Frame {
    pub fn blank(width: usize, height: usize, color: u32) -> Self {
        Frame { width, height, pixels: vec![color; width * height], annotation: None }
    }

    pub fn has_image(&self) -> bool {
        self.width > 0 && self.height > 0 && self.pixels.len() == self.width * self.height
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Traits
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can hand over the latest camera frame.
pub trait FrameSource {
    /// The freshest frame, or `None` if nothing arrived in time.
    fn next_frame(&mut self) -> Option<Frame>;

    /// Give the device back.  Called at most once by [`HandTracker`].
    fn release(&mut self) {}
}

/// Finds (at most) one hand in a frame.
pub trait PoseEstimator {
    fn detect(&mut self, frame: &Frame) -> Option<HandPose>;

    fn close(&mut self) {}
}

// ════════════════════════════════════════════════════════════════════════════
// HandTracker
// ════════════════════════════════════════════════════════════════════════════

/// One frame source plus one estimator, sampled once per tick.
pub struct HandTracker {
    source:    Box<dyn FrameSource>,
    estimator: Box<dyn PoseEstimator>,
    released:  bool,
    /// Consecutive ticks without a frame.
    dry_ticks: u32,
}

/// Warn once after this many frameless ticks in a row (~1 s at 60 Hz).
const DRY_TICK_WARNING: u32 = 60;

impl HandTracker {
    pub fn new(source: Box<dyn FrameSource>, estimator: Box<dyn PoseEstimator>) -> Self {
        HandTracker { source, estimator, released: false, dry_ticks: 0 }
    }

    /// Acquire this tick's frame and detect on that same frame.
    pub fn sample(&mut self) -> (Option<Frame>, Option<HandPose>) {
        if self.released {
            return (None, None);
        }
        match self.source.next_frame() {
            Some(frame) => {
                if self.dry_ticks >= DRY_TICK_WARNING {
                    info!(missed = self.dry_ticks, "camera frames resumed");
                }
                self.dry_ticks = 0;
                let pose = self.estimator.detect(&frame);
                (Some(frame), pose)
            }
            None => {
                self.dry_ticks = self.dry_ticks.saturating_add(1);
                if self.dry_ticks == DRY_TICK_WARNING {
                    warn!("no camera frames for {} ticks, keyboard only until they return", DRY_TICK_WARNING);
                }
                (None, None)
            }
        }
    }

    pub fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.estimator.close();
            self.source.release();
            info!("camera released");
        }
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl Drop for HandTracker {
    fn drop(&mut self) {
        self.release();
    }
}

/// Build the tracker for `cfg.mode`.  `sim_rx` feeds the simulated hand and
/// is only consumed in `sim` mode.
pub fn open_tracker(cfg: &CameraConfig, sim_rx: Option<Receiver<SimInput>>) -> AppResult<Option<HandTracker>> {
    match cfg.mode {
        CameraMode::None => {
            info!("camera disabled, keyboard only");
            Ok(None)
        }
        CameraMode::Sim => {
            let rx = sim_rx.ok_or_else(|| AppError::Camera("simulated camera has no input channel".into()))?;
            info!("simulated camera: hold A / D to tilt the hand, H to show or hide it");
            let estimator = MarkerPoseEstimator::new(WRIST_MARKER, TIP_MARKER, MIN_MARKER_PIXELS)?;
            Ok(Some(HandTracker::new(
                Box::new(SimCamera::new(rx)),
                Box::new(estimator),
            )))
        }
        CameraMode::Udp => {
            let feed = UdpLandmarkFeed::bind(&cfg.feed_addr, cfg.frame_timeout())?;
            Ok(Some(HandTracker::new(
                Box::new(feed),
                Box::new(AnnotationPoseEstimator),
            )))
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SimCamera: keyboard-steered synthetic hand
// ════════════════════════════════════════════════════════════════════════════

/// Raw input from the window that drives the simulated hand.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimInput {
    /// Fingertip offset from the wrist in image space; `0.0` is upright.
    Tilt(f32),
    /// Toggle whether a hand is in view.
    ToggleHand,
}

/// How far a held `A`/`D` pushes the fingertip.
pub const SIM_TILT: f32 = 0.2;

pub const SIM_FRAME_W: usize = 160;
pub const SIM_FRAME_H: usize = 120;
const SIM_BG:            u32 = 0xFF202830;
pub const WRIST_MARKER:  u32 = 0xFF00FF00;
pub const TIP_MARKER:    u32 = 0xFFFF00FF;
const MARKER_HALF:     usize = 3;
const SIM_WRIST_Y:       f32 = 0.75;
const SIM_TIP_Y:         f32 = 0.30;

pub struct SimCamera {
    rx:         Receiver<SimInput>,
    tilt:       f32,
    hand_shown: bool,
    open:       bool,
}

impl SimCamera {
    pub fn new(rx: Receiver<SimInput>) -> Self {
        SimCamera { rx, tilt: 0.0, hand_shown: true, open: true }
    }

    fn drain_input(&mut self) {
        loop {
            match self.rx.try_recv() {
                Ok(SimInput::Tilt(t))    => self.tilt = t.clamp(-0.45, 0.45),
                Ok(SimInput::ToggleHand) => self.hand_shown = !self.hand_shown,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    debug!("simulated camera input closed");
                    self.open = false;
                    break;
                }
            }
        }
    }

    fn render(&self) -> Frame {
        let mut frame = Frame::blank(SIM_FRAME_W, SIM_FRAME_H, SIM_BG);
        if self.hand_shown {
            let wrist = Landmark::new(0.5, SIM_WRIST_Y);
            let tip = Landmark::new(0.5 + self.tilt, SIM_TIP_Y);
            draw_line(&mut frame, wrist, tip, 0xFFC8A080);
            draw_marker(&mut frame, wrist, WRIST_MARKER);
            draw_marker(&mut frame, tip, TIP_MARKER);
        }
        frame
    }
}

impl FrameSource for SimCamera {
    fn next_frame(&mut self) -> Option<Frame> {
        self.drain_input();
        if self.open { Some(self.render()) } else { None }
    }

    fn release(&mut self) {
        self.open = false;
    }
}

fn to_pixel(frame: &Frame, p: Landmark) -> (isize, isize) {
    ((p.x * frame.width as f32) as isize, (p.y * frame.height as f32) as isize)
}

fn put(frame: &mut Frame, x: isize, y: isize, color: u32) {
    if x >= 0 && y >= 0 && (x as usize) < frame.width && (y as usize) < frame.height {
        frame.pixels[y as usize * frame.width + x as usize] = color;
    }
}

fn draw_marker(frame: &mut Frame, p: Landmark, color: u32) {
    let (cx, cy) = to_pixel(frame, p);
    let r = MARKER_HALF as isize;
    for y in cy - r..=cy + r {
        for x in cx - r..=cx + r {
            put(frame, x, y, color);
        }
    }
}

fn draw_line(frame: &mut Frame, a: Landmark, b: Landmark, color: u32) {
    let (ax, ay) = to_pixel(frame, a);
    let (bx, by) = to_pixel(frame, b);
    let steps = (bx - ax).abs().max((by - ay).abs()).max(1);
    for i in 0..=steps {
        let x = ax + (bx - ax) * i / steps;
        let y = ay + (by - ay) * i / steps;
        put(frame, x, y, color);
        put(frame, x + 1, y, color);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// MarkerPoseEstimator: colour-blob centroids
// ════════════════════════════════════════════════════════════════════════════

/// Locates the wrist and index fingertip as the centroids of pixels painted
/// in their marker colours.
#[derive(Debug, Clone, Copy)]
pub struct MarkerPoseEstimator {
    pub wrist_color: u32,
    pub tip_color:   u32,
    /// Fewer matching pixels than this counts as "not seen".
    pub min_pixels:  usize,
}

const MIN_MARKER_PIXELS: usize = 4;

impl Default for MarkerPoseEstimator {
    fn default() -> Self {
        MarkerPoseEstimator { wrist_color: WRIST_MARKER, tip_color: TIP_MARKER, min_pixels: MIN_MARKER_PIXELS }
    }
}

impl MarkerPoseEstimator {
    /// Fails when the two markers cannot be told apart or `min_pixels` is 0.
    pub fn new(wrist_color: u32, tip_color: u32, min_pixels: usize) -> AppResult<Self> {
        if wrist_color == tip_color {
            return Err(AppError::PoseEstimator(format!(
                "wrist and fingertip share marker colour {:#010X}", wrist_color
            )));
        }
        if min_pixels == 0 {
            return Err(AppError::PoseEstimator("marker blobs need at least one pixel".into()));
        }
        Ok(MarkerPoseEstimator { wrist_color, tip_color, min_pixels })
    }

    fn centroid(&self, frame: &Frame, color: u32) -> Option<Landmark> {
        let (mut sx, mut sy, mut n) = (0usize, 0usize, 0usize);
        for (i, &px) in frame.pixels.iter().enumerate() {
            if px == color {
                sx += i % frame.width;
                sy += i / frame.width;
                n += 1;
            }
        }
        if n < self.min_pixels {
            return None;
        }
        Some(Landmark::new(
            sx as f32 / n as f32 / frame.width as f32,
            sy as f32 / n as f32 / frame.height as f32,
        ))
    }
}

impl PoseEstimator for MarkerPoseEstimator {
    fn detect(&mut self, frame: &Frame) -> Option<HandPose> {
        if !frame.has_image() {
            return None;
        }
        let wrist = self.centroid(frame, self.wrist_color)?;
        let tip = self.centroid(frame, self.tip_color)?;
        Some(HandPose::from_wrist_and_tip(wrist, tip))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// UdpLandmarkFeed: external estimator over UDP
// ════════════════════════════════════════════════════════════════════════════

/// One datagram: `{"landmarks": [[x, y], ...]}` or `{"landmarks": null}`.
#[derive(Debug, Deserialize)]
struct LandmarkPacket {
    landmarks: Option<Vec<Landmark>>,
}

const MAX_DATAGRAM: usize = 4096;

/// Receives landmark sets produced by a pose estimator running in another
/// process.  Each tick waits up to `timeout` for a datagram, then drains the
/// socket so only the newest one is used.
pub struct UdpLandmarkFeed {
    socket:  Option<UdpSocket>,
    timeout: Duration,
    buf:     Vec<u8>,
}

impl UdpLandmarkFeed {
    pub fn bind(addr: &str, timeout: Duration) -> AppResult<Self> {
        let socket = UdpSocket::bind(addr)
            .map_err(|e| AppError::Camera(format!("cannot bind landmark feed on {}: {}", addr, e)))?;
        socket.set_read_timeout(Some(timeout))
            .map_err(|e| AppError::Camera(format!("landmark feed timeout: {}", e)))?;
        info!(addr, timeout_ms = timeout.as_millis() as u64, "listening for landmark datagrams");
        Ok(UdpLandmarkFeed { socket: Some(socket), timeout, buf: vec![0; MAX_DATAGRAM] })
    }

    pub fn local_addr(&self) -> Option<std::net::SocketAddr> {
        self.socket.as_ref().and_then(|s| s.local_addr().ok())
    }

    fn recv_latest(&mut self) -> Option<usize> {
        let socket = self.socket.as_ref()?;
        let mut len = socket.recv(&mut self.buf).ok()?;

        // Anything else already queued is newer.
        if socket.set_nonblocking(true).is_ok() {
            while let Ok(n) = socket.recv(&mut self.buf) {
                len = n;
            }
            if let Err(e) = socket.set_nonblocking(false) {
                warn!("landmark feed stuck non-blocking: {}", e);
            }
            socket.set_read_timeout(Some(self.timeout)).ok();
        }
        Some(len)
    }
}

impl FrameSource for UdpLandmarkFeed {
    fn next_frame(&mut self) -> Option<Frame> {
        let len = self.recv_latest()?;
        let packet: LandmarkPacket = match serde_json::from_slice(&self.buf[..len]) {
            Ok(p) => p,
            Err(e) => {
                debug!("dropping malformed landmark datagram: {}", e);
                return None;
            }
        };
        Some(Frame { width: 0, height: 0, pixels: Vec::new(), annotation: packet.landmarks })
    }

    fn release(&mut self) {
        self.socket = None;
    }
}

/// Passes through the landmarks carried on the frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnnotationPoseEstimator;

impl PoseEstimator for AnnotationPoseEstimator {
    fn detect(&mut self, frame: &Frame) -> Option<HandPose> {
        let pose = HandPose::from_landmarks(frame.annotation.clone()?);
        if pose.is_none() {
            debug!("landmark set lacks ids {} and {}", WRIST, INDEX_TIP);
        }
        pose
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::{GestureClassifier, GestureEvent};
    use std::cell::Cell;
    use std::rc::Rc;
    use std::sync::mpsc;

    fn sim() -> (mpsc::Sender<SimInput>, SimCamera) {
        let (tx, rx) = mpsc::channel();
        (tx, SimCamera::new(rx))
    }

    // ── SimCamera + MarkerPoseEstimator ───────────────────────────────────
    #[test]
    fn upright_sim_hand_is_neutral() {
        let (_tx, mut cam) = sim();
        let frame = cam.next_frame().unwrap();
        let pose = MarkerPoseEstimator::default().detect(&frame).unwrap();
        assert!(pose.dx().abs() < 0.02);
        assert!((pose.wrist().y - SIM_WRIST_Y).abs() < 0.03);
    }

    #[test]
    fn tilted_sim_hand_classifies() {
        let (tx, mut cam) = sim();
        let mut est = MarkerPoseEstimator::default();
        let mut c = GestureClassifier::new();

        tx.send(SimInput::Tilt(SIM_TILT)).unwrap();
        let pose = est.detect(&cam.next_frame().unwrap());
        assert_eq!(c.classify(pose.as_ref()), GestureEvent::Left);

        tx.send(SimInput::Tilt(-SIM_TILT)).unwrap();
        let pose = est.detect(&cam.next_frame().unwrap());
        assert_eq!(c.classify(pose.as_ref()), GestureEvent::Right);
    }

    #[test]
    fn hidden_sim_hand_is_not_detected() {
        let (tx, mut cam) = sim();
        tx.send(SimInput::ToggleHand).unwrap();
        let frame = cam.next_frame().unwrap();
        assert!(MarkerPoseEstimator::default().detect(&frame).is_none());
    }

    #[test]
    fn only_the_latest_tilt_counts() {
        let (tx, mut cam) = sim();
        tx.send(SimInput::Tilt(SIM_TILT)).unwrap();
        tx.send(SimInput::Tilt(0.0)).unwrap();
        let pose = MarkerPoseEstimator::default().detect(&cam.next_frame().unwrap()).unwrap();
        assert!(pose.dx().abs() < 0.02);
    }

    #[test]
    fn closed_channel_stops_frames() {
        let (tx, mut cam) = sim();
        drop(tx);
        assert!(cam.next_frame().is_none());
    }

    #[test]
    fn marker_estimator_ignores_imageless_frames() {
        let frame = Frame { width: 0, height: 0, pixels: vec![], annotation: None };
        assert!(MarkerPoseEstimator::default().detect(&frame).is_none());
    }

    // ── HandTracker ───────────────────────────────────────────────────────
    struct Scripted(Vec<Option<Frame>>);

    impl FrameSource for Scripted {
        fn next_frame(&mut self) -> Option<Frame> {
            if self.0.is_empty() { None } else { self.0.remove(0) }
        }
    }

    #[test]
    fn tracker_detects_on_the_sampled_frame() {
        let hand = vec![Landmark::new(0.5, 0.5); 9];
        let mut with_hand = Frame::blank(1, 1, 0);
        with_hand.annotation = Some(hand);
        let mut t = HandTracker::new(
            Box::new(Scripted(vec![Some(with_hand), None, Some(Frame::blank(1, 1, 0))])),
            Box::new(AnnotationPoseEstimator),
        );
        assert!(t.sample().1.is_some());
        assert_eq!(t.sample(), (None, None));
        let (frame, pose) = t.sample();
        assert!(frame.is_some() && pose.is_none());
    }

    #[test]
    fn released_tracker_yields_nothing() {
        let (_tx, cam) = sim();
        let mut t = HandTracker::new(Box::new(cam), Box::new(MarkerPoseEstimator::default()));
        assert!(t.sample().0.is_some());
        t.release();
        t.release();
        assert!(t.is_released());
        assert_eq!(t.sample(), (None, None));
    }

    struct Flagged {
        released: Rc<Cell<bool>>,
    }

    impl FrameSource for Flagged {
        fn next_frame(&mut self) -> Option<Frame> {
            Some(Frame::blank(1, 1, 0))
        }

        fn release(&mut self) {
            self.released.set(true);
        }
    }

    struct Closing {
        closed: Rc<Cell<u32>>,
    }

    impl PoseEstimator for Closing {
        fn detect(&mut self, _: &Frame) -> Option<HandPose> {
            None
        }

        fn close(&mut self) {
            self.closed.set(self.closed.get() + 1);
        }
    }

    fn flagged_tracker() -> (HandTracker, Rc<Cell<bool>>, Rc<Cell<u32>>) {
        let released = Rc::new(Cell::new(false));
        let closed = Rc::new(Cell::new(0));
        let t = HandTracker::new(
            Box::new(Flagged { released: released.clone() }),
            Box::new(Closing { closed: closed.clone() }),
        );
        (t, released, closed)
    }

    #[test]
    fn dropping_tracker_releases_source_and_closes_estimator() {
        let (mut t, released, closed) = flagged_tracker();
        assert!(t.sample().0.is_some());
        drop(t);
        assert!(released.get());
        assert_eq!(closed.get(), 1);
    }

    #[test]
    fn drop_after_release_closes_once() {
        let (mut t, _, closed) = flagged_tracker();
        t.release();
        drop(t);
        assert_eq!(closed.get(), 1);
    }

    #[test]
    fn dry_tick_counter_saturates() {
        let mut t = HandTracker::new(Box::new(Scripted(vec![])), Box::new(AnnotationPoseEstimator));
        t.dry_ticks = u32::MAX;
        assert_eq!(t.sample(), (None, None));
        assert_eq!(t.dry_ticks, u32::MAX);
    }

    #[test]
    fn marker_estimator_rejects_indistinct_markers() {
        assert!(matches!(
            MarkerPoseEstimator::new(WRIST_MARKER, WRIST_MARKER, 4),
            Err(AppError::PoseEstimator(_))
        ));
        assert!(matches!(
            MarkerPoseEstimator::new(WRIST_MARKER, TIP_MARKER, 0),
            Err(AppError::PoseEstimator(_))
        ));
        let est = MarkerPoseEstimator::new(WRIST_MARKER, TIP_MARKER, MIN_MARKER_PIXELS).unwrap();
        assert_eq!(est.min_pixels, MarkerPoseEstimator::default().min_pixels);
    }

    #[test]
    fn open_tracker_none_mode_is_keyboard_only() {
        let cfg = CameraConfig { mode: CameraMode::None, ..CameraConfig::default() };
        assert!(open_tracker(&cfg, None).unwrap().is_none());
    }

    #[test]
    fn open_tracker_sim_mode_needs_a_channel() {
        let cfg = CameraConfig::default();
        assert!(matches!(open_tracker(&cfg, None), Err(AppError::Camera(_))));
    }

    // ── UdpLandmarkFeed ───────────────────────────────────────────────────
    fn feed() -> (UdpLandmarkFeed, UdpSocket) {
        let feed = UdpLandmarkFeed::bind("127.0.0.1:0", Duration::from_millis(200)).unwrap();
        let sender = UdpSocket::bind("127.0.0.1:0").unwrap();
        sender.connect(feed.local_addr().unwrap()).unwrap();
        (feed, sender)
    }

    #[test]
    fn udp_feed_times_out_to_none() {
        let mut feed = UdpLandmarkFeed::bind("127.0.0.1:0", Duration::from_millis(5)).unwrap();
        assert!(feed.next_frame().is_none());
    }

    #[test]
    fn udp_feed_carries_landmarks() {
        let (mut feed, tx) = feed();
        let pts: Vec<[f32; 2]> = (0..21).map(|i| [i as f32 / 20.0, 0.5]).collect();
        tx.send(serde_json::json!({ "landmarks": pts }).to_string().as_bytes()).unwrap();

        let frame = feed.next_frame().unwrap();
        let pose = AnnotationPoseEstimator.detect(&frame).unwrap();
        assert_eq!(pose.index_tip(), Landmark::new(0.4, 0.5));
    }

    #[test]
    fn udp_feed_keeps_only_the_newest_datagram() {
        let (mut feed, tx) = feed();
        for x in [0.1_f32, 0.2, 0.3] {
            let pts: Vec<[f32; 2]> = (0..21).map(|_| [x, 0.5]).collect();
            tx.send(serde_json::json!({ "landmarks": pts }).to_string().as_bytes()).unwrap();
        }
        // Let all three land in the socket buffer before the tick reads.
        std::thread::sleep(Duration::from_millis(20));

        let frame = feed.next_frame().unwrap();
        let pose = AnnotationPoseEstimator.detect(&frame).unwrap();
        assert_eq!(pose.wrist().x, 0.3);
        // Nothing stale left over for the next tick.
        assert!(feed.next_frame().is_none());
    }

    #[test]
    fn udp_feed_accepts_xyz_landmarks() {
        let (mut feed, tx) = feed();
        let pts: Vec<[f32; 3]> = (0..21).map(|i| [i as f32 / 20.0, 0.5, -0.02]).collect();
        tx.send(serde_json::json!({ "landmarks": pts }).to_string().as_bytes()).unwrap();

        let pose = AnnotationPoseEstimator.detect(&feed.next_frame().unwrap()).unwrap();
        assert_eq!(pose.index_tip(), Landmark::new(0.4, 0.5));
    }

    #[test]
    fn udp_feed_null_hand() {
        let (mut feed, tx) = feed();
        tx.send(br#"{"landmarks": null}"#).unwrap();
        let frame = feed.next_frame().unwrap();
        assert!(AnnotationPoseEstimator.detect(&frame).is_none());
    }

    #[test]
    fn udp_feed_drops_garbage() {
        let (mut feed, tx) = feed();
        tx.send(b"not json").unwrap();
        assert!(feed.next_frame().is_none());
    }

    #[test]
    fn udp_bind_failure_is_a_camera_error() {
        let taken = UdpSocket::bind("127.0.0.1:0").unwrap();
        let addr = taken.local_addr().unwrap().to_string();
        assert!(matches!(
            UdpLandmarkFeed::bind(&addr, Duration::from_millis(5)),
            Err(AppError::Camera(_))
        ));
    }
}
