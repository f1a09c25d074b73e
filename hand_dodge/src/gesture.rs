//! Gesture classification: one hand pose in, one directional event out.
//!
//! The classifier looks at the horizontal offset between the index fingertip
//! and the wrist.  Every tick is judged on its own sample: no smoothing, no
//! hold counters.  Flicker across the dead zone shows up as flicker in the
//! output.
//!
//! Camera frames arrive mirrored, so a fingertip to the *right* of the wrist
//! in image space means the player is pointing *left*.

use serde::Deserialize;

// ════════════════════════════════════════════════════════════════════════════
// Landmarks
// ════════════════════════════════════════════════════════════════════════════

pub const WRIST:     usize = 0;
pub const INDEX_TIP: usize = 8;

/// Landmarks in one complete hand skeleton.
pub const HAND_LANDMARKS: usize = 21;

/// Half-width of the dead zone around `dx = 0`.
pub const DEAD_ZONE: f32 = 0.1;

/// A normalized image-space point, both axes in `[0, 1]`.
///
/// Deserializes from `[x, y]`; any further components (depth from 3-D
/// estimators) are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(try_from = "Vec<f32>")]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Landmark { x, y }
    }
}

impl TryFrom<Vec<f32>> for Landmark {
    type Error = String;

    fn try_from(v: Vec<f32>) -> Result<Self, Self::Error> {
        match v.as_slice() {
            [x, y, ..] => Ok(Landmark { x: *x, y: *y }),
            _ => Err(format!("landmark needs x and y, got {} value(s)", v.len())),
        }
    }
}

/// One detected hand, indexed by anatomical landmark id.
///
/// Construction guarantees that [`WRIST`] and [`INDEX_TIP`] are present.
#[derive(Clone, Debug, PartialEq)]
pub struct HandPose {
    landmarks: Vec<Landmark>,
}

impl HandPose {
    /// `None` when the set is too short to contain the index fingertip.
    pub fn from_landmarks(landmarks: Vec<Landmark>) -> Option<Self> {
        if landmarks.len() > INDEX_TIP {
            Some(HandPose { landmarks })
        } else {
            None
        }
    }

    /// Minimal pose carrying only the two landmarks the classifier reads;
    /// the ids in between sit on the wrist.
    pub fn from_wrist_and_tip(wrist: Landmark, index_tip: Landmark) -> Self {
        let mut landmarks = vec![wrist; INDEX_TIP + 1];
        landmarks[INDEX_TIP] = index_tip;
        HandPose { landmarks }
    }

    pub fn get(&self, id: usize) -> Option<Landmark> {
        self.landmarks.get(id).copied()
    }

    pub fn wrist(&self)     -> Landmark { self.landmarks[WRIST] }
    pub fn index_tip(&self) -> Landmark { self.landmarks[INDEX_TIP] }

    /// Horizontal fingertip offset from the wrist.
    pub fn dx(&self) -> f32 {
        self.index_tip().x - self.wrist().x
    }
}

// ════════════════════════════════════════════════════════════════════════════
// GestureEvent
// ════════════════════════════════════════════════════════════════════════════

/// The control signal for one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureEvent {
    Left,
    Right,
    None,
}

impl GestureEvent {
    /// `-1` for left, `+1` for right, `0` otherwise.
    pub fn direction(self) -> f32 {
        match self {
            GestureEvent::Left  => -1.0,
            GestureEvent::Right =>  1.0,
            GestureEvent::None  =>  0.0,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// GestureClassifier
// ════════════════════════════════════════════════════════════════════════════

/// Maps an optional hand pose to a [`GestureEvent`] and remembers the last
/// directional one for the on-screen hint.
#[derive(Debug, Default)]
pub struct GestureClassifier {
    last_gesture: Option<GestureEvent>,
}

impl GestureClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classify(&mut self, pose: Option<&HandPose>) -> GestureEvent {
        let event = match pose {
            Some(p) if p.dx() > DEAD_ZONE  => GestureEvent::Left,
            Some(p) if p.dx() < -DEAD_ZONE => GestureEvent::Right,
            _                              => GestureEvent::None,
        };
        // An ambiguous pose wipes the hint just like a missing hand.
        self.last_gesture = match event {
            GestureEvent::None => None,
            directional        => Some(directional),
        };
        event
    }

    /// Most recent `Left`/`Right`, or `None` if the last sample was neutral.
    pub fn last_gesture(&self) -> Option<GestureEvent> {
        self.last_gesture
    }

    pub fn clear(&mut self) {
        self.last_gesture = None;
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
