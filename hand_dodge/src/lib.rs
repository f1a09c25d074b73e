//! # hand_dodge
//!
//! Steer a disc left and right with a tilted hand (or the arrow keys) and dodge
//! the bars falling down the play area.  The obstacle simulation lives in
//! [`dodge_sim`]; this crate adds hand tracking, the window and the menus.
//!
//! ## Hand → Action mapping
//!
//! The camera image is mirrored, so the horizontal offset of the index
//! fingertip from the wrist reads the other way round on screen.
//!
//! | `index_tip.x - wrist.x` | Gesture | Action |
//! |---|---|---|
//! | `> 0.1` | Left | Move 5 px left per frame |
//! | `< -0.1` | Right | Move 5 px right per frame |
//! | otherwise / no hand | None | Hint box cleared |
//!
//! Arrow keys work at the same time and add to the gesture.
//!
//! ## Camera modes
//!
//! * `sim` (default): a synthetic camera image with two coloured markers.
//! * `udp`: hand landmarks sent as JSON datagrams by an external tracker.
//! * `none`: keyboard only.
//!
//! ### Simulated hand shortcuts
//!
//! | Key | Effect |
//! |---|---|
//! | `A` / hold | Tilt hand left |
//! | `D` / hold | Tilt hand right |
//! | `H` | Show / hide the hand |
//! | `Escape` | Quit |

pub mod app;
pub mod camera;
pub mod config;
pub mod error;
pub mod gesture;
pub mod input;
pub mod layout;
pub mod logging;
pub mod snapshot;
pub mod visualizer;
