//! Error types for the game front-end.
//!
//! Only startup and persistence can fail.  Sensor hiccups during play are not
//! errors: they degrade the tick's gesture to `GestureEvent::None`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// The window could not be created.
    #[error("Window error: {0}")]
    Window(String),

    /// The frame source could not be opened.
    #[error("Camera unavailable: {0}")]
    Camera(String),

    /// The pose estimator could not be initialized.
    #[error("Pose estimator unavailable: {0}")]
    PoseEstimator(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
