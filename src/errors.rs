// SPDX-License-Identifier: MPL-2.0

//! Error types for the photobooth core
//!
//! Every error is scoped to the single operation in flight; none is fatal
//! to the process. Local state is left untouched when an operation fails so
//! callers never have to assume a partial mutation was committed.

use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Input validation errors (recovered locally, no state change)
    Validation(ValidationError),
    /// Camera feed errors during capture
    Capture(CaptureError),
    /// Capture session command errors
    Session(SessionError),
    /// Backend persistence errors
    Persistence(PersistenceError),
    /// Strip rendering / encoding errors
    Export(ExportError),
    /// Configuration errors
    Config(String),
    /// Storage/filesystem errors
    Storage(String),
}

/// Validation errors for user-supplied input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Publish title is empty
    EmptyTitle,
    /// A filter adjustment level could not be parsed
    MalformedAdjustment(String),
}

/// Camera feed errors
///
/// A failed capture never crashes the session; the shot count simply does
/// not advance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// The camera feed is not ready to produce frames
    FeedNotReady,
    /// The feed produced no frame at shot time
    NoFrameAvailable,
    /// Backend-specific capture failure
    CaptureFailed(String),
}

/// Capture session command errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// A countdown or capture is already in flight
    SequenceActive,
    /// The session already holds a full set of shots
    SessionFull,
    /// Finalize called before the session is complete
    NotComplete,
    /// A publish or export is pending; commands are disabled
    Busy,
    /// The sequence aborted after repeated capture failures
    SequenceStalled { shot_index: usize, attempts: u32 },
}

/// Backend persistence errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// Transport-level failure (network, backend down)
    Transport(String),
    /// The backend rejected the mutation
    Rejected(String),
    /// Uniqueness conflict: a record already exists for the (photo, user) pair
    Conflict,
    /// The referenced record no longer exists
    NotFound,
}

/// Strip rendering and encoding errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    /// The session holds no shots to render
    NothingToRender,
    /// A shot buffer did not match its declared dimensions
    BadFrame(String),
    /// Image encoding failed
    EncodingFailed(String),
    /// Saving the encoded image failed
    SaveFailed(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(e) => write!(f, "Validation error: {}", e),
            AppError::Capture(e) => write!(f, "Capture error: {}", e),
            AppError::Session(e) => write!(f, "Session error: {}", e),
            AppError::Persistence(e) => write!(f, "Persistence error: {}", e),
            AppError::Export(e) => write!(f, "Export error: {}", e),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyTitle => write!(f, "Please enter a title"),
            ValidationError::MalformedAdjustment(msg) => {
                write!(f, "Malformed adjustment level: {}", msg)
            }
        }
    }
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::FeedNotReady => write!(f, "Camera feed is not ready"),
            CaptureError::NoFrameAvailable => write!(f, "No frame available for capture"),
            CaptureError::CaptureFailed(msg) => write!(f, "Capture failed: {}", msg),
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::SequenceActive => write!(f, "A capture sequence is already running"),
            SessionError::SessionFull => write!(f, "Session already holds a full set of shots"),
            SessionError::NotComplete => write!(f, "Session is not complete"),
            SessionError::Busy => write!(f, "A publish or export is still pending"),
            SessionError::SequenceStalled {
                shot_index,
                attempts,
            } => write!(
                f,
                "Capture sequence stalled at shot {} after {} attempts",
                shot_index, attempts
            ),
        }
    }
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Transport(msg) => write!(f, "Transport error: {}", msg),
            PersistenceError::Rejected(msg) => write!(f, "Mutation rejected: {}", msg),
            PersistenceError::Conflict => {
                write!(f, "A reaction already exists for this photo and user")
            }
            PersistenceError::NotFound => write!(f, "Record not found"),
        }
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::NothingToRender => write!(f, "No shots to render"),
            ExportError::BadFrame(msg) => write!(f, "Bad frame: {}", msg),
            ExportError::EncodingFailed(msg) => write!(f, "Encoding failed: {}", msg),
            ExportError::SaveFailed(msg) => write!(f, "Save failed: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for ValidationError {}
impl std::error::Error for CaptureError {}
impl std::error::Error for SessionError {}
impl std::error::Error for PersistenceError {}
impl std::error::Error for ExportError {}

// Conversions from sub-errors to AppError
impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err)
    }
}

impl From<CaptureError> for AppError {
    fn from(err: CaptureError) -> Self {
        AppError::Capture(err)
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        AppError::Session(err)
    }
}

impl From<PersistenceError> for AppError {
    fn from(err: PersistenceError) -> Self {
        AppError::Persistence(err)
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        AppError::Export(err)
    }
}

// Conversions for I/O errors
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::SaveFailed(err.to_string())
    }
}
