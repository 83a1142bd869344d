//! Error types for keyframe scripts

use std::path::PathBuf;

/// Boxed error produced by a [`Frame`](crate::frame::Frame) collaborator.
pub type FrameError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised by the frame store, the persistence adapter and config loading.
///
/// Empty-sequence and boundary conditions are never reported here: those
/// degrade to no-ops. Only contract violations and collaborator failures are.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum ScriptError {
    /// `advance` was called while the cursor was undefined or on the last frame.
    #[error("cannot advance past frame {frame} of {count}")]
    CannotAdvance { frame: usize, count: usize },

    /// Interpolation was requested without the four surrounding context frames.
    #[error("insufficient context to interpolate at frame {frame} ({count} frames stored)")]
    InsufficientContext { frame: usize, count: usize },

    /// Filesystem failure while reading or writing a script.
    #[error("IO error on {}: {reason}", .path.display())]
    Io { path: PathBuf, reason: String },

    /// A persisted line could not be turned back into a frame.
    #[error("failed to decode frame on line {line}: {source}")]
    Decode {
        line: usize,
        #[source]
        source: FrameError,
    },

    /// The scene refused to produce a frame.
    #[error("failed to capture frame from scene: {source}")]
    Capture {
        #[source]
        source: FrameError,
    },

    /// Invalid configuration document.
    #[error("invalid configuration: {reason}")]
    Config { reason: String },
}

impl ScriptError {
    pub(crate) fn io(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            reason: err.to_string(),
        }
    }

    /// True for caller contract violations (as opposed to collaborator or IO failures).
    #[inline]
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::CannotAdvance { .. } | Self::InsufficientContext { .. }
        )
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::CannotAdvance { .. } | Self::InsufficientContext { .. } => "cursor",
            Self::Io { .. } => "io",
            Self::Decode { .. } | Self::Capture { .. } => "frame",
            Self::Config { .. } => "config",
        }
    }
}

impl From<serde_json::Error> for ScriptError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precondition_errors_are_flagged() {
        let err = ScriptError::InsufficientContext { frame: 2, count: 3 };
        assert!(err.is_precondition());
        assert_eq!(err.category(), "cursor");

        let err = ScriptError::Config {
            reason: "bad".into(),
        };
        assert!(!err.is_precondition());
        assert_eq!(err.category(), "config");
    }

    #[test]
    fn decode_error_keeps_source() {
        let source: FrameError = "not a pose".into();
        let err = ScriptError::Decode { line: 4, source };
        assert_eq!(err.to_string(), "failed to decode frame on line 4: not a pose");
        assert!(std::error::Error::source(&err).is_some());
    }
}
