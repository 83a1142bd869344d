//! Keyscript Core (scene-agnostic)
//!
//! Keyframe sequencing for a scene editor: an ordered script of saved poses
//! with a cursor for navigation and cursor-relative editing, four-point
//! Catmull-Rom interpolation for in-between poses, line-per-frame
//! persistence and a playback clock. Poses are opaque behind the [`Frame`]
//! trait; [`pose`] ships a rigid-body implementation.

pub mod config;
pub mod cursor;
pub mod error;
pub mod frame;
pub mod interp;
pub mod persist;
pub mod playback;
pub mod pose;
pub mod store;

// Re-exports for consumers (scene adapters)
pub use config::{ContextPolicy, PlaybackConfig, ScriptConfig};
pub use cursor::Cursor;
pub use error::{FrameError, ScriptError};
pub use frame::Frame;
pub use interp::{interpolate, interpolate_frames, ContextFrames, Quat, Spline};
pub use persist::{load_configured, load_script, parse_script};
pub use playback::{Playback, PlaybackState};
pub use pose::{PoseError, PoseFrame, Rbt, Scene};
pub use store::FrameStore;

/// Keyscript result type
pub type Result<T> = core::result::Result<T, ScriptError>;
