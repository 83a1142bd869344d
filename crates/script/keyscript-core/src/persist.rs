//! Script files: one serialized frame per line, in sequence order, each line
//! terminated by `'\n'`.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::{debug, info};

use crate::config::ScriptConfig;
use crate::error::ScriptError;
use crate::frame::Frame;
use crate::store::FrameStore;

/// Decode script text against `scene`. Line numbers in errors are 1-based.
pub fn parse_script<F: Frame>(text: &str, scene: &F::Scene) -> Result<FrameStore<F>, ScriptError> {
    let mut frames = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let frame = F::deserialize_from_text(scene, line).map_err(|e| ScriptError::Decode {
            line: i + 1,
            source: Box::new(e),
        })?;
        frames.push(frame);
    }
    Ok(FrameStore::from_frames(frames))
}

/// Load a script from `path`. A missing file yields an empty store.
pub fn load_script<F: Frame>(
    path: impl AsRef<Path>,
    scene: &F::Scene,
) -> Result<FrameStore<F>, ScriptError> {
    let path = path.as_ref();
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!(
                "no script file found at {}; starting with an empty script",
                path.display()
            );
            return Ok(FrameStore::new());
        }
        Err(e) => return Err(ScriptError::io(path, &e)),
    };
    let store = parse_script(&text, scene)?;
    debug!("loaded {} frames from {}", store.count(), path.display());
    Ok(store)
}

/// Load the script named by `cfg.script_path` and apply the configured
/// context policy.
pub fn load_configured<F: Frame>(
    cfg: &ScriptConfig,
    scene: &F::Scene,
) -> Result<FrameStore<F>, ScriptError> {
    Ok(load_script(&cfg.script_path, scene)?.with_config(cfg))
}

impl<F: Frame> FrameStore<F> {
    pub fn to_script_text(&self) -> String {
        let mut out = String::new();
        for frame in self.frames() {
            out.push_str(&frame.serialize_to_text());
            out.push('\n');
        }
        out
    }

    /// Write every frame to `path`, replacing whatever was there.
    pub fn save_script(&self, path: impl AsRef<Path>) -> Result<(), ScriptError> {
        let path = path.as_ref();
        fs::write(path, self.to_script_text()).map_err(|e| ScriptError::io(path, &e))?;
        debug!("saved {} frames to {}", self.count(), path.display());
        Ok(())
    }
}
