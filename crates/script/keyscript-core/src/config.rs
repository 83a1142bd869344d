//! Configuration for keyframe scripts and playback.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ScriptError;

/// What to do when a context frame falls outside the sequence.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContextPolicy {
    /// Substitute the nearest existing frame (at ordinal 0, `prev` is `first`).
    #[default]
    Clamp,
    /// Refuse with `ScriptError::InsufficientContext`.
    Strict,
}

/// Playback timing.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PlaybackConfig {
    /// Time spent travelling between two adjacent keyframes.
    pub ms_between_keyframes: u32,
    pub frames_per_second: u32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            ms_between_keyframes: 2000,
            frames_per_second: 60,
        }
    }
}

/// Top-level configuration. Missing fields take their defaults.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ScriptConfig {
    /// Where the script is loaded from and saved to.
    pub script_path: PathBuf,
    pub context_policy: ContextPolicy,
    pub playback: PlaybackConfig,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            script_path: PathBuf::from("script.txt"),
            context_policy: ContextPolicy::Clamp,
            playback: PlaybackConfig::default(),
        }
    }
}

impl ScriptConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ScriptError> {
        let cfg: ScriptConfig = serde_json::from_str(s)?;
        if cfg.playback.ms_between_keyframes == 0 {
            return Err(ScriptError::Config {
                reason: "playback.ms_between_keyframes must be > 0".into(),
            });
        }
        if cfg.playback.frames_per_second == 0 {
            return Err(ScriptError::Config {
                reason: "playback.frames_per_second must be > 0".into(),
            });
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = ScriptConfig::from_json_str(r#"{ "context_policy": "strict" }"#).unwrap();
        assert_eq!(cfg.context_policy, ContextPolicy::Strict);
        assert_eq!(cfg.script_path, PathBuf::from("script.txt"));
        assert_eq!(cfg.playback.ms_between_keyframes, 2000);
    }

    #[test]
    fn rejects_unknown_fields_and_zero_timing() {
        assert!(ScriptConfig::from_json_str(r#"{ "bogus": 1 }"#).is_err());
        let err = ScriptConfig::from_json_str(r#"{ "playback": { "ms_between_keyframes": 0 } }"#)
            .unwrap_err();
        assert_eq!(err.category(), "config");
    }
}
