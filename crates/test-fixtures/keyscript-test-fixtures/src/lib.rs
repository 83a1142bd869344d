//! Shared fixtures for keyscript tests: recorded scripts, the scene layouts
//! they were recorded against, and throwaway directories for save tests.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../../../fixtures/manifest.json"))
        .expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    scripts: HashMap<String, ScriptEntry>,
    scenes: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct ScriptEntry {
    path: String,
    /// Scene layout the script was recorded against.
    scene: String,
}

/// Absolute path of a file named relative to `fixtures/`.
fn fixture_file(rel: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../../fixtures")
        .join(rel)
}

fn script_entry(name: &str) -> Result<&'static ScriptEntry> {
    MANIFEST
        .scripts
        .get(name)
        .ok_or_else(|| anyhow!("unknown script fixture '{name}'"))
}

pub mod scripts {
    use super::*;

    pub fn path(name: &str) -> Result<PathBuf> {
        Ok(fixture_file(&script_entry(name)?.path))
    }

    /// Raw script text, exactly as stored on disk.
    pub fn text(name: &str) -> Result<String> {
        let path = path(name)?;
        fs::read_to_string(&path)
            .with_context(|| format!("failed to read script fixture {}", path.display()))
    }

    pub fn scene_name(name: &str) -> Result<String> {
        Ok(script_entry(name)?.scene.clone())
    }
}

pub mod scenes {
    use super::*;

    /// Deserialize the scene layout registered under `name`.
    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let rel = MANIFEST
            .scenes
            .get(name)
            .ok_or_else(|| anyhow!("unknown scene fixture '{name}'"))?;
        let path = fixture_file(rel);
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read scene fixture {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("scene fixture '{name}' is not valid"))
    }
}

/// Fresh scratch directory under the system temp dir, unique per call.
pub fn scratch_dir(tag: &str) -> Result<PathBuf> {
    use std::sync::atomic::{AtomicUsize, Ordering};
    static NEXT: AtomicUsize = AtomicUsize::new(0);

    let n = NEXT.fetch_add(1, Ordering::Relaxed);
    let dir = std::env::temp_dir().join(format!(
        "keyscript-{tag}-{}-{n}",
        std::process::id()
    ));
    if dir.exists() {
        fs::remove_dir_all(&dir)
            .with_context(|| format!("failed to clear scratch dir {}", dir.display()))?;
    }
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create scratch dir {}", dir.display()))?;
    Ok(dir)
}
