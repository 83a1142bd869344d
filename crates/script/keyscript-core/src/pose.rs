//! Rigid-body pose frames over a flat scene of named transform nodes.
//!
//! A [`PoseFrame`] is the list of every node's rigid-body transform, in scene
//! order. One frame serializes to a single line of JSON.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::frame::Frame;
use crate::interp::{Quat, Spline};

/// Rigid-body transform: rotation followed by translation.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Rbt {
    pub translation: [f32; 3],
    pub rotation: Quat,
}

impl Rbt {
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn new(translation: [f32; 3], rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    pub fn approx_eq(&self, other: &Rbt, eps: f32) -> bool {
        self.translation
            .iter()
            .zip(other.translation.iter())
            .all(|(a, b)| (a - b).abs() <= eps)
            && self.rotation.same_rotation(&other.rotation, eps)
    }

    pub fn is_finite(&self) -> bool {
        self.translation.iter().all(|v| v.is_finite())
            && self.rotation.0.iter().all(|v| v.is_finite())
    }
}

impl Spline for Rbt {
    fn catmull_rom(prev: &Self, first: &Self, second: &Self, after: &Self, alpha: f32) -> Self {
        Rbt {
            translation: <[f32; 3]>::catmull_rom(
                &prev.translation,
                &first.translation,
                &second.translation,
                &after.translation,
                alpha,
            ),
            rotation: Quat::catmull_rom(
                &prev.rotation,
                &first.rotation,
                &second.rotation,
                &after.rotation,
                alpha,
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
    pub name: String,
    pub rbt: Rbt,
}

/// Live scene: named transform nodes in a fixed order.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    nodes: Vec<SceneNode>,
    index: HashMap<String, usize>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node (or reset an existing one) and return its position.
    pub fn add_node(&mut self, name: impl Into<String>, rbt: Rbt) -> usize {
        let name = name.into();
        if let Some(&i) = self.index.get(&name) {
            self.nodes[i].rbt = rbt;
            return i;
        }
        let i = self.nodes.len();
        self.index.insert(name.clone(), i);
        self.nodes.push(SceneNode { name, rbt });
        i
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, name: &str) -> Option<&SceneNode> {
        self.index.get(name).map(|&i| &self.nodes[i])
    }

    pub fn rbt(&self, name: &str) -> Option<&Rbt> {
        self.node(name).map(|n| &n.rbt)
    }

    /// Returns false when no node is called `name`.
    pub fn set_rbt(&mut self, name: &str, rbt: Rbt) -> bool {
        match self.index.get(name) {
            Some(&i) => {
                self.nodes[i].rbt = rbt;
                true
            }
            None => false,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum PoseError {
    #[error("scene has no transform nodes to capture")]
    EmptyScene,
    #[error("frame holds {found} transforms but the scene has {expected} nodes")]
    NodeCountMismatch { expected: usize, found: usize },
    #[error("node '{node}' has a non-finite transform")]
    NonFinite { node: String },
    #[error("malformed frame line: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Transforms of every scene node, in scene order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PoseFrame {
    rbts: Vec<Rbt>,
}

impl PoseFrame {
    pub fn from_rbts(rbts: Vec<Rbt>) -> Self {
        Self { rbts }
    }

    pub fn rbts(&self) -> &[Rbt] {
        &self.rbts
    }

    pub fn approx_eq(&self, other: &PoseFrame, eps: f32) -> bool {
        self.rbts.len() == other.rbts.len()
            && self
                .rbts
                .iter()
                .zip(other.rbts.iter())
                .all(|(a, b)| a.approx_eq(b, eps))
    }
}

impl Spline for PoseFrame {
    fn catmull_rom(prev: &Self, first: &Self, second: &Self, after: &Self, alpha: f32) -> Self {
        let n = first.rbts.len();
        if [prev, second, after].iter().any(|f| f.rbts.len() != n) {
            // Fallback: frames from different scenes, keep the left key.
            return first.clone();
        }
        let rbts = (0..n)
            .map(|i| {
                Rbt::catmull_rom(
                    &prev.rbts[i],
                    &first.rbts[i],
                    &second.rbts[i],
                    &after.rbts[i],
                    alpha,
                )
            })
            .collect();
        PoseFrame { rbts }
    }
}

impl Frame for PoseFrame {
    type Scene = Scene;
    type Error = PoseError;

    fn capture(scene: &Scene) -> Result<Self, PoseError> {
        if scene.is_empty() {
            return Err(PoseError::EmptyScene);
        }
        // JSON has no encoding for NaN or infinity.
        if let Some(bad) = scene.nodes.iter().find(|n| !n.rbt.is_finite()) {
            return Err(PoseError::NonFinite {
                node: bad.name.clone(),
            });
        }
        Ok(PoseFrame {
            rbts: scene.nodes.iter().map(|n| n.rbt).collect(),
        })
    }

    fn apply(&self, scene: &mut Scene) {
        // Extra transforms are ignored; nodes past the frame keep their pose.
        for (node, rbt) in scene.nodes.iter_mut().zip(self.rbts.iter()) {
            node.rbt = *rbt;
        }
    }

    fn serialize_to_text(&self) -> String {
        // Serializing floats never fails; a non-finite value is written as
        // `null` and rejected on reload. `capture` keeps those out.
        serde_json::to_string(&self.rbts).unwrap_or_default()
    }

    fn deserialize_from_text(scene: &Scene, line: &str) -> Result<Self, PoseError> {
        let rbts: Vec<Rbt> = serde_json::from_str(line)?;
        if rbts.len() != scene.len() {
            return Err(PoseError::NodeCountMismatch {
                expected: scene.len(),
                found: rbts.len(),
            });
        }
        Ok(PoseFrame { rbts })
    }
}
