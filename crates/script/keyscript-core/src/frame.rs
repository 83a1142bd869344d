//! The capability set a saved scene pose has to provide.
//!
//! The store never looks inside a frame. It only captures one from a scene,
//! applies one back, turns one into a line of text and back, and blends four
//! of them through [`Spline`].

use crate::interp::Spline;

pub trait Frame: Clone + Spline {
    /// The live scene frames are captured from and applied to.
    type Scene: ?Sized;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Snapshot the current pose of `scene`.
    fn capture(scene: &Self::Scene) -> Result<Self, Self::Error>;

    /// Pose `scene` according to this frame.
    fn apply(&self, scene: &mut Self::Scene);

    /// Single-line encoding. Must not contain `'\n'`.
    fn serialize_to_text(&self) -> String;

    fn deserialize_from_text(scene: &Self::Scene, line: &str) -> Result<Self, Self::Error>;
}
