//! Ordered keyframe storage with a movable cursor.
//!
//! Every editing operation is relative to the cursor. Operations that show a
//! frame take the live scene and apply the new current frame to it; when the
//! sequence is empty they degrade to no-ops (or, for replacement, to an
//! insert) instead of failing.

use log::{debug, info};

use crate::config::{ContextPolicy, ScriptConfig};
use crate::cursor::Cursor;
use crate::error::ScriptError;
use crate::frame::Frame;
use crate::interp::{self, ContextFrames};

#[derive(Clone, Debug)]
pub struct FrameStore<F> {
    frames: Vec<F>,
    cursor: Cursor,
    policy: ContextPolicy,
}

impl<F> Default for FrameStore<F> {
    fn default() -> Self {
        Self {
            frames: Vec::new(),
            cursor: Cursor::Undefined,
            policy: ContextPolicy::default(),
        }
    }
}

impl<F: Frame> FrameStore<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing sequence with the cursor on the first frame.
    pub fn from_frames(frames: Vec<F>) -> Self {
        let cursor = Cursor::At(0).normalized(frames.len());
        Self {
            frames,
            cursor,
            policy: ContextPolicy::default(),
        }
    }

    /// Adopt the store-level settings of `cfg`.
    pub fn with_config(self, cfg: &ScriptConfig) -> Self {
        self.with_context_policy(cfg.context_policy)
    }

    pub fn with_context_policy(mut self, policy: ContextPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn context_policy(&self) -> ContextPolicy {
        self.policy
    }

    pub fn set_context_policy(&mut self, policy: ContextPolicy) {
        self.policy = policy;
    }

    /// Number of stored keyframes.
    #[inline]
    pub fn count(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn frames(&self) -> &[F] {
        &self.frames
    }

    #[inline]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// 0-based number of the current frame (0 while undefined).
    #[inline]
    pub fn frame_number(&self) -> usize {
        self.cursor.frame_number()
    }

    pub fn current(&self) -> Option<&F> {
        self.cursor.index().and_then(|i| self.frames.get(i))
    }

    /// True iff the sequence is non-empty and the cursor references a frame.
    #[inline]
    pub fn is_defined(&self) -> bool {
        self.cursor.normalized(self.frames.len()).is_defined()
    }

    fn normalize(&mut self) -> bool {
        self.cursor = self.cursor.normalized(self.frames.len());
        self.cursor.is_defined()
    }

    /// True if the cursor is defined and not on the last frame.
    pub fn can_advance(&self) -> bool {
        self.is_defined() && self.frame_number() + 1 < self.count()
    }

    /// True if the cursor has a successor and a frame two ahead, which the
    /// spline needs as context for the `[current, next]` interval.
    pub fn can_animate(&self) -> bool {
        self.is_defined() && self.frame_number() + 2 < self.count()
    }

    /// Step the cursor forward without displaying anything.
    ///
    /// Calling this on the last frame (or with no frames) is a caller bug and
    /// is reported as `ScriptError::CannotAdvance`; the cursor does not move.
    pub fn advance(&mut self) -> Result<(), ScriptError> {
        if !self.can_advance() {
            return Err(ScriptError::CannotAdvance {
                frame: self.frame_number(),
                count: self.count(),
            });
        }
        let next = self.frame_number() + 1;
        self.cursor = Cursor::At(next);
        info!("advancing to frame {next}");
        Ok(())
    }

    /// Step the cursor back. No-op on the first frame.
    pub fn regress(&mut self) {
        if let Cursor::At(i) = self.cursor {
            if i > 0 {
                self.cursor = Cursor::At(i - 1);
                info!("regressing to frame {}", i - 1);
            }
        }
    }

    /// Apply the current frame to `scene`, if there is one.
    pub fn show_current(&self, scene: &mut F::Scene) {
        if let Some(frame) = self.current() {
            frame.apply(scene);
        }
    }

    /// Overwrite the current frame with a fresh capture of `scene`. With no
    /// current frame this inserts instead.
    pub fn replace_current_from_scene(&mut self, scene: &mut F::Scene) -> Result<(), ScriptError> {
        if !self.normalize() {
            return self.insert_after_current_from_scene(scene);
        }
        let frame = capture::<F>(scene)?;
        let i = self.frame_number();
        self.frames[i] = frame;
        debug!("replaced frame {i}");
        self.show_current(scene);
        Ok(())
    }

    /// Move to and show the next frame; no-op on the last frame.
    pub fn advance_current_frame(&mut self, scene: &mut F::Scene) {
        if self.normalize() && self.advance().is_ok() {
            self.show_current(scene);
        }
    }

    /// Move to and show the previous frame; no-op on the first frame.
    pub fn regress_current_frame(&mut self, scene: &mut F::Scene) {
        if self.normalize() && self.frame_number() > 0 {
            self.regress();
            self.show_current(scene);
        }
    }

    pub fn go_to_beginning(&mut self, scene: &mut F::Scene) {
        self.cursor = Cursor::At(0);
        if self.normalize() {
            self.show_current(scene);
        }
    }

    /// Move the cursor to `ordinal`, clamped to the last frame. Nothing is shown.
    pub fn seek(&mut self, ordinal: usize) {
        if self.normalize() {
            self.cursor = Cursor::At(ordinal.min(self.count() - 1));
        }
    }

    /// Delete the current frame.
    ///
    /// The cursor lands on the preceding frame, or on the following one when
    /// the first frame was deleted. Deleting the only frame leaves the store
    /// undefined.
    pub fn delete_current_frame(&mut self, scene: &mut F::Scene) {
        if !self.normalize() {
            return;
        }
        let i = self.frame_number();
        self.frames.remove(i);
        self.cursor = Cursor::At(i.saturating_sub(1));
        debug!("deleted frame {i}, {} remaining", self.count());
        if self.normalize() {
            self.show_current(scene);
        }
    }

    /// Capture `scene` into a new frame right after the current one and make
    /// it current. On an empty store the capture becomes frame 0.
    pub fn insert_after_current_from_scene(
        &mut self,
        scene: &mut F::Scene,
    ) -> Result<(), ScriptError> {
        let frame = capture::<F>(scene)?;
        if self.normalize() {
            let at = self.frame_number() + 1;
            self.frames.insert(at, frame);
            self.cursor = Cursor::At(at);
        } else {
            self.frames.push(frame);
            self.cursor = Cursor::At(self.frames.len() - 1);
        }
        info!("adding new frame ({})", self.frame_number());
        self.show_current(scene);
        Ok(())
    }

    /// Discard every frame.
    pub fn clear(&mut self) {
        self.frames.clear();
        self.cursor = Cursor::Undefined;
    }

    /// The frames at `cursor - 1`, `cursor`, `cursor + 1` and `cursor + 2`.
    ///
    /// Requires [`can_animate`](Self::can_animate). On the first frame there
    /// is no predecessor: `ContextPolicy::Clamp` reuses the first frame,
    /// `ContextPolicy::Strict` reports `InsufficientContext`.
    pub fn context_frames(&self) -> Result<ContextFrames<'_, F>, ScriptError> {
        let insufficient = || ScriptError::InsufficientContext {
            frame: self.frame_number(),
            count: self.count(),
        };
        if !self.can_animate() {
            return Err(insufficient());
        }
        let i = self.frame_number();
        let prev = match (i.checked_sub(1), self.policy) {
            (Some(p), _) => p,
            (None, ContextPolicy::Clamp) => i,
            (None, ContextPolicy::Strict) => return Err(insufficient()),
        };
        Ok(ContextFrames {
            prev: &self.frames[prev],
            first: &self.frames[i],
            second: &self.frames[i + 1],
            after: &self.frames[i + 2],
        })
    }

    /// The pose `alpha` of the way from the current frame to the next one.
    /// The cursor does not move.
    pub fn interpolate_current(&self, alpha: f32) -> Result<F, ScriptError> {
        let ctx = self.context_frames()?;
        Ok(interp::interpolate(ctx, alpha))
    }

    /// Interpolate (see [`interpolate_current`](Self::interpolate_current))
    /// and apply the result to `scene`.
    pub fn interpolate_and_show(
        &self,
        scene: &mut F::Scene,
        alpha: f32,
    ) -> Result<(), ScriptError> {
        let frame = self.interpolate_current(alpha)?;
        frame.apply(scene);
        Ok(())
    }
}

fn capture<F: Frame>(scene: &F::Scene) -> Result<F, ScriptError> {
    F::capture(scene).map_err(|e| ScriptError::Capture {
        source: Box::new(e),
    })
}
