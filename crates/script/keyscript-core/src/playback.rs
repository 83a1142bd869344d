//! Timer-driven playback of a script.
//!
//! Elapsed time maps to a segment (the cursor position) and an alpha within
//! that segment. Segment `i` blends frame `i` into frame `i + 1`, so playback
//! runs from frame 0 to frame `count - 2`; the last frame only serves as
//! spline context. Under [`ContextPolicy::Strict`] frame 0 has no predecessor,
//! so playback starts at segment 1 instead.

use log::debug;

use crate::config::{ContextPolicy, PlaybackConfig};
use crate::error::ScriptError;
use crate::frame::Frame;
use crate::store::FrameStore;

const MIN_MS_BETWEEN_KEYFRAMES: u32 = 100;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PlaybackState {
    Playing { segment: usize, alpha: f32 },
    Finished,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Playback {
    ms_between_keyframes: u32,
    frames_per_second: u32,
}

impl Default for Playback {
    fn default() -> Self {
        Self::new(&PlaybackConfig::default())
    }
}

impl Playback {
    pub fn new(cfg: &PlaybackConfig) -> Self {
        Self {
            ms_between_keyframes: cfg.ms_between_keyframes.max(MIN_MS_BETWEEN_KEYFRAMES),
            frames_per_second: cfg.frames_per_second.max(1),
        }
    }

    pub fn ms_between_keyframes(&self) -> u32 {
        self.ms_between_keyframes
    }

    /// Delay between two rendered frames.
    pub fn frame_interval_ms(&self) -> f32 {
        1000.0 / self.frames_per_second as f32
    }

    /// Length of a full playback of `store`.
    pub fn duration_ms<F: Frame>(&self, store: &FrameStore<F>) -> f32 {
        playable_segments(store) as f32 * self.ms_between_keyframes as f32
    }

    /// Split elapsed time into `(segment, alpha)`. Negative time counts as 0.
    pub fn sample(&self, elapsed_ms: f32) -> (usize, f32) {
        let t = elapsed_ms.max(0.0) / self.ms_between_keyframes as f32;
        let segment = t.floor();
        (segment as usize, t - segment)
    }

    /// Show the pose for `elapsed_ms` on `scene`. Once past the last segment
    /// the cursor rests on the final interpolable keyframe and `Finished` is
    /// returned.
    pub fn step<F: Frame>(
        &self,
        store: &mut FrameStore<F>,
        scene: &mut F::Scene,
        elapsed_ms: f32,
    ) -> Result<PlaybackState, ScriptError> {
        let count = store.count();
        let playable = playable_segments(store);
        if playable == 0 {
            return Err(ScriptError::InsufficientContext {
                frame: store.frame_number(),
                count,
            });
        }
        let (offset, alpha) = self.sample(elapsed_ms);
        if offset >= playable {
            store.seek(count - 2);
            store.show_current(scene);
            debug!("playback finished at frame {}", count - 2);
            return Ok(PlaybackState::Finished);
        }
        let segment = first_segment(store.context_policy()) + offset;
        store.seek(segment);
        store.interpolate_and_show(scene, alpha)?;
        Ok(PlaybackState::Playing { segment, alpha })
    }

    /// Shorten the time between keyframes.
    pub fn speed_up(&mut self) {
        self.ms_between_keyframes =
            (self.ms_between_keyframes.saturating_mul(4) / 5).max(MIN_MS_BETWEEN_KEYFRAMES);
    }

    /// Lengthen the time between keyframes.
    pub fn slow_down(&mut self) {
        self.ms_between_keyframes = self.ms_between_keyframes.saturating_mul(5) / 4;
    }
}

fn first_segment(policy: ContextPolicy) -> usize {
    match policy {
        ContextPolicy::Clamp => 0,
        ContextPolicy::Strict => 1,
    }
}

/// Segments with a full four-frame context under the store's policy.
fn playable_segments<F: Frame>(store: &FrameStore<F>) -> usize {
    let first = first_segment(store.context_policy());
    store.count().saturating_sub(2).saturating_sub(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interp::Spline;

    #[test]
    fn sample_splits_segment_and_alpha() {
        let p = Playback::default();
        assert_eq!(p.sample(0.0), (0, 0.0));
        assert_eq!(p.sample(-50.0), (0, 0.0));
        let (seg, alpha) = p.sample(5000.0);
        assert_eq!(seg, 2);
        assert!((alpha - 0.5).abs() < 1e-6);
    }

    #[test]
    fn speed_is_clamped() {
        let mut p = Playback::new(&PlaybackConfig {
            ms_between_keyframes: 120,
            frames_per_second: 30,
        });
        p.speed_up();
        assert_eq!(p.ms_between_keyframes(), 100);
        p.slow_down();
        assert_eq!(p.ms_between_keyframes(), 125);
        assert!((p.frame_interval_ms() - 33.333_332).abs() < 1e-3);
    }

    #[derive(Clone, Debug, PartialEq)]
    struct Key(f32);

    #[derive(Debug)]
    struct NoCapture;

    impl std::fmt::Display for NoCapture {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("no capture")
        }
    }

    impl std::error::Error for NoCapture {}

    impl Spline for Key {
        fn catmull_rom(prev: &Self, first: &Self, second: &Self, after: &Self, alpha: f32) -> Self {
            Key(f32::catmull_rom(&prev.0, &first.0, &second.0, &after.0, alpha))
        }
    }

    impl Frame for Key {
        type Scene = f32;
        type Error = NoCapture;

        fn capture(scene: &f32) -> Result<Self, NoCapture> {
            Ok(Key(*scene))
        }

        fn apply(&self, scene: &mut f32) {
            *scene = self.0;
        }

        fn serialize_to_text(&self) -> String {
            self.0.to_string()
        }

        fn deserialize_from_text(_: &f32, line: &str) -> Result<Self, NoCapture> {
            line.parse().map(Key).map_err(|_| NoCapture)
        }
    }

    fn keys(n: usize) -> FrameStore<Key> {
        FrameStore::from_frames((0..n).map(|i| Key(i as f32)).collect())
    }

    #[test]
    fn duration_counts_playable_segments() {
        let p = Playback::default();
        assert_eq!(p.duration_ms(&keys(5)), 6000.0);
        assert_eq!(p.duration_ms(&keys(1)), 0.0);
        let strict = keys(5).with_context_policy(ContextPolicy::Strict);
        assert_eq!(p.duration_ms(&strict), 4000.0);
    }

    #[test]
    fn huge_elapsed_time_finishes() {
        let mut store = keys(4);
        let mut shown = -1.0;
        let state = Playback::default().step(&mut store, &mut shown, f32::MAX).unwrap();
        assert_eq!(state, PlaybackState::Finished);
        assert_eq!(store.frame_number(), 2);
        assert_eq!(shown, 2.0);
    }

    #[test]
    fn strict_playback_starts_at_second_frame() {
        let p = Playback::default();
        let mut store = keys(4).with_context_policy(ContextPolicy::Strict);
        let mut shown = -1.0;

        let state = p.step(&mut store, &mut shown, 0.0).unwrap();
        assert_eq!(state, PlaybackState::Playing { segment: 1, alpha: 0.0 });
        assert_eq!(store.frame_number(), 1);
        assert!((shown - 1.0).abs() < 1e-6);

        let half = p.ms_between_keyframes() as f32 / 2.0;
        match p.step(&mut store, &mut shown, half).unwrap() {
            PlaybackState::Playing { segment, alpha } => {
                assert_eq!(segment, 1);
                assert!((alpha - 0.5).abs() < 1e-6);
            }
            other => panic!("expected playing, got {other:?}"),
        }
        assert!((shown - 1.5).abs() < 1e-5);

        let end = p.duration_ms(&store);
        assert_eq!(p.step(&mut store, &mut shown, end).unwrap(), PlaybackState::Finished);
        assert_eq!(store.frame_number(), 2);
    }

    #[test]
    fn strict_playback_needs_four_frames() {
        let mut store = keys(3).with_context_policy(ContextPolicy::Strict);
        let mut shown = 0.0;
        let err = Playback::default().step(&mut store, &mut shown, 0.0).unwrap_err();
        assert!(matches!(err, ScriptError::InsufficientContext { count: 3, .. }));
    }
}
