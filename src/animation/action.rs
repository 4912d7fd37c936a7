use std::sync::Arc;

use glam::{Quat, Vec3};

use crate::animation::binding::{PropertyBinding, TargetPath};
use crate::animation::clip::{AnimationClip, TrackData};
use crate::animation::tracks::KeyframeCursor;
use crate::animation::values::{MAX_MORPH_TARGETS, MorphWeightData};
use crate::errors::{Error, Result};
use crate::scene::Scene;

/// A playing instance of one clip on one model.
///
/// Actions always loop: the local time stays in `[0, duration)`.
#[derive(Debug, Clone)]
pub struct AnimationAction {
    clip: Arc<AnimationClip>,

    time: f32,
    pub time_scale: f32,
    playing: bool,

    bindings: Vec<PropertyBinding>,
    track_cursors: Vec<KeyframeCursor>,
}

impl AnimationAction {
    /// Creates a stopped action. `bindings` come from [`Binder::bind`].
    ///
    /// [`Binder::bind`]: crate::animation::Binder::bind
    #[must_use]
    pub fn new(clip: Arc<AnimationClip>, bindings: Vec<PropertyBinding>) -> Self {
        let track_count = clip.tracks.len();
        Self {
            clip,
            time: 0.0,
            time_scale: 1.0,
            playing: false,
            bindings,
            track_cursors: vec![KeyframeCursor::default(); track_count],
        }
    }

    #[must_use]
    pub fn clip(&self) -> &Arc<AnimationClip> {
        &self.clip
    }

    #[must_use]
    pub fn bindings(&self) -> &[PropertyBinding] {
        &self.bindings
    }

    /// Local time in seconds.
    #[must_use]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Sets the local time, wrapped into the clip.
    pub fn set_time(&mut self, time: f32) {
        self.time = self.wrap(time);
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Starts playback. Calling it on a playing action changes nothing.
    pub fn play(&mut self) -> &mut Self {
        self.playing = true;
        self
    }

    /// Halts playback and rewinds to the start.
    pub fn stop(&mut self) -> &mut Self {
        self.playing = false;
        self.time = 0.0;
        self
    }

    fn wrap(&self, time: f32) -> f32 {
        let duration = self.clip.duration;
        if duration > 0.0 && time.is_finite() {
            // rem_euclid may round up to `duration` for tiny negative inputs.
            let wrapped = time.rem_euclid(duration);
            if wrapped >= duration { 0.0 } else { wrapped }
        } else {
            0.0
        }
    }

    /// Advances the local time by `dt * time_scale` and wraps it.
    pub fn advance(&mut self, dt: f32) {
        if !self.playing || !dt.is_finite() {
            return;
        }
        self.time = self.wrap(self.time + dt * self.time_scale);
    }

    /// Checks that every bound node still exists.
    pub fn validate(&self, scene: &Scene) -> Result<()> {
        match self.bindings.iter().find(|b| !scene.contains(b.node_handle)) {
            Some(stale) => Err(Error::StaleBinding {
                node: format!("{:?}", stale.node_handle),
            }),
            None => Ok(()),
        }
    }

    /// Samples the clip at the current local time and writes the values to
    /// the bound nodes. Bindings whose node is gone are skipped.
    pub fn apply(&mut self, scene: &mut Scene) {
        for binding in &self.bindings {
            let Some(value) = sample_track(
                &self.clip,
                binding.track_index,
                self.time,
                &mut self.track_cursors,
            ) else {
                continue;
            };
            let Some(node) = scene.get_node_mut(binding.node_handle) else {
                continue;
            };

            match (value, binding.target) {
                (TrackValue::Vector3(v), TargetPath::Translation) => node.transform.position = v,
                (TrackValue::Vector3(v), TargetPath::Scale) => node.transform.scale = v,
                (TrackValue::Quaternion(q), TargetPath::Rotation) => node.transform.rotation = q,
                (TrackValue::MorphWeights(w), TargetPath::Weights) => {
                    if node.morph_weights.is_empty() {
                        node.morph_weights.resize(MAX_MORPH_TARGETS, 0.0);
                    }
                    let n = node.morph_weights.len().min(MAX_MORPH_TARGETS);
                    node.morph_weights[..n].copy_from_slice(&w.weights[..n]);
                }
                (TrackValue::Scalar(s), TargetPath::Weights) => {
                    if node.morph_weights.is_empty() {
                        node.morph_weights.push(0.0);
                    }
                    node.morph_weights[0] = s;
                }
                _ => {}
            }
        }
    }

    /// Samples one track at the current local time.
    pub fn sample_track(&mut self, track_index: usize) -> Option<TrackValue> {
        sample_track(&self.clip, track_index, self.time, &mut self.track_cursors)
    }
}

fn sample_track(
    clip: &AnimationClip,
    track_index: usize,
    time: f32,
    cursors: &mut [KeyframeCursor],
) -> Option<TrackValue> {
    let track = clip.tracks.get(track_index)?;
    let cursor = cursors.get_mut(track_index)?;

    Some(match &track.data {
        TrackData::Vector3(t) => TrackValue::Vector3(t.sample_with_cursor(time, cursor)),
        TrackData::Quaternion(t) => TrackValue::Quaternion(t.sample_with_cursor(time, cursor)),
        TrackData::Scalar(t) => TrackValue::Scalar(t.sample_with_cursor(time, cursor)),
        TrackData::MorphWeights(t) => TrackValue::MorphWeights(t.sample_with_cursor(time, cursor)),
    })
}

/// A sampled track value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackValue {
    Vector3(Vec3),
    Quaternion(Quat),
    Scalar(f32),
    MorphWeights(MorphWeightData),
}
