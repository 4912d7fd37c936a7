use glam::{Quat, Vec3};

use crate::animation::binding::TargetPath;
use crate::animation::tracks::KeyframeTrack;
use crate::animation::values::MorphWeightData;

#[derive(Debug, Clone)]
pub struct TrackMeta {
    /// Name of the animated node, resolved under the model root.
    pub node_name: String,
    pub target: TargetPath,
}

#[derive(Debug, Clone)]
pub enum TrackData {
    Vector3(KeyframeTrack<Vec3>),
    Quaternion(KeyframeTrack<Quat>),
    Scalar(KeyframeTrack<f32>),
    MorphWeights(KeyframeTrack<MorphWeightData>),
}

impl TrackData {
    #[must_use]
    pub fn times(&self) -> &[f32] {
        match self {
            TrackData::Vector3(t) => &t.times,
            TrackData::Quaternion(t) => &t.times,
            TrackData::Scalar(t) => &t.times,
            TrackData::MorphWeights(t) => &t.times,
        }
    }

    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            TrackData::Vector3(_) => "vector3",
            TrackData::Quaternion(_) => "quaternion",
            TrackData::Scalar(_) => "scalar",
            TrackData::MorphWeights(_) => "morph weights",
        }
    }

    pub fn check(&self) -> std::result::Result<(), String> {
        match self {
            TrackData::Vector3(t) => t.check(),
            TrackData::Quaternion(t) => t.check(),
            TrackData::Scalar(t) => t.check(),
            TrackData::MorphWeights(t) => t.check(),
        }
    }

    /// Whether samples of this track can be written to `target`.
    #[must_use]
    pub fn fits(&self, target: TargetPath) -> bool {
        matches!(
            (self, target),
            (TrackData::Vector3(_), TargetPath::Translation | TargetPath::Scale)
                | (TrackData::Quaternion(_), TargetPath::Rotation)
                | (TrackData::Scalar(_) | TrackData::MorphWeights(_), TargetPath::Weights)
        )
    }
}

/// A track definition: target metadata plus keyframe data.
#[derive(Debug, Clone)]
pub struct Track {
    pub meta: TrackMeta,
    pub data: TrackData,
}

impl Track {
    #[must_use]
    pub fn new(node_name: impl Into<String>, target: TargetPath, data: TrackData) -> Self {
        Self {
            meta: TrackMeta {
                node_name: node_name.into(),
                target,
            },
            data,
        }
    }
}

/// A named set of tracks played together.
///
/// The duration is the latest keyframe time over all tracks, so a clip whose
/// tracks all have a single keyframe at `t = 0` has zero duration.
#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    pub duration: f32,
    pub tracks: Vec<Track>,
}

impl AnimationClip {
    #[must_use]
    pub fn new(name: impl Into<String>, tracks: Vec<Track>) -> Self {
        let duration = tracks
            .iter()
            .filter_map(|t| t.data.times().last().copied())
            .filter(|t| t.is_finite())
            .fold(0.0_f32, f32::max);

        Self {
            name: name.into(),
            duration,
            tracks,
        }
    }
}
