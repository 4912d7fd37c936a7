//! Keyframe animation.
//!
//! - [`AnimationClip`]: named tracks of keyframes
//! - [`AnimationMixer`]: plays clips on one model
//! - [`AnimationSystem`]: every mixer, updated once per frame

pub mod action;
pub mod binder;
pub mod binding;
pub mod clip;
pub mod mixer;
pub mod system;
pub mod tracks;
pub mod values;

pub use action::{AnimationAction, TrackValue};
pub use binder::Binder;
pub use binding::{PropertyBinding, TargetPath};
pub use clip::{AnimationClip, Track, TrackData, TrackMeta};
pub use mixer::{ActionHandle, AnimationMixer};
pub use system::{AnimationSystem, MixerId};
pub use tracks::{InterpolationMode, KeyframeCursor, KeyframeTrack};
pub use values::{Interpolatable, MAX_MORPH_TARGETS, MorphWeightData};
