//! Per-frame scene core for small animated 3D scenes.
//!
//! - [`Engine`]: owns the scene and runs the update/render loop
//! - [`animation`]: keyframe clips, mixers and the mixer registry
//! - [`scene`]: node arena, transforms, cameras and lights
//! - [`render`]: the [`Renderer`] seam and viewport resizing
//! - [`assets`]: background model loading (glTF with feature `gltf`)
//! - [`app`]: input state and the winit host (feature `winit`)

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod animation;
pub mod app;
pub mod assets;
pub mod engine;
pub mod errors;
pub mod render;
pub mod resources;
pub mod scene;
pub mod settings;
pub mod showcase;
pub mod utils;

pub use animation::{
    ActionHandle, AnimationAction, AnimationClip, AnimationMixer, AnimationSystem, Binder,
    InterpolationMode, KeyframeTrack, TargetPath, Track, TrackData,
};
#[cfg(feature = "winit")]
pub use app::App;
pub use app::{Input, MouseButton};
#[cfg(feature = "gltf")]
pub use assets::GltfLoader;
pub use assets::{AssetLoader, MemoryLoader, ModelLoader, ModelPlacement, Prefab, PrefabNode};
pub use engine::{Engine, FrameState};
pub use errors::{Error, Result};
pub use render::{FrameRecord, HeadlessRenderer, Renderer, ViewportResizeHandler};
pub use resources::primitives::*;
pub use resources::{ColorSpace, Geometry, Mesh, MeshStandardMaterial, Texture};
pub use scene::{Camera, Light, Node, NodeHandle, RenderCamera, Scene, Transform};
pub use settings::EngineSettings;
pub use utils::orbit_control::OrbitControls;
pub use utils::time::{Clock, ManualTimeSource, SystemTimeSource, TimeSource};
