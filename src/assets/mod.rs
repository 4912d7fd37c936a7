//! Model loading.
//!
//! - [`Prefab`]: scene-independent model data
//! - [`AssetLoader`]: turns a path into a prefab
//! - [`ModelLoader`]: runs loads in the background and hands results back
//!   on demand
//! - [`GltfLoader`]: glTF 2.0 / GLB support (feature `gltf`)

#[cfg(feature = "gltf")]
pub mod gltf_loader;
pub mod loader;
pub mod prefab;

#[cfg(feature = "gltf")]
pub use gltf_loader::GltfLoader;
pub use loader::{AssetLoader, LoadResult, MemoryLoader, ModelLoader, ModelPlacement};
pub use prefab::{Prefab, PrefabNode};
