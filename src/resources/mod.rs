//! Renderer-independent resource descriptions.
//!
//! - [`Geometry`]: CPU triangle data and the [`primitives`] that build it
//! - [`MeshStandardMaterial`]: PBR material parameters
//! - [`Texture`]: image reference plus sampling hints
//! - [`color`]: sRGB/linear helpers

pub mod color;
pub mod geometry;
pub mod material;
pub mod mesh;
pub mod primitives;
pub mod texture;

pub use geometry::{BoundingBox, Geometry};
pub use material::MeshStandardMaterial;
pub use mesh::Mesh;
pub use texture::{ColorSpace, Texture};
