//! Scene graph.
//!
//! - [`Node`]: hierarchy entry with a [`Transform`]
//! - [`Scene`]: node arena plus mesh/camera/light components
//! - [`Camera`]: perspective projection state
//! - [`Light`]: static light descriptions
//! - [`transform_system`]: world-matrix propagation

pub mod camera;
pub mod light;
pub mod node;
#[allow(clippy::module_inception)]
pub mod scene;
pub mod transform;
pub mod transform_system;

pub use camera::{Camera, RenderCamera};
pub use light::{Light, LightKind};
pub use node::Node;
pub use scene::Scene;
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    /// Stable handle of a node in a [`Scene`] arena.
    pub struct NodeHandle;
}
