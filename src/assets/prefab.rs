use std::sync::Arc;

use crate::animation::clip::AnimationClip;
use crate::resources::mesh::Mesh;
use crate::scene::transform::Transform;

/// A node of a loaded model. Children are referenced by index into
/// [`Prefab::nodes`].
#[derive(Debug, Clone)]
pub struct PrefabNode {
    pub name: String,
    pub transform: Transform,
    pub children_indices: Vec<usize>,
    pub mesh: Option<Mesh>,
    /// Initial morph target influences.
    pub morph_weights: Vec<f32>,
}

impl PrefabNode {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::new(),
            children_indices: Vec::new(),
            mesh: None,
            morph_weights: Vec::new(),
        }
    }
}

/// Scene-independent model data produced by an [`AssetLoader`](crate::assets::AssetLoader).
///
/// A prefab holds no node handles and is `Send`, so it can be built on a
/// loader thread and moved to the render thread. [`Scene::instantiate`]
/// turns it into live nodes.
///
/// [`Scene::instantiate`]: crate::scene::Scene::instantiate
#[derive(Debug, Clone, Default)]
pub struct Prefab {
    /// Flat node storage.
    pub nodes: Vec<PrefabNode>,
    /// Indices of the top-level nodes.
    pub root_indices: Vec<usize>,
    pub animations: Vec<Arc<AnimationClip>>,
}

impl Prefab {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
