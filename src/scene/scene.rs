use glam::Vec3;
use rustc_hash::FxHashMap;
use slotmap::{SlotMap, SparseSecondaryMap};

use crate::assets::prefab::Prefab;
use crate::resources::mesh::Mesh;
use crate::scene::NodeHandle;
use crate::scene::camera::Camera;
use crate::scene::light::Light;
use crate::scene::node::Node;
use crate::scene::transform::Transform;
use crate::scene::transform_system;

/// Scene graph container.
///
/// Nodes live in a generational arena, so a [`NodeHandle`] stays valid (and
/// unique) until its node is removed. Meshes, cameras and lights are stored
/// as sparse components keyed by the owning node's handle.
#[derive(Debug, Default)]
pub struct Scene {
    pub nodes: SlotMap<NodeHandle, Node>,
    pub root_nodes: Vec<NodeHandle>,

    // ==== Components ====
    pub meshes: SparseSecondaryMap<NodeHandle, Mesh>,
    pub cameras: SparseSecondaryMap<NodeHandle, Camera>,
    pub lights: SparseSecondaryMap<NodeHandle, Light>,

    /// Linear RGB clear colour.
    pub background: Option<Vec3>,

    pub active_camera: Option<NodeHandle>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty named node at the root.
    pub fn create_node(&mut self, name: impl Into<String>) -> NodeHandle {
        self.add_node(Node::with_name(name))
    }

    /// Adds a node at the root.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.root_nodes.push(handle);
        handle
    }

    /// Adds a node under `parent`. Falls back to the root if `parent` does
    /// not exist.
    pub fn add_to_parent(&mut self, mut child: Node, parent: NodeHandle) -> NodeHandle {
        if !self.nodes.contains_key(parent) {
            log::warn!("Parent {parent:?} not found, adding node at the root");
            return self.add_node(child);
        }

        child.parent = Some(parent);
        let handle = self.nodes.insert(child);
        self.nodes[parent].children.push(handle);
        handle
    }

    /// Removes a node, its descendants and all their components.
    pub fn remove_node(&mut self, handle: NodeHandle) {
        let Some(node) = self.nodes.get(handle) else {
            return;
        };

        match node.parent {
            Some(parent) => {
                if let Some(p) = self.nodes.get_mut(parent) {
                    p.children.retain(|&c| c != handle);
                }
            }
            None => self.root_nodes.retain(|&r| r != handle),
        }

        for removed in self.collect_subtree(handle) {
            self.meshes.remove(removed);
            self.cameras.remove(removed);
            self.lights.remove(removed);
            if self.active_camera == Some(removed) {
                self.active_camera = None;
            }
            self.nodes.remove(removed);
        }
    }

    /// Re-parents `child` under `parent`.
    ///
    /// Returns `false` and leaves the graph untouched when either node is
    /// missing, when `child == parent`, or when `parent` is a descendant of
    /// `child` (which would create a cycle).
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) -> bool {
        if child == parent {
            log::warn!("Cannot attach node to itself");
            return false;
        }
        if !self.nodes.contains_key(child) || !self.nodes.contains_key(parent) {
            log::error!("Node not found during attach");
            return false;
        }
        if self.is_ancestor_of(child, parent) {
            log::warn!("Attaching {child:?} under {parent:?} would create a cycle");
            return false;
        }

        // Detach from old
        match self.nodes[child].parent {
            Some(old) => {
                if let Some(p) = self.nodes.get_mut(old) {
                    p.children.retain(|&c| c != child);
                }
            }
            None => self.root_nodes.retain(|&r| r != child),
        }

        // Attach to new
        self.nodes[parent].children.push(child);
        let node = &mut self.nodes[child];
        node.parent = Some(parent);
        node.transform.mark_dirty();
        true
    }

    fn is_ancestor_of(&self, ancestor: NodeHandle, node: NodeHandle) -> bool {
        let mut current = self.nodes.get(node).and_then(|n| n.parent);
        while let Some(handle) = current {
            if handle == ancestor {
                return true;
            }
            current = self.nodes.get(handle).and_then(|n| n.parent);
        }
        false
    }

    #[inline]
    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    #[inline]
    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, handle: NodeHandle) -> bool {
        self.nodes.contains_key(handle)
    }

    /// Handles of `root` and all its descendants, depth first.
    #[must_use]
    pub fn collect_subtree(&self, root: NodeHandle) -> Vec<NodeHandle> {
        let mut result = Vec::new();
        let mut stack = vec![root];
        while let Some(handle) = stack.pop() {
            let Some(node) = self.nodes.get(handle) else {
                continue;
            };
            result.push(handle);
            stack.extend(node.children.iter().rev().copied());
        }
        result
    }

    /// Finds the first node named `name` in the subtree of `root`.
    #[must_use]
    pub fn find_node_by_name(&self, root: NodeHandle, name: &str) -> Option<NodeHandle> {
        self.collect_subtree(root)
            .into_iter()
            .find(|&h| self.nodes[h].name == name)
    }

    /// Name → handle map over the subtree of `root`. The first node wins on
    /// duplicate names.
    #[must_use]
    pub fn name_index(&self, root: NodeHandle) -> FxHashMap<String, NodeHandle> {
        let mut map = FxHashMap::default();
        for handle in self.collect_subtree(root) {
            map.entry(self.nodes[handle].name.clone()).or_insert(handle);
        }
        map
    }

    // ========================================================================
    // Components
    // ========================================================================

    /// Adds a mesh on a new root node.
    pub fn add_mesh(&mut self, name: impl Into<String>, mesh: Mesh) -> NodeHandle {
        let handle = self.create_node(name);
        self.meshes.insert(handle, mesh);
        handle
    }

    /// Adds a mesh on a new node under `parent`.
    pub fn add_mesh_to_parent(
        &mut self,
        name: impl Into<String>,
        mesh: Mesh,
        parent: NodeHandle,
    ) -> NodeHandle {
        let handle = self.add_to_parent(Node::with_name(name), parent);
        self.meshes.insert(handle, mesh);
        handle
    }

    /// Adds a camera on a new root node. The first camera becomes active.
    pub fn add_camera(&mut self, name: impl Into<String>, camera: Camera) -> NodeHandle {
        let handle = self.create_node(name);
        self.cameras.insert(handle, camera);
        if self.active_camera.is_none() {
            self.active_camera = Some(handle);
        }
        handle
    }

    pub fn add_light(&mut self, name: impl Into<String>, light: Light) -> NodeHandle {
        let handle = self.create_node(name);
        self.lights.insert(handle, light);
        handle
    }

    #[must_use]
    pub fn main_camera(&self) -> Option<&Camera> {
        self.cameras.get(self.active_camera?)
    }

    pub fn main_camera_mut(&mut self) -> Option<&mut Camera> {
        self.cameras.get_mut(self.active_camera?)
    }

    /// The active camera's node transform and camera, borrowed together.
    pub fn query_main_camera_bundle(&mut self) -> Option<(&mut Transform, &mut Camera)> {
        let handle = self.active_camera?;
        let camera = self.cameras.get_mut(handle)?;
        let transform = &mut self.nodes.get_mut(handle)?.transform;
        Some((transform, camera))
    }

    /// Visible mesh nodes. A node is drawn only if it and all its ancestors
    /// are visible.
    pub fn visible_meshes(&self) -> impl Iterator<Item = (NodeHandle, &Mesh)> {
        self.meshes
            .iter()
            .filter(move |(handle, _)| self.is_visible_in_hierarchy(*handle))
    }

    fn is_visible_in_hierarchy(&self, handle: NodeHandle) -> bool {
        let mut current = Some(handle);
        while let Some(h) = current {
            match self.nodes.get(h) {
                Some(node) if node.visible => current = node.parent,
                _ => return false,
            }
        }
        true
    }

    // ========================================================================
    // Matrix pipeline
    // ========================================================================

    /// Propagates local transforms into world matrices. Call once per frame
    /// before rendering.
    pub fn update_matrix_world(&mut self) {
        transform_system::update_hierarchy_iterative(
            &mut self.nodes,
            &mut self.cameras,
            &self.root_nodes,
        );
    }

    pub fn update_subtree(&mut self, root: NodeHandle) {
        transform_system::update_subtree(&mut self.nodes, &mut self.cameras, root);
    }

    // ========================================================================
    // Prefab instantiation
    // ========================================================================

    /// Creates live nodes for every node of `prefab`.
    ///
    /// Returns the handles of the prefab's roots, in `root_indices` order.
    /// Roots are added at the scene root. Out-of-range child indices are
    /// skipped with a warning.
    pub fn instantiate(&mut self, prefab: &Prefab) -> Vec<NodeHandle> {
        let handles: Vec<NodeHandle> = prefab
            .nodes
            .iter()
            .map(|p| {
                let mut node = Node::with_name(p.name.clone());
                node.transform = p.transform.clone();
                node.transform.mark_dirty();
                node.morph_weights.clone_from(&p.morph_weights);
                let handle = self.nodes.insert(node);
                if let Some(mesh) = &p.mesh {
                    self.meshes.insert(handle, mesh.clone());
                }
                handle
            })
            .collect();

        for (index, p) in prefab.nodes.iter().enumerate() {
            let parent = handles[index];
            for &child_index in &p.children_indices {
                let Some(&child) = handles.get(child_index) else {
                    log::warn!("Prefab node {index} has invalid child index {child_index}");
                    continue;
                };
                self.nodes[child].parent = Some(parent);
                self.nodes[parent].children.push(child);
            }
        }

        let roots: Vec<NodeHandle> = prefab
            .root_indices
            .iter()
            .filter_map(|&i| handles.get(i).copied())
            .collect();
        self.root_nodes.extend(roots.iter().copied());
        roots
    }
}
