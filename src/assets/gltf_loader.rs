//! glTF 2.0 / GLB loader.
//!
//! Produces a [`Prefab`] holding the node hierarchy of the default scene
//! (TRS, first-primitive mesh, morph weights) and every animation. Materials
//! keep their PBR factors only.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::BoxFuture;
use glam::{Quat, Vec3};
use gltf::animation::Interpolation;
use gltf::animation::util::ReadOutputs;
use rustc_hash::FxHashMap;

use crate::animation::binding::TargetPath;
use crate::animation::clip::{AnimationClip, Track, TrackData};
use crate::animation::tracks::{InterpolationMode, KeyframeTrack};
use crate::animation::values::MorphWeightData;
use crate::assets::loader::AssetLoader;
use crate::assets::prefab::{Prefab, PrefabNode};
use crate::errors::{Error, Result};
use crate::resources::geometry::Geometry;
use crate::resources::material::MeshStandardMaterial;
use crate::resources::mesh::Mesh;

/// Loads `.gltf` (with external or GLB-embedded buffers) and `.glb` files
/// from the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct GltfLoader {
    /// Prepended to relative request paths.
    base_dir: Option<PathBuf>,
}

impl GltfLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        match &self.base_dir {
            Some(dir) if Path::new(path).is_relative() => dir.join(path),
            _ => PathBuf::from(path),
        }
    }
}

impl AssetLoader for GltfLoader {
    fn load(&self, path: &str) -> BoxFuture<'static, Result<Prefab>> {
        let request = path.to_string();
        let full_path = self.resolve(path);

        Box::pin(async move {
            let as_load_error = |err: Error| match err {
                Error::AssetLoad { .. } => err,
                other => Error::AssetLoad {
                    path: request.clone(),
                    reason: other.to_string(),
                },
            };

            let bytes = tokio::fs::read(&full_path)
                .await
                .map_err(|e| as_load_error(e.into()))?;

            // Parsing and buffer decoding are CPU bound.
            let prefab = tokio::task::spawn_blocking(move || parse_gltf(&full_path, &bytes))
                .await
                .map_err(|e| as_load_error(e.into()))?
                .map_err(as_load_error)?;

            log::info!(
                "Loaded '{}': {} nodes, {} animations",
                request,
                prefab.nodes.len(),
                prefab.animations.len()
            );
            Ok(prefab)
        })
    }
}

/// Parses a glTF document already read into memory.
pub fn parse_gltf(path: &Path, bytes: &[u8]) -> Result<Prefab> {
    let gltf = gltf::Gltf::from_slice_without_validation(bytes)?;
    let base_path = path.parent().unwrap_or(Path::new("./"));
    let buffers = load_buffers(&gltf, base_path)?;

    let mut prefab = Prefab::new();
    let mut mesh_cache: FxHashMap<usize, Mesh> = FxHashMap::default();

    // Nodes keep their glTF index.
    for node in gltf.nodes() {
        let mut prefab_node = PrefabNode::new(
            node.name()
                .map_or_else(|| format!("Node_{}", node.index()), str::to_string),
        );

        let (t, r, s) = node.transform().decomposed();
        prefab_node.transform.position = Vec3::from_array(t);
        prefab_node.transform.rotation = Quat::from_array(r);
        prefab_node.transform.scale = Vec3::from_array(s);

        prefab_node.children_indices = node.children().map(|c| c.index()).collect();

        if let Some(gltf_mesh) = node.mesh() {
            let mesh = match mesh_cache.get(&gltf_mesh.index()) {
                Some(mesh) => Some(mesh.clone()),
                None => {
                    let built = build_mesh(&gltf_mesh, &buffers);
                    if let Some(mesh) = &built {
                        mesh_cache.insert(gltf_mesh.index(), mesh.clone());
                    }
                    built
                }
            };
            prefab_node.mesh = mesh;
            prefab_node.morph_weights = initial_morph_weights(&node, &gltf_mesh);
        }

        prefab.nodes.push(prefab_node);
    }

    prefab.root_indices = match gltf.default_scene().or_else(|| gltf.scenes().next()) {
        Some(scene) => scene.nodes().map(|n| n.index()).collect(),
        None => {
            // No scene: every node without a parent is a root.
            let mut is_child = vec![false; prefab.nodes.len()];
            for node in &prefab.nodes {
                for &c in &node.children_indices {
                    if let Some(flag) = is_child.get_mut(c) {
                        *flag = true;
                    }
                }
            }
            (0..prefab.nodes.len()).filter(|&i| !is_child[i]).collect()
        }
    };

    prefab.animations = load_animations(&gltf, &buffers)?
        .into_iter()
        .map(Arc::new)
        .collect();

    Ok(prefab)
}

fn load_buffers(gltf: &gltf::Gltf, base_path: &Path) -> Result<Vec<Vec<u8>>> {
    let mut buffer_data = Vec::new();
    for buffer in gltf.buffers() {
        match buffer.source() {
            gltf::buffer::Source::Bin => {
                let blob = gltf
                    .blob
                    .as_deref()
                    .ok_or_else(|| Error::Gltf("missing GLB binary chunk".to_string()))?;
                buffer_data.push(blob.to_vec());
            }
            gltf::buffer::Source::Uri(uri) => {
                if uri.starts_with("data:") {
                    return Err(Error::Gltf("data URIs are not supported".to_string()));
                }
                buffer_data.push(std::fs::read(base_path.join(uri))?);
            }
        }
    }
    Ok(buffer_data)
}

/// Geometry of the first triangle primitive. Returns `None` for meshes
/// without positions.
fn build_mesh(gltf_mesh: &gltf::Mesh, buffers: &[Vec<u8>]) -> Option<Mesh> {
    let primitive = gltf_mesh.primitives().next()?;
    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(Vec::as_slice));

    let mut geometry = Geometry::new();
    geometry.positions = reader.read_positions()?.collect();
    if let Some(normals) = reader.read_normals() {
        geometry.normals = normals.collect();
    }
    if let Some(uvs) = reader.read_tex_coords(0) {
        geometry.uvs = uvs.into_f32().collect();
    }
    geometry.indices = match reader.read_indices() {
        Some(indices) => indices.into_u32().collect(),
        None => (0..geometry.positions.len() as u32).collect(),
    };
    geometry.compute_bounding_volume();

    let pbr = primitive.material().pbr_metallic_roughness();
    let [r, g, b, _] = pbr.base_color_factor();
    let material = MeshStandardMaterial::new(Vec3::new(r, g, b))
        .with_metalness(pbr.metallic_factor())
        .with_roughness(pbr.roughness_factor());

    Some(Mesh::new(Arc::new(geometry), Arc::new(material)))
}

fn initial_morph_weights(node: &gltf::Node, gltf_mesh: &gltf::Mesh) -> Vec<f32> {
    if let Some(weights) = node.weights().or_else(|| gltf_mesh.weights()) {
        return weights.to_vec();
    }
    let target_count = gltf_mesh
        .primitives()
        .next()
        .map_or(0, |p| p.morph_targets().count());
    vec![0.0; target_count]
}

fn load_animations(gltf: &gltf::Gltf, buffers: &[Vec<u8>]) -> Result<Vec<AnimationClip>> {
    let mut animations = Vec::new();

    for anim in gltf.animations() {
        let clip_name = anim
            .name()
            .map_or_else(|| format!("Animation_{}", anim.index()), str::to_string);
        let mut tracks = Vec::new();

        for channel in anim.channels() {
            let reader = channel.reader(|buffer| buffers.get(buffer.index()).map(Vec::as_slice));
            let target = channel.target();
            let gltf_node = target.node();

            // Must match the names given to prefab nodes.
            let node_name = gltf_node
                .name()
                .map_or_else(|| format!("Node_{}", gltf_node.index()), str::to_string);

            let times: Vec<f32> = reader
                .read_inputs()
                .ok_or_else(|| Error::Gltf(format!("'{clip_name}': channel without input")))?
                .collect();
            let outputs = reader
                .read_outputs()
                .ok_or_else(|| Error::Gltf(format!("'{clip_name}': channel without output")))?;

            let interpolation = match channel.sampler().interpolation() {
                Interpolation::Linear => InterpolationMode::Linear,
                Interpolation::Step => InterpolationMode::Step,
                Interpolation::CubicSpline => InterpolationMode::CubicSpline,
            };

            let (path, data) = match outputs {
                ReadOutputs::Translations(iter) => (
                    TargetPath::Translation,
                    TrackData::Vector3(KeyframeTrack::new(
                        times,
                        iter.map(Vec3::from_array).collect(),
                        interpolation,
                    )),
                ),
                ReadOutputs::Rotations(iter) => (
                    TargetPath::Rotation,
                    TrackData::Quaternion(KeyframeTrack::new(
                        times,
                        iter.into_f32().map(Quat::from_array).collect(),
                        interpolation,
                    )),
                ),
                ReadOutputs::Scales(iter) => (
                    TargetPath::Scale,
                    TrackData::Vector3(KeyframeTrack::new(
                        times,
                        iter.map(Vec3::from_array).collect(),
                        interpolation,
                    )),
                ),
                ReadOutputs::MorphTargetWeights(iter) => {
                    let flat: Vec<f32> = iter.into_f32().collect();
                    let values = pack_morph_weights(&flat, times.len(), interpolation);
                    (
                        TargetPath::Weights,
                        TrackData::MorphWeights(KeyframeTrack::new(times, values, interpolation)),
                    )
                }
            };

            tracks.push(Track::new(node_name, path, data));
        }

        animations.push(AnimationClip::new(clip_name, tracks));
    }

    Ok(animations)
}

/// Splits a flat weight array into one sample per output element.
fn pack_morph_weights(
    flat: &[f32],
    keyframes: usize,
    interpolation: InterpolationMode,
) -> Vec<MorphWeightData> {
    let elements = match interpolation {
        InterpolationMode::CubicSpline => keyframes * 3,
        _ => keyframes,
    };
    if elements == 0 {
        return Vec::new();
    }
    let per_element = flat.len() / elements;
    if per_element == 0 {
        return Vec::new();
    }
    flat.chunks_exact(per_element)
        .map(MorphWeightData::from_slice)
        .collect()
}
