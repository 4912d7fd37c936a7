use crate::animation::binding::PropertyBinding;
use crate::animation::clip::AnimationClip;
use crate::errors::{Error, Result};
use crate::scene::{NodeHandle, Scene};

pub struct Binder;

impl Binder {
    /// Resolves every track of `clip` against the subtree of `root`.
    ///
    /// Fails with [`Error::ClipIntegrity`] on the first track whose node is
    /// missing, whose data does not fit its target, or whose keyframes are
    /// malformed. Nothing is bound on failure.
    pub fn bind(scene: &Scene, root: NodeHandle, clip: &AnimationClip) -> Result<Vec<PropertyBinding>> {
        if !scene.contains(root) {
            return Err(Error::clip_integrity(&clip.name, "model root is not in the scene"));
        }

        let names = scene.name_index(root);
        let mut bindings = Vec::with_capacity(clip.tracks.len());

        for (track_index, track) in clip.tracks.iter().enumerate() {
            let node_name = &track.meta.node_name;
            let target = track.meta.target;

            let Some(&node_handle) = names.get(node_name) else {
                return Err(Error::clip_integrity(
                    &clip.name,
                    format!("track {track_index} targets missing node '{node_name}'"),
                ));
            };

            if !track.data.fits(target) {
                return Err(Error::clip_integrity(
                    &clip.name,
                    format!(
                        "track {track_index} holds {} data but targets {target:?}",
                        track.data.kind_name()
                    ),
                ));
            }

            track.data.check().map_err(|reason| {
                Error::clip_integrity(&clip.name, format!("track {track_index}: {reason}"))
            })?;

            bindings.push(PropertyBinding {
                track_index,
                node_handle,
                target,
            });
        }

        Ok(bindings)
    }
}
