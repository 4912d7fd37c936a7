use std::sync::Arc;

use slotmap::{SlotMap, new_key_type};

use crate::animation::action::AnimationAction;
use crate::animation::binder::Binder;
use crate::animation::clip::AnimationClip;
use crate::errors::Result;
use crate::scene::{NodeHandle, Scene};

new_key_type! {
    /// Handle of an action owned by an [`AnimationMixer`].
    pub struct ActionHandle;
}

/// Plays clips on one model.
///
/// The mixer references its model through the root handle and only ever
/// writes to nodes of that subtree.
#[derive(Debug)]
pub struct AnimationMixer {
    root: NodeHandle,
    actions: SlotMap<ActionHandle, AnimationAction>,
}

impl AnimationMixer {
    #[must_use]
    pub fn new(root: NodeHandle) -> Self {
        Self {
            root,
            actions: SlotMap::with_key(),
        }
    }

    #[must_use]
    pub fn root(&self) -> NodeHandle {
        self.root
    }

    /// Returns the action for `clip`, creating and binding it on first use.
    ///
    /// Clips are identified by their `Arc`, so asking twice for the same clip
    /// yields the same action while a distinct clip that shares its name gets
    /// an action of its own. Binding fails with
    /// [`Error::ClipIntegrity`](crate::errors::Error::ClipIntegrity) if any
    /// track cannot be resolved under the root.
    pub fn clip_action(&mut self, clip: Arc<AnimationClip>, scene: &Scene) -> Result<ActionHandle> {
        if let Some((handle, _)) = self
            .actions
            .iter()
            .find(|(_, a)| Arc::ptr_eq(a.clip(), &clip))
        {
            return Ok(handle);
        }

        let bindings = Binder::bind(scene, self.root, &clip)?;
        log::debug!(
            "Bound clip '{}' ({} tracks, {:.2}s) to {:?}",
            clip.name,
            bindings.len(),
            clip.duration,
            self.root
        );
        Ok(self.actions.insert(AnimationAction::new(clip, bindings)))
    }

    #[must_use]
    pub fn action(&self, handle: ActionHandle) -> Option<&AnimationAction> {
        self.actions.get(handle)
    }

    pub fn action_mut(&mut self, handle: ActionHandle) -> Option<&mut AnimationAction> {
        self.actions.get_mut(handle)
    }

    pub fn actions(&self) -> impl Iterator<Item = (ActionHandle, &AnimationAction)> {
        self.actions.iter()
    }

    /// Checks every action's bindings against the scene.
    pub fn validate(&self, scene: &Scene) -> Result<()> {
        self.actions.values().try_for_each(|a| a.validate(scene))
    }

    /// Advances every playing action by `dt` and writes the sampled pose.
    ///
    /// If a bound node was removed the update fails with
    /// [`Error::StaleBinding`](crate::errors::Error::StaleBinding) before any
    /// action advances or writes.
    pub fn update(&mut self, dt: f32, scene: &mut Scene) -> Result<()> {
        self.validate(scene)?;
        self.advance_validated(dt, scene);
        Ok(())
    }

    /// Advances and applies without re-checking bindings. The caller has
    /// already run [`validate`](Self::validate) against `scene`.
    pub(crate) fn advance_validated(&mut self, dt: f32, scene: &mut Scene) {
        for action in self.actions.values_mut().filter(|a| a.is_playing()) {
            action.advance(dt);
            action.apply(scene);
        }
    }
}
