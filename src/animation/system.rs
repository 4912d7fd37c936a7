use crate::animation::mixer::AnimationMixer;
use crate::errors::Result;
use crate::scene::Scene;

/// Index of a mixer in the [`AnimationSystem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MixerId(pub usize);

#[derive(Debug)]
struct MixerSlot {
    mixer: AnimationMixer,
    disabled: bool,
}

/// Registry of every mixer in the application.
///
/// Mixers are updated in insertion order and are never removed. A mixer whose
/// bindings go stale is disabled: its model keeps the last pose written and
/// the other mixers carry on.
#[derive(Debug, Default)]
pub struct AnimationSystem {
    slots: Vec<MixerSlot>,
}

impl AnimationSystem {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, mixer: AnimationMixer) -> MixerId {
        self.slots.push(MixerSlot {
            mixer,
            disabled: false,
        });
        MixerId(self.slots.len() - 1)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: MixerId) -> Option<&AnimationMixer> {
        self.slots.get(id.0).map(|s| &s.mixer)
    }

    pub fn get_mut(&mut self, id: MixerId) -> Option<&mut AnimationMixer> {
        self.slots.get_mut(id.0).map(|s| &mut s.mixer)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnimationMixer> {
        self.slots.iter().map(|s| &s.mixer)
    }

    /// Whether the mixer was switched off after a stale binding.
    #[must_use]
    pub fn is_disabled(&self, id: MixerId) -> bool {
        self.slots.get(id.0).is_some_and(|s| s.disabled)
    }

    #[must_use]
    pub fn disabled_count(&self) -> usize {
        self.slots.iter().filter(|s| s.disabled).count()
    }

    /// Checks the bindings of every enabled mixer without touching the scene.
    pub fn validate(&self, scene: &Scene) -> Result<()> {
        self.slots
            .iter()
            .filter(|s| !s.disabled)
            .try_for_each(|s| s.mixer.validate(scene))
    }

    /// Updates every enabled mixer with the same `dt`, in insertion order.
    ///
    /// Bindings are checked once, before anything advances. Mixers with a
    /// stale binding are disabled and the first error is returned; nothing
    /// advances on that call. Later calls skip the disabled mixers.
    pub fn update(&mut self, dt: f32, scene: &mut Scene) -> Result<()> {
        let mut first_error = None;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.disabled {
                continue;
            }
            if let Err(err) = slot.mixer.validate(scene) {
                log::error!(
                    "Disabling mixer {index} rooted at {:?}: {err}",
                    slot.mixer.root()
                );
                slot.disabled = true;
                first_error.get_or_insert(err);
            }
        }
        if let Some(err) = first_error {
            return Err(err);
        }

        for slot in self.slots.iter_mut().filter(|s| !s.disabled) {
            slot.mixer.advance_validated(dt, scene);
        }
        Ok(())
    }
}
