//! Engine Core Module
//!
//! [`Engine`] is the explicit context that owns everything a frame touches:
//! the scene, the renderer, the frame clock, the mixer registry, background
//! model loading, input and the camera controller. It has no window logic,
//! so any host (the winit [`App`](crate::app::App), a test, a headless tool)
//! can drive it.
//!
//! # Frame order
//!
//! [`Engine::tick`] runs, once per call:
//!
//! 1. integrate finished model loads
//! 2. read the frame delta from the clock
//! 3. apply the orbit controls to the active camera
//! 4. update every enabled mixer in insertion order; a mixer with a stale
//!    binding is disabled and that one frame is skipped
//! 5. refresh world matrices and the camera projection
//! 6. render once
//!
//! # Example
//!
//! ```rust,ignore
//! use diorama::{Engine, HeadlessRenderer, Scene};
//!
//! let mut engine = Engine::new(scene, HeadlessRenderer::new(800, 600));
//! engine.resize(1024, 768);
//! let frame = engine.tick()?;
//! ```

use std::time::Duration;

use glam::Vec3;

use crate::animation::{AnimationMixer, AnimationSystem, MixerId};
use crate::app::input::Input;
use crate::assets::{LoadResult, ModelLoader, ModelPlacement};
use crate::errors::{Error, Result};
use crate::render::{Renderer, ViewportResizeHandler};
use crate::scene::{NodeHandle, Scene};
use crate::utils::orbit_control::OrbitControls;
use crate::utils::time::Clock;

/// Owns the scene and drives it one frame at a time.
pub struct Engine<R: Renderer> {
    pub scene: Scene,
    pub renderer: R,
    pub animation: AnimationSystem,
    pub input: Input,
    pub controls: Option<OrbitControls>,

    clock: Clock,
    loader: Option<ModelLoader>,

    time: f32,
    frame_count: u64,
}

impl<R: Renderer> Engine<R> {
    /// Creates an engine reading wall-clock time. The camera aspect is
    /// synced with the renderer's current size.
    pub fn new(scene: Scene, renderer: R) -> Self {
        let (width, height) = renderer.size();
        let mut engine = Self {
            scene,
            renderer,
            animation: AnimationSystem::new(),
            input: Input::new(),
            controls: None,
            clock: Clock::new(),
            loader: None,
            time: 0.0,
            frame_count: 0,
        };
        engine.resize(width, height);
        engine
    }

    /// Replaces the frame clock.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_loader(mut self, loader: ModelLoader) -> Self {
        self.loader = Some(loader);
        self
    }

    #[must_use]
    pub fn with_controls(mut self, controls: OrbitControls) -> Self {
        self.controls = Some(controls);
        self
    }

    /// Total time in seconds accumulated over all ticks.
    #[inline]
    #[must_use]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Number of frames rendered.
    #[inline]
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Current surface size in pixels as `(width, height)`.
    #[inline]
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        self.renderer.size()
    }

    /// Model loads requested but not yet integrated.
    #[must_use]
    pub fn pending_loads(&self) -> usize {
        self.loader.as_ref().map_or(0, ModelLoader::in_flight)
    }

    /// Registers a mixer. It is updated every tick from now on.
    pub fn add_mixer(&mut self, mixer: AnimationMixer) -> MixerId {
        self.animation.add(mixer)
    }

    // ========================================================================
    // Resize
    // ========================================================================

    /// Handles a viewport size change, in physical pixels.
    ///
    /// The camera aspect and the surface size change in the same call, so
    /// the next tick always sees both. A zero dimension is ignored and the
    /// previous aspect kept.
    pub fn resize(&mut self, width: u32, height: u32) {
        let result = match self.scene.main_camera_mut() {
            Some(camera) => {
                ViewportResizeHandler::on_resize(camera, &mut self.renderer, width, height)
            }
            None if width > 0 && height > 0 => {
                self.renderer.resize(width, height);
                Ok(())
            }
            None => Err(Error::DegenerateViewport { width, height }),
        };

        match result {
            Ok(()) => {
                self.input.handle_resize(width, height);
                log::debug!("Viewport resized to {width}x{height}");
            }
            Err(err) => log::debug!("Ignoring resize: {err}"),
        }
    }

    // ========================================================================
    // Model loading
    // ========================================================================

    /// Starts loading a model in the background. It joins the scene at the
    /// start of a later tick.
    pub fn request_model(&mut self, placement: ModelPlacement) -> Result<()> {
        let loader = self
            .loader
            .as_mut()
            .ok_or_else(|| Error::Config("no model loader configured".to_string()))?;
        loader.request(placement);
        Ok(())
    }

    /// Adds every model whose load has finished. Returns how many joined the
    /// scene.
    pub fn integrate_loaded_models(&mut self) -> usize {
        let results = match self.loader.as_mut() {
            Some(loader) => loader.drain(),
            None => return 0,
        };
        self.integrate_all(results)
    }

    /// Blocks until every requested model has loaded or `timeout` elapses,
    /// then integrates what arrived. For headless hosts that need the models
    /// before the first frame.
    pub fn wait_for_models(&mut self, timeout: Duration) -> usize {
        let results = match self.loader.as_mut() {
            Some(loader) => loader.wait_all(timeout),
            None => return 0,
        };
        self.integrate_all(results)
    }

    fn integrate_all(&mut self, results: Vec<LoadResult>) -> usize {
        results
            .into_iter()
            .filter_map(|result| self.integrate(result))
            .count()
    }

    /// Instantiates the first root of a loaded model at its placement and,
    /// if the model has animations, plays its first clip on a new mixer.
    ///
    /// Load failures are logged and skipped. A clip that cannot be bound is
    /// logged and the model stays in its bind pose.
    pub fn integrate(&mut self, result: LoadResult) -> Option<NodeHandle> {
        let LoadResult { placement, prefab } = result;
        let prefab = match prefab {
            Ok(prefab) => prefab,
            Err(err) => {
                log::error!("Skipping model '{}': {err}", placement.path);
                return None;
            }
        };

        let roots = self.scene.instantiate(&prefab);
        let Some((&root, extra)) = roots.split_first() else {
            log::warn!("Model '{}' has no root node", placement.path);
            return None;
        };
        for &node in extra {
            self.scene.remove_node(node);
        }

        if let Some(node) = self.scene.get_node_mut(root) {
            node.transform.position = placement.position;
            node.transform.scale = Vec3::splat(placement.scale);
        }

        if let Some(clip) = prefab.animations.first() {
            let mut mixer = AnimationMixer::new(root);
            match mixer.clip_action(clip.clone(), &self.scene) {
                Ok(action) => {
                    if let Some(action) = mixer.action_mut(action) {
                        action.play();
                    }
                    self.animation.add(mixer);
                }
                Err(err) => log::error!("Model '{}' stays static: {err}", placement.path),
            }
        }

        log::info!(
            "Model '{}' added at {:?} ({} mixers)",
            placement.path,
            placement.position,
            self.animation.len()
        );
        Some(root)
    }

    // ========================================================================
    // Frame
    // ========================================================================

    /// Advances and renders one frame.
    ///
    /// If a mixer refers to a removed node the error is logged and returned,
    /// and nothing is animated or rendered this frame. That mixer stays
    /// disabled, so the next tick animates the others and renders again.
    pub fn tick(&mut self) -> Result<FrameState> {
        self.integrate_loaded_models();

        let dt = self.clock.get_delta();
        self.time += dt;

        if let Some(controls) = self.controls.as_mut()
            && let Some((transform, camera)) = self.scene.query_main_camera_bundle()
        {
            controls.update(transform, &self.input, camera.fov_degrees(), dt);
        }
        self.input.end_frame();

        if let Err(err) = self.animation.update(dt, &mut self.scene) {
            log::error!("Skipping frame {}: {err}", self.frame_count);
            return Err(err);
        }

        self.scene.update_matrix_world();

        let camera = self
            .scene
            .main_camera_mut()
            .ok_or_else(|| Error::Config("scene has no active camera".to_string()))?;
        camera.update_projection_matrix();
        let render_camera = camera.extract_render_camera();

        self.renderer.render(&self.scene, &render_camera)?;
        self.frame_count += 1;

        Ok(FrameState {
            time: self.time,
            dt,
            frame_count: self.frame_count,
        })
    }
}

/// Per-frame timing information returned by [`Engine::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameState {
    /// Total elapsed time since the first tick (in seconds).
    pub time: f32,
    /// Delta time since the previous tick (in seconds).
    pub dt: f32,
    /// Total number of frames rendered, including this one.
    pub frame_count: u64,
}
