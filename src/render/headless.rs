use std::collections::VecDeque;

use crate::errors::Result;
use crate::render::Renderer;
use crate::scene::{RenderCamera, Scene};

/// What a [`HeadlessRenderer`] saw for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRecord {
    /// Zero-based index of the rendered frame.
    pub frame: u64,
    pub surface_size: (u32, u32),
    pub camera_aspect: f32,
    pub meshes_drawn: usize,
}

/// Renderer that keeps a log of frames instead of drawing.
///
/// Used by tests and by hosts without a GPU.
#[derive(Debug, Clone)]
pub struct HeadlessRenderer {
    size: (u32, u32),
    frames: VecDeque<FrameRecord>,
    /// Records beyond this many are discarded from the front.
    history: usize,
    rendered: u64,
}

impl HeadlessRenderer {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            frames: VecDeque::new(),
            history: 1024,
            rendered: 0,
        }
    }

    #[must_use]
    pub fn with_history(mut self, history: usize) -> Self {
        self.history = history.max(1);
        self
    }

    /// Total frames rendered.
    #[must_use]
    pub fn frames_rendered(&self) -> u64 {
        self.rendered
    }

    /// Retained records, oldest first.
    pub fn frames(&self) -> impl ExactSizeIterator<Item = &FrameRecord> {
        self.frames.iter()
    }

    #[must_use]
    pub fn last_frame(&self) -> Option<&FrameRecord> {
        self.frames.back()
    }
}

impl Renderer for HeadlessRenderer {
    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn render(&mut self, scene: &Scene, camera: &RenderCamera) -> Result<()> {
        if self.frames.len() >= self.history {
            self.frames.pop_front();
        }
        self.frames.push_back(FrameRecord {
            frame: self.rendered,
            surface_size: self.size,
            camera_aspect: camera.aspect,
            meshes_drawn: scene.visible_meshes().count(),
        });
        self.rendered += 1;
        Ok(())
    }
}
