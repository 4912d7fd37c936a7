//! Rendering seam.
//!
//! Rasterization lives outside this crate. The engine talks to it through
//! the [`Renderer`] trait; [`HeadlessRenderer`] records frames instead of
//! drawing them.

pub mod headless;
pub mod viewport;

pub use headless::{FrameRecord, HeadlessRenderer};
pub use viewport::ViewportResizeHandler;

use crate::errors::Result;
use crate::scene::{RenderCamera, Scene};

/// A drawing backend for one output surface.
pub trait Renderer {
    /// Reconfigures the output surface, in physical pixels.
    fn resize(&mut self, width: u32, height: u32);

    /// Current surface size as `(width, height)`.
    fn size(&self) -> (u32, u32);

    /// Draws `scene` as seen from `camera`. World matrices are up to date.
    fn render(&mut self, scene: &Scene, camera: &RenderCamera) -> Result<()>;
}
