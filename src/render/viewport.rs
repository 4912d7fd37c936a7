use crate::errors::{Error, Result};
use crate::render::Renderer;
use crate::scene::Camera;

/// Keeps the camera projection and the output surface matched to the
/// viewport size.
pub struct ViewportResizeHandler;

impl ViewportResizeHandler {
    /// Applies a viewport size of `width` x `height` physical pixels.
    ///
    /// Sets the camera aspect to `width / height`, which marks and rebuilds
    /// the projection, then resizes the surface. A zero dimension fails with
    /// [`Error::DegenerateViewport`] and changes nothing.
    pub fn on_resize<R: Renderer + ?Sized>(
        camera: &mut Camera,
        renderer: &mut R,
        width: u32,
        height: u32,
    ) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(Error::DegenerateViewport { width, height });
        }

        camera.set_aspect(width as f32 / height as f32);
        renderer.resize(width, height);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::HeadlessRenderer;

    #[test]
    fn zero_height_changes_nothing() {
        let mut camera = Camera::new_perspective(35.0, 1.5, 0.1, 100.0);
        let mut renderer = HeadlessRenderer::new(300, 200);

        let result = ViewportResizeHandler::on_resize(&mut camera, &mut renderer, 800, 0);

        assert!(matches!(result, Err(Error::DegenerateViewport { width: 800, height: 0 })));
        assert!((camera.aspect() - 1.5).abs() < 1e-6);
        assert_eq!(renderer.size(), (300, 200));
    }

    #[test]
    fn resize_updates_aspect_and_surface() {
        let mut camera = Camera::new_perspective(35.0, 1.0, 0.1, 100.0);
        let mut renderer = HeadlessRenderer::new(100, 100);

        ViewportResizeHandler::on_resize(&mut camera, &mut renderer, 1920, 1080).unwrap();

        assert!((camera.aspect() - 1920.0 / 1080.0).abs() < 1e-6);
        assert!(!camera.is_projection_dirty());
        assert_eq!(renderer.size(), (1920, 1080));
    }
}
