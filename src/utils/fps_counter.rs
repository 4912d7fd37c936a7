/// Frame rate measurement fed with per-frame deltas.
///
/// Reports once per accumulated second of frame time.
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    frame_count: u32,
    accumulated: f32,
    pub current_fps: f32,
}

impl FpsCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, dt: f32) -> Option<f32> {
        self.frame_count += 1;
        self.accumulated += dt.max(0.0);

        if self.accumulated >= 1.0 {
            self.current_fps = self.frame_count as f32 / self.accumulated;

            self.accumulated = 0.0;
            self.frame_count = 0;

            return Some(self.current_fps);
        }

        None
    }
}
