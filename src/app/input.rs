use glam::Vec2;

/// Mouse buttons the camera controls react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    const fn bit(self) -> u8 {
        match self {
            MouseButton::Left => 1,
            MouseButton::Right => 1 << 1,
            MouseButton::Middle => 1 << 2,
        }
    }
}

/// Per-frame pointer state, filled by the host and read by controllers.
#[derive(Default, Debug, Clone)]
pub struct Input {
    /// Cursor position inside the window
    pub cursor_position: Vec2,
    /// Cursor movement accumulated since the last frame
    pub cursor_delta: Vec2,
    /// Wheel movement accumulated since the last frame
    pub scroll_delta: Vec2,
    /// Surface size in physical pixels
    pub screen_size: Vec2,
    buttons: u8,
    has_cursor: bool,
}

impl Input {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears per-frame deltas.
    pub fn end_frame(&mut self) {
        self.cursor_delta = Vec2::ZERO;
        self.scroll_delta = Vec2::ZERO;
    }

    pub fn handle_resize(&mut self, width: u32, height: u32) {
        self.screen_size = Vec2::new(width as f32, height as f32);
    }

    pub fn handle_cursor_move(&mut self, x: f32, y: f32) {
        let new_pos = Vec2::new(x, y);
        // The first event only establishes the position.
        if self.has_cursor {
            self.cursor_delta += new_pos - self.cursor_position;
        }
        self.cursor_position = new_pos;
        self.has_cursor = true;
    }

    pub fn handle_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        if pressed {
            self.buttons |= button.bit();
        } else {
            self.buttons &= !button.bit();
        }
    }

    pub fn handle_scroll(&mut self, dx: f32, dy: f32) {
        self.scroll_delta += Vec2::new(dx, dy);
    }

    #[must_use]
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons & button.bit() != 0
    }
}
