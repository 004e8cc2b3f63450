use glam::Vec2;

/// Pointer tracked in screen-normalized coordinates (origin top-left, y down)
#[derive(Debug, Clone, Copy)]
pub struct PointerState {
    screen_position: Vec2,
    button_down: bool,
}

impl Default for PointerState {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerState {
    pub fn new() -> Self {
        Self {
            screen_position: Vec2::splat(0.5),
            button_down: false,
        }
    }

    pub fn process_motion(&mut self, screen_position: Vec2) {
        self.screen_position = screen_position;
    }

    pub fn process_button(&mut self, pressed: bool) {
        self.button_down = pressed;
    }

    pub fn is_pressed(&self) -> bool {
        self.button_down
    }

    pub fn screen_position(&self) -> Vec2 {
        self.screen_position
    }

    /// Position in obstacle field coordinates (y up)
    pub fn field_position(&self) -> Vec2 {
        screen_to_field(self.screen_position)
    }
}

pub fn screen_to_field(screen: Vec2) -> Vec2 {
    Vec2::new(screen.x, 1.0 - screen.y)
}
