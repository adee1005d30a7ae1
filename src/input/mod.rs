use glam::Vec2;

/// Pointer state in physical window pixels.
#[derive(Default)]
pub struct InputState {
    pub mouse_x: f32,
    pub mouse_y: f32,
    pub mouse_down: bool,
    pointer_down: Vec<Vec2>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_mouse_button_press(&mut self) {
        if !self.mouse_down {
            self.pointer_down.push(Vec2::new(self.mouse_x, self.mouse_y));
        }
        self.mouse_down = true;
    }

    pub fn handle_mouse_button_release(&mut self) {
        self.mouse_down = false;
    }

    pub fn update_mouse_position(&mut self, x: f32, y: f32) {
        self.mouse_x = x;
        self.mouse_y = y;
    }

    /// Pointer-down positions since the last call, oldest first.
    pub fn take_pointer_down(&mut self) -> Vec<Vec2> {
        std::mem::take(&mut self.pointer_down)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_records_position_once_until_release() {
        let mut input = InputState::new();
        input.update_mouse_position(10.0, 20.0);
        input.handle_mouse_button_press();
        input.handle_mouse_button_press();
        assert_eq!(input.take_pointer_down(), vec![Vec2::new(10.0, 20.0)]);
        assert!(input.take_pointer_down().is_empty());

        input.handle_mouse_button_release();
        input.update_mouse_position(5.0, 6.0);
        input.handle_mouse_button_press();
        assert_eq!(input.take_pointer_down(), vec![Vec2::new(5.0, 6.0)]);
    }
}
