//! Screen layout in design units (400x700, y down) and the rotating group of
//! click targets.

use glam::{Affine2, Vec2};

pub const DESIGN_WIDTH: f32 = 400.0;
pub const DESIGN_HEIGHT: f32 = 700.0;
pub const CENTER_X: f32 = DESIGN_WIDTH / 2.0;
pub const CENTER_Y: f32 = DESIGN_HEIGHT / 2.0;

/// Edge length of the unscaled box sprite.
pub const BOX_SIZE: f32 = 64.0;
pub const BUTTON_SCALE: f32 = 1.5;
pub const GROUP_BACKDROP_SCALE: f32 = BUTTON_SCALE * 2.2;

pub const SCORE_POS: Vec2 = Vec2::new(CENTER_X, 45.0);
pub const SCORE_SIZE: f32 = 24.0;
pub const HIGH_SCORE_POS: Vec2 = Vec2::new(CENTER_X, 85.0);
pub const HIGH_SCORE_SIZE: f32 = 15.0;
pub const TIMER_POS: Vec2 = Vec2::new(CENTER_X, 135.0);
pub const TARGET_POS: Vec2 = Vec2::new(CENTER_X, 210.0);
pub const GROUP_POS: Vec2 = Vec2::new(CENTER_X, CENTER_Y + 80.0);

pub const TITLE_POS: Vec2 = Vec2::new(CENTER_X, 130.0);
pub const TITLE_SIZE: f32 = 66.0;
pub const PLAY_POS: Vec2 = Vec2::new(CENTER_X, CENTER_Y + 50.0);
pub const PLAY_SIZE: Vec2 = Vec2::new(140.0, 64.0);
pub const PLAY_TEXT_SIZE: f32 = 28.0;

/// Slot offsets inside the group: top-left, bottom-left, top-right, bottom-right.
pub const SLOT_OFFSETS: [Vec2; 4] = [
    Vec2::new(-50.0, -50.0),
    Vec2::new(-50.0, 50.0),
    Vec2::new(50.0, -50.0),
    Vec2::new(50.0, 50.0),
];

pub fn button_size() -> Vec2 {
    Vec2::splat(BOX_SIZE * BUTTON_SCALE)
}

pub fn rect_contains(center: Vec2, size: Vec2, point: Vec2) -> bool {
    let d = (point - center).abs();
    d.x <= size.x * 0.5 && d.y <= size.y * 0.5
}

/// The container holding the four click targets. Rotation is in degrees,
/// clockwise on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetGroup {
    pub position: Vec2,
    pub angle: f32,
    pub shake_offset: f32,
}

impl TargetGroup {
    pub fn new() -> Self {
        Self {
            position: GROUP_POS,
            angle: 0.0,
            shake_offset: 0.0,
        }
    }

    pub fn rotate_quarter(&mut self) {
        self.angle = (self.angle + 90.0) % 360.0;
    }

    pub fn rotation(&self) -> f32 {
        self.angle.to_radians()
    }

    pub fn center(&self) -> Vec2 {
        self.position + Vec2::new(self.shake_offset, 0.0)
    }

    pub fn transform(&self) -> Affine2 {
        Affine2::from_angle_translation(self.rotation(), self.center())
    }

    pub fn slot_center(&self, slot: usize) -> Vec2 {
        self.transform().transform_point2(SLOT_OFFSETS[slot])
    }

    /// Slot under `point`. Later slots sit on top where boxes overlap.
    pub fn slot_at(&self, point: Vec2) -> Option<usize> {
        let local = self.transform().inverse().transform_point2(point);
        (0..SLOT_OFFSETS.len())
            .rev()
            .find(|&slot| rect_contains(SLOT_OFFSETS[slot], button_size(), local))
    }
}

impl Default for TargetGroup {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vec2, b: Vec2) {
        assert!((a - b).length() < 1e-3, "{:?} != {:?}", a, b);
    }

    #[test]
    fn unrotated_slots_match_fixed_positions() {
        let group = TargetGroup::new();
        assert_eq!(group.slot_at(GROUP_POS + Vec2::new(-50.0, -50.0)), Some(0));
        assert_eq!(group.slot_at(GROUP_POS + Vec2::new(-50.0, 50.0)), Some(1));
        assert_eq!(group.slot_at(GROUP_POS + Vec2::new(50.0, -50.0)), Some(2));
        assert_eq!(group.slot_at(GROUP_POS + Vec2::new(50.0, 50.0)), Some(3));
        assert_eq!(group.slot_at(GROUP_POS + Vec2::new(0.0, 200.0)), None);
    }

    #[test]
    fn quarter_turn_moves_top_left_to_top_right() {
        let mut group = TargetGroup::new();
        group.rotate_quarter();
        assert_close(group.slot_center(0), GROUP_POS + Vec2::new(50.0, -50.0));
        assert_eq!(group.slot_at(GROUP_POS + Vec2::new(50.0, -50.0)), Some(0));
        assert_eq!(group.slot_at(GROUP_POS + Vec2::new(-50.0, -50.0)), Some(1));
    }

    #[test]
    fn angle_wraps() {
        let mut group = TargetGroup::new();
        for _ in 0..4 {
            group.rotate_quarter();
        }
        assert_eq!(group.angle, 0.0);
    }

    #[test]
    fn shake_offset_shifts_hit_area() {
        let mut group = TargetGroup::new();
        group.shake_offset = 1.0;
        assert_close(group.slot_center(3), GROUP_POS + Vec2::new(51.0, 50.0));
    }
}
