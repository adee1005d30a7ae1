use glam::Vec2;

/// Fits the fixed design area into the window, centered, without stretching.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub design: Vec2,
    pub physical: Vec2,
}

impl Viewport {
    pub fn new(design: Vec2, physical: Vec2) -> Self {
        Self { design, physical }
    }

    pub fn scale(&self) -> f32 {
        (self.physical.x / self.design.x).min(self.physical.y / self.design.y)
    }

    pub fn offset(&self) -> Vec2 {
        (self.physical - self.design * self.scale()) * 0.5
    }

    pub fn to_design(&self, physical: Vec2) -> Vec2 {
        (physical - self.offset()) / self.scale()
    }

    pub fn to_physical(&self, design: Vec2) -> Vec2 {
        design * self.scale() + self.offset()
    }

    /// Design point to normalized device coordinates.
    pub fn to_ndc(&self, design: Vec2) -> Vec2 {
        let p = self.to_physical(design);
        Vec2::new(p.x / self.physical.x * 2.0 - 1.0, 1.0 - p.y / self.physical.y * 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letterboxes_wide_windows() {
        let viewport = Viewport::new(Vec2::new(400.0, 700.0), Vec2::new(1400.0, 1400.0));
        assert_eq!(viewport.scale(), 2.0);
        assert_eq!(viewport.offset(), Vec2::new(300.0, 0.0));
        assert_eq!(viewport.to_design(Vec2::new(700.0, 700.0)), Vec2::new(200.0, 350.0));
        assert_eq!(viewport.to_physical(Vec2::new(0.0, 0.0)), Vec2::new(300.0, 0.0));
    }

    #[test]
    fn ndc_corners() {
        let viewport = Viewport::new(Vec2::new(400.0, 700.0), Vec2::new(400.0, 700.0));
        assert_eq!(viewport.to_ndc(Vec2::ZERO), Vec2::new(-1.0, 1.0));
        assert_eq!(viewport.to_ndc(Vec2::new(400.0, 700.0)), Vec2::new(1.0, -1.0));
    }
}
