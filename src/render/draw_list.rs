use glam::Vec2;

/// A tinted box sprite, centered on `center`. `rotation` is in radians.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteCmd {
    pub center: Vec2,
    pub size: Vec2,
    pub rotation: f32,
    pub color: [f32; 4],
}

/// Text centered on `center`. Lines split on `\n` are each centered.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    pub center: Vec2,
    pub size: f32,
    pub color: [f32; 4],
}

/// Everything a scene wants on screen this frame, in design units.
/// Sprites draw in order, text goes on top.
#[derive(Debug, Default, Clone)]
pub struct DrawList {
    pub sprites: Vec<SpriteCmd>,
    pub texts: Vec<TextCmd>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sprite(&mut self, center: Vec2, size: Vec2, rotation: f32, color: [f32; 4]) {
        self.sprites.push(SpriteCmd { center, size, rotation, color });
    }

    pub fn text(&mut self, text: impl Into<String>, center: Vec2, size: f32, color: [f32; 4]) {
        self.texts.push(TextCmd {
            text: text.into(),
            center,
            size,
            color,
        });
    }

    #[cfg(test)]
    pub fn find_text(&self, prefix: &str) -> Option<&TextCmd> {
        self.texts.iter().find(|t| t.text.starts_with(prefix))
    }
}
