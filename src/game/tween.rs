/// Linear tween between two values. `repeat` extra cycles follow the first,
/// each restarting from `from`.
#[derive(Debug, Clone)]
pub struct Tween {
    from: f32,
    to: f32,
    duration: f32,
    repeat: u32,
    elapsed: f32,
    playing: bool,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: f32, repeat: u32) -> Self {
        Self {
            from,
            to,
            duration: duration.max(f32::EPSILON),
            repeat,
            elapsed: 0.0,
            playing: false,
        }
    }

    /// The group shake: one unit either side of rest, 120 ms, three cycles.
    pub fn shake() -> Self {
        Self::new(-1.0, 1.0, 0.12, 2)
    }

    pub fn play(&mut self) {
        self.elapsed = 0.0;
        self.playing = true;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn total_duration(&self) -> f32 {
        self.duration * (self.repeat + 1) as f32
    }

    pub fn advance(&mut self, dt: f32) {
        if !self.playing {
            return;
        }
        self.elapsed += dt;
        if self.elapsed >= self.total_duration() {
            self.playing = false;
        }
    }

    /// Current value, or 0 when idle.
    pub fn value(&self) -> f32 {
        if !self.playing {
            return 0.0;
        }
        let t = (self.elapsed % self.duration) / self.duration;
        self.from + (self.to - self.from) * t
    }
}
