#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioEvent {
    /// Correct box clicked.
    Points,
    /// Wrong box clicked.
    Hurt,
    /// Start the looping background track.
    BackgroundMusic,
}

impl AudioEvent {
    pub fn sound_name(&self) -> &'static str {
        match self {
            AudioEvent::Points => "points",
            AudioEvent::Hurt => "hurt",
            AudioEvent::BackgroundMusic => "bgm",
        }
    }
}

#[derive(Default)]
pub struct AudioEventQueue {
    pub events: Vec<AudioEvent>,
}

impl AudioEventQueue {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: AudioEvent) {
        self.events.push(event);
    }

    pub fn drain(&mut self) -> Vec<AudioEvent> {
        self.events.drain(..).collect()
    }
}
