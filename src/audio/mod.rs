pub mod events;

use std::collections::HashMap;
use std::path::Path;

use events::AudioEvent;
use kira::{
    manager::{AudioManager, AudioManagerSettings, backend::DefaultBackend},
    sound::static_sound::{StaticSoundData, StaticSoundHandle, StaticSoundSettings},
    Volume,
};
use log::{debug, info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::resource_path::find_sound;

const SOUNDS: &[&str] = &["points", "hurt", "bgm"];

pub struct AudioSystem {
    manager: AudioManager,
    sounds: HashMap<String, StaticSoundData>,
    music: Option<StaticSoundHandle>,
    sfx_volume: f32,
    music_volume: f32,
    enabled: bool,
}

impl AudioSystem {
    pub fn new(config: &Config) -> Result<Self> {
        let manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())
            .map_err(|e| Error::Audio(e.to_string()))?;

        Ok(Self {
            manager,
            sounds: HashMap::new(),
            music: None,
            sfx_volume: config.sfx_volume,
            music_volume: config.music_volume,
            enabled: !config.mute,
        })
    }

    pub fn load_sound(&mut self, name: &str, path: &Path) -> Result<()> {
        let sound_data = StaticSoundData::from_file(path).map_err(|e| Error::Audio(e.to_string()))?;
        self.sounds.insert(name.to_string(), sound_data);
        debug!("Loaded sound {} from {}", name, path.display());
        Ok(())
    }

    pub fn load_all_sounds(&mut self, assets_dir: Option<&Path>) {
        for name in SOUNDS {
            match find_sound(name, assets_dir) {
                Some(path) => {
                    if let Err(e) = self.load_sound(name, &path) {
                        warn!("Failed to load sound {}: {}", name, e);
                    }
                }
                None => warn!("Sound {} not found under assets/audio", name),
            }
        }
    }

    pub fn play(&mut self, name: &str, volume: f32) {
        if !self.enabled {
            return;
        }

        if let Some(sound_data) = self.sounds.get(name) {
            let mut settings = StaticSoundSettings::default();
            settings.volume = Volume::Amplitude(volume as f64).into();

            if let Err(e) = self.manager.play(sound_data.clone().with_settings(settings)) {
                warn!("Failed to play {}: {:?}", name, e);
            }
        }
    }

    pub fn play_looping(&mut self, name: &str, volume: f32) {
        if !self.enabled || self.music.is_some() {
            return;
        }

        if let Some(sound_data) = self.sounds.get(name) {
            let mut settings = StaticSoundSettings::default().loop_region(0.0..);
            settings.volume = Volume::Amplitude(volume as f64).into();

            match self.manager.play(sound_data.clone().with_settings(settings)) {
                Ok(handle) => {
                    info!("Background music started");
                    self.music = Some(handle);
                }
                Err(e) => warn!("Failed to play {}: {:?}", name, e),
            }
        }
    }

    pub fn process_event(&mut self, event: &AudioEvent) {
        match event {
            AudioEvent::Points | AudioEvent::Hurt => self.play(event.sound_name(), self.sfx_volume),
            AudioEvent::BackgroundMusic => self.play_looping(event.sound_name(), self.music_volume),
        }
    }
}
