use glam::Vec2;
use log::info;
use winit::keyboard::KeyCode;

use crate::audio::events::{AudioEvent, AudioEventQueue};
use crate::game::layout::{rect_contains, PLAY_POS, PLAY_SIZE, PLAY_TEXT_SIZE, TITLE_POS, TITLE_SIZE};
use crate::game::palette::{palette_color, WHITE};
use crate::render::draw_list::DrawList;

pub const TITLE: &str = "Color\nClicky";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    StartGame,
    Quit,
}

/// Lives for the whole run, so the music flag survives menu round trips.
#[derive(Default)]
pub struct MenuState {
    music_started: bool,
}

impl MenuState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn music_started(&self) -> bool {
        self.music_started
    }

    pub fn enter(&mut self) {
        info!("Entering menu");
    }

    pub fn handle_pointer(&mut self, pos: Vec2, audio: &mut AudioEventQueue) -> Option<MenuAction> {
        if rect_contains(PLAY_POS, PLAY_SIZE, pos) {
            Some(self.start_game(audio))
        } else {
            None
        }
    }

    pub fn handle_key(&mut self, key: KeyCode, audio: &mut AudioEventQueue) -> Option<MenuAction> {
        match key {
            KeyCode::Enter | KeyCode::Space => Some(self.start_game(audio)),
            KeyCode::Escape => Some(MenuAction::Quit),
            _ => None,
        }
    }

    fn start_game(&mut self, audio: &mut AudioEventQueue) -> MenuAction {
        if !self.music_started {
            self.music_started = true;
            audio.push(AudioEvent::BackgroundMusic);
        }
        MenuAction::StartGame
    }

    pub fn draw(&self, list: &mut DrawList) {
        list.text(TITLE, TITLE_POS, TITLE_SIZE, WHITE);
        list.sprite(PLAY_POS, PLAY_SIZE, 0.0, palette_color(3));
        list.text("PLAY", PLAY_POS, PLAY_TEXT_SIZE, [0.1, 0.1, 0.1, 1.0]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_starts_music_only_once() {
        let mut menu = MenuState::new();
        let mut audio = AudioEventQueue::new();

        assert_eq!(menu.handle_pointer(PLAY_POS, &mut audio), Some(MenuAction::StartGame));
        assert_eq!(audio.drain(), vec![AudioEvent::BackgroundMusic]);
        assert!(menu.music_started());

        assert_eq!(menu.handle_pointer(PLAY_POS, &mut audio), Some(MenuAction::StartGame));
        assert!(audio.drain().is_empty());
    }

    #[test]
    fn clicks_off_the_button_do_nothing() {
        let mut menu = MenuState::new();
        let mut audio = AudioEventQueue::new();
        assert_eq!(menu.handle_pointer(Vec2::new(5.0, 5.0), &mut audio), None);
        assert!(audio.drain().is_empty());
        assert!(!menu.music_started());
    }

    #[test]
    fn keys() {
        let mut menu = MenuState::new();
        let mut audio = AudioEventQueue::new();
        assert_eq!(menu.handle_key(KeyCode::Escape, &mut audio), Some(MenuAction::Quit));
        assert!(audio.drain().is_empty());
        assert_eq!(menu.handle_key(KeyCode::Enter, &mut audio), Some(MenuAction::StartGame));
        assert_eq!(audio.drain(), vec![AudioEvent::BackgroundMusic]);
        assert_eq!(menu.handle_key(KeyCode::KeyA, &mut audio), None);
    }

    #[test]
    fn draws_title_and_play() {
        let menu = MenuState::new();
        let mut list = DrawList::new();
        menu.draw(&mut list);
        assert!(list.find_text(TITLE).is_some());
        assert!(list.find_text("PLAY").is_some());
        assert_eq!(list.sprites.len(), 1);
    }
}
