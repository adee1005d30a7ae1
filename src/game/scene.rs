use glam::Vec2;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use winit::keyboard::KeyCode;

use crate::audio::events::AudioEventQueue;
use crate::game::game_scene::GameScene;
use crate::game::lifecycle::{LifecycleEvent, LifecycleHub};
use crate::game::menu::{MenuAction, MenuState};
use crate::render::draw_list::DrawList;
use crate::storage::{load_high_score, save_high_score, KeyValueStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneId {
    Menu,
    Game,
}

/// Routes input, frame ticks and lifecycle events to the current scene and
/// performs scene switches.
pub struct SceneManager {
    menu: MenuState,
    game: Option<GameScene>,
    lifecycle: LifecycleHub,
    store: Box<dyn KeyValueStore>,
    rng: StdRng,
}

impl SceneManager {
    pub fn new(store: Box<dyn KeyValueStore>, rng: StdRng) -> Self {
        let mut menu = MenuState::new();
        menu.enter();
        Self {
            menu,
            game: None,
            lifecycle: LifecycleHub::new(),
            store,
            rng,
        }
    }

    pub fn current(&self) -> SceneId {
        if self.game.is_some() {
            SceneId::Game
        } else {
            SceneId::Menu
        }
    }

    pub fn menu(&self) -> &MenuState {
        &self.menu
    }

    pub fn game(&self) -> Option<&GameScene> {
        self.game.as_ref()
    }

    pub fn game_mut(&mut self) -> Option<&mut GameScene> {
        self.game.as_mut()
    }

    pub fn lifecycle(&self) -> &LifecycleHub {
        &self.lifecycle
    }

    /// Read-only view of the persisted entries. Only the integration tests
    /// call this, to check what a finished game wrote.
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn high_score(&self) -> u32 {
        load_high_score(self.store.as_ref())
    }

    pub fn start_game(&mut self) {
        let rng = StdRng::seed_from_u64(self.rng.gen());
        self.game = Some(GameScene::new(self.high_score(), rng, &self.lifecycle));
    }

    fn return_to_menu(&mut self) {
        self.game = None;
        self.menu.enter();
    }

    fn apply_menu_action(&mut self, action: Option<MenuAction>) -> bool {
        match action {
            Some(MenuAction::StartGame) => {
                self.start_game();
                false
            }
            Some(MenuAction::Quit) => true,
            None => false,
        }
    }

    pub fn handle_pointer(&mut self, pos: Vec2, audio: &mut AudioEventQueue) {
        match self.game.as_mut() {
            Some(game) => game.handle_pointer(pos, audio),
            None => {
                let action = self.menu.handle_pointer(pos, audio);
                self.apply_menu_action(action);
            }
        }
    }

    /// Returns true when the player asked to quit.
    pub fn handle_key(&mut self, key: KeyCode, audio: &mut AudioEventQueue) -> bool {
        if self.game.is_some() {
            return false;
        }
        let action = self.menu.handle_key(key, audio);
        self.apply_menu_action(action)
    }

    pub fn handle_lifecycle(&mut self, event: LifecycleEvent) {
        self.lifecycle.dispatch(event);
    }

    pub fn update(&mut self, dt: f32) {
        let Some(game) = self.game.as_mut() else {
            return;
        };
        let Some(over) = game.update(dt) else {
            return;
        };

        if over.new_high_score {
            info!("New high score {}", over.score);
            if let Err(e) = save_high_score(self.store.as_mut(), over.score) {
                warn!("Failed to save high score: {}", e);
            }
        }
        self.return_to_menu();
    }

    pub fn draw(&self) -> DrawList {
        let mut list = DrawList::new();
        match &self.game {
            Some(game) => game.draw(&mut list),
            None => self.menu.draw(&mut list),
        }
        list
    }
}
