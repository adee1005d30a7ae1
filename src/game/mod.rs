pub mod game_scene;
pub mod layout;
pub mod lifecycle;
pub mod menu;
pub mod palette;
pub mod scene;
pub mod session;
pub mod tween;

pub use game_scene::GameScene;
pub use menu::{MenuAction, MenuState};
pub use scene::{SceneId, SceneManager};
pub use session::{ClickOutcome, GameOver, GameSession, SessionState};
