use glam::Vec2;
use log::info;
use rand::rngs::StdRng;

use crate::audio::events::{AudioEvent, AudioEventQueue};
use crate::game::layout::{
    button_size, TargetGroup, BOX_SIZE, GROUP_BACKDROP_SCALE, HIGH_SCORE_POS, HIGH_SCORE_SIZE,
    SCORE_POS, SCORE_SIZE, SLOT_OFFSETS, TARGET_POS, TIMER_POS,
};
use crate::game::lifecycle::{LifecycleHub, Subscription};
use crate::game::palette::{palette_color, WHITE};
use crate::game::session::{ClickOutcome, GameOver, GameSession, TIMER_SCALE_Y};
use crate::game::tween::Tween;
use crate::render::draw_list::DrawList;

/// The playing screen. Dropping it releases its lifecycle subscription.
pub struct GameScene {
    session: GameSession,
    group: TargetGroup,
    shake: Tween,
    lifecycle: Subscription,
}

impl GameScene {
    pub fn new(max_score: u32, rng: StdRng, hub: &LifecycleHub) -> Self {
        info!("Entering game, high score {}", max_score);
        let mut group = TargetGroup::new();
        // The first target counts as a target change.
        group.rotate_quarter();
        Self {
            session: GameSession::new(max_score, rng),
            group,
            shake: Tween::shake(),
            lifecycle: hub.subscribe(),
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn group(&self) -> &TargetGroup {
        &self.group
    }

    pub fn is_shaking(&self) -> bool {
        self.shake.is_playing()
    }

    pub fn score_text(&self) -> String {
        format!("Score {}", self.session.score())
    }

    pub fn high_score_text(&self) -> String {
        format!("High Score {}", self.session.max_score())
    }

    fn poll_lifecycle(&mut self) {
        for event in self.lifecycle.drain() {
            if event.pauses() {
                self.session.pause();
            } else {
                self.session.resume();
            }
        }
    }

    pub fn update(&mut self, dt: f32) -> Option<GameOver> {
        self.poll_lifecycle();
        self.shake.advance(dt);
        self.group.shake_offset = self.shake.value();
        self.session.update()
    }

    pub fn handle_pointer(&mut self, pos: Vec2, audio: &mut AudioEventQueue) {
        self.poll_lifecycle();
        if let Some(slot) = self.group.slot_at(pos) {
            self.click(slot, audio);
        }
    }

    pub fn click(&mut self, slot: usize, audio: &mut AudioEventQueue) -> Option<ClickOutcome> {
        let outcome = self.session.click(slot)?;
        match outcome {
            ClickOutcome::Match => audio.push(AudioEvent::Points),
            ClickOutcome::Miss => {
                audio.push(AudioEvent::Hurt);
                self.shake.play();
            }
        }
        self.group.rotate_quarter();
        Some(outcome)
    }

    pub fn draw(&self, list: &mut DrawList) {
        let timer_size = Vec2::new(
            BOX_SIZE * self.session.timer_scale(),
            BOX_SIZE * TIMER_SCALE_Y,
        );
        list.sprite(TIMER_POS, timer_size, 0.0, WHITE);
        list.sprite(TARGET_POS, Vec2::splat(BOX_SIZE), 0.0, self.session.target_color());

        let rotation = self.group.rotation();
        let backdrop = Vec2::splat(BOX_SIZE * GROUP_BACKDROP_SCALE);
        list.sprite(self.group.center(), backdrop, rotation, WHITE);
        for slot in 0..SLOT_OFFSETS.len() {
            list.sprite(self.group.slot_center(slot), button_size(), rotation, palette_color(slot));
        }

        list.text(self.score_text(), SCORE_POS, SCORE_SIZE, WHITE);
        list.text(self.high_score_text(), HIGH_SCORE_POS, HIGH_SCORE_SIZE, WHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::session::TIMER_START_SCALE;
    use rand::SeedableRng;

    fn scene(hub: &LifecycleHub) -> GameScene {
        GameScene::new(0, StdRng::seed_from_u64(11), hub)
    }

    #[test]
    fn miss_plays_hurt_and_shakes() {
        let hub = LifecycleHub::new();
        let mut scene = scene(&hub);
        let mut audio = AudioEventQueue::new();
        let wrong = (scene.session().target_index() + 2) % 4;

        assert_eq!(scene.click(wrong, &mut audio), Some(ClickOutcome::Miss));
        assert_eq!(audio.drain(), vec![AudioEvent::Hurt]);
        assert!(scene.is_shaking());

        for _ in 0..30 {
            scene.update(1.0 / 60.0);
        }
        assert!(!scene.is_shaking());
        assert_eq!(scene.group().shake_offset, 0.0);
    }

    #[test]
    fn every_click_turns_the_group() {
        let hub = LifecycleHub::new();
        let mut scene = scene(&hub);
        let mut audio = AudioEventQueue::new();
        assert_eq!(scene.group().angle, 90.0);

        let target = scene.session().target_index();
        scene.click(target, &mut audio);
        assert_eq!(scene.group().angle, 180.0);
        assert_eq!(audio.drain(), vec![AudioEvent::Points]);
        assert_eq!(scene.score_text(), "Score 1");
    }

    #[test]
    fn pointer_hits_follow_rotation() {
        let hub = LifecycleHub::new();
        let mut scene = scene(&hub);
        let mut audio = AudioEventQueue::new();
        let target = scene.session().target_index();
        let pos = scene.group().slot_center(target);

        scene.handle_pointer(pos, &mut audio);
        assert_eq!(scene.session().score(), 1);
    }

    #[test]
    fn blur_pauses_and_focus_resumes() {
        let hub = LifecycleHub::new();
        let mut scene = scene(&hub);
        let start = scene.session().timer_scale();

        hub.dispatch(crate::game::lifecycle::LifecycleEvent::Blur);
        scene.update(1.0 / 60.0);
        assert_eq!(scene.session().timer_scale(), start);

        hub.dispatch(crate::game::lifecycle::LifecycleEvent::Focus);
        scene.update(1.0 / 60.0);
        assert!(scene.session().timer_scale() < start);
    }

    #[test]
    fn drop_releases_subscription() {
        let hub = LifecycleHub::new();
        let scene = scene(&hub);
        assert_eq!(hub.listener_count(), 1);
        drop(scene);
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn indicator_shows_target_color() {
        let hub = LifecycleHub::new();
        let scene = scene(&hub);
        let mut list = DrawList::new();
        scene.draw(&mut list);
        let indicator = list.sprites.iter().find(|s| s.center == TARGET_POS).unwrap();
        assert_eq!(indicator.color, palette_color(scene.session().target_index()));
        assert_eq!(list.sprites.len(), 7);
        assert!(list.find_text("High Score 0").is_some());
    }

    #[test]
    fn timer_bar_is_scaled_box_sprite() {
        let hub = LifecycleHub::new();
        let scene = scene(&hub);
        let mut list = DrawList::new();
        scene.draw(&mut list);
        let bar = list.sprites.iter().find(|s| s.center == TIMER_POS).unwrap();
        assert_eq!(bar.size, Vec2::new(64.0 * TIMER_START_SCALE, 64.0 * 0.2));
    }
}
