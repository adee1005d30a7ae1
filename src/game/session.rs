use log::{debug, info};
use rand::rngs::StdRng;
use rand::Rng;

use crate::game::palette::{palette_color, PALETTE};

pub const TIMER_START_SCALE: f32 = 5.0;
pub const TIMER_SCALE_Y: f32 = 0.2;
pub const TIMER_FRAME_DECAY: f32 = 0.001;
pub const TIMER_MISS_PENALTY: f32 = 0.5;
pub const TIMER_MIN: f32 = 0.0;
pub const TIMER_MAX: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    /// Window lost focus or visibility. The timer stands still.
    Paused,
    Over,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Match,
    Miss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOver {
    pub score: u32,
    pub new_high_score: bool,
}

pub struct GameSession {
    score: u32,
    max_score: u32,
    state: SessionState,
    target_index: usize,
    timer_scale: f32,
    rng: StdRng,
}

impl GameSession {
    pub fn new(max_score: u32, rng: StdRng) -> Self {
        let mut session = Self {
            score: 0,
            max_score,
            state: SessionState::Active,
            target_index: 0,
            timer_scale: TIMER_START_SCALE,
            rng,
        };
        session.pick_target();
        session
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn max_score(&self) -> u32 {
        self.max_score
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state == SessionState::Over
    }

    pub fn target_index(&self) -> usize {
        self.target_index
    }

    pub fn target_color(&self) -> [f32; 4] {
        palette_color(self.target_index)
    }

    pub fn timer_scale(&self) -> f32 {
        self.timer_scale
    }

    fn pick_target(&mut self) {
        self.target_index = self.rng.gen_range(0..PALETTE.len());
        debug!("New target {}", self.target_index);
    }

    fn drain_timer(&mut self, amount: f32) {
        self.timer_scale = (self.timer_scale - amount).clamp(TIMER_MIN, TIMER_MAX);
    }

    /// One frame. Only an active session drains; an empty timer ends it.
    pub fn update(&mut self) -> Option<GameOver> {
        if self.state != SessionState::Active {
            return None;
        }
        self.drain_timer(TIMER_FRAME_DECAY);
        if self.timer_scale <= 0.0 {
            return self.end();
        }
        None
    }

    /// Scores or penalizes a click on `slot`, then picks a new target.
    /// Ignored once the session is over; still counted while paused.
    pub fn click(&mut self, slot: usize) -> Option<ClickOutcome> {
        if self.is_over() {
            return None;
        }

        let outcome = if slot == self.target_index {
            self.score += 1;
            ClickOutcome::Match
        } else {
            self.drain_timer(TIMER_MISS_PENALTY);
            ClickOutcome::Miss
        };

        self.pick_target();
        Some(outcome)
    }

    pub fn pause(&mut self) {
        if self.state == SessionState::Active {
            info!("Game paused");
            self.state = SessionState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == SessionState::Paused {
            info!("Game resumed");
            self.state = SessionState::Active;
        }
    }

    /// Ends the session. Returns `None` if it had already ended.
    pub fn end(&mut self) -> Option<GameOver> {
        if self.is_over() {
            return None;
        }
        self.state = SessionState::Over;
        let new_high_score = self.score > self.max_score;
        if new_high_score {
            self.max_score = self.score;
        }
        info!("Game over: score {}, best {}", self.score, self.max_score);
        Some(GameOver {
            score: self.score,
            new_high_score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn session(max_score: u32) -> GameSession {
        GameSession::new(max_score, StdRng::seed_from_u64(7))
    }

    fn wrong_slot(session: &GameSession) -> usize {
        (session.target_index() + 1) % PALETTE.len()
    }

    #[test]
    fn starts_active_with_full_timer() {
        let s = session(3);
        assert_eq!(s.state(), SessionState::Active);
        assert_eq!(s.score(), 0);
        assert_eq!(s.max_score(), 3);
        assert_eq!(s.timer_scale(), TIMER_START_SCALE);
        assert!(s.target_index() < PALETTE.len());
    }

    #[test]
    fn match_scores_without_touching_timer() {
        let mut s = session(0);
        let target = s.target_index();
        assert_eq!(s.click(target), Some(ClickOutcome::Match));
        assert_eq!(s.score(), 1);
        assert_eq!(s.timer_scale(), TIMER_START_SCALE);
    }

    #[test]
    fn miss_costs_time_not_score() {
        let mut s = session(0);
        let slot = wrong_slot(&s);
        assert_eq!(s.click(slot), Some(ClickOutcome::Miss));
        assert_eq!(s.score(), 0);
        assert!((s.timer_scale() - (TIMER_START_SCALE - TIMER_MISS_PENALTY)).abs() < 1e-6);
    }

    #[test]
    fn misses_clamp_at_zero_and_next_frame_ends() {
        let mut s = session(0);
        for _ in 0..20 {
            let slot = wrong_slot(&s);
            s.click(slot);
        }
        assert_eq!(s.timer_scale(), 0.0);
        assert_eq!(s.state(), SessionState::Active);
        assert_eq!(s.update(), Some(GameOver { score: 0, new_high_score: false }));
        assert!(s.is_over());
    }

    #[test]
    fn pause_freezes_timer_and_resume_restarts_it() {
        let mut s = session(0);
        s.pause();
        assert_eq!(s.update(), None);
        assert_eq!(s.timer_scale(), TIMER_START_SCALE);

        s.resume();
        s.update();
        assert!(s.timer_scale() < TIMER_START_SCALE);
    }

    #[test]
    fn clicks_still_count_while_paused() {
        let mut s = session(0);
        s.pause();
        let target = s.target_index();
        assert_eq!(s.click(target), Some(ClickOutcome::Match));
        assert_eq!(s.score(), 1);
    }

    #[test]
    fn over_is_terminal() {
        let mut s = session(0);
        assert!(s.end().is_some());
        assert!(s.end().is_none());
        s.resume();
        assert_eq!(s.state(), SessionState::Over);
        assert_eq!(s.click(0), None);
        assert_eq!(s.update(), None);
    }

    #[test]
    fn high_score_only_on_strict_improvement() {
        let mut s = session(2);
        for _ in 0..2 {
            let target = s.target_index();
            s.click(target);
        }
        assert_eq!(s.end(), Some(GameOver { score: 2, new_high_score: false }));

        let mut s = session(2);
        for _ in 0..3 {
            let target = s.target_index();
            s.click(target);
        }
        assert_eq!(s.end(), Some(GameOver { score: 3, new_high_score: true }));
        assert_eq!(s.max_score(), 3);
    }
}
