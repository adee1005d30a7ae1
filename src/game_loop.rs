use std::time::{Duration, Instant};

/// Cap on ticks caught up in one frame. Time beyond it is dropped.
const MAX_TICKS_PER_FRAME: u32 = 8;

pub struct GameLoop {
    last_update: Instant,
    accumulator: Duration,
    fixed_timestep: Duration,
}

impl GameLoop {
    pub fn new(fps: u32) -> Self {
        Self {
            last_update: Instant::now(),
            accumulator: Duration::ZERO,
            fixed_timestep: Duration::from_secs_f64(1.0 / fps.max(1) as f64),
        }
    }

    pub fn tick<F>(&mut self, update_fn: F) -> u32
    where
        F: FnMut(f32),
    {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_update);
        self.last_update = now;
        self.advance(frame_time, update_fn)
    }

    /// Runs `update_fn` once per whole timestep contained in `frame_time`
    /// plus the leftover from earlier frames. Returns the number of ticks run.
    pub fn advance<F>(&mut self, frame_time: Duration, mut update_fn: F) -> u32
    where
        F: FnMut(f32),
    {
        self.accumulator += frame_time;

        let dt = self.fixed_timestep.as_secs_f32();
        let mut ticks = 0;

        while self.accumulator >= self.fixed_timestep {
            if ticks == MAX_TICKS_PER_FRAME {
                self.accumulator = Duration::ZERO;
                break;
            }
            update_fn(dt);
            self.accumulator -= self.fixed_timestep;
            ticks += 1;
        }

        ticks
    }

    /// Forgets time spent while the loop was not being ticked.
    pub fn reset(&mut self) {
        self.last_update = Instant::now();
        self.accumulator = Duration::ZERO;
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new(60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_one_tick_per_timestep_and_keeps_remainder() {
        let mut game_loop = GameLoop::new(10);
        let mut calls = 0;
        assert_eq!(game_loop.advance(Duration::from_millis(250), |_| calls += 1), 2);
        assert_eq!(calls, 2);
        assert_eq!(game_loop.advance(Duration::from_millis(50), |_| calls += 1), 1);
        assert_eq!(calls, 3);
    }

    #[test]
    fn long_stall_is_capped() {
        let mut game_loop = GameLoop::new(60);
        let ticks = game_loop.advance(Duration::from_secs(5), |_| {});
        assert_eq!(ticks, MAX_TICKS_PER_FRAME);
        assert_eq!(game_loop.advance(Duration::ZERO, |_| {}), 0);
    }
}
