//! Trails: walkers roam the edge graph leaving decaying light behind.

use embassy_time::{Duration, Instant};

use super::{Animation, FrameContext, TaskState};
use crate::color::{bridge_color, is_lit};
use crate::config::{ConfigSnapshot, FIXTURES};
use crate::timer::{Countdown, Interval};
use crate::topology::Direction;
use crate::walker::Walker;

pub struct TrailsAnimation {
    state: TaskState,
    duration: Countdown,
    movement: Interval,
    step_interval: Duration,
    fade_amount: u8,
    fade_out_mode: bool,
    /// One walker per companion fixture.
    walkers: [Walker; FIXTURES],
}

impl Default for TrailsAnimation {
    fn default() -> Self {
        Self::new()
    }
}

impl TrailsAnimation {
    pub fn new() -> Self {
        Self {
            state: TaskState::Inactive,
            duration: Countdown::start(Instant::from_millis(0), Duration::from_millis(0)),
            movement: Interval::start(Instant::from_millis(0), Duration::from_millis(22)),
            step_interval: Duration::from_millis(22),
            fade_amount: 5,
            fade_out_mode: false,
            walkers: [Walker::new(); FIXTURES],
        }
    }

    /// Activate: one walker per fixture, colored from the mirrored
    /// fixture state, spread over both solids.
    #[allow(clippy::cast_possible_truncation)]
    pub fn init(
        &mut self,
        now: Instant,
        duration: Duration,
        fade_out: bool,
        config: &ConfigSnapshot,
    ) {
        self.state = TaskState::Running;
        self.duration = Countdown::start(now, duration);
        self.movement = Interval::start(now, self.step_interval);
        self.fade_out_mode = fade_out;
        for (i, walker) in self.walkers.iter_mut().enumerate() {
            let fixture = &config.fixtures[i];
            let color = bridge_color(fixture.hue, fixture.sat);
            walker.init((i & 1) as u8, 0, Direction::AToB, 0, color);
        }
    }

    /// Movement cadence and per-frame decay.
    pub fn speed(&mut self, step_interval: Duration, fade_amount: u8) {
        self.step_interval = step_interval;
        self.fade_amount = fade_amount;
    }
}

impl Animation for TrailsAnimation {
    fn draw(&mut self, ctx: &mut FrameContext<'_>) {
        // Decay the whole frame; this is what turns points into trails.
        ctx.pixels.fade_by(self.fade_amount);

        match self.state {
            TaskState::Running => {
                if self.duration.expired(ctx.now) {
                    self.state = TaskState::Ending;
                }
            }
            TaskState::Ending if !self.fade_out_mode => {
                self.state = TaskState::Inactive;
            }
            _ => {}
        }
        let fade_active = self.state == TaskState::Ending && self.fade_out_mode;

        // Walkers only move on their own cadence, not every frame.
        if !self.movement.tick(ctx.now) {
            return;
        }

        let mut dark = 0;
        for walker in &mut self.walkers {
            // During fade-out a walker pushes the already-decayed value
            // forward instead of fresh color, so its trail dies out.
            let color = if fade_active {
                ctx.pixels.get(walker.current_pixel())
            } else {
                walker.color
            };
            if !is_lit(color) {
                dark += 1;
            }
            walker.step(ctx.rng);
            ctx.pixels.set(walker.current_pixel(), color);
        }

        if fade_active && dark == FIXTURES {
            self.state = TaskState::Inactive;
        }
    }

    fn end(&mut self) {
        // An external end always fades out; vanishing mid-run looks broken.
        self.fade_out_mode = true;
        self.state = TaskState::Ending;
    }

    fn state(&self) -> TaskState {
        self.state
    }
}
