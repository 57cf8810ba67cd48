//! Twinkle: random pixels fade in and out on independent timers.

use embassy_time::{Duration, Instant};

use super::{Animation, FrameContext, TaskState};
use crate::color::{Rgb, bridge_color, is_lit};
use crate::config::{ConfigSnapshot, FIXTURES};
use crate::math8::scale8;
use crate::rng::Rng;
use crate::timer::Countdown;
use crate::topology::PIXELS;

/// Where a freshly activated pixel takes its color from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSource {
    /// A fixed color.
    Custom(Rgb),
    /// The mirrored hue/saturation of one companion fixture.
    FixtureHue(u8),
    /// An independent random color per pixel.
    Random,
    /// The externally configured live color.
    Live,
    /// A random companion fixture's hue/saturation per pixel.
    AnyFixture,
}

pub struct TwinkleAnimation {
    state: TaskState,
    duration: Countdown,
    source: ColorSource,
    fade_out_mode: bool,
    fade_in_ms: u16,
    fade_out_ms: u16,
    dim_divisor: u8,
    last_frame: Instant,
    /// Original color of each activated pixel.
    colors: [Rgb; PIXELS],
    /// Milliseconds a pixel has been lit.
    elapsed_ms: [u16; PIXELS],
}

impl Default for TwinkleAnimation {
    fn default() -> Self {
        Self::new()
    }
}

impl TwinkleAnimation {
    pub const fn new() -> Self {
        Self {
            state: TaskState::Inactive,
            duration: Countdown::start(Instant::from_millis(0), Duration::from_millis(0)),
            source: ColorSource::Random,
            fade_out_mode: false,
            fade_in_ms: 1000,
            fade_out_ms: 2000,
            dim_divisor: 15,
            last_frame: Instant::from_millis(0),
            colors: [Rgb::new(0, 0, 0); PIXELS],
            elapsed_ms: [0; PIXELS],
        }
    }

    /// Activate. Lit pixels from a previous activation keep fading under
    /// the new parameters unless [`Self::clear`] is called first.
    pub fn init(&mut self, now: Instant, duration: Duration, source: ColorSource, fade_out: bool) {
        self.state = TaskState::Running;
        self.duration = Countdown::start(now, duration);
        self.source = source;
        self.fade_out_mode = fade_out;
        self.last_frame = now;
    }

    /// Per-pixel fade times and the activation ration divisor.
    #[allow(clippy::cast_possible_truncation)]
    pub fn speed(&mut self, fade_in: Duration, fade_out: Duration, dim_divisor: u8) {
        self.fade_in_ms = fade_in.as_millis().min(u64::from(u16::MAX)) as u16;
        self.fade_out_ms = fade_out.as_millis().min(u64::from(u16::MAX)) as u16;
        self.dim_divisor = dim_divisor;
    }

    /// Drop all per-pixel state.
    pub fn clear(&mut self) {
        self.colors = [Rgb::new(0, 0, 0); PIXELS];
        self.elapsed_ms = [0; PIXELS];
    }

    /// Advance every lit pixel's fade; returns whether any pixel is
    /// still lit.
    fn fade_pass(&mut self, ctx: &mut FrameContext<'_>, dt_ms: u16) -> bool {
        let mut pixels_active = false;
        for x in 0..PIXELS {
            if !is_lit(self.colors[x]) {
                continue;
            }
            let elapsed = self.elapsed_ms[x];
            if elapsed < self.fade_in_ms {
                let level = scaled_progress(elapsed, self.fade_in_ms);
                ctx.pixels.set(x, scale_color(self.colors[x], level));
                self.elapsed_ms[x] = elapsed.saturating_add(dt_ms);
                pixels_active = true;
            } else if elapsed < self.fade_in_ms.saturating_add(self.fade_out_ms) {
                let level = 255 - scaled_progress(elapsed - self.fade_in_ms, self.fade_out_ms);
                ctx.pixels.set(x, scale_color(self.colors[x], level));
                self.elapsed_ms[x] = elapsed.saturating_add(dt_ms);
                pixels_active = true;
            } else {
                self.elapsed_ms[x] = 0;
                self.colors[x] = Rgb::new(0, 0, 0);
                ctx.pixels.set(x, Rgb::new(0, 0, 0));
            }
        }
        pixels_active
    }

    /// Seed new twinkles, rationed by the configured brightness: on
    /// average `brightness / divisor` activations per frame, the last one
    /// skipped probabilistically to hit the fraction.
    #[allow(clippy::cast_possible_truncation)]
    fn activation_pass(&mut self, ctx: &mut FrameContext<'_>) {
        let divisor = u16::from(self.dim_divisor.max(1));
        let brightness = u16::from(ctx.config.brightness);
        let count = brightness.div_ceil(divisor);
        let chance = count * divisor - brightness;

        for i in 0..count {
            if i == count - 1 && ctx.rng.below(u32::from(divisor)) < u32::from(chance) {
                break;
            }
            let x = ctx.rng.below(PIXELS as u32) as usize;
            if !is_lit(self.colors[x]) {
                self.colors[x] = self.pick_color(ctx.config, ctx.rng);
                self.elapsed_ms[x] = 0;
            }
        }
    }

    fn pick_color(&self, config: &ConfigSnapshot, rng: &mut Rng) -> Rgb {
        match self.source {
            ColorSource::Custom(color) => color,
            ColorSource::FixtureHue(slot) => {
                let fixture = &config.fixtures[slot as usize % FIXTURES];
                bridge_color(fixture.hue, fixture.sat)
            }
            ColorSource::Random => Rgb::new(rng.next_u8(), rng.next_u8(), rng.next_u8()),
            ColorSource::Live => bridge_color(config.hue, config.sat),
            ColorSource::AnyFixture => {
                let fixture = &config.fixtures[rng.below(FIXTURES as u32) as usize];
                bridge_color(fixture.hue, fixture.sat)
            }
        }
    }
}

impl Animation for TwinkleAnimation {
    #[allow(clippy::cast_possible_truncation)]
    fn draw(&mut self, ctx: &mut FrameContext<'_>) {
        let dt_ms = ctx
            .now
            .duration_since(self.last_frame)
            .as_millis()
            .min(u64::from(u16::MAX)) as u16;
        self.last_frame = ctx.now;

        let pixels_active = self.fade_pass(ctx, dt_ms);

        match self.state {
            TaskState::Running => {
                if self.duration.expired(ctx.now) {
                    self.state = TaskState::Ending;
                } else {
                    self.activation_pass(ctx);
                }
            }
            TaskState::Ending => {
                if !self.fade_out_mode || !pixels_active {
                    self.state = TaskState::Inactive;
                }
            }
            TaskState::Inactive | TaskState::Starting => {}
        }
    }

    fn end(&mut self) {
        // An external end always fades out instead of cutting to black.
        self.fade_out_mode = true;
        self.state = TaskState::Ending;
    }

    fn state(&self) -> TaskState {
        self.state
    }
}

/// 0-255 progress of `elapsed` through `total` milliseconds.
#[allow(clippy::cast_possible_truncation)]
const fn scaled_progress(elapsed: u16, total: u16) -> u8 {
    if total == 0 {
        return 255;
    }
    ((elapsed as u32 * 255) / total as u32) as u8
}

fn scale_color(color: Rgb, level: u8) -> Rgb {
    Rgb {
        r: scale8(color.r, level),
        g: scale8(color.g, level),
        b: scale8(color.b, level),
    }
}
