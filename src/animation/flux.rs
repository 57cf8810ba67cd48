//! Flux: a traveling palette gradient over the calibrated coordinates.

use embassy_time::{Duration, Instant};

use super::{Animation, FrameContext, TaskState};
use crate::color::Rgb;
use crate::math8::scale8;
use crate::palette::{GradientPalette, LAVA, PaletteCycle};
use crate::space::PixelSpace;
use crate::timer::Countdown;
use crate::topology::PIXELS;

pub struct FluxAnimation {
    state: TaskState,
    duration: Countdown,
    palettes: PaletteCycle,
    palette: &'static GradientPalette,
    /// Per-pixel palette position derived from the pixel's coordinates.
    hues: [u16; PIXELS],
    /// Rotating offset producing the traveling gradient.
    hue_offset: u8,
    /// Ramped toward the configured brightness, and to zero on ending.
    brightness: u8,
}

impl Default for FluxAnimation {
    fn default() -> Self {
        Self::new()
    }
}

impl FluxAnimation {
    pub const fn new() -> Self {
        Self {
            state: TaskState::Inactive,
            duration: Countdown::start(Instant::from_millis(0), Duration::from_millis(0)),
            palettes: PaletteCycle::new(),
            palette: &LAVA,
            hues: [0; PIXELS],
            hue_offset: 0,
            brightness: 0,
        }
    }

    /// Activate: pick the next palette and project every pixel's
    /// coordinate onto the palette wheel with the given axis weights.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn init(
        &mut self,
        now: Instant,
        duration: Duration,
        weights: (u16, u16, u16),
        space: &PixelSpace,
    ) {
        self.state = TaskState::Running;
        self.duration = Countdown::start(now, duration);
        self.palette = self.palettes.advance();
        self.brightness = 0;
        let (wx, wy, wz) = weights;
        for (hue, coord) in self.hues.iter_mut().zip(space.coords()) {
            let value =
                f32::from(wx) * coord.x + f32::from(wy) * coord.y + f32::from(wz) * coord.z;
            *hue = value as u16;
        }
    }
}

impl Animation for FluxAnimation {
    #[allow(clippy::cast_possible_truncation)]
    fn draw(&mut self, ctx: &mut FrameContext<'_>) {
        if self.state == TaskState::Running && self.duration.expired(ctx.now) {
            self.state = TaskState::Ending;
        }

        // One brightness step per frame keeps the ramp free of pops.
        if self.state == TaskState::Ending {
            if self.brightness == 0 {
                self.state = TaskState::Inactive;
            } else {
                self.brightness -= 1;
            }
        } else if self.brightness < ctx.config.brightness {
            self.brightness += 1;
        } else if self.brightness > ctx.config.brightness {
            self.brightness -= 1;
        }

        for (x, hue) in self.hues.iter().enumerate() {
            let pos = (hue.wrapping_add(u16::from(self.hue_offset)) & 0xFF) as u8;
            let color = self.palette.sample(pos);
            ctx.pixels.set(
                x,
                Rgb {
                    r: scale8(color.r, self.brightness),
                    g: scale8(color.g, self.brightness),
                    b: scale8(color.b, self.brightness),
                },
            );
        }
        self.hue_offset = self.hue_offset.wrapping_add(1);
    }

    fn end(&mut self) {
        self.state = TaskState::Ending;
    }

    fn state(&self) -> TaskState {
        self.state
    }
}
