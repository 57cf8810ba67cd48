//! The render engine: frame pacing, scene sequencing, and the single
//! per-frame commit to the pixel driver.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::OutputDriver;
use crate::animation::{AnimationPool, FrameContext};
use crate::config::{ConfigCell, Tuning};
use crate::frame::PixelBuffer;
use crate::rng::Rng;
use crate::sequencer::{SceneContext, Sequencer};
use crate::space::PixelSpace;

/// Default target frame rate.
pub const DEFAULT_FPS: u32 = 90;

/// Default frame duration based on target FPS.
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(1000 / DEFAULT_FPS as u64);

/// Per-frame decay applied while the sculpture is powered off, so the
/// last frame dims to black instead of freezing.
const POWER_OFF_FADE: u8 = 8;

/// Result of a frame tick.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// Deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Owns the whole render context: pixel buffer, calibrated coordinates,
/// animation pool, sequencer and the deterministic random stream.
///
/// The network collaborator runs elsewhere and only touches the
/// [`ConfigCell`]; `tick` never blocks on it.
pub struct Engine<'a, O: OutputDriver> {
    driver: O,
    config: &'a ConfigCell,
    tuning: Tuning,
    pixels: PixelBuffer,
    space: PixelSpace,
    pool: AnimationPool,
    sequencer: Sequencer,
    rng: Rng,
    frame_duration: Duration,
    next_frame: Instant,
    last_frame: Instant,
    frame_delta: Duration,
}

impl<'a, O: OutputDriver> Engine<'a, O> {
    /// Build the engine and calibrate both solids from the tuning angles.
    pub fn new(driver: O, config: &'a ConfigCell, tuning: Tuning) -> Self {
        let mut space = PixelSpace::new();
        space.calibrate(0, tuning.angle_solid_0);
        space.calibrate(1, tuning.angle_solid_1);

        Self {
            driver,
            config,
            tuning,
            pixels: PixelBuffer::new(),
            space,
            pool: AnimationPool::new(),
            sequencer: Sequencer::new(),
            rng: Rng::new(0x0d0d_eca5_eed0_0001),
            frame_duration: DEFAULT_FRAME_DURATION,
            next_frame: Instant::from_millis(0),
            last_frame: Instant::from_millis(0),
            frame_delta: Duration::from_millis(0),
        }
    }

    /// Re-run calibration, e.g. after an operator corrects the physical
    /// alignment of one solid.
    pub fn recalibrate(&mut self, angle_solid_0: f32, angle_solid_1: f32) {
        self.tuning.angle_solid_0 = angle_solid_0;
        self.tuning.angle_solid_1 = angle_solid_1;
        self.space.calibrate(0, angle_solid_0);
        self.space.calibrate(1, angle_solid_1);
    }

    /// Process one frame and return timing for the caller's sleep.
    ///
    /// Within a frame every active animation draws before the single
    /// commit; the sequencer only starts the next preset once all
    /// animations report Inactive.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        // Drift correction: if we've fallen too far behind, skip the
        // backlog instead of bursting to catch up.
        let max_drift = Duration::from_millis(self.frame_duration.as_millis() * 2);
        if now > self.next_frame + max_drift {
            self.next_frame = now;
        }

        self.frame_delta = now.duration_since(self.last_frame);
        self.last_frame = now;

        let snapshot = self.config.snapshot();
        if snapshot.power {
            // A pending scene request asks the running preset to wind
            // down so the gate below is reached promptly.
            if snapshot.scene_request.is_some() {
                self.pool.end_all();
            }

            let mut ctx = FrameContext {
                now,
                pixels: &mut self.pixels,
                config: &snapshot,
                rng: &mut self.rng,
            };
            self.pool.draw_active(&mut ctx);

            if self.pool.all_inactive() {
                let scene_ctx = SceneContext {
                    now,
                    tuning: &self.tuning,
                    config: &snapshot,
                    space: &self.space,
                };
                match self.config.take_scene_request() {
                    Some(index) => {
                        #[cfg(feature = "esp32-log")]
                        println!("scene select {}", index);
                        self.sequencer.select(index, &mut self.pool, &scene_ctx);
                    }
                    None => {
                        #[cfg(feature = "esp32-log")]
                        println!("scene next");
                        self.sequencer.next(&mut self.pool, &scene_ctx);
                    }
                }
            }
        } else {
            // Powered off: no sequencing, let the frame decay to black.
            self.pool.end_all();
            self.pixels.fade_by(POWER_OFF_FADE);
        }

        self.driver.write(self.pixels.as_slice());

        self.next_frame += self.frame_duration;
        let sleep_duration = if self.next_frame > now {
            self.next_frame - now
        } else {
            Duration::from_millis(0)
        };

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
        }
    }

    /// Frames per second over the last frame delta.
    #[allow(clippy::cast_possible_truncation)]
    pub fn fps(&self) -> u32 {
        let ms = self.frame_delta.as_millis();
        if ms == 0 { 0 } else { (1000 / ms) as u32 }
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    pub fn space(&self) -> &PixelSpace {
        &self.space
    }

    pub fn pool(&self) -> &AnimationPool {
        &self.pool
    }
}
