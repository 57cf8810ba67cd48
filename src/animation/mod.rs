//! Animation state machines.
//!
//! A fixed pool of animation instances is created once at startup and
//! reused across scene activations via each variant's `init`; nothing is
//! allocated per frame. Every variant exposes the same lifecycle:
//! Inactive -> Running (via `init`) -> Ending (duration expiry or an
//! external `end`) -> Inactive once the variant's own exit condition
//! holds.

mod flux;
mod trails;
mod twinkle;

use embassy_time::Instant;

pub use flux::FluxAnimation;
pub use trails::TrailsAnimation;
pub use twinkle::{ColorSource, TwinkleAnimation};

use crate::config::ConfigSnapshot;
use crate::frame::PixelBuffer;
use crate::rng::Rng;

/// Lifecycle state of an animation task. States are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskState {
    #[default]
    Inactive,
    /// Reserved staging step between `init` and the first draw; `init`
    /// currently enters Running directly.
    Starting,
    Running,
    Ending,
}

/// Everything a draw call may touch, assembled once per frame.
pub struct FrameContext<'a> {
    pub now: Instant,
    pub pixels: &'a mut PixelBuffer,
    pub config: &'a ConfigSnapshot,
    pub rng: &'a mut Rng,
}

/// Uniform per-frame surface of every animation variant.
///
/// `draw` is called once per frame only while the state is not Inactive;
/// it must not block and completes in time bounded by pixel or walker
/// count. `end` is advisory: it flips state consulted on the next draw.
pub trait Animation {
    fn draw(&mut self, ctx: &mut FrameContext<'_>);

    fn end(&mut self);

    fn state(&self) -> TaskState;

    fn is_active(&self) -> bool {
        self.state() != TaskState::Inactive
    }
}

/// The fixed animation pool: one instance of each variant.
pub struct AnimationPool {
    pub twinkle: TwinkleAnimation,
    pub trails: TrailsAnimation,
    pub flux: FluxAnimation,
}

impl Default for AnimationPool {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationPool {
    pub fn new() -> Self {
        Self {
            twinkle: TwinkleAnimation::new(),
            trails: TrailsAnimation::new(),
            flux: FluxAnimation::new(),
        }
    }

    fn slots(&mut self) -> [&mut dyn Animation; 3] {
        [&mut self.twinkle, &mut self.trails, &mut self.flux]
    }

    /// Draw every non-Inactive animation. All draws of a frame precede
    /// the single buffer commit.
    pub fn draw_active(&mut self, ctx: &mut FrameContext<'_>) {
        for slot in self.slots() {
            if slot.is_active() {
                slot.draw(ctx);
            }
        }
    }

    /// Ask every active animation to wind down.
    pub fn end_all(&mut self) {
        for slot in self.slots() {
            if slot.is_active() {
                slot.end();
            }
        }
    }

    pub fn all_inactive(&self) -> bool {
        !self.twinkle.is_active() && !self.trails.is_active() && !self.flux.is_active()
    }
}
