#![no_std]

pub mod animation;
pub mod color;
pub mod config;
pub mod engine;
pub mod frame;
pub mod math8;
pub mod palette;
pub mod rng;
pub mod sequencer;
pub mod space;
pub mod timer;
pub mod topology;
pub mod walker;

pub use animation::{Animation, AnimationPool, ColorSource, FrameContext, TaskState};
pub use config::{ConfigCell, ConfigSnapshot, FIXTURES, FixtureState, SharedConfig, Tuning};
pub use engine::{DEFAULT_FPS, Engine, FrameResult};
pub use frame::PixelBuffer;
pub use sequencer::{SceneContext, Sequencer};
pub use space::{PixelSpace, Vec3};
pub use topology::{Direction, EDGES, PIXELS, PIXELS_PER_SOLID, SOLIDS, VERTICES, VertexId};
pub use walker::Walker;

pub use color::{Hsv, Rgb};
pub use embassy_time::{Duration, Instant};

/// Abstract pixel driver boundary.
///
/// The engine commits the frame through this once per tick; the driver's
/// wire protocol and timing live entirely behind it.
pub trait OutputDriver {
    /// Push the frame to the hardware.
    fn write(&mut self, colors: &[Rgb]);
}
