//! Shared configuration written by the network collaborator.
//!
//! The render context never reads the shared block directly: once per frame
//! it takes a [`ConfigSnapshot`] under a critical section and hands that
//! value to every animation, so a frame never observes a half-written
//! update. Animations only ever consume the snapshot; the single core-side
//! write is clearing the scene request after the sequencer acts on it.

use core::cell::RefCell;

use critical_section::Mutex;
use embassy_time::Duration;
use heapless::String;

/// Number of companion light fixtures mirrored from the lighting bridge.
pub const FIXTURES: usize = 6;

/// State of one companion fixture, as last polled from the bridge.
#[derive(Debug, Clone, Default)]
pub struct FixtureState {
    /// Bridge identifier of the fixture.
    pub name: String<4>,
    pub on: bool,
    pub brightness: u8,
    /// Bridge hue, 0-65535 scale.
    pub hue: u16,
    pub sat: u8,
}

/// Externally written fields read by the rendering core.
///
/// Defaults are sane and tolerated indefinitely: the core keeps rendering
/// even if the network collaborator never writes a single field.
#[derive(Debug, Clone)]
pub struct SharedConfig {
    pub power: bool,
    pub brightness: u8,
    /// Live color hue, 0-65535 scale.
    pub hue: u16,
    pub sat: u8,
    /// Externally requested scene index; `None` means no request.
    pub scene_request: Option<u8>,
    pub fixtures: [FixtureState; FIXTURES],
}

const DEFAULT_FIXTURE: FixtureState = FixtureState {
    name: String::new(),
    on: false,
    brightness: 0,
    hue: 0,
    sat: 0,
};

impl SharedConfig {
    pub const fn new() -> Self {
        Self {
            power: true,
            brightness: 255,
            // Warm white.
            hue: 0x1500,
            sat: 170,
            scene_request: None,
            fixtures: [DEFAULT_FIXTURE; FIXTURES],
        }
    }
}

impl Default for SharedConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-frame value copy of [`SharedConfig`].
pub type ConfigSnapshot = SharedConfig;

/// Cross-context cell holding the shared configuration.
///
/// The network context calls [`ConfigCell::update`]; the render context
/// calls [`ConfigCell::snapshot`] once per frame.
pub struct ConfigCell {
    inner: Mutex<RefCell<SharedConfig>>,
}

impl Default for ConfigCell {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigCell {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(SharedConfig::new())),
        }
    }

    /// Take a value copy of the whole block.
    pub fn snapshot(&self) -> ConfigSnapshot {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().clone())
    }

    /// Mutate the block; the writer side of the boundary.
    pub fn update(&self, f: impl FnOnce(&mut SharedConfig)) {
        critical_section::with(|cs| f(&mut self.inner.borrow(cs).borrow_mut()));
    }

    /// Read and clear a pending scene request.
    pub fn take_scene_request(&self) -> Option<u8> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().scene_request.take())
    }
}

/// Startup parameters for the animations and the calibration, loaded from
/// persisted configuration before the engine is constructed.
#[derive(Debug, Clone)]
pub struct Tuning {
    /// Calibration rotation per solid, radians about the vertical axis.
    pub angle_solid_0: f32,
    pub angle_solid_1: f32,

    /// Twinkle: preset run time.
    pub twinkle_duration: Duration,
    /// Twinkle: per-pixel fade-in time.
    pub twinkle_fade_in: Duration,
    /// Twinkle: per-pixel fade-out time.
    pub twinkle_fade_out: Duration,
    /// Twinkle: brightness divisor rationing new activations per frame.
    pub twinkle_dim_divisor: u8,

    /// Trails: preset run time.
    pub trails_duration: Duration,
    /// Trails: walker movement cadence.
    pub trails_step_interval: Duration,
    /// Trails: per-frame buffer decay.
    pub trails_fade_amount: u8,

    /// Flux: preset run time.
    pub flux_duration: Duration,
    /// Flux: coordinate-to-hue weights.
    pub flux_weights: (u16, u16, u16),
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            angle_solid_0: 0.0,
            angle_solid_1: 0.0,
            twinkle_duration: Duration::from_secs(15),
            twinkle_fade_in: Duration::from_millis(1000),
            twinkle_fade_out: Duration::from_millis(2000),
            twinkle_dim_divisor: 15,
            trails_duration: Duration::from_secs(20),
            trails_step_interval: Duration::from_millis(22),
            trails_fade_amount: 5,
            flux_duration: Duration::from_secs(15),
            flux_weights: (50, 100, 400),
        }
    }
}
