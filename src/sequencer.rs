//! Scene sequencer: the fixed preset order and external selection.

use embassy_time::{Duration, Instant};

use crate::animation::{AnimationPool, ColorSource};
use crate::color::Rgb;
use crate::config::{ConfigSnapshot, Tuning};
use crate::space::PixelSpace;

/// Warm white used by the opening preset.
const WARM_WHITE: Rgb = Rgb {
    r: 255,
    g: 150,
    b: 30,
};

/// Everything a scene activation may read.
pub struct SceneContext<'a> {
    pub now: Instant,
    pub tuning: &'a Tuning,
    pub config: &'a ConfigSnapshot,
    pub space: &'a PixelSpace,
}

type SceneFn = fn(&mut AnimationPool, &SceneContext<'_>);

// Sequenced twinkle presets keep fade-out off: on expiry the next scene
// takes over the still-lit pixels and keeps fading them, so the chain of
// presets reads as one continuous animation.
fn twinkle_scene(pool: &mut AnimationPool, ctx: &SceneContext<'_>, source: ColorSource) {
    let tuning = ctx.tuning;
    pool.twinkle
        .init(ctx.now, tuning.twinkle_duration, source, false);
    pool.twinkle.speed(
        tuning.twinkle_fade_in,
        tuning.twinkle_fade_out,
        tuning.twinkle_dim_divisor,
    );
}

fn scene_twinkle_warm_white(pool: &mut AnimationPool, ctx: &SceneContext<'_>) {
    pool.twinkle.clear();
    twinkle_scene(pool, ctx, ColorSource::Custom(WARM_WHITE));
}

fn scene_twinkle_live(pool: &mut AnimationPool, ctx: &SceneContext<'_>) {
    twinkle_scene(pool, ctx, ColorSource::Live);
}

fn scene_twinkle_fixture<const SLOT: u8>(pool: &mut AnimationPool, ctx: &SceneContext<'_>) {
    twinkle_scene(pool, ctx, ColorSource::FixtureHue(SLOT));
}

fn scene_twinkle_multi(pool: &mut AnimationPool, ctx: &SceneContext<'_>) {
    twinkle_scene(pool, ctx, ColorSource::AnyFixture);
}

fn scene_twinkle_random(pool: &mut AnimationPool, ctx: &SceneContext<'_>) {
    let tuning = ctx.tuning;
    pool.twinkle
        .init(ctx.now, tuning.twinkle_duration, ColorSource::Random, false);
    // Random colors read best with snappier fades.
    pool.twinkle.speed(
        Duration::from_millis(tuning.twinkle_fade_in.as_millis() / 2),
        Duration::from_millis(tuning.twinkle_fade_out.as_millis() / 2),
        tuning.twinkle_dim_divisor,
    );
}

fn scene_trails(pool: &mut AnimationPool, ctx: &SceneContext<'_>) {
    let tuning = ctx.tuning;
    pool.trails
        .speed(tuning.trails_step_interval, tuning.trails_fade_amount);
    pool.trails
        .init(ctx.now, tuning.trails_duration, true, ctx.config);
}

fn scene_flux(pool: &mut AnimationPool, ctx: &SceneContext<'_>) {
    let tuning = ctx.tuning;
    pool.flux
        .init(ctx.now, tuning.flux_duration, tuning.flux_weights, ctx.space);
}

// Preset order of the installation; `next` cycles through these.
const SCENE_TABLE: [SceneFn; 12] = [
    scene_twinkle_warm_white,
    scene_twinkle_live,
    scene_twinkle_fixture::<0>,
    scene_twinkle_fixture::<1>,
    scene_twinkle_fixture::<2>,
    scene_twinkle_fixture::<3>,
    scene_twinkle_fixture::<4>,
    scene_twinkle_fixture::<5>,
    scene_twinkle_multi,
    scene_twinkle_random,
    scene_trails,
    scene_flux,
];

/// Advances the preset table round-robin, honoring external selections.
#[derive(Debug, Default)]
pub struct Sequencer {
    cursor: usize,
}

impl Sequencer {
    pub const fn new() -> Self {
        Self { cursor: 0 }
    }

    /// Number of preset scenes.
    pub const fn len() -> usize {
        SCENE_TABLE.len()
    }

    /// Activate the scene at the cursor, then advance and wrap.
    pub fn next(&mut self, pool: &mut AnimationPool, ctx: &SceneContext<'_>) {
        SCENE_TABLE[self.cursor](pool, ctx);
        self.cursor = (self.cursor + 1) % SCENE_TABLE.len();
    }

    /// Activate a specific scene; out-of-range indices fall back to the
    /// round-robin order.
    pub fn select(&mut self, index: u8, pool: &mut AnimationPool, ctx: &SceneContext<'_>) {
        if let Some(scene) = SCENE_TABLE.get(index as usize) {
            scene(pool, ctx);
        } else {
            self.next(pool, ctx);
        }
    }
}
