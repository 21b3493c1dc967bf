//! Per-frame animation of the scene model.
//!
//! A frame runs the registered update functions in order and then presents
//! the result once. With `animate` off only the present step runs.

use bevy::math::{Quat, Vec3};

use super::build::facing_origin;
use super::{wrap_angle, Animatable, SceneContext};

/// Share of the base increment the pointer may add or remove.
pub const POINTER_BIAS: f32 = 0.5;
pub const Y_SPEED_FACTOR: f32 = 0.8;
pub const PULSE_AMPLITUDE: f32 = 0.05;
/// Angular frequency of the scale pulse (radians per second)
pub const PULSE_FREQUENCY: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Seconds since the previous frame
    pub dt: f32,
}

pub type FrameUpdate = fn(&mut SceneContext, &FrameInput);

/// Receives the scene once per frame after all updates ran.
pub trait FrameSink {
    fn present(&mut self, ctx: &SceneContext);
}

pub struct AnimationLoop {
    updates: Vec<(&'static str, FrameUpdate)>,
    running: bool,
}

impl Default for AnimationLoop {
    fn default() -> Self {
        Self::standard()
    }
}

impl AnimationLoop {
    pub fn empty() -> Self {
        Self {
            updates: Vec::new(),
            running: true,
        }
    }

    /// Root spin, pointer bias, pulse, per-object spin, satellite orbits.
    pub fn standard() -> Self {
        let mut animation = Self::empty();
        animation.push("spin_root", spin_root);
        animation.push("pointer_bias", apply_pointer_bias);
        animation.push("pulse_root", pulse_root_scale);
        animation.push("spin_objects", spin_tagged_objects);
        animation.push("orbit_satellites", orbit_satellites);
        animation
    }

    pub fn push(&mut self, name: &'static str, update: FrameUpdate) {
        self.updates.push((name, update));
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.updates.iter().map(|(name, _)| *name)
    }

    /// Stop the loop for good. Later calls to `step` do nothing.
    pub fn cancel(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Run one frame. Returns false once cancelled.
    pub fn step(
        &mut self,
        ctx: &mut SceneContext,
        input: &FrameInput,
        sink: &mut impl FrameSink,
    ) -> bool {
        if !self.running {
            return false;
        }

        ctx.elapsed += input.dt.max(0.0);
        if ctx.config.animate {
            for (_, update) in &self.updates {
                update(ctx, input);
            }
        }

        sink.present(ctx);
        ctx.frames_rendered += 1;
        true
    }
}

pub fn spin_root(ctx: &mut SceneContext, _input: &FrameInput) {
    let speed = ctx.config.rotation_speed;
    let root = &mut ctx.root;
    root.rotation.x = wrap_angle(root.rotation.x + speed);
    root.rotation.y = wrap_angle(root.rotation.y + speed * Y_SPEED_FACTOR);
}

/// Pointer up/down tilts around x, left/right around y. The bias never
/// exceeds half the base increment so the root keeps turning forward.
pub fn apply_pointer_bias(ctx: &mut SceneContext, _input: &FrameInput) {
    let speed = ctx.config.rotation_speed;
    let pointer = ctx.pointer;
    let bias_x = POINTER_BIAS * speed * pointer.y.clamp(-1.0, 1.0);
    let bias_y = POINTER_BIAS * speed * Y_SPEED_FACTOR * pointer.x.clamp(-1.0, 1.0);
    let root = &mut ctx.root;
    root.rotation.x = wrap_angle(root.rotation.x + bias_x);
    root.rotation.y = wrap_angle(root.rotation.y + bias_y);
}

pub fn pulse_root_scale(ctx: &mut SceneContext, _input: &FrameInput) {
    ctx.root.scale = 1.0 + PULSE_AMPLITUDE * (PULSE_FREQUENCY * ctx.elapsed).sin();
}

pub fn spin_tagged_objects(ctx: &mut SceneContext, _input: &FrameInput) {
    for obj in &mut ctx.objects {
        if let Animatable::Spin { speed } = obj.animatable {
            let r = obj.rotation + speed;
            obj.rotation = Vec3::new(wrap_angle(r.x), wrap_angle(r.y), wrap_angle(r.z));
        }
    }
}

pub fn orbit_satellites(ctx: &mut SceneContext, _input: &FrameInput) {
    for obj in &mut ctx.objects {
        if let Animatable::Orbit { axis, angle } = obj.animatable {
            obj.translation = Quat::from_axis_angle(axis, angle) * obj.translation;
            obj.orientation = facing_origin(obj.translation);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::TAU;

    use nexora_shared::config::SceneConfig;

    use super::*;
    use crate::scene::build::build_scene;
    use crate::scene::pointer::PointerState;
    use crate::scene::SurfaceSize;

    #[derive(Default)]
    struct CountingSink {
        presented: u32,
        last_root: Option<Vec3>,
    }

    impl FrameSink for CountingSink {
        fn present(&mut self, ctx: &SceneContext) {
            self.presented += 1;
            self.last_root = Some(ctx.root.rotation);
        }
    }

    const FRAME: FrameInput = FrameInput { dt: 1.0 / 60.0 };

    fn scene(config: SceneConfig) -> SceneContext {
        build_scene(&config, SurfaceSize::new(1280, 720))
    }

    /// Forward distance travelled from `a` to `b` on the circle.
    fn forward(a: f32, b: f32) -> f32 {
        (b - a).rem_euclid(TAU)
    }

    #[test]
    fn standard_loop_runs_updates_in_order() {
        let names: Vec<_> = AnimationLoop::standard().names().collect();
        assert_eq!(
            names,
            [
                "spin_root",
                "pointer_bias",
                "pulse_root",
                "spin_objects",
                "orbit_satellites"
            ]
        );
    }

    #[test]
    fn root_turns_forward_every_frame() {
        let mut ctx = scene(SceneConfig::default());
        let mut animation = AnimationLoop::standard();
        let mut sink = CountingSink::default();
        let speed = ctx.config.rotation_speed;

        for _ in 0..2000 {
            let before = ctx.root.rotation;
            assert!(animation.step(&mut ctx, &FRAME, &mut sink));
            let dx = forward(before.x, ctx.root.rotation.x);
            assert!(dx > 0.0 && dx < TAU / 2.0);
            assert!((dx - speed).abs() < 1e-4);
        }
        assert_eq!(sink.presented, 2000);
        assert_eq!(ctx.frames_rendered, 2000);
    }

    #[test]
    fn pointer_bias_never_reverses_rotation() {
        for (px, py) in [(-1.0, -1.0), (1.0, 1.0), (-1.0, 1.0), (0.3, -0.7)] {
            let mut ctx = scene(SceneConfig::default());
            ctx.set_pointer(PointerState { x: px, y: py });
            let mut animation = AnimationLoop::standard();
            let mut sink = CountingSink::default();

            for _ in 0..100 {
                let before = ctx.root.rotation;
                animation.step(&mut ctx, &FRAME, &mut sink);
                let dx = forward(before.x, ctx.root.rotation.x);
                let dy = forward(before.y, ctx.root.rotation.y);
                assert!(dx > 0.0 && dx < 1.0, "x stalled at pointer ({px}, {py})");
                assert!(dy > 0.0 && dy < 1.0, "y stalled at pointer ({px}, {py})");
            }
        }
    }

    #[test]
    fn rotation_stays_wrapped() {
        let mut ctx = scene(SceneConfig {
            rotation_speed: 0.1,
            ..SceneConfig::default()
        });
        let mut animation = AnimationLoop::standard();
        let mut sink = CountingSink::default();
        for _ in 0..500 {
            animation.step(&mut ctx, &FRAME, &mut sink);
            let r = ctx.root.rotation;
            assert!((0.0..TAU).contains(&r.x));
            assert!((0.0..TAU).contains(&r.y));
        }
    }

    #[test]
    fn static_scene_only_renders() {
        let mut ctx = scene(SceneConfig {
            animate: false,
            ..SceneConfig::default()
        });
        let objects = ctx.objects.clone();
        let root = ctx.root;
        let mut animation = AnimationLoop::standard();
        let mut sink = CountingSink::default();

        for _ in 0..10 {
            animation.step(&mut ctx, &FRAME, &mut sink);
        }
        assert_eq!(ctx.root, root);
        assert_eq!(ctx.objects, objects);
        assert_eq!(sink.presented, 10);
        assert_eq!(sink.last_root, Some(root.rotation));
    }

    #[test]
    fn animation_keeps_object_count() {
        let mut ctx = scene(SceneConfig::default());
        let count = ctx.object_count();
        let mut animation = AnimationLoop::standard();
        let mut sink = CountingSink::default();
        for _ in 0..50 {
            animation.step(&mut ctx, &FRAME, &mut sink);
        }
        assert_eq!(ctx.object_count(), count);
    }

    #[test]
    fn scale_pulse_stays_in_band() {
        let mut ctx = scene(SceneConfig::default());
        let mut animation = AnimationLoop::standard();
        let mut sink = CountingSink::default();
        for _ in 0..600 {
            animation.step(&mut ctx, &FRAME, &mut sink);
            let s = ctx.root.scale;
            assert!((1.0 - PULSE_AMPLITUDE - 1e-6..=1.0 + PULSE_AMPLITUDE + 1e-6).contains(&s));
        }
    }

    #[test]
    fn orbit_preserves_radius_and_faces_origin() {
        let mut ctx = scene(SceneConfig::default());
        let radii: Vec<f32> = ctx.objects.iter().map(|o| o.translation.length()).collect();
        let mut animation = AnimationLoop::standard();
        let mut sink = CountingSink::default();
        for _ in 0..300 {
            animation.step(&mut ctx, &FRAME, &mut sink);
        }
        for (obj, r) in ctx.objects.iter().zip(radii) {
            assert!((obj.translation.length() - r).abs() < 1e-3);
            if matches!(obj.animatable, Animatable::Orbit { .. }) {
                let forward = obj.orientation * Vec3::NEG_Z;
                assert!(forward.dot(-obj.translation.normalize()) > 0.999);
            }
        }
    }

    #[test]
    fn satellites_actually_move() {
        let mut ctx = scene(SceneConfig::default());
        let before = ctx.objects.clone();
        let mut animation = AnimationLoop::standard();
        let mut sink = CountingSink::default();
        animation.step(&mut ctx, &FRAME, &mut sink);
        for (a, b) in before.iter().zip(&ctx.objects) {
            if matches!(a.animatable, Animatable::Orbit { .. }) {
                assert_ne!(a.translation, b.translation);
            }
        }
    }

    #[test]
    fn fixed_objects_never_move() {
        let mut ctx = scene(SceneConfig::default());
        let before = ctx.objects.clone();
        let mut animation = AnimationLoop::standard();
        let mut sink = CountingSink::default();
        for _ in 0..100 {
            animation.step(&mut ctx, &FRAME, &mut sink);
        }
        let fixed = before
            .iter()
            .zip(&ctx.objects)
            .filter(|(a, _)| a.animatable == Animatable::Fixed);
        let mut seen = 0;
        for (a, b) in fixed {
            assert_eq!(a, b);
            seen += 1;
        }
        assert_eq!(seen, 1);
    }

    #[test]
    fn cancelled_loop_stops() {
        let mut ctx = scene(SceneConfig::default());
        let mut animation = AnimationLoop::standard();
        let mut sink = CountingSink::default();
        animation.step(&mut ctx, &FRAME, &mut sink);
        animation.cancel();

        let root = ctx.root;
        assert!(!animation.is_running());
        assert!(!animation.step(&mut ctx, &FRAME, &mut sink));
        assert_eq!(ctx.root, root);
        assert_eq!(sink.presented, 1);
        assert_eq!(ctx.frames_rendered, 1);
    }

    #[test]
    fn custom_update_runs_after_standard_ones() {
        fn freeze_root(ctx: &mut SceneContext, _input: &FrameInput) {
            ctx.root.rotation = Vec3::ZERO;
        }
        let mut ctx = scene(SceneConfig::default());
        let mut animation = AnimationLoop::standard();
        animation.push("freeze", freeze_root);
        animation.step(&mut ctx, &FRAME, &mut CountingSink::default());
        assert_eq!(ctx.root.rotation, Vec3::ZERO);
    }
}
