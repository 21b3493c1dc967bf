use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, TAU};

use bevy::math::{Quat, Vec3};
use bevy::transform::components::Transform;
use nexora_shared::config::SceneConfig;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::pointer::PointerState;
use super::{
    Animatable, CameraState, ChildPart, FogDescriptor, GeometryKind, LightDescriptor, LightKind,
    MaterialParams, ObjectDescriptor, ObjectKind, ParticleField, RootGroup, SceneContext,
    SurfaceSize,
};
use crate::constants::Colors;

pub const CORE_RADIUS: f32 = 1.6;
pub const HALO_RADIUS: f32 = 4.2;
pub const SATELLITE_ORBIT_MIN: f32 = 2.6;
pub const SATELLITE_ORBIT_MAX: f32 = 3.4;
/// Satellite orbit step range (radians per frame)
pub const SATELLITE_ANGLE_MIN: f32 = 0.004;
pub const SATELLITE_ANGLE_MAX: f32 = 0.012;
pub const PARTICLE_RADIUS_MIN: f32 = 6.0;
pub const PARTICLE_RADIUS_MAX: f32 = 12.0;
pub const PARTICLE_SIZE: f32 = 0.03;
const PARTICLE_FIELD_SPIN: Vec3 = Vec3::new(0.0, 0.0005, 0.0);

/// Build the full scene graph for `config`. The same config always yields
/// the same scene.
pub fn build_scene(config: &SceneConfig, surface: SurfaceSize) -> SceneContext {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

    let mut objects = Vec::with_capacity(4 + config.satellite_count + 1);
    objects.push(core_solid(config));
    objects.extend(rings(config));
    for i in 0..config.satellite_count {
        objects.push(satellite(config, i, &mut rng));
    }
    objects.push(halo(config));

    let particles = particle_field(config, objects.len(), &mut rng);
    objects.push(ObjectDescriptor {
        kind: ObjectKind::ParticleField,
        geometry: GeometryKind::PointCloud,
        material: MaterialParams {
            color: config.secondary_color,
            metalness: 0.0,
            roughness: 1.0,
            opacity: 0.8,
            glow: 1.0,
        },
        translation: Vec3::ZERO,
        rotation: Vec3::ZERO,
        orientation: Quat::IDENTITY,
        scale: 1.0,
        animatable: Animatable::Spin {
            speed: PARTICLE_FIELD_SPIN,
        },
        parts: Vec::new(),
    });

    SceneContext {
        config: config.clone(),
        camera: CameraState::for_surface(surface),
        surface,
        root: RootGroup::default(),
        lights: lights(config),
        fog: FogDescriptor {
            color: Colors::FOG,
            start: 8.0,
            end: 20.0,
        },
        objects,
        particles,
        pointer: PointerState::default(),
        elapsed: 0.0,
        frames_rendered: 0,
    }
}

fn lights(config: &SceneConfig) -> Vec<LightDescriptor> {
    vec![
        LightDescriptor {
            kind: LightKind::Directional,
            color: 0xffffff,
            intensity: 1500.0,
            position: Vec3::new(-3.0, 2.0, 4.0),
        },
        LightDescriptor {
            kind: LightKind::Point { range: 40.0 },
            color: 0xffffff,
            intensity: 2_000_000.0,
            position: Vec3::new(5.0, 5.0, 5.0),
        },
        LightDescriptor {
            kind: LightKind::Point { range: 30.0 },
            color: config.accent_color,
            intensity: 800_000.0,
            position: Vec3::new(-5.0, -3.0, 2.0),
        },
    ]
}

fn core_solid(config: &SceneConfig) -> ObjectDescriptor {
    ObjectDescriptor {
        kind: ObjectKind::Core,
        geometry: GeometryKind::Icosahedron {
            radius: CORE_RADIUS,
            detail: 0,
        },
        material: MaterialParams {
            color: config.primary_color,
            metalness: 0.2,
            roughness: 0.4,
            opacity: 1.0,
            glow: 0.15,
        },
        translation: Vec3::ZERO,
        rotation: Vec3::ZERO,
        orientation: Quat::IDENTITY,
        scale: 1.0,
        animatable: Animatable::Spin {
            speed: Vec3::new(0.003, 0.004, 0.0),
        },
        parts: Vec::new(),
    }
}

fn rings(config: &SceneConfig) -> [ObjectDescriptor; 2] {
    let ring = |major_radius: f32, color: u32, tilt: Vec3, speed: Vec3| ObjectDescriptor {
        kind: ObjectKind::Ring,
        geometry: GeometryKind::Torus {
            major_radius,
            minor_radius: 0.03,
        },
        material: MaterialParams {
            color,
            metalness: 0.6,
            roughness: 0.3,
            opacity: 0.6,
            glow: 0.5,
        },
        translation: Vec3::ZERO,
        rotation: tilt,
        orientation: Quat::IDENTITY,
        scale: 1.0,
        animatable: Animatable::Spin { speed },
        parts: Vec::new(),
    };

    [
        ring(
            2.1,
            config.secondary_color,
            Vec3::new(FRAC_PI_2, 0.0, 0.0),
            Vec3::new(0.002, 0.004, 0.0),
        ),
        ring(
            2.5,
            config.accent_color,
            Vec3::new(FRAC_PI_3, FRAC_PI_3, 0.0),
            Vec3::new(0.003, 0.0, 0.002),
        ),
    ]
}

fn halo(config: &SceneConfig) -> ObjectDescriptor {
    ObjectDescriptor {
        kind: ObjectKind::Halo,
        geometry: GeometryKind::Torus {
            major_radius: HALO_RADIUS,
            minor_radius: 0.01,
        },
        material: MaterialParams {
            color: config.primary_color,
            metalness: 0.0,
            roughness: 1.0,
            opacity: 0.25,
            glow: 0.3,
        },
        translation: Vec3::new(0.0, 0.0, -1.5),
        rotation: Vec3::ZERO,
        orientation: Quat::IDENTITY,
        scale: 1.0,
        animatable: Animatable::Fixed,
        parts: Vec::new(),
    }
}

fn satellite(config: &SceneConfig, index: usize, rng: &mut ChaCha8Rng) -> ObjectDescriptor {
    let direction = random_unit_vector(rng);
    let radius = rng.gen_range(SATELLITE_ORBIT_MIN..SATELLITE_ORBIT_MAX);
    let translation = direction * radius;

    // Perpendicular to the start position so the orbit is a great circle.
    let axis = direction
        .cross(random_unit_vector(rng))
        .try_normalize()
        .unwrap_or_else(|| direction.any_orthonormal_vector());
    let angle = rng.gen_range(SATELLITE_ANGLE_MIN..SATELLITE_ANGLE_MAX);

    let color = if index % 2 == 0 {
        config.accent_color
    } else {
        config.secondary_color
    };
    let body = MaterialParams {
        color,
        metalness: 0.5,
        roughness: 0.3,
        opacity: 1.0,
        glow: 0.4,
    };

    ObjectDescriptor {
        kind: ObjectKind::Satellite,
        geometry: GeometryKind::Sphere { radius: 0.12 },
        material: body,
        translation,
        rotation: Vec3::ZERO,
        orientation: facing_origin(translation),
        scale: 1.0,
        animatable: Animatable::Orbit { axis, angle },
        parts: vec![ChildPart {
            geometry: GeometryKind::Torus {
                major_radius: 0.22,
                minor_radius: 0.012,
            },
            material: MaterialParams {
                opacity: 0.7,
                ..body
            },
            translation: Vec3::ZERO,
            rotation: Vec3::new(FRAC_PI_2, 0.0, 0.0),
        }],
    }
}

fn particle_field(
    config: &SceneConfig,
    object_index: usize,
    rng: &mut ChaCha8Rng,
) -> ParticleField {
    let palette = [
        config.primary_color,
        config.secondary_color,
        config.accent_color,
    ];
    let mut positions = Vec::with_capacity(config.particle_count);
    let mut colors = Vec::with_capacity(config.particle_count);
    for _ in 0..config.particle_count {
        let r = rng.gen_range(PARTICLE_RADIUS_MIN..PARTICLE_RADIUS_MAX);
        positions.push(random_unit_vector(rng) * r);
        colors.push(palette[rng.gen_range(0..palette.len())]);
    }
    ParticleField {
        positions,
        colors,
        point_size: PARTICLE_SIZE,
        object_index,
    }
}

/// Uniform direction on the unit sphere.
fn random_unit_vector(rng: &mut ChaCha8Rng) -> Vec3 {
    let z: f32 = rng.gen_range(-1.0..1.0);
    let theta: f32 = rng.gen_range(0.0..TAU);
    let r = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(r * theta.cos(), r * theta.sin(), z)
}

/// Rotation that points an object's forward axis at the scene origin.
pub(crate) fn facing_origin(position: Vec3) -> Quat {
    if position.length_squared() < 1e-8 {
        return Quat::IDENTITY;
    }
    Transform::from_translation(position)
        .looking_at(Vec3::ZERO, Vec3::Y)
        .rotation
}
