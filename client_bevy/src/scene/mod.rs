//! Engine-independent model of the background scene.
//!
//! `SceneContext` is created on mount and owned by the mounted runtime. The
//! animation loop mutates it once per frame and the Bevy layer copies the
//! result onto entities.

pub mod animation;
pub mod build;
pub mod pointer;

use bevy::math::{EulerRot, Quat, Vec3};
use bevy::transform::components::Transform;
use nexora_shared::config::SceneConfig;

use pointer::PointerState;

pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_Z: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// Vertical field of view (radians)
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
}

impl CameraState {
    pub fn for_surface(surface: SurfaceSize) -> Self {
        Self {
            fov_y: CAMERA_FOV_DEGREES.to_radians(),
            aspect: surface.aspect(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            position: Vec3::new(0.0, 0.0, CAMERA_Z),
        }
    }
}

/// Output buffer size in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            return 1.0;
        }
        self.width as f32 / self.height as f32
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometryKind {
    Icosahedron { radius: f32, detail: u32 },
    Torus { major_radius: f32, minor_radius: f32 },
    Sphere { radius: f32 },
    /// Container for the particle points; has no mesh of its own.
    PointCloud,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialParams {
    pub color: u32,
    pub metalness: f32,
    pub roughness: f32,
    /// 1.0 is opaque
    pub opacity: f32,
    /// Emissive strength relative to `color`
    pub glow: f32,
}

impl MaterialParams {
    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }
}

/// Per-object animation behavior, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Animatable {
    Fixed,
    /// Euler rotation added every frame (radians per frame, per axis)
    Spin { speed: Vec3 },
    /// Position rotated around `axis` by `angle` every frame
    Orbit { axis: Vec3, angle: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Core,
    Ring,
    Satellite,
    /// Faint static ring framing the core
    Halo,
    ParticleField,
}

/// Static mesh attached under an object, moving with it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChildPart {
    pub geometry: GeometryKind,
    pub material: MaterialParams,
    pub translation: Vec3,
    pub rotation: Vec3,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectDescriptor {
    pub kind: ObjectKind,
    pub geometry: GeometryKind,
    pub material: MaterialParams,
    pub translation: Vec3,
    /// Euler XYZ angles, wrapped to [0, 2π)
    pub rotation: Vec3,
    /// Applied before `rotation`; satellites use it to face the origin
    pub orientation: Quat,
    pub scale: f32,
    pub animatable: Animatable,
    pub parts: Vec<ChildPart>,
}

impl ObjectDescriptor {
    pub fn transform(&self) -> Transform {
        Transform {
            translation: self.translation,
            rotation: self.orientation * euler_quat(self.rotation),
            scale: Vec3::splat(self.scale),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootGroup {
    /// Euler XYZ angles, wrapped to [0, 2π)
    pub rotation: Vec3,
    pub scale: f32,
}

impl Default for RootGroup {
    fn default() -> Self {
        Self {
            rotation: Vec3::ZERO,
            scale: 1.0,
        }
    }
}

impl RootGroup {
    pub fn transform(&self) -> Transform {
        Transform {
            translation: Vec3::ZERO,
            rotation: euler_quat(self.rotation),
            scale: Vec3::splat(self.scale),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    /// Soft fill from a fixed direction
    Directional,
    Point { range: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightDescriptor {
    pub kind: LightKind,
    pub color: u32,
    pub intensity: f32,
    pub position: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FogDescriptor {
    pub color: u32,
    pub start: f32,
    pub end: f32,
}

/// Point positions and colors sampled once at construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleField {
    pub positions: Vec<Vec3>,
    pub colors: Vec<u32>,
    pub point_size: f32,
    /// Index into `SceneContext::objects` of the field container
    pub object_index: usize,
}

impl ParticleField {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneContext {
    pub config: SceneConfig,
    pub camera: CameraState,
    pub surface: SurfaceSize,
    pub root: RootGroup,
    pub lights: Vec<LightDescriptor>,
    pub fog: FogDescriptor,
    pub objects: Vec<ObjectDescriptor>,
    pub particles: ParticleField,
    pub pointer: PointerState,
    /// Seconds since mount
    pub elapsed: f32,
    pub frames_rendered: u64,
}

impl SceneContext {
    /// Match the camera and output buffer to a new container size.
    /// Returns false (and changes nothing) for a zero-sized container.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.surface = SurfaceSize::new(width, height);
        self.camera.aspect = self.surface.aspect();
        true
    }

    pub fn set_pointer(&mut self, pointer: PointerState) {
        self.pointer = pointer;
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }
}

pub(crate) fn euler_quat(angles: Vec3) -> Quat {
    Quat::from_euler(EulerRot::XYZ, angles.x, angles.y, angles.z)
}

pub(crate) fn wrap_angle(a: f32) -> f32 {
    a.rem_euclid(std::f32::consts::TAU)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(width: u32, height: u32) -> SceneContext {
        build::build_scene(&SceneConfig::default(), SurfaceSize::new(width, height))
    }

    mod resize {
        use super::*;

        #[test]
        fn aspect_and_buffer_follow_new_size() {
            let mut ctx = context(1280, 720);
            assert!(ctx.resize(800, 1000));
            assert_eq!(ctx.surface, SurfaceSize::new(800, 1000));
            assert!((ctx.camera.aspect - 0.8).abs() < 1e-6);
        }

        #[test]
        fn repeated_resizes_use_the_last_size() {
            let mut ctx = context(640, 480);
            ctx.resize(1920, 1080);
            ctx.resize(1024, 768);
            assert_eq!(ctx.surface, SurfaceSize::new(1024, 768));
            assert!((ctx.camera.aspect - 1024.0 / 768.0).abs() < 1e-6);
        }

        #[test]
        fn zero_size_is_ignored() {
            let mut ctx = context(1280, 720);
            assert!(!ctx.resize(0, 720));
            assert!(!ctx.resize(1280, 0));
            assert_eq!(ctx.surface, SurfaceSize::new(1280, 720));
            assert!((ctx.camera.aspect - 1280.0 / 720.0).abs() < 1e-6);
        }

        #[test]
        fn resize_does_not_touch_objects() {
            let mut ctx = context(1280, 720);
            let before = ctx.objects.clone();
            ctx.resize(300, 300);
            assert_eq!(ctx.objects, before);
        }
    }

    #[test]
    fn camera_matches_fixed_projection() {
        let cam = CameraState::for_surface(SurfaceSize::new(200, 100));
        assert!((cam.fov_y - 75f32.to_radians()).abs() < 1e-6);
        assert_eq!(cam.aspect, 2.0);
        assert_eq!(cam.position, Vec3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn wrap_angle_stays_in_range() {
        let tau = std::f32::consts::TAU;
        assert!((wrap_angle(tau + 0.5) - 0.5).abs() < 1e-5);
        assert!(wrap_angle(-0.1) > 0.0);
        assert!(wrap_angle(-0.1) < tau);
    }
}
