//! Mounts the background scene into the primary window and drives it.
//!
//! The scene model lives in [`SceneRuntime`]; entities and GPU assets are
//! derived from it on mount and released as a whole on unmount or
//! reconfiguration.

use bevy::ecs::system::SystemParam;
use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use nexora_shared::config::{SceneConfig, MAX_ROTATION_SPEED, SCENE_PALETTES};

use crate::constants::{color_from_hex, Colors, FALLBACK_FRAME_DT};
use crate::scene::animation::{AnimationLoop, FrameInput, FrameSink};
use crate::scene::build::build_scene;
use crate::scene::{GeometryKind, LightKind, MaterialParams, SceneContext, SurfaceSize};

use super::core::{msaa, UiCamera, UpdateSet};

pub struct SceneViewPlugin;

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SceneMount {
    #[default]
    Mounted,
    Unmounted,
}

/// Desired scene configuration. Any change rebuilds the scene.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct SceneSettings(pub SceneConfig);

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SceneNode {
    Root,
    Object(usize),
}

/// The camera the scene is drawn through. One exists while mounted.
#[derive(Component)]
pub(crate) struct SceneSurface;

#[derive(Default)]
struct SceneAssets {
    meshes: Vec<Handle<Mesh>>,
    materials: Vec<Handle<StandardMaterial>>,
}

#[derive(Resource)]
pub(crate) struct SceneRuntime {
    pub(crate) ctx: SceneContext,
    animation: AnimationLoop,
    /// Top-level entities; children go with them.
    entities: Vec<Entity>,
    assets: SceneAssets,
}

impl Plugin for SceneViewPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneSettings>()
            .init_state::<SceneMount>()
            .add_systems(OnEnter(SceneMount::Mounted), mount_scene)
            .add_systems(OnExit(SceneMount::Mounted), unmount_scene)
            .add_systems(
                Update,
                (
                    scene_controls.in_set(UpdateSet::Input),
                    (rebuild_on_config_change, animate_scene)
                        .chain()
                        .in_set(UpdateSet::Scene),
                    sync_ui_camera_clear.in_set(UpdateSet::Page),
                ),
            );
    }
}

#[derive(SystemParam)]
pub(crate) struct SceneBuilder<'w, 's> {
    commands: Commands<'w, 's>,
    meshes: ResMut<'w, Assets<Mesh>>,
    materials: ResMut<'w, Assets<StandardMaterial>>,
}

impl SceneBuilder<'_, '_> {
    fn spawn(&mut self, ctx: SceneContext) -> SceneRuntime {
        let mut assets = SceneAssets::default();
        let mut entities = Vec::with_capacity(ctx.lights.len() + 2);

        let surface = self
            .commands
            .spawn((
                Camera3d::default(),
                Camera {
                    order: 0,
                    ..default()
                },
                Projection::Perspective(PerspectiveProjection {
                    fov: ctx.camera.fov_y,
                    aspect_ratio: ctx.camera.aspect,
                    near: ctx.camera.near,
                    far: ctx.camera.far,
                    ..default()
                }),
                Transform::from_translation(ctx.camera.position).looking_at(Vec3::ZERO, Vec3::Y),
                msaa(),
                DistanceFog {
                    color: color_from_hex(ctx.fog.color),
                    falloff: FogFalloff::Linear {
                        start: ctx.fog.start,
                        end: ctx.fog.end,
                    },
                    ..default()
                },
                SceneSurface,
            ))
            .id();
        entities.push(surface);

        for light in &ctx.lights {
            let color = color_from_hex(light.color);
            let transform =
                Transform::from_translation(light.position).looking_at(Vec3::ZERO, Vec3::Y);
            let id = match light.kind {
                LightKind::Directional => self
                    .commands
                    .spawn((
                        DirectionalLight {
                            color,
                            illuminance: light.intensity,
                            ..default()
                        },
                        transform,
                    ))
                    .id(),
                LightKind::Point { range } => self
                    .commands
                    .spawn((
                        PointLight {
                            color,
                            intensity: light.intensity,
                            range,
                            ..default()
                        },
                        transform,
                    ))
                    .id(),
            };
            entities.push(id);
        }

        let root = self
            .commands
            .spawn((SceneNode::Root, ctx.root.transform(), Visibility::default()))
            .id();
        entities.push(root);

        let mut object_entities = Vec::with_capacity(ctx.objects.len());
        for (index, obj) in ctx.objects.iter().enumerate() {
            let drawable = self
                .mesh(obj.geometry, &mut assets)
                .map(|mesh| (mesh, self.material(obj.material, false, &mut assets)));
            let mut entity = self.commands.spawn((
                SceneNode::Object(index),
                obj.transform(),
                Visibility::default(),
                ChildOf(root),
            ));
            if let Some((mesh, material)) = drawable {
                entity.insert((Mesh3d(mesh), MeshMaterial3d(material)));
            }
            let id = entity.id();
            object_entities.push(id);

            for part in &obj.parts {
                let Some(mesh) = self.mesh(part.geometry, &mut assets) else {
                    continue;
                };
                let material = self.material(part.material, false, &mut assets);
                self.commands.spawn((
                    Mesh3d(mesh),
                    MeshMaterial3d(material),
                    Transform {
                        translation: part.translation,
                        rotation: crate::scene::euler_quat(part.rotation),
                        ..default()
                    },
                    ChildOf(id),
                ));
            }
        }

        if let Some(&field) = object_entities.get(ctx.particles.object_index) {
            self.spawn_particles(&ctx, field, &mut assets);
        }

        SceneRuntime {
            ctx,
            animation: AnimationLoop::standard(),
            entities,
            assets,
        }
    }

    fn spawn_particles(&mut self, ctx: &SceneContext, field: Entity, assets: &mut SceneAssets) {
        if ctx.particles.is_empty() {
            return;
        }
        let Some(point) = self.mesh(
            GeometryKind::Icosahedron {
                radius: ctx.particles.point_size,
                detail: 0,
            },
            assets,
        ) else {
            return;
        };

        // One material per distinct color.
        let mut palette: Vec<(u32, Handle<StandardMaterial>)> = Vec::new();
        for (position, color) in ctx.particles.positions.iter().zip(&ctx.particles.colors) {
            let material = match palette.iter().find(|(c, _)| c == color) {
                Some((_, handle)) => handle.clone(),
                None => {
                    let params = MaterialParams {
                        color: *color,
                        metalness: 0.0,
                        roughness: 1.0,
                        opacity: 0.8,
                        glow: 1.0,
                    };
                    let handle = self.material(params, true, assets);
                    palette.push((*color, handle.clone()));
                    handle
                }
            };
            self.commands.spawn((
                Mesh3d(point.clone()),
                MeshMaterial3d(material),
                Transform::from_translation(*position),
                ChildOf(field),
            ));
        }
    }

    fn mesh(&mut self, geometry: GeometryKind, assets: &mut SceneAssets) -> Option<Handle<Mesh>> {
        let mesh = match geometry {
            GeometryKind::Icosahedron { radius, detail } => Sphere::new(radius)
                .mesh()
                .ico(detail)
                .unwrap_or_else(|_| Sphere::new(radius).mesh().uv(24, 16))
                .with_duplicated_vertices()
                .with_computed_flat_normals(),
            GeometryKind::Torus {
                major_radius,
                minor_radius,
            } => Mesh::from(Torus {
                minor_radius,
                major_radius,
            }),
            GeometryKind::Sphere { radius } => Sphere::new(radius).mesh().uv(16, 12),
            GeometryKind::PointCloud => return None,
        };
        let handle = self.meshes.add(mesh);
        assets.meshes.push(handle.clone());
        Some(handle)
    }

    fn material(
        &mut self,
        params: MaterialParams,
        unlit: bool,
        assets: &mut SceneAssets,
    ) -> Handle<StandardMaterial> {
        let color = color_from_hex(params.color);
        let handle = self.materials.add(StandardMaterial {
            base_color: color.with_alpha(params.opacity),
            metallic: params.metalness,
            perceptual_roughness: params.roughness,
            emissive: color.to_linear() * params.glow,
            alpha_mode: if params.is_transparent() {
                AlphaMode::Blend
            } else {
                AlphaMode::Opaque
            },
            unlit,
            ..default()
        });
        assets.materials.push(handle.clone());
        handle
    }

    /// Despawn every scene entity and drop every asset the scene created.
    fn release(&mut self, runtime: &mut SceneRuntime) {
        for entity in runtime.entities.drain(..) {
            self.commands.entity(entity).despawn();
        }
        let assets = std::mem::take(&mut runtime.assets);
        for handle in &assets.meshes {
            self.meshes.remove(handle);
        }
        for handle in &assets.materials {
            self.materials.remove(handle);
        }
    }
}

fn mount_scene(
    mut builder: SceneBuilder,
    settings: Res<SceneSettings>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let Ok(window) = windows.single() else {
        debug!("No primary window, scene not mounted");
        return;
    };
    mount_into(&mut builder, &settings.0, window);
}

/// Validate `config` and build the scene at the window's size.
fn mount_into(builder: &mut SceneBuilder, config: &SceneConfig, window: &Window) {
    if let Err(e) = config.validate() {
        warn!("Scene config rejected: {}", e);
        return;
    }

    let surface = SurfaceSize::new(
        window.physical_width().max(1),
        window.physical_height().max(1),
    );
    let runtime = builder.spawn(build_scene(config, surface));
    info!(
        "Scene mounted: {} objects, {} particles",
        runtime.ctx.object_count(),
        runtime.ctx.particles.len()
    );
    builder.commands.insert_resource(runtime);
}

fn unmount_scene(mut builder: SceneBuilder, runtime: Option<ResMut<SceneRuntime>>) {
    let Some(mut runtime) = runtime else {
        return;
    };
    runtime.animation.cancel();
    builder.release(&mut runtime);
    builder.commands.remove_resource::<SceneRuntime>();
    info!(
        "Scene unmounted after {} frames",
        runtime.ctx.frames_rendered
    );
}

/// Rebuild on settings change. A scene that failed to mount is retried
/// while the mount state still asks for one.
fn rebuild_on_config_change(
    mut builder: SceneBuilder,
    settings: Res<SceneSettings>,
    runtime: Option<ResMut<SceneRuntime>>,
    mount: Res<State<SceneMount>>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    if !settings.is_changed() {
        return;
    }
    let Some(mut runtime) = runtime else {
        // A freshly added config was already tried by `mount_scene`.
        if !settings.is_added() && *mount.get() == SceneMount::Mounted {
            if let Ok(window) = windows.single() {
                mount_into(&mut builder, &settings.0, window);
            }
        }
        return;
    };
    if runtime.ctx.config == settings.0 {
        return;
    }
    if let Err(e) = settings.0.validate() {
        warn!("Scene config rejected, keeping current scene: {}", e);
        return;
    }

    let surface = runtime.ctx.surface;
    let pointer = runtime.ctx.pointer;
    builder.release(&mut runtime);
    let mut ctx = build_scene(&settings.0, surface);
    ctx.set_pointer(pointer);
    *runtime = builder.spawn(ctx);
    debug!("Scene rebuilt");
}

/// Copies the scene model onto its entities once per frame.
#[derive(SystemParam)]
pub(crate) struct TransformSync<'w, 's> {
    nodes: Query<'w, 's, (&'static SceneNode, &'static mut Transform)>,
    surfaces: Query<'w, 's, &'static mut Projection, With<SceneSurface>>,
}

impl FrameSink for TransformSync<'_, '_> {
    fn present(&mut self, ctx: &SceneContext) {
        for (node, mut transform) in &mut self.nodes {
            match *node {
                SceneNode::Root => *transform = ctx.root.transform(),
                SceneNode::Object(index) => {
                    if let Some(obj) = ctx.objects.get(index) {
                        *transform = obj.transform();
                    }
                }
            }
        }
        for mut projection in &mut self.surfaces {
            if let Projection::Perspective(perspective) = &mut *projection {
                perspective.aspect_ratio = ctx.camera.aspect;
            }
        }
    }
}

fn animate_scene(
    time: Res<Time>,
    runtime: Option<ResMut<SceneRuntime>>,
    mut sink: TransformSync,
) {
    let Some(mut runtime) = runtime else {
        return;
    };
    let dt = time.delta_secs();
    let input = FrameInput {
        dt: if dt > 0.0 { dt } else { FALLBACK_FRAME_DT },
    };
    let SceneRuntime { ctx, animation, .. } = &mut *runtime;
    animation.step(ctx, &input, &mut sink);
}

/// The UI camera clears the window only while no scene draws underneath.
fn sync_ui_camera_clear(
    runtime: Option<Res<SceneRuntime>>,
    mut cameras: Query<&mut Camera, With<UiCamera>>,
) {
    let mounted = runtime.is_some();
    for mut camera in &mut cameras {
        let clears = !matches!(camera.clear_color, ClearColorConfig::None);
        if mounted && clears {
            camera.clear_color = ClearColorConfig::None;
        } else if !mounted && !clears {
            camera.clear_color = ClearColorConfig::Custom(color_from_hex(Colors::PAGE_BG));
        }
    }
}

/// F1 palette, F2 animation, F3/F4 speed, F5 mount toggle.
fn scene_controls(
    keys: Res<ButtonInput<KeyCode>>,
    mut settings: ResMut<SceneSettings>,
    mount: Res<State<SceneMount>>,
    mut next_mount: ResMut<NextState<SceneMount>>,
    mut palette: Local<usize>,
) {
    if keys.just_pressed(KeyCode::F1) {
        *palette = (*palette + 1) % SCENE_PALETTES.len();
        settings.0 = settings.0.clone().with_palette(*palette);
    }
    if keys.just_pressed(KeyCode::F2) {
        settings.0.animate = !settings.0.animate;
    }
    if keys.just_pressed(KeyCode::F3) {
        settings.0.rotation_speed *= 0.5;
    }
    if keys.just_pressed(KeyCode::F4) {
        let speed = settings.0.rotation_speed.max(0.001);
        settings.0.rotation_speed = (speed * 2.0).min(MAX_ROTATION_SPEED);
    }
    if keys.just_pressed(KeyCode::F5) {
        next_mount.set(match mount.get() {
            SceneMount::Mounted => SceneMount::Unmounted,
            SceneMount::Unmounted => SceneMount::Mounted,
        });
    }
}

#[cfg(test)]
mod tests {
    use bevy::asset::AssetPlugin;
    use bevy::state::app::StatesPlugin;
    use bevy::window::WindowResolution;

    use super::*;

    fn test_config() -> SceneConfig {
        SceneConfig {
            particle_count: 24,
            satellite_count: 3,
            ..SceneConfig::default()
        }
    }

    fn headless_app(with_window: bool) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default(), StatesPlugin))
            .init_asset::<Mesh>()
            .init_asset::<StandardMaterial>()
            .init_resource::<ButtonInput<KeyCode>>()
            .insert_resource(SceneSettings(test_config()))
            .add_plugins(SceneViewPlugin);
        if with_window {
            app.world_mut().spawn((
                Window {
                    resolution: WindowResolution::new(800, 600),
                    ..default()
                },
                PrimaryWindow,
            ));
        }
        app
    }

    fn count<F: bevy::ecs::query::QueryFilter>(app: &mut App) -> usize {
        let world = app.world_mut();
        let mut query = world.query_filtered::<Entity, F>();
        query.iter(world).count()
    }

    fn mesh_count(app: &App) -> usize {
        app.world().resource::<Assets<Mesh>>().len()
    }

    fn material_count(app: &App) -> usize {
        app.world().resource::<Assets<StandardMaterial>>().len()
    }

    fn set_mount(app: &mut App, mount: SceneMount) {
        app.world_mut()
            .resource_mut::<NextState<SceneMount>>()
            .set(mount);
        app.update();
    }

    #[test]
    fn mount_creates_one_surface() {
        let mut app = headless_app(true);
        app.update();

        assert!(app.world().contains_resource::<SceneRuntime>());
        assert_eq!(count::<With<SceneSurface>>(&mut app), 1);
        assert_eq!(count::<With<SceneNode>>(&mut app), 1 + 1 + 2 + 3 + 1 + 1);
        assert!(mesh_count(&app) > 0);

        let runtime = app.world().resource::<SceneRuntime>();
        assert_eq!(runtime.ctx.surface, SurfaceSize::new(800, 600));
    }

    #[test]
    fn reconfiguration_replaces_the_scene() {
        let mut app = headless_app(true);
        app.update();
        let meshes = mesh_count(&app);
        let materials = material_count(&app);

        for palette in [1, 2, 0, 1] {
            app.world_mut().resource_mut::<SceneSettings>().0 =
                test_config().with_palette(palette);
            app.update();
            assert_eq!(count::<With<SceneSurface>>(&mut app), 1);
        }

        assert_eq!(mesh_count(&app), meshes);
        assert_eq!(material_count(&app), materials);
        let expected = test_config().with_palette(1);
        assert_eq!(app.world().resource::<SceneRuntime>().ctx.config, expected);
        let roots = {
            let world = app.world_mut();
            let mut q = world.query::<&SceneNode>();
            q.iter(world).filter(|n| **n == SceneNode::Root).count()
        };
        assert_eq!(roots, 1);
    }

    #[test]
    fn invalid_config_keeps_current_scene() {
        let mut app = headless_app(true);
        app.update();
        app.world_mut().resource_mut::<SceneSettings>().0.rotation_speed = -1.0;
        app.update();

        let runtime = app.world().resource::<SceneRuntime>();
        assert_eq!(runtime.ctx.config, test_config());
        assert_eq!(count::<With<SceneSurface>>(&mut app), 1);
    }

    #[test]
    fn unmount_releases_everything() {
        let mut app = headless_app(true);
        app.update();
        set_mount(&mut app, SceneMount::Unmounted);

        assert!(!app.world().contains_resource::<SceneRuntime>());
        assert_eq!(count::<With<SceneSurface>>(&mut app), 0);
        assert_eq!(count::<With<SceneNode>>(&mut app), 0);
        assert_eq!(count::<With<Mesh3d>>(&mut app), 0);
        assert_eq!(mesh_count(&app), 0);
        assert_eq!(material_count(&app), 0);
    }

    #[test]
    fn remount_after_unmount() {
        let mut app = headless_app(true);
        app.update();
        set_mount(&mut app, SceneMount::Unmounted);
        set_mount(&mut app, SceneMount::Mounted);

        assert!(app.world().contains_resource::<SceneRuntime>());
        assert_eq!(count::<With<SceneSurface>>(&mut app), 1);
    }

    #[test]
    fn mount_without_window_is_a_no_op() {
        let mut app = headless_app(false);
        app.update();
        app.update();

        assert!(!app.world().contains_resource::<SceneRuntime>());
        assert_eq!(count::<With<SceneSurface>>(&mut app), 0);
        assert_eq!(mesh_count(&app), 0);
    }

    #[test]
    fn valid_config_mounts_after_rejected_one() {
        let mut app = headless_app(true);
        app.world_mut().resource_mut::<SceneSettings>().0.rotation_speed = 1.0;
        app.update();
        assert!(!app.world().contains_resource::<SceneRuntime>());

        app.world_mut().resource_mut::<SceneSettings>().0 = test_config();
        app.update();
        app.update();

        assert!(app.world().contains_resource::<SceneRuntime>());
        assert_eq!(count::<With<SceneSurface>>(&mut app), 1);
    }

    #[test]
    fn unmounted_scene_ignores_config_changes() {
        let mut app = headless_app(true);
        app.update();
        set_mount(&mut app, SceneMount::Unmounted);

        app.world_mut().resource_mut::<SceneSettings>().0 = test_config().with_palette(2);
        app.update();

        assert!(!app.world().contains_resource::<SceneRuntime>());
        assert_eq!(count::<With<SceneSurface>>(&mut app), 0);
    }

    #[test]
    fn frames_sync_root_transform() {
        let mut app = headless_app(true);
        for _ in 0..5 {
            app.update();
        }

        let (root, frames) = {
            let runtime = app.world().resource::<SceneRuntime>();
            (runtime.ctx.root, runtime.ctx.frames_rendered)
        };
        assert!(frames >= 4);
        assert!(root.rotation.x > 0.0);

        let world = app.world_mut();
        let mut q = world.query::<(&SceneNode, &Transform)>();
        let synced = q
            .iter(world)
            .find(|(n, _)| **n == SceneNode::Root)
            .map(|(_, t)| *t)
            .unwrap();
        assert_eq!(synced, root.transform());
    }

    #[test]
    fn f5_toggles_mount() {
        let mut app = headless_app(true);
        app.update();

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::F5);
        app.update();
        {
            let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            keys.release(KeyCode::F5);
            keys.clear();
        }
        app.update();
        assert!(!app.world().contains_resource::<SceneRuntime>());
        assert_eq!(
            *app.world().resource::<State<SceneMount>>().get(),
            SceneMount::Unmounted
        );
    }
}
