use bevy::prelude::*;
use nexora_shared::config::SceneConfig;

use crate::constants::{color_from_hex, Colors};
use crate::shared::delivery::ContactDelivery;

use super::page::PageView;
use super::scene_view::SceneSettings;

#[derive(SystemSet, Debug, Hash, Eq, PartialEq, Clone)]
pub(crate) enum UpdateSet {
    Input,
    Scene,
    Page,
}

pub struct CorePlugin {
    pub contact_url: Option<String>,
    pub scene: SceneConfig,
}

/// Camera that draws the page UI on top of the scene.
#[derive(Component)]
pub(crate) struct UiCamera;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ContactDelivery::new(self.contact_url.clone()))
            .insert_resource(SceneSettings(self.scene.clone()))
            .init_resource::<PageView>()
            .insert_resource(ClearColor(color_from_hex(Colors::PAGE_BG)))
            .configure_sets(
                Update,
                (UpdateSet::Input, UpdateSet::Scene, UpdateSet::Page).chain(),
            )
            .add_systems(Startup, (setup_ui_camera, log_contact_endpoint));
    }
}

pub(crate) fn msaa() -> Msaa {
    // Cameras sharing a window must agree on sample count.
    #[cfg(target_arch = "wasm32")]
    let msaa = Msaa::Off;
    #[cfg(not(target_arch = "wasm32"))]
    let msaa = Msaa::Sample4;
    msaa
}

fn setup_ui_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Camera {
            order: 1,
            clear_color: ClearColorConfig::Custom(color_from_hex(Colors::PAGE_BG)),
            ..default()
        },
        msaa(),
        UiCamera,
    ));
}

fn log_contact_endpoint(delivery: Res<ContactDelivery>) {
    match delivery.endpoint() {
        Some(url) => info!("Contact submissions go to {url}"),
        None => warn!("No contact endpoint configured; submissions will fail"),
    }
}
