mod constants;
mod layout;
mod scene;
mod shared;
mod site;

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};
use nexora_shared::config::SceneConfig;

use site::{
    ContactFormPlugin, CorePlugin, InputPlugin, ListingsPlugin, PagePlugin, SceneViewPlugin,
};

fn main() {
    let contact_url = contact_url_from_env_or_location();
    let (scene, scene_warning) = scene_config_from_env();

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "NEXORA".to_string(),
                resolution: WindowResolution::new(1280, 800),
                present_mode: PresentMode::AutoVsync,
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(CorePlugin {
            contact_url: Some(contact_url),
            scene,
        })
        .add_plugins(SceneViewPlugin)
        .add_plugins(PagePlugin)
        .add_plugins(ListingsPlugin)
        .add_plugins(ContactFormPlugin)
        .add_plugins(InputPlugin)
        .add_systems(Startup, move || {
            if let Some(warning) = &scene_warning {
                warn!("{warning}");
            }
        })
        .run();
}

#[cfg(not(target_arch = "wasm32"))]
fn contact_url_from_env_or_location() -> String {
    std::env::var("NEXORA_CONTACT_URL").unwrap_or_else(|_| {
        format!(
            "http://127.0.0.1:3000{}",
            nexora_shared::protocol::CONTACT_PATH
        )
    })
}

#[cfg(target_arch = "wasm32")]
fn contact_url_from_env_or_location() -> String {
    let path = nexora_shared::protocol::CONTACT_PATH;
    let Some(window) = web_sys::window() else {
        return path.to_string();
    };
    match window.location().origin() {
        Ok(origin) if !origin.is_empty() && origin != "null" => format!("{origin}{path}"),
        _ => path.to_string(),
    }
}

/// Default scene, with `NEXORA_SCENE_COLOR` overriding the primary color.
/// A bad value is reported once logging is up.
#[cfg(not(target_arch = "wasm32"))]
fn scene_config_from_env() -> (SceneConfig, Option<String>) {
    let mut config = SceneConfig::default();
    let Ok(raw) = std::env::var("NEXORA_SCENE_COLOR") else {
        return (config, None);
    };
    match nexora_shared::config::parse_hex_color(&raw) {
        Ok(color) => {
            config.primary_color = color;
            (config, None)
        }
        Err(e) => (config, Some(format!("Ignoring NEXORA_SCENE_COLOR: {e}"))),
    }
}

#[cfg(target_arch = "wasm32")]
fn scene_config_from_env() -> (SceneConfig, Option<String>) {
    (SceneConfig::default(), None)
}
