use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::{CursorMoved, PrimaryWindow, WindowResized};

use crate::scene::pointer::normalize_pointer;

use super::contact_form::FocusedField;
use super::page::PageView;
use super::scene_view::SceneRuntime;
use super::UpdateSet;

pub struct InputPlugin;

/// Pixels per wheel line.
const LINE_HEIGHT: f32 = 40.0;
const ARROW_STEP: f32 = 48.0;
/// Share of the viewport moved by PageUp/PageDown.
const PAGE_STEP: f32 = 0.9;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (pointer_adapter, resize_adapter, scroll_input).in_set(UpdateSet::Input),
        );
    }
}

/// Feeds the latest cursor position into the scene. Last write wins.
fn pointer_adapter(
    mut moved: MessageReader<CursorMoved>,
    windows: Query<&Window, With<PrimaryWindow>>,
    runtime: Option<ResMut<SceneRuntime>>,
) {
    let Some(last) = moved.read().last() else {
        return;
    };
    let Some(mut runtime) = runtime else {
        return;
    };
    let Ok(window) = windows.get(last.window) else {
        return;
    };
    if let Some(pointer) = normalize_pointer(last.position, window.size()) {
        runtime.ctx.set_pointer(pointer);
    }
}

/// Matches the scene camera and the page layout to the window, on every
/// resize.
fn resize_adapter(
    mut resized: MessageReader<WindowResized>,
    windows: Query<&Window, With<PrimaryWindow>>,
    runtime: Option<ResMut<SceneRuntime>>,
    mut page: ResMut<PageView>,
) {
    if resized.read().last().is_none() {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    if window.width() <= 0.0 || window.height() <= 0.0 {
        return;
    }

    if let Some(mut runtime) = runtime {
        runtime
            .ctx
            .resize(window.physical_width(), window.physical_height());
    }
    page.relayout(window.width(), window.height());
}

fn scroll_input(
    mut wheel: MessageReader<MouseWheel>,
    keys: Res<ButtonInput<KeyCode>>,
    focused: Res<FocusedField>,
    mut page: ResMut<PageView>,
) {
    let mut delta = 0.0;
    for ev in wheel.read() {
        delta -= match ev.unit {
            MouseScrollUnit::Line => ev.y * LINE_HEIGHT,
            MouseScrollUnit::Pixel => ev.y,
        };
    }

    // Keys edit the form while a field has focus.
    if focused.0.is_none() {
        let viewport = page.layout.viewport_height;
        if keys.just_pressed(KeyCode::ArrowDown) {
            delta += ARROW_STEP;
        }
        if keys.just_pressed(KeyCode::ArrowUp) {
            delta -= ARROW_STEP;
        }
        if keys.just_pressed(KeyCode::PageDown) {
            delta += viewport * PAGE_STEP;
        }
        if keys.just_pressed(KeyCode::PageUp) {
            delta -= viewport * PAGE_STEP;
        }
        if keys.just_pressed(KeyCode::Home) {
            delta = -page.scroll;
        }
        if keys.just_pressed(KeyCode::End) {
            delta = page.layout.max_scroll() - page.scroll;
        }
    }

    if delta != 0.0 {
        page.scroll_by(delta);
    }
}
