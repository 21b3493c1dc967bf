use bevy::math::Vec2;

/// Last pointer sample, both axes in [-1, 1]. x grows to the right, y grows
/// upward.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
}

/// Normalize a cursor position (logical pixels, origin top-left) against the
/// window size. `None` while the window has no area.
pub fn normalize_pointer(cursor: Vec2, window: Vec2) -> Option<PointerState> {
    if window.x <= 0.0 || window.y <= 0.0 {
        return None;
    }
    let x = (cursor.x / window.x) * 2.0 - 1.0;
    let y = 1.0 - (cursor.y / window.y) * 2.0;
    Some(PointerState {
        x: x.clamp(-1.0, 1.0),
        y: y.clamp(-1.0, 1.0),
    })
}
