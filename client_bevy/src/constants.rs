/// Fixed seconds-per-frame used when the clock reports a zero delta.
pub const FALLBACK_FRAME_DT: f32 = 1.0 / 60.0;

#[derive(Clone, Copy)]
pub struct Colors;

impl Colors {
    pub const PAGE_BG: u32 = 0x0b1120;
    pub const NAV_BG: u32 = 0x0f172a;
    pub const CARD_BG: u32 = 0x1e293b;
    pub const CARD_BORDER: u32 = 0x334155;
    pub const TEXT: u32 = 0xf8fafc;
    pub const TEXT_DIM: u32 = 0x94a3b8;
    pub const BRAND: u32 = 0x0e89e2;
    pub const BRAND_DARK: u32 = 0x0b6fb8;
    pub const SUCCESS: u32 = 0x22c55e;
    pub const DESTRUCTIVE: u32 = 0xef4444;
    pub const FIELD_BG: u32 = 0x0f172a;
    pub const FIELD_FOCUS: u32 = 0x38bdf8;
    pub const FOG: u32 = 0x0b1120;
}

pub fn color_from_hex(rgb: u32) -> bevy::prelude::Color {
    let r = ((rgb >> 16) & 0xff) as f32 / 255.0;
    let g = ((rgb >> 8) & 0xff) as f32 / 255.0;
    let b = (rgb & 0xff) as f32 / 255.0;
    bevy::prelude::Color::srgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_from_hex_parses_correctly() {
        let c = color_from_hex(0x0e89e2);
        if let bevy::prelude::Color::Srgba(srgba) = c {
            assert!((srgba.red - 14.0 / 255.0).abs() < 1e-3);
            assert!((srgba.green - 137.0 / 255.0).abs() < 1e-3);
            assert!((srgba.blue - 226.0 / 255.0).abs() < 1e-3);
        } else {
            panic!("Expected Srgba color variant");
        }
    }
}
