/// Upper bound on the rotation speed (radians per frame).
pub const MAX_ROTATION_SPEED: f32 = 0.1;
pub const MAX_PARTICLES: usize = 2000;
pub const MAX_SATELLITES: usize = 16;

/// Color triples the client can cycle through at runtime.
pub const SCENE_PALETTES: [(u32, u32, u32); 3] = [
    (0x0e89e2, 0x7c3aed, 0x22d3ee),
    (0x10b981, 0x0ea5e9, 0xfacc15),
    (0xf43f5e, 0xf97316, 0xa78bfa),
];

/// Background scene configuration.
///
/// Any change to this value tears the mounted scene down and rebuilds it.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneConfig {
    pub primary_color: u32,
    pub secondary_color: u32,
    pub accent_color: u32,
    /// Base root rotation per frame (radians)
    pub rotation_speed: f32,
    pub animate: bool,
    pub particle_count: usize,
    pub satellite_count: usize,
    /// Seed for particle sampling and satellite orbit axes
    pub seed: u64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        let (primary, secondary, accent) = SCENE_PALETTES[0];
        Self {
            primary_color: primary,
            secondary_color: secondary,
            accent_color: accent,
            rotation_speed: 0.005,
            animate: true,
            particle_count: 400,
            satellite_count: 5,
            seed: 42,
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> Result<(), String> {
        for (name, color) in [
            ("primary_color", self.primary_color),
            ("secondary_color", self.secondary_color),
            ("accent_color", self.accent_color),
        ] {
            if color > 0xff_ffff {
                return Err(format!("{name} must be a 24-bit RGB value"));
            }
        }
        if !self.rotation_speed.is_finite() || self.rotation_speed < 0.0 {
            return Err("rotation_speed must be finite and >= 0".to_string());
        }
        if self.rotation_speed > MAX_ROTATION_SPEED {
            return Err(format!("rotation_speed must be <= {MAX_ROTATION_SPEED}"));
        }
        if self.particle_count > MAX_PARTICLES {
            return Err(format!("particle_count must be <= {MAX_PARTICLES}"));
        }
        if self.satellite_count > MAX_SATELLITES {
            return Err(format!("satellite_count must be <= {MAX_SATELLITES}"));
        }
        Ok(())
    }

    /// Switch to the palette at `index` (wrapping).
    pub fn with_palette(mut self, index: usize) -> Self {
        let (primary, secondary, accent) = SCENE_PALETTES[index % SCENE_PALETTES.len()];
        self.primary_color = primary;
        self.secondary_color = secondary;
        self.accent_color = accent;
        self
    }
}

/// Parse a CSS-style `#rrggbb` (or `rrggbb`) color.
pub fn parse_hex_color(s: &str) -> Result<u32, String> {
    let digits = s.trim().trim_start_matches('#');
    if digits.len() != 6 {
        return Err(format!("expected 6 hex digits, got {s:?}"));
    }
    u32::from_str_radix(digits, 16).map_err(|e| format!("invalid hex color {s:?}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scene_config_is_valid() {
        assert!(SceneConfig::default().validate().is_ok());
    }

    #[test]
    fn negative_rotation_speed_invalid() {
        let config = SceneConfig {
            rotation_speed: -0.01,
            ..SceneConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn nan_rotation_speed_invalid() {
        let config = SceneConfig {
            rotation_speed: f32::NAN,
            ..SceneConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn too_many_particles_invalid() {
        let config = SceneConfig {
            particle_count: MAX_PARTICLES + 1,
            ..SceneConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn color_out_of_range_invalid() {
        let config = SceneConfig {
            accent_color: 0x1_000_000,
            ..SceneConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn with_palette_wraps() {
        let config = SceneConfig::default().with_palette(SCENE_PALETTES.len() + 1);
        assert_eq!(config.primary_color, SCENE_PALETTES[1].0);
        assert_eq!(config.accent_color, SCENE_PALETTES[1].2);
    }

    #[test]
    fn parses_hex_colors() {
        assert_eq!(parse_hex_color("#0e89e2"), Ok(0x0e89e2));
        assert_eq!(parse_hex_color("FFFFFF"), Ok(0xffffff));
        assert!(parse_hex_color("#fff").is_err());
        assert!(parse_hex_color("#zzzzzz").is_err());
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(SceneConfig::default()).unwrap();
        assert!(json.get("rotationSpeed").is_some());
        assert!(json.get("particleCount").is_some());
    }
}
