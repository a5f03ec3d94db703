use crate::error::{RaysError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Edge or corner of the surface the rays are cast from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RaysOrigin {
    #[default]
    TopCenter,
    TopLeft,
    TopRight,
    Left,
    Right,
    BottomCenter,
    BottomLeft,
    BottomRight,
}

impl RaysOrigin {
    pub const ALL: [RaysOrigin; 8] = [
        RaysOrigin::TopCenter,
        RaysOrigin::TopLeft,
        RaysOrigin::TopRight,
        RaysOrigin::Left,
        RaysOrigin::Right,
        RaysOrigin::BottomCenter,
        RaysOrigin::BottomLeft,
        RaysOrigin::BottomRight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RaysOrigin::TopCenter => "top-center",
            RaysOrigin::TopLeft => "top-left",
            RaysOrigin::TopRight => "top-right",
            RaysOrigin::Left => "left",
            RaysOrigin::Right => "right",
            RaysOrigin::BottomCenter => "bottom-center",
            RaysOrigin::BottomLeft => "bottom-left",
            RaysOrigin::BottomRight => "bottom-right",
        }
    }
}

impl fmt::Display for RaysOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RaysOrigin {
    type Err = RaysError;

    fn from_str(s: &str) -> Result<Self> {
        RaysOrigin::ALL
            .into_iter()
            .find(|o| o.name() == s)
            .ok_or_else(|| RaysError::UnknownOrigin(s.to_string()))
    }
}

/// Normalized (0..1) color channels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `rrggbb` (case-insensitive).
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(RaysError::InvalidColor(hex.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map(|v| v as f32 / 255.0)
                .map_err(|_| RaysError::InvalidColor(hex.to_string()))
        };
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    pub fn to_hex(self) -> String {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", q(self.r), q(self.g), q(self.b))
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Rgb::WHITE
    }
}

// Unparseable colors degrade to white rather than failing the whole config.
impl From<String> for Rgb {
    fn from(s: String) -> Self {
        Rgb::from_hex(&s).unwrap_or_else(|e| {
            log::warn!("[rays] {e}; using white");
            Rgb::WHITE
        })
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        c.to_hex()
    }
}

/// Full widget configuration. Numeric fields are not range-checked: negative
/// or zero values flow straight into the light-field math.
#[derive(Clone, Debug, PartialEq)]
pub struct LightRaysConfig {
    pub origin: RaysOrigin,
    pub color: Rgb,
    pub speed: f32,
    pub spread: f32,
    pub length: f32,
    pub pulsating: bool,
    pub fade_distance: f32,
    pub saturation: f32,
    pub follow_mouse: bool,
    pub mouse_influence: f32,
    pub noise_amount: f32,
    pub distortion: f32,
}

impl Default for LightRaysConfig {
    fn default() -> Self {
        Self {
            origin: RaysOrigin::TopCenter,
            color: Rgb::WHITE,
            speed: 1.0,
            spread: 1.0,
            length: 2.0,
            pulsating: false,
            fade_distance: 1.0,
            saturation: 1.0,
            follow_mouse: true,
            mouse_influence: 0.1,
            noise_amount: 0.0,
            distortion: 0.0,
        }
    }
}

impl LightRaysConfig {
    /// Preset used behind the portfolio hero banner.
    pub fn hero() -> Self {
        Self {
            spread: 0.8,
            length: 1.5,
            speed: 0.8,
            pulsating: true,
            mouse_influence: 0.05,
            ..Self::default()
        }
    }

    /// Mouse influence as seen by the shader; zero when following is off.
    pub fn effective_mouse_influence(&self) -> f32 {
        if self.follow_mouse {
            self.mouse_influence
        } else {
            0.0
        }
    }

    pub fn apply(&mut self, patch: &ConfigPatch) {
        if let Some(v) = patch.origin {
            self.origin = v;
        }
        if let Some(v) = patch.color {
            self.color = v;
        }
        if let Some(v) = patch.speed {
            self.speed = v;
        }
        if let Some(v) = patch.spread {
            self.spread = v;
        }
        if let Some(v) = patch.length {
            self.length = v;
        }
        if let Some(v) = patch.pulsating {
            self.pulsating = v;
        }
        if let Some(v) = patch.fade_distance {
            self.fade_distance = v;
        }
        if let Some(v) = patch.saturation {
            self.saturation = v;
        }
        if let Some(v) = patch.follow_mouse {
            self.follow_mouse = v;
        }
        if let Some(v) = patch.mouse_influence {
            self.mouse_influence = v;
        }
        if let Some(v) = patch.noise_amount {
            self.noise_amount = v;
        }
        if let Some(v) = patch.distortion {
            self.distortion = v;
        }
    }

    pub fn with(mut self, patch: &ConfigPatch) -> Self {
        self.apply(patch);
        self
    }

    /// Defaults overlaid with a JSON object of widget props.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::default().with(&ConfigPatch::from_json(json)?))
    }
}

/// Partial configuration as supplied by callers. Accepts both the short
/// field names and the widget prop names (`raysOrigin`,
/// `lightSpread`, ...). Unknown keys are ignored.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigPatch {
    #[serde(alias = "raysOrigin")]
    pub origin: Option<RaysOrigin>,
    #[serde(alias = "raysColor")]
    pub color: Option<Rgb>,
    #[serde(alias = "raysSpeed")]
    pub speed: Option<f32>,
    #[serde(alias = "lightSpread")]
    pub spread: Option<f32>,
    #[serde(alias = "rayLength")]
    pub length: Option<f32>,
    #[serde(alias = "pulsate")]
    pub pulsating: Option<bool>,
    #[serde(alias = "fade_distance")]
    pub fade_distance: Option<f32>,
    pub saturation: Option<f32>,
    #[serde(alias = "follow_mouse")]
    pub follow_mouse: Option<bool>,
    #[serde(alias = "mouse_influence")]
    pub mouse_influence: Option<f32>,
    #[serde(alias = "noise_amount")]
    pub noise_amount: Option<f32>,
    pub distortion: Option<f32>,
}

impl ConfigPatch {
    pub fn from_json(json: &str) -> Result<Self> {
        let trimmed = json.trim();
        if trimmed.is_empty() || trimmed == "null" || trimmed == "undefined" {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(trimmed)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_names_round_trip_through_from_str() {
        for o in RaysOrigin::ALL {
            assert_eq!(o.name().parse::<RaysOrigin>().unwrap(), o);
        }
        assert!("middle".parse::<RaysOrigin>().is_err());
    }

    #[test]
    fn hex_parsing_accepts_optional_hash_and_mixed_case() {
        let c = Rgb::from_hex("#FF8000").unwrap();
        assert!((c.r - 1.0).abs() < 1e-6);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
        assert_eq!(Rgb::from_hex("ff8000").unwrap(), c);
    }

    #[test]
    fn short_or_garbage_hex_is_rejected() {
        assert!(Rgb::from_hex("#fff").is_err());
        assert!(Rgb::from_hex("#gg0000").is_err());
        assert!(Rgb::from_hex("").is_err());
    }

    #[test]
    fn following_off_zeroes_the_shader_influence() {
        let mut cfg = LightRaysConfig::default();
        assert!((cfg.effective_mouse_influence() - 0.1).abs() < 1e-6);
        cfg.follow_mouse = false;
        assert_eq!(cfg.effective_mouse_influence(), 0.0);
    }
}
