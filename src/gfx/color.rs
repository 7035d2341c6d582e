//! # Color Ramps
//!
//! Floor colors are interpolated between two endpoints in OkLab space, which keeps
//! lightness and hue transitions even instead of the muddy midtones produced by a
//! raw sRGB channel lerp.
//!
//! ```rust
//! use tower_forge::gfx::color::{ColorRamp, Rgb};
//!
//! let ramp = ColorRamp::new("#54d2ff".parse().unwrap(), "#ff8ccf".parse().unwrap());
//! let mid = ramp.at(0.5);
//! assert!(mid.is_finite());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// OkLab lightness added per unit of brightening.
const BRIGHTEN_STEP: f32 = 0.18;

/// An sRGB color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Builds a color from 8-bit channels.
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Quantizes to 8-bit channels, clamping out-of-gamut values.
    pub fn to_u8(self) -> [u8; 3] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    pub fn is_finite(&self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite()
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Converts to OkLab (L in `[0, 1]`, a/b roughly in `[-0.4, 0.4]`).
    pub fn to_oklab(self) -> OkLab {
        let r = srgb_to_linear(self.r);
        let g = srgb_to_linear(self.g);
        let b = srgb_to_linear(self.b);

        let l = 0.412_221_47 * r + 0.536_332_55 * g + 0.051_445_995 * b;
        let m = 0.211_903_5 * r + 0.680_699_5 * g + 0.107_396_96 * b;
        let s = 0.088_302_46 * r + 0.281_718_85 * g + 0.629_978_7 * b;

        let l_ = l.cbrt();
        let m_ = m.cbrt();
        let s_ = s.cbrt();

        OkLab {
            l: 0.210_454_26 * l_ + 0.793_617_8 * m_ - 0.004_072_047 * s_,
            a: 1.977_998_5 * l_ - 2.428_592_2 * m_ + 0.450_593_7 * s_,
            b: 0.025_904_037 * l_ + 0.782_771_77 * m_ - 0.808_675_77 * s_,
        }
    }
}

impl FromStr for Rgb {
    type Err = ConfigError;

    /// Parses `#rrggbb` or `#rgb` (the leading `#` is optional).
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidColor {
            input: input.to_string(),
        };
        let hex = input.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());

        match hex.len() {
            6 => Ok(Rgb::from_u8(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
                Ok(Rgb::from_u8(short(0)?, short(1)?, short(2)?))
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.to_u8();
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

impl TryFrom<String> for Rgb {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

/// A color in the OkLab perceptual space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OkLab {
    pub l: f32,
    pub a: f32,
    pub b: f32,
}

impl OkLab {
    pub fn lerp(self, other: OkLab, t: f32) -> OkLab {
        OkLab {
            l: self.l + (other.l - self.l) * t,
            a: self.a + (other.a - self.a) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    /// Converts back to sRGB, clamping out-of-gamut channels.
    pub fn to_rgb(self) -> Rgb {
        let l_ = self.l + 0.396_337_78 * self.a + 0.215_803_76 * self.b;
        let m_ = self.l - 0.105_561_346 * self.a - 0.063_854_17 * self.b;
        let s_ = self.l - 0.089_484_18 * self.a - 1.291_485_5 * self.b;

        let l = l_ * l_ * l_;
        let m = m_ * m_ * m_;
        let s = s_ * s_ * s_;

        let r = 4.076_741_7 * l - 3.307_711_6 * m + 0.230_969_94 * s;
        let g = -1.268_438 * l + 2.609_757_4 * m - 0.341_319_38 * s;
        let b = -0.004_196_086_3 * l - 0.703_418_6 * m + 1.707_614_7 * s;

        Rgb::new(
            linear_to_srgb(r).clamp(0.0, 1.0),
            linear_to_srgb(g).clamp(0.0, 1.0),
            linear_to_srgb(b).clamp(0.0, 1.0),
        )
    }
}

fn srgb_to_linear(v: f32) -> f32 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(v: f32) -> f32 {
    if v <= 0.003_130_8 {
        v * 12.92
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    }
}

/// Interpolates between two endpoint colors at a normalized position.
#[derive(Debug, Clone, Copy)]
pub struct ColorRamp {
    start: OkLab,
    end: OkLab,
    brighten: f32,
}

impl ColorRamp {
    pub fn new(start: Rgb, end: Rgb) -> Self {
        Self {
            start: start.to_oklab(),
            end: end.to_oklab(),
            brighten: 0.0,
        }
    }

    /// Lifts lightness toward the middle of the ramp. The lift is zero at both
    /// ends so `at(0)` and `at(1)` still reproduce the endpoint colors.
    pub fn with_brighten(mut self, amount: f32) -> Self {
        self.brighten = if amount.is_finite() { amount } else { 0.0 };
        self
    }

    /// Color at `t`, clamped to `[0, 1]`.
    pub fn at(&self, t: f32) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let mut lab = self.start.lerp(self.end, t);
        let lift = self.brighten * BRIGHTEN_STEP * 4.0 * t * (1.0 - t);
        lab.l = (lab.l + lift).clamp(0.0, 1.0);
        lab.to_rgb()
    }
}
