//! # Tower Parameters
//!
//! [`ParameterSet`] is the immutable snapshot of every shape-defining input. A
//! parameter store owns the editable copy and hands a fresh snapshot to the
//! builder for each regeneration; nothing in this crate mutates the caller's value.
//!
//! Parameters can be loaded from TOML. Missing keys fall back to the defaults:
//!
//! ```toml
//! floors = 32
//! baseRadius = 5.0
//! floorSides = 4
//! twistMax = 180.0
//! scaleGradient = "bezier"
//! colorStart = "#1e90ff"
//! colorEnd = "#ff6347"
//!
//! [spacing]
//! perFloor = 2.5
//!
//! [bezier]
//! p1 = { x = 0.3, y = 0.0 }
//! p2 = { x = 0.7, y = 1.0 }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ParamsError};
use crate::gfx::color::Rgb;

/// Smallest supported polygon side count.
pub const MIN_SIDES: u32 = 3;
/// Largest supported polygon side count.
pub const MAX_SIDES: u32 = 128;
/// Upper bound on floors, keeps merged indices well inside `u32`.
pub const MAX_FLOORS: u32 = 10_000;

/// Clamps and rounds a requested side count into the supported range.
pub fn clamp_sides(sides: f32) -> u32 {
    if sides.is_nan() {
        return MIN_SIDES;
    }
    sides.round().clamp(MIN_SIDES as f32, MAX_SIDES as f32) as u32
}

/// Named easing curves selectable for twist and scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GradientMode {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Uses [`ParameterSet::bezier`], or the default curve when unset.
    Bezier,
}

/// A control point of the custom easing curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BezierPoint {
    pub x: f32,
    pub y: f32,
}

impl BezierPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Clamps both coordinates to the unit square. NaN maps to 0.
    pub fn clamped(self) -> Self {
        let unit = |v: f32| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
        Self::new(unit(self.x), unit(self.y))
    }
}

/// The two user-editable handles of the custom easing curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BezierControlPoints {
    pub p1: BezierPoint,
    pub p2: BezierPoint,
}

impl BezierControlPoints {
    pub fn clamped(self) -> Self {
        Self {
            p1: self.p1.clamped(),
            p2: self.p2.clamped(),
        }
    }
}

impl Default for BezierControlPoints {
    fn default() -> Self {
        Self {
            p1: BezierPoint::new(0.25, 0.1),
            p2: BezierPoint::new(0.75, 0.9),
        }
    }
}

/// How floors are distributed vertically.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FloorSpacing {
    /// Fixed distance between consecutive floors.
    PerFloor(f32),
    /// Distance between the lowest and highest floor.
    TotalHeight(f32),
}

impl FloorSpacing {
    pub fn value(&self) -> f32 {
        match *self {
            FloorSpacing::PerFloor(v) | FloorSpacing::TotalHeight(v) => v,
        }
    }

    /// Distance between consecutive floors for a tower of `floors` floors.
    pub fn step(&self, floors: u32) -> f32 {
        if floors <= 1 {
            return 0.0;
        }
        match *self {
            FloorSpacing::PerFloor(step) => step,
            FloorSpacing::TotalHeight(height) => height / (floors - 1) as f32,
        }
    }

    /// Distance between the lowest and highest floor centers.
    pub fn span(&self, floors: u32) -> f32 {
        self.step(floors) * floors.saturating_sub(1) as f32
    }
}

/// Validated snapshot of all shape-defining inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParameterSet {
    pub floors: u32,
    pub spacing: FloorSpacing,
    pub base_radius: f32,
    pub slab_thickness: f32,
    /// Requested side count; clamped to `[3, 128]` and rounded when building.
    pub floor_sides: f32,
    /// Degrees; min and max may be given in either order.
    pub twist_min: f32,
    pub twist_max: f32,
    pub scale_min: f32,
    pub scale_max: f32,
    pub twist_gradient: GradientMode,
    pub scale_gradient: GradientMode,
    pub bezier: Option<BezierControlPoints>,
    pub color_start: Rgb,
    pub color_end: Rgb,
    /// OkLab lightness lift, strongest mid-tower and zero at the end floors.
    pub brighten: f32,
    /// Only read by the renderer.
    pub auto_rotate: bool,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            floors: 48,
            spacing: FloorSpacing::TotalHeight(160.0),
            base_radius: 6.0,
            slab_thickness: 0.6,
            floor_sides: 6.0,
            twist_min: 0.0,
            twist_max: 260.0,
            scale_min: 0.4,
            scale_max: 1.0,
            twist_gradient: GradientMode::Linear,
            scale_gradient: GradientMode::Linear,
            bezier: None,
            color_start: Rgb::from_u8(0x54, 0xd2, 0xff),
            color_end: Rgb::from_u8(0xff, 0x8c, 0xcf),
            brighten: 0.3,
            auto_rotate: true,
        }
    }
}

impl ParameterSet {
    /// Parses a parameter set from TOML text and validates it.
    pub fn from_toml_str(text: &str) -> Result<Self, ParamsError> {
        let params: ParameterSet = toml::from_str(text)?;
        params.validate()?;
        Ok(params)
    }

    /// Loads and validates a TOML parameter file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ParamsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ParamsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String, ParamsError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Side count after clamping and rounding.
    pub fn sides(&self) -> u32 {
        clamp_sides(self.floor_sides)
    }

    /// Reports configuration errors that have no safe clamped default.
    ///
    /// Side count and bezier handles are clamped rather than rejected. Scale
    /// factors may be zero or negative; the builder floors the effective radius.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.floors == 0 {
            return Err(ConfigError::NoFloors);
        }
        if self.floors > MAX_FLOORS {
            return Err(ConfigError::TooManyFloors {
                floors: self.floors,
                max: MAX_FLOORS,
            });
        }

        positive("spacing", self.spacing.value())?;
        positive("baseRadius", self.base_radius)?;
        positive("slabThickness", self.slab_thickness)?;

        finite("twistMin", self.twist_min)?;
        finite("twistMax", self.twist_max)?;
        finite("scaleMin", self.scale_min)?;
        finite("scaleMax", self.scale_max)?;
        finite("brighten", self.brighten)?;

        if !self.color_start.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "colorStart",
            });
        }
        if !self.color_end.is_finite() {
            return Err(ConfigError::NonFinite { field: "colorEnd" });
        }
        Ok(())
    }

    /// Returns a copy with side count and bezier handles clamped.
    pub fn sanitized(&self) -> Self {
        Self {
            floor_sides: self.sides() as f32,
            bezier: self.bezier.map(BezierControlPoints::clamped),
            ..self.clone()
        }
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value <= 0.0 {
        return Err(ConfigError::NonPositive { field, value });
    }
    Ok(())
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { field });
    }
    Ok(())
}
