//! Marker records as edited by the user and persisted to the config file.

use std::fmt;
use std::str::FromStr;

use glam::Vec2;

use crate::constants::{
    DEFAULT_DIVISIONS, DEFAULT_MARKER_NAME, DEFAULT_POSITION_PCT, DEFAULT_RADIUS_PCT,
};
use crate::palette::PaletteColor;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    #[default]
    CrossLines,
    Circle,
}

impl MarkerKind {
    pub const ALL: [MarkerKind; 2] = [MarkerKind::CrossLines, MarkerKind::Circle];

    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            MarkerKind::CrossLines => "CrossLines",
            MarkerKind::Circle => "Circle",
        }
    }
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown marker type `{0}`")]
pub struct UnknownKind(pub String);

impl FromStr for MarkerKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MarkerKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

/// Parameters that only matter for circles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleParams {
    /// Percentage of viewport width.
    pub radius: f32,
    /// Graduation and spoke count; `<= 1` draws none.
    pub divisions: i32,
}

impl Default for CircleParams {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS_PCT,
            divisions: DEFAULT_DIVISIONS,
        }
    }
}

/// What a record draws. This is the only view of a record the renderer uses.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MarkerShape {
    CrossLines,
    Circle(CircleParams),
}

/// One configured overlay element.
///
/// `circle` keeps its last value while `kind` is `CrossLines`, so switching
/// the kind back and forth in the editor loses nothing and the codec can
/// always write every field.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerRecord {
    pub name: String,
    pub kind: MarkerKind,
    /// Percentages of viewport width and height. Not clamped.
    pub position: Vec2,
    pub circle: CircleParams,
    pub color: PaletteColor,
    pub visible: bool,
}

impl Default for MarkerRecord {
    fn default() -> Self {
        Self {
            name: DEFAULT_MARKER_NAME.to_string(),
            kind: MarkerKind::default(),
            position: Vec2::splat(DEFAULT_POSITION_PCT),
            circle: CircleParams::default(),
            color: PaletteColor::default(),
            visible: true,
        }
    }
}

impl MarkerRecord {
    pub fn cross_lines(name: impl Into<String>, position: Vec2, color: PaletteColor) -> Self {
        Self {
            name: name.into(),
            kind: MarkerKind::CrossLines,
            position,
            color,
            ..Self::default()
        }
    }

    pub fn circle(
        name: impl Into<String>,
        position: Vec2,
        radius: f32,
        divisions: i32,
        color: PaletteColor,
    ) -> Self {
        Self {
            name: name.into(),
            kind: MarkerKind::Circle,
            position,
            circle: CircleParams { radius, divisions },
            color,
            ..Self::default()
        }
    }

    #[inline]
    pub fn shape(&self) -> MarkerShape {
        match self.kind {
            MarkerKind::CrossLines => MarkerShape::CrossLines,
            MarkerKind::Circle => MarkerShape::Circle(self.circle),
        }
    }
}
