//! Closed set of named marker colors.
//!
//! The persisted form of a color is its symbolic name, never its RGB triple,
//! so a record always decodes back to the exact same entry.

use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PaletteColor {
    Red,
    Green,
    Blue,
    Yellow,
    Cyan,
    Magenta,
    #[default]
    White,
    Black,
    Orange,
    Purple,
    Teal,
    Pink,
    Lime,
    LightBlue,
    LightPink,
    Gray,
}

// Declaration order; the index of each entry equals its discriminant.
const TABLE: [(PaletteColor, &str, [f32; 3]); 16] = [
    (PaletteColor::Red, "Red", [1.0, 0.0, 0.0]),
    (PaletteColor::Green, "Green", [0.0, 1.0, 0.0]),
    (PaletteColor::Blue, "Blue", [0.0, 0.0, 1.0]),
    (PaletteColor::Yellow, "Yellow", [1.0, 1.0, 0.0]),
    (PaletteColor::Cyan, "Cyan", [0.0, 1.0, 1.0]),
    (PaletteColor::Magenta, "Magenta", [1.0, 0.0, 1.0]),
    (PaletteColor::White, "White", [1.0, 1.0, 1.0]),
    (PaletteColor::Black, "Black", [0.0, 0.0, 0.0]),
    (PaletteColor::Orange, "Orange", [1.0, 0.5, 0.0]),
    (PaletteColor::Purple, "Purple", [0.5, 0.0, 1.0]),
    (PaletteColor::Teal, "Teal", [0.0, 1.0, 0.5]),
    (PaletteColor::Pink, "Pink", [1.0, 0.0, 0.5]),
    (PaletteColor::Lime, "Lime", [0.5, 1.0, 0.0]),
    (PaletteColor::LightBlue, "LightBlue", [0.0, 0.5, 1.0]),
    (PaletteColor::LightPink, "LightPink", [1.0, 0.5, 0.5]),
    (PaletteColor::Gray, "Gray", [0.5, 0.5, 0.5]),
];

impl PaletteColor {
    pub const ALL: [PaletteColor; 16] = [
        PaletteColor::Red,
        PaletteColor::Green,
        PaletteColor::Blue,
        PaletteColor::Yellow,
        PaletteColor::Cyan,
        PaletteColor::Magenta,
        PaletteColor::White,
        PaletteColor::Black,
        PaletteColor::Orange,
        PaletteColor::Purple,
        PaletteColor::Teal,
        PaletteColor::Pink,
        PaletteColor::Lime,
        PaletteColor::LightBlue,
        PaletteColor::LightPink,
        PaletteColor::Gray,
    ];

    #[inline]
    fn entry(self) -> &'static (PaletteColor, &'static str, [f32; 3]) {
        &TABLE[self as usize]
    }

    /// Stable identifier used in the config file.
    #[inline]
    pub fn name(self) -> &'static str {
        self.entry().1
    }

    /// Normalized RGB triple.
    #[inline]
    pub fn rgb(self) -> [f32; 3] {
        self.entry().2
    }

    /// Human-readable label with a space before each interior capital,
    /// e.g. "Light Blue".
    pub fn display_name(self) -> String {
        let name = self.name();
        let mut out = String::with_capacity(name.len() + 2);
        for (i, ch) in name.char_indices() {
            if i > 0 && ch.is_ascii_uppercase() {
                out.push(' ');
            }
            out.push(ch);
        }
        out
    }

    /// Exact, case-sensitive lookup by symbolic name.
    pub fn from_name(name: &str) -> Option<Self> {
        TABLE
            .iter()
            .find(|(_, n, _)| *n == name)
            .map(|(color, _, _)| *color)
    }
}

impl fmt::Display for PaletteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown palette color `{0}`")]
pub struct UnknownColor(pub String);

impl FromStr for PaletteColor {
    type Err = UnknownColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownColor(s.to_string()))
    }
}
