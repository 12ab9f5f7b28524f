// File: crates/coalviz-core/src/color.rs
// Summary: Fixed qualitative palette and deterministic country -> color assignment.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::{ChartError, ChartResult};

/// Opaque 8-bit RGB color token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Colorblind-safe qualitative palette (11 colors).
pub const SAFE: [Rgb; 11] = [
    Rgb::new(136, 204, 238),
    Rgb::new(204, 102, 119),
    Rgb::new(221, 204, 119),
    Rgb::new(17, 119, 51),
    Rgb::new(51, 34, 136),
    Rgb::new(170, 68, 153),
    Rgb::new(68, 170, 153),
    Rgb::new(153, 153, 51),
    Rgb::new(136, 34, 85),
    Rgb::new(102, 17, 0),
    Rgb::new(136, 136, 136),
];

/// Non-empty, fixed-size list of colors indexed cyclically.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    pub fn new(colors: Vec<Rgb>) -> ChartResult<Self> {
        if colors.is_empty() {
            return Err(ChartError::invalid_palette("palette must hold at least one color"));
        }
        Ok(Self { colors })
    }

    pub fn safe() -> Self {
        Self { colors: SAFE.to_vec() }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at `index`, wrapping once the palette is exhausted.
    #[inline]
    pub fn cycled(&self, index: usize) -> Rgb {
        self.colors[index % self.colors.len()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::safe()
    }
}

/// Country -> color for one build.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ColorMap {
    colors: BTreeMap<String, Rgb>,
}

impl ColorMap {
    pub fn get(&self, country: &str) -> Option<Rgb> {
        self.colors.get(country).copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Rgb)> + '_ {
        self.colors.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Walk `countries` in order and give the i-th one `palette[i % N]`.
/// A name repeated in the list keeps its first color.
pub fn assign_colors<'a, I>(countries: I, palette: &Palette) -> ColorMap
where
    I: IntoIterator<Item = &'a str>,
{
    let mut colors = BTreeMap::new();
    for (i, country) in countries.into_iter().enumerate() {
        colors.entry(country.to_string()).or_insert_with(|| palette.cycled(i));
    }
    ColorMap { colors }
}
