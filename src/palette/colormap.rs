use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::lerp_u8;

/// Number of entries in every palette lookup table.
pub const LUT_SIZE: usize = 256;

/// The fixed set of palettes.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PaletteName {
    /// Cyclic light-blue-dark-red-light palette.
    #[default]
    Twilight,
    /// `Twilight` rotated by half a cycle and reversed, dark at both ends.
    TwilightShifted,
    /// Black to white.
    Gray,
}

impl PaletteName {
    /// Every palette name, in display order.
    pub const ALL: [PaletteName; 3] = [Self::Twilight, Self::TwilightShifted, Self::Gray];

    /// Stable lowercase identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Twilight => "twilight",
            Self::TwilightShifted => "twilight_shifted",
            Self::Gray => "gray",
        }
    }
}

impl std::fmt::Display for PaletteName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaletteName {
    type Err = ReelError;

    fn from_str(s: &str) -> ReelResult<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ReelError::validation(format!("unknown palette '{s}'")))
    }
}

// Twilight control points (position, sRGB). Sampled from the cyclic "twilight" colormap; both ends
// share the same color.
const TWILIGHT_STOPS: [(f64, [u8; 3]); 17] = [
    (0.0000, [226, 217, 226]),
    (0.0625, [193, 203, 214]),
    (0.1250, [154, 180, 204]),
    (0.1875, [116, 152, 197]),
    (0.2500, [95, 122, 193]),
    (0.3125, [93, 88, 182]),
    (0.3750, [88, 57, 152]),
    (0.4375, [71, 32, 105]),
    (0.5000, [48, 20, 55]),
    (0.5625, [81, 20, 70]),
    (0.6250, [119, 29, 77]),
    (0.6875, [156, 51, 74]),
    (0.7500, [183, 84, 75]),
    (0.8125, [198, 122, 98]),
    (0.8750, [207, 158, 135]),
    (0.9375, [218, 191, 183]),
    (1.0000, [226, 217, 226]),
];

const GRAY_STOPS: [(f64, [u8; 3]); 2] = [(0.0, [0, 0, 0]), (1.0, [255, 255, 255])];

/// Scalar-to-color mapping backed by a 256-entry lookup table.
///
/// Inputs are normalized scalars: values below 0 take the first entry, values above 1 the last,
/// and NaN maps to the "bad" color (fully transparent).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    name: PaletteName,
    reversed: bool,
    lut: Vec<[u8; 3]>,
}

impl Palette {
    /// Build the named palette.
    pub fn named(name: PaletteName) -> Self {
        let lut = match name {
            PaletteName::Twilight => build_lut(&TWILIGHT_STOPS),
            PaletteName::TwilightShifted => {
                let mut lut = build_lut(&TWILIGHT_STOPS);
                lut.rotate_left(LUT_SIZE / 2);
                lut.reverse();
                lut
            }
            PaletteName::Gray => build_lut(&GRAY_STOPS),
        };
        Self {
            name,
            reversed: false,
            lut,
        }
    }

    /// Return the palette with its lookup table reversed.
    pub fn reversed(mut self) -> Self {
        self.lut.reverse();
        self.reversed = !self.reversed;
        self
    }

    /// Palette name.
    pub fn name(&self) -> PaletteName {
        self.name
    }

    /// Whether the palette is reversed relative to its named order.
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Table entry `i` as opaque RGB.
    pub fn entry(&self, i: usize) -> [u8; 3] {
        self.lut[i.min(LUT_SIZE - 1)]
    }

    /// Map a normalized scalar to straight-alpha RGBA8.
    pub fn lookup(&self, t: f64) -> [u8; 4] {
        if t.is_nan() {
            return [0, 0, 0, 0];
        }
        let [r, g, b] = self.entry(lut_index(t));
        [r, g, b, 255]
    }
}

fn lut_index(t: f64) -> usize {
    if t <= 0.0 {
        return 0;
    }
    // `t == 1.0` lands in the last bin.
    ((t * LUT_SIZE as f64) as usize).min(LUT_SIZE - 1)
}

fn build_lut(stops: &[(f64, [u8; 3])]) -> Vec<[u8; 3]> {
    (0..LUT_SIZE)
        .map(|i| sample_stops(stops, i as f64 / (LUT_SIZE - 1) as f64))
        .collect()
}

fn sample_stops(stops: &[(f64, [u8; 3])], t: f64) -> [u8; 3] {
    let hi = stops
        .iter()
        .position(|(pos, _)| *pos >= t)
        .unwrap_or(stops.len() - 1);
    if hi == 0 {
        return stops[0].1;
    }
    let (p0, c0) = stops[hi - 1];
    let (p1, c1) = stops[hi];
    let u = if p1 > p0 { (t - p0) / (p1 - p0) } else { 0.0 };
    [
        lerp_u8(c0[0], c1[0], u),
        lerp_u8(c0[1], c1[1], u),
        lerp_u8(c0[2], c1[2], u),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/palette/colormap.rs"]
mod tests;
