//! Colours shared by the HTML and PDF renderers.

use std::fmt;

/// An sRGB colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// CSS `#rrggbb` notation.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// Linear blend between `self` (at 0) and `other` (at 1).
    pub fn mix(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb(
            channel(self.0, other.0),
            channel(self.1, other.1),
            channel(self.2, other.2),
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Rgb> for genpdf::style::Color {
    fn from(rgb: Rgb) -> Self {
        genpdf::style::Color::Rgb(rgb.0, rgb.1, rgb.2)
    }
}

/// A named sequence of colours, used both as a continuous scale and as a
/// cycling discrete palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorScale {
    name: &'static str,
    stops: &'static [Rgb],
}

impl ColorScale {
    pub const fn new(name: &'static str, stops: &'static [Rgb]) -> Self {
        Self { name, stops }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn stops(&self) -> &'static [Rgb] {
        self.stops
    }

    /// Colour at position `t` in `[0, 1]`, interpolated between stops.
    pub fn sample(&self, t: f64) -> Rgb {
        match self.stops {
            [] => Rgb(0, 0, 0),
            [only] => *only,
            stops => {
                let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
                let scaled = t * (stops.len() - 1) as f64;
                let lower = scaled.floor() as usize;
                let upper = (lower + 1).min(stops.len() - 1);
                stops[lower].mix(stops[upper], scaled - lower as f64)
            }
        }
    }

    /// Colour for the `index`-th category, cycling through the stops.
    pub fn cycle(&self, index: usize) -> Rgb {
        if self.stops.is_empty() {
            Rgb(0, 0, 0)
        } else {
            self.stops[index % self.stops.len()]
        }
    }
}

/// Sequential yellow-orange-brown scale.
pub const YL_OR_BR: ColorScale = ColorScale::new(
    "YlOrBr",
    &[
        Rgb(255, 255, 229),
        Rgb(255, 247, 188),
        Rgb(254, 227, 145),
        Rgb(254, 196, 79),
        Rgb(254, 153, 41),
        Rgb(236, 112, 20),
        Rgb(204, 76, 2),
        Rgb(153, 52, 4),
        Rgb(102, 37, 6),
    ],
);

/// Sequential plasma scale, the default for continuous colour.
pub const PLASMA: ColorScale = ColorScale::new(
    "Plasma",
    &[
        Rgb(0x0d, 0x08, 0x87),
        Rgb(0x46, 0x03, 0x9f),
        Rgb(0x72, 0x01, 0xa8),
        Rgb(0x9c, 0x17, 0x9e),
        Rgb(0xbd, 0x37, 0x86),
        Rgb(0xd8, 0x57, 0x6b),
        Rgb(0xed, 0x79, 0x53),
        Rgb(0xfb, 0x9f, 0x3a),
        Rgb(0xfd, 0xca, 0x26),
        Rgb(0xf0, 0xf9, 0x21),
    ],
);

/// Sequential inferno scale.
pub const INFERNO: ColorScale = ColorScale::new(
    "Inferno",
    &[
        Rgb(0x00, 0x00, 0x04),
        Rgb(0x1b, 0x0c, 0x41),
        Rgb(0x4a, 0x0c, 0x6b),
        Rgb(0x78, 0x1c, 0x6d),
        Rgb(0xa5, 0x2c, 0x60),
        Rgb(0xcf, 0x44, 0x46),
        Rgb(0xed, 0x69, 0x25),
        Rgb(0xfb, 0x9b, 0x06),
        Rgb(0xf7, 0xd1, 0x3d),
        Rgb(0xfc, 0xff, 0xa4),
    ],
);

pub const ORANGE: Rgb = Rgb(255, 165, 0);
pub const GREEN: Rgb = Rgb(0, 128, 0);
pub const BLUE: Rgb = Rgb(0, 0, 255);

/// Neutral stroke used for axes and grid lines.
pub const AXIS_GREY: Rgb = Rgb(150, 150, 150);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_hits_the_end_stops() {
        assert_eq!(YL_OR_BR.sample(0.0), Rgb(255, 255, 229));
        assert_eq!(YL_OR_BR.sample(1.0), Rgb(102, 37, 6));
        assert_eq!(YL_OR_BR.sample(f64::NAN), Rgb(255, 255, 229));
    }

    #[test]
    fn sample_interpolates_between_stops() {
        let scale = ColorScale::new("test", &[Rgb(0, 0, 0), Rgb(200, 100, 50)]);
        assert_eq!(scale.sample(0.5), Rgb(100, 50, 25));
    }

    #[test]
    fn cycle_wraps_around() {
        assert_eq!(INFERNO.cycle(10), INFERNO.cycle(0));
        assert_eq!(INFERNO.cycle(11), Rgb(0x1b, 0x0c, 0x41));
    }

    #[test]
    fn hex_notation() {
        assert_eq!(ORANGE.to_hex(), "#ffa500");
    }
}
