//! Color maps for scalar rasters.

/// Color value in RGBA format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Piecewise-linear map from `[0, 1]` to colors.
#[derive(Debug, Clone, Copy)]
pub struct ColorMap {
    pub name: &'static str,
    stops: &'static [(f32, Color)],
}

/// Matplotlib's `viridis`, sampled at nine stops.
pub const VIRIDIS: ColorMap = ColorMap {
    name: "viridis",
    stops: &[
        (0.0, Color::new(68, 1, 84, 255)),
        (0.125, Color::new(72, 40, 120, 255)),
        (0.25, Color::new(62, 73, 137, 255)),
        (0.375, Color::new(49, 104, 142, 255)),
        (0.5, Color::new(38, 130, 142, 255)),
        (0.625, Color::new(31, 158, 137, 255)),
        (0.75, Color::new(53, 183, 121, 255)),
        (0.875, Color::new(110, 206, 88, 255)),
        (1.0, Color::new(253, 231, 37, 255)),
    ],
};

impl ColorMap {
    /// Color at `t`, clamped to `[0, 1]`. Non-finite input is transparent.
    pub fn sample(&self, t: f32) -> Color {
        if !t.is_finite() {
            return Color::transparent();
        }
        let t = t.clamp(0.0, 1.0);

        for pair in self.stops.windows(2) {
            let (t0, c0) = pair[0];
            let (t1, c1) = pair[1];
            if t <= t1 {
                return interpolate_color(c0, c1, (t - t0) / (t1 - t0));
            }
        }
        self.stops[self.stops.len() - 1].1
    }
}

/// Linear color interpolation
pub fn interpolate_color(color1: Color, color2: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;

    Color::new(
        mix(color1.r, color2.r),
        mix(color1.g, color2.g),
        mix(color1.b, color2.b),
        mix(color1.a, color2.a),
    )
}
