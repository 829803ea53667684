use egui::{color::Hsva, Color32};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn brightness(&self) -> u8 {
        self.r.max(self.g).max(self.b)
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl From<Color32> for Rgb {
    fn from(color: Color32) -> Self {
        Self::new(color.r(), color.g(), color.b())
    }
}

impl From<Rgb> for Color32 {
    fn from(Rgb { r, g, b }: Rgb) -> Self {
        Color32::from_rgb(r, g, b)
    }
}

const SATURATION: std::ops::Range<f32> = 0.80..1.0;
/// Linear-space value; comes out at roughly 35% to 57% once gamma encoded
const BRIGHTNESS: std::ops::Range<f32> = 0.10..0.28;

/// `count` dark colors, each hue drawn from its own slice of the color wheel.
///
/// The buckets are shuffled so neighbouring segments don't fade into a gradient.
pub fn dark_palette(rng: &mut fastrand::Rng, count: usize) -> Vec<Rgb> {
    if count == 0 {
        return Vec::new();
    }

    let bucket = 1.0 / count as f32;
    let mut buckets = (0..count).collect::<Vec<_>>();
    rng.shuffle(&mut buckets);

    buckets
        .into_iter()
        .map(|i| {
            let hue = (i as f32 + 0.15 + rng.f32() * 0.7) * bucket;
            let saturation = pick(rng, SATURATION);
            let value = pick(rng, BRIGHTNESS);
            Color32::from(Hsva::new(hue, saturation, value, 1.0)).into()
        })
        .collect()
}

fn pick(rng: &mut fastrand::Rng, range: std::ops::Range<f32>) -> f32 {
    range.start + rng.f32() * (range.end - range.start)
}
