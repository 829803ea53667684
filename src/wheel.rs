use egui::Pos2;

use crate::{
    geometry::{self, Arc, ArcShape},
    palette::{self, Rgb},
};

pub const ONE_TURN: f32 = 360.0;

pub const DEFAULT_SEGMENTS: usize = 10;
pub const INNER_RADIUS: f32 = 20.0;
pub const PAD_ANGLE: f32 = 0.01;

pub const PRIZE_STEP: u32 = 200;

/// Degrees covered by one segment
pub fn segment_width(segments: usize) -> f32 {
    ONE_TURN / segments as f32
}

/// Half a segment; applied to the drawing so segment centers (not boundaries) sit under the pointer
pub fn angle_offset(segments: usize) -> f32 {
    segment_width(segments) / 2.0
}

/// Collapses accumulated rotation into a single turn. The sign is kept.
pub fn normalize(angle: f32) -> f32 {
    angle % ONE_TURN
}

pub fn snap(angle: f32, interval: f32) -> f32 {
    if interval == 0.0 || !interval.is_finite() {
        return angle;
    }
    (angle / interval).round() * interval
}

/// Which segment sits under the pointer for a settled `angle`.
///
/// Rotation direction doesn't matter: the magnitude is used, so `-36` and `36` pick the same
/// segment.
pub fn winner_index(angle: f32, segments: usize) -> usize {
    if segments == 0 {
        return 0;
    }
    let deg = (angle.round() % ONE_TURN).abs();
    let index = (deg / segment_width(segments)).floor() as usize;
    index.min(segments - 1)
}

/// A prize in `[200, 2200]`, a multiple of 200.
pub fn draw_prize(rng: &mut fastrand::Rng) -> u32 {
    let step = (rng.f64() * 10.0 + 1.0).round() as u32;
    step * PRIZE_STEP
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WheelSpec {
    pub segments: usize,
    pub radius: f32,
    pub inner_radius: f32,
    pub pad_angle: f32,
}

impl WheelSpec {
    pub const fn new(segments: usize, radius: f32) -> Self {
        Self {
            segments,
            radius,
            inner_radius: INNER_RADIUS,
            pad_angle: PAD_ANGLE,
        }
    }

    pub fn shape(&self) -> ArcShape {
        ArcShape::new(self.inner_radius, self.radius).pad_angle(self.pad_angle)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Slice {
    pub index: usize,
    pub arc: Arc,
    pub path: String,
    pub color: Rgb,
    pub value: u32,
    pub centroid: Pos2,
}

#[derive(Clone, Debug)]
pub struct Wheel {
    spec: WheelSpec,
    slices: Vec<Slice>,
}

impl Wheel {
    pub fn build(rng: &mut fastrand::Rng, spec: WheelSpec) -> Self {
        let shape = spec.shape();
        let colors = palette::dark_palette(rng, spec.segments);

        let slices = geometry::pie(spec.segments)
            .into_iter()
            .zip(colors)
            .map(|(arc, color)| Slice {
                index: arc.index,
                path: shape.path(&arc),
                centroid: shape.centroid(&arc),
                color,
                value: draw_prize(rng),
                arc,
            })
            .collect();

        Self { spec, slices }
    }

    pub const fn spec(&self) -> &WheelSpec {
        &self.spec
    }

    pub fn shape(&self) -> ArcShape {
        self.spec.shape()
    }

    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    pub fn segment_width(&self) -> f32 {
        segment_width(self.len())
    }

    pub fn winner(&self, angle: f32) -> Option<&Slice> {
        if self.is_empty() {
            return None;
        }
        self.slices.get(winner_index(angle, self.len()))
    }
}
