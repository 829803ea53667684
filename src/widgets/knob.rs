use egui::{emath::Rot2, pos2, vec2, Color32, Painter, Pos2, Shape, Stroke};

use crate::wheel;

/// Progress through the current segment -> pointer tilt, in degrees
const WOBBLE_TABLE: [(f32, f32); 6] = [
    (-1.0, 0.0),
    (-0.45, 0.0),
    (-0.0001, 35.0),
    (0.001, -35.0),
    (0.45, 0.0),
    (1.0, 0.0),
];

pub const KNOB_SIZE: egui::Vec2 = vec2(40.0, 60.0);

/// How far the pointer tilts for the wheel's current `angle`.
///
/// Flips hard as a slice boundary passes the pointer and relaxes to nothing by the middle of
/// the next slice.
pub fn wobble(angle: f32, segments: usize) -> f32 {
    if segments == 0 {
        return 0.0;
    }
    let width = wheel::segment_width(segments);
    let t = ((angle - wheel::angle_offset(segments)).rem_euclid(wheel::ONE_TURN) / width)
        .rem_euclid(1.0);
    interpolate(&WOBBLE_TABLE, t)
}

/// Piecewise-linear lookup; extends the end segments past the table's range
fn interpolate(table: &[(f32, f32)], x: f32) -> f32 {
    let segment = table
        .windows(2)
        .find(|pair| x <= pair[1].0)
        .or_else(|| table.windows(2).last());

    match segment {
        Some([(x0, y0), (x1, y1)]) => {
            if x1 == x0 {
                return *y0;
            }
            y0 + (y1 - y0) * (x - x0) / (x1 - x0)
        }
        _ => table.first().map(|&(_, y)| y).unwrap_or_default(),
    }
}

/// The fixed pointer above the wheel
pub struct Knob {
    angle: f32,
    segments: usize,
}

impl Knob {
    pub const fn new(angle: f32, segments: usize) -> Self {
        Self { angle, segments }
    }

    /// Points of the pin, tip down, relative to the pivot at the center of its head
    fn outline(size: egui::Vec2) -> [Pos2; 5] {
        let (w, h) = (size.x / 2.0, size.y);
        [
            pos2(-w, -w * 0.6),
            pos2(-w * 0.5, -w),
            pos2(w * 0.5, -w),
            pos2(w, -w * 0.6),
            pos2(0.0, h - w),
        ]
    }

    /// `tip` is where the pointer touches the wheel's rim
    pub fn paint(&self, painter: &Painter, tip: Pos2, size: egui::Vec2) {
        let tilt = wobble(self.angle, self.segments);
        let rot = Rot2::from_angle(tilt.to_radians());
        let pivot = tip - vec2(0.0, size.y - size.x / 2.0);

        let points = Self::outline(size)
            .into_iter()
            .map(|p| pivot + rot * p.to_vec2())
            .collect();

        painter.add(Shape::convex_polygon(
            points,
            Color32::from_rgb(0xE5, 0x39, 0x35),
            Stroke::new(1.5, Color32::from_rgb(0x7F, 0x1D, 0x1D)),
        ));
        painter.circle_filled(pivot, size.x * 0.15, Color32::WHITE);
    }
}
