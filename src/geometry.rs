use std::f32::consts::{FRAC_PI_2, PI, TAU};

use egui::{pos2, Pos2};

const EPSILON: f32 = 1e-6;

/// One wedge of a full turn, in radians, clockwise from 12 o'clock
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Arc {
    pub index: usize,
    pub start_angle: f32,
    pub end_angle: f32,
    pub pad_angle: f32,
}

impl Arc {
    pub fn span(&self) -> f32 {
        self.end_angle - self.start_angle
    }

    pub fn mid_angle(&self) -> f32 {
        (self.start_angle + self.end_angle) / 2.0
    }
}

/// Partitions a full turn into `n` equal, contiguous arcs.
///
/// The last arc always ends exactly on `TAU` so the spans never drift short of a turn.
pub fn pie(n: usize) -> Vec<Arc> {
    if n == 0 {
        return Vec::new();
    }

    let step = TAU / n as f32;
    (0..n)
        .map(|index| Arc {
            index,
            start_angle: step * index as f32,
            end_angle: if index + 1 == n {
                TAU
            } else {
                step * (index + 1) as f32
            },
            pad_angle: 0.0,
        })
        .collect()
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ArcShape {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub pad_angle: f32,
    pub pad_radius: Option<f32>,
}

/// The angular extents of a padded ring sector, in screen-space radians (0 = 3 o'clock)
#[derive(Copy, Clone, Debug, PartialEq)]
struct Trimmed {
    outer: (f32, f32),
    inner: (f32, f32),
}

impl ArcShape {
    pub const fn new(inner_radius: f32, outer_radius: f32) -> Self {
        Self {
            inner_radius,
            outer_radius,
            pad_angle: 0.0,
            pad_radius: None,
        }
    }

    pub const fn pad_angle(self, pad_angle: f32) -> Self {
        Self { pad_angle, ..self }
    }

    pub const fn pad_radius(self, pad_radius: f32) -> Self {
        Self {
            pad_radius: Some(pad_radius),
            ..self
        }
    }

    fn effective_pad_radius(&self) -> f32 {
        self.pad_radius.unwrap_or_else(|| {
            (self.inner_radius.powi(2) + self.outer_radius.powi(2)).sqrt()
        })
    }

    fn trim_at(&self, radius: f32) -> f32 {
        let pad = self.pad_angle.max(0.0) / 2.0;
        if pad <= EPSILON || radius <= EPSILON {
            return 0.0;
        }
        let ratio = self.effective_pad_radius() / radius * pad.sin();
        ratio.clamp(-1.0, 1.0).asin()
    }

    fn trimmed(&self, arc: &Arc) -> Trimmed {
        let a0 = arc.start_angle - FRAC_PI_2;
        let a1 = arc.end_angle - FRAC_PI_2;
        let mid = (a0 + a1) / 2.0;
        let span = (a1 - a0).abs();
        let dir = if a1 >= a0 { 1.0 } else { -1.0 };

        let side = |trim: f32| {
            if span - trim * 2.0 > EPSILON {
                (a0 + trim * dir, a1 - trim * dir)
            } else {
                (mid, mid)
            }
        };

        Trimmed {
            outer: side(self.trim_at(self.outer_radius)),
            inner: side(self.trim_at(self.inner_radius)),
        }
    }

    /// The angular span left after padding is cut from both sides, measured at the outer radius
    pub fn padded_span(&self, arc: &Arc) -> f32 {
        let (start, end) = self.trimmed(arc).outer;
        (end - start).abs()
    }

    pub fn centroid(&self, arc: &Arc) -> Pos2 {
        let r = (self.inner_radius + self.outer_radius) / 2.0;
        let a = arc.mid_angle() - FRAC_PI_2;
        pos2(a.cos() * r, a.sin() * r)
    }

    /// SVG path data for the (padded) ring sector, centered on the origin
    pub fn path(&self, arc: &Arc) -> String {
        let Trimmed { outer, inner } = self.trimmed(arc);
        let (r0, r1) = (self.inner_radius, self.outer_radius);
        let large = |(a, b): (f32, f32)| u8::from((b - a).abs() > PI);

        let p01 = polar(r1, outer.0);
        let p11 = polar(r1, outer.1);
        let mut out = format!(
            "M{},{}A{r1},{r1},0,{},1,{},{}",
            p01.x,
            p01.y,
            large(outer),
            p11.x,
            p11.y
        );

        if r0 > EPSILON {
            let p10 = polar(r0, inner.1);
            let p00 = polar(r0, inner.0);
            out.push_str(&format!(
                "L{},{}A{r0},{r0},0,{},0,{},{}Z",
                p10.x,
                p10.y,
                large(inner),
                p00.x,
                p00.y
            ));
        } else {
            out.push_str("L0,0Z");
        }
        out
    }

    /// Closed outline: outer edge clockwise, then inner edge back
    pub fn outline(&self, arc: &Arc, steps: usize) -> Vec<Pos2> {
        let Trimmed { outer, inner } = self.trimmed(arc);
        let steps = steps.max(1);

        let outer_edge = (0..=steps).map(|i| polar(self.outer_radius, lerp(outer, i, steps)));
        let inner_edge = (0..=steps)
            .rev()
            .map(|i| polar(self.inner_radius, lerp(inner, i, steps)));

        outer_edge.chain(inner_edge).collect()
    }

    /// Pairs of `(outer, inner)` points along the sector, for building a triangle strip
    pub fn strip(&self, arc: &Arc, steps: usize) -> Vec<(Pos2, Pos2)> {
        let Trimmed { outer, inner } = self.trimmed(arc);
        let steps = steps.max(1);

        (0..=steps)
            .map(|i| {
                (
                    polar(self.outer_radius, lerp(outer, i, steps)),
                    polar(self.inner_radius, lerp(inner, i, steps)),
                )
            })
            .collect()
    }
}

fn lerp((start, end): (f32, f32), i: usize, steps: usize) -> f32 {
    start + (end - start) * (i as f32 / steps as f32)
}

fn polar(radius: f32, angle: f32) -> Pos2 {
    pos2(radius * angle.cos(), radius * angle.sin())
}
