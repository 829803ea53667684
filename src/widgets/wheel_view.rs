use egui::{
    emath::Rot2, epaint::Mesh, vec2, Align2, Color32, FontId, Painter, Pos2, Shape, Vec2,
};

use crate::wheel::{self, Slice, Wheel};

pub const FONT_SIZE: f32 = 26.0;
const MIN_FONT_SIZE: f32 = 10.0;

/// How far labels sit outward from the centroid, as a fraction of the outer radius
const LABEL_PUSH: f32 = 0.3;

const ARC_STEPS: usize = 24;

/// Maps wheel-space points onto the screen.
///
/// Slices are laid out counter-clockwise, then the whole wheel is turned clockwise by the
/// rotation plus half a segment. A clockwise spin of `n * width` degrees leaves slice `n`
/// under the pointer.
#[derive(Copy, Clone, Debug)]
pub struct WheelTransform {
    pub center: Pos2,
    pub scale: f32,
    rot: Rot2,
}

impl WheelTransform {
    pub fn new(center: Pos2, scale: f32, angle: f32, segments: usize) -> Self {
        let offset = if segments == 0 {
            0.0
        } else {
            wheel::angle_offset(segments)
        };
        Self {
            center,
            scale,
            rot: Rot2::from_angle((angle + offset).to_radians()),
        }
    }

    pub fn apply(&self, pos: Pos2) -> Pos2 {
        let mirrored = vec2(-pos.x, pos.y);
        self.center + self.rot * mirrored * self.scale
    }
}

/// Text shown on a slice
pub fn label_for(slice: &Slice) -> String {
    slice.value.to_string()
}

pub struct WheelView<'a> {
    wheel: &'a Wheel,
    angle: f32,
}

impl<'a> WheelView<'a> {
    pub const fn new(wheel: &'a Wheel, angle: f32) -> Self {
        Self { wheel, angle }
    }

    /// Labels ride along the slice bisector but are drawn upright; egui text can't be rotated.
    pub fn paint(&self, painter: &Painter, center: Pos2, radius: f32) {
        if self.wheel.is_empty() || radius <= 0.0 {
            return;
        }

        let scale = radius / self.wheel.spec().radius;
        let transform = WheelTransform::new(center, scale, self.angle, self.wheel.len());

        painter.add(Shape::mesh(self.mesh(&transform)));

        let font_id = FontId::proportional((FONT_SIZE * scale).max(MIN_FONT_SIZE));
        for slice in self.wheel.slices() {
            painter.text(
                self.label_pos(slice, &transform),
                Align2::CENTER_CENTER,
                label_for(slice),
                font_id.clone(),
                Color32::WHITE,
            );
        }
    }

    fn mesh(&self, transform: &WheelTransform) -> Mesh {
        let shape = self.wheel.shape();
        let mut mesh = Mesh::default();

        for slice in self.wheel.slices() {
            let color = Color32::from(slice.color);
            let strip = shape.strip(&slice.arc, ARC_STEPS);

            let base = mesh.vertices.len() as u32;
            for (outer, inner) in &strip {
                mesh.colored_vertex(transform.apply(*outer), color);
                mesh.colored_vertex(transform.apply(*inner), color);
            }

            for i in 0..(strip.len() as u32).saturating_sub(1) {
                let (o0, i0) = (base + i * 2, base + i * 2 + 1);
                let (o1, i1) = (o0 + 2, i0 + 2);
                mesh.add_triangle(o0, o1, i0);
                mesh.add_triangle(i0, o1, i1);
            }
        }

        mesh
    }

    fn label_pos(&self, slice: &Slice, transform: &WheelTransform) -> Pos2 {
        let centroid = slice.centroid.to_vec2();
        let push = if centroid == Vec2::ZERO {
            Vec2::ZERO
        } else {
            centroid.normalized() * self.wheel.spec().radius * LABEL_PUSH
        };
        transform.apply((centroid + push).to_pos2())
    }
}
