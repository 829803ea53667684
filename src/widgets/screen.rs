use std::time::Duration;

use egui::{vec2, Align2, Area, Button, Color32, Pos2, Response, RichText, Sense, Vec2};

use crate::{
    config::WheelConfig,
    spin::{Settled, SpinController, SpinInput},
    wheel::{Wheel, WheelSpec},
    RequestPaint,
};

use super::{
    knob::{Knob, KNOB_SIZE},
    WheelView,
};

/// Radius the wheel geometry is built at; it's scaled to fit when painted
pub const WHEEL_RADIUS: f32 = 200.0;

pub const SPIN_BUTTON_TEXT: &str = "Spin that wheel!!!";
const SPIN_BUTTON_SIZE: Vec2 = vec2(150.0, 50.0);
const WINNER_FONT_SIZE: f32 = 32.0;

/// Long frames (e.g. the window being dragged) shouldn't fling the animation forward
const MAX_FRAME: Duration = Duration::from_millis(100);

pub struct ScreenState {
    pub wheel: Wheel,
    pub spin: SpinController,
    pub wheel_scale: f32,
}

impl ScreenState {
    pub fn new(config: &WheelConfig) -> Self {
        let mut rng = config.rng();
        let wheel = Wheel::build(&mut rng, WheelSpec::new(config.segments, WHEEL_RADIUS));
        log::debug!(
            "built wheel: {}",
            wheel
                .slices()
                .iter()
                .map(|slice| format!("{}={}", slice.color, slice.value))
                .collect::<Vec<_>>()
                .join(", ")
        );

        Self {
            wheel,
            spin: SpinController::default().with_velocity_mode(config.velocity_mode),
            wheel_scale: config.wheel_scale,
        }
    }

    pub fn spin(&mut self, input: SpinInput) {
        self.spin.start_spin(input);
    }

    /// Advances the spin by one frame, asking for another frame while it's still moving
    pub fn tick(&mut self, dt: Duration, repaint: &impl RequestPaint) -> Option<Settled> {
        let settled = self.spin.update(dt.min(MAX_FRAME), &self.wheel);
        if !self.spin.is_idle() {
            repaint.request_repaint();
        }
        settled
    }

    pub fn winner_text(&self) -> Option<String> {
        self.spin
            .state()
            .winner()
            .map(|Settled { value, .. }| format!("Winner is: {value}"))
    }
}

/// Signed speed around `center`, positive when clockwise on screen
pub fn tangential_velocity(center: Pos2, pointer: Pos2, velocity: Vec2) -> f32 {
    let r = pointer - center;
    let len = r.length();
    if len <= f32::EPSILON {
        return velocity.y;
    }
    (r.x * velocity.y - r.y * velocity.x) / len
}

/// What a frame of the screen put on screen
pub struct ScreenResponse {
    pub wheel: Response,
    pub button: Response,
    /// Only present once a spin has settled
    pub winner: Option<Response>,
}

pub struct WheelScreen<'a> {
    state: &'a mut ScreenState,
}

impl<'a> WheelScreen<'a> {
    pub fn new(state: &'a mut ScreenState) -> Self {
        Self { state }
    }

    pub fn display(mut self, ui: &mut egui::Ui) -> ScreenResponse {
        let dt = Duration::from_secs_f32(ui.input().stable_dt.max(0.0));
        if let Some(settled) = self.state.tick(dt, ui.ctx()) {
            log::debug!("showing winner {settled:?}");
        }

        let (wheel, button) = ui
            .vertical_centered(|ui| {
                let reserved =
                    SPIN_BUTTON_SIZE.y + ui.spacing().item_spacing.y * 4.0 + KNOB_SIZE.y;
                let available = ui.available_width().min(ui.available_height() - reserved);
                let size = (available * self.state.wheel_scale).max(0.0);

                ui.add_space(KNOB_SIZE.y / 2.0);
                let wheel = self.display_wheel(ui, size);
                ui.add_space(ui.spacing().item_spacing.y);

                let button = ui.add_sized(
                    SPIN_BUTTON_SIZE,
                    Button::new(RichText::new(SPIN_BUTTON_TEXT).color(Color32::WHITE))
                        .fill(Color32::RED),
                );
                if button.clicked() {
                    log::debug!("spin button pressed");
                    self.state.spin(SpinInput::Button);
                }
                (wheel, button)
            })
            .inner;

        let winner = self.state.winner_text().map(|text| {
            Area::new("winner")
                .anchor(Align2::CENTER_BOTTOM, vec2(0.0, -10.0))
                .movable(false)
                .interactable(false)
                .show(ui.ctx(), |ui| {
                    ui.label(RichText::new(text).size(WINNER_FONT_SIZE).strong());
                })
                .response
        });

        ScreenResponse {
            wheel,
            button,
            winner,
        }
    }

    fn display_wheel(&mut self, ui: &mut egui::Ui, size: f32) -> Response {
        let idle = self.state.spin.is_idle();
        // gestures are ignored mid-spin
        let sense = if idle { Sense::drag() } else { Sense::hover() };
        let (rect, resp) = ui.allocate_exact_size(Vec2::splat(size), sense);

        if resp.drag_started() {
            log::debug!("drag started at {:?}", resp.interact_pointer_pos());
        }

        if idle && resp.drag_released() {
            let (pointer, velocity) = {
                let input = ui.input();
                (input.pointer.interact_pos(), input.pointer.velocity())
            };
            let velocity = match pointer {
                Some(pointer) => tangential_velocity(rect.center(), pointer, velocity),
                None => velocity.y,
            };
            log::debug!("drag released, velocity {velocity:.1}");
            self.state.spin(SpinInput::Gesture { velocity });
        }

        if !ui.is_rect_visible(rect) {
            return resp;
        }

        let painter = ui.painter_at(rect.expand(KNOB_SIZE.y));
        let angle = self.state.spin.angle();
        let radius = size / 2.0;

        WheelView::new(&self.state.wheel, angle).paint(&painter, rect.center(), radius);

        let tip = rect.center_top() + vec2(0.0, KNOB_SIZE.y * 0.3);
        Knob::new(angle, self.state.wheel.len()).paint(&painter, tip, KNOB_SIZE);
        resp
    }
}
