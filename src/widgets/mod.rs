mod wheel_view;
pub use wheel_view::{label_for, WheelTransform, WheelView, FONT_SIZE};

pub mod knob;
pub use knob::Knob;

mod screen;
pub use screen::{
    tangential_velocity, ScreenResponse, ScreenState, WheelScreen, SPIN_BUTTON_TEXT, WHEEL_RADIUS,
};

mod log_window;
pub use log_window::{Filter, LogWindow};
