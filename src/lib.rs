#![cfg_attr(debug_assertions, allow(dead_code, unused_variables,))]

pub const SETTINGS_KEY: &str = "prizewheel_settings";

pub trait RequestPaint: Send + Sync {
    fn request_repaint(&self) {}
}

impl RequestPaint for egui::Context {
    fn request_repaint(&self) {
        Self::request_repaint(self)
    }
}

pub struct NoopRepaint;
impl RequestPaint for NoopRepaint {}

pub mod animation;
pub mod geometry;
pub mod palette;
pub mod spin;
pub mod wheel;

pub mod widgets;

mod config;
pub use config::WheelConfig;

pub mod logger;

mod app;
pub use app::{App, PersistState};
