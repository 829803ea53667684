use egui::{CentralPanel, Key};

use crate::{
    logger::Record,
    spin::SpinInput,
    widgets::{LogWindow, ScreenState, WheelScreen},
    WheelConfig, SETTINGS_KEY,
};

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PersistState {
    pub pixels_per_point: f32,
    pub show_logs: bool,
}

impl Default for PersistState {
    fn default() -> Self {
        Self {
            pixels_per_point: 1.0,
            show_logs: false,
        }
    }
}

impl PersistState {
    pub fn load(storage: Option<&dyn eframe::Storage>) -> Self {
        let json = match storage.and_then(|storage| storage.get_string(SETTINGS_KEY)) {
            Some(json) => json,
            None => return Self::default(),
        };

        match serde_json::from_str(&json) {
            Ok(state) => state,
            Err(err) => {
                log::warn!("ignoring saved settings: {err}");
                Self::default()
            }
        }
    }
}

pub struct App {
    context: egui::Context,
    screen: ScreenState,
    logs: LogWindow,
    records: flume::Receiver<Record>,
    persist: PersistState,
}

impl App {
    pub fn new(
        context: egui::Context,
        config: &WheelConfig,
        records: flume::Receiver<Record>,
        persist: PersistState,
    ) -> Self {
        if persist.pixels_per_point > 0.0 {
            context.set_pixels_per_point(persist.pixels_per_point);
        }
        log::info!("starting with {config:?}");

        Self {
            context,
            screen: ScreenState::new(config),
            logs: LogWindow::default(),
            records,
            persist,
        }
    }

    fn try_handle_key_press(&mut self) {
        let (debug, logs, spin) = {
            let input = self.context.input();
            (
                input.key_pressed(Key::F12),
                input.key_pressed(Key::F2),
                input.key_pressed(Key::Space),
            )
        };

        if debug {
            self.context
                .set_debug_on_hover(!self.context.debug_on_hover());
        }

        if logs {
            self.persist.show_logs = !self.persist.show_logs;
        }

        if spin {
            log::debug!("space pressed");
            self.screen.spin(SpinInput::Button);
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        self.logs.drain_from(&self.records);
        self.try_handle_key_press();

        CentralPanel::default().show(ctx, |ui| {
            WheelScreen::new(&mut self.screen).display(ui);
        });

        if self.persist.show_logs {
            self.logs.display(&mut self.persist.show_logs, ctx);
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.persist.pixels_per_point = self.context.pixels_per_point();
        match serde_json::to_string(&self.persist) {
            Ok(json) => storage.set_string(SETTINGS_KEY, json),
            Err(err) => log::error!("cannot save settings: {err}"),
        }
    }

    fn persist_native_window(&self) -> bool {
        true
    }
}
