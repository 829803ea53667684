use egui::{Color32, Label, RichText};
use log::Level;

/// Installs the in-app logger. Records from this crate show up on the returned receiver.
pub fn init_logger(max_level: log::LevelFilter) -> anyhow::Result<flume::Receiver<Record>> {
    let (sender, receiver) = flume::unbounded();
    log::set_boxed_logger(Box::new(Logger::new(sender)))
        .map_err(|err| anyhow::anyhow!("cannot install logger: {err}"))?;
    log::set_max_level(max_level);
    Ok(receiver)
}

#[derive(Debug)]
pub struct Record {
    pub timestamp: time::OffsetDateTime,
    pub start: time::OffsetDateTime,
    pub target: Box<str>,
    pub level: Level,
    pub data: Box<str>,
}

impl Record {
    pub const fn level(&self) -> &'static str {
        match self.level {
            Level::Error => "error",
            Level::Warn => "warn ",
            Level::Info => "info ",
            Level::Debug => "debug",
            Level::Trace => "trace",
        }
    }

    pub const fn level_color(&self) -> Color32 {
        match self.level {
            Level::Error => Color32::RED,
            Level::Warn => Color32::YELLOW,
            Level::Info => Color32::GREEN,
            Level::Debug => Color32::from_rgb(0x00, 0xFF, 0xFF),
            Level::Trace => Color32::from_rgb(0xFF, 0x00, 0xFF),
        }
    }

    /// Milliseconds since the logger was installed
    pub fn elapsed_ms(&self) -> i128 {
        (self.timestamp - self.start).whole_milliseconds()
    }

    pub fn display(&self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            ui.monospace(format!("{:>8}", self.elapsed_ms()));
            ui.add(Label::new(
                RichText::new(self.level())
                    .monospace()
                    .color(self.level_color()),
            ));
            ui.monospace(&*self.target);
            ui.add(Label::new(
                RichText::new(&*self.data)
                    .monospace()
                    .color(ui.style().visuals.strong_text_color()),
            ));
        });
    }
}

struct Logger {
    sender: flume::Sender<Record>,
    start: time::OffsetDateTime,
}

impl Logger {
    fn new(sender: flume::Sender<Record>) -> Self {
        Self {
            sender,
            start: now(),
        }
    }

    fn is_from_our_pkg(record: &log::Record<'_>) -> bool {
        record
            .module_path()
            .map(|module| module.split("::").next() == Some(env!("CARGO_PKG_NAME")))
            .unwrap_or(false)
    }
}

// local offsets aren't always available (e.g. multithreaded on unix)
fn now() -> time::OffsetDateTime {
    time::OffsetDateTime::now_local().unwrap_or_else(|_| time::OffsetDateTime::now_utc())
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) || !Self::is_from_our_pkg(record) {
            return;
        }

        let _ = self.sender.send(Record {
            timestamp: now(),
            start: self.start,
            target: Box::from(record.target()),
            level: record.level(),
            data: Box::from(&*record.args().to_string()),
        });
    }

    fn flush(&self) {}
}
