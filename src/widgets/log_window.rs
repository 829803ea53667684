use std::collections::VecDeque;

use egui::{ScrollArea, Window};

use crate::logger::Record;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Level(log::Level),
}

impl Filter {
    fn accepts(&self, record: &Record) -> bool {
        match self {
            Self::All => true,
            Self::Level(level) => record.level <= *level,
        }
    }
}

/// Keeps the most recent log records around for the in-app log viewer
pub struct LogWindow {
    records: VecDeque<Record>,
    max: usize,
    filter: Filter,
}

impl Default for LogWindow {
    fn default() -> Self {
        Self::with_capacity(500)
    }
}

impl LogWindow {
    pub fn with_capacity(max: usize) -> Self {
        assert!(max != 0);
        Self {
            records: VecDeque::with_capacity(max),
            max,
            filter: Filter::default(),
        }
    }

    pub fn push(&mut self, record: Record) {
        while self.records.len() >= self.max {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    pub fn drain_from(&mut self, receiver: &flume::Receiver<Record>) {
        for record in receiver.try_iter() {
            self.push(record);
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn visible(&self) -> impl Iterator<Item = &Record> + '_ {
        self.records
            .iter()
            .filter(move |record| self.filter.accepts(record))
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn display(&mut self, open: &mut bool, ctx: &egui::Context) {
        Window::new("spin log")
            .default_height(200.0)
            .resizable(true)
            .collapsible(true)
            .open(open)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    for (repr, filter) in [
                        ("all", Filter::All),
                        ("debug", Filter::Level(log::Level::Debug)),
                        ("info", Filter::Level(log::Level::Info)),
                        ("warn", Filter::Level(log::Level::Warn)),
                        ("error", Filter::Level(log::Level::Error)),
                    ] {
                        ui.selectable_value(&mut self.filter, filter, repr);
                    }
                });

                ui.separator();
                ScrollArea::vertical()
                    .stick_to_bottom(true)
                    .auto_shrink([false, true])
                    .show(ui, |ui| {
                        for record in self.visible() {
                            record.display(ui);
                        }
                    });
            });
    }
}
