use eframe::NativeOptions;

use prizewheel::{logger, App, PersistState, WheelConfig};

fn main() -> anyhow::Result<()> {
    simple_env_load::load_env_from([".dev.env"]);

    let records = logger::init_logger(log::LevelFilter::Debug)?;

    let config = WheelConfig::load_from_env().map_err(|err| {
        log::error!("invalid configuration: {err:#}");
        err
    })?;

    let options = NativeOptions {
        initial_window_size: Some(egui::vec2(420.0, 720.0)),
        ..Default::default()
    };

    eframe::run_native(
        "Prize Wheel",
        options,
        Box::new(move |cc| {
            let persist = PersistState::load(cc.storage);
            Box::new(App::new(cc.egui_ctx.clone(), &config, records, persist))
        }),
    );

    Ok(())
}
