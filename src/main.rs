#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
// Entry point kept minimal: window config and app launch. Everything else
// lives in the app module.

use eframe::egui;

mod api;
mod app;
mod localization;
mod logger;
mod types;
mod ui_constants;
mod views;

fn main() -> eframe::Result<()> {
    // In-app GUI logger (optionally mirrors to stderr)
    logger::init();
    app::settings::load_settings_from_disk();
    // Localization from saved preference or system locale
    let preferred = app::settings::with_settings(|s| s.language);
    if let Err(e) = localization::initialize_localization(preferred) {
        log::error!("Localization initialization failed: {e}");
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1080.0, 720.0])
            .with_resizable(true),
        ..Default::default()
    };

    let res = eframe::run_native(
        localization::translate("app-window-title").as_str(),
        native_options,
        Box::new(|_cc| Box::new(app::ShelfApp::default())),
    );
    if let Err(ref e) = res {
        log::error!("eframe::run_native failed: {e}");
    }
    res
}
