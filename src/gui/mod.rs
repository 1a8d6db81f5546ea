// src/gui/mod.rs
pub mod app;
pub mod components;

use eframe::NativeOptions;

pub fn run(options: NativeOptions) -> eframe::Result {
    eframe::run_native(
        "ani_scrape",
        options,
        Box::new(|cc| Ok(Box::new(app::App::new(cc)))),
    )
}
