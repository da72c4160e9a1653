pub mod api;
pub mod app;
pub mod models;

use eframe::{self, egui};

pub use app::TextileStudioApp;

/// Launches the egui application with default window options.
pub fn run_frontend() -> Result<(), eframe::Error> {
    run_frontend_with_options(default_native_options())
}

/// Launches the egui app with caller-provided options.
pub fn run_frontend_with_options(options: eframe::NativeOptions) -> Result<(), eframe::Error> {
    let _ = env_logger::builder().is_test(false).try_init();
    eframe::run_native(
        "Textile Design Studio",
        options,
        Box::new(|cc| Ok(Box::new(TextileStudioApp::new(cc)))),
    )
}

fn default_native_options() -> eframe::NativeOptions {
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    }
}
