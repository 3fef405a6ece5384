use eframe::egui;
use log::{error, info};

mod app;
mod backend;
mod ui;

use app::DeadlineApp;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();
    info!("Starting Deadline Tracker egui application");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 720.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("Deadline Tracker")
            .with_resizable(true),
        ..Default::default()
    };

    info!("Launching egui window");
    eframe::run_native(
        "Deadline Tracker",
        options,
        Box::new(|_cc| match DeadlineApp::new() {
            Ok(app) => {
                info!("Successfully initialized Deadline Tracker app");
                Ok(Box::new(app))
            }
            Err(e) => {
                error!("Failed to initialize app: {}", e);
                Err(format!("Failed to initialize app: {}", e).into())
            }
        }),
    )
}
