#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use flipbook::prelude::*;

fn main() {
    env_logger::Builder::from_default_env()
        .format_timestamp_secs()
        .init();

    log::info!("Initialising...");

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            log::error!("Failed to start async runtime: {}", e);
            std::process::exit(1);
        }
    };
    let _guard = runtime.enter();

    let config = FlipbookConfig::load_or_default(Path::new(CONFIG_FILE)).unwrap_or_else(|e| {
        warn!("Ignoring {}: {}", CONFIG_FILE, e);
        FlipbookConfig::default()
    });
    let location = std::env::args()
        .nth(1)
        .or_else(|| config.source.location.clone())
        .unwrap_or_else(|| DEFAULT_LOCATION.to_string());

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([WIN_WIDTH, WIN_HEIGHT]),
        ..Default::default()
    };

    let handle = runtime.handle().clone();
    if let Err(e) = eframe::run_native(
        NAME,
        native_options,
        Box::new(move |cc| Ok(Box::new(FlipbookApp::new(cc, handle, config, location)))),
    ) {
        log::error!("Viewer exited with an error: {}", e);
    }
}
