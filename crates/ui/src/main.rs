#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("minkowski")
            .with_inner_size([880.0, 720.0]),
        ..Default::default()
    };
    eframe::run_native(
        "minkowski",
        options,
        Box::new(|cc| Ok(Box::new(minkowski_ui::MinkowskiApp::new(cc)))),
    )
}

// The web build starts from `minkowski_ui::start`.
#[cfg(target_arch = "wasm32")]
fn main() {}
