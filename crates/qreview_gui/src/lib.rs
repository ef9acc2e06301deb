//! Native desktop dashboard for reviewing questions served by the review API.

mod app;
pub mod backend;

use app::QReviewApp;
use eframe::egui;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("qreview=warn,qreview_gui=info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}

/// Launch the dashboard window.
///
/// # Returns
/// `Ok(())` when the window closes normally.
///
/// # Errors
/// Returns an [`eframe::Error`] if the app fails to initialize or render.
pub fn run() -> eframe::Result<()> {
    init_tracing();

    let app = QReviewApp::new().map_err(|err| eframe::Error::AppCreation(Box::new(err)))?;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(app::DEFAULT_WINDOW_SIZE)
            .with_min_inner_size(app::MIN_WINDOW_SIZE)
            .with_title("QReview"),
        ..Default::default()
    };

    eframe::run_native(
        "QReview",
        options,
        Box::new(|cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(app))
        }),
    )
}
