mod app;
mod model;

use app::{configure_fonts, DeviceApp};
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pda_inbound_common=info,pda_inbound_desktop=info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([440.0, 900.0])
            .with_resizable(false),
        ..Default::default()
    };
    tracing::info!("starting device window");
    eframe::run_native(
        "PDA Inbound Device",
        options,
        Box::new(|cc| {
            configure_fonts(&cc.egui_ctx);
            Box::new(DeviceApp::default())
        }),
    )
}
