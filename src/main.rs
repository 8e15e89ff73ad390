use anyhow::{Context, Result};
use eframe::egui;
use tracing::info;
use tracing_subscriber::EnvFilter;

use routine_editor::cli::Cli;
use routine_editor::theme;
use routine_editor::{FileStorage, KeyValueStore, MemoryStorage, RoutineApp, RoutineStore};

fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.default_log_level()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(&cli);

    let storage: Box<dyn KeyValueStore> = if cli.memory {
        info!("Keeping routines in memory only");
        Box::new(MemoryStorage::new())
    } else {
        let storage = FileStorage::open(&cli.data_dir)
            .with_context(|| format!("Failed to open data directory {:?}", cli.data_dir))?;
        info!(dir = %storage.dir().display(), "Using file storage");
        Box::new(storage)
    };
    let store = RoutineStore::open(storage);
    info!(routines = store.routines().len(), "Routines loaded");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([900.0, 640.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Routine Editor",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_style(theme::nord_dark());
            Ok(Box::new(RoutineApp::new(store)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Editor window failed: {}", e))
}
