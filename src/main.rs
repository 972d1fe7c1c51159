use anyhow::Context;
use freecam_viewer::{app::ViewerApp, config::ViewerConfig};

fn run() -> anyhow::Result<()> {
    let config = ViewerConfig::default();
    log::info!(
        "Starting '{}' with model {}",
        config.title,
        config.model_path.display()
    );

    let app = ViewerApp::new(config).context("failed to start the viewer")?;
    app.run().context("viewer stopped")
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        log::error!("{:#}", err);
        std::process::exit(1);
    }
}
