mod backend_bridge;
mod controller;
mod ui;

use anyhow::{anyhow, Result};
use browser_core::{config::prepare_countries_url, load_settings};
use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::{CountryBrowserApp, StartupConfig};

#[derive(Parser, Debug)]
#[command(about = "Browse countries fetched from a REST Countries endpoint")]
struct Args {
    /// Endpoint returning the JSON country array.
    #[arg(long)]
    countries_url: Option<String>,
    #[arg(long)]
    window_title: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings()?;
    if let Some(url) = args.countries_url {
        settings.countries_url = prepare_countries_url(&url)?;
    }
    if let Some(title) = args.window_title {
        settings.window_title = title;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_filter.as_str()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    tracing::info!(url = %settings.countries_url, "starting country browser");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    backend_bridge::runtime::launch(cmd_rx, ui_tx);

    let startup = StartupConfig {
        countries_url: settings.countries_url,
    };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(settings.window_title.as_str())
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };
    eframe::run_native(
        &settings.window_title,
        options,
        Box::new(|_cc| Ok(Box::new(CountryBrowserApp::bootstrap(cmd_tx, ui_rx, startup)))),
    )
    .map_err(|err| anyhow!("country browser window failed: {err}"))
}
