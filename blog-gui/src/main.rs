mod app;

use std::sync::Arc;
use std::time::Duration;

use blog_core::{AppConfig, ContentStore};
use eframe::{egui, NativeOptions};
use reqwest::{redirect, ClientBuilder};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;
use url::Url;

use crate::app::{AppInit, BlogApp};

fn main() -> eframe::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let runtime = Arc::new(Runtime::new().expect("failed to initialise Tokio runtime"));
    let client = ClientBuilder::new()
        .redirect(redirect::Policy::limited(5))
        .timeout(Duration::from_secs(config.source.request_timeout_seconds))
        .user_agent("ReadBlog/0.1")
        .build()
        .expect("failed to build HTTP client");

    let base_url = Url::parse(&config.source.base_url).expect("invalid source.base_url in config");
    let store = ContentStore::new(client, base_url, config.source.catalog_file.clone());

    let (update_tx, update_rx) = mpsc::channel(16);
    store.spawn_catalog_load(runtime.handle(), update_tx.clone());

    let window = [config.ui.window_width, config.ui.window_height];
    let init = AppInit {
        runtime,
        store,
        updates: update_rx,
        update_tx,
        config,
    };

    eframe::run_native(
        "ReadBlog",
        NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size(window)
                .with_min_inner_size([600.0, 500.0]),
            ..Default::default()
        },
        Box::new(move |cc| {
            install_emoji_friendly_fonts(&cc.egui_ctx);
            Box::new(BlogApp::new(init))
        }),
    )
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Registers system fonts with emoji coverage as fallbacks so icon-pass
/// output and Cyrillic titles render without tofu boxes.
fn install_emoji_friendly_fonts(ctx: &egui::Context) {
    let mut fonts = egui::FontDefinitions::default();

    let candidates = [
        "/usr/share/fonts/truetype/noto/NotoColorEmoji.ttf",
        "/usr/share/fonts/truetype/noto/NotoEmoji-Regular.ttf",
        "/usr/share/fonts/opentype/noto/NotoSansSymbols2-Regular.otf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    ];

    let mut added: Vec<String> = Vec::new();
    for path in candidates.iter() {
        if let Ok(bytes) = std::fs::read(path) {
            let name = format!("embedded-{}", added.len());
            fonts
                .font_data
                .insert(name.clone(), egui::FontData::from_owned(bytes));
            fonts
                .families
                .entry(egui::FontFamily::Proportional)
                .or_default()
                .push(name.clone());
            fonts
                .families
                .entry(egui::FontFamily::Monospace)
                .or_default()
                .push(name.clone());
            added.push(name);
        }
    }

    if !added.is_empty() {
        ctx.set_fonts(fonts);
    }
}
