use anyhow::Result;
use poh_storage::{
    catalog::StorageCatalog,
    config::{ConfigLoader, ConfigOrigin},
    handlers::{RenderUpdate, StorageEventHandler, TrackedIds},
    host::{LayoutHost, ScriptCommand, ScriptedHost},
    logging::init_logger,
    state::SessionStore,
    types::Status,
    view::IconCache,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    let config_loader = ConfigLoader::new();
    let (config, origin) = config_loader.load()?;

    init_logger(&config.logging)?;
    info!("Starting POH Storage v{}", VERSION);
    match origin {
        ConfigOrigin::Created => {
            info!("Config file not found, created default config at {:?}", config_loader.path())
        }
        ConfigOrigin::Existing => info!("Loaded configuration from {:?}", config_loader.path()),
    }

    let catalog = Arc::new(StorageCatalog::load_path_or_bundled(config.catalog_path.as_deref()));
    if catalog.is_empty() {
        warn!("Storage catalog is empty, every item will show as unknown");
    }

    let mut host = ScriptedHost::new();
    let widget_children = config.storage_widget_children();
    info!(
        "Reading housing storage from widget group {} ({} categories mapped)",
        config.storage_widget_group,
        widget_children.len()
    );
    let mut icons = IconCache::new(config.icon_size);
    icons.preload(&catalog, &host);

    let mut handler = StorageEventHandler::new(
        Arc::clone(&catalog),
        SessionStore::new(),
        TrackedIds::from(&config),
    );
    render(&handler.start_up(&host), &icons);

    // Replay script lines from stdin, one JSON command per line
    let (tx, mut rx) = mpsc::unbounded_channel::<ScriptCommand>();
    tokio::spawn(async move {
        use tokio::io::{stdin, AsyncBufReadExt, BufReader};

        let mut lines = BufReader::new(stdin()).lines();
        let mut line_number = 0usize;

        while let Ok(Some(line)) = lines.next_line().await {
            line_number += 1;
            let input = line.trim();
            if input.is_empty() || input.starts_with('#') {
                continue;
            }

            match serde_json::from_str::<ScriptCommand>(input) {
                Ok(command) => {
                    if tx.send(command).is_err() {
                        break;
                    }
                }
                Err(e) => warn!("Skipping script line {}: {}", line_number, e),
            }
        }
    });

    info!("Reading replay commands from stdin");

    while let Some(command) = rx.recv().await {
        if let Some(event) = host.apply(command) {
            debug!("Dispatching {:?}", event);
            let client = LayoutHost::from_config(&host, &config, &widget_children);
            let update = handler.handle(&event, &client);
            render(&update, &icons);
        }
    }

    render(&handler.shut_down(), &icons);
    Ok(())
}

fn render<I>(update: &RenderUpdate, icons: &IconCache<I>)
where
    I: Clone + std::fmt::Debug,
{
    if let Some(overlay) = &update.overlay {
        if overlay.is_visible() {
            info!("Rendering overlay with {} lines", overlay.lines().len());
            for line in overlay.lines() {
                info!("  {} | {}", line.left, line.right);
            }
        } else {
            info!("Overlay hidden");
        }
    }

    if let Some(tree) = &update.panel {
        info!(
            "Panel: {} stored, {} missing, {} unknown",
            tree.count(Status::Stored),
            tree.count(Status::Missing),
            tree.count(Status::Unknown)
        );
        for node in tree.nodes() {
            debug!(
                "{}{} {:?} icon={:?}",
                "  ".repeat(node.depth()),
                node.text(),
                node.color(),
                icons.icon_for(&node)
            );
        }
    }
}
