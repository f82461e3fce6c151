use anyhow::Context;
use std::path::Path;
use venue_core::config::Config;
use venue_server::AppState;

pub fn run(root: &Path, port: u16) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    for w in config.validate() {
        tracing::warn!("config: {}", w.message);
    }
    let state = AppState::new(&config)?;
    if state.vip.is_empty() {
        tracing::warn!("no VIP lists configured; every check-in keeps its requested status");
    }

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(venue_server::serve(state, port))
}
