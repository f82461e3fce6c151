use std::sync::Arc;
use venue_core::conduction::ConductionClient;
use venue_core::config::Config;
use venue_core::vip::VipTable;

/// Shared application state passed to all route handlers.
///
/// Built once at startup; the VIP table is never mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    pub vip: Arc<VipTable>,
    pub tracker: ConductionClient,
}

impl AppState {
    pub fn new(config: &Config) -> venue_core::Result<Self> {
        config.ensure_valid()?;
        Ok(Self {
            vip: Arc::new(config.vip_table()),
            tracker: ConductionClient::new(&config.api)?,
        })
    }
}
