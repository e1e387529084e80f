use crate::commands::CommandRegistry;
use crate::config::Config;

/// Shared, read-only state behind every webhook request.
pub struct AppState {
    pub registry: CommandRegistry,
    pub config: Config,
}

impl AppState {
    pub fn new(registry: CommandRegistry, config: Config) -> Self {
        AppState { registry, config }
    }
}
