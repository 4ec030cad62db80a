//! Service context - dependency container for services
//!
//! Holds the store, configuration, and the Raider.IO client shared by all
//! services.

use std::sync::Arc;

use roster_common::AppConfig;
use roster_store::RosterStore;

use super::raider_io::RaiderIoClient;

/// Service context containing all dependencies
///
/// Passed by reference to every service. It provides access to:
/// - The roster store (file-backed or embedded)
/// - Application configuration
/// - The Raider.IO HTTP client
#[derive(Clone)]
pub struct ServiceContext {
    config: Arc<AppConfig>,
    store: RosterStore,
    raider_io: RaiderIoClient,
}

impl ServiceContext {
    /// Create a new service context
    pub fn new(config: Arc<AppConfig>, store: RosterStore) -> Self {
        let raider_io = RaiderIoClient::new(config.raider_io.clone());
        Self {
            config,
            store,
            raider_io,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> &RosterStore {
        &self.store
    }

    pub fn raider_io(&self) -> &RaiderIoClient {
        &self.raider_io
    }
}
