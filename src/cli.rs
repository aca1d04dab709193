use clap::Parser;

use crate::config::{AppConfig, StorageBackend};

/// Command-line flags for the server binary. Each one overrides the matching
/// environment variable.
#[derive(Debug, Parser)]
#[command(name = "catalog-api", version, about = "Category and product CRUD API")]
pub struct ServeArgs {
    #[arg(long, help = "Port to listen on (env: PORT, default 8080)")]
    pub port: Option<u16>,

    #[arg(long, help = "Interface to bind (env: HOST, default 0.0.0.0)")]
    pub host: Option<String>,

    #[arg(long, value_enum, help = "Storage backend (env: STORAGE_BACKEND)")]
    pub storage: Option<StorageBackend>,
}

impl ServeArgs {
    pub fn apply(self, mut config: AppConfig) -> AppConfig {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(storage) = self.storage {
            config.server.storage = storage;
        }
        config
    }
}
