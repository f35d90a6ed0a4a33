use std::sync::Arc;

use ad_service::ads::{AdCatalog, AdSelector};
use ad_service::config::ServerConfig;
use ad_service::logging::init_logger;
use ad_service::server::AdServer;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_logger();

    let config = match ServerConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("configuration error: {e}");
            std::process::exit(1);
        }
    };

    let catalog = match &config.catalog_path {
        Some(path) => match AdCatalog::load(path) {
            Ok(c) => {
                info!(path = %path.display(), ads = c.len(), "loaded ad catalog");
                c
            }
            Err(e) => {
                error!(path = %path.display(), "cannot load ad catalog: {e}");
                std::process::exit(1);
            }
        },
        None => AdCatalog::builtin(),
    };

    let selector = AdSelector::new(Arc::new(catalog), config.policy);
    let mut server = AdServer::new(selector);
    if let Err(e) = server.run().await {
        error!("fatal error: {e}");
        std::process::exit(1);
    }
}
