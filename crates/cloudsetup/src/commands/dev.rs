//! Development server command.

use anyhow::Result;
use cloudsetup_server::{DevServer, DevServerConfig};
use cloudsetup_static::SiteOrigin;

use crate::config::SiteConfig;

/// Run the dev server.
pub async fn run(file_config: &SiteConfig, origin: SiteOrigin, port: u16, open: bool) -> Result<()> {
    tracing::info!("Starting development server on port {}", port);

    let config = DevServerConfig {
        content_dir: file_config.content.dir.clone(),
        public_dir: file_config.public_dir(),
        port,
        open,
        site_name: file_config.site.name.clone(),
        ..DevServerConfig::new(origin)
    };

    DevServer::new(config).start().await?;

    Ok(())
}
