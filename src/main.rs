//! scan-config: resolve and persist the map-scan server startup configuration

use anyhow::Result;

fn main() -> Result<()> {
    scan_config::cli::run()
}
