//! Server command implementation

use std::path::Path;

use anyhow::Result;
use kosh_core::Config;
use kosh_server::ServerConfig;

use super::open_db;

pub async fn cmd_serve(
    db_path: &Path,
    config: &Config,
    host: &str,
    port: u16,
    no_encrypt: bool,
) -> Result<()> {
    let server_config = ServerConfig::from(config);

    println!("🚀 Starting Kosh web server...");
    println!("   Database: {}", db_path.display());
    println!("   Listening: http://{}:{}/api", host, port);
    println!(
        "   🔑 Sessions: bearer tokens, valid {}h",
        server_config.session_ttl.num_hours()
    );
    if server_config.allowed_origins.is_empty() {
        println!("   🌐 CORS: same-origin only");
    } else {
        println!(
            "   🌐 CORS origins: {}",
            server_config.allowed_origins.join(", ")
        );
    }
    if no_encrypt {
        println!("   ⚠️  Encryption DISABLED (--no-encrypt)");
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let db = open_db(db_path, no_encrypt)?;
    kosh_server::serve(db, host, port, server_config).await?;

    Ok(())
}
