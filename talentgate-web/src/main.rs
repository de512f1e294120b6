//! Talentgate Auth Service
//!
//! Issues and verifies platform identity tokens and owns company membership.

use clap::Parser;
use talentgate_core::init_logging;
use talentgate_web::{ServerBuilder, WebConfig};

/// Talentgate auth service - identity tokens and company membership
#[derive(Parser)]
#[command(name = "talentgate-web")]
#[command(about = "The Talentgate authentication service")]
#[command(version)]
struct Args {
    /// Server host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Server port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable development mode (uses the built-in dev signing secret)
    #[arg(long)]
    dev: bool,

    /// Database URL
    #[arg(long)]
    database_url: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging(&format!(
        "talentgate_web={},tower_http=debug",
        args.log_level
    ));

    // Load environment variables
    dotenvy::dotenv().ok();

    // Development mode works without a configured secret; production
    // requires TALENTGATE_JWT_SECRET and fails fatally without it
    let mut config = if args.dev {
        WebConfig::from_env().unwrap_or_default()
    } else {
        WebConfig::from_env().map_err(|e| anyhow::anyhow!("{}", e))?
    };

    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(database_url) = args.database_url {
        config.database_url = database_url;
    }
    config.dev_mode = args.dev;

    println!("🚀 Starting Talentgate auth service");
    println!("📍 Server: http://{}", config.address());
    println!("🗄️  Database: {}", config.database_url);
    println!("🔧 Development mode: {}", config.dev_mode);

    let server = ServerBuilder::with_config(config).build().await?;
    server.start().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_parsing() {
        let args = Args::parse_from(["talentgate-web"]);
        assert!(args.host.is_none());
        assert!(args.port.is_none());
        assert!(!args.dev);

        let args = Args::parse_from([
            "talentgate-web",
            "--host",
            "0.0.0.0",
            "--port",
            "3000",
            "--dev",
        ]);
        assert_eq!(args.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(args.port, Some(3000));
        assert!(args.dev);
    }
}
