//! CLI entry point for folio

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio::config::StoreBackend;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "A markdown-backed blog with a contact endpoint", long_about = None)]
struct Cli {
    /// Set the site directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new post
    New {
        /// Title of the new post
        title: String,
    },

    /// Render all pages into the public directory
    #[command(alias = "g")]
    Build,

    /// Build, then serve the site and the contact endpoint
    #[command(alias = "s")]
    Serve {
        /// Port to listen on (defaults to server.port)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (defaults to server.ip)
        #[arg(short, long)]
        ip: Option<String>,

        /// Rebuild and reload the browser when posts or assets change
        #[arg(short, long)]
        watch: bool,

        /// Keep contact messages in memory instead of the configured store
        #[arg(long)]
        ephemeral: bool,
    },

    /// Delete the public directory
    Clean,

    /// List posts in display order
    List {
        /// What to list (posts, featured)
        #[arg(default_value = "posts")]
        r#type: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio=debug,info"
    } else {
        "folio=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    if dotenvy::from_path(base_dir.join(".env")).is_ok() {
        tracing::debug!("Loaded environment from {:?}", base_dir.join(".env"));
    }

    match cli.command {
        Commands::New { title } => {
            let folio = folio::Folio::new(&base_dir)?;
            tracing::info!("Creating new post with title: {}", title);
            folio.new_post(&title)?;
        }

        Commands::Build => {
            let folio = folio::Folio::new(&base_dir)?;
            tracing::info!("Generating static files...");
            folio.generate()?;
            println!("Generated successfully!");
        }

        Commands::Serve {
            port,
            ip,
            watch,
            ephemeral,
        } => {
            let mut folio = folio::Folio::new(&base_dir)?;
            if ephemeral {
                folio.config.contact.backend = StoreBackend::Memory;
            }
            let ip = ip.unwrap_or_else(|| folio.config.server.ip.clone());
            let port = port.unwrap_or(folio.config.server.port);

            // Generate first
            tracing::info!("Generating static files...");
            folio.generate()?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            folio::server::start(&folio, &ip, port, watch).await?;
        }

        Commands::Clean => {
            let folio = folio::Folio::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            folio.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let folio = folio::Folio::new(&base_dir)?;
            folio::commands::list::run(&folio, &r#type)?;
        }

        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
