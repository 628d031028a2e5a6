//! cloudsetup CLI - bilingual cloud API setup guide site generator.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use cloudsetup_static::SiteOrigin;

mod commands;
mod config;

use config::SiteConfig;

#[derive(Parser)]
#[command(name = "cloudsetup")]
#[command(about = "Build and preview step-by-step cloud API setup guides")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to site.toml config file
    #[arg(short, long, default_value = "site.toml", global = true)]
    config: PathBuf,

    /// Canonical site origin used in SEO links and the sitemap
    #[arg(long, env = "SITE_URL", global = true)]
    site_url: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold site.toml and a sample guide
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Start development server with live reload
    Dev {
        /// Port to listen on
        #[arg(short, long, default_value = "7777")]
        port: u16,

        /// Do not open browser
        #[arg(long)]
        no_open: bool,
    },

    /// Build the static site
    Build {
        /// Output directory (defaults to config or "dist")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip minification
        #[arg(long)]
        no_minify: bool,

        /// Skip malformed guides with a warning instead of failing
        #[arg(long)]
        lenient: bool,
    },

    /// Preview the built site
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// Directory to serve
        #[arg(short, long, default_value = "dist")]
        dir: PathBuf,
    },

    /// Validate every guide and report malformed content
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes).await?;
        }
        Commands::Dev { port, no_open } => {
            let config = SiteConfig::load(&cli.config)?;
            let origin = site_origin(cli.site_url.as_deref())?;
            commands::dev::run(&config, origin, port, !no_open).await?;
        }
        Commands::Build {
            output,
            no_minify,
            lenient,
        } => {
            let config = SiteConfig::load(&cli.config)?;
            let origin = site_origin(cli.site_url.as_deref())?;
            let options = commands::build::BuildOptions {
                output,
                minify: if no_minify { Some(false) } else { None },
                strict: if lenient { Some(false) } else { None },
            };
            commands::build::run(&config, origin, options).await?;
        }
        Commands::Serve { port, dir } => {
            commands::serve::run(port, dir).await?;
        }
        Commands::Check => {
            let config = SiteConfig::load(&cli.config)?;
            commands::check::run(&config)?;
        }
    }

    Ok(())
}

/// Validate the site origin before any work starts.
fn site_origin(value: Option<&str>) -> Result<SiteOrigin> {
    SiteOrigin::from_value(value).context("SITE_URL is required to build absolute links")
}
