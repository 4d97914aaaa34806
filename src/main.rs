//! CLI entry point for inkpress

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "inkpress")]
#[command(version)]
#[command(about = "A content pipeline for markdown blogs", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
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
    /// Build the page manifest and hand-off artifacts
    #[command(alias = "b")]
    Build,

    /// Validate content and report diagnostics without writing output
    Check,

    /// List site content
    List {
        /// Type of content to list (post, draft, project, book)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Path for the new post, relative to the content root
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Clean the output directory
    Clean,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "inkpress=debug,info"
    } else {
        "inkpress=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(cwd) => cwd,
        None => std::env::current_dir()?,
    };

    let site = inkpress::Site::new(&base_dir)?;

    match cli.command {
        Commands::Build => {
            tracing::info!("Building manifest...");
            inkpress::commands::build::run(&site)?;
            println!("Built successfully!");
        }

        Commands::Check => {
            inkpress::commands::check::run(&site)?;
        }

        Commands::List { r#type } => {
            inkpress::commands::list::run(&site, &r#type)?;
        }

        Commands::New { title, path } => {
            tracing::info!("Creating new post: {}", title);
            inkpress::commands::new::run(&site, &title, path.as_deref())?;
        }

        Commands::Clean => {
            inkpress::commands::clean::run(&site)?;
            println!("Cleaned successfully!");
        }
    }

    Ok(())
}
