//! CLI entry point for notizen

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use notizen::query::{ListParams, ListQuery};
use notizen::Blog;

#[derive(Parser)]
#[command(name = "notizen")]
#[command(version)]
#[command(about = "Markdown blog posts as structured, queryable data", long_about = None)]
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
    /// List posts, newest first
    #[command(alias = "ls")]
    List {
        /// Only posts in this category ("all" for every category)
        #[arg(long)]
        category: Option<String>,

        /// Only posts with this tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Case-insensitive text search
        #[arg(short, long)]
        search: Option<String>,

        /// Only featured posts
        #[arg(short, long)]
        featured: bool,

        /// Maximum number of posts; ignored unless a positive integer
        #[arg(short, long)]
        limit: Option<String>,
    },

    /// Show a single post and its related posts
    Show {
        /// Post slug
        slug: String,

        /// Also print the rendered HTML
        #[arg(long)]
        html: bool,
    },

    /// List distinct categories
    Categories,

    /// List distinct tags
    Tags,

    /// Serve posts as a JSON API
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to
        #[arg(short, long)]
        ip: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "notizen=debug,info"
    } else {
        "notizen=info"
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
        None => std::env::current_dir().context("Cannot determine current directory")?,
    };

    let blog = Blog::new(&base_dir)?;
    tracing::debug!("Blog root {:?}, content in {:?}", base_dir, blog.config.content_dir);

    match cli.command {
        Commands::List {
            category,
            tag,
            search,
            featured,
            limit,
        } => {
            let params = ListParams {
                category,
                tag,
                search,
                featured: featured.then(|| "true".to_string()),
                limit,
            };
            notizen::commands::list::run(&blog, &ListQuery::from_params(&params))?;
        }

        Commands::Show { slug, html } => {
            notizen::commands::show::run(&blog, &slug, html)?;
        }

        Commands::Categories => {
            notizen::commands::list::run_taxonomy(&blog, "categories")?;
        }

        Commands::Tags => {
            notizen::commands::list::run_taxonomy(&blog, "tags")?;
        }

        Commands::Serve { port, ip } => {
            let ip = ip.unwrap_or_else(|| blog.config.server.ip.clone());
            let port = port.unwrap_or(blog.config.server.port);
            notizen::server::start(blog, &ip, port).await?;
        }
    }

    Ok(())
}
