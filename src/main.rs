//! CLI entry point for blog-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "blog-rs")]
#[command(version)]
#[command(about = "A markdown personal blog engine with a JSON data pipeline", long_about = None)]
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
    /// Initialize a new blog
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,
    },

    /// Compile markdown posts into JSON data artifacts
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Start the blog server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Regenerate data artifacts when posts change
        #[arg(short, long)]
        watch: bool,
    },

    /// Delete the generated data directory
    Clean,

    /// List site content
    List {
        /// Type of content to list (post, tag, category)
        #[arg(default_value = "post")]
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
        "blog_rs=debug,info"
    } else {
        "blog_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = cli.cwd.unwrap_or_else(|| std::env::current_dir().unwrap());

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing blog in {:?}", target_dir);
            blog_rs::commands::init::init_site(&target_dir)?;
            println!("Initialized empty blog in {:?}", target_dir);
        }

        Commands::New { title } => {
            let blog = blog_rs::Blog::new(&base_dir)?;
            tracing::info!("Creating new post with title: {}", title);
            blog_rs::commands::new::run(&blog, &title)?;
        }

        Commands::Generate { watch } => {
            let blog = blog_rs::Blog::new(&base_dir)?;
            tracing::info!("Generating data artifacts...");

            blog_rs::commands::generate::run(&blog)?;
            println!("Generated successfully!");

            if watch {
                tracing::info!("Watching for file changes...");
                blog_rs::commands::generate::watch(&blog).await?;
            }
        }

        Commands::Server { port, ip, watch } => {
            let blog = blog_rs::Blog::new(&base_dir)?;

            // Generate first
            tracing::info!("Generating data artifacts...");
            blog.generate()?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            blog_rs::server::start(&blog, &ip, port, watch).await?;
        }

        Commands::Clean => {
            let blog = blog_rs::Blog::new(&base_dir)?;
            tracing::info!("Cleaning data directory...");
            blog.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let blog = blog_rs::Blog::new(&base_dir)?;
            blog_rs::commands::list::run(&blog, &r#type)?;
        }

        Commands::Version => {
            println!("blog-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
