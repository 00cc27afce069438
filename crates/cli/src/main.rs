use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use mesostic_engine::{ComposeConfig, Composer};
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

mod metrics;
mod server;

#[derive(Parser)]
#[command(name = "mesostic")]
#[command(about = "Compose mesostics and serve the composition API", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose a mesostic from a file or stdin
    Compose(ComposeArgs),
    /// Serve the HTTP composition API
    Serve(ServeArgs),
}

#[derive(Args)]
struct ComposeArgs {
    /// Spine string to spell down the page
    #[arg(short, long)]
    spine: String,

    /// Source text file (stdin when omitted)
    file: Option<PathBuf>,

    /// Raw selection: skip alignment and mark capitalization
    #[arg(long)]
    plain: bool,
}

#[derive(Args)]
struct ServeArgs {
    /// Address to bind the API on
    #[arg(long, default_value = "0.0.0.0:9999")]
    bind: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Compose(args) => run_compose(&args),
        Commands::Serve(args) => run_serve(&args).await,
    }
}

fn run_compose(args: &ComposeArgs) -> Result<()> {
    let source = match &args.file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            buffer
        }
    };

    let config = if args.plain {
        ComposeConfig::plain()
    } else {
        ComposeConfig::default()
    };
    let rendered = Composer::new(config).compose_text(&source, &args.spine)?;
    print!("{rendered}");
    Ok(())
}

async fn run_serve(args: &ServeArgs) -> Result<()> {
    let state = Arc::new(server::AppState::new()?);
    server::serve(&args.bind, state).await
}
