use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use inkspire_core::TattooStyle;
use tracing_subscriber::EnvFilter;

mod commands;
mod context;
mod studio;

use commands::generate::GenerateArgs;
use context::AppContext;

#[derive(Parser)]
#[command(name = "inkspire")]
#[command(about = "InkSpire - AI tattoo design studio", long_about = None)]
struct Cli {
    /// Directory holding config.toml and secret.json (default: ~/.config/inkspire)
    #[arg(long, global = true, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available tattoo styles
    Styles,
    /// Show how a description would be split into two prompts
    Classify {
        description: String,
    },
    /// Generate two designs and save their images
    Generate {
        description: String,
        /// Style id or label (see `inkspire styles`)
        #[arg(long, short, default_value = "realism")]
        style: TattooStyle,
        /// Reference image sent along with the description
        #[arg(long, short, value_name = "PATH")]
        reference: Option<PathBuf>,
        /// Output directory (default: output.directory from config.toml)
        #[arg(long, short, value_name = "DIR")]
        out: Option<PathBuf>,
        /// Also write a printable stencil page per result
        #[arg(long)]
        print: bool,
    },
    /// Interactive studio with sign-in, history and virtual try-on
    Studio,
    /// Create config.toml and a secret.json template
    Init,
}

/// Logs go to stderr so they never mix with generated output on stdout.
/// `RUST_LOG` wins over `log_level` from config.toml.
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
    {
        eprintln!("tracing init failed: {e}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let ctx = AppContext::load(cli.config_dir.as_deref())?;
    init_tracing(&ctx.config.log_level);

    match cli.command {
        Commands::Styles => commands::styles::run(),
        Commands::Classify { description } => commands::classify::run(&description),
        Commands::Generate {
            description,
            style,
            reference,
            out,
            print,
        } => {
            commands::generate::run(
                &ctx,
                GenerateArgs {
                    description,
                    style,
                    reference,
                    out,
                    print,
                },
            )
            .await?
        }
        Commands::Studio => studio::run(&ctx).await?,
        Commands::Init => commands::init::run(&ctx.paths)?,
    }

    Ok(())
}
