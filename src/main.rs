use anyhow::Result;
use clap::Parser;
use govanity::commands;
use std::path::PathBuf;

/// govanity - Go vanity import path server
///
/// Serves `go-import` meta tags so that `go get example.com/project` finds the
/// real repository behind a custom domain.
///
/// Examples:
///   govanity serve                        # Serve using config/config.yaml
///   govanity resolve example.com/widget   # Show what a request would resolve to
#[derive(Parser, Debug)]
#[command(author, version = env!("GOVANITY_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to config/config.yaml, then the user config dir)
    #[arg(
        long = "config",
        short = 'c',
        env = "GOVANITY_CONFIG",
        value_name = "PATH",
        global = true
    )]
    pub config: Option<PathBuf>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Resolve an import path against the configured rules
    Resolve(ResolveArgs),

    /// Validate the configuration and list its rules
    Check,
}

#[derive(clap::Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on (overrides the config file)
    #[arg(long, short = 'l', env = "GOVANITY_LISTEN", value_name = "ADDR")]
    pub listen: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ResolveArgs {
    /// Import path, e.g. "example.com/widget"
    #[arg(value_name = "IMPORT_PATH")]
    pub import_path: String,

    /// Print the metadata as JSON
    #[arg(long)]
    pub json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_level = match cli.command {
        Commands::Serve(_) => "info",
        _ => "warn",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let runtime = govanity::runtime::RealRuntime;

    match cli.command {
        Commands::Serve(args) => commands::serve(runtime, cli.config, args.listen).await?,
        Commands::Resolve(args) => {
            commands::resolve(runtime, cli.config, &args.import_path, args.json)?
        }
        Commands::Check => commands::check(runtime, cli.config)?,
    }
    Ok(())
}
