mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{
    conduction::ConductionSubcommand, config::ConfigSubcommand, metrics::MetricsSubcommand,
    vip::VipSubcommand,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "venue",
    about = "Venue check-in metrics, VIP lookups and escort (conduction) tracking",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .venue/)
    #[arg(long, global = true, env = "VENUE_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create .venue/config.yaml with defaults
    Init,

    /// Inspect and validate the configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },

    /// Compute attendance metrics from a snapshot file
    Metrics {
        #[command(subcommand)]
        subcommand: MetricsSubcommand,
    },

    /// Look up configured VIP guests
    Vip {
        #[command(subcommand)]
        subcommand: VipSubcommand,
    },

    /// List, confirm and decode escort queue items
    Conduction {
        #[command(subcommand)]
        subcommand: ConductionSubcommand,
    },

    /// Run the JSON API server
    Serve {
        /// Port to listen on (0 = OS-assigned)
        #[arg(long, default_value = "3150")]
        port: u16,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
        Commands::Metrics { subcommand } => cmd::metrics::run(subcommand, cli.json),
        Commands::Vip { subcommand } => cmd::vip::run(&root, subcommand, cli.json),
        Commands::Conduction { subcommand } => cmd::conduction::run(&root, subcommand, cli.json),
        Commands::Serve { port } => cmd::serve::run(&root, port),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
