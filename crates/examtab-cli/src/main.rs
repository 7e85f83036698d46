use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod session;

#[derive(Parser)]
#[command(name = "examtab", version, about = "Exam countdowns in your terminal")]
struct Cli {
    /// Log catalog and storage activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the active exam's countdown once
    Countdown(commands::countdown::CountdownArgs),
    /// Live countdown and clock, refreshed every tick
    Watch(commands::watch::WatchArgs),
    /// Exam selection and the custom exam
    Exam {
        #[command(subcommand)]
        action: commands::exam::ExamAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "examtab=info,examtab_core=info"
    } else {
        "examtab=warn,examtab_core=warn"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Countdown(args) => commands::countdown::run(args),
        Commands::Watch(args) => commands::watch::run(args),
        Commands::Exam { action } => commands::exam::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
