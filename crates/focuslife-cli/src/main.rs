use clap::{Parser, Subcommand};

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "focuslife-cli", version, about = "FocusLife CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Habit tracking
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Finance ledger
    Tx {
        #[command(subcommand)]
        action: commands::tx::TxAction,
    },
    /// Full dashboard report
    Dashboard,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Habit { action } => commands::habit::run(action),
        Commands::Task { action } => commands::task::run(action),
        Commands::Tx { action } => commands::tx::run(action),
        Commands::Dashboard => commands::dashboard::run(),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
