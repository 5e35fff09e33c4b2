use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "waterlog", version, about = "Waterlog CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drink tracking
    Drink {
        #[command(subcommand)]
        action: commands::drink::DrinkAction,
    },
    /// Reminder control
    Reminder {
        #[command(subcommand)]
        action: commands::reminder::ReminderAction,
    },
    /// Preferences management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let _logger = flexi_logger::Logger::try_with_env_or_str("warn")
        .and_then(|logger| logger.start())
        .ok();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Drink { action } => commands::drink::run(action),
        Commands::Reminder { action } => commands::reminder::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
