mod commands;
mod render;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use monthcal_core::config::AppConfig;
use monthcal_core::{CalendarMonth, DateKey};

#[derive(Parser)]
#[command(name = "monthcal")]
#[command(about = "Browse a month calendar and manage the events on each day")]
struct Cli {
    /// Config file to use instead of ~/.config/monthcal/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the month grid, marking days that have events
    View {
        /// Month to show (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<CalendarMonth>,
    },
    /// Add an event to a day
    Add {
        /// Day of the event (YYYY-MM-DD)
        date: DateKey,

        /// Event name
        name: String,

        /// Start time (HH:MM)
        #[arg(short, long)]
        start: String,

        /// End time (HH:MM)
        #[arg(short, long)]
        end: String,

        /// Event description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Change an existing event
    Edit {
        /// Day of the event (YYYY-MM-DD)
        date: DateKey,

        /// Event id, as shown by `list`
        id: String,

        /// New name
        #[arg(short, long)]
        name: Option<String>,

        /// New start time (HH:MM)
        #[arg(short, long)]
        start: Option<String>,

        /// New end time (HH:MM)
        #[arg(short, long)]
        end: Option<String>,

        /// New description (pass "" to clear it)
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete an event
    Delete {
        /// Day of the event (YYYY-MM-DD)
        date: DateKey,

        /// Event id, as shown by `list`
        id: String,
    },
    /// List the events of a day
    List {
        /// Day to list (YYYY-MM-DD)
        date: DateKey,

        /// Only show events whose name or description contains this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Export a month's events as JSON
    Export {
        /// Month to export (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<CalendarMonth>,

        /// Directory to write the file to (defaults to export_dir from config)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Show where monthcal reads and writes its files
    Config,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::View { month } => commands::view::run(&config, month_or_current(month)?),
        Commands::Add {
            date,
            name,
            start,
            end,
            description,
        } => commands::add::run(&config, date, name, start, end, description),
        Commands::Edit {
            date,
            id,
            name,
            start,
            end,
            description,
        } => commands::edit::run(&config, date, &id, name, start, end, description),
        Commands::Delete { date, id } => commands::delete::run(&config, date, &id),
        Commands::List { date, search } => commands::list::run(&config, date, search.as_deref()),
        Commands::Export { month, out } => {
            commands::export::run(&config, month_or_current(month)?, out)
        }
        Commands::Config => commands::config::run(&config, cli.config.as_deref()),
    }
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    Ok(config)
}

fn month_or_current(month: Option<CalendarMonth>) -> Result<CalendarMonth> {
    let month = match month {
        Some(month) => month,
        None => CalendarMonth::current()?,
    };
    Ok(month)
}
