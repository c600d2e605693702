use clap::Parser;
use ci_core::views::{self, DatasetStatus, FilterOptions};
use ci_core::{Dataset, FilterCriteria};
use ci_ingest::{load_default, DEFAULT_DATA_FILE};
use ci_storage::MemoryStorage;
use ci_web::AppState;
use serde::Serialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

mod render;

#[derive(Parser, Debug)]
#[command(author, version, about = "Competitor intelligence dashboard", long_about = None)]
pub struct Cli {
    /// Spreadsheet loaded at startup. A missing file just means no data yet.
    #[arg(long, global = true, default_value = DEFAULT_DATA_FILE)]
    data: PathBuf,
    #[arg(long, global = true, default_value = "info")]
    log_level: tracing::Level,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Debug, Clone, Default)]
struct FilterArgs {
    /// Competitor to keep, or "All"
    #[arg(long)]
    competitor: Option<String>,
    /// News type to keep, or "All"
    #[arg(long)]
    category: Option<String>,
    /// Business unit to keep, or "All"
    #[arg(long)]
    bu: Option<String>,
}

impl FilterArgs {
    fn criteria(&self) -> FilterCriteria {
        FilterCriteria::from_selections(self.competitor.as_deref(), self.category.as_deref(), self.bu.as_deref())
    }
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Serve the dashboard JSON API
    Serve {
        #[arg(long, default_value = "127.0.0.1:8501")]
        addr: SocketAddr,
    },
    #[command(flatten)]
    View(ViewCommand),
}

/// One-shot views printed against the file given by `--data`.
#[derive(clap::Subcommand, Debug)]
enum ViewCommand {
    /// Executive summary: the most recent major moves
    Summary {
        #[command(flatten)]
        filters: FilterArgs,
        #[arg(long)]
        json: bool,
    },
    /// Profile of one competitor
    Competitor {
        name: String,
        #[arg(long)]
        json: bool,
    },
    /// Profile of one business unit
    BusinessUnit {
        name: String,
        #[arg(long)]
        json: bool,
    },
    /// Every matching article, newest first
    Articles {
        #[command(flatten)]
        filters: FilterArgs,
        #[arg(long)]
        json: bool,
    },
    /// Values available to each filter
    Filters {
        #[arg(long)]
        json: bool,
    },
    /// How many articles are loaded
    Status,
}

fn print_view<T: Serialize>(view: &T, json: bool, text: impl FnOnce(&T) -> String) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
    } else {
        print!("{}", text(view));
    }
    Ok(())
}

fn run_view(command: ViewCommand, dataset: &Dataset) -> anyhow::Result<()> {
    match command {
        ViewCommand::Summary { filters, json } => {
            print_view(&views::major_moves(dataset, &filters.criteria()), json, render::major_moves)
        }
        ViewCommand::Competitor { name, json } => {
            print_view(&views::competitor_profile(dataset, &name), json, render::competitor_profile)
        }
        ViewCommand::BusinessUnit { name, json } => {
            print_view(&views::business_unit_profile(dataset, &name), json, render::business_unit_profile)
        }
        ViewCommand::Articles { filters, json } => {
            print_view(&views::industry_updates(dataset, &filters.criteria()), json, render::industry_updates)
        }
        ViewCommand::Filters { json } => {
            print_view(&FilterOptions::of(dataset).selectors(), json, render::filter_options)
        }
        ViewCommand::Status => {
            println!("{}", DatasetStatus::of(Some(dataset)).message());
            Ok(())
        }
    }
}

async fn serve(addr: SocketAddr, data: &Path) -> anyhow::Result<()> {
    let default = match load_default(data) {
        Ok(dataset) => dataset,
        Err(e) => {
            warn!("⚠️ Could not load default file {}: {}", data.display(), e);
            None
        }
    };
    info!("📊 {}", DatasetStatus::of(default.as_ref()).message());

    let storage = Arc::new(MemoryStorage::with_default(default));
    ci_web::serve(addr, AppState::new(storage)).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Serve { addr } => serve(addr, &cli.data).await,
        Commands::View(command) => match load_default(&cli.data)? {
            Some(dataset) => run_view(command, &dataset),
            None => {
                println!("{}", DatasetStatus::NoData.message());
                Ok(())
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_summary_filters() {
        let cli = Cli::try_parse_from(["ci", "summary", "--competitor", "Acme", "--category", "All"]).unwrap();
        match cli.command {
            Commands::View(ViewCommand::Summary { filters, json }) => {
                assert!(!json);
                let criteria = filters.criteria();
                assert_eq!(criteria.competitor.as_deref(), Some("Acme"));
                assert_eq!(criteria.category, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(cli.data, PathBuf::from(DEFAULT_DATA_FILE));
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["ci", "--data", "weekly.xlsx", "serve", "--addr", "0.0.0.0:9000"]).unwrap();
        assert_eq!(cli.data, PathBuf::from("weekly.xlsx"));
        assert!(matches!(cli.command, Commands::Serve { addr } if addr.port() == 9000));
    }
}
