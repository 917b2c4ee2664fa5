use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tool_directory::catalog::{load, render_page, DirectoryState, SortKey};

#[derive(Parser)]
#[command(name = "directory-cli")]
#[command(about = "Preview the tool directory served by a running proxy", long_about = None)]
struct Cli {
    /// Base URL of the directory proxy.
    #[arg(short, long, default_value = "http://localhost:8888")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ViewArgs {
    /// Only show tools in this category ("all" for every category).
    #[arg(short, long, default_value = "all")]
    category: String,

    /// Case-insensitive search over name and description.
    #[arg(short, long, default_value = "")]
    search: String,

    /// name, rating, price-low or price-high.
    #[arg(long)]
    sort: Option<SortKey>,
}

#[derive(Subcommand)]
enum Commands {
    /// List tools after filtering and sorting
    List {
        #[command(flatten)]
        view: ViewArgs,

        /// Print the normalized tools as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the category filter values
    Categories,
    /// Render the directory page as standalone HTML
    Render {
        #[command(flatten)]
        view: ViewArgs,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let client = reqwest::Client::new();
    let state = load(&client, &cli.url).await;

    match cli.command {
        Commands::List { view, json } => {
            let state = apply_view(state, view);
            let Some(model) = state.view() else {
                return report_error(&state);
            };
            if json {
                println!("{}", serde_json::to_string_pretty(model.visible())?);
            } else {
                for tool in model.visible() {
                    println!(
                        "{:<28} {:<18} {:>4} {}",
                        tool.name, tool.category, tool.rating, tool.price
                    );
                }
                println!("{} of {} tools", model.visible().len(), model.tool_count());
            }
        }
        Commands::Categories => {
            let Some(model) = state.view() else {
                return report_error(&state);
            };
            for category in model.categories() {
                println!("{}", category);
            }
        }
        Commands::Render { view, output } => {
            let state = apply_view(state, view);
            let html = render_page(&state).to_html("Tool Directory");
            match output {
                Some(path) => std::fs::write(path, html)?,
                None => print!("{}", html),
            }
        }
    }

    Ok(())
}

fn apply_view(state: DirectoryState, view: ViewArgs) -> DirectoryState {
    state.apply_view(view.category, view.search, view.sort)
}

fn report_error(state: &DirectoryState) -> Result<(), Box<dyn std::error::Error>> {
    if let DirectoryState::Error(message) = state {
        eprintln!("Error: {}", message);
    }
    std::process::exit(1);
}
