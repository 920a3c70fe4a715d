//! # Plate Planner
//!
//! Conversational travel-food planner: asks about the trip, has an LLM write a
//! restaurant itinerary, stores the restaurants it names, and looks up reviews.
//!
//! ## Modes
//! - Interactive terminal UI (default)
//! - One-shot subcommands (`plan`, `extract`, `places`, `reviews`, `render`, `config`)

mod cli;
mod core;
mod run;
mod tui;

use clap::{CommandFactory, Parser};
use dotenv::dotenv;

use cli::{Args, Commands, ConfigAction};

fn exit_on_error(result: Result<(), Box<dyn std::error::Error>>) {
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let args = Args::parse();
    run::init_logger(&args);

    let mut config = core::cli::load_config_or_exit();
    if let Some(store) = &args.store {
        config.store_path = store.clone();
    }

    match args.command {
        None => exit_on_error(run::launch_tui(config).await),
        Some(Commands::Plan {
            from_text,
            answers,
            html,
        }) => exit_on_error(
            core::cli::run_plan(
                &config,
                from_text.as_deref(),
                answers.as_deref(),
                html.as_deref(),
            )
            .await,
        ),
        Some(Commands::Extract { file }) => exit_on_error(core::cli::run_extract(&config, &file)),
        Some(Commands::Places { policy, json }) => {
            exit_on_error(core::cli::run_places(&config, policy, json))
        }
        Some(Commands::Reviews {
            policy,
            concurrency,
        }) => exit_on_error(core::cli::run_reviews(&config, policy, concurrency).await),
        Some(Commands::Render { input, output }) => exit_on_error(core::cli::run_render(
            input.as_deref(),
            output.as_deref(),
        )),
        Some(Commands::Config { action: None }) => core::cli::run_config(&config),
        Some(Commands::Config {
            action: Some(ConfigAction::SetKey { provider, key }),
        }) => exit_on_error(core::cli::run_set_key(provider, key)),
        Some(Commands::Completions { shell }) => {
            let mut cmd = Args::command();
            cli::generate(shell, &mut cmd, core::app::NAME, &mut std::io::stdout());
        }
    }
    Ok(())
}
