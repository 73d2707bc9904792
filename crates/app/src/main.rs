mod cli;
mod logging;
mod state;

use clap::{Parser, Subcommand};
use cli::{args::Args, op::Op, Keygen, Open, Seal, Version};
use state::AppState;

command_enum! {
    (Keygen, Keygen),
    (Seal, Seal),
    (Open, Open),
    (Version, Version),
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let state = match AppState::load(args.config) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Error: Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    let guard = logging::init_logging(args.log_level.unwrap_or(state.log_level));
    tracing::debug!(config_path = ?state.config_path, "loaded config");

    let ctx = cli::op::OpContext::new(state.config);

    let code = match args.command.execute(&ctx).await {
        Ok(output) => {
            println!("{}", output);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    // process::exit skips destructors; flush buffered logs first
    drop(guard);
    std::process::exit(code);
}
