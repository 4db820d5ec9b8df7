//! Main entry point for the Nyumba CLI

use clap::{CommandFactory, Parser};
use clap_complete::env::CompleteEnv;
use clap_verbosity_flag::LevelFilter;
use color_eyre::eyre::{eyre, Result};
use nyumba_cli::cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Answer shell completion requests before normal argument parsing
    CompleteEnv::with_factory(Args::command).complete();

    let args = Args::parse();

    // Keep error reports short; file locations mean nothing to end users
    color_eyre::config::HookBuilder::default()
        .display_location_section(false)
        .display_env_section(false)
        .install()?;

    match args.verbosity.log_level_filter() {
        LevelFilter::Off | LevelFilter::Error => {}
        _ => {
            std::env::set_var("RUST_LIB_BACKTRACE", "1");
        }
    }

    // Quiet unless -v or RUST_LOG asks for more
    nyumba_common::logging::init_cli_logging(&args.verbosity, "nyumba_cli=warn,nyumba_sdk=warn")
        .map_err(|e| eyre!("Failed to initialize logging: {}", e))?;

    Ok(args.run().await?)
}
