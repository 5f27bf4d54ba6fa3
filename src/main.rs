//! Burner CLI binary entry point.

use std::io;

use burner::cli::{commands, Cli, Commands};
use burner::config::BurnerConfig;
use burner::error::{BurnerError, Result};
use burner::models::ProviderKind;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        print_error_with_hint(&e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = BurnerConfig::from_env()?;
    if let Some(dir) = cli.data_dir {
        config.set_data_dir(dir);
    }

    match cli.command {
        Commands::Chat(args) => {
            if args.offline {
                config.set_provider(ProviderKind::Echo);
            }
            commands::handle_chat(&config, args).await
        }
        Commands::Prompts(args) => commands::handle_prompts(&config, args.command, &mut io::stdout()),
        Commands::Chats(args) => commands::handle_chats(&config, args.command, &mut io::stdout()),
    }
}

fn print_error_with_hint(err: &BurnerError) {
    eprintln!("Error: {err}");
    eprintln!("Hint: {}", err.recovery_suggestion());
}
