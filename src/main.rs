use clap::Parser;
use rampscout::cli::{self, output, CheckCommand, Cli, Commands};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let _ = rustls::crypto::ring::default_provider().install_default();

    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Run(args) => cli::run::execute(args).await,
        Commands::Check(CheckCommand::Config(arg)) => cli::check::execute_config(arg.config.as_deref()),
        Commands::Check(CheckCommand::Connection(arg)) => {
            cli::check::execute_connection(arg.config.as_deref()).await
        }
    };

    // Exit explicitly: a cancelled operator prompt may still hold a
    // blocking thread that would otherwise keep the runtime alive.
    let code = match result {
        Ok(()) => 0,
        Err(e) => {
            output::error(&e.to_string());
            1
        }
    };
    std::process::exit(code);
}
