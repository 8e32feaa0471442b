use clap::Parser;

use countries_explorer::cli::{self, Cli};
use countries_explorer::logging::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    let config = match cli::load_config(&cli) {
        Ok(store) => store.get(),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    match cli::run(&cli, &config).await {
        Ok(output) => print!("{}", output),
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
