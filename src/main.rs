use clap::Parser;
use std::path::Path;
use zensearch::cli::{self, Cli, Command};
use zensearch::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Tui(_) => {
            if cli.debug {
                logging::init_file(Path::new(logging::DEBUG_LOG_PATH))?;
            }
        }
        _ => logging::init_stderr(cli.debug),
    }

    cli::run(cli).await
}
