use clap::Parser;
use session_svc::cli::{self, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    cli::serve::run(cli.command.and_then(|command| command.transport())).await
}
