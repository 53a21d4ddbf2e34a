use clap::Parser;
use trie_router::cli::{run_cli, Cli};
use trie_router::logging::init_logging_with_config;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging_with_config(&cli.log_config())?;
    run_cli(&cli, &mut std::io::stdout().lock())
}
