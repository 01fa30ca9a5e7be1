use clap::Parser;
use tracing_subscriber::EnvFilter;

use yield_shortcuts::{cli, hash, list_shortcuts, run};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    match cli.command {
        cli::Command::Build {
            chain,
            market_hash,
            slippage,
            skew_ratio,
            min_amount0_bps,
            min_amount1_bps,
            strict_verification,
            output_dir,
        } => run::run(&run::RunConfig {
            chain,
            market_hash,
            slippage,
            skew_ratio,
            min_amount0_bps,
            min_amount1_bps,
            strict_verification,
            output_dir,
        }),
        cli::Command::Hash { chain, shortcut } => hash::run(&chain, shortcut.as_deref()),
        cli::Command::List { chain } => list_shortcuts::run(chain.as_deref()),
    }
}
