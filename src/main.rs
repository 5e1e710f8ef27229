use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod core;
mod corpus;
mod extraction;
mod output;
mod parsing;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("patient_list=debug,info")
    } else {
        EnvFilter::new("patient_list=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Generate(args) => {
            cli::generate::run(args, cli.format)?;
        }
        cli::Commands::Check(args) => {
            cli::check::run(args, cli.format)?;
        }
    }

    Ok(())
}
