use clap::Parser;
use tracing_subscriber::EnvFilter;

use splice_flank::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag; stdout is kept for summaries
    let filter = if cli.verbose {
        EnvFilter::new("splice_flank=debug,info")
    } else {
        EnvFilter::new("splice_flank=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Annotate(args) => {
            cli::annotate::run(args, cli.format, cli.delimiter)?;
        }
        cli::Commands::Extract(args) => {
            cli::extract::run(args, cli.format, cli.delimiter)?;
        }
        cli::Commands::Pipeline(args) => {
            cli::pipeline::run(args, cli.format, cli.delimiter)?;
        }
    }

    Ok(())
}
