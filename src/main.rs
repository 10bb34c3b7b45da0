use clap::Parser;
use prgview::cli::{run, Args};
use prgview::init_logging;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_format)?;
    run(&args)?;
    Ok(())
}
