use clap::Parser;
use parsum::{Cli, Result};

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
