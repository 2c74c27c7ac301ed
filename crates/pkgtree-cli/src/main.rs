//! pkgtree - visualize the import graph of Go packages.
//!
//! Entry point: parses arguments, initializes logging, runs the command, and
//! reports failures through miette.

use clap::Parser;
use miette::Result;
use pkgtree_cli::{cli, error, logger, run};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);

    match run::execute(&args) {
        Ok(output) => {
            print!("{output}");
            Ok(())
        }
        Err(err) => Err(error::cli_error_to_miette(err)),
    }
}
