use clap::Parser;
use log::error;
use radsum_core::cli::Cli;
use radsum_core::{DatasetBuilder, TextReport};
use std::process;

fn main() {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(cli.verbose);

    let config = cli.export_config();
    match DatasetBuilder::new().build(&cli.reports, &cli.split_file, &config) {
        Ok(summary) => println!("{}", TextReport::new(&summary)),
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}
