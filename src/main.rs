mod cli;

use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::process::ExitCode;

use clap::Parser;
use derecurse::driver::{self, run_batch};
use derecurse::error_handling::Location;
use tracing::Level;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    // stdout only carries transformed grammars
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    init_logging(cli.verbose);

    let mut options = cli.options();
    let result = match &cli.file {
        Some(path) => {
            let location = Location {
                file: path.clone(),
                ..Location::default()
            };
            File::open(path)
                .map_err(|e| driver::io_error(e, &location))
                .and_then(|file| run_batch(BufReader::new(file), &mut io::stderr(), &options, &location))
        }
        None => {
            let stdin = io::stdin();
            options.interactive |= stdin.is_terminal();
            run_batch(stdin.lock(), &mut io::stderr(), &options, &Location::stdin())
        }
    };

    match result {
        Ok(output) => {
            if !output.text.is_empty() {
                println!("{}", output.text);
            }
            for failure in &output.failures {
                eprintln!("{}", failure);
            }

            if output.failures.is_empty() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(error) => {
            eprintln!("{}", error);
            ExitCode::from(2)
        }
    }
}
