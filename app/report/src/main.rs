//! FILENAME: app/report/src/main.rs
// PURPOSE: Command-line entry point. Errors become a log line and exit code 1.

use clap::Parser;
use report_lib::cli::Cli;
use std::io;
use std::process;

fn main() {
    let cli = Cli::parse();
    report_lib::logging::init(cli.verbose);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = report_lib::run(&cli, &mut out) {
        log::error!("{}", e);
        process::exit(1);
    }
}
