//! Entry point for the `locus` command-line interface.
#![forbid(unsafe_code)]

use locus_cli::CliError;

fn main() {
    env_logger::init();

    if let Err(err) = locus_cli::run() {
        if let CliError::ArgumentParsing(clap_err) = err {
            clap_err.exit();
        }
        eprintln!("{}", locus_cli::error_report(&err));
        std::process::exit(1);
    }
}
