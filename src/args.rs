pub mod database;
pub mod types;
pub mod validation;

use clap::Parser;
pub use types::{Args, CleanArgs};

/// Parses and validates the command line, exiting with clap's usage output on
/// bad input.
#[must_use]
pub fn args_checks() -> CleanArgs {
    match Args::parse().validate() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    }
}
