//! employee-api entry point
//!
//! Delegates everything to `cli::run`, prints errors to stderr and exits
//! non-zero on failure.

use employee_api::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
