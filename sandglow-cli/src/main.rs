//! # Sandglow
//!
//! Command line front end for the sandglow position-sync lighting engine.

use log::error;

mod cli;
mod logging;
mod runner;

fn main() {
    logging::init();
    let args = cli::args::build_cli().get_matches();

    let code = match runner::run(&args) {
        Ok(code) => code,
        Err(err) => {
            error!("{}", err);
            -1
        }
    };

    std::process::exit(code)
}
