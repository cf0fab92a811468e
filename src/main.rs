use std::process;

use itinerary::cli;

fn main() {
    env_logger::init();

    if let Err(e) = cli::run() {
        log::debug!("exiting with error");
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
