//! Main application entry point (native).

use clap::Parser;
use dragboard_app::{App, Cli};

fn main() {
    env_logger::init();
    let config = Cli::parse().into_config();
    log::info!("Starting Dragboard ({:?})", config.demo);

    if let Err(e) = App::run(config) {
        log::error!("{e}");
        eprintln!("dragboard: {e}");
        std::process::exit(1);
    }
}
