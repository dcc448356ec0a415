use clap::Parser;
use quad::{app, logging};
use quad::config::Args;

fn main() {
    logging::init();

    let config = match Args::parse().into_config() {
        Ok(c) => c,
        Err(e) => {
            println!("{e}");
            std::process::exit(-1);
        }
    };

    if let Err(e) = app::run(&config) {
        println!("{e}");
        log::debug!("bootstrap failed at {:?}", e.stage());
        std::process::exit(-1);
    }
}
