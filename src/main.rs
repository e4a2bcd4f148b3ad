mod app;

fn main() {
    env_logger::init();
    log::info!("gazeheat starting up");

    let options = app::ReplayOptions::from_args();
    if let Err(e) = app::run(&options) {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}
