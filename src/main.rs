use hazardsnake::app::State;
use log::{debug, error};

fn main() {
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "hazardsnake=debug");
    }
    env_logger::init();
    debug!("Debug on");

    // hazard schedules are spawned on this runtime from the ui thread
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Could not build the tokio runtime: {e}");
            return;
        }
    };
    let _guard = runtime.enter();

    if let Err(e) = iced::application("Hazard Snake", State::update, State::view)
        .window_size(iced::Size::new(640.0, 640.0))
        .subscription(State::subscription)
        .run()
    {
        error!("Snake exited with an error: {e}");
    }
}
