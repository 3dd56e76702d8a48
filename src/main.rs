use log::debug;
use retrorealm::app::State;

fn main() {
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "retrorealm=debug");
    }
    env_logger::init();
    debug!("Debug on");
    let _ = iced::application("Retro Realm", State::update, State::view)
        .window_size(iced::Size::new(1000.0, 900.0))
        .subscription(State::subscription)
        .run();
}
